//! menu-controls: category filter trees and sliding-window pagination
//!
//! Layers, innermost first:
//! - `domain`: selection, tree level policy, page window, value types
//! - `application`: filter and pagination services
//! - `infrastructure`: collaborator traits, catalog store, URL builder, DI
//! - `cli`: argument parsing and command dispatch

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
