//! Application layer: services and use cases
//!
//! This layer orchestrates domain logic and depends on collaborator boundary traits.

pub mod error;
pub mod error_ext;
pub mod links;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use links::{LinkFactory, LinkPair};
