//! Infrastructure layer: collaborator implementations and DI container
//!
//! This layer implements the boundary traits and wires up services.

pub mod catalog;
pub mod di;
pub mod error;
pub mod traits;
pub mod uri;

pub use catalog::Catalog;
pub use error::{InfraError, InfraResult};
pub use uri::QueryStringUrlBuilder;
