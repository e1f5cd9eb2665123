//! Domain layer: entities and navigation algorithms
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arguments;
pub mod demand;
pub mod entities;
pub mod error;
pub mod pagination;
pub mod policy;
pub mod selection;

pub use arguments::{selection_path, ArgumentValue, Arguments};
pub use demand::{CategoryGroup, Conjunction, MenuDemand, OrderDirection, RecordRef};
pub use entities::*;
pub use error::DomainError;
pub use pagination::PageWindow;
pub use policy::{FlipPolicy, TreeLevel, TreeLevelPolicy, MAX_BUILD_TREE};
pub use selection::{CategoryId, Selection};
