//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on collaborator traits (CategoryProvider, UrlBuilder, etc.)
//! but are themselves concrete structs, not traits.

mod filter;
mod filter_item;
mod pagination;

pub use filter::CategoryFilterService;
pub use filter_item::{FilterItemBuilder, ItemContext};
pub use pagination::{HeadLinks, PaginationService};
