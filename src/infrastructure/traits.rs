//! Collaborator boundary traits
//!
//! These traits abstract the storage and routing capabilities the navigation
//! services consume, allowing services to be tested with fake implementations.

use std::io;

use crate::domain::{Arguments, Category, CategoryId, CategoryOrder, MenuDemand, Selection};

/// Category storage.
///
/// Implementations exclude hidden rows and resolve translated rows to the
/// requested ids.
pub trait CategoryProvider: Send + Sync {
    /// Categories whose id (or translation parent) is in `ids`.
    fn find_by_ids(&self, ids: &Selection, order: &CategoryOrder) -> io::Result<Vec<Category>>;

    /// Direct sub-categories of `parent`.
    fn find_children(
        &self,
        parent: &CategoryId,
        order: &CategoryOrder,
    ) -> io::Result<Vec<Category>>;
}

/// Existence probe for record queries.
pub trait PotentialChecker: Send + Sync {
    /// Would a query for `demand` return at least one record?
    fn exists(&self, demand: &MenuDemand) -> io::Result<bool>;
}

/// Route-aware URL construction from an argument map.
pub trait UrlBuilder: Send + Sync {
    /// Build a URL for `arguments`. `page_type` selects the rendering type
    /// (`0` for the full page).
    fn build(&self, arguments: &Arguments, absolute: bool, page_type: u32) -> String;
}

/// Replacement for the default fragment URL construction.
pub trait FragmentUrlBuilder: Send + Sync {
    fn build(&self, arguments: &Arguments) -> String;
}

impl<F> FragmentUrlBuilder for F
where
    F: Fn(&Arguments) -> String + Send + Sync,
{
    fn build(&self, arguments: &Arguments) -> String {
        self(arguments)
    }
}
