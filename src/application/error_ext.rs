//! Error conversion helpers for collaborator calls
//!
//! Provides extension traits for cleaner error handling with operation context.

use std::io;

use crate::application::{ApplicationError, ApplicationResult};

/// Extension trait for converting `io::Result` to `ApplicationResult` with context.
pub trait IoResultExt<T> {
    /// Add context naming the failed collaborator call.
    ///
    /// # Example
    /// ```ignore
    /// provider.find_children(&id, &order)
    ///     .with_context(|| format!("fetch children of {id}"))?;
    /// ```
    fn with_context<F: FnOnce() -> String>(self, context: F) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_context<F: FnOnce() -> String>(self, context: F) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: context(),
            source: Box::new(e),
        })
    }
}
