//! Query-string URL construction against a fixed base URL.

use url::{Position, Url};

use crate::application::ApplicationError;
use crate::domain::Arguments;
use crate::infrastructure::error::InfraResult;
use crate::infrastructure::traits::UrlBuilder;

/// Argument carrying a non-zero page type.
pub const PAGE_TYPE_ARGUMENT: &str = "type";

/// Renders arguments as a bracket-notation query on `base_url`.
///
/// Absolute links keep scheme and host; relative links are path plus query.
#[derive(Debug, Clone)]
pub struct QueryStringUrlBuilder {
    base: Url,
}

impl QueryStringUrlBuilder {
    pub fn new(base_url: &str) -> InfraResult<Self> {
        let mut base = Url::parse(base_url).map_err(|e| ApplicationError::Config {
            message: format!("invalid base_url {base_url:?}: {e}"),
        })?;
        base.set_query(None);
        base.set_fragment(None);
        Ok(Self { base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }
}

impl UrlBuilder for QueryStringUrlBuilder {
    fn build(&self, arguments: &Arguments, absolute: bool, page_type: u32) -> String {
        let query = if page_type == 0 {
            arguments.to_query_string()
        } else {
            let mut arguments = arguments.clone();
            arguments.insert(PAGE_TYPE_ARGUMENT, page_type.to_string());
            arguments.to_query_string()
        };

        let mut url = self.base.clone();
        url.set_query((!query.is_empty()).then_some(query.as_str()));
        if absolute {
            url.to_string()
        } else {
            url[Position::BeforePath..].to_string()
        }
    }
}
