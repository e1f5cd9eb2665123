//! Full-page and fragment URL construction.

use std::sync::Arc;

use crate::domain::Arguments;
use crate::infrastructure::traits::{FragmentUrlBuilder, UrlBuilder};

/// The two URL forms produced for every link.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkPair {
    pub url: String,
    pub fragment_url: String,
}

/// Turns argument maps into [`LinkPair`]s.
#[derive(Clone)]
pub struct LinkFactory {
    url_builder: Arc<dyn UrlBuilder>,
    fragment_override: Option<Arc<dyn FragmentUrlBuilder>>,
    fragment_page_type: u32,
    record_uid_argument_key: String,
    record_uid: u32,
}

impl LinkFactory {
    pub fn new(url_builder: Arc<dyn UrlBuilder>, fragment_page_type: u32) -> Self {
        Self {
            url_builder,
            fragment_override: None,
            fragment_page_type,
            record_uid_argument_key: String::new(),
            record_uid: 0,
        }
    }

    /// Fragment links carry `key=uid`; ignored when either is empty/zero.
    pub fn with_record_uid(mut self, key: impl Into<String>, uid: u32) -> Self {
        self.record_uid_argument_key = key.into();
        self.record_uid = uid;
        self
    }

    pub fn with_fragment_override(mut self, fragment: Option<Arc<dyn FragmentUrlBuilder>>) -> Self {
        self.fragment_override = fragment;
        self
    }

    pub fn links(&self, arguments: &Arguments) -> LinkPair {
        LinkPair {
            url: self.url_builder.build(arguments, true, 0),
            fragment_url: self.fragment_url(arguments),
        }
    }

    fn fragment_url(&self, arguments: &Arguments) -> String {
        if let Some(fragment) = &self.fragment_override {
            return fragment.build(arguments);
        }
        if self.record_uid_argument_key.is_empty() || self.record_uid == 0 {
            return self
                .url_builder
                .build(arguments, false, self.fragment_page_type);
        }
        let mut arguments = arguments.clone();
        arguments.insert(
            self.record_uid_argument_key.clone(),
            self.record_uid.to_string(),
        );
        self.url_builder
            .build(&arguments, false, self.fragment_page_type)
    }
}

impl std::fmt::Debug for LinkFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkFactory")
            .field("fragment_override", &self.fragment_override.is_some())
            .field("fragment_page_type", &self.fragment_page_type)
            .field("record_uid_argument_key", &self.record_uid_argument_key)
            .field("record_uid", &self.record_uid)
            .finish()
    }
}
