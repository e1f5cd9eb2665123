//! Domain entities: core data structures

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::demand::OrderDirection;
use crate::domain::selection::CategoryId;

/// Category row as delivered by the category provider.
///
/// The parent graph is not guaranteed to be acyclic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub title: String,
    #[serde(default)]
    pub parent: Option<CategoryId>,
    /// Default-language record this row translates, if any
    #[serde(default)]
    pub l10n_parent: Option<CategoryId>,
    #[serde(default)]
    pub sorting: i64,
    #[serde(default)]
    pub hidden: bool,
    /// Additional label fields (e.g. `nav_title`)
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
}

impl Category {
    pub fn new(id: impl Into<CategoryId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            parent: None,
            l10n_parent: None,
            sorting: 0,
            hidden: false,
            labels: BTreeMap::new(),
        }
    }

    pub fn with_parent(mut self, parent: impl Into<CategoryId>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_sorting(mut self, sorting: i64) -> Self {
        self.sorting = sorting;
        self
    }

    pub fn with_label(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(field.into(), value.into());
        self
    }

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "title" => Some(self.title.as_str()),
            "uid" | "id" => Some(self.id.as_str()),
            other => self.labels.get(other).map(String::as_str),
        }
    }

    /// Label from `field`, then `fallback`, then the title.
    pub fn label(&self, field: &str, fallback: &str) -> String {
        self.field(field)
            .or_else(|| self.field(fallback))
            .unwrap_or(&self.title)
            .to_string()
    }
}

/// Ordering requested from the category provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CategoryOrder {
    pub field: String,
    pub direction: OrderDirection,
}

impl Default for CategoryOrder {
    fn default() -> Self {
        Self {
            field: "sorting".into(),
            direction: OrderDirection::Asc,
        }
    }
}

/// One node of a rendered category filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterItem {
    pub label: String,
    pub url: String,
    pub fragment_url: String,
    pub children: Vec<FilterItem>,
    pub close_item: Option<Box<FilterItem>>,
    pub exclusive_item: Option<Box<FilterItem>>,
    pub active: bool,
    pub disabled: bool,
    pub has_no_potential: bool,
    pub active_children: Vec<CategoryId>,
    pub header: String,
}

impl FilterItem {
    /// Link-only item (reset, close and exclusive links).
    pub fn link(label: impl Into<String>, url: String, fragment_url: String) -> Self {
        Self {
            label: label.into(),
            url,
            fragment_url,
            ..Self::default()
        }
    }

    /// Depth-first count of this item and all descendants.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(FilterItem::node_count).sum::<usize>()
    }
}

/// Root aggregate of one filter build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryFilter {
    pub items: Vec<FilterItem>,
    pub reset_item: Option<FilterItem>,
    pub build_tree: u32,
}

/// One pagination link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationItem {
    pub label: String,
    pub url: String,
    pub fragment_url: String,
    pub active: bool,
    pub disabled: bool,
}

/// How a load-more item is triggered by the rendering layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadMoreTrigger {
    #[default]
    Click,
    Intersect,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub prev: Option<PaginationItem>,
    pub next: Option<PaginationItem>,
    pub window: Vec<PaginationItem>,
    pub separator_left: bool,
    pub separator_right: bool,
    pub separator_string: String,
    pub first: Option<PaginationItem>,
    pub last: Option<PaginationItem>,
    pub load_more: Option<PaginationItem>,
    pub load_more_trigger: LoadMoreTrigger,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            current_page: 1,
            prev: None,
            next: None,
            window: Vec::new(),
            separator_left: false,
            separator_right: false,
            separator_string: "...".into(),
            first: None,
            last: None,
            load_more: None,
            load_more_trigger: LoadMoreTrigger::Click,
        }
    }
}
