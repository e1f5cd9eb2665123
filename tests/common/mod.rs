//! Fake collaborators shared by the integration tests.
#![allow(dead_code)]

use std::io;
use std::sync::Mutex;

use menu_controls::domain::{
    selection_path, Arguments, Category, CategoryId, CategoryOrder, MenuDemand, Selection,
};
use menu_controls::infrastructure::traits::{CategoryProvider, PotentialChecker, UrlBuilder};

/// Categories keyed by their `parent` field, returned in row order.
pub struct RowProvider {
    rows: Vec<Category>,
}

impl RowProvider {
    /// `(id, title, parent)`
    pub fn new(rows: &[(&str, &str, Option<&str>)]) -> Self {
        let rows = rows
            .iter()
            .map(|(id, title, parent)| {
                let category = Category::new(*id, *title);
                match parent {
                    Some(parent) => category.with_parent(*parent),
                    None => category,
                }
            })
            .collect();
        Self { rows }
    }

    /// 1 Topics
    /// ├── 2 Sport
    /// │   ├── 5 Football
    /// │   └── 6 Tennis
    /// ├── 3 Culture
    /// └── 4 Science
    pub fn topics() -> Self {
        Self::new(&[
            ("1", "Topics", None),
            ("2", "Sport", Some("1")),
            ("3", "Culture", Some("1")),
            ("4", "Science", Some("1")),
            ("5", "Football", Some("2")),
            ("6", "Tennis", Some("2")),
        ])
    }
}

impl CategoryProvider for RowProvider {
    fn find_by_ids(&self, ids: &Selection, _order: &CategoryOrder) -> io::Result<Vec<Category>> {
        Ok(self
            .rows
            .iter()
            .filter(|row| ids.is_active(&row.id))
            .cloned()
            .collect())
    }

    fn find_children(&self, parent: &CategoryId, _order: &CategoryOrder) -> io::Result<Vec<Category>> {
        Ok(self
            .rows
            .iter()
            .filter(|row| row.parent.as_ref() == Some(parent))
            .cloned()
            .collect())
    }
}

/// Absolute links on `https://example.org/`, relative links on `/`.
pub struct QueryUrlBuilder;

impl UrlBuilder for QueryUrlBuilder {
    fn build(&self, arguments: &Arguments, absolute: bool, page_type: u32) -> String {
        let mut query = arguments.to_query_string();
        if page_type != 0 {
            if !query.is_empty() {
                query.push('&');
            }
            query.push_str(&format!("type={page_type}"));
        }
        if absolute {
            format!("https://example.org/?{query}")
        } else {
            format!("/?{query}")
        }
    }
}

/// Query part of a URL built by [`QueryUrlBuilder`].
pub fn query_of(url: &str) -> Arguments {
    Arguments::from_query(url.split_once('?').map(|(_, query)| query).unwrap_or(""))
}

/// Category selection encoded in a URL built by [`QueryUrlBuilder`].
pub fn selection_of(url: &str) -> String {
    query_of(url)
        .get_path_text(&selection_path("0"))
        .unwrap_or_default()
        .to_string()
}

/// Records every probed demand; answers `false` for the listed selections.
pub struct RecordingChecker {
    pub seen: Mutex<Vec<MenuDemand>>,
    empty: Vec<String>,
}

impl RecordingChecker {
    pub fn new(empty: &[&str]) -> Self {
        Self {
            seen: Mutex::new(Vec::new()),
            empty: empty.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn seen(&self) -> Vec<MenuDemand> {
        self.seen.lock().unwrap().clone()
    }
}

impl PotentialChecker for RecordingChecker {
    fn exists(&self, demand: &MenuDemand) -> io::Result<bool> {
        self.seen.lock().unwrap().push(demand.clone());
        let probed = demand
            .categories
            .get("0")
            .map(|group| group.uids.to_wire())
            .unwrap_or_default();
        Ok(!self.empty.contains(&probed))
    }
}
