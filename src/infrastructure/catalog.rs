//! File-backed category and record store
//!
//! A catalog is a TOML document:
//!
//! ```toml
//! [[categories]]
//! id = "1"
//! title = "Topics"
//!
//! [[categories]]
//! id = "2"
//! title = "Sport"
//! parent = "1"
//!
//! [[records]]
//! uid = "10"
//! pid = "1"
//! categories = "2"
//! ```

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{
    Category, CategoryId, CategoryOrder, MenuDemand, OrderDirection, RecordRef, Selection,
};
use crate::infrastructure::error::{InfraError, InfraResult};
use crate::infrastructure::traits::{CategoryProvider, PotentialChecker};

/// Listing record with its category assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Record {
    pub uid: String,
    #[serde(default)]
    pub pid: String,
    #[serde(default)]
    pub l10n_parent: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub categories: Selection,
}

impl Record {
    fn as_record_ref(&self) -> RecordRef<'_> {
        RecordRef {
            uid: &self.uid,
            pid: &self.pid,
            l10n_parent: self.l10n_parent.as_deref(),
            categories: self.categories.as_slice(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Catalog {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub records: Vec<Record>,
}

impl Catalog {
    pub fn load(path: &Path) -> InfraResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| InfraError::io(format!("read catalog {}", path.display()), e))?;
        let catalog: Self = toml::from_str(&content).map_err(|e| InfraError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        debug!(
            "catalog loaded: {} categories, {} records",
            catalog.categories.len(),
            catalog.records.len()
        );
        Ok(catalog)
    }

    /// Records satisfying `demand`, offset and limit applied.
    pub fn matching<'a>(&'a self, demand: &'a MenuDemand) -> impl Iterator<Item = &'a Record> + 'a {
        let limit = demand.limit.map_or(usize::MAX, |limit| limit as usize);
        self.records
            .iter()
            .filter(move |record| demand.matches(&record.as_record_ref()))
            .skip(demand.offset as usize)
            .take(limit)
    }

    fn visible(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter().filter(|category| !category.hidden)
    }
}

fn sort_categories(categories: &mut [Category], order: &CategoryOrder) {
    categories.sort_by(|a, b| {
        let ordering = match order.field.as_str() {
            "sorting" => a.sorting.cmp(&b.sorting),
            "title" => a.title.cmp(&b.title),
            "uid" | "id" => a.id.cmp(&b.id),
            field => a.labels.get(field).cmp(&b.labels.get(field)),
        };
        match order.direction {
            OrderDirection::Asc => ordering,
            OrderDirection::Desc => ordering.reverse(),
        }
    });
}

fn is_selected(category: &Category, ids: &Selection) -> bool {
    ids.is_active(&category.id)
        || category
            .l10n_parent
            .as_ref()
            .is_some_and(|parent| ids.is_active(parent))
}

impl CategoryProvider for Catalog {
    fn find_by_ids(&self, ids: &Selection, order: &CategoryOrder) -> io::Result<Vec<Category>> {
        let mut found: Vec<Category> = self
            .visible()
            .filter(|category| is_selected(category, ids))
            .cloned()
            .collect();
        sort_categories(&mut found, order);
        Ok(found)
    }

    fn find_children(&self, parent: &CategoryId, order: &CategoryOrder) -> io::Result<Vec<Category>> {
        let mut found: Vec<Category> = self
            .visible()
            .filter(|category| category.parent.as_ref() == Some(parent))
            .cloned()
            .collect();
        sort_categories(&mut found, order);
        Ok(found)
    }
}

impl PotentialChecker for Catalog {
    fn exists(&self, demand: &MenuDemand) -> io::Result<bool> {
        Ok(self.matching(demand).next().is_some())
    }
}
