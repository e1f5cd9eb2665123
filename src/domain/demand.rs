//! Record query criteria.
//!
//! A [`MenuDemand`] is a value: speculative variants are derived with the
//! `with_*` methods, which return new demands and leave the receiver untouched.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::arguments::{ArgumentValue, Arguments};
use crate::domain::selection::{CategoryId, Selection};

/// Logical combination of constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Conjunction {
    #[default]
    Or,
    And,
    NotOr,
    NotAnd,
}

impl Conjunction {
    /// Combine already evaluated constraint results.
    pub fn combine(self, results: impl IntoIterator<Item = bool>) -> bool {
        let mut results = results.into_iter();
        match self {
            Conjunction::Or => results.any(|r| r),
            Conjunction::And => results.all(|r| r),
            Conjunction::NotOr => !results.any(|r| r),
            Conjunction::NotAnd => !results.all(|r| r),
        }
    }
}

impl fmt::Display for Conjunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Conjunction::Or => "or",
            Conjunction::And => "and",
            Conjunction::NotOr => "notor",
            Conjunction::NotAnd => "notand",
        };
        f.write_str(name)
    }
}

impl FromStr for Conjunction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "or" => Ok(Conjunction::Or),
            "and" => Ok(Conjunction::And),
            "notor" => Ok(Conjunction::NotOr),
            "notand" => Ok(Conjunction::NotAnd),
            other => Err(format!("unknown conjunction: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

impl FromStr for OrderDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(OrderDirection::Asc),
            "desc" => Ok(OrderDirection::Desc),
            other => Err(format!("unknown order direction: {other}")),
        }
    }
}

/// Category constraint of one group.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CategoryGroup {
    pub uids: Selection,
    #[serde(default)]
    pub conjunction: Conjunction,
}

/// Record as seen by [`MenuDemand::matches`].
#[derive(Debug, Clone, Copy)]
pub struct RecordRef<'a> {
    pub uid: &'a str,
    pub pid: &'a str,
    pub l10n_parent: Option<&'a str>,
    pub categories: &'a [CategoryId],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuDemand {
    /// Comma-separated parent page uids
    pub parents: String,
    /// Comma-separated record uids
    pub records: String,
    pub limit: Option<u32>,
    pub offset: u32,
    pub categories: BTreeMap<String, CategoryGroup>,
    pub categories_conjunction: Conjunction,
    pub order_field: String,
    pub order_direction: OrderDirection,
    pub order_by_records_property: bool,
    pub additional_settings: BTreeMap<String, String>,
}

impl Default for MenuDemand {
    fn default() -> Self {
        Self {
            parents: String::new(),
            records: String::new(),
            limit: None,
            offset: 0,
            categories: BTreeMap::new(),
            categories_conjunction: Conjunction::And,
            order_field: "sorting".into(),
            order_direction: OrderDirection::Asc,
            order_by_records_property: false,
            additional_settings: BTreeMap::new(),
        }
    }
}

impl MenuDemand {
    /// Build a demand from the `demand` request argument. Missing or
    /// unparsable values fall back to the defaults.
    pub fn from_arguments(arguments: &Arguments) -> Self {
        let mut demand = Self::default();
        let Some(raw) = arguments.get("demand").and_then(ArgumentValue::as_nested) else {
            return demand;
        };
        let text = |key: &str| raw.get_text(key).unwrap_or_default().to_string();

        demand.parents = text("parents");
        demand.records = text("records");
        demand.limit = raw
            .get_text("limit")
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|limit| *limit > 0);
        demand.offset = raw
            .get_text("offset")
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
        if let Some(groups) = raw.get("categories").and_then(ArgumentValue::as_nested) {
            for (group_key, group) in groups.iter() {
                let Some(group) = group.as_nested() else {
                    continue;
                };
                let conjunction = group
                    .get_text("conjunction")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or_default();
                demand.categories.insert(
                    group_key.clone(),
                    CategoryGroup {
                        uids: Selection::parse(group.get_text("uids").unwrap_or_default()),
                        conjunction,
                    },
                );
            }
        }
        if let Some(conjunction) = raw
            .get_text("categoriesConjunction")
            .and_then(|v| v.parse().ok())
        {
            demand.categories_conjunction = conjunction;
        }
        if let Some(field) = raw.get_text("orderField").filter(|f| !f.is_empty()) {
            demand.order_field = field.to_string();
        }
        if let Some(direction) = raw.get_text("orderDirection").and_then(|v| v.parse().ok()) {
            demand.order_direction = direction;
        }
        demand.order_by_records_property = matches!(
            raw.get_text("orderByRecordsProperty"),
            Some("1") | Some("true")
        );
        demand
    }

    /// Copy of this demand with the uids of `group_key` replaced by `selection`.
    pub fn with_category_selection(&self, group_key: &str, selection: &Selection) -> Self {
        let mut demand = self.clone();
        demand
            .categories
            .entry(group_key.to_string())
            .or_default()
            .uids = selection.clone();
        demand
    }

    pub fn with_limit(&self, limit: u32) -> Self {
        let mut demand = self.clone();
        demand.limit = Some(limit);
        demand
    }

    /// Whether `record` satisfies the record, parent and category constraints.
    /// Limit and offset are not applied here.
    pub fn matches(&self, record: &RecordRef<'_>) -> bool {
        let mut constraints = Vec::new();

        let records = split_list(&self.records);
        let parents = split_list(&self.parents);
        if !records.is_empty() || !parents.is_empty() {
            let by_uid = records
                .iter()
                .any(|uid| *uid == record.uid || Some(*uid) == record.l10n_parent);
            let by_pid = parents.iter().any(|pid| *pid == record.pid);
            constraints.push(by_uid || by_pid);
        }

        let groups: Vec<bool> = self
            .categories
            .values()
            .filter(|group| !group.uids.is_empty())
            .map(|group| {
                group
                    .conjunction
                    .combine(group.uids.iter().map(|id| record.categories.contains(id)))
            })
            .collect();
        if !groups.is_empty() {
            constraints.push(self.categories_conjunction.combine(groups));
        }

        constraints.into_iter().all(|c| c)
    }
}

fn split_list(raw: &str) -> Vec<&str> {
    raw.split(',').filter(|s| !s.is_empty()).collect()
}
