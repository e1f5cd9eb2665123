//! Request argument map.
//!
//! Arguments are a nested string map mirroring bracket-notation query strings:
//! `demand[categories][0][uids]=1,2` is the path
//! `["demand", "categories", "0", "uids"]` holding the text `"1,2"`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

/// Path of the selection argument for a category group (wire contract).
pub fn selection_path(group_key: &str) -> [&str; 4] {
    ["demand", "categories", group_key, "uids"]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgumentValue {
    Text(String),
    Nested(Arguments),
}

impl ArgumentValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ArgumentValue::Text(text) => Some(text),
            ArgumentValue::Nested(_) => None,
        }
    }

    pub fn as_nested(&self) -> Option<&Arguments> {
        match self {
            ArgumentValue::Text(_) => None,
            ArgumentValue::Nested(nested) => Some(nested),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Arguments(BTreeMap<String, ArgumentValue>);

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a bracket-notation query string (without the leading `?`).
    pub fn from_query(query: &str) -> Self {
        let mut arguments = Self::new();
        for (key, value) in form_urlencoded::parse(query.trim_start_matches('?').as_bytes()) {
            let path = arguments.resolve_appends(split_key(&key));
            let path: Vec<&str> = path.iter().map(String::as_str).collect();
            arguments.set_path(&path, value.into_owned());
        }
        arguments
    }

    /// Replace each empty `[]` segment by the next free numeric index of the
    /// map it appends to.
    fn resolve_appends(&self, mut path: Vec<String>) -> Vec<String> {
        for i in 1..path.len() {
            if !path[i].is_empty() {
                continue;
            }
            let prefix: Vec<&str> = path[..i].iter().map(String::as_str).collect();
            let next = self
                .get_path(&prefix)
                .and_then(ArgumentValue::as_nested)
                .map_or(0, Arguments::next_index);
            path[i] = next.to_string();
        }
        path
    }

    fn next_index(&self) -> u64 {
        self.0
            .keys()
            .filter_map(|key| key.parse::<u64>().ok())
            .max()
            .map_or(0, |max| max.saturating_add(1))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ArgumentValue)> {
        self.0.iter()
    }

    pub fn get(&self, key: &str) -> Option<&ArgumentValue> {
        self.0.get(key)
    }

    pub fn get_text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(ArgumentValue::as_text)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), ArgumentValue::Text(value.into()));
    }

    pub fn remove(&mut self, key: &str) -> Option<ArgumentValue> {
        self.0.remove(key)
    }

    pub fn get_path(&self, path: &[&str]) -> Option<&ArgumentValue> {
        let (last, parents) = path.split_last()?;
        let mut current = self;
        for segment in parents {
            current = current.get(segment)?.as_nested()?;
        }
        current.get(last)
    }

    pub fn get_path_text(&self, path: &[&str]) -> Option<&str> {
        self.get_path(path).and_then(ArgumentValue::as_text)
    }

    /// Set a text value, creating intermediate maps. A text value standing in
    /// the way of the path is replaced by a map.
    pub fn set_path(&mut self, path: &[&str], value: impl Into<String>) {
        let Some((last, parents)) = path.split_last() else {
            return;
        };
        let mut current = self;
        for segment in parents {
            let entry = current
                .0
                .entry(segment.to_string())
                .or_insert_with(|| ArgumentValue::Nested(Arguments::new()));
            if let ArgumentValue::Text(_) = entry {
                *entry = ArgumentValue::Nested(Arguments::new());
            }
            current = match entry {
                ArgumentValue::Nested(nested) => nested,
                ArgumentValue::Text(_) => return,
            };
        }
        current.insert(*last, value);
    }

    /// Remove the value at `path`; maps left empty by the removal are pruned.
    pub fn remove_path(&mut self, path: &[&str]) -> Option<ArgumentValue> {
        match path {
            [] => None,
            [key] => self.remove(key),
            [head, rest @ ..] => {
                let nested = match self.0.get_mut(*head)? {
                    ArgumentValue::Nested(nested) => nested,
                    ArgumentValue::Text(_) => return None,
                };
                let removed = nested.remove_path(rest);
                if nested.is_empty() {
                    self.0.remove(*head);
                }
                removed
            }
        }
    }

    /// Flatten to bracket-notation `(key, value)` pairs in key order.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for (key, value) in &self.0 {
            flatten_into(key.clone(), value, &mut pairs);
        }
        pairs
    }

    /// Percent-encoded query string; brackets are kept literal.
    pub fn to_query_string(&self) -> String {
        self.to_query_pairs()
            .iter()
            .map(|(key, value)| {
                format!("{}={}", encode_key(key), encode_component(value))
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

fn flatten_into(prefix: String, value: &ArgumentValue, pairs: &mut Vec<(String, String)>) {
    match value {
        ArgumentValue::Text(text) => pairs.push((prefix, text.clone())),
        ArgumentValue::Nested(nested) => {
            for (key, child) in &nested.0 {
                flatten_into(format!("{prefix}[{key}]"), child, pairs);
            }
        }
    }
}

/// `a[b][c]` → `["a", "b", "c"]`. Keys that are not well-formed bracket
/// notation are taken literally.
fn split_key(key: &str) -> Vec<String> {
    let Some(open) = key.find('[') else {
        return vec![key.to_string()];
    };
    if open == 0 || !key.ends_with(']') {
        return vec![key.to_string()];
    }
    let mut segments = vec![key[..open].to_string()];
    let inner = &key[open + 1..key.len() - 1];
    for segment in inner.split("][") {
        if segment.contains('[') || segment.contains(']') {
            return vec![key.to_string()];
        }
        segments.push(segment.to_string());
    }
    segments
}

fn encode_component(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

fn encode_key(key: &str) -> String {
    // keep the bracket structure readable, encode each segment
    let mut encoded = String::with_capacity(key.len());
    let mut segment = String::new();
    for ch in key.chars() {
        if ch == '[' || ch == ']' {
            encoded.push_str(&encode_component(&segment));
            segment.clear();
            encoded.push(ch);
        } else {
            segment.push(ch);
        }
    }
    encoded.push_str(&encode_component(&segment));
    encoded
}
