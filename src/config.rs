//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/menu-controls/menu-controls.toml`
//! 3. Local config: file passed with `--config`
//! 4. Environment variables: `MENU_CONTROLS__<SECTION>__<KEY>`
//!
//! Unknown keys are rejected in every layer.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use config::{Config, ConfigError, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::{CategoryOrder, FlipPolicy, Selection, TreeLevelPolicy};

pub const ENV_PREFIX: &str = "MENU_CONTROLS";

/// Category filter settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FilterSettings {
    /// Whether to build the filter at all
    pub active: bool,
    /// Categories rendered as flat items
    pub categories: Selection,
    /// Categories rendered with their sub-trees
    pub tree_categories: Selection,
    /// Filter-level multi-select
    pub multi_select: bool,
    /// Levels built below a tree category
    pub build_tree: u32,
    /// Levels rendered disabled; negative values invert
    pub disabled_tree: i32,
    /// Levels allowing multi-select; negative values invert
    pub multi_select_tree: i32,
    /// Build children below enabled categories that are not selected
    pub build_tree_below_enabled_inactive: bool,
    /// Probe each toggle target for matching records
    pub check_potential: bool,
    /// Arguments stripped from every filter link
    pub unset_arguments: Vec<String>,
    /// Group key of the selection in `demand[categories]`
    pub demand_categories_key: String,
    pub category_order: CategoryOrder,
    pub category_label_field: String,
    pub category_label_field_fallback: String,
    pub reset_label: String,
    /// Boundary behavior of `disabled_tree` / `multi_select_tree`
    pub flip_policy: FlipPolicy,
    /// Offer a "select only this" link next to each toggle link
    pub exclusive_item: bool,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            active: true,
            categories: Selection::new(),
            tree_categories: Selection::new(),
            multi_select: true,
            build_tree: 1,
            disabled_tree: 1,
            multi_select_tree: 1,
            build_tree_below_enabled_inactive: false,
            check_potential: false,
            unset_arguments: vec!["page".into(), "recordUid".into()],
            demand_categories_key: "0".into(),
            category_order: CategoryOrder::default(),
            category_label_field: "title".into(),
            category_label_field_fallback: "title".into(),
            reset_label: "Reset".into(),
            flip_policy: FlipPolicy::Cross,
            exclusive_item: true,
        }
    }
}

impl FilterSettings {
    /// Level policy for the root of each tree category.
    pub fn level_policy(&self) -> TreeLevelPolicy {
        TreeLevelPolicy::new(
            self.build_tree,
            self.disabled_tree,
            self.multi_select_tree,
            self.flip_policy,
        )
    }
}

/// Output shape of the pagination builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    /// Numbered window with prev/next and boundary shortcuts
    #[default]
    Standard,
    LoadMore,
    InfiniteScroll,
}

impl Variant {
    pub fn as_str(self) -> &'static str {
        match self {
            Variant::Standard => "",
            Variant::LoadMore => "load-more",
            Variant::InfiniteScroll => "infinite-scroll",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "default" => Ok(Variant::Standard),
            "load-more" => Ok(Variant::LoadMore),
            "infinite-scroll" => Ok(Variant::InfiniteScroll),
            other => Err(format!("unknown pagination variant: {other}")),
        }
    }
}

impl TryFrom<String> for Variant {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl Serialize for Variant {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Variant {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Variant::try_from(raw).map_err(serde::de::Error::custom)
    }
}

/// Pagination settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct PaginationSettings {
    pub page_argument_key: String,
    /// Argument carrying the content record uid on fragment links (empty: none)
    pub record_uid_argument_key: String,
    /// Arguments stripped from every pagination link
    pub unset_arguments: Vec<String>,
    pub items_per_page: usize,
    /// Window size; `0` shows every page
    pub maximum_links: u32,
    pub variant: Variant,
    pub prev_label: String,
    pub next_label: String,
    pub load_more_label: String,
    pub separator: String,
}

impl Default for PaginationSettings {
    fn default() -> Self {
        Self {
            page_argument_key: "page".into(),
            record_uid_argument_key: String::new(),
            unset_arguments: vec!["recordUid".into()],
            items_per_page: 12,
            maximum_links: 3,
            variant: Variant::Standard,
            prev_label: "<".into(),
            next_label: ">".into(),
            load_more_label: "+".into(),
            separator: "...".into(),
        }
    }
}

/// Link construction context shared by both builders.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct LinkSettings {
    /// Base URL of the listing page
    pub base_url: String,
    /// Page type used for fragment links
    pub fragment_page_type: u32,
    /// Content record uid injected into fragment links (`0`: none)
    pub record_uid: u32,
    /// Argument carrying `record_uid` on filter fragment links
    pub record_uid_argument_key: String,
}

impl Default for LinkSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost/".into(),
            fragment_page_type: 0,
            record_uid: 0,
            record_uid_argument_key: "recordUid".into(),
        }
    }
}

/// Unified configuration for menu-controls.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub filter: FilterSettings,
    pub pagination: PaginationSettings,
    pub links: LinkSettings,
}

/// Get the XDG config directory for menu-controls.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "menu-controls").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("menu-controls.toml"))
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local` - Optional explicit config file (must exist when given)
    pub fn load(local: Option<&Path>) -> Result<Self, ApplicationError> {
        let global = global_config_path().filter(|path| path.exists());
        Self::load_layers(global.as_deref(), local)
    }

    /// Load from explicit layers, skipping the XDG lookup.
    pub fn load_layers(
        global: Option<&Path>,
        local: Option<&Path>,
    ) -> Result<Self, ApplicationError> {
        let defaults = Config::try_from(&Settings::default()).map_err(config_err)?;
        let mut builder = Config::builder().add_source(defaults);

        if let Some(path) = global {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
        }
        if let Some(path) = local {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("filter.unset_arguments")
                .with_list_parse_key("pagination.unset_arguments"),
        );

        let config = builder.build().map_err(config_err)?;
        config.try_deserialize().map_err(config_err)
    }

    /// Parse a single TOML document on top of the defaults.
    pub fn from_toml(content: &str) -> Result<Self, ApplicationError> {
        toml::from_str(content).map_err(|e| ApplicationError::Config {
            message: format!("parse config: {e}"),
        })
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# menu-controls configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/menu-controls/menu-controls.toml
#   Local:  file passed with --config
#   Env:    MENU_CONTROLS__<SECTION>__<KEY>, e.g. MENU_CONTROLS__FILTER__BUILD_TREE=2
#
# Unknown keys are rejected.

[filter]
# active = true
# categories = ""                 # comma-separated ids rendered as flat items
# tree_categories = ""            # comma-separated ids rendered with sub-trees
# multi_select = true
# build_tree = 1                  # levels built below a tree category
# disabled_tree = 1               # levels rendered disabled, negative inverts
# multi_select_tree = 1           # levels allowing multi-select, negative inverts
# flip_policy = "cross"           # "cross" (1 -> -1 -> 1) or "collapse" (1 -> 0)
# build_tree_below_enabled_inactive = false
# check_potential = false
# unset_arguments = ["page", "recordUid"]
# demand_categories_key = "0"
# category_order = { field = "sorting", direction = "asc" }
# category_label_field = "title"
# category_label_field_fallback = "title"
# reset_label = "Reset"
# exclusive_item = true

[pagination]
# page_argument_key = "page"
# record_uid_argument_key = ""
# unset_arguments = ["recordUid"]
# items_per_page = 12
# maximum_links = 3               # 0 shows every page
# variant = ""                    # "", "load-more" or "infinite-scroll"
# prev_label = "<"
# next_label = ">"
# load_more_label = "+"
# separator = "..."

[links]
# base_url = "http://localhost/"
# fragment_page_type = 0
# record_uid = 0
# record_uid_argument_key = "recordUid"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
