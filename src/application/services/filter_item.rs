//! Single filter item construction: toggle target, links and potential check.

use std::slice;

use tracing::debug;

use crate::application::error_ext::IoResultExt;
use crate::application::links::{LinkFactory, LinkPair};
use crate::application::ApplicationResult;
use crate::config::FilterSettings;
use crate::domain::{selection_path, Arguments, Category, CategoryId, FilterItem, MenuDemand, Selection};
use crate::infrastructure::traits::PotentialChecker;

/// Tree position of the item being built.
#[derive(Debug, Clone, Default)]
pub struct ItemContext<'c> {
    /// Level is rendered non-interactive
    pub disabled: bool,
    /// Level allows adding to the selection
    pub multi_select: bool,
    /// Selected direct children of this node
    pub active_children: Vec<CategoryId>,
    /// Selected direct children of this node's parent
    pub active_siblings: &'c [CategoryId],
    /// Nearest enabled ancestor, target when collapsing a sole selection
    pub enabled_parent: Option<&'c CategoryId>,
}

impl ItemContext<'static> {
    /// Context of a category rendered without a tree.
    pub fn flat() -> Self {
        Self::default()
    }
}

struct PotentialProbe<'a> {
    checker: &'a dyn PotentialChecker,
    demand: &'a MenuDemand,
}

/// Builds filter items for one request.
pub struct FilterItemBuilder<'a> {
    settings: &'a FilterSettings,
    selection: &'a Selection,
    /// Request arguments with the unset list already stripped
    arguments: &'a Arguments,
    links: &'a LinkFactory,
    potential: Option<PotentialProbe<'a>>,
}

impl<'a> FilterItemBuilder<'a> {
    pub fn new(
        settings: &'a FilterSettings,
        selection: &'a Selection,
        arguments: &'a Arguments,
        links: &'a LinkFactory,
    ) -> Self {
        Self {
            settings,
            selection,
            arguments,
            links,
            potential: None,
        }
    }

    /// Enable the potential check; it stays off unless `check_potential` is set
    /// and both collaborators are present.
    pub fn with_potential(
        mut self,
        checker: Option<&'a dyn PotentialChecker>,
        demand: Option<&'a MenuDemand>,
    ) -> Self {
        self.potential = match (self.settings.check_potential, checker, demand) {
            (true, Some(checker), Some(demand)) => Some(PotentialProbe { checker, demand }),
            _ => None,
        };
        self
    }

    /// Selection that results from clicking `id`.
    pub fn toggle_target(&self, id: &CategoryId, ctx: &ItemContext<'_>) -> Selection {
        let selection = self.selection;
        if selection.is_active(id) {
            if selection.is_sole(id) || !self.settings.multi_select {
                ctx.enabled_parent.map(Selection::only).unwrap_or_default()
            } else {
                selection.without(slice::from_ref(id))
            }
        } else if !self.settings.multi_select {
            Selection::only(id)
        } else if ctx.multi_select {
            selection.union(id)
        } else {
            selection.without(ctx.active_siblings).union(id)
        }
    }

    /// Links for the request with the selection replaced by `target`
    /// (removed when empty).
    pub fn selection_links(&self, target: &Selection) -> LinkPair {
        let mut arguments = self.arguments.clone();
        let path = selection_path(&self.settings.demand_categories_key);
        if target.is_empty() {
            arguments.remove_path(&path);
        } else {
            arguments.set_path(&path, target.to_wire());
        }
        self.links.links(&arguments)
    }

    pub fn build(&self, category: &Category, ctx: ItemContext<'_>) -> ApplicationResult<FilterItem> {
        let label = category.label(
            &self.settings.category_label_field,
            &self.settings.category_label_field_fallback,
        );
        let active = self.selection.is_active(&category.id);

        let close_item = if ctx.active_children.is_empty() {
            None
        } else {
            let links = self.selection_links(&self.selection.without(&ctx.active_children));
            Some(Box::new(FilterItem::link(
                ctx.active_children.len().to_string(),
                links.url,
                links.fragment_url,
            )))
        };

        if ctx.disabled {
            return Ok(FilterItem {
                label,
                close_item,
                active,
                disabled: true,
                active_children: ctx.active_children,
                ..FilterItem::default()
            });
        }

        let target = self.toggle_target(&category.id, &ctx);
        let links = self.selection_links(&target);
        let exclusive_item = if self.settings.exclusive_item {
            let links = self.selection_links(&Selection::only(&category.id));
            Some(Box::new(FilterItem::link(
                label.clone(),
                links.url,
                links.fragment_url,
            )))
        } else {
            None
        };
        let has_no_potential = self.has_no_potential(&category.id, &target)?;

        Ok(FilterItem {
            label,
            url: links.url,
            fragment_url: links.fragment_url,
            close_item,
            exclusive_item,
            active,
            has_no_potential,
            active_children: ctx.active_children,
            ..FilterItem::default()
        })
    }

    fn has_no_potential(&self, id: &CategoryId, target: &Selection) -> ApplicationResult<bool> {
        let Some(probe) = &self.potential else {
            return Ok(false);
        };
        let demand = probe
            .demand
            .with_category_selection(&self.settings.demand_categories_key, target)
            .with_limit(1);
        let exists = probe
            .checker
            .exists(&demand)
            .with_context(|| format!("potential check for category {id}"))?;
        debug!("potential: category={} target={} exists={}", id, target, exists);
        Ok(!exists)
    }
}
