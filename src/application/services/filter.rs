//! Category filter service
//!
//! Walks the configured categories and their sub-trees and assembles the
//! [`CategoryFilter`] for one request. Trees are built with an explicit
//! work-stack: the frames on the stack are exactly the ancestors of the node
//! being opened, so a category reappearing among them is a cycle in the
//! provider's parent graph and aborts the build.

use std::sync::Arc;
use std::vec;

use tracing::{debug, instrument};

use crate::application::error_ext::IoResultExt;
use crate::application::links::LinkFactory;
use crate::application::services::filter_item::{FilterItemBuilder, ItemContext};
use crate::application::ApplicationResult;
use crate::config::FilterSettings;
use crate::domain::{
    selection_path, Arguments, Category, CategoryFilter, CategoryId, DomainError, FilterItem,
    MenuDemand, Selection, TreeLevelPolicy,
};
use crate::infrastructure::traits::{CategoryProvider, PotentialChecker};

/// Node waiting to be opened, with the context its parent computed.
struct PendingNode {
    category: Category,
    policy: TreeLevelPolicy,
    active_siblings: Vec<CategoryId>,
    enabled_parent: Option<CategoryId>,
}

/// Node whose children are still being built.
struct OpenFrame {
    id: CategoryId,
    item: FilterItem,
    children: vec::IntoIter<PendingNode>,
}

enum Opened {
    Leaf(FilterItem),
    Branch(OpenFrame),
}

pub struct CategoryFilterService {
    settings: FilterSettings,
    provider: Arc<dyn CategoryProvider>,
    links: LinkFactory,
    checker: Option<Arc<dyn PotentialChecker>>,
}

impl CategoryFilterService {
    pub fn new(
        settings: FilterSettings,
        provider: Arc<dyn CategoryProvider>,
        links: LinkFactory,
    ) -> Self {
        Self {
            settings,
            provider,
            links,
            checker: None,
        }
    }

    pub fn with_potential_checker(mut self, checker: Option<Arc<dyn PotentialChecker>>) -> Self {
        self.checker = checker;
        self
    }

    pub fn settings(&self) -> &FilterSettings {
        &self.settings
    }

    /// Selection carried in `demand[categories][<key>][uids]`.
    pub fn active_categories(&self, arguments: &Arguments) -> Selection {
        arguments
            .get_path_text(&selection_path(&self.settings.demand_categories_key))
            .map(Selection::parse)
            .unwrap_or_default()
    }

    /// Labels of the selected categories, in provider order.
    pub fn active_category_titles(&self, arguments: &Arguments) -> ApplicationResult<Vec<String>> {
        let selection = self.active_categories(arguments);
        if selection.is_empty() {
            return Ok(Vec::new());
        }
        let categories = self
            .provider
            .find_by_ids(&selection, &self.settings.category_order)
            .with_context(|| format!("fetch selected categories {selection}"))?;
        Ok(categories
            .iter()
            .map(|category| {
                category.label(
                    &self.settings.category_label_field,
                    &self.settings.category_label_field_fallback,
                )
            })
            .collect())
    }

    /// Build the filter for a request. `None` when the filter is inactive or
    /// no categories are configured.
    #[instrument(level = "debug", skip_all)]
    pub fn build(
        &self,
        arguments: &Arguments,
        demand: Option<&MenuDemand>,
    ) -> ApplicationResult<Option<CategoryFilter>> {
        let settings = &self.settings;
        if !settings.active {
            debug!("filter inactive");
            return Ok(None);
        }
        if settings.categories.is_empty() && settings.tree_categories.is_empty() {
            debug!("no categories configured");
            return Ok(None);
        }

        let selection = self.active_categories(arguments);
        let mut base = arguments.clone();
        for key in &settings.unset_arguments {
            base.remove(key);
        }
        let items = FilterItemBuilder::new(settings, &selection, &base, &self.links)
            .with_potential(self.checker.as_deref(), demand);

        let reset_item = if selection.is_empty() {
            None
        } else {
            let links = items.selection_links(&Selection::new());
            Some(FilterItem::link(
                settings.reset_label.clone(),
                links.url,
                links.fragment_url,
            ))
        };

        let policy = settings.level_policy();
        let mut filter = CategoryFilter {
            items: Vec::new(),
            reset_item,
            build_tree: policy.build_tree,
        };

        if !settings.categories.is_empty() {
            let categories = self
                .provider
                .find_by_ids(&settings.categories, &settings.category_order)
                .with_context(|| format!("fetch categories {}", settings.categories))?;
            for category in &categories {
                filter.items.push(items.build(category, ItemContext::flat())?);
            }
        }

        if !settings.tree_categories.is_empty() {
            let roots = self
                .provider
                .find_by_ids(&settings.tree_categories, &settings.category_order)
                .with_context(|| format!("fetch tree categories {}", settings.tree_categories))?;
            for root in roots {
                let tree = self.build_tree(&items, &selection, policy, root)?;
                filter.items.push(tree);
            }
        }

        debug!(
            "filter built: selection={} items={} nodes={}",
            selection,
            filter.items.len(),
            filter.items.iter().map(FilterItem::node_count).sum::<usize>()
        );
        Ok(Some(filter))
    }

    fn build_tree(
        &self,
        items: &FilterItemBuilder<'_>,
        selection: &Selection,
        policy: TreeLevelPolicy,
        root: Category,
    ) -> ApplicationResult<FilterItem> {
        let root = PendingNode {
            category: root,
            policy,
            active_siblings: Vec::new(),
            enabled_parent: None,
        };
        let mut stack = match self.open(items, selection, root, &[])? {
            Opened::Leaf(item) => return Ok(item),
            Opened::Branch(frame) => vec![frame],
        };

        while let Some(frame) = stack.last_mut() {
            let Some(pending) = frame.children.next() else {
                let Some(done) = stack.pop() else { break };
                match stack.last_mut() {
                    Some(parent) => parent.item.children.push(done.item),
                    None => return Ok(done.item),
                }
                continue;
            };
            match self.open(items, selection, pending, &stack)? {
                Opened::Leaf(item) => {
                    if let Some(parent) = stack.last_mut() {
                        parent.item.children.push(item);
                    }
                }
                Opened::Branch(opened) => stack.push(opened),
            }
        }

        Err(DomainError::InternalError("tree build finished without a root".into()).into())
    }

    /// Build the item for `node` and, unless it is a leaf, queue its children.
    fn open(
        &self,
        items: &FilterItemBuilder<'_>,
        selection: &Selection,
        node: PendingNode,
        ancestors: &[OpenFrame],
    ) -> ApplicationResult<Opened> {
        let PendingNode {
            category,
            policy,
            active_siblings,
            enabled_parent,
        } = node;

        if ancestors.iter().any(|frame| frame.id == category.id) {
            return Err(DomainError::CycleDetected(category.id).into());
        }

        let disabled = policy.is_disabled();
        let multi_select = policy.is_multi_select();
        let active = selection.is_active(&category.id);

        let is_leaf = !policy.can_descend()
            || (!self.settings.build_tree_below_enabled_inactive && !disabled && !active);
        if is_leaf {
            let ctx = ItemContext {
                disabled,
                multi_select,
                active_children: Vec::new(),
                active_siblings: &active_siblings,
                enabled_parent: enabled_parent.as_ref(),
            };
            return Ok(Opened::Leaf(items.build(&category, ctx)?));
        }

        let children = self
            .provider
            .find_children(&category.id, &self.settings.category_order)
            .with_context(|| format!("fetch children of category {}", category.id))?;
        let active_children = selection.active_among(children.iter().map(|child| &child.id));

        let ctx = ItemContext {
            disabled,
            multi_select,
            active_children: active_children.clone(),
            active_siblings: &active_siblings,
            enabled_parent: enabled_parent.as_ref(),
        };
        let item = items.build(&category, ctx)?;

        let child_policy = policy.descend();
        let child_parent = (!disabled).then(|| category.id.clone());
        debug!(
            "open: category={} children={} active_children={} build_tree={}",
            category.id,
            children.len(),
            active_children.len(),
            policy.build_tree
        );
        let pending: Vec<PendingNode> = children
            .into_iter()
            .map(|child| PendingNode {
                category: child,
                policy: child_policy,
                active_siblings: active_children.clone(),
                enabled_parent: child_parent.clone(),
            })
            .collect();

        Ok(Opened::Branch(OpenFrame {
            id: category.id,
            item,
            children: pending.into_iter(),
        }))
    }
}
