//! Integration tests for the category filter: toggle targets, tree levels and links.

mod common;

use std::sync::Arc;

use rstest::rstest;

use menu_controls::application::services::CategoryFilterService;
use menu_controls::application::{ApplicationError, LinkFactory};
use menu_controls::config::FilterSettings;
use menu_controls::domain::{
    Arguments, CategoryFilter, CategoryId, DomainError, FilterItem, FlipPolicy, MenuDemand,
    Selection,
};
use menu_controls::infrastructure::traits::CategoryProvider;
use menu_controls::util::testing;

use common::{query_of, selection_of, QueryUrlBuilder, RecordingChecker, RowProvider};

fn service_with(provider: impl CategoryProvider + 'static, settings: FilterSettings) -> CategoryFilterService {
    testing::init_test_setup();
    CategoryFilterService::new(
        settings,
        Arc::new(provider),
        LinkFactory::new(Arc::new(QueryUrlBuilder), 0),
    )
}

fn build_args(settings: FilterSettings, arguments: &Arguments) -> CategoryFilter {
    service_with(RowProvider::topics(), settings)
        .build(arguments, None)
        .expect("build")
        .expect("filter")
}

fn build(settings: FilterSettings, query: &str) -> CategoryFilter {
    build_args(settings, &Arguments::from_query(query))
}

fn selected(query: &str) -> String {
    format!("demand[categories][0][uids]={query}")
}

fn flat(categories: &str, multi_select: bool) -> FilterSettings {
    FilterSettings {
        categories: Selection::parse(categories),
        multi_select,
        ..FilterSettings::default()
    }
}

fn tree(build_tree: u32) -> FilterSettings {
    FilterSettings {
        tree_categories: Selection::parse("1"),
        build_tree,
        build_tree_below_enabled_inactive: true,
        ..FilterSettings::default()
    }
}

fn find<'a>(items: &'a [FilterItem], label: &str) -> &'a FilterItem {
    fn walk<'a>(items: &'a [FilterItem], label: &str) -> Option<&'a FilterItem> {
        items.iter().find_map(|item| {
            if item.label == label {
                Some(item)
            } else {
                walk(&item.children, label)
            }
        })
    }
    walk(items, label).unwrap_or_else(|| panic!("no item labelled {label}"))
}

fn target(filter: &CategoryFilter, label: &str) -> String {
    selection_of(&find(&filter.items, label).url)
}

// ============================================================
// Toggle targets
// ============================================================

#[test]
fn given_single_select_when_toggling_twice_then_round_trips() {
    let settings = flat("1,2,3", false);

    let first = build(settings.clone(), "");
    let url = find(&first.items, "Topics").url.clone();
    assert_eq!(selection_of(&url), "1");

    let second = build_args(settings, &query_of(&url));
    assert!(find(&second.items, "Topics").active);
    assert_eq!(target(&second, "Topics"), "");
}

#[test]
fn given_multi_select_when_toggling_inactive_then_adds_to_selection() {
    let filter = build(flat("1,2,3", true), &selected("1,2"));
    assert_eq!(target(&filter, "Culture"), "1,2,3");
}

#[test]
fn given_two_active_when_toggling_one_then_deselects_only_it() {
    let filter = build(flat("1,2,3", true), &selected("1,2"));
    assert_eq!(target(&filter, "Topics"), "2");
}

#[test]
fn given_sole_root_selection_without_multi_select_when_toggling_then_clears() {
    let filter = build(flat("1,2,3", false), &selected("1"));
    assert_eq!(target(&filter, "Topics"), "");
}

#[test]
fn given_single_select_when_toggling_other_then_replaces() {
    let filter = build(flat("1,2,3", false), &selected("1"));
    assert_eq!(target(&filter, "Sport"), "2");
}

#[rstest]
#[case(0, "1")]
#[case(1, "")]
fn given_sole_child_selection_when_toggling_then_collapses_to_enabled_parent(
    #[case] disabled_tree: i32,
    #[case] expected: &str,
) {
    let settings = FilterSettings {
        multi_select: false,
        disabled_tree,
        ..tree(1)
    };
    let filter = build(settings, &selected("2"));
    assert_eq!(target(&filter, "Sport"), expected);
}

#[rstest]
#[case(2, "2,4,3")]
#[case(1, "3")]
fn given_level_multi_select_when_toggling_child_then_adds_or_replaces_siblings(
    #[case] multi_select_tree: i32,
    #[case] expected: &str,
) {
    let settings = FilterSettings {
        multi_select_tree,
        ..tree(1)
    };
    let filter = build(settings, &selected("2,4"));
    assert_eq!(target(&filter, "Culture"), expected);
}

#[test]
fn given_single_select_level_when_toggling_then_keeps_other_branches() {
    let settings = FilterSettings {
        multi_select_tree: 0,
        disabled_tree: 0,
        ..tree(2)
    };
    // Football replaces its sibling Tennis; Culture sits on another branch
    let filter = build(settings, &selected("3,6"));
    assert_eq!(target(&filter, "Football"), "3,5");
}

// ============================================================
// Tree level policy
// ============================================================

#[rstest]
#[case(FlipPolicy::Cross, 1, [true, false, true])]
#[case(FlipPolicy::Collapse, 1, [true, false, false])]
#[case(FlipPolicy::Cross, -1, [false, true, false])]
#[case(FlipPolicy::Collapse, -1, [false, false, false])]
fn given_flip_policy_when_building_disabled_levels_then_pins_each_level(
    #[case] flip_policy: FlipPolicy,
    #[case] disabled_tree: i32,
    #[case] expected: [bool; 3],
) {
    let settings = FilterSettings {
        flip_policy,
        disabled_tree,
        ..tree(2)
    };
    let filter = build(settings, "");
    let disabled = ["Topics", "Sport", "Football"].map(|label| find(&filter.items, label).disabled);
    assert_eq!(disabled, expected);
}

#[rstest]
#[case(FlipPolicy::Cross, "5,6")]
#[case(FlipPolicy::Collapse, "6")]
fn given_flip_policy_when_building_multi_select_levels_then_pins_grandchildren(
    #[case] flip_policy: FlipPolicy,
    #[case] expected: &str,
) {
    let settings = FilterSettings {
        flip_policy,
        disabled_tree: 0,
        multi_select_tree: 1,
        ..tree(2)
    };
    let filter = build(settings, &selected("5"));
    assert_eq!(target(&filter, "Tennis"), expected);
}

#[rstest]
#[case("", 1)]
#[case("1", 4)]
#[case("1,2", 6)]
fn given_enabled_inactive_nodes_when_flag_off_then_only_active_nodes_expand(
    #[case] selection: &str,
    #[case] nodes: usize,
) {
    let settings = FilterSettings {
        disabled_tree: 0,
        build_tree_below_enabled_inactive: false,
        ..tree(2)
    };
    let filter = build(settings, &selected(selection));
    assert_eq!(filter.items[0].node_count(), nodes);
}

#[test]
fn given_disabled_levels_when_building_then_items_have_no_links_and_are_no_fallback() {
    let settings = FilterSettings {
        multi_select: false,
        disabled_tree: 2,
        ..tree(2)
    };
    let filter = build(settings, &selected("5"));

    for label in ["Topics", "Sport"] {
        let item = find(&filter.items, label);
        assert!(item.disabled, "{label} should be disabled");
        assert!(item.url.is_empty() && item.fragment_url.is_empty());
        assert!(item.exclusive_item.is_none());
    }
    assert!(!find(&filter.items, "Football").disabled);
    assert_eq!(target(&filter, "Football"), "");
    assert_eq!(target(&filter, "Tennis"), "6");
}

#[test]
fn given_large_build_tree_when_building_chain_then_stops_at_ceiling() {
    let rows: Vec<(String, String, Option<String>)> = (0..40)
        .map(|i| (i.to_string(), format!("Level {i}"), (i > 0).then(|| (i - 1).to_string())))
        .collect();
    let rows: Vec<(&str, &str, Option<&str>)> = rows
        .iter()
        .map(|(id, title, parent)| (id.as_str(), title.as_str(), parent.as_deref()))
        .collect();
    let settings = FilterSettings {
        tree_categories: Selection::parse("0"),
        build_tree: 100,
        build_tree_below_enabled_inactive: true,
        ..FilterSettings::default()
    };

    let filter = service_with(RowProvider::new(&rows), settings)
        .build(&Arguments::new(), None)
        .unwrap()
        .unwrap();

    assert_eq!(filter.items[0].node_count(), 33);
    assert_eq!(filter.build_tree, 32, "reports the depth actually built");
}

#[test]
fn given_cyclic_parent_graph_when_building_then_fails_fast() {
    let provider = RowProvider::new(&[("1", "A", Some("2")), ("2", "B", Some("1"))]);
    let settings = FilterSettings {
        tree_categories: Selection::parse("1"),
        build_tree: 10,
        build_tree_below_enabled_inactive: true,
        ..FilterSettings::default()
    };

    let err = service_with(provider, settings)
        .build(&Arguments::new(), None)
        .unwrap_err();

    match err {
        ApplicationError::Domain(DomainError::CycleDetected(id)) => assert_eq!(id.as_str(), "1"),
        other => panic!("expected cycle error, got {other:?}"),
    }
}

// ============================================================
// Close, exclusive and reset items
// ============================================================

#[test]
fn given_active_children_when_building_then_close_item_removes_only_them() {
    let filter = build(tree(2), &selected("3,5,6"));

    let sport = find(&filter.items, "Sport");
    assert_eq!(sport.active_children, [CategoryId::from("5"), CategoryId::from("6")]);
    let close = sport.close_item.as_ref().expect("close item");
    assert_eq!(close.label, "2");
    assert_eq!(selection_of(&close.url), "3");

    let topics = find(&filter.items, "Topics");
    assert_eq!(topics.active_children, [CategoryId::from("3")]);
}

#[test]
fn given_enabled_item_when_building_then_exclusive_item_selects_only_it() {
    let settings = FilterSettings {
        disabled_tree: 0,
        ..tree(2)
    };
    let filter = build(settings, &selected("3,5"));
    let tennis = find(&filter.items, "Tennis");
    let exclusive = tennis.exclusive_item.as_ref().expect("exclusive item");
    assert_eq!(exclusive.label, "Tennis");
    assert_eq!(selection_of(&exclusive.url), "6");
}

#[test]
fn given_request_arguments_when_building_then_strips_unset_arguments() {
    let query = format!("page=3&recordUid=5&q=x&{}", selected("2"));
    let filter = build(flat("1,2,3", true), &query);

    let arguments = query_of(&find(&filter.items, "Culture").url);
    assert!(arguments.get("page").is_none());
    assert!(arguments.get("recordUid").is_none());
    assert_eq!(arguments.get_text("q"), Some("x"));

    let reset = filter.reset_item.expect("reset item");
    assert_eq!(reset.url, "https://example.org/?q=x");
}

#[test]
fn given_empty_selection_when_building_then_has_no_reset_item() {
    let filter = build(flat("1,2,3", true), "q=x");
    assert!(filter.reset_item.is_none());
}

#[test]
fn given_malformed_tokens_when_building_then_they_are_carried_inert() {
    let filter = build(flat("1,2,3", true), &selected("abc,2"));
    assert!(!find(&filter.items, "Topics").active);
    assert_eq!(target(&filter, "Sport"), "abc");
    assert_eq!(target(&filter, "Topics"), "abc,2,1");
}

// ============================================================
// Potential check
// ============================================================

#[test]
fn given_potential_check_when_probing_siblings_then_each_probe_is_isolated() {
    let checker = Arc::new(RecordingChecker::new(&["3"]));
    let settings = FilterSettings {
        check_potential: true,
        ..flat("2,3,4", true)
    };
    let service = service_with(RowProvider::topics(), settings)
        .with_potential_checker(Some(checker.clone()));
    let demand = MenuDemand::default().with_category_selection("1", &Selection::parse("9"));

    let filter = service
        .build(&Arguments::new(), Some(&demand))
        .unwrap()
        .unwrap();

    let probes: Vec<String> = checker
        .seen()
        .iter()
        .map(|probe| probe.categories["0"].uids.to_wire())
        .collect();
    assert_eq!(probes, ["2", "3", "4"]);
    for probe in checker.seen() {
        assert_eq!(probe.limit, Some(1));
        assert_eq!(probe.categories["1"].uids.to_wire(), "9");
    }
    assert_eq!(demand.limit, None);
    assert_eq!(demand.categories.len(), 1);

    let flags = ["Sport", "Culture", "Science"].map(|label| find(&filter.items, label).has_no_potential);
    assert_eq!(flags, [false, true, false]);
}

#[test]
fn given_potential_check_without_checker_when_building_then_skips_it() {
    let settings = FilterSettings {
        check_potential: true,
        ..flat("2,3", true)
    };
    let filter = service_with(RowProvider::topics(), settings)
        .build(&Arguments::new(), Some(&MenuDemand::default()))
        .unwrap()
        .unwrap();
    assert!(filter.items.iter().all(|item| !item.has_no_potential));
}
