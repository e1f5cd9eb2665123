//! Integration tests for the pagination service and its variants.

mod common;

use std::sync::Arc;

use rstest::rstest;

use menu_controls::application::services::PaginationService;
use menu_controls::application::LinkFactory;
use menu_controls::config::{PaginationSettings, Variant};
use menu_controls::domain::{Arguments, LoadMoreTrigger, Pagination, PaginationItem};
use menu_controls::util::testing;

use common::{query_of, QueryUrlBuilder};

fn service(settings: PaginationSettings) -> PaginationService {
    testing::init_test_setup();
    PaginationService::new(settings, LinkFactory::new(Arc::new(QueryUrlBuilder), 1719))
}

fn build(settings: PaginationSettings, total: usize, query: &str) -> Pagination {
    service(settings).build(total, &Arguments::from_query(query))
}

fn page_of(item: &PaginationItem) -> Option<String> {
    query_of(&item.url).get_text("page").map(str::to_string)
}

fn all_items(pagination: &Pagination) -> Vec<&PaginationItem> {
    pagination
        .prev
        .iter()
        .chain(pagination.first.iter())
        .chain(pagination.window.iter())
        .chain(pagination.last.iter())
        .chain(pagination.next.iter())
        .chain(pagination.load_more.iter())
        .collect()
}

#[test]
fn given_25_items_on_page_2_when_building_then_window_covers_all_pages() {
    let pagination = build(PaginationSettings::default(), 25, "page=2");

    assert_eq!(pagination.current_page, 2);
    let window: Vec<&str> = pagination.window.iter().map(|item| item.label.as_str()).collect();
    assert_eq!(window, ["1", "2", "3"]);
    assert_eq!(pagination.prev.as_ref().map(|item| item.label.as_str()), Some("<"));
    assert_eq!(pagination.prev.as_ref().and_then(page_of), None);
    assert_eq!(pagination.next.as_ref().and_then(page_of).as_deref(), Some("3"));
    assert!(!pagination.separator_left && !pagination.separator_right);
    assert!(pagination.first.is_none() && pagination.last.is_none());
}

#[rstest]
#[case(Variant::LoadMore, LoadMoreTrigger::Click)]
#[case(Variant::InfiniteScroll, LoadMoreTrigger::Intersect)]
fn given_last_page_when_building_load_more_then_item_is_disabled(
    #[case] variant: Variant,
    #[case] trigger: LoadMoreTrigger,
) {
    let settings = PaginationSettings {
        variant,
        ..PaginationSettings::default()
    };

    let pagination = build(settings, 25, "page=3&q=x&recordUid=7");

    let load_more = pagination.load_more.expect("load more");
    assert!(load_more.disabled);
    assert_eq!(load_more.url, "https://example.org/?q=x");
    assert_eq!(load_more.fragment_url, "/?q=x&type=1719");
    assert_eq!(pagination.load_more_trigger, trigger);
    assert!(pagination.window.is_empty());
    assert!(pagination.first.is_none() && pagination.last.is_none());
}

#[rstest]
#[case("page=2")]
#[case("page=5")]
#[case("page=10")]
fn given_any_page_when_building_then_page_one_links_omit_page_argument(#[case] query: &str) {
    let pagination = build(PaginationSettings::default(), 120, query);

    for item in all_items(&pagination) {
        let page = page_of(item);
        assert_ne!(page.as_deref(), Some("1"), "link {} carries page=1", item.url);
        if item.label == "1" {
            assert_eq!(page, None);
        }
    }
}

#[test]
fn given_fragment_page_type_when_building_then_fragment_links_carry_it() {
    let pagination = build(PaginationSettings::default(), 25, "page=2");
    let next = pagination.next.expect("next");
    assert_eq!(next.url, "https://example.org/?page=3");
    assert_eq!(next.fragment_url, "/?page=3&type=1719");
}

#[rstest]
#[case(1, 3, vec!["1", "2", "3"], false, true)]
#[case(5, 3, vec!["4", "5", "6"], true, true)]
#[case(10, 3, vec!["8", "9", "10"], true, false)]
#[case(3, 4, vec!["1", "2", "3", "4"], false, true)]
#[case(5, 0, vec!["1", "2", "3", "4", "5", "6", "7", "8", "9", "10"], false, false)]
fn given_ten_pages_when_building_then_window_slides(
    #[case] page: u32,
    #[case] maximum_links: u32,
    #[case] window: Vec<&str>,
    #[case] separator_left: bool,
    #[case] separator_right: bool,
) {
    let settings = PaginationSettings {
        maximum_links,
        ..PaginationSettings::default()
    };

    let pagination = build(settings, 120, &format!("page={page}"));

    let labels: Vec<&str> = pagination.window.iter().map(|item| item.label.as_str()).collect();
    assert_eq!(labels, window);
    assert_eq!(pagination.separator_left, separator_left);
    assert_eq!(pagination.separator_right, separator_right);
}

#[test]
fn given_page_beyond_last_when_building_then_clamps_and_marks_last_active() {
    let pagination = build(PaginationSettings::default(), 25, "page=99");

    assert_eq!(pagination.current_page, 3);
    let active: Vec<&str> = pagination
        .window
        .iter()
        .filter(|item| item.active)
        .map(|item| item.label.as_str())
        .collect();
    assert_eq!(active, ["3"]);
    assert!(pagination.next.is_none());
}

#[test]
fn given_no_items_when_building_then_single_page_without_links() {
    let pagination = build(PaginationSettings::default(), 0, "");

    assert_eq!(pagination.current_page, 1);
    assert_eq!(pagination.window.len(), 1);
    assert!(pagination.prev.is_none() && pagination.next.is_none());
}

#[test]
fn given_custom_labels_when_building_then_uses_them() {
    let settings = PaginationSettings {
        prev_label: "Previous".into(),
        next_label: "Next".into(),
        separator: "…".into(),
        ..PaginationSettings::default()
    };

    let pagination = build(settings, 120, "page=5");

    assert_eq!(pagination.prev.expect("prev").label, "Previous");
    assert_eq!(pagination.next.expect("next").label, "Next");
    assert_eq!(pagination.separator_string, "…");
}

#[test]
fn given_custom_page_argument_when_reading_then_uses_it() {
    let settings = PaginationSettings {
        page_argument_key: "p".into(),
        ..PaginationSettings::default()
    };

    let pagination = build(settings, 120, "p=4&page=9");

    assert_eq!(pagination.current_page, 4);
    let next = pagination.next.expect("next");
    assert_eq!(query_of(&next.url).get_text("p"), Some("5"));
}

#[test]
fn given_last_page_when_building_head_links_then_only_prev() {
    let links = service(PaginationSettings::default()).head_links(25, &Arguments::from_query("page=3"));
    assert_eq!(links.prev.as_deref(), Some("https://example.org/?page=2"));
    assert_eq!(links.next, None);
}
