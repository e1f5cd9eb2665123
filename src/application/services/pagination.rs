//! Pagination service: turns a page window into link items for the configured variant.

use serde::Serialize;
use tracing::{debug, instrument};

use crate::application::links::{LinkFactory, LinkPair};
use crate::config::{PaginationSettings, Variant};
use crate::domain::{Arguments, LoadMoreTrigger, PageWindow, Pagination, PaginationItem};

/// `rel="prev"` / `rel="next"` targets of the current page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HeadLinks {
    pub prev: Option<String>,
    pub next: Option<String>,
}

pub struct PaginationService {
    settings: PaginationSettings,
    links: LinkFactory,
}

impl PaginationService {
    pub fn new(settings: PaginationSettings, links: LinkFactory) -> Self {
        Self { settings, links }
    }

    pub fn settings(&self) -> &PaginationSettings {
        &self.settings
    }

    /// Requested page; anything but a positive integer reads as page 1.
    pub fn requested_page(&self, arguments: &Arguments) -> u32 {
        arguments
            .get_text(&self.settings.page_argument_key)
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .filter(|page| *page > 0)
            .unwrap_or(1)
    }

    pub fn window(&self, total_items: usize, arguments: &Arguments) -> PageWindow {
        PageWindow::calculate(
            total_items,
            self.settings.items_per_page,
            self.requested_page(arguments),
            self.settings.maximum_links,
        )
    }

    #[instrument(level = "debug", skip(self, arguments))]
    pub fn build(&self, total_items: usize, arguments: &Arguments) -> Pagination {
        let window = self.window(total_items, arguments);
        let base = self.base_arguments(arguments);
        let settings = &self.settings;

        let mut pagination = Pagination {
            current_page: window.current_page,
            separator_string: settings.separator.clone(),
            ..Pagination::default()
        };

        match settings.variant {
            Variant::Standard => {
                let current = window.current_page;
                pagination.prev = window
                    .previous()
                    .map(|page| self.item(&base, page, &settings.prev_label, current));
                pagination.next = window
                    .next()
                    .map(|page| self.item(&base, page, &settings.next_label, current));
                pagination.window = window
                    .pages()
                    .map(|page| self.item(&base, page, &page.to_string(), current))
                    .collect();
                pagination.first = window
                    .first()
                    .map(|page| self.item(&base, page, &page.to_string(), current));
                pagination.last = window
                    .last()
                    .map(|page| self.item(&base, page, &page.to_string(), current));
                pagination.separator_left = window.has_less_pages;
                pagination.separator_right = window.has_more_pages;
            }
            Variant::LoadMore | Variant::InfiniteScroll => {
                let load_more = match window.next() {
                    Some(page) => self.item(&base, page, &settings.load_more_label, window.current_page),
                    None => {
                        let mut arguments = base.clone();
                        arguments.remove(&settings.page_argument_key);
                        let links = self.links.links(&arguments);
                        PaginationItem {
                            label: settings.load_more_label.clone(),
                            url: links.url,
                            fragment_url: links.fragment_url,
                            active: false,
                            disabled: true,
                        }
                    }
                };
                pagination.load_more = Some(load_more);
                pagination.load_more_trigger = if settings.variant == Variant::InfiniteScroll {
                    LoadMoreTrigger::Intersect
                } else {
                    LoadMoreTrigger::Click
                };
            }
        }

        debug!(
            "pagination: variant={:?} page={}/{} window={}..={}",
            settings.variant,
            window.current_page,
            window.number_of_pages,
            window.display_range_start,
            window.display_range_end
        );
        pagination
    }

    /// Full-page URLs of the neighbouring pages.
    pub fn head_links(&self, total_items: usize, arguments: &Arguments) -> HeadLinks {
        let window = self.window(total_items, arguments);
        let base = self.base_arguments(arguments);
        HeadLinks {
            prev: window.previous().map(|page| self.page_links(&base, page).url),
            next: window.next().map(|page| self.page_links(&base, page).url),
        }
    }

    /// Items shown on the requested page.
    pub fn page_slice<'t, T>(&self, items: &'t [T], arguments: &Arguments) -> &'t [T] {
        &items[self.window(items.len(), arguments).item_range()]
    }

    fn base_arguments(&self, arguments: &Arguments) -> Arguments {
        let mut base = arguments.clone();
        for key in &self.settings.unset_arguments {
            base.remove(key);
        }
        base
    }

    fn page_links(&self, base: &Arguments, page: u32) -> LinkPair {
        let mut arguments = base.clone();
        if page == 1 {
            arguments.remove(&self.settings.page_argument_key);
        } else {
            arguments.insert(self.settings.page_argument_key.clone(), page.to_string());
        }
        self.links.links(&arguments)
    }

    fn item(&self, base: &Arguments, page: u32, label: &str, current_page: u32) -> PaginationItem {
        let links = self.page_links(base, page);
        PaginationItem {
            label: label.to_string(),
            url: links.url,
            fragment_url: links.fragment_url,
            active: page == current_page,
            disabled: false,
        }
    }
}
