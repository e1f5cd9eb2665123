//! Sliding-window page calculation.

use std::ops::Range;

use tracing::warn;

/// Visible page window around the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub total_items: usize,
    pub items_per_page: usize,
    pub current_page: u32,
    pub number_of_pages: u32,
    pub display_range_start: u32,
    pub display_range_end: u32,
    /// Pages hidden between the first-page shortcut and the window
    pub has_less_pages: bool,
    /// Pages hidden between the window and the last-page shortcut
    pub has_more_pages: bool,
}

impl PageWindow {
    /// `maximum_links = 0` shows every page; `items_per_page = 0` counts as 1.
    pub fn calculate(
        total_items: usize,
        items_per_page: usize,
        requested_page: u32,
        maximum_links: u32,
    ) -> Self {
        let items_per_page = items_per_page.max(1);
        let page_count = total_items.div_ceil(items_per_page);
        let number_of_pages = u32::try_from(page_count)
            .unwrap_or_else(|_| {
                warn!("page count {} exceeds {}, clamping", page_count, u32::MAX);
                u32::MAX
            })
            .max(1);
        let current_page = requested_page.clamp(1, number_of_pages);

        let links = if maximum_links == 0 {
            number_of_pages
        } else {
            maximum_links.min(number_of_pages)
        };

        let delta = i64::from(links / 2);
        let current = i64::from(current_page);
        let pages = i64::from(number_of_pages);
        let mut start = current - delta;
        let mut end = current + delta - if links % 2 == 0 { 1 } else { 0 };
        if start < 1 {
            end -= start - 1;
        }
        if end > pages {
            start -= end - pages;
        }
        let start = start.max(1);
        let end = end.min(pages);

        // both bounds lie within [1, number_of_pages]
        let display_range_start = u32::try_from(start).unwrap_or(1);
        let display_range_end = u32::try_from(end).unwrap_or(number_of_pages);

        Self {
            total_items,
            items_per_page,
            current_page,
            number_of_pages,
            display_range_start,
            display_range_end,
            has_less_pages: display_range_start > 2,
            has_more_pages: display_range_end < number_of_pages.saturating_sub(1),
        }
    }

    pub fn previous(&self) -> Option<u32> {
        (self.current_page > 1).then(|| self.current_page - 1)
    }

    pub fn next(&self) -> Option<u32> {
        (self.current_page < self.number_of_pages).then(|| self.current_page + 1)
    }

    /// First page, when it lies outside the window.
    pub fn first(&self) -> Option<u32> {
        (1 < self.display_range_start).then_some(1)
    }

    /// Last page, when it lies outside the window.
    pub fn last(&self) -> Option<u32> {
        (self.number_of_pages > self.display_range_end).then_some(self.number_of_pages)
    }

    pub fn pages(&self) -> impl Iterator<Item = u32> {
        self.display_range_start..=self.display_range_end
    }

    /// Item index range of the current page.
    pub fn item_range(&self) -> Range<usize> {
        let start = (self.current_page as usize - 1) * self.items_per_page;
        let start = start.min(self.total_items);
        let end = (start + self.items_per_page).min(self.total_items);
        start..end
    }
}
