//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;
use termtree::Tree;

use crate::application::services::HeadLinks;
use crate::domain::{CategoryFilter, FilterItem, Pagination, PaginationItem};

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Print completed action (green label)
pub fn action(label: &str, msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}: {}", label.green(), msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print indented detail (no color)
pub fn detail(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("  {}", msg);
}

/// Print plain output (no color, for data)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

/// One line per filter node: `label [markers] -> url`.
fn item_line(item: &FilterItem) -> String {
    let mut markers = Vec::new();
    if item.active {
        markers.push("active");
    }
    if item.disabled {
        markers.push("disabled");
    }
    if item.has_no_potential {
        markers.push("empty");
    }
    let mut line = if item.active {
        item.label.green().bold().to_string()
    } else if item.disabled {
        item.label.dimmed().to_string()
    } else {
        item.label.clone()
    };
    if !markers.is_empty() {
        line.push_str(&format!(" [{}]", markers.join(", ")));
    }
    if !item.url.is_empty() {
        line.push_str(&format!(" -> {}", item.url));
    }
    if let Some(close) = &item.close_item {
        line.push_str(&format!(" (close {}: {})", close.label, close.url));
    }
    line
}

fn item_tree(item: &FilterItem) -> Tree<String> {
    let leaves: Vec<_> = item.children.iter().map(item_tree).collect();
    Tree::new(item_line(item)).with_leaves(leaves)
}

/// Render the filter as one tree per top-level item.
pub fn render_filter(filter: &CategoryFilter) -> String {
    let mut out = String::new();
    for item in &filter.items {
        out.push_str(&item_tree(item).to_string());
    }
    if let Some(reset) = &filter.reset_item {
        out.push_str(&format!("{} -> {}\n", reset.label, reset.url));
    }
    out
}

fn page_line(item: &PaginationItem) -> String {
    let label = if item.active {
        format!("[{}]", item.label).green().bold().to_string()
    } else if item.disabled {
        item.label.dimmed().to_string()
    } else {
        item.label.clone()
    };
    if item.url.is_empty() || item.disabled {
        label
    } else {
        format!("{label} -> {}", item.url)
    }
}

/// Render the pagination as one line per link, in display order.
pub fn render_pagination(pagination: &Pagination, head: &HeadLinks) -> String {
    let mut lines = Vec::new();
    let separator = pagination.separator_string.as_str();

    if let Some(load_more) = &pagination.load_more {
        lines.push(page_line(load_more));
    } else {
        lines.extend(pagination.prev.iter().map(page_line));
        lines.extend(pagination.first.iter().map(page_line));
        if pagination.separator_left {
            lines.push(separator.to_string());
        }
        lines.extend(pagination.window.iter().map(page_line));
        if pagination.separator_right {
            lines.push(separator.to_string());
        }
        lines.extend(pagination.last.iter().map(page_line));
        lines.extend(pagination.next.iter().map(page_line));
    }

    if let Some(prev) = &head.prev {
        lines.push(format!("rel=prev {prev}"));
    }
    if let Some(next) = &head.next {
        lines.push(format!("rel=next {next}"));
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}
