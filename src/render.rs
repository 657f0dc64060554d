//! Plain-text rendering of the page view.
//!
//! Styling is out of scope; this only lays out the visible panels in the
//! order the page shows them.

use crate::state::{ItemView, PageView, TrendingSection};
use serde_json::Value;
use std::fmt::Write;

const EMPTY_HINT: &str = "Try different keywords or browse our popular categories above.";

/// Render the whole page.
pub fn render_page(page: &PageView<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Welcome back, {}!", page.display_name);

    if page.loading {
        let _ = writeln!(out, "\nSearching for APIs...");
    }

    if let Some(error) = page.error {
        let _ = writeln!(out, "\nSearch Failed: {error}");
    }

    if let Some(message) = page.empty_message {
        let _ = writeln!(out, "\nNo APIs Found");
        let _ = writeln!(out, "  {message}");
        let _ = writeln!(out, "  {EMPTY_HINT}");
    }

    if let Some(heading) = page.results_heading() {
        let _ = writeln!(out, "\n{heading}");
        for item in &page.results {
            render_item(&mut out, item);
        }
    }

    if let Some(trending) = &page.trending {
        let _ = writeln!(out, "\nTrending APIs");
        match trending {
            TrendingSection::Loading => {
                let _ = writeln!(out, "  Loading trending APIs...");
            }
            TrendingSection::Unavailable => {
                let _ = writeln!(out, "  No trending APIs available at the moment");
            }
            TrendingSection::Items(items) => {
                for item in items {
                    render_item(&mut out, item);
                }
            }
        }
    }

    out
}

fn render_item(out: &mut String, item: &ItemView<'_>) {
    let marker = if item.expanded { '-' } else { '+' };
    let title = highlight(item.api.title(), item.highlight);
    let _ = writeln!(
        out,
        "  {marker} {}. {title} [{}]",
        item.position + 1,
        item.api.id()
    );

    if !item.expanded {
        return;
    }

    if let Some(description) = item.api.description() {
        let _ = writeln!(out, "      {}", highlight(description, item.highlight));
    }
    for (key, value) in item.api.fields() {
        if key == "name" || key == "description" {
            continue;
        }
        let _ = writeln!(out, "      {key}: {}", field_text(value));
    }
}

fn field_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Wrap case-insensitive (ASCII) occurrences of `query` in `text` with `*`.
///
/// Blank queries highlight nothing.
pub fn highlight(text: &str, query: &str) -> String {
    let needle = query.trim().to_ascii_lowercase();
    if needle.is_empty() {
        return text.to_string();
    }

    // ASCII lowercasing keeps byte offsets aligned with `text`.
    let haystack = text.to_ascii_lowercase();
    let mut out = String::with_capacity(text.len() + 8);
    let mut last = 0;
    for (start, matched) in haystack.match_indices(&needle) {
        let end = start + matched.len();
        out.push_str(&text[last..start]);
        out.push('*');
        out.push_str(&text[start..end]);
        out.push('*');
        last = end;
    }
    out.push_str(&text[last..]);
    out
}
