//! Shared rendering utilities and helpers.
//!
//! Low-level text handling used across components: cursor positioning, column
//! sizing, truncation and search match highlighting. All ranges are in
//! character indices, not byte indices.

use crate::ui::theme::Theme;

/// Positions the cursor at a 1-indexed row and column.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Widths of the four table columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnWidths {
    pub name: usize,
    pub email: usize,
    pub company: usize,
    pub city: usize,
}

/// Splits `cols` between Name, Email, Company and City.
///
/// Each column keeps one trailing space of separation.
#[must_use]
pub fn column_widths(cols: usize) -> ColumnWidths {
    let usable = cols.saturating_sub(4);
    let name = usable * 26 / 100;
    let email = usable * 30 / 100;
    let company = usable * 26 / 100;
    ColumnWidths {
        name,
        email,
        company,
        city: usable.saturating_sub(name + email + company),
    }
}

/// Cuts `text` to at most `width` characters, marking the cut with `...`.
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len <= width {
        return text.to_string();
    }
    if width <= 3 {
        return text.chars().take(width).collect();
    }
    let mut out: String = text.chars().take(width - 3).collect();
    out.push_str("...");
    out
}

/// Finds every non-overlapping, case-insensitive occurrence of `query` in
/// `text`, returned as `(start, end)` character ranges with exclusive end.
///
/// # Example
///
/// ```
/// use userdeck::ui::helpers::match_ranges;
///
/// assert_eq!(match_ranges("Anna Banana", "an"), vec![(0, 2), (6, 8), (8, 10)]);
/// ```
#[must_use]
pub fn match_ranges(text: &str, query: &str) -> Vec<(usize, usize)> {
    let needle: Vec<char> = query.chars().collect();
    if needle.is_empty() {
        return vec![];
    }

    let haystack: Vec<char> = text.chars().collect();
    let mut ranges = Vec::new();
    let mut i = 0;

    while i + needle.len() <= haystack.len() {
        let hit = haystack[i..i + needle.len()]
            .iter()
            .zip(&needle)
            .all(|(h, n)| h.to_lowercase().eq(n.to_lowercase()));

        if hit {
            ranges.push((i, i + needle.len()));
            i += needle.len();
        } else {
            i += 1;
        }
    }

    ranges
}

/// Prints `text` with the given character ranges highlighted.
///
/// When `is_selected` is `true` highlighting is skipped so the selection
/// colors stay uniform across the row.
pub fn render_highlighted_text(
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }

        if start > current_pos {
            let normal_section: String = chars[current_pos..start].iter().collect();
            print!("{normal_section}");
        }

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted_section: String = chars[start..end].iter().collect();
        print!("{highlighted_section}");
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(&theme.colors.text_normal));

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}

/// Prints `text` left-aligned in a field of `width` characters.
pub fn print_padded(text: &str, width: usize) {
    print!("{text}");
    print!("{}", " ".repeat(width.saturating_sub(text.chars().count())));
}
