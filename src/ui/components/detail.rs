//! Detail overlay renderer and hit testing.
//!
//! The overlay is a centered box drawn over the table. [`DetailFrame`] is
//! shared by the renderer and the mouse handler so a click is tested against
//! exactly what was drawn.

use crate::ui::helpers::{position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DetailInfo;

/// Widest the overlay grows on large panes.
const MAX_WIDTH: usize = 60;

/// Close control drawn into the top border.
const CLOSE_LABEL: &str = "[x]";

/// Position of the overlay box in 1-indexed pane coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailFrame {
    pub top: usize,
    pub left: usize,
    pub height: usize,
    pub width: usize,
}

/// What a click on the pane landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameHit {
    CloseButton,
    Inside,
    Outside,
}

impl DetailFrame {
    /// Centers a box sized to `detail` in a pane of `rows` x `cols`.
    #[must_use]
    pub fn for_detail(detail: &DetailInfo, rows: usize, cols: usize) -> Self {
        let height = (content_lines(detail).len() + 2).min(rows.max(3));
        let width = MAX_WIDTH.min(cols.saturating_sub(4)).max(CLOSE_LABEL.len() + 4);

        Self {
            top: rows.saturating_sub(height) / 2 + 1,
            left: cols.saturating_sub(width) / 2 + 1,
            height,
            width,
        }
    }

    /// Classifies a click at 1-indexed `row`, `col`.
    #[must_use]
    pub fn hit(&self, row: usize, col: usize) -> FrameHit {
        let bottom = self.top + self.height;
        let right = self.left + self.width;
        if row < self.top || row >= bottom || col < self.left || col >= right {
            return FrameHit::Outside;
        }

        let close_start = right - CLOSE_LABEL.len() - 2;
        if row == self.top && (close_start..close_start + CLOSE_LABEL.len()).contains(&col) {
            FrameHit::CloseButton
        } else {
            FrameHit::Inside
        }
    }
}

/// Lines inside the box, top to bottom, tagged with how they are styled.
fn content_lines(detail: &DetailInfo) -> Vec<(LineStyle, String)> {
    let mut lines = vec![
        (LineStyle::Title, detail.title.clone()),
        (LineStyle::Dim, detail.subtitle.clone()),
        (LineStyle::Plain, String::new()),
    ];
    for (heading, body) in &detail.sections {
        lines.push((LineStyle::Heading, heading.clone()));
        lines.extend(body.iter().map(|l| (LineStyle::Plain, format!("  {l}"))));
        lines.push((LineStyle::Plain, String::new()));
    }
    lines.push((LineStyle::Dim, detail.footer.clone()));
    lines
}

#[derive(Debug, Clone, Copy)]
enum LineStyle {
    Title,
    Heading,
    Dim,
    Plain,
}

/// Draws the overlay for `detail` centered in the pane.
pub fn render_detail(detail: &DetailInfo, theme: &Theme, rows: usize, cols: usize) {
    let frame = DetailFrame::for_detail(detail, rows, cols);
    let inner_width = frame.width - 2;

    position_cursor(frame.top, frame.left);
    print!("{}", Theme::fg(&theme.colors.accent));
    print!(
        "┌{}{}─┐",
        "─".repeat(inner_width - CLOSE_LABEL.len() - 1),
        CLOSE_LABEL
    );
    print!("{}", Theme::reset());

    let body_rows = frame.height - 2;
    let lines = content_lines(detail);
    for (offset, (style, text)) in lines.iter().take(body_rows).enumerate() {
        let text = truncate(text, inner_width.saturating_sub(2));
        let padding = inner_width.saturating_sub(text.chars().count() + 1);

        position_cursor(frame.top + 1 + offset, frame.left);
        print!("{}", Theme::fg(&theme.colors.accent));
        print!("│ ");
        print!("{}", Theme::reset());
        match style {
            LineStyle::Title => {
                print!("{}", Theme::bold());
                print!("{}", Theme::fg(&theme.colors.header_fg));
            }
            LineStyle::Heading => {
                print!("{}", Theme::bold());
                print!("{}", Theme::fg(&theme.colors.accent));
            }
            LineStyle::Dim => print!("{}", Theme::fg(&theme.colors.text_dim)),
            LineStyle::Plain => print!("{}", Theme::fg(&theme.colors.text_normal)),
        }
        print!("{text}{}", " ".repeat(padding));
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(&theme.colors.accent));
        print!("│");
        print!("{}", Theme::reset());
    }

    position_cursor(frame.top + frame.height - 1, frame.left);
    print!("{}", Theme::fg(&theme.colors.accent));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());
}
