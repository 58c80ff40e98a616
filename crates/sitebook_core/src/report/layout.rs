//! Fixed-page flow layout for reports.
//!
//! # Responsibility
//! - Turn paragraphs and table rows into positioned draw operations.
//! - Break content across A4 pages top to bottom.
//!
//! # Invariants
//! - Coordinates are PDF user space: origin bottom-left, units in points.
//! - A table row that fits on one page is never split across pages.
//! - Page count never exceeds the cursor's limit; overflow is an error.

use crate::report::metrics::{char_width, text_width, Font};
use crate::report::RenderError;

pub const PAGE_WIDTH: f32 = 595.0;
pub const PAGE_HEIGHT: f32 = 842.0;
pub const PAGE_PADDING: f32 = 30.0;
pub const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * PAGE_PADDING;

const LINE_SPACING: f32 = 1.2;
const ROW_PADDING_X: f32 = 5.0;
pub const ROW_PADDING_Y: f32 = 8.0;
const CELL_PADDING_X: f32 = 5.0;
const RULE_WIDTH: f32 = 1.0;

/// Device RGB colour with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    /// `#6b7280`
    pub const MUTED: Color = Color::rgb(0.420, 0.447, 0.502);
    /// `#f3f4f6`
    pub const HEADER_FILL: Color = Color::rgb(0.953, 0.957, 0.965);
    /// `#bfbfbf`
    pub const RULE: Color = Color::rgb(0.749, 0.749, 0.749);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// Text appearance plus the gap left below the block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: Font,
    pub size: f32,
    pub color: Color,
    pub margin_bottom: f32,
}

impl TextStyle {
    pub fn line_height(&self) -> f32 {
        self.size * LINE_SPACING
    }
}

/// One positioned drawing primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// `y` is the text baseline.
    Text {
        x: f32,
        y: f32,
        font: Font,
        size: f32,
        color: Color,
        text: String,
    },
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
    },
    /// Horizontal line from `x1` to `x2` at height `y`.
    Rule {
        x1: f32,
        x2: f32,
        y: f32,
        width: f32,
        color: Color,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

impl Page {
    /// Text runs on this page in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Flow cursor that places blocks from the top of the page downwards.
pub struct PageCursor {
    pages: Vec<Page>,
    y: f32,
    max_pages: usize,
}

impl PageCursor {
    pub fn new(max_pages: usize) -> Self {
        Self {
            pages: vec![Page::default()],
            y: top_of_page(),
            max_pages,
        }
    }

    /// Current vertical position (top of free space).
    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Moves the cursor down by `gap`, without breaking the page.
    pub fn skip(&mut self, gap: f32) {
        self.y -= gap;
    }

    /// Starts a new page unless `height` fits below the cursor.
    ///
    /// A fresh page is never broken again, so content taller than a page
    /// simply overflows its bottom margin.
    pub fn ensure_space(&mut self, height: f32) -> Result<(), RenderError> {
        if self.y - height >= PAGE_PADDING || self.at_page_top() {
            return Ok(());
        }
        self.break_page()
    }

    /// Lays out wrapped text across the full content width.
    pub fn paragraph(&mut self, text: &str, style: TextStyle) -> Result<(), RenderError> {
        self.paragraph_indented(text, style, 0.0)
    }

    /// Lays out wrapped text starting `indent` points inside the content box.
    pub fn paragraph_indented(
        &mut self,
        text: &str,
        style: TextStyle,
        indent: f32,
    ) -> Result<(), RenderError> {
        let x = PAGE_PADDING + indent;
        let lines = wrap_text(text, style.font, style.size, CONTENT_WIDTH - 2.0 * indent);
        for line in lines {
            self.ensure_space(style.line_height())?;
            self.push_text(x, line, style);
            self.y -= style.line_height();
        }
        self.y -= style.margin_bottom;
        Ok(())
    }

    /// Lays out one table row with proportional column `weights`.
    ///
    /// Cells wrap inside their column. An optional `fill` shades the row.
    /// Every row is closed by a horizontal rule.
    pub fn table_row(
        &mut self,
        cells: &[&str],
        weights: &[f32],
        style: TextStyle,
        fill: Option<Color>,
    ) -> Result<(), RenderError> {
        let columns = column_boxes(weights);
        let wrapped: Vec<Vec<String>> = cells
            .iter()
            .zip(columns.iter())
            .map(|(cell, (_, width))| {
                wrap_text(cell, style.font, style.size, width - 2.0 * CELL_PADDING_X)
            })
            .collect();
        let line_count = wrapped.iter().map(Vec::len).max().unwrap_or(1);
        let row_height = line_count as f32 * style.line_height() + 2.0 * ROW_PADDING_Y;

        if row_height <= usable_height() {
            self.ensure_space(row_height)?;
        }
        if let Some(color) = fill {
            let height = row_height.min(self.y - PAGE_PADDING);
            self.push(DrawOp::FillRect {
                x: PAGE_PADDING,
                y: self.y - height,
                width: CONTENT_WIDTH,
                height,
                color,
            });
        }

        self.y -= ROW_PADDING_Y;
        for line_index in 0..line_count {
            self.ensure_space(style.line_height())?;
            for (lines, (x, _)) in wrapped.iter().zip(columns.iter()) {
                if let Some(line) = lines.get(line_index) {
                    self.push_text(x + CELL_PADDING_X, line.clone(), style);
                }
            }
            self.y -= style.line_height();
        }
        self.y -= ROW_PADDING_Y;
        self.rule();
        Ok(())
    }

    /// Draws a separator rule across the content width at the cursor.
    pub fn rule(&mut self) {
        self.push(DrawOp::Rule {
            x1: PAGE_PADDING,
            x2: PAGE_WIDTH - PAGE_PADDING,
            y: self.y,
            width: RULE_WIDTH,
            color: Color::RULE,
        });
    }

    /// Block padding used around table rows and comment blocks.
    pub fn row_padding(&mut self) {
        self.y -= ROW_PADDING_Y;
    }

    /// Horizontal inset of text inside table rows and comment blocks.
    pub fn cell_indent() -> f32 {
        ROW_PADDING_X + CELL_PADDING_X
    }

    pub fn finish(self) -> Vec<Page> {
        self.pages
    }

    fn at_page_top(&self) -> bool {
        self.y >= top_of_page()
    }

    fn break_page(&mut self) -> Result<(), RenderError> {
        if self.pages.len() >= self.max_pages {
            return Err(RenderError::PageLimitExceeded {
                limit: self.max_pages,
            });
        }
        self.pages.push(Page::default());
        self.y = top_of_page();
        Ok(())
    }

    fn push_text(&mut self, x: f32, text: String, style: TextStyle) {
        self.push(DrawOp::Text {
            x,
            y: self.y - style.size,
            font: style.font,
            size: style.size,
            color: style.color,
            text,
        });
    }

    fn push(&mut self, op: DrawOp) {
        if let Some(page) = self.pages.last_mut() {
            page.ops.push(op);
        }
    }
}

fn top_of_page() -> f32 {
    PAGE_HEIGHT - PAGE_PADDING
}

fn usable_height() -> f32 {
    PAGE_HEIGHT - 2.0 * PAGE_PADDING
}

/// Returns `(left x, width)` for each column of a table row.
fn column_boxes(weights: &[f32]) -> Vec<(f32, f32)> {
    let total: f32 = weights.iter().sum();
    let inner_width = CONTENT_WIDTH - 2.0 * ROW_PADDING_X;
    let mut x = PAGE_PADDING + ROW_PADDING_X;
    weights
        .iter()
        .map(|weight| {
            let width = if total > 0.0 {
                inner_width * weight / total
            } else {
                0.0
            };
            let column = (x, width);
            x += width;
            column
        })
        .collect()
}

/// Greedy word wrap using font advance widths.
///
/// Explicit newlines start new lines; runs of whitespace collapse to one
/// space. Words wider than `max_width` are broken between characters.
/// Always returns at least one (possibly empty) line.
pub fn wrap_text(text: &str, font: Font, size: f32, max_width: f32) -> Vec<String> {
    let space_width = char_width(' ', font, size);
    let mut lines = Vec::new();

    for source_line in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0.0_f32;

        for word in source_line.split_whitespace() {
            let word_width = text_width(word, font, size);
            if !current.is_empty() && current_width + space_width + word_width <= max_width {
                current.push(' ');
                current.push_str(word);
                current_width += space_width + word_width;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0.0;
            }

            if word_width <= max_width {
                current.push_str(word);
                current_width = word_width;
                continue;
            }

            for ch in word.chars() {
                let ch_width = char_width(ch, font, size);
                if !current.is_empty() && current_width + ch_width > max_width {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0.0;
                }
                current.push(ch);
                current_width += ch_width;
            }
        }

        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::{wrap_text, Color, PageCursor, TextStyle, PAGE_PADDING};
    use crate::report::metrics::{text_width, Font};
    use crate::report::RenderError;

    const BODY: TextStyle = TextStyle {
        font: Font::Regular,
        size: 12.0,
        color: Color::BLACK,
        margin_bottom: 0.0,
    };

    #[test]
    fn wrap_keeps_short_text_on_one_line() {
        assert_eq!(
            wrap_text("Foundation Work", Font::Regular, 12.0, 500.0),
            vec!["Foundation Work".to_string()]
        );
    }

    #[test]
    fn wrap_breaks_at_word_boundaries_within_width() {
        let text = "one two three four five six seven eight nine ten";
        let lines = wrap_text(text, Font::Regular, 12.0, 80.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width(line, Font::Regular, 12.0) <= 80.0, "too wide: {line}");
        }
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn wrap_splits_overlong_words() {
        let lines = wrap_text(&"W".repeat(40), Font::Bold, 12.0, 60.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), "W".repeat(40));
    }

    #[test]
    fn wrap_returns_single_empty_line_for_empty_text() {
        assert_eq!(wrap_text("", Font::Regular, 12.0, 100.0), vec![String::new()]);
    }

    #[test]
    fn wrap_preserves_explicit_newlines() {
        assert_eq!(
            wrap_text("a\nb", Font::Regular, 12.0, 100.0),
            vec!["a".to_string(), "b".to_string()]
        );
    }

    #[test]
    fn cursor_breaks_page_when_space_runs_out() {
        let mut cursor = PageCursor::new(10);
        for _ in 0..60 {
            cursor.paragraph("line", BODY).unwrap();
        }
        assert_eq!(cursor.page_count(), 2);
        assert!(cursor.y() >= PAGE_PADDING);
    }

    #[test]
    fn cursor_reports_page_limit() {
        let mut cursor = PageCursor::new(1);
        let err = (0..100)
            .try_for_each(|_| cursor.paragraph("line", BODY))
            .unwrap_err();
        assert!(matches!(err, RenderError::PageLimitExceeded { limit: 1 }));
    }

    #[test]
    fn table_row_is_moved_whole_to_next_page() {
        let mut cursor = PageCursor::new(10);
        cursor.skip(cursor.y() - PAGE_PADDING - 20.0);
        cursor
            .table_row(&["a", "b"], &[1.0, 1.0], BODY, None)
            .unwrap();
        let pages = cursor.finish();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].texts().count(), 0);
        assert_eq!(pages[1].texts().collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
