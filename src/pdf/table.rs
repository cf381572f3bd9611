//! Row-based table layout.
//!
//! Columns with a fixed width keep it; the remaining width is shared by the
//! columns without one. Rows grow to fit wrapped text and break onto a new
//! page when they would cross the bottom limit.

use super::canvas::{Align, Canvas, Color, TextStyle, wrap_text};
use super::fonts::Font;

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub text: String,
    pub width: Option<f32>,
    pub align: Align,
}

impl Cell {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            width: None,
            align: Align::Left,
        }
    }

    pub fn width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub cells: Vec<Cell>,
    pub background: Option<Color>,
    pub font: Font,
    pub text_color: Color,
    /// Minimum height; an empty row with a height is exactly that tall.
    pub height: Option<f32>,
    pub padding: f32,
    pub vertical_center: bool,
}

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self {
            cells,
            background: None,
            font: Font::Regular,
            text_color: Color::BLACK,
            height: None,
            padding: 5.0,
            vertical_center: false,
        }
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    pub fn text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    pub fn height(mut self, height: f32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    pub fn vertical_center(mut self) -> Self {
        self.vertical_center = true;
        self
    }

    fn is_blank(&self) -> bool {
        self.cells.iter().all(|c| c.text.trim().is_empty())
    }
}

/// Vertical bounds available to a table on each page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageBounds {
    /// Where rows resume after a page break.
    pub top: f32,
    /// Rows must end above this line.
    pub bottom: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub rows: Vec<Row>,
    pub width: f32,
    pub font_size: f32,
}

impl Table {
    pub fn new(width: f32, font_size: f32) -> Self {
        Self {
            rows: Vec::new(),
            width,
            font_size,
        }
    }

    pub fn row(mut self, row: Row) -> Self {
        self.rows.push(row);
        self
    }

    /// Resolve the width of every cell in `row`.
    pub fn column_widths(&self, row: &Row) -> Vec<f32> {
        let fixed: f32 = row.cells.iter().filter_map(|c| c.width).sum();
        let auto = row.cells.iter().filter(|c| c.width.is_none()).count();
        let share = if auto == 0 {
            0.0
        } else {
            ((self.width - fixed) / auto as f32).max(0.0)
        };
        row.cells.iter().map(|c| c.width.unwrap_or(share)).collect()
    }

    /// Height of `row` once its text is wrapped into the column widths.
    pub fn row_height(&self, row: &Row) -> f32 {
        let line_height = TextStyle::regular(self.font_size).line_height();
        if row.is_blank() {
            if let Some(height) = row.height {
                return height;
            }
        }
        let widths = self.column_widths(row);
        let lines = row
            .cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| {
                let style = self.row_style(row);
                wrap_text(&cell.text, &style, width - 2.0 * row.padding).len()
            })
            .max()
            .unwrap_or(1);
        let content = lines as f32 * line_height + 2.0 * row.padding;
        content.max(row.height.unwrap_or(0.0))
    }

    fn row_style(&self, row: &Row) -> TextStyle {
        TextStyle {
            font: row.font,
            size: self.font_size,
            color: row.text_color,
        }
    }

    /// Draw at (`x`, `y`); returns the y coordinate below the last row.
    pub fn draw(&self, canvas: &mut Canvas, x: f32, mut y: f32, bounds: PageBounds) -> f32 {
        for row in &self.rows {
            let height = self.row_height(row);
            if y + height > bounds.bottom && y > bounds.top {
                canvas.add_page();
                y = bounds.top;
            }

            if let Some(color) = row.background {
                canvas.fill_rect(x, y, self.width, height, color);
            }

            let mut cell_x = x;
            for (cell, width) in row.cells.iter().zip(self.column_widths(row)) {
                let style = self.row_style(row);
                let inner = width - 2.0 * row.padding;
                let text_height =
                    wrap_text(&cell.text, &style, inner).len() as f32 * style.line_height();
                let text_y = if row.vertical_center {
                    y + (height - text_height) / 2.0
                } else {
                    y + row.padding
                };
                canvas.text_box(cell_x + row.padding, text_y, inner, &style, cell.align, &cell.text);
                cell_x += width;
            }
            y += height;
        }
        y
    }
}
