use chrono::NaiveDate;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, StringFormat, dictionary};

use super::fonts::{Font, encode_win_ansi};
use crate::core::BillError;

/// Millimetres to PDF points.
pub fn mm2pt(mm: f32) -> f32 {
    mm * 72.0 / 25.4
}

/// A4 portrait in points.
pub const A4: (f32, f32) = (595.28, 841.89);

/// Line height as a multiple of the font size.
pub const LINE_HEIGHT: f32 = 1.2;

/// RGB colour with components in 0..=1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color(pub f32, pub f32, pub f32);

impl Color {
    pub const BLACK: Color = Color(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color(1.0, 1.0, 1.0);

    /// From 8-bit channels, e.g. `Color::rgb(0x4A, 0x4D, 0x51)`.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }
}

/// Horizontal text alignment inside a box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Right,
}

/// Font, size and colour for a run of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: Font,
    pub size: f32,
    pub color: Color,
}

impl TextStyle {
    pub const fn regular(size: f32) -> Self {
        Self {
            font: Font::Regular,
            size,
            color: Color::BLACK,
        }
    }

    pub const fn bold(size: f32) -> Self {
        Self {
            font: Font::Bold,
            size,
            color: Color::BLACK,
        }
    }

    pub fn line_height(&self) -> f32 {
        self.size * LINE_HEIGHT
    }
}

/// A page-based drawing surface with a top-left origin, in points.
///
/// Operations are collected per page and turned into a lopdf document by
/// [`Canvas::finish`].
pub struct Canvas {
    width: f32,
    height: f32,
    pages: Vec<Vec<Operation>>,
}

impl Canvas {
    /// A canvas with one empty page.
    pub fn new(size: (f32, f32)) -> Self {
        Self {
            width: size.0,
            height: size.1,
            pages: vec![Vec::new()],
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn add_page(&mut self) {
        self.pages.push(Vec::new());
    }

    fn ops(&mut self) -> &mut Vec<Operation> {
        // `pages` is never empty: it starts with one page and only grows.
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    /// Draw a single line of text whose top edge sits at `y`.
    pub fn text_line(&mut self, x: f32, y: f32, style: &TextStyle, text: &str) {
        if text.is_empty() {
            return;
        }
        // Baseline sits roughly one ascent below the top of the line box.
        let baseline = self.height - y - style.size * 0.8 - (style.line_height() - style.size) / 2.0;
        let Color(r, g, b) = style.color;
        self.ops().extend([
            Operation::new("BT", vec![]),
            Operation::new(
                "Tf",
                vec![
                    Object::Name(style.font.resource_name().as_bytes().to_vec()),
                    Object::Real(style.size),
                ],
            ),
            Operation::new(
                "rg",
                vec![Object::Real(r), Object::Real(g), Object::Real(b)],
            ),
            Operation::new("Td", vec![Object::Real(x), Object::Real(baseline)]),
            Operation::new(
                "Tj",
                vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
            ),
            Operation::new("ET", vec![]),
        ]);
    }

    /// Draw wrapped text inside a box of `width`; returns the height used.
    pub fn text_box(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        style: &TextStyle,
        align: Align,
        text: &str,
    ) -> f32 {
        let lines = wrap_text(text, style, width);
        for (i, line) in lines.iter().enumerate() {
            let line_x = match align {
                Align::Left => x,
                Align::Right => x + width - style.font.text_width(line, style.size),
            };
            self.text_line(line_x, y + i as f32 * style.line_height(), style, line);
        }
        lines.len() as f32 * style.line_height()
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        let Color(r, g, b) = color;
        let bottom = self.height - y - h;
        self.ops().extend([
            Operation::new("q", vec![]),
            Operation::new(
                "rg",
                vec![Object::Real(r), Object::Real(g), Object::Real(b)],
            ),
            Operation::new(
                "re",
                vec![
                    Object::Real(x),
                    Object::Real(bottom),
                    Object::Real(w),
                    Object::Real(h),
                ],
            ),
            Operation::new("f", vec![]),
            Operation::new("Q", vec![]),
        ]);
    }

    /// Fill many rectangles of one colour with a single path.
    pub fn fill_rects(&mut self, rects: &[(f32, f32, f32, f32)], color: Color) {
        if rects.is_empty() {
            return;
        }
        let Color(r, g, b) = color;
        let height = self.height;
        let ops = self.ops();
        ops.push(Operation::new("q", vec![]));
        ops.push(Operation::new(
            "rg",
            vec![Object::Real(r), Object::Real(g), Object::Real(b)],
        ));
        for &(x, y, w, h) in rects {
            ops.push(Operation::new(
                "re",
                vec![
                    Object::Real(x),
                    Object::Real(height - y - h),
                    Object::Real(w),
                    Object::Real(h),
                ],
            ));
        }
        ops.push(Operation::new("f", vec![]));
        ops.push(Operation::new("Q", vec![]));
    }

    /// Stroke a straight line; `dash` is an on/off pattern in points.
    pub fn line(&mut self, from: (f32, f32), to: (f32, f32), width: f32, dash: Option<[f32; 2]>) {
        let height = self.height;
        let dash_array = dash
            .map(|[on, off]| vec![Object::Real(on), Object::Real(off)])
            .unwrap_or_default();
        self.ops().extend([
            Operation::new("q", vec![]),
            Operation::new("w", vec![Object::Real(width)]),
            Operation::new("RG", vec![Object::Real(0.0), Object::Real(0.0), Object::Real(0.0)]),
            Operation::new("d", vec![Object::Array(dash_array), Object::Integer(0)]),
            Operation::new("m", vec![Object::Real(from.0), Object::Real(height - from.1)]),
            Operation::new("l", vec![Object::Real(to.0), Object::Real(height - to.1)]),
            Operation::new("S", vec![]),
            Operation::new("Q", vec![]),
        ]);
    }

    /// Assemble the PDF. `date` stamps the document info so that output is
    /// reproducible for a given request and day.
    pub fn finish(self, title: &str, date: NaiveDate) -> Result<Vec<u8>, BillError> {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();

        let font_dict = |font: Font| {
            dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => font.base_font(),
                "Encoding" => "WinAnsiEncoding",
            }
        };
        let regular_id = doc.add_object(font_dict(Font::Regular));
        let bold_id = doc.add_object(font_dict(Font::Bold));
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                Font::Regular.resource_name() => regular_id,
                Font::Bold.resource_name() => bold_id,
            },
        });

        let mut kids = Vec::with_capacity(self.pages.len());
        for operations in self.pages {
            let content = Content { operations }
                .encode()
                .map_err(|e| BillError::Render(format!("failed to encode page content: {e}")))?;
            let content_id = doc.add_object(Stream::new(dictionary! {}, content));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(Object::Reference(page_id));
        }

        let count = kids.len() as i64;
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => Object::Integer(count),
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(self.width),
                Object::Real(self.height),
            ],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        let stamp = format!("D:{}000000", date.format("%Y%m%d"));
        let info_id = doc.add_object(dictionary! {
            "Title" => Object::string_literal(title),
            "Producer" => Object::string_literal(concat!("swissbill ", env!("CARGO_PKG_VERSION"))),
            "CreationDate" => Object::string_literal(stamp),
        });
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);
        doc.compress();

        let mut output = Vec::new();
        doc.save_to(&mut output)
            .map_err(|e| BillError::Render(format!("failed to save PDF: {e}")))?;
        Ok(output)
    }
}

/// Greedy word wrap; explicit newlines start a new line.
pub fn wrap_text(text: &str, style: &TextStyle, width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if current.is_empty() || style.font.text_width(&candidate, style.size) <= width {
                current = candidate;
            } else {
                lines.push(std::mem::take(&mut current));
                current = word.to_string();
            }
        }
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millimetres() {
        assert!((mm2pt(25.4) - 72.0).abs() < 1e-4);
        assert!((mm2pt(210.0) - A4.0).abs() < 0.01);
    }

    #[test]
    fn eight_bit_channels() {
        assert_eq!(Color::rgb(255, 255, 255), Color::WHITE);
        let Color(r, g, _) = Color::rgb(0x4A, 0x4D, 0x51);
        assert!((r - 74.0 / 255.0).abs() < 1e-6);
        assert!((g - 77.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn wrapping() {
        let style = TextStyle::regular(10.0);
        let lines = wrap_text("Muster SA\nRue du Lac 1", &style, 500.0);
        assert_eq!(lines, vec!["Muster SA", "Rue du Lac 1"]);

        let lines = wrap_text("aaaa bbbb cccc", &style, Font::Regular.text_width("aaaa bbbb", 10.0));
        assert_eq!(lines, vec!["aaaa bbbb", "cccc"]);
    }

    #[test]
    fn finished_document_loads() {
        let mut canvas = Canvas::new(A4);
        canvas.text_line(mm2pt(20.0), mm2pt(20.0), &TextStyle::bold(14.0), "Facture (test)");
        canvas.fill_rect(10.0, 10.0, 20.0, 1.0, Color::BLACK);
        canvas.add_page();
        canvas.line((0.0, 100.0), (100.0, 100.0), 0.5, Some([2.0, 2.0]));

        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let bytes = canvas.finish("test", date).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
    }
}
