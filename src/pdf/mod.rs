//! PDF rendering on top of lopdf.
//!
//! [`render_invoice`] lays out the letter head, the item table and the Swiss
//! payment part on A4 pages. Text uses the standard Helvetica faces, so no
//! font files are embedded.

mod canvas;
mod fonts;
mod invoice;
mod labels;
mod slip;
mod table;

pub use canvas::{A4, Align, Canvas, Color, TextStyle, mm2pt, wrap_text};
pub use fonts::Font;
pub use invoice::{LayoutOptions, render_invoice};
pub use labels::{Labels, labels};
pub use slip::{SLIP_HEIGHT_MM, draw_payment_slip};
pub use table::{Cell, PageBounds, Row, Table};
