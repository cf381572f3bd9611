use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::canvas::{A4, Align, Canvas, Color, TextStyle, mm2pt};
use super::fonts::Font;
use super::labels::{Labels, labels};
use super::slip::{SLIP_HEIGHT_MM, draw_payment_slip};
use super::table::{Cell, PageBounds, Row, Table};
use crate::core::money::format_money;
use crate::core::{
    BillError, EffectiveDebtor, InvoiceRequest, Language, Party, PartyDraft,
    ReconciledAmounts,
};
use crate::qrbill::QrBill;

const MARGIN_MM: f32 = 20.0;
const CONTENT_WIDTH_MM: f32 = 170.0;
const TABLE_FONT_SIZE: f32 = 10.0;
const ADDRESS_FONT_SIZE: f32 = 11.0;
const HEADER_BACKGROUND: Color = Color::rgb(0x4A, 0x4D, 0x51);

/// Presentation switches that do not change amounts or slip data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutOptions {
    pub language: Language,
    /// Draw a 1 pt black bar above the total lines.
    pub total_rule: bool,
    /// Append the "payable within 30 days" note under the totals.
    pub payment_note: bool,
}

/// Render the complete invoice: letter head, item table and payment slip.
///
/// `today` is printed in the date line and stamped into the document info,
/// so the same inputs always produce the same bytes.
pub fn render_invoice(
    request: &InvoiceRequest,
    amounts: &ReconciledAmounts,
    debtor: &EffectiveDebtor,
    bill: &QrBill,
    options: &LayoutOptions,
    today: NaiveDate,
) -> Result<Vec<u8>, BillError> {
    let text = labels(options.language);
    let mut canvas = Canvas::new(A4);

    draw_letter_head(&mut canvas, &request.creditor, debtor.for_letter.as_ref());

    let title = format!("{} {}", text.invoice_title, request.bill_number);
    let (x, y) = (mm2pt(MARGIN_MM), mm2pt(100.0));
    canvas.text_line(x, y, &TextStyle::bold(14.0), &title);
    let date_line = format!("{} {}", request.creditor.city, today.format("%-d.%-m.%Y"));
    canvas.text_box(
        x,
        y + TextStyle::bold(14.0).line_height(),
        mm2pt(CONTENT_WIDTH_MM),
        &TextStyle::regular(ADDRESS_FONT_SIZE),
        Align::Right,
        &date_line,
    );

    let table = item_table(request, amounts, text, options);
    let bounds = PageBounds {
        top: mm2pt(MARGIN_MM),
        bottom: canvas.height() - mm2pt(SLIP_HEIGHT_MM) - mm2pt(5.0),
    };
    table.draw(&mut canvas, x, mm2pt(115.0), bounds);

    draw_payment_slip(&mut canvas, bill, options.language)?;
    canvas.finish(&title, today)
}

fn draw_letter_head(canvas: &mut Canvas, creditor: &Party, debtor: Option<&PartyDraft>) {
    let style = TextStyle::regular(ADDRESS_FONT_SIZE);
    let creditor_lines = [
        creditor.name.clone(),
        creditor.street_line(),
        format!("{} {}", creditor.zip, creditor.city),
    ];
    address_block(canvas, mm2pt(20.0), mm2pt(35.0), &style, &creditor_lines);

    if let Some(debtor) = debtor {
        let field = |v: &Option<String>| v.clone().unwrap_or_default();
        let street = match (&debtor.address, &debtor.building_number) {
            (Some(street), Some(number)) => format!("{street} {number}"),
            (street, number) => field(street) + &field(number),
        };
        let place = format!("{} {}", field(&debtor.zip), field(&debtor.city));
        let lines = [field(&debtor.name), street, place.trim().to_string()];
        address_block(canvas, mm2pt(130.0), mm2pt(60.0), &style, &lines);
    }
}

fn address_block(canvas: &mut Canvas, x: f32, mut y: f32, style: &TextStyle, lines: &[String]) {
    for line in lines {
        canvas.text_line(x, y, style, line);
        y += style.line_height();
    }
}

fn item_table(
    request: &InvoiceRequest,
    amounts: &ReconciledAmounts,
    text: &Labels,
    options: &LayoutOptions,
) -> Table {
    let money = |value: Decimal| format_money(request.currency, value);
    let columns = |position: String, quantity: String, description: String, total: String| {
        vec![
            Cell::new(position).width(mm2pt(20.0)),
            Cell::new(quantity).width(mm2pt(20.0)),
            Cell::new(description),
            Cell::new(total).width(mm2pt(30.0)).align(Align::Right),
        ]
    };

    let header = Row::new(columns(
        text.position.into(),
        text.quantity.into(),
        text.description.into(),
        text.total.into(),
    ))
    .font(Font::Bold)
    .background(HEADER_BACKGROUND)
    .text_color(Color::WHITE)
    .height(20.0)
    .vertical_center();

    let mut table = Table::new(mm2pt(CONTENT_WIDTH_MM), TABLE_FONT_SIZE).row(header);
    for (i, (item, total)) in request.rows.iter().zip(&amounts.row_totals).enumerate() {
        let position = item.position.clone().unwrap_or_else(|| (i + 1).to_string());
        table = table.row(Row::new(columns(
            position,
            item.quantity.clone(),
            item.description.clone(),
            money(*total),
        )));
    }

    let blank = || columns(String::new(), String::new(), String::new(), String::new());
    table = table.row(Row::new(blank()).height(10.0).padding(0.0));
    if options.total_rule {
        table = table.row(
            Row::new(blank())
                .height(1.0)
                .padding(0.0)
                .background(Color::BLACK),
        );
    }

    let total_label = match amounts.vat_rate {
        Some(rate) => {
            let vat_line = format!("{} {}%", text.vat, rate.normalize());
            table = table.row(Row::new(columns(
                String::new(),
                String::new(),
                vat_line,
                money(amounts.vat_amount),
            )));
            text.total_with_vat
        }
        None => text.total,
    };
    table = table.row(
        Row::new(columns(
            String::new(),
            String::new(),
            total_label.into(),
            money(amounts.grand_total),
        ))
        .font(Font::Bold),
    );

    if options.payment_note {
        table = table.row(Row::new(columns(
            String::new(),
            String::new(),
            text.payment_note.into(),
            String::new(),
        )));
    }
    table
}
