//! Payment part with receipt, drawn across the bottom 105 mm of the last page.

use qrcode::{EcLevel, QrCode};

use super::canvas::{Align, Canvas, Color, TextStyle, mm2pt};
use super::labels::{Labels, labels};
use crate::core::money::format_slip_amount;
use crate::core::{BillError, Language, Party};
use crate::qrbill::{QrBill, format_iban, format_reference};

/// Height of the payment part.
pub const SLIP_HEIGHT_MM: f32 = 105.0;

const RECEIPT_X: f32 = 5.0;
const RECEIPT_WIDTH: f32 = 52.0;
const PAYMENT_X: f32 = 67.0;
const INFO_X: f32 = 118.0;
const INFO_WIDTH: f32 = 87.0;
const QR_SIZE: f32 = 46.0;
const CROSS_SIZE: f32 = 7.0;

struct SlipStyle {
    title: TextStyle,
    heading: TextStyle,
    value: TextStyle,
}

const RECEIPT_STYLE: SlipStyle = SlipStyle {
    title: TextStyle::bold(11.0),
    heading: TextStyle::bold(6.0),
    value: TextStyle::regular(8.0),
};

const PAYMENT_STYLE: SlipStyle = SlipStyle {
    title: TextStyle::bold(11.0),
    heading: TextStyle::bold(8.0),
    value: TextStyle::regular(10.0),
};

/// Draw receipt and payment part, including the QR code, on the current page.
pub fn draw_payment_slip(
    canvas: &mut Canvas,
    bill: &QrBill,
    language: Language,
) -> Result<(), BillError> {
    let text = labels(language);
    let top = canvas.height() - mm2pt(SLIP_HEIGHT_MM);
    let at = |x_mm: f32, y_mm: f32| (mm2pt(x_mm), top + mm2pt(y_mm));

    // Separation lines.
    canvas.line((0.0, top), (canvas.width(), top), 0.5, Some([2.0, 2.0]));
    let (sep_x, _) = at(62.0, 0.0);
    canvas.line((sep_x, top), (sep_x, canvas.height()), 0.5, Some([2.0, 2.0]));

    draw_receipt(canvas, bill, text, &at);
    draw_payment_part(canvas, bill, text, &at)?;
    Ok(())
}

fn draw_receipt(
    canvas: &mut Canvas,
    bill: &QrBill,
    text: &Labels,
    at: &impl Fn(f32, f32) -> (f32, f32),
) {
    let style = &RECEIPT_STYLE;
    let width = mm2pt(RECEIPT_WIDTH);
    let (x, y) = at(RECEIPT_X, 5.0);
    canvas.text_line(x, y, &style.title, text.receipt);

    let (_, mut y) = at(RECEIPT_X, 12.0);
    y = section(canvas, x, y, width, style, text.account, &creditor_lines(bill));
    if let Some(reference) = &bill.reference {
        y = section(canvas, x, y, width, style, text.reference, &[format_reference(reference)]);
    }
    match &bill.debtor {
        Some(debtor) => {
            section(canvas, x, y, width, style, text.payable_by, &address_lines(debtor));
        }
        None => {
            canvas.text_line(x, y, &style.heading, text.payable_by_blank);
            let box_y = y + style.heading.line_height();
            corner_marks(canvas, (x, box_y, mm2pt(52.0), mm2pt(20.0)));
        }
    }

    let (_, amount_y) = at(RECEIPT_X, 68.0);
    draw_amount(canvas, bill, text, style, x, mm2pt(22.0 - RECEIPT_X), amount_y, (mm2pt(30.0), mm2pt(10.0)));

    let (_, accept_y) = at(RECEIPT_X, 82.0);
    canvas.text_box(x, accept_y, width, &style.heading, Align::Right, text.acceptance_point);
}

fn draw_payment_part(
    canvas: &mut Canvas,
    bill: &QrBill,
    text: &Labels,
    at: &impl Fn(f32, f32) -> (f32, f32),
) -> Result<(), BillError> {
    let style = &PAYMENT_STYLE;
    let (x, y) = at(PAYMENT_X, 5.0);
    canvas.text_line(x, y, &style.title, text.payment_part);

    let (qr_x, qr_y) = at(PAYMENT_X, 17.0);
    draw_qr_code(canvas, &bill.payload(), qr_x, qr_y)?;

    let (_, amount_y) = at(PAYMENT_X, 68.0);
    draw_amount(canvas, bill, text, style, x, mm2pt(20.0), amount_y, (mm2pt(40.0), mm2pt(15.0)));

    let width = mm2pt(INFO_WIDTH);
    let (info_x, mut y) = at(INFO_X, 5.0);
    y = section(canvas, info_x, y, width, style, text.account, &creditor_lines(bill));
    if let Some(reference) = &bill.reference {
        y = section(canvas, info_x, y, width, style, text.reference, &[format_reference(reference)]);
    }
    let info: Vec<String> = [&bill.message, &bill.additional_information]
        .into_iter()
        .flatten()
        .cloned()
        .collect();
    if !info.is_empty() {
        y = section(canvas, info_x, y, width, style, text.additional_information, &info);
    }
    match &bill.debtor {
        Some(debtor) => {
            section(canvas, info_x, y, width, style, text.payable_by, &address_lines(debtor));
        }
        None => {
            canvas.text_line(info_x, y, &style.heading, text.payable_by_blank);
            let box_y = y + style.heading.line_height();
            corner_marks(canvas, (info_x, box_y, mm2pt(65.0), mm2pt(25.0)));
        }
    }
    Ok(())
}

/// Heading plus value lines; returns the y where the next section starts.
fn section(
    canvas: &mut Canvas,
    x: f32,
    mut y: f32,
    width: f32,
    style: &SlipStyle,
    heading: &str,
    values: &[String],
) -> f32 {
    canvas.text_line(x, y, &style.heading, heading);
    y += style.heading.line_height();
    for value in values {
        y += canvas.text_box(x, y, width, &style.value, Align::Left, value);
    }
    y + style.value.line_height() * 0.5
}

#[allow(clippy::too_many_arguments)]
fn draw_amount(
    canvas: &mut Canvas,
    bill: &QrBill,
    text: &Labels,
    style: &SlipStyle,
    x: f32,
    amount_offset: f32,
    y: f32,
    blank_box: (f32, f32),
) {
    canvas.text_line(x, y, &style.heading, text.currency);
    canvas.text_line(x + amount_offset, y, &style.heading, text.amount);
    let value_y = y + style.heading.line_height();
    canvas.text_line(x, value_y, &style.value, bill.currency.code());
    match bill.amount {
        Some(amount) => {
            canvas.text_line(x + amount_offset, value_y, &style.value, &format_slip_amount(amount));
        }
        None => {
            let (w, h) = blank_box;
            corner_marks(canvas, (x + amount_offset, value_y, w, h));
        }
    }
}

fn creditor_lines(bill: &QrBill) -> Vec<String> {
    let mut lines = vec![format_iban(&bill.account)];
    lines.extend(address_lines(&bill.creditor));
    lines
}

fn address_lines(party: &Party) -> Vec<String> {
    vec![
        party.name.clone(),
        party.street_line(),
        format!("{}-{} {}", party.country_code(), party.zip, party.city),
    ]
}

/// Corner marks around a field the payer fills in by hand.
fn corner_marks(canvas: &mut Canvas, (x, y, w, h): (f32, f32, f32, f32)) {
    let len = mm2pt(3.0);
    let width = 0.75;
    for (cx, cy, dx, dy) in [
        (x, y, 1.0, 1.0),
        (x + w, y, -1.0, 1.0),
        (x, y + h, 1.0, -1.0),
        (x + w, y + h, -1.0, -1.0),
    ] {
        canvas.line((cx, cy), (cx + dx * len, cy), width, None);
        canvas.line((cx, cy), (cx, cy + dy * len), width, None);
    }
}

fn draw_qr_code(canvas: &mut Canvas, payload: &str, x: f32, y: f32) -> Result<(), BillError> {
    let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::M)
        .map_err(|e| BillError::Render(format!("failed to encode QR code: {e}")))?;
    let modules = code.width();
    let size = mm2pt(QR_SIZE);
    let module = size / modules as f32;

    let dark: Vec<_> = code
        .to_colors()
        .iter()
        .enumerate()
        .filter(|(_, color)| **color == qrcode::Color::Dark)
        .map(|(i, _)| {
            let (col, row) = (i % modules, i / modules);
            (x + col as f32 * module, y + row as f32 * module, module, module)
        })
        .collect();
    canvas.fill_rects(&dark, Color::BLACK);

    // Swiss cross in the centre.
    let cross = mm2pt(CROSS_SIZE);
    let (cx, cy) = (x + (size - cross) / 2.0, y + (size - cross) / 2.0);
    let border = mm2pt(0.5);
    canvas.fill_rect(cx, cy, cross, cross, Color::WHITE);
    canvas.fill_rect(cx + border, cy + border, cross - 2.0 * border, cross - 2.0 * border, Color::BLACK);
    let (arm, thickness) = (mm2pt(3.9), mm2pt(1.2));
    let mid = (cx + cross / 2.0, cy + cross / 2.0);
    canvas.fill_rects(
        &[
            (mid.0 - thickness / 2.0, mid.1 - arm / 2.0, thickness, arm),
            (mid.0 - arm / 2.0, mid.1 - thickness / 2.0, arm, thickness),
        ],
        Color::WHITE,
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Currency, PartyBuilder};
    use crate::pdf::canvas::A4;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn bill() -> QrBill {
        QrBill {
            account: "CH4431999123000889012".into(),
            creditor: PartyBuilder::new("Muster SA", "Rue du Lac", "1000", "Lausanne")
                .building_number("1")
                .build(),
            debtor: None,
            amount: None,
            currency: Currency::Chf,
            reference: Some("210000000003139471430009017".into()),
            message: Some("Facture 2024-17".into()),
            additional_information: None,
        }
    }

    #[test]
    fn slip_renders_without_debtor_or_amount() {
        let mut canvas = Canvas::new(A4);
        draw_payment_slip(&mut canvas, &bill(), Language::Fr).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(canvas.finish("slip", date).unwrap().starts_with(b"%PDF-"));
    }

    #[test]
    fn address_line_format() {
        let party = PartyBuilder::new("Muster SA", "Rue du Lac", "1000", "Lausanne")
            .building_number("1")
            .build();
        assert_eq!(
            address_lines(&party),
            vec!["Muster SA", "Rue du Lac 1", "CH-1000 Lausanne"]
        );
    }

    #[test]
    fn full_slip_with_debtor_and_amount() {
        let b = QrBill {
            debtor: Some(
                PartyBuilder::new("Pia Rutschmann", "Marktgasse", "9400", "Rorschach")
                    .country("CH")
                    .build(),
            ),
            amount: Some(dec!(1949.75)),
            ..bill()
        };
        let mut canvas = Canvas::new(A4);
        draw_payment_slip(&mut canvas, &b, Language::De).unwrap();
        assert_eq!(canvas.page_count(), 1);
    }
}
