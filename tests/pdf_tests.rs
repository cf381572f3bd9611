#![cfg(feature = "pdf")]

use chrono::NaiveDate;
use lopdf::Document;
use rust_decimal_macros::dec;
use swissbill::core::*;
use swissbill::pdf::{LayoutOptions, render_invoice};
use swissbill::qrbill::QrBill;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn creditor() -> Party {
    PartyBuilder::new("Muster SA", "Rue du Lac", "1000", "Lausanne")
        .building_number("1")
        .country("CH")
        .account("CH5800791123000889012")
        .build()
}

fn render(request: &InvoiceRequest, policy: ValidationPolicy, options: LayoutOptions) -> Vec<u8> {
    let amounts = reconcile(request, policy).unwrap();
    let debtor = EffectiveDebtor::resolve(request.debtor.as_ref());
    let bill = QrBill::from_request(request, &amounts, &debtor).checked().unwrap();
    render_invoice(request, &amounts, &debtor, &bill, &options, today()).unwrap()
}

/// Decompressed content streams, one string per page.
fn pages(bytes: &[u8]) -> Vec<String> {
    let mut doc = Document::load_mem(bytes).unwrap();
    doc.decompress();
    doc.get_pages()
        .values()
        .map(|id| String::from_utf8_lossy(&doc.get_page_content(*id).unwrap()).into_owned())
        .collect()
}

#[test]
fn strict_invoice_with_vat() {
    let request = InvoiceRequestBuilder::new("2024-17", creditor())
        .debtor(
            PartyBuilder::new("Pia Rutschmann", "Marktgasse", "9400", "Rorschach")
                .building_number("28")
                .country("CH")
                .build(),
        )
        .row(LineItem::new("2", "Conseil", "CHF 40.00").position("1"))
        .row(LineItem::new("1", "Frais", "CHF 20.00").position("2"))
        .vat(dec!(7.7))
        .amount(dec!(64.62))
        .build();
    let bytes = render(&request, ValidationPolicy::Strict, LayoutOptions::default());
    assert!(bytes.starts_with(b"%PDF-"));

    let pages = pages(&bytes);
    assert_eq!(pages.len(), 1);
    let page = &pages[0];
    for text in [
        "(Muster SA)",
        "(Rue du Lac 1)",
        "(1000 Lausanne)",
        "(Pia Rutschmann)",
        "(Marktgasse 28)",
        "(Facture Nr. 2024-17)",
        "(Lausanne 15.6.2024)",
        "(CHF 40.00)",
        "(TVA 7.7%)",
        "(CHF 4.62)",
        "(Total avec TVA)",
        "(CHF 64.62)",
        "(64.62)",
        "(CH58 0079 1123 0008 8901 2)",
    ] {
        assert!(page.contains(text), "missing {text}");
    }
}

#[test]
fn derived_total_without_vat() {
    let request = InvoiceRequestBuilder::new("5", creditor())
        .row(LineItem::new("1", "A", "60"))
        .row(LineItem::new("1", "B", "40"))
        .build();
    let page = &pages(&render(&request, ValidationPolicy::Derive, LayoutOptions::default()))[0];
    assert!(page.contains("(CHF 100.00)"));
    assert!(page.contains("(100.00)"));
    assert!(page.contains("(Total)"));
    assert!(!page.contains("(TVA"));
}

#[test]
fn partial_debtor_only_on_letter() {
    let request = InvoiceRequestBuilder::new("6", creditor())
        .debtor(PartyDraft {
            name: Some("Pia Rutschmann".into()),
            city: Some("Rorschach".into()),
            ..PartyDraft::default()
        })
        .row(LineItem::new("1", "A", "10"))
        .build();
    let page = &pages(&render(&request, ValidationPolicy::Derive, LayoutOptions::default()))[0];
    assert_eq!(page.matches("(Pia Rutschmann)").count(), 1);
    assert!(page.contains("nom/adresse"));
}

#[test]
fn same_inputs_same_bytes() {
    let request = InvoiceRequestBuilder::new("7", creditor())
        .row(LineItem::new("1", "A", "10"))
        .build();
    let options = LayoutOptions {
        language: Language::It,
        total_rule: true,
        payment_note: true,
    };
    let first = render(&request, ValidationPolicy::Derive, options);
    let second = render(&request, ValidationPolicy::Derive, options);
    assert_eq!(first, second);
    assert!(pages(&first)[0].contains("(Pagabile entro 30 giorni)"));
}

#[test]
fn many_rows_span_pages() {
    let mut builder = InvoiceRequestBuilder::new("8", creditor());
    for i in 0..60 {
        builder = builder.row(LineItem::new("1", format!("Position {i}"), "1.00"));
    }
    let pages = pages(&render(&builder.build(), ValidationPolicy::Derive, LayoutOptions::default()));
    assert!(pages.len() > 1);
    assert!(pages.last().unwrap().contains("(CHF 60.00)"));
    assert_eq!(pages.iter().filter(|p| p.contains("(Section paiement)")).count(), 1);
}
