use chrono::NaiveDate;
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rust_decimal_macros::dec;

use swissbill::core::money::parse_money;
use swissbill::core::*;
use swissbill::pdf::{LayoutOptions, render_invoice};
use swissbill::qrbill::QrBill;

fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn build_request(rows: usize) -> InvoiceRequest {
    let creditor = PartyBuilder::new("Benchmark SA", "Rue du Lac", "1000", "Lausanne")
        .building_number("1")
        .country("CH")
        .account("CH4431999123000889012")
        .build();
    let debtor = PartyBuilder::new("Kunde AG", "Marktgasse", "9400", "Rorschach")
        .building_number("28")
        .country("CH")
        .build();

    let mut builder = InvoiceRequestBuilder::new("BENCH-001", creditor)
        .debtor(debtor)
        .vat(dec!(8.1))
        .reference("210000000003139471430009017")
        .message("Benchmark");
    for i in 1..=rows {
        builder = builder.row(
            LineItem::new("2", format!("Service item {i}"), "CHF 1'234.50").position(i.to_string()),
        );
    }
    builder.build()
}

fn render(request: &InvoiceRequest) -> Vec<u8> {
    let amounts = reconcile(request, ValidationPolicy::Derive).unwrap();
    let debtor = EffectiveDebtor::resolve(request.debtor.as_ref());
    let bill = QrBill::from_request(request, &amounts, &debtor).checked().unwrap();
    render_invoice(
        request,
        &amounts,
        &debtor,
        &bill,
        &LayoutOptions::default(),
        test_date(),
    )
    .unwrap()
}

fn bench_parse_money(c: &mut Criterion) {
    c.bench_function("parse_money", |b| {
        b.iter(|| black_box(parse_money(black_box("CHF 1'234'567.89"))));
    });
}

fn bench_reconcile(c: &mut Criterion) {
    let request = build_request(100);
    c.bench_function("reconcile_100_rows", |b| {
        b.iter(|| black_box(reconcile(black_box(&request), ValidationPolicy::Derive)));
    });
}

fn bench_payload(c: &mut Criterion) {
    let request = build_request(10);
    let amounts = reconcile(&request, ValidationPolicy::Derive).unwrap();
    let debtor = EffectiveDebtor::resolve(request.debtor.as_ref());
    let bill = QrBill::from_request(&request, &amounts, &debtor);
    c.bench_function("qr_payload_and_validate", |b| {
        b.iter(|| {
            black_box(bill.validate());
            black_box(bill.payload())
        });
    });
}

fn bench_render(c: &mut Criterion) {
    let small = build_request(10);
    c.bench_function("render_10_rows", |b| {
        b.iter(|| black_box(render(black_box(&small))));
    });

    let large = build_request(200);
    c.bench_function("render_200_rows", |b| {
        b.iter(|| black_box(render(black_box(&large))));
    });
}

criterion_group!(
    benches,
    bench_parse_money,
    bench_reconcile,
    bench_payload,
    bench_render,
);
criterion_main!(benches);
