#![cfg(feature = "handler")]

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::NaiveDate;
use lopdf::Document;
use serde_json::{Value, json};
use swissbill::handler::*;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn body(rows: &[&str], vat: Option<f64>, amount: Option<f64>) -> Value {
    let mut body = json!({
        "creditor": {
            "name": "Muster SA",
            "address": "Rue du Lac",
            "buildingNumber": "1",
            "zip": "1000",
            "city": "Lausanne",
            "country": "CH",
            "account": "CH58 0079 1123 0008 8901 2"
        },
        "debtor": {
            "name": "Pia Rutschmann",
            "address": "Marktgasse",
            "buildingNumber": "28",
            "zip": "9400",
            "city": "Rorschach",
            "country": "CH"
        },
        "bill_number": "2024-17",
        "rows": rows
            .iter()
            .enumerate()
            .map(|(i, total)| json!({
                "position": i + 1,
                "quantity": "1",
                "description": format!("Prestation {}", i + 1),
                "total": total,
            }))
            .collect::<Vec<_>>(),
    });
    if let Some(vat) = vat {
        body["vat"] = json!(vat);
    }
    if let Some(amount) = amount {
        body["amount"] = json!(amount);
    }
    body
}

fn event(body: &Value) -> Event {
    Event::from_text(body.to_string())
}

fn error_of(response: &Response) -> String {
    let body: Value = serde_json::from_str(&response.body).unwrap();
    body["error"].as_str().unwrap().to_string()
}

fn pdf_text(pdf: &[u8]) -> String {
    let mut doc = Document::load_mem(pdf).unwrap();
    doc.decompress();
    doc.get_pages()
        .values()
        .map(|id| String::from_utf8_lossy(&doc.get_page_content(*id).unwrap()).into_owned())
        .collect()
}

fn strict_handler(store: &MemoryStore) -> InvoiceHandler {
    InvoiceHandler::with_store(HandlerConfig::strict_store_link(), Arc::new(store.clone()))
}

// --- Store link ---

#[tokio::test]
async fn strict_matching_amount_returns_link() {
    let store = MemoryStore::new();
    let handler = strict_handler(&store);
    let response = handler
        .handle_on(&event(&body(&["CHF 40.00", "CHF 20.00"], Some(7.7), Some(64.62))), today())
        .await;

    assert_eq!(response.status_code, 200, "{}", response.body);
    let body: Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(body["url"], "memory://swiss-qr-code/qr-bill.pdf?expires=300");
    assert!(response.headers.is_none());

    let object = store.get(DEFAULT_BUCKET, DEFAULT_KEY).await.unwrap();
    assert_eq!(object.content_type, "application/pdf");
    assert!(object.bytes.starts_with(b"%PDF-"));
}

#[tokio::test]
async fn strict_mismatch_is_rejected() {
    let store = MemoryStore::new();
    let handler = strict_handler(&store);
    let response = handler
        .handle_on(&event(&body(&["CHF 40.00", "CHF 20.00"], Some(7.7), Some(60.0))), today())
        .await;

    assert_eq!(response.status_code, 400);
    let error = error_of(&response);
    assert!(error.starts_with("Amount is not equal to taxAmount + sum"), "{error}");
    assert!(error.contains("60"));
    assert!(error.contains("4.62"));
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn storage_failure_is_500() {
    let store = MemoryStore::failing_put("bucket swiss-qr-code unavailable");
    let handler = strict_handler(&store);
    let response = handler
        .handle_on(&event(&body(&["60"], None, Some(60.0))), today())
        .await;

    assert_eq!(response.status_code, 500);
    assert_eq!(error_of(&response), "bucket swiss-qr-code unavailable");
}

#[tokio::test]
async fn presign_failure_is_500() {
    let store = MemoryStore::failing_presign("signing key expired");
    let handler = strict_handler(&store);
    let response = handler
        .handle_on(&event(&body(&["60"], None, Some(60.0))), today())
        .await;
    assert_eq!(response.status_code, 500);
    // The upload itself went through.
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn store_link_without_store_is_config_error() {
    let handler = InvoiceHandler::new(HandlerConfig::strict_store_link());
    let response = handler
        .handle_on(&event(&body(&["60"], None, Some(60.0))), today())
        .await;
    assert_eq!(response.status_code, 500);
    assert!(error_of(&response).starts_with("configuration error"));
}

// --- Inline ---

#[tokio::test]
async fn derive_inline_returns_pdf() {
    let handler = InvoiceHandler::new(HandlerConfig::derive_inline());
    let response = handler
        .handle_on(&event(&body(&["60", "40"], None, None)), today())
        .await;

    assert_eq!(response.status_code, 200);
    assert_eq!(response.is_base64_encoded, Some(true));
    let headers = response.headers.as_ref().unwrap();
    assert_eq!(headers["Content-Type"], "application/pdf");
    assert_eq!(
        headers["Content-Disposition"],
        "attachment; filename=\"qr-bill.pdf\""
    );

    let pdf = STANDARD.decode(&response.body).unwrap();
    assert!(pdf.starts_with(b"%PDF-"));
    let text = pdf_text(&pdf);
    assert!(text.contains("(CHF 100.00)"));
    assert!(text.contains("(100.00)"));
    assert!(text.contains("(Payable dans les 30 jours)"));
}

#[tokio::test]
async fn derive_ignores_wrong_caller_amount() {
    let handler = InvoiceHandler::new(HandlerConfig::derive_inline());
    let response = handler
        .handle_on(&event(&body(&["60"], Some(7.7), Some(1.0))), today())
        .await;
    assert_eq!(response.status_code, 200);
    let pdf = STANDARD.decode(&response.body).unwrap();
    assert!(pdf_text(&pdf).contains("(64.62)"));
}

#[tokio::test]
async fn debtor_without_country_stays_in_letter() {
    let mut request = body(&["60"], None, None);
    request["debtor"]
        .as_object_mut()
        .unwrap()
        .remove("country");

    let handler = InvoiceHandler::new(HandlerConfig::derive_inline());
    let response = handler.handle_on(&event(&request), today()).await;
    assert_eq!(response.status_code, 200);

    let text = pdf_text(&STANDARD.decode(&response.body).unwrap());
    assert_eq!(text.matches("(Pia Rutschmann)").count(), 1);
    assert_eq!(text.matches("(Marktgasse 28)").count(), 1);
}

#[tokio::test]
async fn object_body_is_accepted() {
    let handler = InvoiceHandler::new(HandlerConfig::derive_inline());
    let response = handler
        .handle_on(&Event::new(body(&["10"], None, None)), today())
        .await;
    assert_eq!(response.status_code, 200);
}

// --- Rejections ---

#[tokio::test]
async fn malformed_json() {
    let handler = InvoiceHandler::new(HandlerConfig::derive_inline());
    let response = handler.handle(&Event::from_text("{")).await;
    assert_eq!(response.status_code, 400);
    assert_eq!(response.body, r#"{"error":"Invalid JSON format"}"#);
}

#[tokio::test]
async fn missing_body() {
    let handler = InvoiceHandler::new(HandlerConfig::derive_inline());
    let response = handler.handle(&Event::default()).await;
    assert_eq!(response.status_code, 400);
    assert_eq!(response.body, r#"{"error":"No data provided"}"#);
}

#[tokio::test]
async fn wrong_shape() {
    let handler = InvoiceHandler::new(HandlerConfig::derive_inline());
    let response = handler
        .handle(&Event::from_text(r#"{"bill_number": "1", "rows": "none"}"#))
        .await;
    assert_eq!(response.status_code, 400);
    assert!(error_of(&response).starts_with("Invalid request: "));
}

#[tokio::test]
async fn unparseable_row_total() {
    let handler = InvoiceHandler::new(HandlerConfig::derive_inline());
    let response = handler
        .handle_on(&event(&body(&["60", "quarante"], None, None)), today())
        .await;
    assert_eq!(response.status_code, 400);
    assert!(error_of(&response).starts_with("rows[1].total: invalid money value 'quarante'"));
}

#[tokio::test]
async fn oversized_totals_are_rejected_not_panicking() {
    let max = "79228162514264337593543950335";
    let handler = InvoiceHandler::new(HandlerConfig::derive_inline());

    let response = handler
        .handle_on(&event(&body(&[max, max], None, None)), today())
        .await;
    assert_eq!(response.status_code, 400);
    assert_eq!(
        error_of(&response),
        "Invalid request: sum of row totals is out of range"
    );

    let response = handler
        .handle_on(&event(&body(&[max], Some(50.0), None)), today())
        .await;
    assert_eq!(response.status_code, 400);
    assert_eq!(error_of(&response), "Invalid request: vat amount is out of range");
}

#[tokio::test]
async fn invalid_account_is_validation_error() {
    let mut request = body(&["60"], None, None);
    request["creditor"]["account"] = json!("CH4431999123000889013");
    let handler = InvoiceHandler::new(HandlerConfig::derive_inline());
    let response = handler.handle_on(&event(&request), today()).await;
    assert_eq!(response.status_code, 400);
    assert!(error_of(&response).contains("creditor.account"));
}

#[tokio::test]
async fn event_deserializes_from_gateway_json() {
    let raw = json!({ "body": body(&["10"], None, None).to_string() });
    let event: Event = serde_json::from_value(raw).unwrap();
    let handler = InvoiceHandler::new(HandlerConfig::derive_inline());
    assert!(handler.handle_on(&event, today()).await.is_success());
}
