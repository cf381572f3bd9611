use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::json;
use swissbill::handler::{Event, HandlerConfig, InvoiceHandler};

#[tokio::main]
async fn main() {
    swissbill::telemetry::init();

    // Same body an HTTP gateway would pass through
    let body = json!({
        "creditor": {
            "name": "Muster SA",
            "address": "Rue du Lac",
            "buildingNumber": 1,
            "zip": 1000,
            "city": "Lausanne",
            "country": "CH",
            "account": "CH44 3199 9123 0008 8901 2"
        },
        "debtor": {
            "name": "Pia Rutschmann",
            "address": "Marktgasse",
            "buildingNumber": 28,
            "zip": 9400,
            "city": "Rorschach",
            "country": "CH"
        },
        "bill_number": "2024-17",
        "reference": "21 00000 00003 13947 14300 09017",
        "rows": [
            {"position": 1, "quantity": "8 h", "description": "Conseil", "total": "CHF 1'200.00"},
            {"position": 2, "quantity": "1", "description": "Frais de déplacement", "total": "CHF 85.50"}
        ],
        "vat": 8.1
    });

    let handler = InvoiceHandler::new(HandlerConfig::derive_inline());
    let response = handler.handle(&Event::from_text(body.to_string())).await;
    if !response.is_success() {
        eprintln!("Rejected ({}): {}", response.status_code, response.body);
        std::process::exit(1);
    }

    let pdf = STANDARD.decode(&response.body).expect("inline body is base64");
    std::fs::write("qr-bill.pdf", &pdf).expect("write qr-bill.pdf");
    println!("Wrote qr-bill.pdf ({} bytes)", pdf.len());
}
