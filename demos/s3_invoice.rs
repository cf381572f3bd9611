use std::sync::Arc;

use swissbill::handler::{Event, HandlerConfig, InvoiceHandler, S3Store};

/// Reads the request body from the first argument (or stdin), uploads the
/// invoice with the `SWISSBILL_*` settings and prints the download link.
#[tokio::main]
async fn main() {
    swissbill::telemetry::init();

    let body = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(path).expect("read request file"),
        None => std::io::read_to_string(std::io::stdin()).expect("read stdin"),
    };

    let config = match HandlerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };
    let store = Arc::new(S3Store::from_env().await);
    let handler = InvoiceHandler::with_store(config, store);

    let response = handler.handle(&Event::from_text(body)).await;
    println!("{}", response.body);
    if !response.is_success() {
        std::process::exit(1);
    }
}
