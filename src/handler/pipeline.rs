use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::{debug, error, info, warn};

use super::config::{HandlerConfig, OutputChannel};
use super::event::{Event, Response};
use super::store::ObjectStore;
use crate::core::{BillError, EffectiveDebtor, reconcile};
use crate::pdf::render_invoice;
use crate::qrbill::QrBill;

const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Turns one event into one response: parse, reconcile, render, deliver.
///
/// Every failure ends up as a structured `{"error": ...}` response.
#[derive(Clone)]
pub struct InvoiceHandler {
    config: HandlerConfig,
    store: Option<Arc<dyn ObjectStore>>,
}

impl InvoiceHandler {
    /// A handler without object storage; enough for inline output.
    pub fn new(config: HandlerConfig) -> Self {
        Self {
            config,
            store: None,
        }
    }

    pub fn with_store(config: HandlerConfig, store: Arc<dyn ObjectStore>) -> Self {
        Self {
            config,
            store: Some(store),
        }
    }

    pub fn config(&self) -> &HandlerConfig {
        &self.config
    }

    /// Handle an event, dating the invoice today (local time).
    pub async fn handle(&self, event: &Event) -> Response {
        self.handle_on(event, Local::now().date_naive()).await
    }

    /// Handle an event as if it were `today`.
    pub async fn handle_on(&self, event: &Event, today: NaiveDate) -> Response {
        match self.process(event, today).await {
            Ok(response) => response,
            Err(e) => {
                match e.status_code() {
                    400 => warn!(error = %e, "request rejected"),
                    _ => error!(error = %e, "request failed"),
                }
                Response::error(&e)
            }
        }
    }

    async fn process(&self, event: &Event, today: NaiveDate) -> Result<Response, BillError> {
        let request = event.request()?;
        info!(
            bill_number = %request.bill_number,
            rows = request.rows.len(),
            "invoice request accepted"
        );

        let amounts = reconcile(&request, self.config.validation)?;
        debug!(
            line_sum = %amounts.line_sum,
            vat_amount = %amounts.vat_amount,
            grand_total = %amounts.grand_total,
            policy = ?self.config.validation,
            "amounts reconciled"
        );

        let debtor = EffectiveDebtor::resolve(request.debtor.as_ref());
        if debtor.is_partial() {
            warn!(
                bill_number = %request.bill_number,
                "incomplete debtor address left off the payment slip"
            );
        }

        let bill = QrBill::from_request(&request, &amounts, &debtor).checked()?;
        let pdf = render_invoice(
            &request,
            &amounts,
            &debtor,
            &bill,
            &self.config.layout,
            today,
        )?;
        self.deliver(pdf).await
    }

    async fn deliver(&self, pdf: Vec<u8>) -> Result<Response, BillError> {
        let size = pdf.len();
        let channel = self.config.output.name();
        let response = match &self.config.output {
            OutputChannel::StoreLink {
                bucket,
                key,
                expires_in,
            } => {
                let store = self.store.as_ref().ok_or_else(|| {
                    BillError::Config("store-link output requires an object store".into())
                })?;
                store.put(bucket, key, pdf, PDF_CONTENT_TYPE).await?;
                let url = store.presign_get(bucket, key, *expires_in).await?;
                Response::link(&url)
            }
            OutputChannel::Inline { filename } => Response::attachment(&pdf, filename),
        };
        info!(bytes = size, channel, "invoice delivered");
        Ok(response)
    }
}
