//! Request handling: event and response wire types, configuration, object
//! storage and the pipeline that ties them to reconciliation and rendering.
//!
//! ```rust
//! use swissbill::handler::{Event, HandlerConfig, InvoiceHandler};
//!
//! # let runtime = tokio::runtime::Runtime::new().unwrap();
//! # runtime.block_on(async {
//! let handler = InvoiceHandler::new(HandlerConfig::derive_inline());
//! let response = handler.handle(&Event::from_text("{")).await;
//! assert_eq!(response.status_code, 400);
//! # });
//! ```

mod config;
mod event;
mod pipeline;
mod store;

#[cfg(feature = "s3")]
mod s3;

pub use config::{
    DEFAULT_BUCKET, DEFAULT_FILENAME, DEFAULT_KEY, DEFAULT_URL_EXPIRY, HandlerConfig,
    OutputChannel,
};
pub use event::{Event, Response, parse_request};
pub use pipeline::InvoiceHandler;
pub use store::{MemoryStore, ObjectStore, StoredObject};

#[cfg(feature = "s3")]
pub use s3::S3Store;
