//! # swissbill
//!
//! Swiss QR-bill invoices from JSON requests: amount reconciliation with VAT,
//! an itemized letter and the payment part with QR code, delivered as a
//! presigned object-storage link or inline as base64.
//!
//! All monetary values use [`rust_decimal::Decimal`]. Row totals arrive as
//! text such as `"CHF 1'200.00"` and are parsed strictly; anything the parser
//! does not understand is rejected instead of guessed.
//!
//! ## Quick Start
//!
//! ```rust
//! use swissbill::core::*;
//! use rust_decimal_macros::dec;
//!
//! let creditor = PartyBuilder::new("Muster SA", "Rue du Lac", "1000", "Lausanne")
//!     .building_number("1")
//!     .account("CH4431999123000889012")
//!     .build();
//! let request = InvoiceRequestBuilder::new("2024-17", creditor)
//!     .row(LineItem::new("1", "Conseil", "CHF 40.00"))
//!     .row(LineItem::new("2", "Déplacement", "CHF 20.00"))
//!     .vat(dec!(7.7))
//!     .amount(dec!(64.62))
//!     .build();
//!
//! let amounts = reconcile(&request, ValidationPolicy::Strict).unwrap();
//! assert_eq!(amounts.vat_amount, dec!(4.62));
//! assert_eq!(amounts.grand_total, dec!(64.62));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` | Request types, money parsing, reconciliation, QR-bill data and payload |
//! | `pdf` | PDF rendering with the payment part (lopdf, qrcode) |
//! | `handler` (default) | Event/response types, configuration, pipeline, in-memory store |
//! | `s3` | `S3Store` on the AWS SDK |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "core")]
pub mod qrbill;

#[cfg(feature = "pdf")]
pub mod pdf;

#[cfg(feature = "handler")]
pub mod handler;

pub mod telemetry;

#[cfg(feature = "core")]
pub use crate::core::*;
