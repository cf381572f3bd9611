//! Core request types, money handling and amount reconciliation.
//!
//! This module has no rendering dependencies: it turns a caller's JSON
//! request into checked amounts and an effective debtor.

mod builder;
pub mod countries;
mod error;
pub mod money;
mod parties;
mod reconcile;
mod types;

pub use builder::*;
pub use error::*;
pub use parties::*;
pub use reconcile::*;
pub use types::*;
