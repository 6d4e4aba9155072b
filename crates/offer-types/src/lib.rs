//! Shared domain types for the offer-letter monolith
//!
//! Records exchanged between the contract engine and the API layer.

pub mod types;

pub use types::{OfferData, OfferStatus, PaymentStatus, PaymentType};
