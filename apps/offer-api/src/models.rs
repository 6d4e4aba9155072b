//! Data models for the offer API

use chrono::{DateTime, Utc};
use offer_types::{OfferStatus, PaymentType};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Request to create a new offer
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOfferRequest {
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    #[serde(default)]
    pub property_type: Option<String>,
    pub offer_price: f64,
    #[serde(default)]
    pub financing_type: Option<String>,
    #[serde(default)]
    pub closing_date: Option<String>,
    #[serde(default)]
    pub earnest_money: Option<f64>,
    #[serde(default)]
    pub option_fee: Option<f64>,
    #[serde(default)]
    pub seller_credits: Option<f64>,
    #[serde(default)]
    pub additional_notes: Option<String>,
    #[serde(default)]
    pub buyer_name: Option<String>,
    #[serde(default)]
    pub buyer_email: Option<String>,
    #[serde(default)]
    pub buyer_phone: Option<String>,
    #[serde(default)]
    pub seller_name: Option<String>,
    #[serde(default)]
    pub mls_number: Option<String>,
    #[serde(default)]
    pub listing_agent_name: Option<String>,
    #[serde(default)]
    pub listing_agent_email: Option<String>,
    #[serde(default)]
    pub listing_agent_phone: Option<String>,
}

/// Response from offer creation; the letter may still be generating or
/// may have failed without affecting the created offer
#[derive(Debug, Clone, Serialize)]
pub struct CreateOfferResponse {
    pub offer_id: String,
}

/// Property details nested in an offer response
#[derive(Debug, Clone, Serialize)]
pub struct PropertyResponse {
    pub id: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub property_type: Option<String>,
}

/// Offer with its property, as served by the API
#[derive(Debug, Clone, Serialize)]
pub struct OfferResponse {
    pub id: String,
    pub status: OfferStatus,
    pub offer_price: f64,
    pub financing_type: Option<String>,
    pub closing_date: Option<String>,
    pub letter_url: Option<String>,
    pub property: PropertyResponse,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payment confirmation posted by the (out-of-scope) payment processor
/// integration once a checkout completes
#[derive(Debug, Clone, Deserialize)]
pub struct ConfirmPaymentRequest {
    pub offer_id: String,
    pub payment_type: PaymentType,
    pub amount: f64,
    #[serde(default)]
    pub processor_reference: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfirmPaymentResponse {
    pub payment_id: String,
    pub status: String,
}

/// Offer row joined with its property
#[derive(Debug, Clone, FromRow)]
pub struct DbOfferWithProperty {
    pub id: String,
    pub status: String,
    pub offer_price: f64,
    pub financing_type: Option<String>,
    pub closing_date: Option<String>,
    pub letter_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub property_id: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub property_type: Option<String>,
}

impl DbOfferWithProperty {
    pub fn into_response(self) -> OfferResponse {
        OfferResponse {
            id: self.id,
            status: OfferStatus::parse(&self.status),
            offer_price: self.offer_price,
            financing_type: self.financing_type,
            closing_date: self.closing_date,
            letter_url: self.letter_url,
            property: PropertyResponse {
                id: self.property_id,
                address: self.address,
                city: self.city,
                state: self.state,
                zip_code: self.zip_code,
                property_type: self.property_type,
            },
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
