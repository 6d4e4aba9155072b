//! Offer notification delivery
//!
//! The notification boundary is a structured-log sender: actual provider
//! integration is handled outside this service. Sending is skipped when
//! no notification address is configured, and callers treat failure as
//! non-fatal.

use anyhow::Result;

/// Data for the offer-created notification
#[derive(Debug, Clone)]
pub struct OfferNotificationData {
    pub offer_id: String,
    pub property_address: String,
    pub offer_price: f64,
    pub financing_type: Option<String>,
    pub buyer_email: Option<String>,
}

pub async fn send_offer_notification(
    notification_email: Option<&str>,
    data: &OfferNotificationData,
) -> Result<()> {
    let to = match notification_email {
        Some(to) => to,
        None => {
            tracing::warn!("NOTIFICATION_EMAIL not set, skipping offer notification");
            return Ok(());
        }
    };

    tracing::info!(
        to = %to,
        offer_id = %data.offer_id,
        property = %data.property_address,
        price = data.offer_price,
        financing = data.financing_type.as_deref().unwrap_or("unspecified"),
        buyer = data.buyer_email.as_deref().unwrap_or("unknown"),
        "offer notification"
    );

    Ok(())
}
