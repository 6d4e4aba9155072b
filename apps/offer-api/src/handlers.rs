//! HTTP handlers for the offer API

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use offer_types::{OfferData, OfferStatus, PaymentStatus};

use crate::email::{self, OfferNotificationData};
use crate::error::ApiError;
use crate::models::*;
use crate::state::AppState;

/// Health check endpoint
pub async fn health() -> &'static str {
    "OK"
}

/// Create a new offer
///
/// Creates the property if it doesn't exist, then generates the offer
/// letter and sends the notification. Letter generation and notification
/// are best-effort: their failure is logged and the offer is still
/// created.
pub async fn create_offer(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateOfferRequest>,
) -> Result<Json<CreateOfferResponse>, ApiError> {
    for (field, value) in [
        ("address", &req.address),
        ("city", &req.city),
        ("state", &req.state),
        ("zip_code", &req.zip_code),
    ] {
        if value.trim().is_empty() {
            return Err(ApiError::InvalidRequest(format!("{} is required", field)));
        }
    }

    let now = Utc::now();

    // Find or create the property
    let existing: Option<String> = sqlx::query_scalar(
        r#"
        SELECT id FROM properties
        WHERE address = ? AND city = ? AND state = ? AND zip_code = ? AND property_type IS ?
        "#,
    )
    .bind(&req.address)
    .bind(&req.city)
    .bind(&req.state)
    .bind(&req.zip_code)
    .bind(&req.property_type)
    .fetch_optional(&state.db)
    .await?;

    let property_id = match existing {
        Some(id) => id,
        None => {
            let id = Uuid::new_v4().to_string();
            sqlx::query(
                r#"
                INSERT INTO properties (id, address, city, state, zip_code, property_type, created_at)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&id)
            .bind(&req.address)
            .bind(&req.city)
            .bind(&req.state)
            .bind(&req.zip_code)
            .bind(&req.property_type)
            .bind(now.to_rfc3339())
            .execute(&state.db)
            .await?;
            id
        }
    };

    // Create the offer, awaiting its letter
    let offer_id = Uuid::new_v4().to_string();
    sqlx::query(
        r#"
        INSERT INTO offers (
            id, property_id, offer_price, financing_type, closing_date,
            earnest_money, option_fee, seller_credits, additional_notes,
            buyer_name, buyer_email, buyer_phone, seller_name, mls_number,
            listing_agent_name, listing_agent_email, listing_agent_phone,
            status, created_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&offer_id)
    .bind(&property_id)
    .bind(req.offer_price)
    .bind(&req.financing_type)
    .bind(&req.closing_date)
    .bind(req.earnest_money)
    .bind(req.option_fee)
    .bind(req.seller_credits)
    .bind(&req.additional_notes)
    .bind(&req.buyer_name)
    .bind(&req.buyer_email)
    .bind(&req.buyer_phone)
    .bind(&req.seller_name)
    .bind(&req.mls_number)
    .bind(&req.listing_agent_name)
    .bind(&req.listing_agent_email)
    .bind(&req.listing_agent_phone)
    .bind(OfferStatus::AwaitingLetter.to_string())
    .bind(now.to_rfc3339())
    .bind(now.to_rfc3339())
    .execute(&state.db)
    .await?;

    tracing::info!("Created offer: {}", offer_id);

    // Generate the letter; failure leaves the offer without one
    let offer_data = OfferData {
        property_address: req.address.clone(),
        city: req.city.clone(),
        state: req.state.clone(),
        zip_code: req.zip_code.clone(),
        offer_price: req.offer_price,
        closing_date: req.closing_date.clone().unwrap_or_default(),
        financing_type: req.financing_type.clone(),
        buyer_name: req.buyer_name.clone(),
        buyer_email: req.buyer_email.clone(),
        buyer_phone: req.buyer_phone.clone(),
        mls_number: req.mls_number.clone(),
        listing_agent_name: req.listing_agent_name.clone(),
        listing_agent_email: req.listing_agent_email.clone(),
        listing_agent_phone: req.listing_agent_phone.clone(),
        seller_credits: req.seller_credits,
        additional_notes: req.additional_notes.clone(),
        earnest_money: req.earnest_money,
        option_fee: req.option_fee,
        seller_name: req.seller_name.clone(),
    };
    match generate_letter(&state, &offer_id, offer_data, req.property_type.clone()).await {
        Ok(letter_url) => {
            tracing::info!(offer_id = %offer_id, letter_url = %letter_url, "offer letter generated");
        }
        Err(e) => {
            tracing::error!(offer_id = %offer_id, "Error generating offer letter: {:#}", e);
        }
    }

    // Send the notification; failure never blocks offer creation
    let notification = OfferNotificationData {
        offer_id: offer_id.clone(),
        property_address: req.address.clone(),
        offer_price: req.offer_price,
        financing_type: req.financing_type.clone(),
        buyer_email: req.buyer_email.clone(),
    };
    match email::send_offer_notification(state.notification_email.as_deref(), &notification).await
    {
        Ok(()) => {
            sqlx::query(
                "UPDATE offers SET notification_sent = 1, notification_sent_at = ? WHERE id = ?",
            )
            .bind(Utc::now().to_rfc3339())
            .bind(&offer_id)
            .execute(&state.db)
            .await?;
        }
        Err(e) => {
            tracing::error!("Failed to send offer notification: {}", e);
        }
    }

    Ok(Json(CreateOfferResponse { offer_id }))
}

/// Fill and persist the letter for an offer, moving it to `generated`
async fn generate_letter(
    state: &AppState,
    offer_id: &str,
    offer: OfferData,
    property_type: Option<String>,
) -> anyhow::Result<String> {
    let engine = state.engine.clone();
    let letter =
        tokio::task::spawn_blocking(move || engine.generate(&offer, property_type.as_deref()))
            .await??;

    if !letter.report.unmatched.is_empty() {
        tracing::warn!(
            offer_id = %offer_id,
            fields = ?letter.report.unmatched,
            "letter generated with unmatched template fields"
        );
    }

    tokio::fs::create_dir_all(&state.offers_dir).await?;
    let filename = format!("offer-{}.pdf", offer_id);
    tokio::fs::write(state.offers_dir.join(&filename), &letter.bytes).await?;

    let letter_url = format!("/offers/{}", filename);
    sqlx::query("UPDATE offers SET letter_url = ?, status = ?, updated_at = ? WHERE id = ?")
        .bind(&letter_url)
        .bind(OfferStatus::Generated.to_string())
        .bind(Utc::now().to_rfc3339())
        .bind(offer_id)
        .execute(&state.db)
        .await?;

    Ok(letter_url)
}

/// Get offer by ID with property details
pub async fn get_offer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<OfferResponse>, ApiError> {
    let offer = fetch_offer(&state, &id)
        .await?
        .ok_or_else(|| ApiError::OfferNotFound(id.clone()))?;

    Ok(Json(offer.into_response()))
}

/// Download the offer letter PDF
///
/// Requires a completed download-unlocking payment for this offer. An
/// offer that never got a letter reports "not yet available" rather than
/// a server error.
pub async fn download_offer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<(StatusCode, [(String, String); 2], Vec<u8>), ApiError> {
    let offer = fetch_offer(&state, &id)
        .await?
        .ok_or_else(|| ApiError::OfferNotFound(id.clone()))?;

    let paid_downloads: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*) FROM payments
        WHERE offer_id = ? AND status = 'completed'
          AND payment_type IN ('single_download', 'single_download_with_review')
        "#,
    )
    .bind(&id)
    .fetch_one(&state.db)
    .await?;

    if paid_downloads == 0 {
        return Err(ApiError::PaymentRequired);
    }

    let letter_url = offer.letter_url.ok_or(ApiError::LetterNotReady)?;
    let filename = letter_url.rsplit('/').next().unwrap_or_default();
    let path = state.offers_dir.join(filename);

    let bytes = tokio::fs::read(&path).await.map_err(|e| {
        tracing::error!(offer_id = %id, path = %path.display(), "letter file unreadable: {}", e);
        ApiError::LetterFileMissing
    })?;

    Ok((
        StatusCode::OK,
        [
            ("Content-Type".to_string(), "application/pdf".to_string()),
            (
                "Content-Disposition".to_string(),
                format!("attachment; filename=\"offer-letter-{}.pdf\"", id),
            ),
        ],
        bytes,
    ))
}

/// Record a completed payment for an offer
///
/// Boundary endpoint for the out-of-scope payment-processor integration;
/// called once a checkout completes.
pub async fn confirm_payment(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ConfirmPaymentRequest>,
) -> Result<Json<ConfirmPaymentResponse>, ApiError> {
    let offer: Option<String> = sqlx::query_scalar("SELECT id FROM offers WHERE id = ?")
        .bind(&req.offer_id)
        .fetch_optional(&state.db)
        .await?;
    offer.ok_or_else(|| ApiError::OfferNotFound(req.offer_id.clone()))?;

    let payment_id = Uuid::new_v4().to_string();
    let status = PaymentStatus::Completed;
    sqlx::query(
        r#"
        INSERT INTO payments (id, offer_id, amount, payment_type, status, processor_reference, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&payment_id)
    .bind(&req.offer_id)
    .bind(req.amount)
    .bind(req.payment_type.to_string())
    .bind(status.to_string())
    .bind(&req.processor_reference)
    .bind(Utc::now().to_rfc3339())
    .execute(&state.db)
    .await?;

    tracing::info!(
        "Recorded {} payment {} for offer {}",
        req.payment_type,
        payment_id,
        req.offer_id
    );

    Ok(Json(ConfirmPaymentResponse {
        payment_id,
        status: status.to_string(),
    }))
}

async fn fetch_offer(state: &AppState, id: &str) -> Result<Option<DbOfferWithProperty>, ApiError> {
    let offer: Option<DbOfferWithProperty> = sqlx::query_as(
        r#"
        SELECT o.id, o.status, o.offer_price, o.financing_type, o.closing_date,
               o.letter_url, o.created_at, o.updated_at,
               p.id AS property_id, p.address, p.city, p.state, p.zip_code, p.property_type
        FROM offers o
        JOIN properties p ON p.id = o.property_id
        WHERE o.id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(&state.db)
    .await?;

    Ok(offer)
}
