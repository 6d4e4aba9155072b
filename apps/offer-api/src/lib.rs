//! Offer API server - backend for payment-gated offer letters
//!
//! Provides REST endpoints for:
//! - Offer creation with best-effort letter generation
//! - Offer lookup
//! - Payment-gated letter download
//! - Payment confirmation from the processor boundary

pub mod email;
pub mod error;
pub mod handlers;
pub mod models;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use state::AppState;

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    // CORS configuration for web clients
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // Offer endpoints
        .route("/api/offer/create", post(handlers::create_offer))
        .route("/api/offer/:id", get(handlers::get_offer))
        .route("/api/offer/:id/download", get(handlers::download_offer))
        // Payment boundary
        .route("/api/payment/confirm", post(handlers::confirm_payment))
        // Add middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
