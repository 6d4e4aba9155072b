//! Application state for the offer API

use anyhow::Result;
use contract_engine::ContractFormFiller;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::path::PathBuf;

pub struct AppState {
    pub db: SqlitePool,
    pub engine: ContractFormFiller,
    pub offers_dir: PathBuf,
    pub notification_email: Option<String>,
}

impl AppState {
    /// Build state from environment variables (`DATABASE_URL`,
    /// `TEMPLATES_DIR`, `OFFERS_DIR`, `NOTIFICATION_EMAIL`)
    pub async fn new() -> Result<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:offer-api.db?mode=rwc".to_string());
        let templates_dir =
            std::env::var("TEMPLATES_DIR").unwrap_or_else(|_| "templates".to_string());
        let offers_dir = std::env::var("OFFERS_DIR").unwrap_or_else(|_| "offers".to_string());
        let notification_email = std::env::var("NOTIFICATION_EMAIL").ok();

        Self::with_options(
            &database_url,
            templates_dir.into(),
            offers_dir.into(),
            notification_email,
        )
        .await
    }

    pub async fn with_options(
        database_url: &str,
        templates_dir: PathBuf,
        offers_dir: PathBuf,
        notification_email: Option<String>,
    ) -> Result<Self> {
        tracing::info!("Connecting to database: {}", database_url);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        Self::run_migrations(&pool).await?;

        let engine = ContractFormFiller::new(&templates_dir);

        // One-time mapping/template consistency check; a state with no
        // provisioned templates is expected, field drift is not
        for issue in engine.validate_mappings() {
            tracing::warn!("contract mapping check: {}", issue);
        }

        Ok(Self {
            db: pool,
            engine,
            offers_dir,
            notification_email,
        })
    }

    async fn run_migrations(pool: &SqlitePool) -> Result<()> {
        tracing::info!("Running database migrations...");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS properties (
                id TEXT PRIMARY KEY,
                address TEXT NOT NULL,
                city TEXT NOT NULL,
                state TEXT NOT NULL,
                zip_code TEXT NOT NULL,
                property_type TEXT,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS offers (
                id TEXT PRIMARY KEY,
                property_id TEXT NOT NULL REFERENCES properties(id) ON DELETE CASCADE,
                offer_price REAL NOT NULL,
                financing_type TEXT,
                closing_date TEXT,
                earnest_money REAL,
                option_fee REAL,
                seller_credits REAL,
                additional_notes TEXT,
                buyer_name TEXT,
                buyer_email TEXT,
                buyer_phone TEXT,
                seller_name TEXT,
                mls_number TEXT,
                listing_agent_name TEXT,
                listing_agent_email TEXT,
                listing_agent_phone TEXT,
                status TEXT NOT NULL DEFAULT 'awaiting_letter',
                letter_url TEXT,
                notification_sent INTEGER NOT NULL DEFAULT 0,
                notification_sent_at TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS payments (
                id TEXT PRIMARY KEY,
                offer_id TEXT NOT NULL REFERENCES offers(id) ON DELETE CASCADE,
                amount REAL NOT NULL,
                payment_type TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'pending',
                processor_reference TEXT,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        // Indexes for the hot lookups
        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_offers_property ON offers(property_id)
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_payments_offer ON payments(offer_id, status)
            "#,
        )
        .execute(pool)
        .await?;

        tracing::info!("Migrations complete");
        Ok(())
    }
}
