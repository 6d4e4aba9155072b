/// Normalized offer record consumed by the contract engine.
///
/// Assembled once per offer-creation request from the request payload plus
/// the resolved property and buyer records, and discarded after the letter
/// bytes are produced.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct OfferData {
    pub property_address: String,
    pub city: String,
    /// Two-letter state code, e.g. "TX"
    pub state: String,
    pub zip_code: String,
    pub offer_price: f64,
    /// YYYY-MM-DD; an empty or malformed value degrades to raw passthrough
    pub closing_date: String,
    #[serde(default)]
    pub financing_type: Option<String>,
    #[serde(default)]
    pub buyer_name: Option<String>,
    #[serde(default)]
    pub buyer_email: Option<String>,
    #[serde(default)]
    pub buyer_phone: Option<String>,
    #[serde(default)]
    pub mls_number: Option<String>,
    #[serde(default)]
    pub listing_agent_name: Option<String>,
    #[serde(default)]
    pub listing_agent_email: Option<String>,
    #[serde(default)]
    pub listing_agent_phone: Option<String>,
    #[serde(default)]
    pub seller_credits: Option<f64>,
    #[serde(default)]
    pub additional_notes: Option<String>,
    #[serde(default)]
    pub earnest_money: Option<f64>,
    #[serde(default)]
    pub option_fee: Option<f64>,
    #[serde(default)]
    pub seller_name: Option<String>,
}

/// Offer lifecycle status
///
/// An offer starts `AwaitingLetter` and moves to `Generated` once the
/// filled letter bytes are persisted. Generation failure leaves the offer
/// `AwaitingLetter` with no letter artifact; it is not retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferStatus {
    AwaitingLetter,
    Generated,
    Downloaded,
    Completed,
}

impl std::fmt::Display for OfferStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OfferStatus::AwaitingLetter => write!(f, "awaiting_letter"),
            OfferStatus::Generated => write!(f, "generated"),
            OfferStatus::Downloaded => write!(f, "downloaded"),
            OfferStatus::Completed => write!(f, "completed"),
        }
    }
}

impl OfferStatus {
    pub fn parse(s: &str) -> Self {
        match s {
            "generated" => OfferStatus::Generated,
            "downloaded" => OfferStatus::Downloaded,
            "completed" => OfferStatus::Completed,
            _ => OfferStatus::AwaitingLetter,
        }
    }
}

/// Payment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Processing,
    Completed,
    Failed,
    Refunded,
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Pending => write!(f, "pending"),
            PaymentStatus::Processing => write!(f, "processing"),
            PaymentStatus::Completed => write!(f, "completed"),
            PaymentStatus::Failed => write!(f, "failed"),
            PaymentStatus::Refunded => write!(f, "refunded"),
        }
    }
}

/// Purchased product tier attached to a payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    SingleDownload,
    SingleDownloadWithReview,
    AgentReviewOnly,
    MonthlySubscription,
}

impl std::fmt::Display for PaymentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentType::SingleDownload => write!(f, "single_download"),
            PaymentType::SingleDownloadWithReview => write!(f, "single_download_with_review"),
            PaymentType::AgentReviewOnly => write!(f, "agent_review_only"),
            PaymentType::MonthlySubscription => write!(f, "monthly_subscription"),
        }
    }
}

impl PaymentType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "single_download" => Some(PaymentType::SingleDownload),
            "single_download_with_review" => Some(PaymentType::SingleDownloadWithReview),
            "agent_review_only" => Some(PaymentType::AgentReviewOnly),
            "monthly_subscription" => Some(PaymentType::MonthlySubscription),
            _ => None,
        }
    }

    /// Whether this purchase unlocks the letter download
    pub fn unlocks_download(&self) -> bool {
        matches!(
            self,
            PaymentType::SingleDownload | PaymentType::SingleDownloadWithReview
        )
    }
}
