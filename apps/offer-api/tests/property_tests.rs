//! Property-based tests for offer-api
//!
//! Tests the API models and validation logic using proptest.

use proptest::prelude::*;

// ============================================================
// Offer ID Validation
// ============================================================

/// Valid offer IDs are UUIDs (36 characters with hyphens)
fn valid_offer_id() -> impl Strategy<Value = String> {
    "[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // ============================================================
    // Offer ID Tests
    // ============================================================

    #[test]
    fn valid_offer_ids_are_36_chars(id in valid_offer_id()) {
        prop_assert_eq!(id.len(), 36);
        prop_assert!(id.chars().all(|c| c.is_ascii_hexdigit() || c == '-'));
    }

    #[test]
    fn letter_filenames_follow_the_offer_id(id in valid_offer_id()) {
        let filename = format!("offer-{}.pdf", id);
        let pattern = regex::Regex::new(
            r"^offer-[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}\.pdf$"
        ).unwrap();
        prop_assert!(pattern.is_match(&filename));
    }

    // ============================================================
    // Address Field Tests
    // ============================================================

    #[test]
    fn state_codes_are_two_letters(code in "[A-Z]{2}") {
        prop_assert_eq!(code.len(), 2);
        prop_assert!(code.chars().all(|c| c.is_ascii_uppercase()));
    }

    #[test]
    fn zip_codes_are_five_digits(zip in "[0-9]{5}") {
        prop_assert_eq!(zip.len(), 5);
        prop_assert!(zip.parse::<u32>().is_ok());
    }

    // ============================================================
    // Money Tests
    // ============================================================

    #[test]
    fn offer_prices_are_non_negative(price in 0.0f64..1e9) {
        prop_assert!(price >= 0.0);
    }

    #[test]
    fn payment_amounts_round_trip_through_json(amount in 0.01f64..100000.0) {
        let encoded = serde_json::json!({ "amount": amount });
        let decoded = encoded["amount"].as_f64().unwrap();
        prop_assert_eq!(amount, decoded);
    }

    // ============================================================
    // Status Tests
    // ============================================================

    #[test]
    fn offer_status_values_are_valid(
        status in prop_oneof![
            Just("awaiting_letter"),
            Just("generated"),
            Just("downloaded"),
            Just("completed")
        ]
    ) {
        prop_assert!(!status.is_empty());
        prop_assert!(status.chars().all(|c| c.is_ascii_lowercase() || c == '_'));

        let valid = ["awaiting_letter", "generated", "downloaded", "completed"];
        prop_assert!(valid.contains(&status));
    }

    #[test]
    fn download_unlocking_payment_types_are_recognized(
        payment_type in prop_oneof![
            Just("single_download"),
            Just("single_download_with_review")
        ]
    ) {
        let unlocking = ["single_download", "single_download_with_review"];
        prop_assert!(unlocking.contains(&payment_type));
    }

    // ============================================================
    // Timestamp Tests
    // ============================================================

    #[test]
    fn timestamp_format_is_iso8601(
        year in 2020i32..2030,
        month in 1u32..13,
        day in 1u32..29,
        hour in 0u32..24,
        minute in 0u32..60,
        second in 0u32..60
    ) {
        let timestamp = format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
            year, month, day, hour, minute, second
        );
        prop_assert!(timestamp.len() == 20);
        prop_assert!(timestamp.ends_with('Z'));
        prop_assert!(timestamp.contains('T'));
    }

    // ============================================================
    // PDF Data Tests
    // ============================================================

    #[test]
    fn pdf_magic_bytes_check(
        rest in proptest::collection::vec(any::<u8>(), 0..100)
    ) {
        // PDF files start with %PDF-
        let mut pdf_data = vec![0x25, 0x50, 0x44, 0x46, 0x2D]; // %PDF-
        pdf_data.extend(rest);

        prop_assert!(pdf_data.len() >= 5);
        prop_assert_eq!(&pdf_data[0..5], b"%PDF-");
    }

    // ============================================================
    // Error Response Tests
    // ============================================================

    #[test]
    fn http_status_codes_are_valid(
        status in prop_oneof![
            Just(200u16), // OK
            Just(400u16), // Bad Request
            Just(403u16), // Forbidden (payment required)
            Just(404u16), // Not Found (offer, or letter not yet available)
            Just(500u16), // Internal Server Error
        ]
    ) {
        prop_assert!(status >= 100 && status < 600);
    }
}

// ============================================================
// Unit Tests (non-property)
// ============================================================

#[cfg(test)]
mod unit_tests {
    use offer_types::{OfferStatus, PaymentType};

    #[test]
    fn test_offer_status_display_matches_storage() {
        assert_eq!(OfferStatus::AwaitingLetter.to_string(), "awaiting_letter");
        assert_eq!(OfferStatus::Generated.to_string(), "generated");
    }

    #[test]
    fn test_download_gate_payment_types() {
        assert!(PaymentType::SingleDownload.unlocks_download());
        assert!(PaymentType::SingleDownloadWithReview.unlocks_download());
        assert!(!PaymentType::AgentReviewOnly.unlocks_download());
    }
}
