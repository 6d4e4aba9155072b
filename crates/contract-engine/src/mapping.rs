//! Field mapping builder
//!
//! Renders an [`OfferData`] through a jurisdiction's [`FieldTable`] into
//! the concrete `field name -> value` map written onto the template. Built
//! freshly per request, never persisted.

use std::collections::BTreeMap;

use offer_types::OfferData;

use crate::format;
use crate::registry::{FieldTable, LogicalRole};

/// Earnest money written when the offer does not specify one
pub const DEFAULT_EARNEST_MONEY: f64 = 1000.0;

/// Template field name -> rendered value
///
/// Entries that would render empty are omitted entirely: an absent key is
/// a no-op during the fill, leaving the form's default blank.
pub type FieldMapping = BTreeMap<String, String>;

/// Build the field mapping for one offer against one field table.
pub fn build_field_mapping(offer: &OfferData, table: &FieldTable) -> FieldMapping {
    let mut mapping = FieldMapping::new();
    for (role, field_name) in table.entries() {
        if let Some(value) = render_role(offer, role) {
            if !value.is_empty() {
                mapping.insert(field_name.to_string(), value);
            }
        }
    }
    mapping
}

/// Composed address string repeated across the form's page headers
pub fn full_address(offer: &OfferData) -> String {
    format!(
        "{}, {}, {} {}",
        offer.property_address, offer.city, offer.state, offer.zip_code
    )
}

fn render_role(offer: &OfferData, role: LogicalRole) -> Option<String> {
    match role {
        LogicalRole::BuyerName => offer.buyer_name.clone(),
        LogicalRole::SellerName => offer.seller_name.clone(),
        LogicalRole::StreetAddress => Some(offer.property_address.clone()),
        LogicalRole::City => Some(offer.city.clone()),
        LogicalRole::FullAddress => Some(full_address(offer)),
        LogicalRole::ClosingMonthDay => {
            Some(format::closing_date_parts(&offer.closing_date).0)
        }
        LogicalRole::ClosingYear => Some(format::closing_date_parts(&offer.closing_date).1),
        LogicalRole::EarnestMoney => Some(format::currency(
            offer.earnest_money.unwrap_or(DEFAULT_EARNEST_MONEY),
        )),
        // Only rendered when a non-zero credit was negotiated
        LogicalRole::SellerCredits => offer
            .seller_credits
            .filter(|credits| *credits != 0.0)
            .map(format::currency),
        LogicalRole::BuyerEmail => offer.buyer_email.clone(),
        LogicalRole::ListingAgentName => offer.listing_agent_name.clone(),
        LogicalRole::ListingAgentEmail => offer.listing_agent_email.clone(),
        LogicalRole::ListingAgentPhone => offer.listing_agent_phone.clone(),
    }
}
