//! Texas contract field tables
//!
//! Field names are the literal AcroForm field names baked into the TREC
//! promulgated forms:
//! - One to Four Family Residential Contract (Resale), TREC No. 20-17
//! - Residential Condominium Contract (Resale), TREC No. 30-16
//!
//! The forms restate the property address in the page headers, so the
//! composed address repeats under several distinct field names. The
//! closing-date year is written as two digits after a preprinted "20",
//! which is also the field's name.

use crate::jurisdiction::PropertyCategory;
use crate::registry::{FieldTable, JurisdictionProfile, LogicalRole};

pub static PROFILE: JurisdictionProfile = JurisdictionProfile {
    state: "TX",
    single_family: FieldTable::new(PropertyCategory::SingleFamily, SINGLE_FAMILY_FIELDS),
    condo: FieldTable::new(PropertyCategory::Condo, CONDO_FIELDS),
};

const SINGLE_FAMILY_FIELDS: &[(LogicalRole, &str)] = &[
    // 1. Parties
    (
        LogicalRole::BuyerName,
        "1 PARTIES The parties to this contract are",
    ),
    (LogicalRole::SellerName, "Seller and"),
    // 2. Property: street address and city on the lot/block line
    (LogicalRole::StreetAddress, "Texas known as"),
    (LogicalRole::City, "Addition City of"),
    // Page-header address, repeated across the form
    (LogicalRole::FullAddress, "Address of Property"),
    (LogicalRole::FullAddress, "Address of Property_2"),
    (LogicalRole::FullAddress, "Contract Concerning"),
    (LogicalRole::FullAddress, "Contract Concerning_2"),
    (LogicalRole::FullAddress, "Contract Concerning_3"),
    (LogicalRole::FullAddress, "Contract Concerning_4"),
    // 9. Closing
    (
        LogicalRole::ClosingMonthDay,
        "A The closing of the sale will be on or before",
    ),
    (LogicalRole::ClosingYear, "20"),
    // 5. Earnest money
    (LogicalRole::EarnestMoney, "earnest money of"),
    // 12. Settlement: seller contribution to buyer's expenses
    (
        LogicalRole::SellerCredits,
        "Buyers Expenses as allowed by the lender",
    ),
    // Buyer contact block
    (LogicalRole::BuyerEmail, "Email"),
    // Broker information page
    (LogicalRole::ListingAgentName, "Listing Associates Name"),
    (
        LogicalRole::ListingAgentEmail,
        "Listing Associates Email Address",
    ),
    (LogicalRole::ListingAgentPhone, "Phone_3"),
];

const CONDO_FIELDS: &[(LogicalRole, &str)] = &[
    (
        LogicalRole::BuyerName,
        "1 PARTIES The parties to this contract are",
    ),
    // Unit address line names the city slot differently on the condo form
    (LogicalRole::City, "addresszip code City of"),
    (LogicalRole::FullAddress, "Address of Property"),
    (LogicalRole::FullAddress, "Address of Property_2"),
    (LogicalRole::FullAddress, "Address of Property_3"),
    (LogicalRole::FullAddress, "Contract Concerning"),
    (LogicalRole::FullAddress, "Contract Concerning_2"),
    (LogicalRole::FullAddress, "Contract Concerning_3"),
    (LogicalRole::FullAddress, "Contract Concerning_4"),
    (LogicalRole::FullAddress, "Contract Concerning_5"),
    (LogicalRole::ClosingYear, "20"),
    (LogicalRole::EarnestMoney, "as earnest money to"),
    (LogicalRole::BuyerEmail, "Email"),
    (LogicalRole::ListingAgentName, "Listing Associates Name"),
    (
        LogicalRole::ListingAgentEmail,
        "Listing Associates Email Address",
    ),
    (LogicalRole::ListingAgentPhone, "Phone_3"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_is_texas() {
        assert_eq!(PROFILE.state, "TX");
    }

    #[test]
    fn test_single_family_repeats_address_six_times() {
        let count = PROFILE
            .single_family
            .entries()
            .filter(|(role, _)| *role == LogicalRole::FullAddress)
            .count();
        assert_eq!(count, 6);
    }

    #[test]
    fn test_condo_repeats_address_eight_times() {
        let count = PROFILE
            .condo
            .entries()
            .filter(|(role, _)| *role == LogicalRole::FullAddress)
            .count();
        assert_eq!(count, 8);
    }

    #[test]
    fn test_condo_form_has_no_month_day_field() {
        // The condo table only carries the two-digit year; the month+day
        // line is not a fillable field on TREC 30-16.
        assert!(!PROFILE
            .condo
            .entries()
            .any(|(role, _)| role == LogicalRole::ClosingMonthDay));
        assert!(PROFILE
            .condo
            .entries()
            .any(|(role, _)| role == LogicalRole::ClosingYear));
    }

    #[test]
    fn test_earnest_money_field_names_differ_by_form() {
        let single: Vec<_> = PROFILE
            .single_family
            .entries()
            .filter(|(role, _)| *role == LogicalRole::EarnestMoney)
            .map(|(_, name)| name)
            .collect();
        let condo: Vec<_> = PROFILE
            .condo
            .entries()
            .filter(|(role, _)| *role == LogicalRole::EarnestMoney)
            .map(|(_, name)| name)
            .collect();
        assert_eq!(single, vec!["earnest money of"]);
        assert_eq!(condo, vec!["as earnest money to"]);
    }
}
