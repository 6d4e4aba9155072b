//! Jurisdiction registry
//!
//! Maps `(state, property category)` to the field table used to fill that
//! state's contract. Each table is a fixed list of
//! `(logical role, template field name)` pairs; a role may repeat when the
//! source contract repeats a value across pages (the TREC forms restate
//! the property address in half a dozen places).
//!
//! The registry carries an explicit default profile used for any state
//! without its own tables. Today that default is Texas, the only shipped
//! jurisdiction. Serving other states off the Texas tables is a stopgap
//! policy to revisit when a second jurisdiction ships.

use std::collections::HashMap;
use std::path::PathBuf;

use lazy_static::lazy_static;

use crate::filler;
use crate::jurisdiction::{normalize_state, PropertyCategory};
use crate::states::texas;
use crate::template::TemplateResolver;

/// Logical data slot a contract field draws its value from
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicalRole {
    BuyerName,
    SellerName,
    StreetAddress,
    City,
    FullAddress,
    ClosingMonthDay,
    ClosingYear,
    EarnestMoney,
    SellerCredits,
    BuyerEmail,
    ListingAgentName,
    ListingAgentEmail,
    ListingAgentPhone,
}

/// Fixed role-to-field-name table for one contract template
pub struct FieldTable {
    pub category: PropertyCategory,
    entries: &'static [(LogicalRole, &'static str)],
}

impl FieldTable {
    pub const fn new(
        category: PropertyCategory,
        entries: &'static [(LogicalRole, &'static str)],
    ) -> Self {
        Self { category, entries }
    }

    pub fn entries(&self) -> impl Iterator<Item = (LogicalRole, &'static str)> + '_ {
        self.entries.iter().copied()
    }

    /// Template field names this table writes, in table order
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(_, name)| *name)
    }
}

/// One state's bundle of field tables
pub struct JurisdictionProfile {
    /// Two-letter state code, uppercase
    pub state: &'static str,
    pub single_family: FieldTable,
    pub condo: FieldTable,
}

impl JurisdictionProfile {
    pub fn table(&self, category: PropertyCategory) -> &FieldTable {
        match category {
            PropertyCategory::SingleFamily => &self.single_family,
            PropertyCategory::Condo => &self.condo,
        }
    }
}

lazy_static! {
    static ref PROFILES: HashMap<&'static str, &'static JurisdictionProfile> = {
        let mut profiles: HashMap<&'static str, &'static JurisdictionProfile> = HashMap::new();
        profiles.insert(texas::PROFILE.state, &texas::PROFILE);
        profiles
    };
}

/// The profile serving states with no registered tables
pub fn default_profile() -> &'static JurisdictionProfile {
    &texas::PROFILE
}

/// Resolve the profile for a state code, falling back to the default
/// profile for unregistered states. Never fails.
pub fn profile_for(state: &str) -> &'static JurisdictionProfile {
    let code = normalize_state(state);
    match PROFILES.get(code.as_str()) {
        Some(profile) => profile,
        None => {
            tracing::debug!(state = %code, "no jurisdiction profile registered, using default");
            default_profile()
        }
    }
}

/// Whether a state has its own registered profile (no fallback involved)
pub fn is_registered(state: &str) -> bool {
    PROFILES.contains_key(normalize_state(state).as_str())
}

/// All registered profiles, for startup validation
pub fn registered_profiles() -> impl Iterator<Item = &'static JurisdictionProfile> {
    PROFILES.values().copied()
}

/// A discrepancy between a registered field table and the shipped template
#[derive(Debug, Clone, serde::Serialize)]
pub struct MappingIssue {
    pub state: &'static str,
    pub category: PropertyCategory,
    pub template: PathBuf,
    pub kind: MappingIssueKind,
}

#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MappingIssueKind {
    /// Template file absent; provisioning happens out-of-band
    TemplateNotProvisioned,
    /// Template present but unreadable
    TemplateUnreadable(String),
    /// Table names fields the template does not define on any page
    UnknownFields(Vec<String>),
}

impl std::fmt::Display for MappingIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            MappingIssueKind::TemplateNotProvisioned => write!(
                f,
                "{}/{}: template not provisioned at {}",
                self.state,
                self.category,
                self.template.display()
            ),
            MappingIssueKind::TemplateUnreadable(reason) => write!(
                f,
                "{}/{}: template {} unreadable: {}",
                self.state,
                self.category,
                self.template.display(),
                reason
            ),
            MappingIssueKind::UnknownFields(fields) => write!(
                f,
                "{}/{}: template {} is missing mapped fields: {}",
                self.state,
                self.category,
                self.template.display(),
                fields.join(", ")
            ),
        }
    }
}

/// One-time consistency check of every registered field table against the
/// template it fills.
///
/// Run at startup. A missing template file is reported but expected on
/// hosts where only some states are provisioned; unknown field names in a
/// template that is present indicate a real table/template mismatch.
pub fn validate_templates(resolver: &TemplateResolver) -> Vec<MappingIssue> {
    let mut issues = Vec::new();

    for profile in registered_profiles() {
        for table in [&profile.single_family, &profile.condo] {
            let template = resolver.resolve(profile.state, table.category);
            if !template.exists() {
                issues.push(MappingIssue {
                    state: profile.state,
                    category: table.category,
                    template,
                    kind: MappingIssueKind::TemplateNotProvisioned,
                });
                continue;
            }

            let defined = match filler::template_field_names(&template) {
                Ok(names) => names,
                Err(err) => {
                    issues.push(MappingIssue {
                        state: profile.state,
                        category: table.category,
                        template,
                        kind: MappingIssueKind::TemplateUnreadable(err.to_string()),
                    });
                    continue;
                }
            };

            let unknown: Vec<String> = table
                .field_names()
                .filter(|name| !defined.contains(*name))
                .map(str::to_string)
                .collect();
            if !unknown.is_empty() {
                issues.push(MappingIssue {
                    state: profile.state,
                    category: table.category,
                    template,
                    kind: MappingIssueKind::UnknownFields(unknown),
                });
            }
        }
    }

    issues
}
