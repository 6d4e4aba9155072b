//! Contract PDF field-mapping and generation engine
//!
//! Turns a normalized offer record into a filled, state-specific purchase
//! contract: resolves the template for the offer's state and property
//! category, renders the jurisdiction's field mapping, writes the values
//! into the template's form fields, and serializes the result to bytes.
//!
//! The engine is a pure transformation with no shared mutable state: each
//! call reads one template, builds one mapping, and returns one buffer.
//! It is safe to invoke concurrently; callers own any timeout policy.

pub mod error;
pub mod filler;
pub mod format;
pub mod jurisdiction;
pub mod mapping;
pub mod registry;
pub mod states;
pub mod template;

use std::path::PathBuf;

use offer_types::OfferData;

pub use error::EngineError;
pub use filler::{FillReport, FilledLetter};
pub use jurisdiction::PropertyCategory;
pub use mapping::FieldMapping;
pub use registry::MappingIssue;
pub use template::TemplateResolver;

/// ContractFormFiller entry point
#[derive(Debug, Clone)]
pub struct ContractFormFiller {
    resolver: TemplateResolver,
}

impl ContractFormFiller {
    pub fn new(templates_root: impl Into<PathBuf>) -> Self {
        Self {
            resolver: TemplateResolver::new(templates_root),
        }
    }

    pub fn resolver(&self) -> &TemplateResolver {
        &self.resolver
    }

    /// Generate the filled contract for an offer.
    ///
    /// Fails only when the resolved template is missing or unreadable;
    /// missing optional data and malformed dates degrade inside the
    /// mapping instead.
    pub fn generate(
        &self,
        offer: &OfferData,
        property_type: Option<&str>,
    ) -> Result<FilledLetter, EngineError> {
        let category = PropertyCategory::classify(property_type);
        let template = self.resolver.resolve(&offer.state, category);

        let profile = registry::profile_for(&offer.state);
        let field_mapping = mapping::build_field_mapping(offer, profile.table(category));

        tracing::debug!(
            state = %offer.state,
            category = %category,
            template = %template.display(),
            fields = field_mapping.len(),
            "filling contract template"
        );

        filler::fill_template(&template, &field_mapping)
    }

    /// One-time consistency check of the registered field tables against
    /// the provisioned templates. Intended for startup; see
    /// [`registry::validate_templates`].
    pub fn validate_mappings(&self) -> Vec<MappingIssue> {
        registry::validate_templates(&self.resolver)
    }
}
