//! Contract template resolution
//!
//! Templates live on a read-only tree keyed by lowercase state code:
//! `{root}/{state}/{singlefamily-resale.pdf | condo-resale.pdf}`. The tree
//! is provisioned out-of-band; resolution is pure path math and existence
//! is checked by the fill driver.

use std::path::{Path, PathBuf};

use crate::jurisdiction::PropertyCategory;

#[derive(Debug, Clone)]
pub struct TemplateResolver {
    root: PathBuf,
}

impl TemplateResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the template for a state and property category
    pub fn resolve(&self, state: &str, category: PropertyCategory) -> PathBuf {
        self.root
            .join(state.trim().to_ascii_lowercase())
            .join(category.template_filename())
    }
}
