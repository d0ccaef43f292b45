use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::property::{PropertyId, PropertyRecord};
use crate::CatalogError;

/// The ordered, read-only set of listings backing every page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    properties: Vec<PropertyRecord>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    properties: Vec<PropertyRecord>,
}

impl Catalog {
    /// Builds a catalog from records, enforcing id uniqueness and per-record invariants.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Validation` describing the first violated invariant.
    pub fn new(properties: Vec<PropertyRecord>) -> Result<Self, CatalogError> {
        let mut seen_ids = HashSet::new();
        for property in &properties {
            property.validate().map_err(CatalogError::Validation)?;
            if !seen_ids.insert(property.id) {
                return Err(CatalogError::Validation(format!(
                    "duplicate property id: {}",
                    property.id
                )));
            }
        }
        Ok(Self { properties })
    }

    /// Parses a YAML document with a top-level `properties:` list.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the document fails to parse or validate.
    pub fn from_yaml_str(content: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_yaml::from_str(content)?;
        Self::new(file.properties)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PropertyRecord> {
        self.properties.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[PropertyRecord] {
        &self.properties
    }

    /// Returns `count` records starting at `offset`, truncated at the catalog end.
    #[must_use]
    pub fn slice(&self, offset: usize, count: usize) -> &[PropertyRecord] {
        let start = offset.min(self.properties.len());
        let end = start.saturating_add(count).min(self.properties.len());
        &self.properties[start..end]
    }

    #[must_use]
    pub fn find(&self, id: PropertyId) -> Option<&PropertyRecord> {
        self.properties.iter().find(|p| p.id == id)
    }
}

/// Load and validate the catalog from a YAML file.
///
/// # Errors
///
/// Returns `CatalogError` if the file cannot be read, parsed, or fails validation.
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    Catalog::from_yaml_str(&content)
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
