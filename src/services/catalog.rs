use crate::models::Trek;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading the trek catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid catalog format: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid catalog entry: {0}")]
    InvalidEntry(String),
}

/// Read-only trek catalog
///
/// Loaded once at startup and shared by every request. The order of the
/// file is preserved since ranking ties fall back to catalog order.
#[derive(Debug, Clone, Default)]
pub struct TrekCatalog {
    treks: Vec<Trek>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    treks: Vec<Trek>,
}

impl TrekCatalog {
    /// Build a catalog from treks, rejecting blank or duplicate names
    pub fn new(treks: Vec<Trek>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(treks.len());
        for trek in &treks {
            if trek.name.trim().is_empty() {
                return Err(CatalogError::InvalidEntry("trek name is empty".to_string()));
            }
            if !seen.insert(trek.name.as_str()) {
                return Err(CatalogError::InvalidEntry(format!(
                    "duplicate trek name: {}",
                    trek.name
                )));
            }
        }

        Ok(Self { treks })
    }

    /// Parse a catalog from TOML text with `[[treks]]` tables
    pub fn from_toml_str(contents: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(contents)?;
        Self::new(file.treks)
    }

    /// Load a catalog from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let catalog = Self::from_toml_str(&contents)?;
        tracing::info!(
            "Loaded {} treks from {}",
            catalog.len(),
            path.as_ref().display()
        );
        Ok(catalog)
    }

    pub fn treks(&self) -> &[Trek] {
        &self.treks
    }

    pub fn find(&self, name: &str) -> Option<&Trek> {
        self.treks.iter().find(|trek| trek.name == name)
    }

    pub fn len(&self) -> usize {
        self.treks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.treks.is_empty()
    }
}
