//! Loading pricing catalogs from configuration files.
//!
//! Catalog files hold flat rows (one per model, feature and setup item) in
//! YAML, JSON or TOML. The format is chosen by file extension. Rows are
//! validated before a [`PricingCatalog`] is built, so an incomplete file is
//! rejected here rather than surfacing as a wrong estimate later.

use std::path::Path;

use costkit_core::{CatalogRows, CatalogValidator, PricingCatalog};
use tracing::{debug, warn};

use crate::document::{read_document, write_document, DocumentFormat};
use crate::error::StoreResult;

/// Reads catalog rows and builds validated catalogs
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load and validate a catalog file
    pub fn load(path: impl AsRef<Path>) -> StoreResult<PricingCatalog> {
        let path = path.as_ref();
        let rows = Self::read_rows(path)?;
        let catalog = Self::build(rows)?;
        debug!(path = %path.display(), models = catalog.models().count(), "Loaded pricing catalog");
        Ok(catalog)
    }

    /// Load a catalog file when given, otherwise the built-in defaults
    pub fn load_or_default(path: Option<&Path>) -> StoreResult<PricingCatalog> {
        match path {
            Some(path) => Self::load(path),
            None => {
                debug!("Using built-in pricing catalog");
                Ok(PricingCatalog::default())
            }
        }
    }

    /// Read rows without building a catalog
    pub fn read_rows(path: &Path) -> StoreResult<CatalogRows> {
        read_document(path)
    }

    /// Parse rows from text in the given format
    pub fn parse_rows(content: &str, format: DocumentFormat) -> StoreResult<CatalogRows> {
        format.parse(content)
    }

    /// Validate rows, reporting warnings, and build the catalog
    pub fn build(rows: CatalogRows) -> StoreResult<PricingCatalog> {
        let report = CatalogValidator::validate_rows(&rows);
        for warning in &report.warnings {
            warn!("Catalog warning: {}", warning);
        }
        Ok(PricingCatalog::from_rows(rows)?)
    }

    /// Write a catalog back out as rows
    pub fn write(catalog: &PricingCatalog, path: impl AsRef<Path>) -> StoreResult<()> {
        write_document(path.as_ref(), &CatalogRows::from(catalog))
    }
}
