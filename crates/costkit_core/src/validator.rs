//! Catalog validation.

use std::collections::HashSet;

use crate::catalog::{CatalogRows, PriceRow};
use crate::error::{CostError, CostResult};
use crate::workload::{FeatureKind, SetupItem};

/// Errors and warnings collected while checking catalog rows.
///
/// Errors make a catalog unusable; warnings are reported and otherwise ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// Warnings when the rows are usable, otherwise every error as one
    /// [`CostError::InvalidCatalog`]
    pub fn into_result(self) -> CostResult<Vec<String>> {
        if self.is_valid() {
            Ok(self.warnings)
        } else {
            Err(CostError::InvalidCatalog(self.errors))
        }
    }
}

fn is_valid_rate(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// Validator for catalog rows.
pub struct CatalogValidator;

impl CatalogValidator {
    /// Validate a complete set of catalog rows.
    pub fn validate_rows(rows: &CatalogRows) -> ValidationResult {
        let mut result = ValidationResult::new();

        result.merge(Self::validate_policy(rows));
        result.merge(Self::validate_models(rows));
        result.merge(Self::validate_priced_rows(
            "feature",
            &rows.features,
            &FeatureKind::ALL.map(|kind| kind.as_str()),
        ));
        result.merge(Self::validate_priced_rows(
            "setup item",
            &rows.setup_items,
            &SetupItem::ALL.map(|item| item.as_str()),
        ));

        result
    }

    /// Validate the handling fee and inter-agent rate.
    pub fn validate_policy(rows: &CatalogRows) -> ValidationResult {
        let mut result = ValidationResult::new();

        if !is_valid_rate(rows.handling_fee.percentage) {
            result.add_error(format!(
                "Handling fee percentage must be a non-negative number, got {}",
                rows.handling_fee.percentage
            ));
        } else if rows.handling_fee.percentage > 100.0 {
            result.add_warning(format!(
                "Handling fee of {}% more than doubles token cost",
                rows.handling_fee.percentage
            ));
        }

        if !is_valid_rate(rows.inter_agent_per_million) {
            result.add_error(format!(
                "Inter-agent rate must be a non-negative number, got {}",
                rows.inter_agent_per_million
            ));
        }

        result
    }

    /// Validate model rows.
    pub fn validate_models(rows: &CatalogRows) -> ValidationResult {
        let mut result = ValidationResult::new();

        if rows.models.is_empty() {
            result.add_error("Catalog defines no models");
            return result;
        }

        let mut seen = HashSet::new();
        for model in &rows.models {
            if model.name.trim().is_empty() {
                result.add_error("Model row has an empty name");
                continue;
            }
            if !seen.insert(model.name.as_str()) {
                result.add_error(format!("Model '{}' is defined more than once", model.name));
            }
            if !is_valid_rate(model.input_per_million) || !is_valid_rate(model.output_per_million)
            {
                result.add_error(format!(
                    "Model '{}' has an invalid token rate ({} in / {} out)",
                    model.name, model.input_per_million, model.output_per_million
                ));
            } else if model.input_per_million == 0.0 && model.output_per_million == 0.0 {
                result.add_warning(format!("Model '{}' has zero token rates", model.name));
            }
            if !model.enabled {
                result.add_warning(format!("Model '{}' is disabled", model.name));
            }
        }

        if rows.models.iter().all(|model| !model.enabled) {
            result.add_error("Catalog has no enabled models");
        }

        result
    }

    /// Validate feature or setup rows against the names that must be priced.
    pub fn validate_priced_rows(
        label: &str,
        rows: &[PriceRow],
        required: &[&str],
    ) -> ValidationResult {
        let mut result = ValidationResult::new();

        let mut seen = HashSet::new();
        for row in rows {
            if !required.contains(&row.name.as_str()) {
                result.add_error(format!("Unknown {} '{}'", label, row.name));
                continue;
            }
            if !seen.insert(row.name.as_str()) {
                result.add_error(format!(
                    "{} '{}' is defined more than once",
                    capitalize(label),
                    row.name
                ));
            }
            if !is_valid_rate(row.cost) {
                result.add_error(format!(
                    "{} '{}' has an invalid cost: {}",
                    capitalize(label),
                    row.name,
                    row.cost
                ));
            }
            if !row.enabled {
                result.add_error(format!("{} '{}' is disabled", capitalize(label), row.name));
            }
        }

        for name in required {
            if !rows.iter().any(|row| row.name == *name) {
                result.add_error(format!("Missing {} '{}'", label, name));
            }
        }

        result
    }
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
