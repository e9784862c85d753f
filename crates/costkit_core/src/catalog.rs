//! Pricing catalog: model token rates, feature and setup unit costs, and the
//! handling-fee policy.
//!
//! A catalog is built once from [`CatalogRows`] (the flat, row-per-entry shape
//! a configuration store hands over) through [`PricingCatalog::from_rows`],
//! which rejects incomplete catalogs outright. Every [`FeatureKind`] and
//! [`SetupItem`] therefore always has a rate; only model lookups can fail at
//! calculation time.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CostError, CostResult, EntryKind};
use crate::validator::{CatalogValidator, ValidationResult};
use crate::workload::{FeatureKind, SetupItem};

/// Model selected when a workload does not say otherwise.
pub const DEFAULT_MODEL: &str = "claude-sonnet";

/// Token rates for one model, in credits per million tokens
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModelRate {
    pub input_per_million: f64,
    pub output_per_million: f64,
    /// Hosted by the pricing provider; drives handling-fee eligibility
    pub hosted: bool,
    pub enabled: bool,
}

impl ModelRate {
    pub fn hosted(input_per_million: f64, output_per_million: f64) -> Self {
        Self {
            input_per_million,
            output_per_million,
            hosted: true,
            enabled: true,
        }
    }

    pub fn external(input_per_million: f64, output_per_million: f64) -> Self {
        Self {
            hosted: false,
            ..Self::hosted(input_per_million, output_per_million)
        }
    }
}

/// Which models the handling fee applies to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum FeeScope {
    AllModels,
    #[default]
    HostedOnly,
}

/// Percentage surcharge on model token cost
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct HandlingFeePolicy {
    pub percentage: f64,
    #[serde(default)]
    pub scope: FeeScope,
}

impl Default for HandlingFeePolicy {
    fn default() -> Self {
        Self {
            percentage: 25.0,
            scope: FeeScope::HostedOnly,
        }
    }
}

impl HandlingFeePolicy {
    /// Policy that never charges a fee
    pub fn none() -> Self {
        Self {
            percentage: 0.0,
            scope: FeeScope::AllModels,
        }
    }

    /// Whether the fee applies to a model with the given hosting status
    pub fn applies_to(&self, hosted: bool) -> bool {
        match self.scope {
            FeeScope::AllModels => true,
            FeeScope::HostedOnly => hosted,
        }
    }
}

/// Credits per invocation, one rate per feature kind
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeatureRates {
    pub knowledge_query: f64,
    pub tool_call: f64,
    pub database_query: f64,
    pub memory_operation: f64,
    pub reflection_run: f64,
    pub web_fetch: f64,
    pub deep_crawl_page: f64,
}

impl Default for FeatureRates {
    fn default() -> Self {
        Self {
            knowledge_query: 0.05,
            tool_call: 1.0,
            database_query: 0.02,
            memory_operation: 0.005,
            reflection_run: 0.05,
            web_fetch: 0.1,
            deep_crawl_page: 0.02,
        }
    }
}

impl FeatureRates {
    pub fn rate(&self, kind: FeatureKind) -> f64 {
        match kind {
            FeatureKind::KnowledgeQuery => self.knowledge_query,
            FeatureKind::ToolCall => self.tool_call,
            FeatureKind::DatabaseQuery => self.database_query,
            FeatureKind::MemoryOperation => self.memory_operation,
            FeatureKind::ReflectionRun => self.reflection_run,
            FeatureKind::WebFetch => self.web_fetch,
            FeatureKind::DeepCrawlPage => self.deep_crawl_page,
        }
    }

    /// Build from catalog rows; every feature kind must be present and enabled
    pub fn from_rows(rows: &[PriceRow]) -> CostResult<Self> {
        let lookup = |kind: FeatureKind| required_cost(rows, EntryKind::Feature, kind.as_str());
        Ok(Self {
            knowledge_query: lookup(FeatureKind::KnowledgeQuery)?,
            tool_call: lookup(FeatureKind::ToolCall)?,
            database_query: lookup(FeatureKind::DatabaseQuery)?,
            memory_operation: lookup(FeatureKind::MemoryOperation)?,
            reflection_run: lookup(FeatureKind::ReflectionRun)?,
            web_fetch: lookup(FeatureKind::WebFetch)?,
            deep_crawl_page: lookup(FeatureKind::DeepCrawlPage)?,
        })
    }
}

/// Credits per unit, one rate per setup item
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SetupRates {
    pub agent: f64,
    pub knowledge_base: f64,
    pub tool: f64,
    pub evaluation_suite: f64,
}

impl Default for SetupRates {
    fn default() -> Self {
        Self {
            agent: 0.05,
            knowledge_base: 1.0,
            tool: 0.1,
            evaluation_suite: 0.5,
        }
    }
}

impl SetupRates {
    pub fn rate(&self, item: SetupItem) -> f64 {
        match item {
            SetupItem::Agent => self.agent,
            SetupItem::KnowledgeBase => self.knowledge_base,
            SetupItem::Tool => self.tool,
            SetupItem::EvaluationSuite => self.evaluation_suite,
        }
    }

    /// Build from catalog rows; every setup item must be present and enabled
    pub fn from_rows(rows: &[PriceRow]) -> CostResult<Self> {
        let lookup = |item: SetupItem| required_cost(rows, EntryKind::SetupItem, item.as_str());
        Ok(Self {
            agent: lookup(SetupItem::Agent)?,
            knowledge_base: lookup(SetupItem::KnowledgeBase)?,
            tool: lookup(SetupItem::Tool)?,
            evaluation_suite: lookup(SetupItem::EvaluationSuite)?,
        })
    }
}

fn required_cost(rows: &[PriceRow], kind: EntryKind, name: &str) -> CostResult<f64> {
    let row = rows
        .iter()
        .find(|row| row.name == name)
        .ok_or_else(|| CostError::MissingEntry {
            kind,
            name: name.to_string(),
        })?;
    if !row.enabled {
        return Err(CostError::DisabledEntry {
            kind,
            name: name.to_string(),
        });
    }
    Ok(row.cost)
}

fn enabled_by_default() -> bool {
    true
}

/// A model row as stored by the configuration source
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ModelRow {
    pub name: String,
    pub input_per_million: f64,
    pub output_per_million: f64,
    /// Required: there is no safe default for fee eligibility
    pub hosted: bool,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

/// A feature or setup-item row as stored by the configuration source
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PriceRow {
    pub name: String,
    pub cost: f64,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

impl PriceRow {
    pub fn new(name: impl Into<String>, cost: f64) -> Self {
        Self {
            name: name.into(),
            cost,
            enabled: true,
        }
    }
}

/// Flat catalog rows, the shape a persistence layer loads
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CatalogRows {
    #[serde(default)]
    pub handling_fee: HandlingFeePolicy,
    pub inter_agent_per_million: f64,
    #[serde(default)]
    pub models: Vec<ModelRow>,
    #[serde(default)]
    pub features: Vec<PriceRow>,
    #[serde(default)]
    pub setup_items: Vec<PriceRow>,
}

impl From<&PricingCatalog> for CatalogRows {
    fn from(catalog: &PricingCatalog) -> Self {
        Self {
            handling_fee: catalog.handling_fee,
            inter_agent_per_million: catalog.inter_agent_per_million,
            models: catalog
                .models
                .iter()
                .map(|(name, rate)| ModelRow {
                    name: name.clone(),
                    input_per_million: rate.input_per_million,
                    output_per_million: rate.output_per_million,
                    hosted: rate.hosted,
                    enabled: rate.enabled,
                })
                .collect(),
            features: FeatureKind::ALL
                .iter()
                .map(|kind| PriceRow::new(kind.as_str(), catalog.feature_rates.rate(*kind)))
                .collect(),
            setup_items: SetupItem::ALL
                .iter()
                .map(|item| PriceRow::new(item.as_str(), catalog.setup_rates.rate(*item)))
                .collect(),
        }
    }
}

/// Validated, immutable rate tables
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PricingCatalog {
    models: BTreeMap<String, ModelRate>,
    feature_rates: FeatureRates,
    setup_rates: SetupRates,
    handling_fee: HandlingFeePolicy,
    inter_agent_per_million: f64,
}

impl Default for PricingCatalog {
    fn default() -> Self {
        let models = [
            ("claude-sonnet", ModelRate::hosted(3.0, 15.0)),
            ("claude-haiku", ModelRate::hosted(0.8, 4.0)),
            ("gpt-4o", ModelRate::hosted(2.5, 10.0)),
            ("gpt-4o-mini", ModelRate::hosted(0.15, 0.6)),
            ("gemini-flash", ModelRate::hosted(0.1, 0.4)),
            ("custom", ModelRate::external(1.0, 3.0)),
        ]
        .into_iter()
        .map(|(name, rate)| (name.to_string(), rate))
        .collect();

        Self {
            models,
            feature_rates: FeatureRates::default(),
            setup_rates: SetupRates::default(),
            handling_fee: HandlingFeePolicy::default(),
            inter_agent_per_million: 3.0,
        }
    }
}

impl PricingCatalog {
    /// Validate rows and build a catalog; incomplete catalogs are rejected
    pub fn from_rows(rows: CatalogRows) -> CostResult<Self> {
        CatalogValidator::validate_rows(&rows).into_result()?;

        let feature_rates = FeatureRates::from_rows(&rows.features)?;
        let setup_rates = SetupRates::from_rows(&rows.setup_items)?;
        let models = rows
            .models
            .into_iter()
            .map(|row| {
                (
                    row.name,
                    ModelRate {
                        input_per_million: row.input_per_million,
                        output_per_million: row.output_per_million,
                        hosted: row.hosted,
                        enabled: row.enabled,
                    },
                )
            })
            .collect();

        Ok(Self {
            models,
            feature_rates,
            setup_rates,
            handling_fee: rows.handling_fee,
            inter_agent_per_million: rows.inter_agent_per_million,
        })
    }

    /// Look up an enabled model
    pub fn model(&self, id: &str) -> CostResult<&ModelRate> {
        let rate = self.models.get(id).ok_or_else(|| CostError::MissingEntry {
            kind: EntryKind::Model,
            name: id.to_string(),
        })?;
        if !rate.enabled {
            return Err(CostError::DisabledEntry {
                kind: EntryKind::Model,
                name: id.to_string(),
            });
        }
        Ok(rate)
    }

    /// Whether the catalog has an entry for this model, enabled or not
    pub fn knows_model(&self, id: &str) -> bool {
        self.models.contains_key(id)
    }

    /// All models in id order
    pub fn models(&self) -> impl Iterator<Item = (&str, &ModelRate)> {
        self.models.iter().map(|(id, rate)| (id.as_str(), rate))
    }

    pub fn feature_rates(&self) -> &FeatureRates {
        &self.feature_rates
    }

    pub fn setup_rates(&self) -> &SetupRates {
        &self.setup_rates
    }

    pub fn handling_fee(&self) -> &HandlingFeePolicy {
        &self.handling_fee
    }

    pub fn inter_agent_per_million(&self) -> f64 {
        self.inter_agent_per_million
    }

    /// Re-check the rate tables as they stand now.
    ///
    /// `from_rows` already rejects bad rows. The `with_*` builders below do
    /// not validate, so catalogs assembled with them should be checked here
    /// before pricing.
    pub fn validate(&self) -> ValidationResult {
        CatalogValidator::validate_rows(&CatalogRows::from(self))
    }

    /// Replace or add a model rate; unchecked, see [`validate`](Self::validate)
    pub fn with_model(mut self, id: impl Into<String>, rate: ModelRate) -> Self {
        self.models.insert(id.into(), rate);
        self
    }

    /// Unchecked, see [`validate`](Self::validate)
    pub fn with_handling_fee(mut self, policy: HandlingFeePolicy) -> Self {
        self.handling_fee = policy;
        self
    }

    /// Unchecked, see [`validate`](Self::validate)
    pub fn with_feature_rates(mut self, rates: FeatureRates) -> Self {
        self.feature_rates = rates;
        self
    }

    /// Unchecked, see [`validate`](Self::validate)
    pub fn with_setup_rates(mut self, rates: SetupRates) -> Self {
        self.setup_rates = rates;
        self
    }

    /// Unchecked, see [`validate`](Self::validate)
    pub fn with_inter_agent_rate(mut self, per_million: f64) -> Self {
        self.inter_agent_per_million = per_million;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_survives_row_round_trip() {
        let catalog = PricingCatalog::default();
        let rows = CatalogRows::from(&catalog);
        let rebuilt = PricingCatalog::from_rows(rows).unwrap();
        assert_eq!(rebuilt, catalog);
    }

    #[test]
    fn test_missing_feature_row_is_rejected() {
        let mut rows = CatalogRows::from(&PricingCatalog::default());
        rows.features.retain(|row| row.name != "web_fetch");

        let err = PricingCatalog::from_rows(rows).unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("web_fetch"));
    }

    #[test]
    fn test_disabled_setup_row_is_rejected() {
        let mut rows = CatalogRows::from(&PricingCatalog::default());
        for row in rows.setup_items.iter_mut() {
            if row.name == "tool" {
                row.enabled = false;
            }
        }
        assert!(PricingCatalog::from_rows(rows).is_err());
    }

    #[test]
    fn test_model_lookup() {
        let catalog = PricingCatalog::default()
            .with_model("retired", ModelRate { enabled: false, ..ModelRate::hosted(1.0, 1.0) });

        assert_eq!(catalog.model("gpt-4o").unwrap().input_per_million, 2.5);
        assert!(matches!(
            catalog.model("missing"),
            Err(CostError::MissingEntry { kind: EntryKind::Model, .. })
        ));
        assert!(matches!(
            catalog.model("retired"),
            Err(CostError::DisabledEntry { .. })
        ));
        assert!(catalog.knows_model("retired"));
    }

    #[test]
    fn test_fee_scope() {
        let hosted_only = HandlingFeePolicy::default();
        assert!(hosted_only.applies_to(true));
        assert!(!hosted_only.applies_to(false));

        let all = HandlingFeePolicy {
            percentage: 10.0,
            scope: FeeScope::AllModels,
        };
        assert!(all.applies_to(false));
    }

    #[test]
    fn test_model_row_requires_hosted_flag() {
        let result: Result<ModelRow, _> = serde_json::from_str(
            r#"{"name": "x", "input_per_million": 1.0, "output_per_million": 2.0}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_builders_are_checked_by_validate() {
        assert!(PricingCatalog::default().validate().is_valid());

        let catalog = PricingCatalog::default()
            .with_model("broken", ModelRate::hosted(-1.0, f64::NAN))
            .with_inter_agent_rate(f64::INFINITY)
            .with_feature_rates(FeatureRates {
                tool_call: -0.5,
                ..FeatureRates::default()
            });

        let report = catalog.validate();
        assert_eq!(report.errors.len(), 3, "{:?}", report.errors);
        assert!(report.errors.iter().any(|e| e.contains("'broken'")));
    }

    #[test]
    fn test_price_row_enabled_by_default() {
        let row: PriceRow = serde_json::from_str(r#"{"name": "tool_call", "cost": 1.0}"#).unwrap();
        assert!(row.enabled);
    }
}
