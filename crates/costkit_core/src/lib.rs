//! # costkit_core
//!
//! Pricing catalog and cost computation engine for agent workflows.
//!
//! This crate provides:
//! - **Workload model**: token, feature, setup and channel volumes of a workflow
//! - **Pricing catalog**: validated model, feature and setup rate tables
//! - **Cost engine**: pure functions producing an itemized [`CostBreakdown`]
//! - **Projections**: low / expected / high volume scenarios
//!
//! All amounts are in credits. Currency conversion and rounding belong to
//! whoever displays the numbers.
//!
//! ## Example
//!
//! ```rust
//! use costkit_core::{complete_breakdown, PricingCatalog, WorkloadDescription};
//!
//! let mut workload = WorkloadDescription::for_model("claude-sonnet");
//! workload.tokens.input_tokens = 2000;
//! workload.tokens.output_tokens = 800;
//! workload.features.tool_calls = 1;
//! workload.volume.emails_per_month = 5000;
//!
//! let breakdown = complete_breakdown(&workload, &PricingCatalog::default()).unwrap();
//! assert_eq!(breakdown.transactions_per_month, 5000);
//! assert_eq!(breakdown.annual_credits, breakdown.monthly_credits * 12.0);
//! ```

pub mod catalog;
pub mod engine;
pub mod error;
pub mod projection;
pub mod validator;
pub mod workload;

pub use catalog::{
    CatalogRows, FeatureRates, FeeScope, HandlingFeePolicy, ModelRate, ModelRow, PriceRow,
    PricingCatalog, SetupRates, DEFAULT_MODEL,
};
pub use engine::{
    annual_total, apply_handling_fee, check_preconditions, complete_breakdown, feature_cost,
    inter_agent_cost, monthly_total, per_transaction_total, setup_cost, token_cost,
    ComponentShares, CostBreakdown, MONTHS_PER_YEAR,
};
pub use error::{CostError, CostResult, EntryKind};
pub use projection::{Projection, VolumeScenario};
pub use validator::{CatalogValidator, ValidationResult};
pub use workload::{
    ChannelVolumes, FeatureKind, FeatureUsage, SetupItem, SetupRequirements, TokenUsage,
    WorkloadDescription, WORKING_DAYS_PER_MONTH,
};
