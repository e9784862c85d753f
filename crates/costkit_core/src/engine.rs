//! Cost engine - pure functions from a workload and a catalog to a breakdown.
//!
//! Every cost category is linear and independently additive, so the
//! component costs in a [`CostBreakdown`] always sum exactly to the
//! per-transaction price. Nothing here rounds: display precision is left to
//! the presentation layer.
//!
//! The handling fee is a surcharge on model compute only. It is applied to
//! the token cost and never to inter-agent or feature cost.

use serde::{Deserialize, Serialize};

use crate::catalog::{FeatureRates, HandlingFeePolicy, ModelRate, PricingCatalog, SetupRates};
use crate::error::{CostError, CostResult};
use crate::workload::{
    FeatureKind, FeatureUsage, SetupItem, SetupRequirements, TokenUsage, WorkloadDescription,
};

const TOKENS_PER_MILLION: f64 = 1_000_000.0;

/// Months used to annualize monthly figures.
pub const MONTHS_PER_YEAR: f64 = 12.0;

/// Model token cost for one transaction, before any handling fee
pub fn token_cost(tokens: &TokenUsage, rate: &ModelRate) -> f64 {
    let input_cost = tokens.input_tokens as f64 * rate.input_per_million / TOKENS_PER_MILLION;
    let output_cost = tokens.output_tokens as f64 * rate.output_per_million / TOKENS_PER_MILLION;
    input_cost + output_cost
}

/// Surcharge a token cost when the policy covers the model
pub fn apply_handling_fee(base_cost: f64, hosted: bool, policy: &HandlingFeePolicy) -> f64 {
    if policy.applies_to(hosted) {
        base_cost * (1.0 + policy.percentage / 100.0)
    } else {
        base_cost
    }
}

/// Coordination cost of tokens exchanged between agents
pub fn inter_agent_cost(inter_agent_tokens: u64, per_million: f64) -> f64 {
    inter_agent_tokens as f64 * per_million / TOKENS_PER_MILLION
}

/// Weighted sum of feature invocations
pub fn feature_cost(usage: &FeatureUsage, rates: &FeatureRates) -> f64 {
    FeatureKind::ALL
        .iter()
        .map(|kind| usage.count(*kind) as f64 * rates.rate(*kind))
        .sum()
}

/// One-time setup cost; never scaled by volume
pub fn setup_cost(setup: &SetupRequirements, rates: &SetupRates) -> f64 {
    SetupItem::ALL
        .iter()
        .map(|item| setup.count(*item) as f64 * rates.rate(*item))
        .sum()
}

/// The authoritative per-transaction price
pub fn per_transaction_total(
    token_cost_with_fee: f64,
    inter_agent_cost: f64,
    feature_cost: f64,
) -> f64 {
    token_cost_with_fee + inter_agent_cost + feature_cost
}

pub fn monthly_total(per_transaction: f64, transactions_per_month: u64) -> f64 {
    per_transaction * transactions_per_month as f64
}

pub fn annual_total(monthly: f64) -> f64 {
    monthly * MONTHS_PER_YEAR
}

/// Reject workloads the catalog cannot price, before any arithmetic.
pub fn check_preconditions(
    workload: &WorkloadDescription,
    catalog: &PricingCatalog,
) -> CostResult<()> {
    if workload.model.trim().is_empty() {
        return Err(CostError::PreconditionViolation(
            "workload does not name a model".to_string(),
        ));
    }
    if !catalog.knows_model(&workload.model) {
        return Err(CostError::UnknownModel(workload.model.clone()));
    }
    if workload.volume.checked_transactions_per_month().is_none() {
        return Err(CostError::PreconditionViolation(
            "monthly transaction volume exceeds the supported range".to_string(),
        ));
    }
    Ok(())
}

/// Complete, itemized cost of a workload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    /// Model that was priced
    pub model: String,
    /// Hosting status taken from the catalog
    pub hosted: bool,
    pub handling_fee_applied: bool,
    pub transactions_per_month: u64,
    pub token_cost: f64,
    pub token_cost_with_handling_fee: f64,
    pub inter_agent_cost: f64,
    pub feature_cost: f64,
    pub credits_per_transaction: f64,
    pub monthly_credits: f64,
    pub annual_credits: f64,
    /// One-time
    pub setup_costs: f64,
    pub total_monthly_with_setup: f64,
    pub total_annual_with_setup: f64,
}

/// Share of the per-transaction price taken by each component
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ComponentShares {
    pub tokens: f64,
    pub inter_agent: f64,
    pub features: f64,
}

impl CostBreakdown {
    /// Fractions of `credits_per_transaction`; all zero for a free transaction
    pub fn component_shares(&self) -> ComponentShares {
        if self.credits_per_transaction == 0.0 {
            return ComponentShares::default();
        }
        ComponentShares {
            tokens: self.token_cost_with_handling_fee / self.credits_per_transaction,
            inter_agent: self.inter_agent_cost / self.credits_per_transaction,
            features: self.feature_cost / self.credits_per_transaction,
        }
    }
}

/// Price a workload against a catalog.
///
/// This is the single entry point callers should use; the functions above
/// exist for reuse and testing.
pub fn complete_breakdown(
    workload: &WorkloadDescription,
    catalog: &PricingCatalog,
) -> CostResult<CostBreakdown> {
    check_preconditions(workload, catalog)?;
    let rate = catalog.model(&workload.model)?;

    let policy = catalog.handling_fee();
    let token_cost = token_cost(&workload.tokens, rate);
    let token_cost_with_handling_fee = apply_handling_fee(token_cost, rate.hosted, policy);
    let inter_agent_cost = inter_agent_cost(
        workload.tokens.inter_agent_tokens,
        catalog.inter_agent_per_million(),
    );
    let feature_cost = feature_cost(&workload.features, catalog.feature_rates());

    let credits_per_transaction =
        per_transaction_total(token_cost_with_handling_fee, inter_agent_cost, feature_cost);
    let transactions_per_month = workload.transactions_per_month();
    let monthly_credits = monthly_total(credits_per_transaction, transactions_per_month);
    let annual_credits = annual_total(monthly_credits);
    let setup_costs = setup_cost(&workload.setup, catalog.setup_rates());

    Ok(CostBreakdown {
        model: workload.model.clone(),
        hosted: rate.hosted,
        handling_fee_applied: policy.applies_to(rate.hosted) && policy.percentage != 0.0,
        transactions_per_month,
        token_cost,
        token_cost_with_handling_fee,
        inter_agent_cost,
        feature_cost,
        credits_per_transaction,
        monthly_credits,
        annual_credits,
        setup_costs,
        total_monthly_with_setup: monthly_credits + setup_costs,
        total_annual_with_setup: annual_credits + setup_costs,
    })
}
