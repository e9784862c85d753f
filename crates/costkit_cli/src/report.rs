//! Rendering estimates for the terminal.
//!
//! The engine works in credits. Conversion to currency and rounding happen
//! here and nowhere else.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use costkit_core::{
    ComponentShares, CostBreakdown, FeatureKind, PricingCatalog, Projection, SetupItem,
};

/// Currency for display
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, ValueEnum)]
#[allow(clippy::upper_case_acronyms)]
pub enum Currency {
    #[default]
    USD,
    EUR,
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Currency::USD => write!(f, "$"),
            Currency::EUR => write!(f, "€"),
        }
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "USD" | "$" => Ok(Currency::USD),
            "EUR" | "€" => Ok(Currency::EUR),
            other => Err(format!("unsupported currency '{}'", other)),
        }
    }
}

/// Converts credits to display amounts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Money {
    pub currency: Currency,
    pub credits_per_unit: f64,
}

impl Money {
    pub fn new(currency: Currency, credits_per_unit: f64) -> Self {
        Self {
            currency,
            credits_per_unit,
        }
    }

    pub fn amount(&self, credits: f64) -> f64 {
        credits / self.credits_per_unit
    }

    /// Sub-unit amounts keep four decimals so per-transaction prices stay visible
    pub fn format(&self, credits: f64) -> String {
        let amount = self.amount(credits);
        let decimals = if amount != 0.0 && amount.abs() < 1.0 { 4 } else { 2 };
        format!("{}{:.*}", self.currency, decimals, amount)
    }
}

/// Machine-readable estimate for `--json`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateReport<'a> {
    pub currency: Currency,
    pub credits_per_unit: f64,
    pub breakdown: &'a CostBreakdown,
    pub shares: ComponentShares,
    pub projections: Vec<Projection>,
}

impl<'a> EstimateReport<'a> {
    pub fn new(breakdown: &'a CostBreakdown, money: &Money) -> Self {
        Self {
            currency: money.currency,
            credits_per_unit: money.credits_per_unit,
            breakdown,
            shares: breakdown.component_shares(),
            projections: breakdown.projections(),
        }
    }
}

/// 1234567 -> "1,234,567"
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

fn percent(share: f64) -> String {
    format!("{:.0}%", share * 100.0)
}

fn row(label: &str, value: impl fmt::Display) -> String {
    format!("  {:<24}{:>14}", label, value.to_string())
}

pub fn render_breakdown(breakdown: &CostBreakdown, money: &Money) -> String {
    let hosting = match (breakdown.hosted, breakdown.handling_fee_applied) {
        (true, true) => "hosted, handling fee applied",
        (true, false) => "hosted",
        (false, true) => "external, handling fee applied",
        (false, false) => "external",
    };
    let shares = breakdown.component_shares();

    let lines = vec![
        format!("Model: {} ({})", breakdown.model, hosting),
        format!(
            "Volume: {} transactions / month",
            group_thousands(breakdown.transactions_per_month)
        ),
        String::new(),
        "Per transaction".to_string(),
        row("Tokens", money.format(breakdown.token_cost)),
        row("Tokens incl. fee", money.format(breakdown.token_cost_with_handling_fee)),
        row("Inter-agent", money.format(breakdown.inter_agent_cost)),
        row("Features", money.format(breakdown.feature_cost)),
        row("Total", money.format(breakdown.credits_per_transaction)),
        format!(
            "  Split: tokens {}, inter-agent {}, features {}",
            percent(shares.tokens),
            percent(shares.inter_agent),
            percent(shares.features)
        ),
        String::new(),
        "Recurring".to_string(),
        row("Monthly", money.format(breakdown.monthly_credits)),
        row("Annual", money.format(breakdown.annual_credits)),
        String::new(),
        "Setup".to_string(),
        row("One-time", money.format(breakdown.setup_costs)),
        row("First month incl. setup", money.format(breakdown.total_monthly_with_setup)),
        row("First year incl. setup", money.format(breakdown.total_annual_with_setup)),
    ];
    lines.join("\n")
}

pub fn render_projections(breakdown: &CostBreakdown, money: &Money) -> String {
    let mut lines = vec![format!(
        "  {:<10}{:>14}{:>14}{:>18}",
        "Scenario", "Monthly", "Annual", "Year incl. setup"
    )];
    for projection in breakdown.projections() {
        lines.push(format!(
            "  {:<10}{:>14}{:>14}{:>18}",
            projection.scenario.label(),
            money.format(projection.monthly_credits),
            money.format(projection.annual_credits),
            money.format(projection.total_annual_with_setup)
        ));
    }
    lines.join("\n")
}

pub fn render_catalog(catalog: &PricingCatalog, money: &Money) -> String {
    let fee = catalog.handling_fee();
    let mut lines = vec![
        format!(
            "Handling fee: {}% ({})",
            fee.percentage,
            if fee.applies_to(false) { "all models" } else { "hosted models only" }
        ),
        format!(
            "Inter-agent tokens: {} per million",
            money.format(catalog.inter_agent_per_million())
        ),
        String::new(),
        format!("  {:<18}{:>12}{:>12}  {}", "Model", "Input/M", "Output/M", "Status"),
    ];

    for (id, rate) in catalog.models() {
        let mut status = vec![if rate.hosted { "hosted" } else { "external" }];
        if !rate.enabled {
            status.push("disabled");
        }
        lines.push(format!(
            "  {:<18}{:>12}{:>12}  {}",
            id,
            money.format(rate.input_per_million),
            money.format(rate.output_per_million),
            status.join(", ")
        ));
    }

    lines.push(String::new());
    lines.push("Features (per invocation)".to_string());
    for kind in FeatureKind::ALL {
        lines.push(row(kind.as_str(), money.format(catalog.feature_rates().rate(kind))));
    }

    lines.push(String::new());
    lines.push("Setup items (one-time)".to_string());
    for item in SetupItem::ALL {
        lines.push(row(item.as_str(), money.format(catalog.setup_rates().rate(item))));
    }

    lines.join("\n")
}
