//! Volume scenarios applied on top of a computed breakdown.
//!
//! Because every cost component is linear in volume, a scenario only scales
//! the recurring figures. Setup costs are carried over unchanged.

use serde::{Deserialize, Serialize};

use crate::engine::{annual_total, CostBreakdown};

/// Named volume scenario
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VolumeScenario {
    Low,
    Expected,
    High,
}

impl VolumeScenario {
    pub const ALL: [VolumeScenario; 3] = [Self::Low, Self::Expected, Self::High];

    /// Multiplier applied to monthly volume
    pub fn multiplier(&self) -> f64 {
        match self {
            Self::Low => 0.5,
            Self::Expected => 1.0,
            Self::High => 1.8,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low volume",
            Self::Expected => "Expected volume",
            Self::High => "High volume",
        }
    }
}

/// Recurring cost under a volume scenario
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    pub scenario: VolumeScenario,
    pub monthly_credits: f64,
    pub annual_credits: f64,
    pub total_annual_with_setup: f64,
}

impl CostBreakdown {
    /// Scale the recurring figures by a scenario multiplier
    pub fn project(&self, scenario: VolumeScenario) -> Projection {
        let monthly_credits = self.monthly_credits * scenario.multiplier();
        let annual_credits = annual_total(monthly_credits);
        Projection {
            scenario,
            monthly_credits,
            annual_credits,
            total_annual_with_setup: annual_credits + self.setup_costs,
        }
    }

    /// Projections for every built-in scenario
    pub fn projections(&self) -> Vec<Projection> {
        VolumeScenario::ALL.iter().map(|s| self.project(*s)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PricingCatalog;
    use crate::engine::complete_breakdown;
    use crate::workload::WorkloadDescription;

    fn sample() -> CostBreakdown {
        let mut workload = WorkloadDescription::default();
        workload.tokens.input_tokens = 2000;
        workload.features.tool_calls = 1;
        workload.volume.chats_per_month = 1000;
        workload.setup.knowledge_bases = 1;
        complete_breakdown(&workload, &PricingCatalog::default()).unwrap()
    }

    #[test]
    fn test_expected_matches_breakdown() {
        let breakdown = sample();
        let expected = breakdown.project(VolumeScenario::Expected);
        assert_eq!(expected.monthly_credits, breakdown.monthly_credits);
        assert_eq!(expected.annual_credits, breakdown.annual_credits);
        assert_eq!(expected.total_annual_with_setup, breakdown.total_annual_with_setup);
    }

    #[test]
    fn test_high_volume_scales_recurring_only() {
        let breakdown = sample();
        let high = breakdown.project(VolumeScenario::High);
        assert!((high.monthly_credits - breakdown.monthly_credits * 1.8).abs() < 1e-9);
        let with_setup = high.annual_credits + breakdown.setup_costs;
        assert!((high.total_annual_with_setup - with_setup).abs() < 1e-9);
    }

    #[test]
    fn test_projections_are_ordered() {
        let projections = sample().projections();
        assert_eq!(projections.len(), 3);
        assert!(projections[0].monthly_credits < projections[1].monthly_credits);
        assert!(projections[1].monthly_credits < projections[2].monthly_credits);
    }
}
