//! Integration tests for the cost engine.

use costkit_core::{
    complete_breakdown, CatalogRows, ChannelVolumes, CostError, FeatureUsage, FeeScope,
    HandlingFeePolicy, ModelRate, PricingCatalog, SetupRequirements, TokenUsage,
    WorkloadDescription,
};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn reference_workload() -> WorkloadDescription {
    WorkloadDescription {
        model: "claude-sonnet".to_string(),
        tokens: TokenUsage {
            input_tokens: 2000,
            output_tokens: 800,
            inter_agent_tokens: 500,
        },
        features: FeatureUsage {
            knowledge_queries: 2,
            tool_calls: 1,
            database_queries: 3,
            memory_operations: 4,
            reflection_runs: 1,
            web_fetches: 0,
            deep_crawl_pages: 0,
        },
        setup: SetupRequirements {
            agents: 3,
            knowledge_bases: 1,
            tools: 2,
            evaluation_suites: 0,
        },
        volume: ChannelVolumes {
            emails_per_month: 5000,
            chats_per_month: 3000,
            voice_calls_per_month: 0,
            daily_triggers: 1,
        },
    }
}

/// Reference scenario: hosted model at $3/$15 per million with a 25% fee.
#[test]
fn test_reference_scenario_end_to_end() {
    let catalog = PricingCatalog::default()
        .with_model("claude-sonnet", ModelRate::hosted(3.0, 15.0))
        .with_handling_fee(HandlingFeePolicy {
            percentage: 25.0,
            scope: FeeScope::HostedOnly,
        })
        .with_inter_agent_rate(3.0);

    let breakdown = complete_breakdown(&reference_workload(), &catalog).unwrap();

    assert_eq!(breakdown.transactions_per_month, 8022);
    assert!(close(breakdown.token_cost, 0.018));
    assert!(close(breakdown.token_cost_with_handling_fee, 0.0225));
    assert!(close(breakdown.inter_agent_cost, 0.0015));
    assert!(close(breakdown.feature_cost, 1.23));
    assert!(close(breakdown.credits_per_transaction, 1.254));
    assert!(close(breakdown.monthly_credits, 1.254 * 8022.0));
    assert_eq!(breakdown.annual_credits, breakdown.monthly_credits * 12.0);
    assert!(close(breakdown.setup_costs, 1.35));
    assert_eq!(
        breakdown.total_monthly_with_setup,
        breakdown.monthly_credits + breakdown.setup_costs
    );
    assert_eq!(
        breakdown.total_annual_with_setup,
        breakdown.annual_credits + breakdown.setup_costs
    );
    assert!(breakdown.handling_fee_applied);
}

/// Switching to an externally hosted model drops the fee but nothing else.
#[test]
fn test_external_model_changes_only_token_terms() {
    let catalog = PricingCatalog::default().with_model("byo", ModelRate::external(3.0, 15.0));
    let hosted = complete_breakdown(&reference_workload(), &catalog).unwrap();

    let mut workload = reference_workload();
    workload.model = "byo".to_string();
    let external = complete_breakdown(&workload, &catalog).unwrap();

    assert!(close(external.token_cost_with_handling_fee, 0.018));
    assert_eq!(external.token_cost, hosted.token_cost);
    assert_eq!(external.feature_cost, hosted.feature_cost);
    assert_eq!(external.inter_agent_cost, hosted.inter_agent_cost);
    assert_eq!(external.setup_costs, hosted.setup_costs);
}

/// A catalog loaded from rows prices identically to the built-in one.
#[test]
fn test_catalog_from_yaml_rows() {
    let yaml = r#"
handling_fee:
  percentage: 25
  scope: hosted_only
inter_agent_per_million: 3.0
models:
  - name: claude-sonnet
    input_per_million: 3.0
    output_per_million: 15.0
    hosted: true
features:
  - { name: knowledge_query, cost: 0.05 }
  - { name: tool_call, cost: 1.0 }
  - { name: database_query, cost: 0.02 }
  - { name: memory_operation, cost: 0.005 }
  - { name: reflection_run, cost: 0.05 }
  - { name: web_fetch, cost: 0.1 }
  - { name: deep_crawl_page, cost: 0.02 }
setup_items:
  - { name: agent, cost: 0.05 }
  - { name: knowledge_base, cost: 1.0 }
  - { name: tool, cost: 0.1 }
  - { name: evaluation_suite, cost: 0.5 }
"#;
    let rows: CatalogRows = serde_yaml::from_str(yaml).unwrap();
    let catalog = PricingCatalog::from_rows(rows).unwrap();

    let from_rows = complete_breakdown(&reference_workload(), &catalog).unwrap();
    let built_in = complete_breakdown(&reference_workload(), &PricingCatalog::default()).unwrap();
    assert_eq!(from_rows, built_in);
}

/// An incomplete catalog never reaches the engine.
#[test]
fn test_incomplete_catalog_is_rejected_at_load() {
    let mut rows = CatalogRows::from(&PricingCatalog::default());
    rows.features.retain(|row| row.name != "reflection_run");

    match PricingCatalog::from_rows(rows) {
        Err(CostError::InvalidCatalog(errors)) => {
            assert_eq!(errors, vec!["Missing feature 'reflection_run'".to_string()]);
        }
        other => panic!("expected InvalidCatalog, got {:?}", other),
    }
}

/// Breakdowns serialize with camelCase keys for the presentation layer.
#[test]
fn test_breakdown_serialization() {
    let breakdown = complete_breakdown(&reference_workload(), &PricingCatalog::default()).unwrap();
    let json = serde_json::to_value(&breakdown).unwrap();
    assert!(json.get("creditsPerTransaction").is_some());
    assert!(json.get("totalAnnualWithSetup").is_some());
    assert_eq!(json["transactionsPerMonth"], 8022);
}
