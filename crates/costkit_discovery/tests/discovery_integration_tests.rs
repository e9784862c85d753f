//! Integration tests for guided discovery.

use costkit_core::{complete_breakdown, PricingCatalog};
use costkit_discovery::{
    builtin_scenarios, split_volume, Answer, Channel, ConversationEngine, ScenarioPlayer,
};
use proptest::prelude::*;

fn full_conversation() -> Vec<Answer> {
    vec![
        Answer::text("Answer billing questions"),
        Answer::choices(["Email", "Chat"]),
        Answer::text("about 10,000 per month"),
        Answer::choice("Claude Haiku (fast)"),
        Answer::choice("Short answers"),
        Answer::choice("A few documents"),
        Answer::choices(["CRM", "Database"]),
        Answer::Number(2),
        Answer::choices(["Quality-check every response"]),
        Answer::choice("Comprehensive evaluation"),
    ]
}

#[test]
fn test_full_conversation_reaches_terminal_state() {
    let engine = ConversationEngine::new();
    let mut state = engine.initialize_conversation();

    for answer in full_conversation() {
        assert!(!engine.is_complete(&state));
        state = engine.process_response(&state, answer);
    }

    assert!(engine.is_complete(&state));
    assert_eq!(state.responses.len(), 10);

    let workload = state.workload();
    assert_eq!(workload.model, "claude-haiku");
    assert_eq!(workload.volume.emails_per_month, 6000);
    assert_eq!(workload.volume.chats_per_month, 4000);
    assert_eq!(workload.tokens.input_tokens, 1000);
    assert_eq!(workload.tokens.output_tokens, 300);
    assert_eq!(workload.tokens.inter_agent_tokens, 400);
    assert_eq!(workload.features.tool_calls, 1);
    assert_eq!(workload.features.database_queries, 2);
    assert_eq!(workload.features.reflection_runs, 1);
    assert_eq!(workload.setup.tools, 2);
    assert_eq!(workload.setup.evaluation_suites, 3);
}

#[test]
fn test_extracted_workload_prices_end_to_end() {
    let engine = ConversationEngine::new();
    let mut state = engine.initialize_conversation();
    for answer in full_conversation() {
        state = engine.process_response(&state, answer);
    }

    let breakdown = complete_breakdown(state.workload(), &PricingCatalog::default()).unwrap();
    assert_eq!(breakdown.model, "claude-haiku");
    assert!(breakdown.hosted);
    assert_eq!(breakdown.transactions_per_month, 10_000);
    assert!(breakdown.monthly_credits > 0.0);
    assert!(breakdown.setup_costs > 0.0);

    let summary = engine.generate_workflow_summary(&state.extracted);
    assert!(summary.contains("Answer billing questions"));
    assert!(summary.contains("claude-haiku"));
}

#[test]
fn test_every_builtin_scenario_terminates_and_prices() {
    let player = ScenarioPlayer::default();
    let catalog = PricingCatalog::default();

    for scenario in builtin_scenarios().unwrap() {
        let outcome = player.play(&scenario);
        assert!(player.engine().is_complete(&outcome.state), "{} did not finish", scenario.name);
        assert_eq!(outcome.transcript.len(), player.engine().len());
        assert!(
            complete_breakdown(outcome.state.workload(), &catalog).is_ok(),
            "{} produced an unpriceable workload",
            scenario.name
        );
    }
}

#[test]
fn test_trigger_only_scenario_uses_daily_triggers() {
    let scenario = costkit_discovery::find_scenario("invoice-processing").unwrap();
    let outcome = ScenarioPlayer::default().play(&scenario);
    let volume = &outcome.state.workload().volume;

    assert_eq!(volume.daily_triggers, 200);
    assert_eq!(volume.emails_per_month + volume.chats_per_month + volume.voice_calls_per_month, 0);
    assert_eq!(outcome.state.workload().transactions_per_month(), 4400);
}

#[test]
fn test_junk_answers_never_block_progress() {
    let engine = ConversationEngine::new();
    let mut state = engine.initialize_conversation();
    let mut steps = 0;
    while !engine.is_complete(&state) {
        state = engine.process_response(&state, Answer::text("¯\\_(ツ)_/¯"));
        steps += 1;
    }
    assert_eq!(steps, engine.len());
}

#[test]
fn test_oversized_volume_answer_is_kept_whole() {
    let engine = ConversationEngine::new();
    let mut state = engine.initialize_conversation();
    state = engine.process_response(&state, Answer::text("Route support mail"));
    state = engine.process_response(&state, Answer::choices(["Email", "Chat"]));
    state = engine.process_response(&state, Answer::text("99999999999999999999"));

    let volume = state.workload().volume;
    assert_eq!(volume.emails_per_month + volume.chats_per_month, u64::MAX);
    assert_eq!(state.workload().transactions_per_month(), u64::MAX);

    let breakdown = complete_breakdown(state.workload(), &PricingCatalog::default()).unwrap();
    assert!(breakdown.monthly_credits.is_finite());
}

#[test]
fn test_oversized_agent_count_saturates() {
    let engine = ConversationEngine::new();
    let mut state = engine.initialize_conversation();
    for _ in 0..7 {
        state = engine.process_response(&state, Answer::Skipped);
    }
    state = engine.process_response(&state, Answer::Number(u64::MAX));

    assert_eq!(state.workload().setup.agents, u64::MAX);
    assert_eq!(state.workload().tokens.inter_agent_tokens, u64::MAX);
}

proptest! {
    #[test]
    fn email_chat_split_is_sixty_forty(total in any::<u64>()) {
        let volume = split_volume(total, &[Channel::Email, Channel::Chat]);
        prop_assert_eq!(volume.emails_per_month + volume.chats_per_month, total);
        let expected = (u128::from(total) * 60 + 50) / 100;
        prop_assert_eq!(u128::from(volume.emails_per_month), expected);
    }

    #[test]
    fn triggers_round_to_nearest_working_day(total in any::<u64>()) {
        let volume = split_volume(total, &[]);
        let expected = (u128::from(total) + 11) / 22;
        prop_assert_eq!(u128::from(volume.daily_triggers), expected);
    }

    #[test]
    fn conversational_split_never_loses_volume(
        total in any::<u64>(),
        email in any::<bool>(),
        chat in any::<bool>(),
        voice in any::<bool>(),
    ) {
        let flags = [(email, Channel::Email), (chat, Channel::Chat), (voice, Channel::Voice)];
        let channels: Vec<Channel> = flags
            .into_iter()
            .filter_map(|(on, channel)| on.then_some(channel))
            .collect();
        prop_assume!(!channels.is_empty());

        let volume = split_volume(total, &channels);
        prop_assert_eq!(
            volume.emails_per_month + volume.chats_per_month + volume.voice_calls_per_month,
            total
        );
        prop_assert_eq!(volume.daily_triggers, 0);
    }

    #[test]
    fn any_number_of_answers_terminates(
        answers in prop::collection::vec("[a-z0-9 ,]{0,20}", 0..30),
    ) {
        let engine = ConversationEngine::new();
        let mut state = engine.initialize_conversation();
        for text in answers {
            state = engine.process_response(&state, Answer::text(text));
        }
        prop_assert!(state.current_step <= engine.len());
    }
}
