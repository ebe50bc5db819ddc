//! Integration tests for pulse-core
//!
//! These tests exercise the full provider → state → insight → briefing
//! workflow, plus settings persistence across container restarts.

use std::sync::Arc;

use pulse_core::{
    analyze, build_briefing, overall_status, top_focus, BusinessUnit, DashboardSettings,
    DashboardState, Database, InsightKind, MetricsProvider, OverallStatus, StaticProvider,
    TimePeriod,
};

// =============================================================================
// Provider → Engine Integration Tests
// =============================================================================

#[tokio::test]
async fn test_wellbefore_snapshot_produces_briefing() {
    let provider = StaticProvider::new();
    let data = provider
        .fetch_dashboard(BusinessUnit::WellBefore, TimePeriod::Mtd)
        .await
        .expect("Failed to fetch dashboard");

    let insights = analyze(&data.metrics);

    // EBITDA ships with a warning status, so the engine must flag it
    let ebitda = insights
        .iter()
        .find(|i| i.metric_id == "wb-ebitda" && i.kind == InsightKind::Warning)
        .expect("EBITDA warning missing");
    assert_eq!(ebitda.priority, 7);
    assert!(ebitda.message.contains("below target range"));

    // Revenue is past its monthly goal
    let revenue_goal = insights
        .iter()
        .find(|i| i.metric_id == "wb-revenue" && i.kind == InsightKind::Goal)
        .expect("Revenue goal insight missing");
    assert!(revenue_goal.message.contains("Monthly Goal achieved!"));

    // With at least one warning present the overall status cannot be excellent
    assert_ne!(overall_status(&insights), OverallStatus::Excellent);

    // The focus names a concrete metric, not the all-green fallback
    let focus = top_focus(&insights, &data.metrics);
    assert!(focus.starts_with("Focus on"));
}

#[tokio::test]
async fn test_briefing_for_both_units() {
    let provider = StaticProvider::new();

    for unit in BusinessUnit::all() {
        let data = provider
            .fetch_dashboard(unit, TimePeriod::Mtd)
            .await
            .expect("Failed to fetch dashboard");
        let briefing = build_briefing(unit, TimePeriod::Mtd, &data.metrics);

        assert_eq!(briefing.business_unit, unit);
        assert!(briefing.warnings.len() <= 3);
        assert!(briefing.wins.len() <= 2);
        assert!(!briefing.focus.is_empty());
        assert!(briefing
            .headline()
            .contains(unit.display_name()));
    }
}

#[tokio::test]
async fn test_insights_ordering_on_real_snapshot() {
    let provider = StaticProvider::new();
    for unit in BusinessUnit::all() {
        let data = provider
            .fetch_dashboard(unit, TimePeriod::Wtd)
            .await
            .unwrap();
        let insights = analyze(&data.metrics);
        for pair in insights.windows(2) {
            assert!(pair[0].priority >= pair[1].priority);
        }
    }
}

// =============================================================================
// State + Settings Integration Tests
// =============================================================================

#[tokio::test]
async fn test_settings_survive_restart() {
    let db = Database::in_memory().expect("Failed to create settings db");
    let provider: Arc<dyn MetricsProvider> = Arc::new(StaticProvider::new());

    // First session: user flips everything away from the defaults
    let settings = db.load_settings().unwrap();
    let mut state = DashboardState::new(provider.clone(), settings).await.unwrap();
    state
        .set_business_unit(BusinessUnit::D2cBuilders)
        .await
        .unwrap();
    state.set_time_period(TimePeriod::Qtd).await.unwrap();
    state.toggle_comparison_mode();
    db.save_settings(&state.settings()).unwrap();

    // Second session: the persisted subset comes back, UI flags do not
    let settings = db.load_settings().unwrap();
    let state = DashboardState::new(provider, settings).await.unwrap();
    assert_eq!(state.business_unit(), BusinessUnit::D2cBuilders);
    assert_eq!(state.time_period(), TimePeriod::Qtd);
    assert!(state.comparison_mode());
    assert!(!state.drilldown_open());
    assert!(!state.command_bar_open());
    assert_eq!(state.data().business_unit, BusinessUnit::D2cBuilders);
}

#[tokio::test]
async fn test_drilldown_lookup_through_state() {
    let provider: Arc<dyn MetricsProvider> = Arc::new(StaticProvider::new());
    let mut state = DashboardState::new(provider, DashboardSettings::default())
        .await
        .unwrap();

    state.open_drilldown("wb-revenue").unwrap();
    let drilldown = state.drilldown("wb-revenue").expect("Drilldown missing");
    assert_eq!(drilldown.metric_label, "Revenue");

    let by_channel = drilldown.by_channel.as_ref().unwrap();
    assert_eq!(by_channel.len(), 4);

    // Channel percentages of the revenue breakdown sum to the whole
    let total: f64 = by_channel.iter().map(|c| c.row.percentage).sum();
    assert!((total - 100.0).abs() < 0.5);
}

#[tokio::test]
async fn test_comparison_through_state() {
    let provider: Arc<dyn MetricsProvider> = Arc::new(StaticProvider::new());
    let state = DashboardState::new(provider, DashboardSettings::default())
        .await
        .unwrap();

    let comparison = state.comparison("wb-revenue").await.unwrap();
    assert!(comparison.is_some());

    let comparison = state.comparison("wb-ebitda").await.unwrap();
    assert!(comparison.is_none());
}
