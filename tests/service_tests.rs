//! StatusService orchestration: one probe, one history entry per check.

mod common;

use common::{build_test_state, MockSite, TestConfigBuilder};
use statuspulse::error::AppError;

#[tokio::test]
async fn every_check_appends_exactly_one_record() {
    let mock = MockSite::start().await;
    mock.respond_with_status(200).await;

    let state = build_test_state(TestConfigBuilder::new().build()).await;
    let site = state.sites.register(&mock.uri()).await.unwrap();

    for expected_len in 1..=4usize {
        let (checked_site, record) = state.status.check(site.id).await.unwrap();
        assert_eq!(checked_site.id, site.id);
        assert_eq!(record.site_id, site.id);
        assert!(record.online);
        assert!(record.response_time_ms >= 0.0);

        let history = state.history.list(site.id, None).await.unwrap();
        assert_eq!(history.len(), expected_len);
        // The newest entry is the one just returned.
        assert_eq!(history[0], record);
    }
}

#[tokio::test]
async fn failed_lookup_probes_nothing_and_writes_nothing() {
    let mock = MockSite::start().await;
    mock.respond_with_status(200).await;

    let state = build_test_state(TestConfigBuilder::new().build()).await;
    let site = state.sites.register(&mock.uri()).await.unwrap();

    let err = state.status.check(site.id + 1).await.unwrap_err();
    assert!(matches!(err, AppError::SiteNotFound { .. }));

    assert!(state.history.list(site.id, None).await.unwrap().is_empty());
    assert!(mock.server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn offline_results_are_recorded_like_online_ones() {
    let state = build_test_state(TestConfigBuilder::new().build()).await;
    let site = state.sites.register("http://127.0.0.1:1").await.unwrap();

    let (_, record) = state.status.check(site.id).await.unwrap();
    assert!(!record.online);
    assert_eq!(record.status_code, None);

    let history = state.history.list(site.id, None).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0], record);
}

#[tokio::test]
async fn concurrent_checks_for_one_site_all_land_in_history() {
    let mock = MockSite::start().await;
    mock.respond_with_status(200).await;

    let state = build_test_state(TestConfigBuilder::new().build()).await;
    let site = state.sites.register(&mock.uri()).await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let status = state.status.clone();
        let site_id = site.id;
        handles.push(tokio::spawn(async move { status.check(site_id).await }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    // Appends are serialized: no entry is lost or interleaved.
    let history = state.history.list(site.id, None).await.unwrap();
    assert_eq!(history.len(), 8);
    assert!(history.iter().all(|record| record.site_id == site.id));
}
