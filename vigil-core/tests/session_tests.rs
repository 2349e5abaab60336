//! Session lifecycle ordering
//!
//! Run with: cargo test --test session_tests

mod common;

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use common::*;
use serde_json::json;
use vigil_core::config::TemplatesConfig;
use vigil_core::models::{RecordingItem, RecordingSource, SessionState, SessionTarget, ViewerClass};
use vigil_core::{SessionManager, SessionOutcome, StreamResolver};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gated_manager(
    platform: &Arc<GatedPlatform>,
    player: &Arc<RecordingPlayer>,
) -> SessionManager<Arc<RecordingPlayer>> {
    SessionManager::new(
        "surface-1",
        StreamResolver::new(platform.clone()),
        TemplatesConfig::default(),
        player.clone(),
    )
}

fn recording(source: RecordingSource, start_hour: u32) -> RecordingItem {
    RecordingItem {
        start: Utc.with_ymd_and_hms(2024, 1, 1, start_hour, 0, 0).unwrap(),
        end: Utc.with_ymd_and_hms(2024, 1, 1, start_hour + 1, 0, 0).unwrap(),
        size_bytes: 0,
        duration_seconds: 3600,
        source,
        kind: None,
        continuation_key: None,
    }
}

#[tokio::test]
async fn test_channel_change_destroys_before_create() {
    let platform = Arc::new(GatedPlatform::default());
    let player = Arc::new(RecordingPlayer::default());
    let manager = gated_manager(&platform, &player);

    let first = SessionTarget::live("C1", 1, ViewerClass::Standard);
    let second = SessionTarget::live("C1", 2, ViewerClass::Standard);
    manager.apply(Some(&credential()), Some(&first)).await.unwrap();
    manager.apply(Some(&credential()), Some(&second)).await.unwrap();

    assert_eq!(
        player.events(),
        vec![
            PlayerEvent::Created {
                handle: 1,
                url: "https://stream.test/live/C1/1".to_string(),
                template: "pcLive".to_string()
            },
            PlayerEvent::Destroyed { handle: 1 },
            PlayerEvent::Created {
                handle: 2,
                url: "https://stream.test/live/C1/2".to_string(),
                template: "pcLive".to_string()
            },
        ]
    );
}

#[tokio::test]
async fn test_never_two_live_handles() {
    let platform = Arc::new(GatedPlatform::default());
    let player = Arc::new(RecordingPlayer::default());
    let manager = gated_manager(&platform, &player);

    let targets = [
        SessionTarget::live("C1", 1, ViewerClass::Standard),
        SessionTarget::live("C1", 1, ViewerClass::Compact),
        SessionTarget::playback("C1", 1, ViewerClass::Compact, recording(RecordingSource::Local, 8)),
        SessionTarget::playback("C1", 1, ViewerClass::Compact, recording(RecordingSource::Cloud, 8)),
        SessionTarget::playback("C1", 1, ViewerClass::Compact, recording(RecordingSource::Cloud, 9)),
        SessionTarget::live("C2", 3, ViewerClass::Standard),
        SessionTarget::live("C2", 3, ViewerClass::Standard),
    ];

    for target in &targets {
        manager.apply(Some(&credential()), Some(target)).await.unwrap();
        assert!(player.live() <= 1);
    }

    assert_eq!(player.max_live(), 1);
    // The repeated last target was a no-op.
    assert_eq!(player.created_urls().len(), targets.len() - 1);
}

#[tokio::test]
async fn test_stale_resolution_creates_nothing() {
    let platform = Arc::new(GatedPlatform::default());
    let player = Arc::new(RecordingPlayer::default());
    let manager = gated_manager(&platform, &player);
    platform.gate("A");

    let a = SessionTarget::live("A", 1, ViewerClass::Standard);
    let b = SessionTarget::live("B", 1, ViewerClass::Standard);
    let cred = credential();

    let apply_a = manager.apply(Some(&cred), Some(&a));
    let apply_b = async {
        // Wait until A is parked inside its address request.
        platform.entered.notified().await;
        let outcome = manager.apply(Some(&cred), Some(&b)).await;
        platform.release("A");
        outcome
    };

    let (outcome_a, outcome_b) = tokio::join!(apply_a, apply_b);

    assert_eq!(outcome_a.unwrap(), SessionOutcome::Superseded);
    assert!(matches!(outcome_b.unwrap(), SessionOutcome::Started(_)));
    assert_eq!(player.created_urls(), vec!["https://stream.test/live/B/1".to_string()]);
    assert_eq!(manager.current().unwrap().camera_id, "B");
    assert_eq!(manager.state(), SessionState::Active);
}

#[tokio::test]
async fn test_stop_during_resolution_discards_result() {
    let platform = Arc::new(GatedPlatform::default());
    let player = Arc::new(RecordingPlayer::default());
    let manager = gated_manager(&platform, &player);
    platform.gate("A");

    let a = SessionTarget::live("A", 1, ViewerClass::Standard);
    let cred = credential();

    let apply_a = manager.apply(Some(&cred), Some(&a));
    let stopper = async {
        platform.entered.notified().await;
        assert_eq!(manager.state(), SessionState::Resolving);
        manager.stop();
        platform.release("A");
    };

    let (outcome, ()) = tokio::join!(apply_a, stopper);

    assert_eq!(outcome.unwrap(), SessionOutcome::Superseded);
    assert!(player.events().is_empty());
    assert_eq!(manager.state(), SessionState::Idle);
    assert!(manager.current().is_none());
}

#[tokio::test]
async fn test_clearing_target_tears_down() {
    let platform = Arc::new(GatedPlatform::default());
    let player = Arc::new(RecordingPlayer::default());
    let manager = gated_manager(&platform, &player);

    let target = SessionTarget::live("C1", 1, ViewerClass::Standard);
    manager.apply(Some(&credential()), Some(&target)).await.unwrap();
    let outcome = manager.apply(Some(&credential()), None).await.unwrap();

    assert_eq!(outcome, SessionOutcome::Idle);
    assert_eq!(player.live(), 0);
    assert_eq!(player.events().last(), Some(&PlayerEvent::Destroyed { handle: 1 }));
}

#[tokio::test]
async fn test_live_session_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(LIVE_ADDRESS_PATH))
        .and(body_string_contains("deviceSerial=C1"))
        .and(body_string_contains("channelNo=1"))
        .and(body_string_contains("protocol=2"))
        .and(body_string_contains("quality=1"))
        .and(body_string_contains("type=1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!({
            "id": "stream-1",
            "url": "https://open.example.com/v3/openlive/C1_1_1.m3u8"
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let player = Arc::new(RecordingPlayer::default());
    let manager = SessionManager::new(
        "surface-1",
        StreamResolver::new(client(&server)),
        TemplatesConfig::default(),
        player.clone(),
    );

    let target = SessionTarget::live("C1", 1, ViewerClass::Compact);
    let outcome = manager.apply(Some(&credential()), Some(&target)).await.unwrap();

    match outcome {
        SessionOutcome::Started(summary) => {
            assert_eq!(summary.stream_url, "https://open.example.com/v3/openlive/C1_1_1.m3u8");
            assert_eq!(summary.template, "mobileLive");
        }
        other => panic!("expected a started session, got {other:?}"),
    }
}

#[tokio::test]
async fn test_local_playback_over_http_uses_seconds() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(PLAYBACK_ADDRESS_PATH))
        .and(body_string_contains("startTime=1704096000&"))
        .and(body_string_contains("endTime=1704099600&"))
        .and(body_string_contains("source=local"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!({
            "url": "https://open.example.com/rec/C1.m3u8"
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let player = Arc::new(RecordingPlayer::default());
    let manager = SessionManager::new(
        "surface-1",
        StreamResolver::new(client(&server)),
        TemplatesConfig::default(),
        player.clone(),
    );

    let target = SessionTarget::playback("C1", 1, ViewerClass::Standard, recording(RecordingSource::Local, 8));
    manager.apply(Some(&credential()), Some(&target)).await.unwrap();

    assert_eq!(player.created_urls(), vec!["https://open.example.com/rec/C1.m3u8".to_string()]);
}

#[tokio::test]
async fn test_offline_device_surfaces_reason() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(LIVE_ADDRESS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(error_envelope("20007")))
        .mount(&server)
        .await;

    let player = Arc::new(RecordingPlayer::default());
    let manager = SessionManager::new(
        "surface-1",
        StreamResolver::new(client(&server)),
        TemplatesConfig::default(),
        player.clone(),
    );

    let target = SessionTarget::live("C1", 1, ViewerClass::Standard);
    let err = manager.apply(Some(&credential()), Some(&target)).await.unwrap_err();

    assert_eq!(err.to_string(), "Stream address unavailable: device is offline");
    assert_eq!(manager.state(), SessionState::Idle);
    assert!(player.events().is_empty());
}
