//! End-to-end tests driving the server through `gantry-client`.

use std::collections::HashSet;
use std::time::Duration;

use gantry_client::{ClientError, GantryClient};
use gantry_core::domain::run::RunStatus;
use gantry_server::{AppState, Config};

async fn start(config: Config) -> GantryClient {
    let state = AppState::new(&config);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(gantry_server::serve(listener, state, std::future::pending()));

    GantryClient::new(format!("http://{}/", addr))
}

fn fast_config() -> Config {
    Config {
        bind_addr: "127.0.0.1:0".to_string(),
        build_duration: Duration::from_millis(30),
        ..Config::default()
    }
}

#[tokio::test]
async fn triggered_run_eventually_succeeds() {
    let client = start(fast_config()).await;

    let triggered = client.trigger(false).await.unwrap();
    assert_eq!(triggered.message, "Pipeline triggered");

    let run = client
        .wait_for_completion(
            &triggered.id,
            Duration::from_millis(10),
            Duration::from_secs(5),
        )
        .await
        .unwrap();
    assert_eq!(run.status, RunStatus::Success);
    assert!(run.started_at.is_some());
    assert!(run.completed_at.is_some());

    let logs = client.logs(&triggered.id).await.unwrap();
    assert_eq!(logs.logs, "Build completed successfully.");
}

#[tokio::test]
async fn failed_run_reports_failure() {
    let client = start(fast_config()).await;

    let triggered = client.trigger(true).await.unwrap();
    let run = client
        .wait_for_completion(
            &triggered.id,
            Duration::from_millis(10),
            Duration::from_secs(5),
        )
        .await
        .unwrap();
    assert_eq!(run.status, RunStatus::Failed);
    assert_eq!(run.logs.as_deref(), Some("Build failed."));

    let err = client.logs(&triggered.id).await.unwrap_err();
    assert!(err.is_client_error());
}

#[tokio::test]
async fn unknown_run_is_not_found() {
    let client = start(fast_config()).await;

    let err = client.status("pipeline-0").await.unwrap_err();
    assert!(err.is_not_found());
    match err {
        ClientError::ApiError { message, .. } => assert_eq!(message, "Pipeline not found"),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn wait_times_out_on_slow_build() {
    let client = start(Config {
        build_duration: Duration::from_secs(60),
        ..fast_config()
    })
    .await;

    let triggered = client.trigger(false).await.unwrap();
    let err = client
        .wait_for_completion(
            &triggered.id,
            Duration::from_millis(10),
            Duration::from_millis(100),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Timeout { .. }));
}

#[tokio::test]
async fn single_slot_runs_builds_one_at_a_time() {
    let client = start(Config {
        build_duration: Duration::from_millis(200),
        max_concurrent_builds: 1,
        ..fast_config()
    })
    .await;

    let first = client.trigger(false).await.unwrap();
    let second = client.trigger(false).await.unwrap();

    for _ in 0..10 {
        let counts = client.health().await.unwrap().runs;
        assert!(counts.in_progress <= 1);
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    for id in [&first.id, &second.id] {
        let run = client
            .wait_for_completion(id, Duration::from_millis(20), Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(run.status, RunStatus::Success);
    }
}

#[tokio::test]
async fn listing_and_health_reflect_triggered_runs() {
    let client = start(fast_config()).await;

    let mut ids = HashSet::new();
    for _ in 0..5 {
        ids.insert(client.trigger(false).await.unwrap().id);
    }
    assert_eq!(ids.len(), 5);

    let runs = client.list_runs().await.unwrap();
    assert_eq!(runs.len(), 5);
    assert!(runs.iter().all(|r| ids.contains(&r.id)));

    let health = client.health().await.unwrap();
    assert!(health.is_healthy());
    assert_eq!(health.runs.total(), 5);

    let info = client.service_info().await.unwrap();
    assert_eq!(info.service, "gantry-server");
}
