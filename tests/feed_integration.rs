//! End-to-end tests for the telegraph poller.
//!
//! Drives the real fetcher and polling loop against an in-process stub of
//! the telegraph list endpoint.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tokio::sync::watch;

use telewatch::config::FeedConfig;
use telewatch::feed::TelegraphFetcher;
use telewatch::monitor::Poller;

/// Stub state: each request advances through a scripted set of responses.
#[derive(Clone)]
struct StubState {
    request_count: Arc<AtomicUsize>,
}

fn snapshot_body(ids: &[u64]) -> String {
    let items: Vec<String> = ids
        .iter()
        .map(|id| {
            format!(
                r#"{{"id": {id}, "ctime": 1700000000, "content": "Item {id}", "category_name": "Macro"}}"#
            )
        })
        .collect();
    format!(r#"{{"data": {{"roll_data": [{}]}}}}"#, items.join(","))
}

fn json_response(body: String) -> Response {
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}

/// Scripted handler: same snapshot twice, then a server error, then a
/// snapshot with a newly published item.
async fn scripted_handler(State(state): State<StubState>) -> Response {
    match state.request_count.fetch_add(1, Ordering::SeqCst) {
        0 | 1 => json_response(snapshot_body(&[1001])),
        2 => (StatusCode::INTERNAL_SERVER_ERROR, "upstream down").into_response(),
        _ => json_response(snapshot_body(&[1002, 1001])),
    }
}

/// Handler that always returns the same snapshot.
async fn steady_handler() -> Response {
    json_response(snapshot_body(&[1001]))
}

async fn spawn_stub(router: Router) -> (String, tokio::task::JoinHandle<()>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("listener should bind");
    let address = listener.local_addr().expect("local addr should exist");
    let join_handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server should run");
    });
    (
        format!("http://{address}/nodeapi/telegraphList"),
        join_handle,
    )
}

fn stub_config(endpoint: String) -> FeedConfig {
    FeedConfig {
        endpoint,
        ..FeedConfig::default()
    }
}

#[tokio::test]
async fn poll_cycles_surface_only_new_items() {
    let state = StubState {
        request_count: Arc::new(AtomicUsize::new(0)),
    };
    let router = Router::new()
        .route("/nodeapi/telegraphList", get(scripted_handler))
        .with_state(state);
    let (endpoint, server_task) = spawn_stub(router).await;

    let fetcher = TelegraphFetcher::new(stub_config(endpoint)).expect("fetcher should build");
    let mut poller = Poller::new(fetcher, Duration::from_secs(30));
    let mut sink = Vec::new();

    // Cycle 1: first poll displays the latest item.
    poller.poll_once(&mut sink).await.unwrap();
    assert_eq!(poller.last_seen(), Some("1001"));

    // Cycle 2: identical snapshot is suppressed.
    poller.poll_once(&mut sink).await.unwrap();
    assert_eq!(poller.last_seen(), Some("1001"));

    // Cycle 3: server error is reported, state untouched.
    poller.poll_once(&mut sink).await.unwrap();
    assert_eq!(poller.last_seen(), Some("1001"));

    // Cycle 4: the newly published item displays.
    poller.poll_once(&mut sink).await.unwrap();
    assert_eq!(poller.last_seen(), Some("1002"));

    let out = std::str::from_utf8(&sink).unwrap();
    assert_eq!(out.matches("Content: Item 1001").count(), 1);
    assert_eq!(out.matches("Content: Item 1002").count(), 1);
    assert_eq!(out.matches("no new content").count(), 1);
    assert_eq!(out.matches("fetch failed").count(), 1);
    assert!(out.contains("500"));

    server_task.abort();
}

#[tokio::test]
async fn run_polls_until_cancelled() {
    let router = Router::new().route("/nodeapi/telegraphList", get(steady_handler));
    let (endpoint, server_task) = spawn_stub(router).await;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let loop_task = tokio::spawn(async move {
        let fetcher = TelegraphFetcher::new(stub_config(endpoint)).expect("fetcher should build");
        let mut poller = Poller::new(fetcher, Duration::from_millis(10));
        let mut sink = Vec::new();
        let result = poller.run(&mut sink, shutdown_rx).await;
        (result, sink)
    });

    // Let a few cycles run, then cancel.
    tokio::time::sleep(Duration::from_millis(100)).await;
    shutdown_tx.send(true).unwrap();

    let (result, sink) = tokio::time::timeout(Duration::from_secs(5), loop_task)
        .await
        .expect("loop should stop after cancellation")
        .unwrap();
    assert!(result.is_ok());

    let out = std::str::from_utf8(&sink).unwrap();
    // The item renders once; every later cycle is a status line.
    assert_eq!(out.matches("Content: Item 1001").count(), 1);
    assert!(out.contains("no new content"));

    server_task.abort();
}
