//! HttpOrderStore against an in-process web app.
//!
//! Each test binds an axum server to an ephemeral port and points the
//! client at it.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use orderdesk::config::StoreConfig;
use orderdesk::{
    Dashboard, EditRequest, HttpOrderStore, OrderId, OrderStore, Section, Status, StoreError,
};

/// Bodies received on POST.
type Seen = Arc<Mutex<Vec<Value>>>;

/// Start a mock store server and return its endpoint URL.
async fn start_mock_server(app: Router) -> String {
    let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    let local_addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}/exec", local_addr)
}

fn client(endpoint: &str) -> HttpOrderStore {
    HttpOrderStore::new(
        StoreConfig::default()
            .with_endpoint(endpoint)
            .with_timeout(Duration::from_secs(5)),
    )
    .unwrap()
}

/// A store that serves `rows` and answers every POST with `reply`.
fn sheet(rows: Value, reply: Value, seen: Seen) -> Router {
    Router::new()
        .route(
            "/exec",
            get(move || {
                let rows = rows.clone();
                async move { Json(rows) }
            })
            .post(move |State(seen): State<Seen>, Json(body): Json<Value>| {
                let reply = reply.clone();
                async move {
                    seen.lock().unwrap().push(body);
                    // Spreadsheet web apps answer with text/plain
                    (
                        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                        reply.to_string(),
                    )
                }
            }),
        )
        .with_state(seen)
}

#[tokio::test]
async fn test_fetch_rows() {
    let rows = json!([{"Order ID": 101, "Customer name": "Rohan"}]);
    let endpoint =
        start_mock_server(sheet(rows.clone(), json!({"status": "success"}), Seen::default()))
            .await;

    let fetched = client(&endpoint).fetch_rows().await.unwrap();
    assert_eq!(fetched, rows);
}

#[tokio::test]
async fn test_fetch_non_success_status() {
    let app = Router::new().route(
        "/exec",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "Script error").into_response() }),
    );
    let endpoint = start_mock_server(app).await;

    let err = client(&endpoint).fetch_rows().await.unwrap_err();
    match err {
        StoreError::Status { status, body } => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(body, "Script error");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_malformed_json() {
    let app = Router::new().route("/exec", get(|| async { "<html>Sign in</html>" }));
    let endpoint = start_mock_server(app).await;

    let err = client(&endpoint).fetch_rows().await.unwrap_err();
    assert!(matches!(err, StoreError::Decode(_)));
}

#[tokio::test]
async fn test_fetch_unreachable_store() {
    // Bind then drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{}/exec", addr))
        .fetch_rows()
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Http(_)));
}

#[tokio::test]
async fn test_submit_posts_full_body() {
    let seen = Seen::default();
    let endpoint = start_mock_server(sheet(
        json!([]),
        json!({"status": "success"}),
        seen.clone(),
    ))
    .await;

    let payload = EditRequest::new(OrderId::Number(101), Status::Dispatched).to_payload();
    let reply = client(&endpoint).submit(&payload).await.unwrap();
    assert!(reply.is_success());

    let bodies = seen.lock().unwrap().clone();
    assert_eq!(
        bodies,
        vec![json!({
            "order_id": 101,
            "status": "Dispatched",
            "pan_card_link": "",
            "tracking_doc_link": ""
        })]
    );
}

#[tokio::test]
async fn test_submit_store_refusal_is_a_reply() {
    let endpoint = start_mock_server(sheet(
        json!([]),
        json!({"status": "error", "message": "Order ID not found"}),
        Seen::default(),
    ))
    .await;

    let payload = EditRequest::new(OrderId::Number(7), Status::Confirmed).to_payload();
    let reply = client(&endpoint).submit(&payload).await.unwrap();
    assert!(!reply.is_success());
    assert_eq!(reply.failure_message(), "Order ID not found");
}

#[tokio::test]
async fn test_dashboard_round_trip_over_http() {
    let seen = Seen::default();
    let endpoint = start_mock_server(sheet(
        json!([
            {"Order ID": 101, "Customer name": "Rohan", "Status": "Confirmed"},
            {"Order ID": 102, "Customer Name": "Priya", "Status": "Dispatched"},
            {"Customer name": "NoId"}
        ]),
        json!({"status": "success"}),
        seen.clone(),
    ))
    .await;

    let mut dashboard = Dashboard::new(Arc::new(client(&endpoint)));
    let report = dashboard.load().await;
    assert_eq!(report.count, 2);
    assert_eq!(report.dropped, 1);

    let dispatch: Vec<_> = dashboard
        .section(Section::Dispatch)
        .iter()
        .map(|r| r.order_id.to_string())
        .collect();
    assert_eq!(dispatch, vec!["102"]);

    let outcome = dashboard
        .save(EditRequest::new(OrderId::Number(101), Status::Dispatched))
        .await;
    assert_eq!(outcome.notice().text, "Order 101 updated successfully");
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_dashboard_warns_when_store_is_down() {
    let app = Router::new().route(
        "/exec",
        get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "maintenance").into_response() }),
    );
    let endpoint = start_mock_server(app).await;

    let mut dashboard = Dashboard::new(Arc::new(client(&endpoint)));
    let report = dashboard.load().await;
    assert_eq!(report.count, 0);
    assert!(report.notice.unwrap().text.contains("503"));
}
