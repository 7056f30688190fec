use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{header, HeaderMap};
use axum::routing::post;
use axum::{Json, Router};
use chrono::{FixedOffset, Local, TimeZone, Utc};
use dashboard_core::{
    Api, DashboardConfig, NotificationDraft, NotificationState, Period, Selection, SymbolDetail,
};
use serde_json::{json, Value};
use stock_dashboard::symbols::{self, SymbolsArgs};
use stock_dashboard::transport::ReqwestTransport;
use tokio::net::TcpListener;

const SESSION: &str = "session=valid";

#[derive(Clone, Default)]
struct StubState {
    calls: Arc<AtomicUsize>,
    notification: Arc<Mutex<Option<Value>>>,
    fail_next_delete: Arc<AtomicBool>,
}

impl StubState {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

fn error_payload(code: &str) -> Value {
    json!({ "data": null, "errors": [{ "message": code.to_lowercase(), "extensions": { "code": code } }] })
}

fn symbols_payload(chart_input: &Value) -> Value {
    let charted = chart_input.get("symbol").and_then(Value::as_str);
    let symbols: Vec<Value> = [("AAPL", "Apple"), ("GOOGL", "Alphabet"), ("7203.T", "TOYOTA")]
        .iter()
        .map(|(code, name)| {
            let chart = if charted == Some(*code) {
                json!([
                    { "symbol": code, "timestamp": "2025-01-02T00:00:00Z", "price": 100.0 },
                    null,
                    { "symbol": code, "timestamp": "2025-02-03T00:00:00Z", "price": 110.25 }
                ])
            } else {
                json!([])
            };
            json!({
                "id": format!("id-{code}"),
                "symbol": code,
                "detail": {
                    "symbol": code,
                    "shortName": name,
                    "longName": format!("{name} Inc."),
                    "price": 123.45,
                    "change": "+1.00",
                    "changePercent": "+0.82%",
                    "currencySymbol": "$"
                },
                "chart": chart
            })
        })
        .collect();
    json!({ "data": { "symbols": symbols } })
}

async fn graphql(State(state): State<StubState>, headers: HeaderMap, Json(request): Json<Value>) -> Json<Value> {
    state.calls.fetch_add(1, Ordering::SeqCst);
    let authorized = headers
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|cookie| cookie == SESSION);
    let variables = &request["variables"];

    let response = match request["operationName"].as_str().unwrap_or_default() {
        "GetSymbols" => symbols_payload(&variables["chartInput"]),
        _ if !authorized => error_payload("UNAUTHORIZED"),
        "getNotification" => {
            json!({ "data": { "notification": state.notification.lock().unwrap().clone() } })
        }
        "createNotification" => {
            let input = &variables["createNotificationInput"];
            let targets: Vec<Value> = input["symbols"]
                .as_array()
                .cloned()
                .unwrap_or_default()
                .into_iter()
                .map(|symbol| json!({ "id": format!("t-{}", symbol.as_str().unwrap()), "symbol": symbol, "shortName": symbol }))
                .collect();
            let created = json!({ "id": "n1", "time": input["time"], "targets": targets });
            *state.notification.lock().unwrap() = Some(created.clone());
            json!({ "data": { "createNotification": created } })
        }
        "deleteNotification" => {
            if state.fail_next_delete.swap(false, Ordering::SeqCst) {
                error_payload("INTERNAL_SERVER_ERROR")
            } else {
                state.notification.lock().unwrap().take();
                json!({ "data": { "deleteNotification": "n1" } })
            }
        }
        other => error_payload(&format!("UNKNOWN_{other}")),
    };
    Json(response)
}

async fn start_stub() -> (SocketAddr, StubState) {
    let state = StubState::default();
    let app = Router::new().route("/query", post(graphql)).with_state(state.clone());
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub");
    let addr = listener.local_addr().expect("stub address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub server");
    });
    (addr, state)
}

fn api_for(addr: SocketAddr, session: Option<&str>) -> Api<ReqwestTransport> {
    let config = DashboardConfig::new(format!("http://{addr}"), true);
    let transport = ReqwestTransport::new(&config, session.map(str::to_string)).expect("transport");
    assert_eq!(transport.endpoint(), format!("http://{addr}/query"));
    Api::new(transport)
}

#[tokio::test]
async fn symbols_round_trip_and_cache() {
    let (addr, stub) = start_stub().await;
    let api = api_for(addr, None);
    let now = Utc.with_ymd_and_hms(2025, 3, 31, 3, 0, 0).unwrap();

    let mut selection = Selection::default();
    let listing = api.symbols(&selection.chart_range(&now)).await.expect("symbols");
    assert_eq!(listing.len(), 3);
    assert!(listing.iter().all(|entry| !entry.has_chart()));

    assert!(selection.sync(listing.iter().map(|entry| &entry.detail)));
    selection.set_period(Period::Month6);
    let scoped = api.symbols(&selection.chart_range(&now)).await.expect("scoped symbols");
    let charted: Vec<&str> = scoped
        .iter()
        .filter(|entry| entry.has_chart())
        .map(|entry| entry.symbol.as_str())
        .collect();
    assert_eq!(charted, vec!["AAPL"]);

    api.symbols(&selection.chart_range(&now)).await.expect("cached symbols");
    assert_eq!(stub.calls(), 2);
}

#[tokio::test]
async fn symbols_command_renders_a_page() {
    let (addr, _stub) = start_stub().await;
    let api = api_for(addr, None);

    let args = SymbolsArgs {
        query: "a".into(),
        page_size: 2,
        ..SymbolsArgs::default()
    };
    symbols::run(&api, args.clone()).await.expect("symbols command");

    let entries = api
        .symbols(&Selection::default().chart_range(&Local::now()))
        .await
        .expect("symbols");
    let details: Vec<SymbolDetail> = entries.into_iter().map(|entry| entry.detail).collect();

    let first = symbols::paginate(&details, &args);
    assert_eq!((first.page, first.total_pages), (1, 2));
    assert!(first.lines[1].starts_with("AAPL "));
    assert!(first.lines[2].starts_with("GOOGL "));
    assert_eq!(first.lines.last().map(String::as_str), Some("page 1 / 2"));

    let second = symbols::paginate(&details, &SymbolsArgs { page: 2, ..args });
    assert_eq!(second.lines.len(), 3);
    assert!(second.lines[1].starts_with("7203.T "));
    assert_eq!(second.lines[2], "page 2 / 2");
}

#[tokio::test]
async fn missing_session_requires_login() {
    let (addr, stub) = start_stub().await;
    let api = api_for(addr, None);

    let result = api.notification().await;
    assert!(matches!(&result, Err(err) if err.is_unauthorized()));
    assert_eq!(stub.calls(), 1, "authorization errors are not retried");
    assert!(!NotificationState::from_result(result).is_authorized());
}

#[tokio::test]
async fn create_then_delete_refreshes_the_notification() {
    let (addr, stub) = start_stub().await;
    let api = api_for(addr, Some(SESSION));

    assert_eq!(api.notification().await.expect("initial read"), None);

    let mut draft = NotificationDraft::default();
    draft.set_time("08:30");
    draft.toggle("AAPL");
    draft.toggle("7203.T");
    let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
    let now = tokyo.with_ymd_and_hms(2025, 6, 1, 20, 0, 0).unwrap();
    let input = draft.validate(&now).expect("valid draft");
    assert_eq!(input.time.to_rfc3339(), "2025-05-31T23:00:00+00:00");

    let created = api.create_notification(&input).await.expect("create");
    assert_eq!(created.targets.len(), 2);

    let current = api.notification().await.expect("re-read").expect("registered");
    assert_eq!(current.id, "n1");

    stub.fail_next_delete.store(true, Ordering::SeqCst);
    let before = stub.calls();
    assert_eq!(api.delete_notification().await.expect("delete after retry"), "n1");
    assert_eq!(stub.calls() - before, 2, "internal errors are retried once");

    assert_eq!(api.notification().await.expect("after delete"), None);
}
