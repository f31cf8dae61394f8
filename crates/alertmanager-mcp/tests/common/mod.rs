//! Minimal stand-in for the Alertmanager v2 API, bound to an ephemeral port.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use alertmanager_mcp::config::Config;
use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: HashMap<String, String>,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

#[derive(Default)]
struct Upstream {
    alerts: Value,
    silences: Value,
    silence_reply: Value,
    alerts_status: Option<StatusCode>,
    requests: Vec<RecordedRequest>,
}

#[derive(Clone)]
pub struct FakeAlertmanager {
    state: Arc<Mutex<Upstream>>,
    pub base_url: String,
}

impl FakeAlertmanager {
    pub async fn start(alerts: Value) -> Self {
        let state = Arc::new(Mutex::new(Upstream {
            alerts,
            silences: json!([]),
            silence_reply: json!({"silenceID": "silence-xyz789"}),
            ..Default::default()
        }));

        let app = Router::new()
            .route("/api/v2/alerts", get(list_alerts))
            .route("/api/v2/silences", get(list_silences).post(create_silence))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            state,
            base_url: format!("http://{}", addr),
        }
    }

    pub fn set_silences(&self, silences: Value) {
        self.state.lock().unwrap().silences = silences;
    }

    pub fn set_silence_reply(&self, reply: Value) {
        self.state.lock().unwrap().silence_reply = reply;
    }

    pub fn fail_alerts_with(&self, status: StatusCode) {
        self.state.lock().unwrap().alerts_status = Some(status);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn config(&self, extra: &[(&str, &str)]) -> Config {
        let mut env: HashMap<String, String> = extra
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        env.insert("ALERTMANAGER_URL".to_string(), self.base_url.clone());
        Config::from_lookup(|key| env.get(key).cloned()).unwrap()
    }
}

type Shared = State<Arc<Mutex<Upstream>>>;

fn record(
    state: &Mutex<Upstream>,
    method: &str,
    path: &str,
    query: HashMap<String, String>,
    headers: &HeaderMap,
    body: Option<Value>,
) {
    let authorization = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state.lock().unwrap().requests.push(RecordedRequest {
        method: method.to_string(),
        path: path.to_string(),
        query,
        authorization,
        body,
    });
}

async fn list_alerts(
    State(state): Shared,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    record(&state, "GET", "/api/v2/alerts", query, &headers, None);
    let upstream = state.lock().unwrap();
    match upstream.alerts_status {
        Some(status) => (status, "upstream exploded").into_response(),
        None => Json(upstream.alerts.clone()).into_response(),
    }
}

async fn list_silences(State(state): Shared, headers: HeaderMap) -> Json<Value> {
    record(&state, "GET", "/api/v2/silences", HashMap::new(), &headers, None);
    let silences = state.lock().unwrap().silences.clone();
    Json(silences)
}

async fn create_silence(State(state): Shared, headers: HeaderMap, Json(body): Json<Value>) -> Json<Value> {
    record(&state, "POST", "/api/v2/silences", HashMap::new(), &headers, Some(body));
    let reply = state.lock().unwrap().silence_reply.clone();
    Json(reply)
}
