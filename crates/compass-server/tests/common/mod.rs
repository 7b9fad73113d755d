#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use compass_ai::PositioningAnalyzer;
use compass_server::app;
use compass_server::config::ServerConfig;
use compass_server::state::AppState;
use compass_store::{Competitor, CompetitorStore, PendingCompetitor, StoreError};
use serde_json::Value;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tower::util::ServiceExt;

/// Analyzer double: deterministic canned paragraph per competitor, with an
/// optional set of names whose analysis fails.
pub struct ScriptedAnalyzer {
    fail_names: HashSet<String>,
    pub calls: Mutex<Vec<String>>,
}

impl ScriptedAnalyzer {
    pub fn new() -> Self {
        Self {
            fail_names: HashSet::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_for(names: &[&str]) -> Self {
        Self {
            fail_names: names.iter().map(|n| n.to_string()).collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn canned(name: &str) -> String {
        format!("{name} targets price-sensitive SMEs with a value-first loyalty program.")
    }
}

#[async_trait]
impl PositioningAnalyzer for ScriptedAnalyzer {
    fn provider(&self) -> &str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "scripted-1"
    }

    async fn analyze(&self, competitor_name: &str) -> anyhow::Result<String> {
        self.calls
            .lock()
            .expect("calls lock")
            .push(competitor_name.to_string());
        if self.fail_names.contains(competitor_name) {
            anyhow::bail!("completion backend unavailable");
        }
        Ok(Self::canned(competitor_name))
    }
}

/// In-memory store double preserving insertion order.
pub struct MemoryStore {
    rows: Mutex<Vec<Competitor>>,
    pub update_calls: Mutex<Vec<i64>>,
    fail_list: bool,
}

impl MemoryStore {
    pub fn with_rows(rows: Vec<Competitor>) -> Self {
        Self {
            rows: Mutex::new(rows),
            update_calls: Mutex::new(Vec::new()),
            fail_list: false,
        }
    }

    pub fn failing_list() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            update_calls: Mutex::new(Vec::new()),
            fail_list: true,
        }
    }

    pub fn row(id: i64, name: &str, positioning: Option<&str>) -> Competitor {
        Competitor {
            id,
            competitor_name: name.to_string(),
            competitor_positioning: positioning.map(|p| p.to_string()),
        }
    }

    pub fn get(&self, id: i64) -> Option<Competitor> {
        self.rows
            .lock()
            .expect("rows lock")
            .iter()
            .find(|r| r.id == id)
            .cloned()
    }

    pub fn update_call_count(&self) -> usize {
        self.update_calls.lock().expect("update_calls lock").len()
    }
}

#[async_trait]
impl CompetitorStore for MemoryStore {
    async fn get_by_id(&self, id: i64) -> compass_store::Result<Option<Competitor>> {
        Ok(self.get(id))
    }

    async fn list_missing_positioning(&self) -> compass_store::Result<Vec<PendingCompetitor>> {
        if self.fail_list {
            return Err(StoreError::Api {
                status: StatusCode::SERVICE_UNAVAILABLE,
                body: "upstream store unavailable".to_string(),
            });
        }
        Ok(self
            .rows
            .lock()
            .expect("rows lock")
            .iter()
            .filter(|r| r.competitor_positioning.is_none())
            .map(|r| PendingCompetitor {
                id: r.id,
                competitor_name: r.competitor_name.clone(),
            })
            .collect())
    }

    async fn update_positioning(
        &self,
        id: i64,
        positioning: &str,
    ) -> compass_store::Result<Vec<Competitor>> {
        self.update_calls.lock().expect("update_calls lock").push(id);
        let mut rows = self.rows.lock().expect("rows lock");
        match rows.iter_mut().find(|r| r.id == id) {
            Some(row) => {
                row.competitor_positioning = Some(positioning.to_string());
                Ok(vec![row.clone()])
            }
            None => Ok(Vec::new()),
        }
    }
}

pub struct TestContext {
    pub app: axum::Router,
    pub store: Arc<MemoryStore>,
    pub analyzer: Arc<ScriptedAnalyzer>,
}

pub fn build_test_context(store: MemoryStore, analyzer: ScriptedAnalyzer) -> TestContext {
    let store = Arc::new(store);
    let analyzer = Arc::new(analyzer);
    let config: ServerConfig = toml::from_str("").expect("default config should parse");

    let state = AppState {
        analyzer: analyzer.clone(),
        store: store.clone(),
        config: Arc::new(config),
    };

    TestContext {
        app: app::build_http_app(state),
        store,
        analyzer,
    }
}

pub async fn request_no_body(
    app: &axum::Router,
    method: &str,
    uri: &str,
) -> (StatusCode, Value, Option<String>) {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request should build");

    let resp = app
        .clone()
        .oneshot(req)
        .await
        .expect("request should be handled");

    let status = resp.status();
    let trace_id = resp
        .headers()
        .get("x-trace-id")
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string());
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("body should collect");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("body should be JSON")
    };

    (status, body, trace_id)
}
