use crate::error::{Result, StoreError};
use crate::types::{Competitor, PendingCompetitor};
use crate::CompetitorStore;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::json;

/// HTTP client for a Supabase-hosted competitors table (PostgREST dialect).
#[derive(Clone)]
pub struct SupabaseStore {
    http: Client,
    base_url: String,
    api_key: String,
    table: String,
}

impl SupabaseStore {
    pub fn new(
        base_url: String,
        api_key: String,
        table: Option<String>,
        timeout_secs: Option<u64>,
    ) -> Result<Self> {
        let timeout = timeout_secs.unwrap_or(30);
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            table: table.unwrap_or_else(|| "competitors".to_string()),
        })
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    fn authed(&self, method: reqwest::Method) -> reqwest::RequestBuilder {
        self.http
            .request(method, self.table_url())
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
    }

    async fn send_rows<T: DeserializeOwned>(&self, req: reqwest::RequestBuilder) -> Result<Vec<T>> {
        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::error!(
                status = %status,
                body = %body,
                "Table API request failed"
            );
            return Err(StoreError::Api { status, body });
        }
        Ok(resp.json().await?)
    }
}

fn eq_filter(id: i64) -> String {
    format!("eq.{id}")
}

#[async_trait]
impl CompetitorStore for SupabaseStore {
    async fn get_by_id(&self, id: i64) -> Result<Option<Competitor>> {
        let req = self
            .authed(reqwest::Method::GET)
            .query(&[("select", "*"), ("id", eq_filter(id).as_str())]);
        let rows: Vec<Competitor> = self.send_rows(req).await?;
        Ok(rows.into_iter().next())
    }

    async fn list_missing_positioning(&self) -> Result<Vec<PendingCompetitor>> {
        let req = self.authed(reqwest::Method::GET).query(&[
            ("select", "id,competitor_name"),
            ("competitor_positioning", "is.null"),
        ]);
        self.send_rows(req).await
    }

    async fn update_positioning(&self, id: i64, positioning: &str) -> Result<Vec<Competitor>> {
        let req = self
            .authed(reqwest::Method::PATCH)
            .query(&[("id", eq_filter(id).as_str())])
            .header("Prefer", "return=representation")
            .json(&json!({ "competitor_positioning": positioning }));
        self.send_rows(req).await
    }
}
