//! Supabase gateway - PostgREST calls against the quotes table

use reqwest::{Client, RequestBuilder};
use serde::Deserialize;

use crate::gateway::{GatewayError, GatewayResult, ListQuery, QuoteGateway};
use crate::models::{NewQuote, Quote, QuoteId, VotePatch};
use crate::network::client::create_client;

/// PostgREST client bound to one table
#[derive(Clone, Debug)]
pub struct SupabaseGateway {
    table_url: String,
    anon_key: String,
    client: Client,
}

impl SupabaseGateway {
    pub fn new(url: &str, anon_key: &str, table: &str) -> GatewayResult<Self> {
        let anon_key = anon_key.trim().to_string();
        if anon_key.is_empty() {
            return Err(GatewayError::InvalidConfiguration(
                "Supabase anon key must not be empty",
            ));
        }
        let table = table.trim();
        if table.is_empty() {
            return Err(GatewayError::InvalidConfiguration("Table name must not be empty"));
        }

        Ok(SupabaseGateway {
            table_url: format!("{}/{}", normalize_rest_url(url)?, table),
            anon_key,
            client: create_client(),
        })
    }

    pub fn table_url(&self) -> &str {
        &self.table_url
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", self.anon_key))
            .header("Accept", "application/json")
    }

    async fn send_rows(&self, request: RequestBuilder) -> GatewayResult<Vec<Quote>> {
        let response = self.authorized(request).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(GatewayError::Api {
                status: status.as_u16(),
                message: parse_api_error(&body),
            });
        }
        Ok(serde_json::from_str(&body)?)
    }
}

impl QuoteGateway for SupabaseGateway {
    async fn list(&self, query: &ListQuery) -> GatewayResult<Vec<Quote>> {
        let request = self.client.get(&self.table_url).query(&list_params(query));
        self.send_rows(request).await
    }

    async fn insert(&self, quote: &NewQuote) -> GatewayResult<Quote> {
        let request = self
            .client
            .post(&self.table_url)
            .header("Prefer", "return=representation")
            .json(&[quote]);
        self.send_rows(request)
            .await?
            .into_iter()
            .next()
            .ok_or(GatewayError::EmptyResponse)
    }

    async fn update(&self, id: QuoteId, patch: &VotePatch) -> GatewayResult<Quote> {
        let request = self
            .client
            .patch(&self.table_url)
            .query(&update_params(id, patch))
            .header("Prefer", "return=representation")
            .json(&patch.body());
        // No row back means the filter missed: the counter moved or the id is gone
        self.send_rows(request)
            .await?
            .into_iter()
            .next()
            .ok_or(GatewayError::Conflict(id))
    }
}

/// Base URL of the REST API, `<project>/rest/v1`
pub fn normalize_rest_url(url: &str) -> GatewayResult<String> {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(GatewayError::InvalidConfiguration("Supabase URL must not be empty"));
    }
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(GatewayError::InvalidConfiguration(
            "Supabase URL must include http:// or https://",
        ));
    }
    if trimmed.ends_with("/rest/v1") {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("{trimmed}/rest/v1"))
    }
}

/// Query-string pairs for a list call
pub fn list_params(query: &ListQuery) -> Vec<(String, String)> {
    let mut params = vec![("select".to_string(), "*".to_string())];
    if let Some(category) = &query.category {
        params.push(("category".to_string(), format!("eq.{}", category)));
    }
    let direction = if query.descending { "desc" } else { "asc" };
    params.push((
        "order".to_string(),
        format!("{}.{}", query.order_by.column(), direction),
    ));
    params.push(("limit".to_string(), query.limit.to_string()));
    params
}

/// Query-string pairs for a conditional counter update
pub fn update_params(id: QuoteId, patch: &VotePatch) -> Vec<(String, String)> {
    vec![
        ("id".to_string(), format!("eq.{}", id)),
        (patch.kind.column().to_string(), format!("eq.{}", patch.expected)),
    ]
}

#[derive(Debug, Deserialize)]
struct PostgrestError {
    message: Option<String>,
    details: Option<String>,
    hint: Option<String>,
}

fn parse_api_error(body: &str) -> String {
    if let Ok(error) = serde_json::from_str::<PostgrestError>(body) {
        let parts: Vec<String> = [error.message, error.details, error.hint]
            .into_iter()
            .flatten()
            .filter(|part| !part.trim().is_empty())
            .collect();
        if !parts.is_empty() {
            return parts.join(" - ");
        }
    }
    let compact: String = body.trim().chars().take(180).collect();
    if compact.is_empty() {
        "empty response body".to_string()
    } else {
        compact
    }
}
