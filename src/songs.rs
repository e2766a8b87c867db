//! Song lookup against the iTunes search API.
//!
//! One GET, decoded as JSON. Callers either print the whole document or pull
//! out the track names.

use crate::error::{DrillError, Result};
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://itunes.apple.com";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchRequest {
    pub term: String,
    pub limit: u32,
}

impl SearchRequest {
    pub fn new(term: impl Into<String>, limit: u32) -> Self {
        Self {
            term: term.into(),
            limit,
        }
    }

    /// `{base}/search?entity=song&limit={limit}&term={term}`, with the term
    /// form-encoded.
    pub fn url(&self, base: &str) -> Result<reqwest::Url> {
        let endpoint = format!("{}/search", base.trim_end_matches('/'));
        let mut url = reqwest::Url::parse(&endpoint)
            .map_err(|e| DrillError::Config(format!("invalid songs base URL {base:?}: {e}")))?;
        url.query_pairs_mut()
            .append_pair("entity", "song")
            .append_pair("limit", &self.limit.to_string())
            .append_pair("term", &self.term);
        Ok(url)
    }
}

pub struct SongClient {
    client: reqwest::Client,
    base_url: String,
}

impl SongClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("drills/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub async fn search(&self, request: &SearchRequest) -> Result<Value> {
        let url = request.url(&self.base_url)?;
        tracing::info!(%url, "searching songs");

        let response = self.client.get(url).send().await?.error_for_status()?;
        let document = response.json::<Value>().await?;
        Ok(document)
    }
}

/// `results[*].trackName`, in order. Entries without a string track name are
/// skipped.
pub fn track_names(document: &Value) -> Vec<String> {
    document
        .get("results")
        .and_then(Value::as_array)
        .map(|results| {
            results
                .iter()
                .filter_map(|r| r.get("trackName").and_then(Value::as_str))
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}
