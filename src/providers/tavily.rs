//! Tavily Web搜索Provider

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::SearchConfig;
use crate::error::ProviderError;
use crate::providers::{SearchDepth, SearchHit, SearchProvider};

/// 基于Tavily REST API的搜索实现
pub struct TavilySearch {
    config: SearchConfig,
    http: reqwest::Client,
}

#[derive(Serialize)]
struct TavilyRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    search_depth: &'a str,
    max_results: usize,
    exclude_domains: &'a [String],
}

#[derive(Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<TavilyResult>,
}

#[derive(Deserialize)]
struct TavilyResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    content: String,
}

impl TavilySearch {
    pub fn new(config: SearchConfig) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| ProviderError::Unavailable(e.to_string()))?;
        Ok(Self { config, http })
    }

    fn map_request_error(&self, err: reqwest::Error) -> ProviderError {
        if err.is_timeout() {
            ProviderError::Timeout(self.config.request_timeout_seconds)
        } else {
            ProviderError::Unavailable(err.to_string())
        }
    }
}

#[async_trait]
impl SearchProvider for TavilySearch {
    async fn search(
        &self,
        query: &str,
        depth: SearchDepth,
    ) -> Result<Vec<SearchHit>, ProviderError> {
        let request = TavilyRequest {
            api_key: &self.config.api_key,
            query,
            search_depth: depth.as_str(),
            max_results: self.config.max_results,
            exclude_domains: &self.config.excluded_domains,
        };

        let response = self
            .http
            .post(format!("{}/search", self.config.api_base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        if response.status().as_u16() == 429 {
            return Err(ProviderError::RateLimited("tavily".to_string()));
        }
        if !response.status().is_success() {
            return Err(ProviderError::Unavailable(format!(
                "tavily returned status {}",
                response.status()
            )));
        }

        let body: TavilyResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Unavailable(e.to_string()))?;

        Ok(body
            .results
            .into_iter()
            .filter(|r| !r.url.is_empty())
            .map(|r| SearchHit {
                title: r.title,
                url: r.url,
                snippet: r.content,
            })
            .collect())
    }
}
