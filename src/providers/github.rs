//! GitHub代码仓库搜索Provider

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;

use crate::config::ResourceConfig;
use crate::error::ProviderError;
use crate::providers::{RawResource, ResourcePlatform, ResourceProvider};

const GITHUB_API_BASE: &str = "https://api.github.com";

/// GitHub仓库搜索，按star数排序
pub struct GitHubProvider {
    token: String,
    max_results: usize,
    timeout_seconds: u64,
    http: reqwest::Client,
}

#[derive(Deserialize)]
struct SearchRepositoriesResponse {
    #[serde(default)]
    items: Vec<Repository>,
}

#[derive(Deserialize)]
struct Repository {
    #[serde(default)]
    name: String,
    #[serde(default)]
    html_url: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    stargazers_count: i64,
    #[serde(default)]
    forks_count: i64,
    #[serde(default)]
    language: Option<String>,
}

impl GitHubProvider {
    pub fn new(token: String, config: &ResourceConfig) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_seconds))
            .user_agent("prospect-rs")
            .build()
            .map_err(|e| ProviderError::Unavailable(e.to_string()))?;
        Ok(Self {
            token,
            max_results: config.max_per_platform,
            timeout_seconds: config.request_timeout_seconds,
            http,
        })
    }
}

#[async_trait]
impl ResourceProvider for GitHubProvider {
    fn platform(&self) -> ResourcePlatform {
        ResourcePlatform::GitHub
    }

    async fn search(&self, keywords: &[String]) -> Result<Vec<RawResource>, ProviderError> {
        // 附加领域限定词，避免命中无关仓库
        let query = format!("{} machine learning", keywords.join(" "));

        let response = self
            .http
            .get(format!("{}/search/repositories", GITHUB_API_BASE))
            .bearer_auth(&self.token)
            .query(&[
                ("q", query.as_str()),
                ("sort", "stars"),
                ("order", "desc"),
                ("per_page", &self.max_results.to_string()),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout(self.timeout_seconds)
                } else {
                    ProviderError::Unavailable(e.to_string())
                }
            })?;

        // GitHub对搜索接口的限流以403/429返回
        if matches!(response.status().as_u16(), 403 | 429) {
            return Err(ProviderError::RateLimited("github".to_string()));
        }
        if !response.status().is_success() {
            return Err(ProviderError::Unavailable(format!(
                "github returned status {}",
                response.status()
            )));
        }

        let body: SearchRepositoriesResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Unavailable(e.to_string()))?;

        Ok(body
            .items
            .into_iter()
            .filter(|r| !r.html_url.is_empty())
            .take(self.max_results)
            .map(|r| {
                let mut metadata = HashMap::new();
                metadata.insert("stars".to_string(), r.stargazers_count.to_string());
                metadata.insert("forks".to_string(), r.forks_count.to_string());
                if let Some(language) = &r.language {
                    metadata.insert("language".to_string(), language.clone());
                }
                RawResource {
                    title: r.name,
                    url: r.html_url,
                    description: r.description.unwrap_or_default(),
                    metadata,
                }
            })
            .collect())
    }
}
