//! Kaggle数据集目录Provider

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;

use crate::config::ResourceConfig;
use crate::error::ProviderError;
use crate::providers::{RawResource, ResourcePlatform, ResourceProvider};

const KAGGLE_API_BASE: &str = "https://www.kaggle.com/api/v1";

/// Kaggle公开数据集搜索，按投票数排序
pub struct KaggleProvider {
    username: String,
    key: String,
    max_results: usize,
    timeout_seconds: u64,
    http: reqwest::Client,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct KaggleDataset {
    #[serde(default)]
    title: String,
    #[serde(rename = "ref", default)]
    dataset_ref: String,
    #[serde(default)]
    subtitle: String,
    #[serde(default)]
    vote_count: i64,
    #[serde(default)]
    download_count: i64,
}

impl KaggleProvider {
    pub fn new(
        username: String,
        key: String,
        config: &ResourceConfig,
    ) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| ProviderError::Unavailable(e.to_string()))?;
        Ok(Self {
            username,
            key,
            max_results: config.max_per_platform,
            timeout_seconds: config.request_timeout_seconds,
            http,
        })
    }
}

#[async_trait]
impl ResourceProvider for KaggleProvider {
    fn platform(&self) -> ResourcePlatform {
        ResourcePlatform::Kaggle
    }

    async fn search(&self, keywords: &[String]) -> Result<Vec<RawResource>, ProviderError> {
        let query = keywords.join(" ");

        let response = self
            .http
            .get(format!("{}/datasets/list", KAGGLE_API_BASE))
            .basic_auth(&self.username, Some(&self.key))
            .query(&[("search", query.as_str()), ("sortBy", "votes")])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout(self.timeout_seconds)
                } else {
                    ProviderError::Unavailable(e.to_string())
                }
            })?;

        if response.status().as_u16() == 429 {
            return Err(ProviderError::RateLimited("kaggle".to_string()));
        }
        if !response.status().is_success() {
            return Err(ProviderError::Unavailable(format!(
                "kaggle returned status {}",
                response.status()
            )));
        }

        let datasets: Vec<KaggleDataset> = response
            .json()
            .await
            .map_err(|e| ProviderError::Unavailable(e.to_string()))?;

        Ok(datasets
            .into_iter()
            .filter(|d| !d.dataset_ref.is_empty())
            .take(self.max_results)
            .map(|d| {
                let mut metadata = HashMap::new();
                metadata.insert("votes".to_string(), d.vote_count.to_string());
                metadata.insert("downloads".to_string(), d.download_count.to_string());
                RawResource {
                    title: if d.title.is_empty() {
                        d.dataset_ref.clone()
                    } else {
                        d.title
                    },
                    url: format!("https://www.kaggle.com/datasets/{}", d.dataset_ref),
                    description: d.subtitle,
                    metadata,
                }
            })
            .collect())
    }
}
