//! HuggingFace Hub资源Provider

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;

use crate::config::ResourceConfig;
use crate::error::ProviderError;
use crate::providers::{RawResource, ResourcePlatform, ResourceProvider};

const HF_API_BASE: &str = "https://huggingface.co/api";

/// HuggingFace Hub搜索，同时覆盖数据集与模型两类条目
pub struct HuggingFaceProvider {
    token: String,
    max_results: usize,
    timeout_seconds: u64,
    http: reqwest::Client,
}

#[derive(Deserialize)]
struct HubEntry {
    #[serde(default)]
    id: String,
    #[serde(default)]
    downloads: i64,
    #[serde(default)]
    likes: i64,
}

impl HuggingFaceProvider {
    pub fn new(token: String, config: &ResourceConfig) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| ProviderError::Unavailable(e.to_string()))?;
        Ok(Self {
            token,
            max_results: config.max_per_platform,
            timeout_seconds: config.request_timeout_seconds,
            http,
        })
    }

    async fn list_entries(&self, kind: &str, query: &str) -> Result<Vec<HubEntry>, ProviderError> {
        let response = self
            .http
            .get(format!("{}/{}", HF_API_BASE, kind))
            .bearer_auth(&self.token)
            .query(&[
                ("search", query),
                ("limit", &self.max_results.to_string()),
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

        if response.status().as_u16() == 429 {
            return Err(ProviderError::RateLimited("huggingface".to_string()));
        }
        if !response.status().is_success() {
            return Err(ProviderError::Unavailable(format!(
                "huggingface returned status {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| ProviderError::Unavailable(e.to_string()))
    }
}

#[async_trait]
impl ResourceProvider for HuggingFaceProvider {
    fn platform(&self) -> ResourcePlatform {
        ResourcePlatform::HuggingFace
    }

    async fn search(&self, keywords: &[String]) -> Result<Vec<RawResource>, ProviderError> {
        let query = keywords.join(" ");

        let datasets = self.list_entries("datasets", &query).await?;
        // 模型列表失败不影响数据集结果
        let models = self.list_entries("models", &query).await.unwrap_or_default();

        let mut resources = Vec::new();
        for entry in datasets.into_iter().filter(|e| !e.id.is_empty()) {
            let mut metadata = HashMap::new();
            metadata.insert("type".to_string(), "dataset".to_string());
            metadata.insert("downloads".to_string(), entry.downloads.to_string());
            metadata.insert("likes".to_string(), entry.likes.to_string());
            resources.push(RawResource {
                title: entry.id.clone(),
                url: format!("https://huggingface.co/datasets/{}", entry.id),
                description: format!("HuggingFace dataset {}", entry.id),
                metadata,
            });
        }
        for entry in models.into_iter().filter(|e| !e.id.is_empty()) {
            let mut metadata = HashMap::new();
            metadata.insert("type".to_string(), "model".to_string());
            metadata.insert("downloads".to_string(), entry.downloads.to_string());
            metadata.insert("likes".to_string(), entry.likes.to_string());
            resources.push(RawResource {
                title: entry.id.clone(),
                url: format!("https://huggingface.co/{}", entry.id),
                description: format!("HuggingFace model {}", entry.id),
                metadata,
            });
        }

        Ok(resources)
    }
}
