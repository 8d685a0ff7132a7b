//! 外部能力Provider契约 - 核心只通过这些窄接口访问外部世界
//!
//! 每类能力一个接口（搜索、生成、资源目录），具体实现由配置装配。
//! 资源目录Provider允许缺席（凭据未配置即不参与扇出），缺席是合法状态而非错误。

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::ProviderError;

pub mod github;
pub mod huggingface;
pub mod kaggle;
pub mod registry;
pub mod tavily;

pub use registry::ResourceRegistry;

/// 搜索深度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDepth {
    Basic,
    Advanced,
}

impl SearchDepth {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchDepth::Basic => "basic",
            SearchDepth::Advanced => "advanced",
        }
    }
}

/// 单条搜索结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

/// Web搜索Provider
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(
        &self,
        query: &str,
        depth: SearchDepth,
    ) -> Result<Vec<SearchHit>, ProviderError>;
}

/// 文本生成Provider
///
/// `extract`要求返回值符合类型`T`声明的JSON Schema，不符合时报`SchemaViolation`。
/// 生成类调用不做并行化，阶段内严格串行（改写循环依赖上一次的输出）。
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    async fn extract<T>(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<T, ProviderError>
    where
        T: JsonSchema + for<'a> Deserialize<'a> + Serialize + Send + Sync + 'static;

    async fn prompt(&self, system_prompt: &str, user_prompt: &str)
    -> Result<String, ProviderError>;
}

/// 资源平台类型
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, PartialOrd, Ord,
)]
pub enum ResourcePlatform {
    #[serde(rename = "kaggle")]
    Kaggle,
    #[serde(rename = "huggingface")]
    HuggingFace,
    #[serde(rename = "github")]
    GitHub,
}

impl std::fmt::Display for ResourcePlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourcePlatform::Kaggle => write!(f, "Kaggle"),
            ResourcePlatform::HuggingFace => write!(f, "HuggingFace"),
            ResourcePlatform::GitHub => write!(f, "GitHub"),
        }
    }
}

/// 资源平台返回的原始条目
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawResource {
    pub title: String,
    pub url: String,
    pub description: String,
    /// 平台附加信息（votes、stars、downloads等）
    pub metadata: HashMap<String, String>,
}

/// 资源目录Provider（数据集目录、模型中心、代码仓库搜索）
#[async_trait]
pub trait ResourceProvider: Send + Sync {
    fn platform(&self) -> ResourcePlatform;

    async fn search(&self, keywords: &[String]) -> Result<Vec<RawResource>, ProviderError>;
}
