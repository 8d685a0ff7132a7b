use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use crate::i18n::TargetLanguage;

/// LLM Provider类型
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub enum LLMProvider {
    #[serde(rename = "openai")]
    #[default]
    OpenAI,
    #[serde(rename = "deepseek")]
    DeepSeek,
    #[serde(rename = "mistral")]
    Mistral,
    #[serde(rename = "openrouter")]
    OpenRouter,
    #[serde(rename = "anthropic")]
    Anthropic,
    #[serde(rename = "ollama")]
    Ollama,
}

impl std::fmt::Display for LLMProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LLMProvider::OpenAI => write!(f, "openai"),
            LLMProvider::DeepSeek => write!(f, "deepseek"),
            LLMProvider::Mistral => write!(f, "mistral"),
            LLMProvider::OpenRouter => write!(f, "openrouter"),
            LLMProvider::Anthropic => write!(f, "anthropic"),
            LLMProvider::Ollama => write!(f, "ollama"),
        }
    }
}

impl std::str::FromStr for LLMProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(LLMProvider::OpenAI),
            "deepseek" => Ok(LLMProvider::DeepSeek),
            "mistral" => Ok(LLMProvider::Mistral),
            "openrouter" => Ok(LLMProvider::OpenRouter),
            "anthropic" => Ok(LLMProvider::Anthropic),
            "ollama" => Ok(LLMProvider::Ollama),
            _ => Err(format!("Unknown provider: {}", s)),
        }
    }
}

/// 读取环境变量并去除首尾空白，空值视为未设置
fn env_trimmed(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// 应用程序配置
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    /// 待分析的公司名称
    pub company_name: Option<String>,

    /// 报告输出路径
    pub output_path: PathBuf,

    /// 报告目标语言
    pub target_language: TargetLanguage,

    /// LLM模型配置
    pub llm: LLMConfig,

    /// Web搜索配置
    pub search: SearchConfig,

    /// 资源平台配置
    pub resources: ResourceConfig,

    /// 流水线策略配置
    pub pipeline: PipelineConfig,

    /// 是否启用详细日志
    pub verbose: bool,
}

/// LLM模型配置
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LLMConfig {
    /// LLM Provider类型
    pub provider: LLMProvider,

    /// LLM API KEY
    pub api_key: String,

    /// LLM API基地址
    pub api_base_url: String,

    /// 高能效模型，优先用于常规推理任务（行业识别、调研综合）
    pub model_efficient: String,

    /// 高质量模型，用于复杂任务（用例生成与改写），以及作为efficient失效情况下的兜底
    pub model_powerful: String,

    /// 最大tokens
    pub max_tokens: u32,

    /// 温度
    pub temperature: f64,

    /// 单次调用的重试次数上限
    pub retry_attempts: u32,

    /// 指数退避的基础间隔（毫秒）
    pub retry_base_delay_ms: u64,

    /// 超时时间（秒）
    pub timeout_seconds: u64,
}

/// Web搜索配置
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SearchConfig {
    /// 搜索服务API KEY（缺省时从TAVILY_API_KEY读取）
    pub api_key: String,

    /// 搜索服务API基地址
    pub api_base_url: String,

    /// 单次查询返回的最大结果数
    pub max_results: usize,

    /// 单次搜索请求的超时时间（秒）
    pub request_timeout_seconds: u64,

    /// 排除的域名
    pub excluded_domains: Vec<String>,
}

/// 资源混合比例 - 各平台在最终资源集合中的目标占比
#[derive(Debug, Deserialize, Serialize, Clone, Copy)]
pub struct MixRatio {
    pub kaggle: f64,
    pub huggingface: f64,
    pub github: f64,
}

/// 资源平台配置
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ResourceConfig {
    /// Kaggle凭据，缺失时跳过该平台
    pub kaggle_username: Option<String>,
    pub kaggle_key: Option<String>,

    /// HuggingFace Token，缺失时跳过该平台
    pub huggingface_token: Option<String>,

    /// GitHub Token，缺失时跳过该平台
    pub github_token: Option<String>,

    /// 每个用例保留的资源数量下限
    pub min_resources: usize,

    /// 每个用例保留的资源数量上限
    pub max_resources: usize,

    /// 各平台目标占比
    pub mix_ratio: MixRatio,

    /// 单平台单次查询返回的候选上限
    pub max_per_platform: usize,

    /// 单次平台查询的超时时间（秒）
    pub request_timeout_seconds: u64,

    /// 并发查询上限（平台扇出与跨用例共用）
    pub max_parallels: usize,
}

/// 流水线策略配置
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PipelineConfig {
    /// 目标用例数量
    pub use_case_count: usize,

    /// 传统ML类用例占比
    pub ratio_ml_traditional: f64,

    /// GenAI类用例占比
    pub ratio_genai: f64,

    /// 非AI类用例占比
    pub ratio_other: f64,

    /// 类别分布的容差（按条数计）
    pub distribution_tolerance: usize,

    /// 分布不达标时的改写轮次上限
    pub max_rewrite_cycles: usize,
}

impl Config {
    /// 从文件加载配置
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let mut file =
            File::open(path).context(format!("Failed to open config file: {:?}", path))?;
        let mut content = String::new();
        file.read_to_string(&mut content)
            .context("Failed to read config file")?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            company_name: None,
            output_path: PathBuf::from("./prospect.reports"),
            target_language: TargetLanguage::default(),
            llm: LLMConfig::default(),
            search: SearchConfig::default(),
            resources: ResourceConfig::default(),
            pipeline: PipelineConfig::default(),
            verbose: false,
        }
    }
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            provider: LLMProvider::default(),
            api_key: env_trimmed("PROSPECT_LLM_API_KEY").unwrap_or_default(),
            api_base_url: String::from("https://api.openai.com/v1"),
            model_efficient: String::from("gpt-4o-mini"),
            model_powerful: String::from("gpt-4o"),
            max_tokens: 4096,
            temperature: 0.3,
            retry_attempts: 3,
            retry_base_delay_ms: 1000,
            timeout_seconds: 60,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_key: env_trimmed("TAVILY_API_KEY").unwrap_or_default(),
            api_base_url: String::from("https://api.tavily.com"),
            max_results: 8,
            request_timeout_seconds: 30,
            excluded_domains: vec![
                "facebook.com".to_string(),
                "twitter.com".to_string(),
                "instagram.com".to_string(),
            ],
        }
    }
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            kaggle_username: env_trimmed("KAGGLE_USERNAME"),
            kaggle_key: env_trimmed("KAGGLE_KEY"),
            huggingface_token: env_trimmed("HUGGINGFACE_TOKEN"),
            github_token: env_trimmed("GITHUB_TOKEN"),
            min_resources: 3,
            max_resources: 6,
            mix_ratio: MixRatio {
                kaggle: 0.4,
                huggingface: 0.3,
                github: 0.3,
            },
            max_per_platform: 5,
            request_timeout_seconds: 30,
            max_parallels: 3,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            use_case_count: 10,
            ratio_ml_traditional: 0.5,
            ratio_genai: 0.3,
            ratio_other: 0.2,
            distribution_tolerance: 1,
            max_rewrite_cycles: 3,
        }
    }
}

// Include tests
#[cfg(test)]
mod tests;
