use crate::config::{Config, LLMProvider};
use crate::i18n::TargetLanguage;
use clap::Parser;
use std::path::PathBuf;

/// prospect-rs - 由Rust与AI驱动的市场用例勘探引擎
#[derive(Parser, Debug)]
#[command(name = "prospect-rs")]
#[command(
    about = "AI-powered market prospecting engine. It researches a company and its industry, generates a prioritized portfolio of AI use cases, and curates supporting datasets, models and repositories."
)]
#[command(author = "Sopaco")]
#[command(version)]
pub struct Args {
    /// 待分析的公司名称
    pub company: Option<String>,

    /// 报告输出路径
    #[arg(short, long, default_value = "./prospect.reports")]
    pub output_path: PathBuf,

    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// LLM Provider (openai, deepseek, mistral, openrouter, anthropic, ollama)
    #[arg(long)]
    pub llm_provider: Option<String>,

    /// LLM API基地址
    #[arg(long)]
    pub llm_api_base_url: Option<String>,

    /// LLM API KEY
    #[arg(long)]
    pub llm_api_key: Option<String>,

    /// 高能效模型，优先用于常规推理任务
    #[arg(long)]
    pub model_efficient: Option<String>,

    /// 高质量模型，优先用于复杂推理任务，以及作为efficient失效情况下的兜底
    #[arg(long)]
    pub model_powerful: Option<String>,

    /// 最大tokens数
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// 温度参数
    #[arg(long)]
    pub temperature: Option<f64>,

    /// 资源查询的最大并发数
    #[arg(long)]
    pub max_parallels: Option<usize>,

    /// 目标用例数量
    #[arg(long)]
    pub use_case_count: Option<usize>,

    /// 目标语言 (en, zh, ja, de, fr)
    #[arg(long)]
    pub target_language: Option<String>,

    /// 是否启用详细日志
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// 将CLI参数转换为配置
    pub fn into_config(self) -> Config {
        let mut config = if let Some(config_path) = &self.config {
            // 显式指定配置文件路径时从该路径加载
            Config::from_file(config_path).unwrap_or_else(|_| {
                panic!("⚠️ 警告: 无法读取配置文件 {:?}", config_path)
            })
        } else {
            // 未显式指定时尝试默认位置
            let default_config_path = std::env::current_dir()
                .unwrap_or_else(|_| std::path::PathBuf::from("."))
                .join("prospect.toml");

            if default_config_path.exists() {
                Config::from_file(&default_config_path).unwrap_or_else(|_| {
                    panic!(
                        "⚠️ 警告: 无法读取默认配置文件 {:?}",
                        default_config_path
                    )
                })
            } else {
                Config::default()
            }
        };

        // 公司名称：CLI参数优先级最高
        if let Some(company) = self.company {
            config.company_name = Some(company);
        }

        config.output_path = self.output_path;

        // 覆盖LLM配置
        if let Some(provider_str) = self.llm_provider {
            if let Ok(provider) = provider_str.parse::<LLMProvider>() {
                config.llm.provider = provider;
            } else {
                eprintln!(
                    "⚠️ 警告: 未知的provider: {}，使用默认provider",
                    provider_str
                );
            }
        }
        if let Some(llm_api_base_url) = self.llm_api_base_url {
            config.llm.api_base_url = llm_api_base_url;
        }
        if let Some(llm_api_key) = self.llm_api_key {
            config.llm.api_key = llm_api_key;
        }
        if let Some(model_efficient) = self.model_efficient {
            config.llm.model_efficient = model_efficient;
        }
        if let Some(model_powerful) = self.model_powerful {
            config.llm.model_powerful = model_powerful;
        }
        if let Some(max_tokens) = self.max_tokens {
            config.llm.max_tokens = max_tokens;
        }
        if let Some(temperature) = self.temperature {
            config.llm.temperature = temperature;
        }
        if let Some(max_parallels) = self.max_parallels {
            config.resources.max_parallels = max_parallels;
        }
        if let Some(use_case_count) = self.use_case_count {
            config.pipeline.use_case_count = use_case_count;
        }

        // 目标语言配置
        if let Some(target_language_str) = self.target_language {
            if let Ok(target_language) = target_language_str.parse::<TargetLanguage>() {
                config.target_language = target_language;
            } else {
                eprintln!(
                    "⚠️ 警告: 未知的目标语言: {}，使用默认语言 (English)",
                    target_language_str
                );
            }
        }

        config.verbose = self.verbose;

        config
    }
}

// Include tests
#[cfg(test)]
mod tests;
