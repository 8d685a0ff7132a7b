//! LLM客户端 - 提供统一的LLM服务接口

use anyhow::Result;
use async_trait::async_trait;
use rand::Rng;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::future::Future;

use crate::{
    config::Config,
    error::ProviderError,
    llm::client::utils::evaluate_befitting_model,
    providers::GenerationProvider,
};

mod providers;
pub mod utils;

use providers::ProviderClient;

/// 把底层SDK错误归类到Provider错误分类
fn classify_error(err: &anyhow::Error) -> ProviderError {
    let message = err.to_string();
    let lowered = message.to_lowercase();
    if lowered.contains("429") || lowered.contains("rate limit") || lowered.contains("quota") {
        ProviderError::RateLimited(message)
    } else if lowered.contains("deserial")
        || lowered.contains("schema")
        || lowered.contains("missing field")
        || lowered.contains("invalid type")
        || lowered.contains("no data extracted")
    {
        ProviderError::SchemaViolation(message)
    } else {
        ProviderError::Unavailable(message)
    }
}

/// LLM客户端 - 提供统一的LLM服务接口
#[derive(Clone)]
pub struct LLMClient {
    config: Config,
    client: ProviderClient,
}

impl LLMClient {
    /// 创建新的LLM客户端
    pub fn new(config: Config) -> Result<Self> {
        let client = ProviderClient::new(&config.llm)?;
        Ok(Self { client, config })
    }

    /// 检查模型连接和功能是否正常
    pub async fn check_connection(&self) -> Result<()> {
        println!("🔄 正在检查模型连接...");
        match GenerationProvider::prompt(self, "System: You are a helpful assistant.", "Hello")
            .await
        {
            Ok(_) => {
                println!("✅ 模型连接正常");
                Ok(())
            }
            Err(e) => {
                eprintln!("❌ 模型连接失败: {}", e);
                Err(e.into())
            }
        }
    }

    /// 计算第retries次重试前的退避间隔（指数退避+随机抖动）
    fn backoff_delay(&self, retries: u32) -> std::time::Duration {
        let base = self.config.llm.retry_base_delay_ms;
        let exp = base.saturating_mul(1u64 << retries.min(8));
        let jitter = rand::rng().random_range(0..=base / 4 + 1);
        std::time::Duration::from_millis(exp + jitter)
    }

    /// 通用重试逻辑，用于处理瞬态错误的重试机制
    ///
    /// 仅重试瞬态错误（不可用、限流、超时），SchemaViolation直接返回，
    /// 由调用方决定是否携带纠错信息重新生成。
    async fn retry_with_backoff<T, F, Fut>(&self, operation: F) -> Result<T, ProviderError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, anyhow::Error>>,
    {
        let max_retries = self.config.llm.retry_attempts;
        let mut retries = 0;

        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(err) => {
                    let classified = classify_error(&err);
                    if !classified.is_transient() {
                        return Err(classified);
                    }
                    retries += 1;
                    eprintln!(
                        "❌ 调用模型服务出错，重试中 (第 {} / {}次尝试): {}",
                        retries, max_retries, err
                    );
                    if retries >= max_retries {
                        return Err(classified);
                    }
                    tokio::time::sleep(self.backoff_delay(retries)).await;
                }
            }
        }
    }

    async fn extract_inner<T>(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        befitting_model: String,
        fallover_model: Option<String>,
    ) -> Result<T, ProviderError>
    where
        T: JsonSchema + for<'a> Deserialize<'a> + Serialize + Send + Sync + 'static,
    {
        let llm_config = &self.config.llm;

        let extractor =
            self.client
                .create_extractor::<T>(&befitting_model, system_prompt, llm_config);

        match self
            .retry_with_backoff(|| async { extractor.extract(user_prompt).await })
            .await
        {
            Ok(r) => Ok(r),
            Err(e) => match fallover_model {
                Some(ref model) => {
                    eprintln!(
                        "❌ 模型{}提取失败，尝试使用备选模型{}...{}",
                        befitting_model, model, e
                    );
                    let user_prompt_with_fixer = format!(
                        "{}\n\nNote: a previous attempt failed with the error \"{}\". Make sure this attempt avoids that error and strictly matches the required structure.",
                        user_prompt, e
                    );
                    Box::pin(self.extract_inner(
                        system_prompt,
                        &user_prompt_with_fixer,
                        model.clone(),
                        None,
                    ))
                    .await
                }
                None => Err(e),
            },
        }
    }
}

#[async_trait]
impl GenerationProvider for LLMClient {
    /// 数据提取方法 - 返回符合类型T结构约束的数据
    async fn extract<T>(&self, system_prompt: &str, user_prompt: &str) -> Result<T, ProviderError>
    where
        T: JsonSchema + for<'a> Deserialize<'a> + Serialize + Send + Sync + 'static,
    {
        let (befitting_model, fallover_model) =
            evaluate_befitting_model(&self.config.llm, system_prompt, user_prompt);

        self.extract_inner(system_prompt, user_prompt, befitting_model, fallover_model)
            .await
    }

    /// 单轮对话方法
    async fn prompt(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, ProviderError> {
        let (befitting_model, _) =
            evaluate_befitting_model(&self.config.llm, system_prompt, user_prompt);
        let agent = self
            .client
            .create_agent(&befitting_model, system_prompt, &self.config.llm);

        self.retry_with_backoff(|| async { agent.prompt(user_prompt).await })
            .await
    }
}
