// 三阶段分析流水线
// 调研（ResearchStage）：公司与行业搜索 + 结构化综合，失败时降级/兜底
// 用例生成（UseCaseStage）：生成→检查→改写状态机，类别分布受容差约束
// 资源收集（ResourceStage）：逐用例对资源平台受限并发扇出，评分去重后按占比选集
// 编排（Orchestrator）：串行推进各阶段，聚合最严重状态，独占运行结果

use anyhow::{Context as _, Result};
use std::sync::Arc;

use crate::config::Config;
use crate::llm::client::LLMClient;
use crate::pipeline::context::PipelineContext;
use crate::pipeline::orchestrator::Orchestrator;
use crate::providers::{ResourceRegistry, SearchProvider, tavily::TavilySearch};

pub mod context;
pub mod orchestrator;
pub mod research;
pub mod resource;
pub mod types;
pub mod usecase;

/// 启动完整分析工作流：装配Provider、执行运行、落盘报告
pub async fn launch(config: &Config) -> Result<()> {
    let company_name = config
        .company_name
        .clone()
        .context("company name is required (pass it as an argument or set company_name in prospect.toml)")?;

    let llm_client = Arc::new(LLMClient::new(config.clone())?);

    // 启动时检查模型连接
    llm_client.check_connection().await?;

    let search: Arc<dyn SearchProvider> = Arc::new(TavilySearch::new(config.search.clone())?);
    let resources = ResourceRegistry::from_config(&config.resources)?;
    let context = PipelineContext::new(llm_client, search, resources, config.clone());

    let result = Orchestrator.run(&context, &company_name).await?;

    crate::outlet::save(config, &result)?;
    Ok(())
}
