//! 运行编排器 - 三阶段流水线的唯一协调者
//!
//! 阶段严格串行：调研 → 用例生成 → 资源收集。每个阶段结束后校验产出、
//! 聚合最严重状态，并在阶段边界响应取消。运行状态由本模块独占持有，
//! 只有输入前置校验失败才会让运行彻底失败。

use chrono::Utc;
use uuid::Uuid;

use crate::error::InputError;
use crate::pipeline::context::PipelineContext;
use crate::pipeline::research::{ResearchStage, fallback_research};
use crate::pipeline::resource::ResourceStage;
use crate::pipeline::types::{
    ResearchResult, RunProgress, RunRequest, RunResult, RunStage, RunStatus, SourceStatus,
    UseCasePortfolio, UseCaseReport,
};
use crate::pipeline::usecase::{UseCaseStage, fallback::skeleton_portfolio};
use crate::providers::GenerationProvider;

/// 运行编排器
#[derive(Default)]
pub struct Orchestrator;

impl Orchestrator {
    /// 执行一次完整分析
    ///
    /// 对任何通过前置校验的输入都返回结构完整的RunResult；
    /// 质量退化通过状态字段表达，而不是错误。
    pub async fn run<G: GenerationProvider>(
        &self,
        context: &PipelineContext<G>,
        company_name: &str,
    ) -> Result<RunResult, InputError> {
        // 前置校验失败时运行不启动，这是唯一的彻底失败路径
        let request = RunRequest::new(company_name)?;

        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        println!("🚀 开始市场分析：{}（run {}）", request.company_name, run_id);

        // 阶段1：调研
        if context.cancel.is_cancelled() {
            return Ok(self.cancelled_result(run_id, &request, started_at, None, None));
        }
        let mut progress = RunProgress::at(RunStage::Research);
        println!("📈 进度 {}% - 调研阶段", progress.percent);
        let research = ResearchStage.research(context, &request.company_name).await;
        let mut worst = research.source_status;

        // 阶段2：用例生成
        if context.cancel.is_cancelled() {
            return Ok(self.cancelled_result(run_id, &request, started_at, Some(research), None));
        }
        progress = RunProgress::at(RunStage::UseCases);
        println!("📈 进度 {}% - 用例生成阶段", progress.percent);
        let pipeline_config = &context.config.pipeline;
        let ratios = [
            pipeline_config.ratio_ml_traditional,
            pipeline_config.ratio_genai,
            pipeline_config.ratio_other,
        ];
        let mut portfolio = match UseCaseStage.generate(context, &research).await {
            Ok(portfolio) => portfolio,
            Err(e) => {
                // 生成Provider彻底失败：以兜底用例库替代而不是中止运行
                eprintln!("❌ 用例生成失败，使用兜底用例库: {}", e);
                skeleton_portfolio(pipeline_config.use_case_count, ratios)
            }
        };
        if portfolio.use_cases.is_empty() {
            eprintln!("⚠️ 用例集合为空，使用兜底用例库补齐");
            portfolio = skeleton_portfolio(pipeline_config.use_case_count, ratios);
        }
        if portfolio.fallback {
            worst = worst.worst(SourceStatus::Fallback);
        }

        // 阶段3：资源收集
        if context.cancel.is_cancelled() {
            return Ok(self.cancelled_result(
                run_id,
                &request,
                started_at,
                Some(research),
                Some(portfolio),
            ));
        }
        progress = RunProgress::at(RunStage::Resources);
        println!("📈 进度 {}% - 资源收集阶段", progress.percent);
        let resource_sets = ResourceStage
            .collect(
                context,
                &portfolio.use_cases,
                &research.industry_analysis.industry,
            )
            .await;

        let reports: Vec<UseCaseReport> = portfolio
            .use_cases
            .iter()
            .cloned()
            .zip(resource_sets)
            .map(|(use_case, resources)| UseCaseReport { use_case, resources })
            .collect();

        progress = RunProgress::at(RunStage::Done);
        let result = RunResult {
            run_id,
            company_name: request.company_name.clone(),
            started_at,
            completed_at: Utc::now(),
            status: RunStatus::from(worst),
            progress,
            research,
            reports,
            distribution_compliant: portfolio.distribution_compliant,
            use_case_fallback: portfolio.fallback,
        };

        println!(
            "🏁 分析完成：{}，状态：{:?}，用例{}条",
            result.company_name,
            result.status,
            result.reports.len()
        );
        Ok(result)
    }

    /// 在阶段边界被取消时的产出：保留已完成阶段的结果，结构保持完整
    fn cancelled_result(
        &self,
        run_id: Uuid,
        request: &RunRequest,
        started_at: chrono::DateTime<Utc>,
        research: Option<ResearchResult>,
        portfolio: Option<UseCasePortfolio>,
    ) -> RunResult {
        println!("🛑 运行已在阶段边界取消：{}", request.company_name);

        let research =
            research.unwrap_or_else(|| fallback_research(&request.company_name, ""));
        let (reports, distribution_compliant, use_case_fallback) = match portfolio {
            Some(portfolio) => {
                let reports = portfolio
                    .use_cases
                    .iter()
                    .cloned()
                    .map(|use_case| {
                        let resources =
                            crate::pipeline::types::UseCaseResourceSet::empty(use_case.id, Vec::new());
                        UseCaseReport { use_case, resources }
                    })
                    .collect();
                (
                    reports,
                    portfolio.distribution_compliant,
                    portfolio.fallback,
                )
            }
            None => (Vec::new(), false, false),
        };

        RunResult {
            run_id,
            company_name: request.company_name.clone(),
            started_at,
            completed_at: Utc::now(),
            status: RunStatus::Cancelled,
            progress: RunProgress::at(RunStage::Done),
            research,
            reports,
            distribution_compliant,
            use_case_fallback,
        }
    }
}
