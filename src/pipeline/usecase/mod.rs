//! 用例生成阶段 - 生成→检查→改写循环
//!
//! 显式有限状态机：DRAFTING起草、CHECKING核对类别分布、REWRITING定向改写，
//! 迭代次数有界，耗尽预算后接受最接近的结果并将合规标记置为false。
//! 整个循环串行执行，改写依赖上一轮的输出。

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ProviderError;
use crate::pipeline::context::PipelineContext;
use crate::pipeline::types::{
    Complexity, ImpactLevel, ResearchResult, UseCase, UseCaseCategory, UseCasePortfolio,
};
use crate::providers::GenerationProvider;

pub mod fallback;

/// 类别的固定遍历顺序
pub(crate) const CATEGORIES: [UseCaseCategory; 3] = [
    UseCaseCategory::MlTraditional,
    UseCaseCategory::GenAi,
    UseCaseCategory::Other,
];

/// 类别在生成Schema中的标签名
fn category_tag(category: UseCaseCategory) -> &'static str {
    match category {
        UseCaseCategory::MlTraditional => "ml_traditional",
        UseCaseCategory::GenAi => "genai",
        UseCaseCategory::Other => "other",
    }
}

/// 状态机状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StageState {
    Drafting,
    Checking,
    Rewriting,
    Done,
}

/// 生成Provider返回的单个用例草稿
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GeneratedUseCase {
    /// 清晰的描述性标题
    pub title: String,
    /// 业务背景、目标与技术路径
    pub description: String,
    pub category: UseCaseCategory,
    /// 业务价值说明（定性，不含数字百分比）
    pub business_impact: String,
    pub impact: ImpactLevel,
    pub complexity: Complexity,
}

/// 生成Provider返回的完整草稿
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UseCaseDraft {
    pub use_cases: Vec<GeneratedUseCase>,
}

/// 按占比计算各类别的目标条数（最大余数法，总和等于target）
pub(crate) fn distribution_targets(target: usize, ratios: [f64; 3]) -> [usize; 3] {
    let mut counts = [0usize; 3];
    let mut remainders: Vec<(usize, f64)> = Vec::with_capacity(3);
    let mut assigned = 0usize;

    for (i, ratio) in ratios.iter().enumerate() {
        let exact = ratio.max(0.0) * target as f64;
        counts[i] = exact.floor() as usize;
        assigned += counts[i];
        remainders.push((i, exact - exact.floor()));
    }

    // 余数大者优先补齐，余数相同时靠前的类别优先
    remainders.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    let mut shortfall = target.saturating_sub(assigned);
    for (i, _) in remainders {
        if shortfall == 0 {
            break;
        }
        counts[i] += 1;
        shortfall -= 1;
    }

    counts
}

/// 观测到的类别直方图
pub(crate) fn category_histogram(use_cases: &[GeneratedUseCase]) -> [usize; 3] {
    let mut histogram = [0usize; 3];
    for use_case in use_cases {
        let index = CATEGORIES
            .iter()
            .position(|c| *c == use_case.category)
            .unwrap_or(2);
        histogram[index] += 1;
    }
    histogram
}

/// 直方图与目标分布的总偏差（条数）
pub(crate) fn distribution_deviation(histogram: [usize; 3], targets: [usize; 3]) -> usize {
    histogram
        .iter()
        .zip(targets.iter())
        .map(|(observed, target)| observed.abs_diff(*target))
        .sum()
}

/// 每个类别的偏差都在容差内即视为达标
pub(crate) fn is_compliant(histogram: [usize; 3], targets: [usize; 3], tolerance: usize) -> bool {
    histogram
        .iter()
        .zip(targets.iter())
        .all(|(observed, target)| observed.abs_diff(*target) <= tolerance)
}

/// 用例生成阶段
#[derive(Default)]
pub struct UseCaseStage;

impl UseCaseStage {
    /// 生成目标数量的分类用例
    ///
    /// 返回`Err`表示Provider在所有重试后仍完全失败（FAILED状态），
    /// 此时由Orchestrator以兜底用例库替代，而不是中止运行。
    pub async fn generate<G: GenerationProvider>(
        &self,
        context: &PipelineContext<G>,
        research: &ResearchResult,
    ) -> Result<UseCasePortfolio, ProviderError> {
        let pipeline_config = &context.config.pipeline;
        let target = pipeline_config.use_case_count;
        let targets = distribution_targets(
            target,
            [
                pipeline_config.ratio_ml_traditional,
                pipeline_config.ratio_genai,
                pipeline_config.ratio_other,
            ],
        );
        let tolerance = pipeline_config.distribution_tolerance;

        println!(
            "💡 开始用例生成：目标{}条（AI/ML {} / GenAI {} / 其他 {}）",
            target, targets[0], targets[1], targets[2]
        );

        let system_prompt = format!(
            "{}\n\n{}",
            draft_system_prompt(&research.company_name, &research.industry_analysis.industry),
            context.config.target_language.prompt_instruction()
        );

        let mut state = StageState::Drafting;
        let mut user_prompt = draft_user_prompt(research, target, targets);
        let mut draft_retries: u32 = 0;
        let mut rewrite_cycles: usize = 0;
        // 预算耗尽时退而求其次的最优草稿
        let mut best: Option<(Vec<GeneratedUseCase>, usize)> = None;
        let mut current: Vec<GeneratedUseCase> = Vec::new();
        let mut compliant = false;

        while state != StageState::Done {
            match state {
                StageState::Drafting | StageState::Rewriting => {
                    match context
                        .generation
                        .extract::<UseCaseDraft>(&system_prompt, &user_prompt)
                        .await
                    {
                        Ok(draft) => {
                            current = draft.use_cases;
                            // 超出目标数量时保留前target条
                            current.truncate(target);
                            state = StageState::Checking;
                        }
                        Err(e @ ProviderError::SchemaViolation(_)) => {
                            draft_retries += 1;
                            if draft_retries >= context.config.llm.retry_attempts {
                                return self.settle_or_fail(best, e);
                            }
                            eprintln!(
                                "⚠️ 用例草稿结构不合规，重新起草 (第 {} / {} 次): {}",
                                draft_retries, context.config.llm.retry_attempts, e
                            );
                            user_prompt = format!(
                                "{}\n\nNote: a previous attempt failed with \"{}\". Return data that strictly matches the required structure.",
                                draft_user_prompt(research, target, targets),
                                e
                            );
                            state = StageState::Drafting;
                        }
                        Err(e) => {
                            // 瞬态错误的重试已在Provider内部耗尽
                            return self.settle_or_fail(best, e);
                        }
                    }
                }
                StageState::Checking => {
                    let histogram = category_histogram(&current);
                    let count_ok = current.len() == target;

                    if count_ok && is_compliant(histogram, targets, tolerance) {
                        compliant = true;
                        state = StageState::Done;
                        continue;
                    }

                    let deviation = distribution_deviation(histogram, targets)
                        + target.abs_diff(current.len());
                    if best.as_ref().map(|(_, d)| deviation < *d).unwrap_or(true) {
                        best = Some((current.clone(), deviation));
                    }

                    rewrite_cycles += 1;
                    if rewrite_cycles >= pipeline_config.max_rewrite_cycles {
                        // 接受最接近的结果，合规标记置false，由外部报告呈现
                        println!(
                            "⚠️ 分布校正预算耗尽（{}轮），接受最接近的用例集",
                            rewrite_cycles
                        );
                        if let Some((best_draft, _)) = best.take() {
                            current = best_draft;
                        }
                        compliant = false;
                        state = StageState::Done;
                        continue;
                    }

                    println!(
                        "🔁 类别分布不达标（观测 {}/{}/{}，目标 {}/{}/{}），进入改写",
                        histogram[0], histogram[1], histogram[2], targets[0], targets[1], targets[2]
                    );
                    user_prompt = rewrite_user_prompt(&current, histogram, targets, target);
                    state = StageState::Rewriting;
                }
                StageState::Done => unreachable!(),
            }
        }

        println!("✅ 用例生成完成：{}条，分布达标：{}", current.len(), compliant);
        Ok(finalize_portfolio(current, compliant))
    }

    /// Provider彻底失败时：有历史草稿则降级采用，否则上抛由Orchestrator兜底
    fn settle_or_fail(
        &self,
        best: Option<(Vec<GeneratedUseCase>, usize)>,
        error: ProviderError,
    ) -> Result<UseCasePortfolio, ProviderError> {
        match best {
            Some((draft, _)) if !draft.is_empty() => {
                eprintln!("⚠️ 用例生成中断，采用此前最接近的草稿: {}", error);
                Ok(finalize_portfolio(draft, false))
            }
            _ => Err(error),
        }
    }
}

/// 确定性排序并冻结用例序列
///
/// 影响越高、复杂度越低优先；stable sort保证同分时保持生成顺序。
pub(crate) fn finalize_portfolio(
    generated: Vec<GeneratedUseCase>,
    distribution_compliant: bool,
) -> UseCasePortfolio {
    let mut use_cases: Vec<UseCase> = generated
        .into_iter()
        .map(|g| UseCase {
            id: Uuid::new_v4(),
            priority_score: UseCase::compute_priority(g.impact, g.complexity),
            title: g.title,
            description: g.description,
            category: g.category,
            business_impact: g.business_impact,
            impact: g.impact,
            complexity: g.complexity,
        })
        .collect();

    use_cases.sort_by(|a, b| {
        b.priority_score
            .partial_cmp(&a.priority_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    UseCasePortfolio {
        use_cases,
        distribution_compliant,
        fallback: false,
    }
}

fn draft_system_prompt(company_name: &str, industry: &str) -> String {
    format!(
        r#"You are an expert AI/ML consultant generating development use cases for {company} in the {industry} industry.

Category definitions:
- ml_traditional: AI/ML/DL excluding GenAI (computer vision, forecasting, optimization, anomaly detection, recommendation systems, non-generative NLP)
- genai: generative AI (RAG, agents, copilots, content generation, document AI, natural-language interfaces)
- other: non-AI development (new products, process automation without AI, data governance, integration, UX)

Every use case must be specific to {company}: tie it to their actual offerings, segments and industry trends from the provided analysis. Describe qualitative business value without numeric percentages."#,
        company = company_name,
        industry = industry
    )
}

fn draft_user_prompt(research: &ResearchResult, target: usize, targets: [usize; 3]) -> String {
    let research_context =
        serde_json::to_string_pretty(&serde_json::json!({
            "company_analysis": research.company_analysis,
            "industry_analysis": research.industry_analysis,
        }))
        .unwrap_or_default();

    format!(
        r#"Generate exactly {target} use cases for {company}.

DISTRIBUTION REQUIREMENT (STRICT):
- exactly {ml} use cases with category "ml_traditional"
- exactly {genai} use cases with category "genai"
- exactly {other} use cases with category "other"

RESEARCH CONTEXT:
{context}

For each use case provide a title, a 3-5 sentence description, the category, a qualitative business_impact statement, an impact level (low/medium/high) and an implementation complexity (low/medium/high)."#,
        target = target,
        company = research.company_name,
        ml = targets[0],
        genai = targets[1],
        other = targets[2],
        context = research_context
    )
}

/// 改写指令：点名需要调整的类别，保留已达标条目
fn rewrite_user_prompt(
    current: &[GeneratedUseCase],
    histogram: [usize; 3],
    targets: [usize; 3],
    target: usize,
) -> String {
    let mut adjustments = Vec::new();
    for (i, category) in CATEGORIES.iter().enumerate() {
        if histogram[i] > targets[i] {
            adjustments.push(format!(
                "- category \"{}\": reduce from {} to {}",
                category_tag(*category), histogram[i], targets[i]
            ));
        } else if histogram[i] < targets[i] {
            adjustments.push(format!(
                "- category \"{}\": increase from {} to {}",
                category_tag(*category), histogram[i], targets[i]
            ));
        }
    }

    let current_json = serde_json::to_string_pretty(current).unwrap_or_default();

    format!(
        r#"The following draft of {target} use cases does not meet the required category distribution.

Required adjustments:
{adjustments}

Rules:
- Keep use cases in already-compliant categories unchanged.
- Replace surplus use cases with new ones in the undersupplied categories, staying specific to the company.
- Return the full corrected list of exactly {target} use cases.

CURRENT DRAFT:
{draft}"#,
        target = target,
        adjustments = adjustments.join("\n"),
        draft = current_json
    )
}

// Include tests
#[cfg(test)]
mod tests;
