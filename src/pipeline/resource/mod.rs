//! 资源收集阶段 - 为每个用例收集数据集/模型/代码仓库
//!
//! 单个用例内对各平台Provider并发扇出，单平台失败或超时只意味着该平台
//! 本次贡献零候选，绝不影响其他平台，也不会升级为运行级失败。
//! 跨用例同样以受限并发推进，约束对外部服务的总请求量。

use std::sync::Arc;

use crate::error::ProviderError;
use crate::pipeline::context::PipelineContext;
use crate::pipeline::resource::dedup::{canonicalize_url, dedup_candidates, relevance_score};
use crate::pipeline::resource::keywords::{MAX_KEYWORDS, derive_keywords};
use crate::pipeline::resource::mix::{MixRatioEnforcer, platform_counts};
use crate::pipeline::types::{ResourceCandidate, UseCase, UseCaseResourceSet};
use crate::providers::{GenerationProvider, RawResource, ResourcePlatform};
use crate::utils::threads::do_parallel_with_limit;

pub mod dedup;
pub mod keywords;
pub mod mix;

/// 资源收集阶段
#[derive(Default)]
pub struct ResourceStage;

impl ResourceStage {
    /// 为一组用例收集资源，返回序列与输入用例一一对应
    pub async fn collect<G: GenerationProvider>(
        &self,
        context: &PipelineContext<G>,
        use_cases: &[UseCase],
        industry: &str,
    ) -> Vec<UseCaseResourceSet> {
        if context.resources.is_empty() {
            println!("⚠️ 没有可用的资源平台，所有用例的资源集合为空");
            return use_cases
                .iter()
                .map(|use_case| UseCaseResourceSet::empty(use_case.id, Vec::new()))
                .collect();
        }

        let max_parallels = context.config.resources.max_parallels;
        println!(
            "📦 开始资源收集：{}个用例，{}个平台，最大并发数：{}",
            use_cases.len(),
            context.resources.len(),
            max_parallels
        );

        let collection_futures: Vec<_> = use_cases
            .iter()
            .map(|use_case| {
                let use_case = use_case.clone();
                let context = context.clone();
                let industry = industry.to_string();
                Box::pin(async move {
                    collect_for_use_case(&context, &use_case, &industry).await
                })
            })
            .collect();

        do_parallel_with_limit(collection_futures, max_parallels).await
    }
}

/// 为单个用例收集资源
async fn collect_for_use_case<G: GenerationProvider>(
    context: &PipelineContext<G>,
    use_case: &UseCase,
    industry: &str,
) -> UseCaseResourceSet {
    let mut keywords = derive_keywords(&use_case.title, &use_case.description);
    // 行业词作为补充检索上下文
    let industry_term = industry.to_lowercase();
    if !industry_term.is_empty()
        && keywords.len() < MAX_KEYWORDS
        && !keywords.contains(&industry_term)
    {
        keywords.push(industry_term);
    }

    let (candidates, failed_platforms) = fan_out_providers(context, &keywords).await;

    if candidates.is_empty() {
        println!(
            "   ⚠️ 用例「{}」所有平台均无候选资源（失败平台：{}个）",
            use_case.title,
            failed_platforms.len()
        );
        return UseCaseResourceSet::empty(use_case.id, failed_platforms);
    }

    let deduped = dedup_candidates(candidates);
    let enforcer = MixRatioEnforcer::new(&context.config.resources);
    let selection = enforcer.select(deduped);

    if enforcer.below_minimum(selection.len()) {
        println!(
            "   ⚠️ 用例「{}」候选不足，仅保留{}条资源",
            use_case.title,
            selection.len()
        );
    }

    UseCaseResourceSet {
        use_case_id: use_case.id,
        platform_counts: platform_counts(&selection),
        zero_candidate: selection.is_empty(),
        resources: selection,
        failed_platforms,
    }
}

/// 对所有注册平台并发扇出查询
///
/// 每个查询携带独立超时，慢的或失败的平台不会阻塞其余平台；
/// 各任务的结果在汇合点一次性合并，任务之间无共享可变状态。
async fn fan_out_providers<G: GenerationProvider>(
    context: &PipelineContext<G>,
    keywords: &[String],
) -> (Vec<ResourceCandidate>, Vec<ResourcePlatform>) {
    let timeout_seconds = context.config.resources.request_timeout_seconds;
    let max_parallels = context.config.resources.max_parallels;

    let query_futures: Vec<_> = context
        .resources
        .providers()
        .iter()
        .map(|provider| {
            let provider = Arc::clone(provider);
            let keywords = keywords.to_vec();
            Box::pin(async move {
                let platform = provider.platform();
                let outcome = match tokio::time::timeout(
                    std::time::Duration::from_secs(timeout_seconds),
                    provider.search(&keywords),
                )
                .await
                {
                    Ok(result) => result,
                    Err(_) => Err(ProviderError::Timeout(timeout_seconds)),
                };
                (platform, outcome)
            })
        })
        .collect();

    let outcomes = do_parallel_with_limit(query_futures, max_parallels).await;

    let mut candidates = Vec::new();
    let mut failed_platforms = Vec::new();

    for (platform, outcome) in outcomes {
        match outcome {
            Ok(raw_resources) => {
                for raw in raw_resources {
                    if let Some(candidate) = into_candidate(raw, platform, keywords) {
                        candidates.push(candidate);
                    }
                }
            }
            Err(e) => {
                // 单平台失败只影响自身，本次贡献零候选
                eprintln!("   ⚠️ {}查询失败: {}", platform, e);
                failed_platforms.push(platform);
            }
        }
    }

    (candidates, failed_platforms)
}

/// 原始条目转换为评分后的候选，URL无法规范化的条目被丢弃
fn into_candidate(
    raw: RawResource,
    platform: ResourcePlatform,
    keywords: &[String],
) -> Option<ResourceCandidate> {
    let canonical_url = canonicalize_url(&raw.url)?;
    let score = relevance_score(keywords, &raw.title, &raw.description, platform);
    Some(ResourceCandidate {
        platform,
        canonical_url,
        title: raw.title,
        description: raw.description,
        relevance_score: score,
        metadata: raw.metadata,
    })
}
