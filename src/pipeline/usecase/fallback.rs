//! 兜底用例库 - 生成Provider彻底失败时的骨架用例
//!
//! 条目为行业通用的低置信度骨架，按目标分布选取，外部报告必须标明来源。

use crate::pipeline::types::{Complexity, ImpactLevel, UseCaseCategory, UseCasePortfolio};
use crate::pipeline::usecase::{GeneratedUseCase, distribution_targets, finalize_portfolio};

struct SkeletonEntry {
    title: &'static str,
    description: &'static str,
    business_impact: &'static str,
    impact: ImpactLevel,
    complexity: Complexity,
}

const ML_TRADITIONAL_POOL: &[SkeletonEntry] = &[
    SkeletonEntry {
        title: "Demand Forecasting",
        description: "Forecast demand at product and channel granularity to inform procurement, replenishment and capacity planning. Combines historical sales with seasonality and promotional signals.",
        business_impact: "Better inventory turns and fewer stockouts across planning horizons",
        impact: ImpactLevel::High,
        complexity: Complexity::Medium,
    },
    SkeletonEntry {
        title: "Predictive Maintenance",
        description: "Predict equipment failures from sensor and usage signals to minimize unplanned downtime and optimize maintenance schedules.",
        business_impact: "Reduced downtime and maintenance cost through early fault detection",
        impact: ImpactLevel::High,
        complexity: Complexity::High,
    },
    SkeletonEntry {
        title: "Customer Churn Prediction",
        description: "Identify at-risk customers from behavioral, transactional and support signals, and trigger targeted retention actions.",
        business_impact: "Improved retention and customer lifetime value",
        impact: ImpactLevel::Medium,
        complexity: Complexity::Medium,
    },
    SkeletonEntry {
        title: "Supply Chain Optimization",
        description: "Optimize inventory placement and logistics routing across the network using demand forecasts and constraint-based optimization.",
        business_impact: "Lower logistics cost and faster delivery",
        impact: ImpactLevel::High,
        complexity: Complexity::High,
    },
    SkeletonEntry {
        title: "Anomaly and Fraud Detection",
        description: "Detect anomalous transactions and operational outliers with supervised and semi-supervised models, keeping false positives manageable.",
        business_impact: "Reduced losses and earlier detection of operational issues",
        impact: ImpactLevel::Medium,
        complexity: Complexity::Medium,
    },
    SkeletonEntry {
        title: "Visual Quality Inspection",
        description: "Detect product defects on the line with computer vision models, reducing scrap and manual inspection load.",
        business_impact: "Higher product quality with less rework",
        impact: ImpactLevel::Medium,
        complexity: Complexity::High,
    },
];

const GENAI_POOL: &[SkeletonEntry] = &[
    SkeletonEntry {
        title: "Knowledge Base Assistant",
        description: "Retrieval-augmented assistant over internal documents, policies and product manuals, answering employee and customer questions with citations.",
        business_impact: "Faster access to institutional knowledge across departments",
        impact: ImpactLevel::Medium,
        complexity: Complexity::Medium,
    },
    SkeletonEntry {
        title: "Automated Report Generation",
        description: "Generate recurring operational and compliance reports from structured data and templates, with human review before distribution.",
        business_impact: "Less manual reporting effort and more consistent documentation",
        impact: ImpactLevel::Medium,
        complexity: Complexity::Low,
    },
    SkeletonEntry {
        title: "Customer Support Copilot",
        description: "Assist support agents with suggested responses, ticket summarization and routing, grounded in past resolutions.",
        business_impact: "Shorter response times and higher first-contact resolution",
        impact: ImpactLevel::High,
        complexity: Complexity::Medium,
    },
    SkeletonEntry {
        title: "Contract and Document Processing",
        description: "Extract key terms and obligations from contracts and supplier documents into structured records for review.",
        business_impact: "Faster document turnaround with fewer missed obligations",
        impact: ImpactLevel::Medium,
        complexity: Complexity::Medium,
    },
];

const OTHER_POOL: &[SkeletonEntry] = &[
    SkeletonEntry {
        title: "Data Governance Program",
        description: "Establish data ownership, quality monitoring and access policies as the foundation for analytics and AI initiatives.",
        business_impact: "Trustworthy data foundations for downstream initiatives",
        impact: ImpactLevel::Medium,
        complexity: Complexity::Medium,
    },
    SkeletonEntry {
        title: "Workflow Automation and Integration",
        description: "Automate repetitive back-office workflows and integrate siloed systems through APIs, without AI components.",
        business_impact: "Reduced manual handling and faster cycle times",
        impact: ImpactLevel::Medium,
        complexity: Complexity::Low,
    },
    SkeletonEntry {
        title: "Customer Experience Modernization",
        description: "Redesign key digital touchpoints and self-service flows based on usage analytics and customer feedback.",
        business_impact: "Higher customer satisfaction and lower service load",
        impact: ImpactLevel::Medium,
        complexity: Complexity::Medium,
    },
];

fn pool_for(category: UseCaseCategory) -> &'static [SkeletonEntry] {
    match category {
        UseCaseCategory::MlTraditional => ML_TRADITIONAL_POOL,
        UseCaseCategory::GenAi => GENAI_POOL,
        UseCaseCategory::Other => OTHER_POOL,
    }
}

/// 构造兜底用例组合：按目标分布从各类别库中取条目
pub fn skeleton_portfolio(target: usize, ratios: [f64; 3]) -> UseCasePortfolio {
    let targets = distribution_targets(target, ratios);
    let mut generated = Vec::with_capacity(target);
    let mut satisfied = true;

    for (category, quota) in [
        UseCaseCategory::MlTraditional,
        UseCaseCategory::GenAi,
        UseCaseCategory::Other,
    ]
    .into_iter()
    .zip(targets)
    {
        let pool = pool_for(category);
        if pool.len() < quota {
            satisfied = false;
        }
        for entry in pool.iter().take(quota) {
            generated.push(GeneratedUseCase {
                title: entry.title.to_string(),
                description: entry.description.to_string(),
                category,
                business_impact: entry.business_impact.to_string(),
                impact: entry.impact,
                complexity: entry.complexity,
            });
        }
    }

    let mut portfolio = finalize_portfolio(generated, satisfied);
    portfolio.fallback = true;
    portfolio
}
