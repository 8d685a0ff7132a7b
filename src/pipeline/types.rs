use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

use crate::error::InputError;
use crate::providers::ResourcePlatform;

/// 公司名称长度上限
pub const MAX_COMPANY_NAME_LEN: usize = 120;

/// 一次运行的输入请求，创建后不可变
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRequest {
    pub company_name: String,
}

impl RunRequest {
    /// 校验并构造请求，失败时运行不会启动
    pub fn new(company_name: &str) -> Result<Self, InputError> {
        let trimmed = company_name.trim();
        if trimmed.is_empty() {
            return Err(InputError::EmptyCompanyName);
        }
        if trimmed.chars().count() > MAX_COMPANY_NAME_LEN {
            return Err(InputError::CompanyNameTooLong {
                max: MAX_COMPANY_NAME_LEN,
            });
        }
        for c in trimmed.chars() {
            let allowed = c.is_alphanumeric()
                || matches!(c, ' ' | '.' | '&' | '-' | '\'' | ',' | '(' | ')' | '+');
            if !allowed {
                return Err(InputError::ForbiddenCharacter(c));
            }
        }
        Ok(Self {
            company_name: trimmed.to_string(),
        })
    }
}

/// 调研结果的数据来源状态，严重程度递增
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceStatus {
    Full,
    Degraded,
    Fallback,
}

impl SourceStatus {
    pub fn severity(&self) -> u8 {
        match self {
            SourceStatus::Full => 0,
            SourceStatus::Degraded => 1,
            SourceStatus::Fallback => 2,
        }
    }

    /// 取两个状态中较严重的一个
    pub fn worst(self, other: SourceStatus) -> SourceStatus {
        if other.severity() > self.severity() {
            other
        } else {
            self
        }
    }
}

/// 引用来源
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Citation {
    pub title: String,
    pub url: String,
}

/// 公司分析
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CompanyAnalysis {
    /// 整体商业模式描述
    pub business_model: String,
    /// 主要产品与服务
    pub key_offerings: Vec<String>,
    /// 所处的市场细分
    pub segments: Vec<String>,
}

/// 行业分析
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct IndustryAnalysis {
    /// 识别出的行业名称
    pub industry: String,
    /// 行业趋势
    pub trends: Vec<String>,
    /// 主要竞争者
    pub competitors: Vec<String>,
    /// 增长机会
    pub opportunities: Vec<String>,
}

/// 调研阶段产出，整个运行期间只生成一次，下游只读
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchResult {
    pub company_name: String,
    pub company_analysis: CompanyAnalysis,
    pub industry_analysis: IndustryAnalysis,
    pub citations: Vec<Citation>,
    pub source_status: SourceStatus,
}

/// 用例类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum UseCaseCategory {
    /// 传统AI/ML（视觉、预测、优化、推荐等，不含GenAI）
    #[serde(rename = "ml_traditional")]
    MlTraditional,
    /// 生成式AI（RAG、Copilot、文档智能、自然语言交互）
    #[serde(rename = "genai")]
    GenAi,
    /// 非AI的数字化改进（流程、集成、数据治理等）
    #[serde(rename = "other")]
    Other,
}

impl std::fmt::Display for UseCaseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UseCaseCategory::MlTraditional => write!(f, "AI/ML"),
            UseCaseCategory::GenAi => write!(f, "GenAI"),
            UseCaseCategory::Other => write!(f, "Digital"),
        }
    }
}

/// 实施复杂度
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Low,
    Medium,
    High,
}

/// 业务影响程度
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ImpactLevel {
    Low,
    Medium,
    High,
}

/// 单个AI用例，优先级冻结后不再变更
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UseCase {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: UseCaseCategory,
    /// 归一化优先级评分，(0, 1]，影响越高、复杂度越低评分越高
    pub priority_score: f64,
    pub business_impact: String,
    pub impact: ImpactLevel,
    pub complexity: Complexity,
}

impl UseCase {
    /// 由影响程度与复杂度计算确定性优先级评分
    pub fn compute_priority(impact: ImpactLevel, complexity: Complexity) -> f64 {
        let impact_rank = match impact {
            ImpactLevel::Low => 1.0,
            ImpactLevel::Medium => 2.0,
            ImpactLevel::High => 3.0,
        };
        let complexity_rank = match complexity {
            Complexity::Low => 1.0,
            Complexity::Medium => 2.0,
            Complexity::High => 3.0,
        };
        (impact_rank * 3.0 + (4.0 - complexity_rank)) / 12.0
    }
}

/// 用例生成阶段的产出：冻结的用例序列与合规标记
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UseCasePortfolio {
    pub use_cases: Vec<UseCase>,
    /// 类别分布是否在容差内达标
    pub distribution_compliant: bool,
    /// 是否来自兜底用例库
    pub fallback: bool,
}

/// 候选资源 - 仅在资源收集阶段存在，最终只保留胜出子集
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceCandidate {
    pub platform: ResourcePlatform,
    pub canonical_url: String,
    pub title: String,
    pub description: String,
    /// 相关性评分，[0, 1]
    pub relevance_score: f64,
    pub metadata: HashMap<String, String>,
}

/// 单个用例的最终资源集合
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UseCaseResourceSet {
    pub use_case_id: Uuid,
    pub resources: Vec<ResourceCandidate>,
    pub platform_counts: BTreeMap<ResourcePlatform, usize>,
    /// 所有平台均无候选时置位，必须上报而非静默隐藏
    pub zero_candidate: bool,
    /// 本次收集中查询失败的平台
    pub failed_platforms: Vec<ResourcePlatform>,
}

impl UseCaseResourceSet {
    pub fn empty(use_case_id: Uuid, failed_platforms: Vec<ResourcePlatform>) -> Self {
        Self {
            use_case_id,
            resources: Vec::new(),
            platform_counts: BTreeMap::new(),
            zero_candidate: true,
            failed_platforms,
        }
    }
}

/// 用例及其配套资源
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UseCaseReport {
    pub use_case: UseCase,
    pub resources: UseCaseResourceSet,
}

/// 运行所处的阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStage {
    Validation,
    Research,
    UseCases,
    Resources,
    Done,
}

/// 运行进度 - 由Orchestrator持有并随结果传递的显式值
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RunProgress {
    pub stage: RunStage,
    pub percent: u8,
}

impl RunProgress {
    pub fn at(stage: RunStage) -> Self {
        let percent = match stage {
            RunStage::Validation => 0,
            RunStage::Research => 10,
            RunStage::UseCases => 45,
            RunStage::Resources => 75,
            RunStage::Done => 100,
        };
        Self { stage, percent }
    }
}

/// 运行状态 - 各阶段状态中最严重者胜出；取消仅发生在阶段边界
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Full,
    Degraded,
    Fallback,
    Cancelled,
}

impl From<SourceStatus> for RunStatus {
    fn from(status: SourceStatus) -> Self {
        match status {
            SourceStatus::Full => RunStatus::Full,
            SourceStatus::Degraded => RunStatus::Degraded,
            SourceStatus::Fallback => RunStatus::Fallback,
        }
    }
}

/// 一次运行的完整产出，由Orchestrator独占写入一次
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    pub run_id: Uuid,
    pub company_name: String,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub status: RunStatus,
    pub progress: RunProgress,
    pub research: ResearchResult,
    pub reports: Vec<UseCaseReport>,
    /// 用例类别分布是否达标（不达标时外部报告必须呈现）
    pub distribution_compliant: bool,
    /// 用例是否来自兜底库
    pub use_case_fallback: bool,
}

// Include tests
#[cfg(test)]
mod tests;
