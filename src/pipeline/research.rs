//! 调研阶段 - 公司与行业研究
//!
//! 搜索-综合两步走：先围绕公司与行业发起Web搜索，再将归一化后的
//! 上下文交给生成Provider做结构化综合。任何失败都在本阶段内消化，
//! 下游永远能拿到一个格式完好的ResearchResult。

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::pipeline::context::PipelineContext;
use crate::pipeline::types::{
    Citation, CompanyAnalysis, IndustryAnalysis, ResearchResult, SourceStatus,
};
use crate::providers::{GenerationProvider, SearchDepth, SearchHit};

/// 拼接进提示词的搜索上下文长度上限（字符）
const MAX_CONTEXT_CHARS: usize = 16384;

/// 行业识别失败时的缺省行业
const DEFAULT_INDUSTRY: &str = "Technology";

/// 调研综合的结构化输出
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
struct ResearchExtraction {
    company_analysis: CompanyAnalysis,
    industry_analysis: IndustryAnalysis,
    citations: Vec<Citation>,
}

const SYNTHESIS_SYSTEM_PROMPT: &str = r#"You are an expert business analyst specializing in industry research and company analysis.

Based on the provided web search material, produce a structured analysis covering:
1. The company's business model, key offerings and market segments
2. The industry it operates in, with current trends, main competitors and growth opportunities
3. Citations for the sources you relied on (full URLs)

Use only information supported by the search material. Prefer official company pages and reputable media. No generic filler."#;

/// 调研阶段
#[derive(Default)]
pub struct ResearchStage;

impl ResearchStage {
    /// 执行调研，永不向上抛出错误
    pub async fn research<G: GenerationProvider>(
        &self,
        context: &PipelineContext<G>,
        company_name: &str,
    ) -> ResearchResult {
        println!("🔍 开始公司调研：{}", company_name);

        // 1. 公司侧搜索（多条定向查询，结果合并）
        let (company_hits, company_search_ok) =
            self.run_company_searches(context, company_name).await;

        // 2. 行业识别
        let industry = self
            .identify_industry(context, company_name, &company_hits)
            .await;
        println!("   🏭 识别行业：{}", industry);

        // 3. 行业侧搜索
        let (industry_hits, industry_search_ok) =
            self.run_industry_search(context, &industry).await;

        let search_ok = company_search_ok || industry_search_ok;
        if !search_ok {
            eprintln!("⚠️ 搜索Provider不可用，调研进入降级路径");
        }

        // 4. 结构化综合
        let company_context = build_search_context(&company_hits);
        let industry_context = build_search_context(&industry_hits);

        match self
            .synthesize(context, company_name, &industry, &company_context, &industry_context)
            .await
        {
            Ok(mut extraction) => {
                if extraction.citations.is_empty() {
                    extraction.citations = derive_citations(&company_hits, &industry_hits);
                }
                let source_status = if search_ok {
                    SourceStatus::Full
                } else {
                    SourceStatus::Degraded
                };
                println!("✅ 调研完成（{:?}）", source_status);
                ResearchResult {
                    company_name: company_name.to_string(),
                    company_analysis: extraction.company_analysis,
                    industry_analysis: extraction.industry_analysis,
                    citations: extraction.citations,
                    source_status,
                }
            }
            Err(e) => {
                eprintln!("❌ 调研综合失败，使用兜底结果: {}", e);
                fallback_research(company_name, &industry)
            }
        }
    }

    /// 公司侧多查询搜索，返回合并结果与搜索是否可用
    async fn run_company_searches<G: GenerationProvider>(
        &self,
        context: &PipelineContext<G>,
        company_name: &str,
    ) -> (Vec<SearchHit>, bool) {
        let queries = company_queries(company_name);
        let mut hits = Vec::new();
        let mut any_success = false;

        for query in &queries {
            match context.search.search(query, SearchDepth::Advanced).await {
                Ok(results) => {
                    any_success = true;
                    hits.extend(results);
                }
                Err(e) => {
                    eprintln!("⚠️ 公司搜索失败 '{}': {}", query, e);
                }
            }
        }

        (hits, any_success)
    }

    async fn run_industry_search<G: GenerationProvider>(
        &self,
        context: &PipelineContext<G>,
        industry: &str,
    ) -> (Vec<SearchHit>, bool) {
        let query = format!(
            "{} industry latest trends market dynamics growth opportunities AI adoption competitive landscape",
            industry
        );
        match context.search.search(&query, SearchDepth::Advanced).await {
            Ok(results) => (results, true),
            Err(e) => {
                eprintln!("⚠️ 行业搜索失败: {}", e);
                (Vec::new(), false)
            }
        }
    }

    /// 从公司搜索结果中识别所属行业
    async fn identify_industry<G: GenerationProvider>(
        &self,
        context: &PipelineContext<G>,
        company_name: &str,
        hits: &[SearchHit],
    ) -> String {
        let search_context = build_search_context(hits);
        let user_prompt = format!(
            "Based on the following information about {}, identify the primary industry this company operates in. Return only the industry name (e.g. \"Healthcare\", \"Automotive\", \"Finance\", \"Retail\", \"Manufacturing\").\n\n{}",
            company_name, search_context
        );

        match context
            .generation
            .prompt("You are a business analyst. Answer with a single industry name.", &user_prompt)
            .await
        {
            Ok(answer) => {
                let industry = answer.trim().trim_matches('"').trim_matches('.').to_string();
                if industry.is_empty() || industry.len() > 64 {
                    DEFAULT_INDUSTRY.to_string()
                } else {
                    industry
                }
            }
            Err(e) => {
                eprintln!("⚠️ 行业识别失败，使用缺省行业: {}", e);
                DEFAULT_INDUSTRY.to_string()
            }
        }
    }

    /// 结构化综合，带Schema纠错重试
    async fn synthesize<G: GenerationProvider>(
        &self,
        context: &PipelineContext<G>,
        company_name: &str,
        industry: &str,
        company_context: &str,
        industry_context: &str,
    ) -> Result<ResearchExtraction, ProviderError> {
        let system_prompt = format!(
            "{}\n\n{}",
            SYNTHESIS_SYSTEM_PROMPT,
            context.config.target_language.prompt_instruction()
        );
        let base_prompt = format!(
            "Analyze {} in the {} industry.\n\n## COMPANY INFORMATION\n{}\n\n## INDUSTRY INFORMATION\n{}",
            company_name, industry, company_context, industry_context
        );

        let llm_config = &context.config.llm;
        let mut user_prompt = base_prompt.clone();
        let mut attempt: u32 = 0;

        loop {
            match context
                .generation
                .extract::<ResearchExtraction>(&system_prompt, &user_prompt)
                .await
            {
                Ok(extraction) => return Ok(extraction),
                Err(e) => {
                    attempt += 1;
                    if attempt >= llm_config.retry_attempts || !matches!(e, ProviderError::SchemaViolation(_)) {
                        return Err(e);
                    }
                    eprintln!(
                        "⚠️ 调研综合结构不合规，重试 (第 {} / {} 次): {}",
                        attempt, llm_config.retry_attempts, e
                    );
                    user_prompt = format!(
                        "{}\n\nNote: a previous attempt failed with \"{}\". Return data that strictly matches the required structure.",
                        base_prompt, e
                    );
                    let delay = llm_config.retry_base_delay_ms.saturating_mul(1 << attempt.min(8));
                    tokio::time::sleep(std::time::Duration::from_millis(delay)).await;
                }
            }
        }
    }
}

/// 公司侧定向查询集合
fn company_queries(company_name: &str) -> Vec<String> {
    vec![
        format!("{} company profile business model products services", company_name),
        format!("{} business segments subsidiaries brands list", company_name),
        format!("{} annual report strategic focus", company_name),
        format!("{} major products platforms services official site", company_name),
    ]
}

/// 将搜索结果归一化为提示词上下文
fn build_search_context(hits: &[SearchHit]) -> String {
    let mut content = String::new();
    for hit in hits {
        content.push_str(&format!("Title: {}\n", hit.title));
        content.push_str(&format!("Content: {}\n", hit.snippet));
        content.push_str(&format!("Source: {}\n\n", hit.url));
    }
    truncate_chars(&content, MAX_CONTEXT_CHARS)
}

/// 按字符数安全截断
fn truncate_chars(content: &str, max_chars: usize) -> String {
    if content.chars().count() <= max_chars {
        return content.to_string();
    }
    let truncated: String = content.chars().take(max_chars).collect();
    format!("{}...(truncated)", truncated)
}

/// 生成侧未返回引用时，从搜索结果推导引用列表
fn derive_citations(company_hits: &[SearchHit], industry_hits: &[SearchHit]) -> Vec<Citation> {
    company_hits
        .iter()
        .chain(industry_hits.iter())
        .take(8)
        .map(|hit| Citation {
            title: hit.title.clone(),
            url: hit.url.clone(),
        })
        .collect()
}

/// 兜底调研结果 - 所有重试耗尽后的最小可用产出
pub(crate) fn fallback_research(company_name: &str, industry: &str) -> ResearchResult {
    let industry = if industry.trim().is_empty() {
        DEFAULT_INDUSTRY
    } else {
        industry
    };
    ResearchResult {
        company_name: company_name.to_string(),
        company_analysis: CompanyAnalysis {
            business_model: format!("{} is a company in the {} industry", company_name, industry),
            key_offerings: vec![format!("{} products and services", industry)],
            segments: vec![industry.to_string()],
        },
        industry_analysis: IndustryAnalysis {
            industry: industry.to_string(),
            trends: vec!["Digital transformation and AI adoption".to_string()],
            competitors: Vec::new(),
            opportunities: vec!["AI/ML implementation".to_string()],
        },
        citations: Vec::new(),
        source_status: SourceStatus::Fallback,
    }
}
