//! 报告出口 - RunResult的落盘渲染
//!
//! 核心流水线不做任何输出I/O；本模块作为报告协作方消费完全解析好的
//! RunResult，渲染Markdown摘要、用例资源对照表，并保存原始JSON。

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::config::Config;
use crate::pipeline::types::{RunResult, RunStatus, UseCaseReport};

/// 保存一次运行的全部报告，返回生成的文件路径
pub fn save(config: &Config, result: &RunResult) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(&config.output_path)
        .context(format!("Failed to create output dir {:?}", config.output_path))?;

    let slug = company_slug(&result.company_name);
    let timestamp = result.completed_at.format("%Y%m%d_%H%M%S");

    let json_path = config
        .output_path
        .join(format!("complete_analysis_{}_{}.json", slug, timestamp));
    fs::write(&json_path, serde_json::to_string_pretty(result)?)
        .context("Failed to write analysis json")?;

    let report_path = config
        .output_path
        .join(format!("summary_report_{}_{}.md", slug, timestamp));
    fs::write(&report_path, render_summary_report(result))
        .context("Failed to write summary report")?;

    let resources_path = config
        .output_path
        .join(format!("resources_{}_{}.md", slug, timestamp));
    fs::write(&resources_path, render_resources_table(result))
        .context("Failed to write resources table")?;

    println!("💾 报告已保存：{:?}", report_path);
    Ok(vec![json_path, report_path, resources_path])
}

fn company_slug(company_name: &str) -> String {
    company_name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}

fn status_label(status: RunStatus) -> &'static str {
    match status {
        RunStatus::Full => "Completed",
        RunStatus::Degraded => "Completed (degraded sources)",
        RunStatus::Fallback => "Completed (fallback data)",
        RunStatus::Cancelled => "Cancelled",
    }
}

/// 渲染摘要报告
fn render_summary_report(result: &RunResult) -> String {
    let research = &result.research;
    let total_resources: usize = result.reports.iter().map(|r| r.resources.resources.len()).sum();

    let mut report = format!(
        r#"# Market Prospecting Report

## Company: {company}

### Executive Summary
- **Industry**: {industry}
- **Run Status**: {status}
- **Analysis Date**: {date}
- **Use Cases Generated**: {use_case_count}
- **Resources Found**: {resource_count}
"#,
        company = result.company_name,
        industry = research.industry_analysis.industry,
        status = status_label(result.status),
        date = result.completed_at.format("%Y-%m-%d %H:%M UTC"),
        use_case_count = result.reports.len(),
        resource_count = total_resources,
    );

    // 合规与兜底情况必须呈现给读者
    if !result.distribution_compliant {
        report.push_str(
            "\n> ⚠️ The generated use cases deviate from the target category distribution beyond tolerance.\n",
        );
    }
    if result.use_case_fallback {
        report.push_str(
            "\n> ⚠️ Use cases were substituted from the built-in fallback library (low confidence).\n",
        );
    }

    report.push_str(&format!(
        r#"
### Company Overview
{business_model}

**Key offerings**: {offerings}

**Segments**: {segments}

### Industry Analysis
**Trends**
{trends}

**Competitors**: {competitors}

**Growth opportunities**
{opportunities}
"#,
        business_model = research.company_analysis.business_model,
        offerings = join_or_dash(&research.company_analysis.key_offerings, ", "),
        segments = join_or_dash(&research.company_analysis.segments, ", "),
        trends = bullet_list(&research.industry_analysis.trends),
        competitors = join_or_dash(&research.industry_analysis.competitors, ", "),
        opportunities = bullet_list(&research.industry_analysis.opportunities),
    ));

    report.push_str("\n### Prioritized Use Cases\n\n");
    for (i, entry) in result.reports.iter().enumerate() {
        let use_case = &entry.use_case;
        report.push_str(&format!(
            "**{rank}. {title}** `{category}` (priority {score:.2})\n\n{description}\n\n- **Business impact**: {impact_text}\n- **Impact level**: {impact:?} / **Complexity**: {complexity:?}\n- **Resources**: {resources}\n\n",
            rank = i + 1,
            title = use_case.title,
            category = use_case.category,
            score = use_case.priority_score,
            description = use_case.description,
            impact_text = use_case.business_impact,
            impact = use_case.impact,
            complexity = use_case.complexity,
            resources = resource_cell_summary(entry),
        ));
    }

    if !research.citations.is_empty() {
        report.push_str("### Citations\n\n");
        for citation in &research.citations {
            report.push_str(&format!("- [{}]({})\n", citation.title, citation.url));
        }
    }

    report.push_str("\n---\n\n*Generated by prospect-rs*\n");
    report
}

/// 渲染用例与资源的对照表
fn render_resources_table(result: &RunResult) -> String {
    let mut table = format!(
        "# AI/ML Resources for {}\n\n| Use Case | Category | References |\n|---|---|---|\n",
        result.company_name
    );

    for entry in &result.reports {
        let references = if entry.resources.resources.is_empty() {
            "No resources found".to_string()
        } else {
            entry
                .resources
                .resources
                .iter()
                .map(|resource| {
                    format!(
                        "[{}]({}) ({}, {:.2})",
                        truncate_title(&resource.title),
                        resource.canonical_url,
                        resource.platform,
                        resource.relevance_score
                    )
                })
                .collect::<Vec<_>>()
                .join(" <br> ")
        };

        table.push_str(&format!(
            "| {} | {} | {} |\n",
            entry.use_case.title, entry.use_case.category, references
        ));
    }

    table
}

fn resource_cell_summary(entry: &UseCaseReport) -> String {
    if entry.resources.zero_candidate {
        if entry.resources.failed_platforms.is_empty() {
            "none found".to_string()
        } else {
            format!(
                "none found ({} platform(s) failed)",
                entry.resources.failed_platforms.len()
            )
        }
    } else {
        entry
            .resources
            .platform_counts
            .iter()
            .map(|(platform, count)| format!("{} {}", platform, count))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn join_or_dash(items: &[String], separator: &str) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(separator)
    }
}

fn bullet_list(items: &[String]) -> String {
    if items.is_empty() {
        return "-\n".to_string();
    }
    items
        .iter()
        .map(|item| format!("- {}\n", item))
        .collect()
}

fn truncate_title(title: &str) -> String {
    if title.chars().count() > 60 {
        let truncated: String = title.chars().take(57).collect();
        format!("{}...", truncated)
    } else {
        title.to_string()
    }
}

// Include tests
#[cfg(test)]
mod tests;
