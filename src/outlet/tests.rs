#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::collections::HashMap;

    use chrono::Utc;
    use tempfile::TempDir;
    use uuid::Uuid;

    use crate::config::Config;
    use crate::outlet::save;
    use crate::pipeline::types::{
        Citation, CompanyAnalysis, Complexity, ImpactLevel, IndustryAnalysis, ResearchResult,
        ResourceCandidate, RunProgress, RunResult, RunStage, RunStatus, SourceStatus, UseCase,
        UseCaseCategory, UseCaseReport, UseCaseResourceSet,
    };
    use crate::providers::ResourcePlatform;

    fn sample_result(status: RunStatus, compliant: bool) -> RunResult {
        let use_case_id = Uuid::new_v4();
        let use_case = UseCase {
            id: use_case_id,
            title: "Demand Forecasting".to_string(),
            description: "Forecast demand at SKU granularity.".to_string(),
            category: UseCaseCategory::MlTraditional,
            priority_score: 1.0,
            business_impact: "Better inventory turns".to_string(),
            impact: ImpactLevel::High,
            complexity: Complexity::Low,
        };
        let resource = ResourceCandidate {
            platform: ResourcePlatform::Kaggle,
            canonical_url: "https://www.kaggle.com/datasets/foo/bar".to_string(),
            title: "Retail demand dataset".to_string(),
            description: "daily sales".to_string(),
            relevance_score: 0.9,
            metadata: HashMap::new(),
        };
        let mut platform_counts = BTreeMap::new();
        platform_counts.insert(ResourcePlatform::Kaggle, 1);

        RunResult {
            run_id: Uuid::new_v4(),
            company_name: "Acme Corp".to_string(),
            started_at: Utc::now(),
            completed_at: Utc::now(),
            status,
            progress: RunProgress::at(RunStage::Done),
            research: ResearchResult {
                company_name: "Acme Corp".to_string(),
                company_analysis: CompanyAnalysis {
                    business_model: "Industrial equipment manufacturer".to_string(),
                    key_offerings: vec!["Pumps".to_string()],
                    segments: vec!["Manufacturing".to_string()],
                },
                industry_analysis: IndustryAnalysis {
                    industry: "Manufacturing".to_string(),
                    trends: vec!["Automation".to_string()],
                    competitors: vec!["Globex".to_string()],
                    opportunities: vec!["Predictive maintenance".to_string()],
                },
                citations: vec![Citation {
                    title: "Acme homepage".to_string(),
                    url: "https://acme.example".to_string(),
                }],
                source_status: SourceStatus::Full,
            },
            reports: vec![UseCaseReport {
                use_case,
                resources: UseCaseResourceSet {
                    use_case_id,
                    resources: vec![resource],
                    platform_counts,
                    zero_candidate: false,
                    failed_platforms: Vec::new(),
                },
            }],
            distribution_compliant: compliant,
            use_case_fallback: false,
        }
    }

    #[test]
    fn test_save_writes_all_report_files() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.output_path = temp_dir.path().join("reports");

        let result = sample_result(RunStatus::Full, true);
        let files = save(&config, &result).unwrap();

        assert_eq!(files.len(), 3);
        for file in &files {
            assert!(file.exists(), "missing report file {:?}", file);
        }

        let report = std::fs::read_to_string(&files[1]).unwrap();
        assert!(report.contains("Acme Corp"));
        assert!(report.contains("Demand Forecasting"));
        assert!(report.contains("Manufacturing"));
        // 达标时不出现分布警告
        assert!(!report.contains("deviate from the target category distribution"));

        let table = std::fs::read_to_string(&files[2]).unwrap();
        assert!(table.contains("| Demand Forecasting |"));
        assert!(table.contains("kaggle.com"));
    }

    #[test]
    fn test_save_surfaces_noncompliance() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.output_path = temp_dir.path().join("reports");

        let result = sample_result(RunStatus::Fallback, false);
        let files = save(&config, &result).unwrap();

        let report = std::fs::read_to_string(&files[1]).unwrap();
        assert!(report.contains("deviate from the target category distribution"));
        assert!(report.contains("fallback data"));
    }

    #[test]
    fn test_save_json_round_trips() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.output_path = temp_dir.path().join("reports");

        let result = sample_result(RunStatus::Degraded, true);
        let files = save(&config, &result).unwrap();

        let json = std::fs::read_to_string(&files[0]).unwrap();
        let parsed: RunResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.company_name, result.company_name);
        assert_eq!(parsed.status, RunStatus::Degraded);
        assert_eq!(parsed.reports.len(), 1);
    }
}
