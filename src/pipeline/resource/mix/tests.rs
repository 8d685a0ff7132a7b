#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use crate::config::ResourceConfig;
    use crate::pipeline::resource::mix::{MixRatioEnforcer, platform_counts};
    use crate::pipeline::types::ResourceCandidate;
    use crate::providers::ResourcePlatform;

    fn make_candidates(
        platform: ResourcePlatform,
        count: usize,
        base_score: f64,
    ) -> Vec<ResourceCandidate> {
        (0..count)
            .map(|i| ResourceCandidate {
                platform,
                canonical_url: format!("https://{:?}.example/{}", platform, i),
                title: format!("{:?} resource {}", platform, i),
                description: String::new(),
                relevance_score: base_score - i as f64 * 0.01,
                metadata: HashMap::new(),
            })
            .collect()
    }

    fn test_config() -> ResourceConfig {
        ResourceConfig {
            kaggle_username: None,
            kaggle_key: None,
            huggingface_token: None,
            github_token: None,
            ..ResourceConfig::default()
        }
    }

    #[test]
    fn test_select_respects_quota_and_bounds() {
        let enforcer = MixRatioEnforcer::new(&test_config());

        let mut candidates = make_candidates(ResourcePlatform::Kaggle, 10, 0.9);
        candidates.extend(make_candidates(ResourcePlatform::HuggingFace, 10, 0.8));
        candidates.extend(make_candidates(ResourcePlatform::GitHub, 10, 0.7));

        let selection = enforcer.select(candidates);
        let counts = platform_counts(&selection);

        // 上限6条：40/30/30 -> 3/2/1 或 2/2/2 级别的整数配额，总和恰好为上限
        assert_eq!(selection.len(), 6);
        assert_eq!(counts.values().sum::<usize>(), 6);
        assert!(counts[&ResourcePlatform::Kaggle] >= counts[&ResourcePlatform::GitHub]);
    }

    #[test]
    fn test_select_redistributes_shortfall() {
        // 数据集目录无候选，模型中心与代码仓库各5条，目标规模5
        let mut config = test_config();
        config.max_resources = 5;
        let enforcer = MixRatioEnforcer::new(&config);

        let mut candidates = make_candidates(ResourcePlatform::HuggingFace, 5, 0.8);
        candidates.extend(make_candidates(ResourcePlatform::GitHub, 5, 0.7));

        let selection = enforcer.select(candidates);
        let counts = platform_counts(&selection);

        // Kaggle的2条缺口被重新分配，总量保持5
        assert_eq!(selection.len(), 5);
        assert!(!counts.contains_key(&ResourcePlatform::Kaggle));
        assert_eq!(counts[&ResourcePlatform::HuggingFace], 3);
        assert_eq!(counts[&ResourcePlatform::GitHub], 2);
    }

    #[test]
    fn test_select_prefers_higher_scores_within_platform() {
        let enforcer = MixRatioEnforcer::new(&test_config());

        let mut candidates = make_candidates(ResourcePlatform::Kaggle, 10, 0.9);
        candidates.extend(make_candidates(ResourcePlatform::HuggingFace, 10, 0.8));
        candidates.extend(make_candidates(ResourcePlatform::GitHub, 10, 0.7));

        let selection = enforcer.select(candidates);

        // 每个平台都从各自评分最高的候选开始选取
        assert!(selection
            .iter()
            .any(|c| c.canonical_url == "https://Kaggle.example/0"));
        assert!(selection
            .iter()
            .any(|c| c.canonical_url == "https://HuggingFace.example/0"));
    }

    #[test]
    fn test_select_empty_candidates() {
        let enforcer = MixRatioEnforcer::new(&test_config());
        let selection = enforcer.select(Vec::new());
        assert!(selection.is_empty());
        assert!(enforcer.below_minimum(selection.len()));
    }

    #[test]
    fn test_select_scarce_candidates_below_minimum() {
        // 候选总量低于下限时如实返回全部，由调用方上报
        let enforcer = MixRatioEnforcer::new(&test_config());
        let candidates = make_candidates(ResourcePlatform::GitHub, 2, 0.6);

        let selection = enforcer.select(candidates);

        assert_eq!(selection.len(), 2);
        assert!(enforcer.below_minimum(selection.len()));
    }

    #[test]
    fn test_select_never_exceeds_maximum() {
        let enforcer = MixRatioEnforcer::new(&test_config());
        let candidates = make_candidates(ResourcePlatform::Kaggle, 50, 0.9);

        let selection = enforcer.select(candidates);

        assert!(selection.len() <= 6);
        assert!(!enforcer.below_minimum(selection.len()));
    }

    #[test]
    fn test_selection_sorted_by_relevance() {
        let enforcer = MixRatioEnforcer::new(&test_config());
        let mut candidates = make_candidates(ResourcePlatform::Kaggle, 4, 0.5);
        candidates.extend(make_candidates(ResourcePlatform::HuggingFace, 4, 0.9));
        candidates.extend(make_candidates(ResourcePlatform::GitHub, 4, 0.7));

        let selection = enforcer.select(candidates);

        for pair in selection.windows(2) {
            assert!(pair[0].relevance_score >= pair[1].relevance_score);
        }
    }
}
