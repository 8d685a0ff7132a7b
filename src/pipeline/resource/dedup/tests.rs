#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use crate::pipeline::resource::dedup::{canonicalize_url, dedup_candidates, relevance_score};
    use crate::pipeline::types::ResourceCandidate;
    use crate::providers::ResourcePlatform;

    fn make_candidate(url: &str, score: f64) -> ResourceCandidate {
        ResourceCandidate {
            platform: ResourcePlatform::Kaggle,
            canonical_url: url.to_string(),
            title: "dataset".to_string(),
            description: String::new(),
            relevance_score: score,
            metadata: HashMap::new(),
        }
    }

    #[test]
    fn test_canonicalize_strips_tracking_params() {
        let canonical = canonicalize_url(
            "https://www.kaggle.com/datasets/foo/bar?utm_source=news&utm_medium=mail&ref=home",
        )
        .unwrap();
        assert_eq!(canonical, "https://www.kaggle.com/datasets/foo/bar");
    }

    #[test]
    fn test_canonicalize_keeps_meaningful_params() {
        let canonical =
            canonicalize_url("https://example.com/search?q=churn&utm_campaign=x").unwrap();
        assert_eq!(canonical, "https://example.com/search?q=churn");
    }

    #[test]
    fn test_canonicalize_is_case_insensitive_on_host() {
        let a = canonicalize_url("HTTPS://WWW.Kaggle.COM/datasets/foo/bar").unwrap();
        let b = canonicalize_url("https://www.kaggle.com/datasets/foo/bar").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_canonicalize_folds_trailing_slash_and_fragment() {
        let a = canonicalize_url("https://github.com/org/repo/#readme").unwrap();
        let b = canonicalize_url("https://github.com/org/repo").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_canonicalize_is_pure() {
        // 两个仅在跟踪参数与大小写上不同的URL映射到同一规范形式
        let variants = [
            "https://huggingface.co/datasets/Foo?utm_source=x",
            "HTTPS://huggingface.co/datasets/Foo",
            "https://huggingface.co/datasets/Foo/",
        ];
        let canonical: Vec<_> = variants
            .iter()
            .map(|v| canonicalize_url(v).unwrap())
            .collect();
        assert_eq!(canonical[0], canonical[1]);
        assert_eq!(canonical[1], canonical[2]);
    }

    #[test]
    fn test_canonicalize_rejects_invalid() {
        assert!(canonicalize_url("not a url").is_none());
        assert!(canonicalize_url("ftp://example.com/file").is_none());
    }

    #[test]
    fn test_relevance_score_overlap() {
        let keywords: Vec<String> = ["churn", "prediction", "retail"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let full = relevance_score(
            &keywords,
            "Retail churn prediction dataset",
            "customer churn in retail",
            ResourcePlatform::Kaggle,
        );
        let none = relevance_score(
            &keywords,
            "Weather history",
            "temperature records",
            ResourcePlatform::Kaggle,
        );

        assert!(full > none);
        assert!((0.0..=1.0).contains(&full));
        assert!((0.0..=1.0).contains(&none));
        // 全量命中 = 0.8 + Kaggle先验0.2
        assert!((full - 1.0).abs() < 1e-9);
        assert!((none - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_relevance_score_platform_prior() {
        let keywords = vec!["churn".to_string()];
        let kaggle = relevance_score(&keywords, "churn", "", ResourcePlatform::Kaggle);
        let github = relevance_score(&keywords, "churn", "", ResourcePlatform::GitHub);
        assert!(kaggle > github);
    }

    #[test]
    fn test_dedup_keeps_highest_score() {
        let candidates = vec![
            make_candidate("https://a.com/x", 0.4),
            make_candidate("https://a.com/x", 0.9),
            make_candidate("https://b.com/y", 0.5),
        ];

        let deduped = dedup_candidates(candidates);

        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].canonical_url, "https://a.com/x");
        assert_eq!(deduped[0].relevance_score, 0.9);
    }

    #[test]
    fn test_dedup_is_idempotent() {
        let candidates = vec![
            make_candidate("https://a.com/x", 0.4),
            make_candidate("https://a.com/x", 0.9),
            make_candidate("https://b.com/y", 0.5),
        ];

        let once = dedup_candidates(candidates);
        let twice = dedup_candidates(once.clone());

        assert_eq!(once.len(), twice.len());
        for (a, b) in once.iter().zip(twice.iter()) {
            assert_eq!(a.canonical_url, b.canonical_url);
            assert_eq!(a.relevance_score, b.relevance_score);
        }
    }
}
