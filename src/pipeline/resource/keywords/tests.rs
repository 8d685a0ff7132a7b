#[cfg(test)]
mod tests {
    use crate::pipeline::resource::keywords::{MAX_KEYWORDS, derive_keywords};

    #[test]
    fn test_derive_keywords_filters_stop_words() {
        let keywords = derive_keywords(
            "Predictive Maintenance for the Fleet",
            "Use sensor data to improve the maintenance process",
        );

        assert!(keywords.contains(&"predictive".to_string()));
        assert!(keywords.contains(&"maintenance".to_string()));
        assert!(keywords.contains(&"sensor".to_string()));
        assert!(!keywords.contains(&"the".to_string()));
        assert!(!keywords.contains(&"use".to_string()));
        assert!(!keywords.contains(&"improve".to_string()));
    }

    #[test]
    fn test_derive_keywords_title_first_and_deduped() {
        let keywords = derive_keywords(
            "Churn Prediction",
            "Churn prediction models for subscription customers",
        );

        assert_eq!(keywords[0], "churn");
        assert_eq!(keywords[1], "prediction");
        // 重复词只保留一次
        assert_eq!(
            keywords.iter().filter(|k| k.as_str() == "churn").count(),
            1
        );
    }

    #[test]
    fn test_derive_keywords_capped() {
        let description = "alpha bravo charlie delta echo foxtrot golf hotel india juliet kilo lima";
        let keywords = derive_keywords("Keyword Overflow Scenario", description);

        assert!(keywords.len() <= MAX_KEYWORDS);
    }

    #[test]
    fn test_derive_keywords_empty_input() {
        assert!(derive_keywords("", "").is_empty());
    }
}
