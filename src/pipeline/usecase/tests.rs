#[cfg(test)]
mod tests {
    use crate::pipeline::types::{Complexity, ImpactLevel, UseCaseCategory};
    use crate::pipeline::usecase::fallback::skeleton_portfolio;
    use crate::pipeline::usecase::{
        GeneratedUseCase, category_histogram, distribution_deviation, distribution_targets,
        finalize_portfolio, is_compliant,
    };

    fn make_use_case(
        title: &str,
        category: UseCaseCategory,
        impact: ImpactLevel,
        complexity: Complexity,
    ) -> GeneratedUseCase {
        GeneratedUseCase {
            title: title.to_string(),
            description: format!("{} description", title),
            category,
            business_impact: "test impact".to_string(),
            impact,
            complexity,
        }
    }

    #[test]
    fn test_distribution_targets_default() {
        // 默认50/30/20分布，10条用例
        assert_eq!(distribution_targets(10, [0.5, 0.3, 0.2]), [5, 3, 2]);
    }

    #[test]
    fn test_distribution_targets_rounding() {
        // 余数分配后总和必须等于目标
        let targets = distribution_targets(7, [0.5, 0.3, 0.2]);
        assert_eq!(targets.iter().sum::<usize>(), 7);
        assert_eq!(targets, [4, 2, 1]);

        let targets = distribution_targets(5, [0.4, 0.3, 0.3]);
        assert_eq!(targets.iter().sum::<usize>(), 5);
        assert_eq!(targets, [2, 2, 1]);
    }

    #[test]
    fn test_distribution_targets_degenerate() {
        assert_eq!(distribution_targets(0, [0.5, 0.3, 0.2]), [0, 0, 0]);
        assert_eq!(distribution_targets(10, [1.0, 0.0, 0.0]), [10, 0, 0]);
    }

    #[test]
    fn test_category_histogram() {
        let use_cases = vec![
            make_use_case("a", UseCaseCategory::MlTraditional, ImpactLevel::High, Complexity::Low),
            make_use_case("b", UseCaseCategory::MlTraditional, ImpactLevel::Low, Complexity::Low),
            make_use_case("c", UseCaseCategory::GenAi, ImpactLevel::Medium, Complexity::Medium),
            make_use_case("d", UseCaseCategory::Other, ImpactLevel::Low, Complexity::High),
        ];
        assert_eq!(category_histogram(&use_cases), [2, 1, 1]);
    }

    #[test]
    fn test_compliance_within_tolerance() {
        // 每个类别偏差不超过容差即达标
        assert!(is_compliant([5, 3, 2], [5, 3, 2], 0));
        assert!(is_compliant([4, 4, 2], [5, 3, 2], 1));
        assert!(!is_compliant([7, 1, 2], [5, 3, 2], 1));
        assert!(!is_compliant([4, 4, 2], [5, 3, 2], 0));
    }

    #[test]
    fn test_distribution_deviation() {
        assert_eq!(distribution_deviation([5, 3, 2], [5, 3, 2]), 0);
        assert_eq!(distribution_deviation([7, 1, 2], [5, 3, 2]), 4);
    }

    #[test]
    fn test_finalize_portfolio_priority_order() {
        let generated = vec![
            make_use_case("low", UseCaseCategory::Other, ImpactLevel::Low, Complexity::High),
            make_use_case("best", UseCaseCategory::MlTraditional, ImpactLevel::High, Complexity::Low),
            make_use_case("mid", UseCaseCategory::GenAi, ImpactLevel::Medium, Complexity::Medium),
        ];

        let portfolio = finalize_portfolio(generated, true);

        assert_eq!(portfolio.use_cases[0].title, "best");
        assert_eq!(portfolio.use_cases[1].title, "mid");
        assert_eq!(portfolio.use_cases[2].title, "low");
        assert!(portfolio.distribution_compliant);
        assert!(!portfolio.fallback);
    }

    #[test]
    fn test_finalize_portfolio_stable_on_ties() {
        // 同分用例保持生成顺序
        let generated = vec![
            make_use_case("first", UseCaseCategory::MlTraditional, ImpactLevel::Medium, Complexity::Medium),
            make_use_case("second", UseCaseCategory::GenAi, ImpactLevel::Medium, Complexity::Medium),
            make_use_case("third", UseCaseCategory::Other, ImpactLevel::Medium, Complexity::Medium),
        ];

        let portfolio = finalize_portfolio(generated, true);

        assert_eq!(portfolio.use_cases[0].title, "first");
        assert_eq!(portfolio.use_cases[1].title, "second");
        assert_eq!(portfolio.use_cases[2].title, "third");
    }

    #[test]
    fn test_skeleton_portfolio_matches_distribution() {
        let portfolio = skeleton_portfolio(10, [0.5, 0.3, 0.2]);

        assert_eq!(portfolio.use_cases.len(), 10);
        assert!(portfolio.fallback);

        let histogram = [
            portfolio
                .use_cases
                .iter()
                .filter(|u| u.category == UseCaseCategory::MlTraditional)
                .count(),
            portfolio
                .use_cases
                .iter()
                .filter(|u| u.category == UseCaseCategory::GenAi)
                .count(),
            portfolio
                .use_cases
                .iter()
                .filter(|u| u.category == UseCaseCategory::Other)
                .count(),
        ];
        assert_eq!(histogram, [5, 3, 2]);
    }
}
