#[cfg(test)]
mod tests {
    use crate::error::InputError;
    use crate::pipeline::types::{
        Complexity, ImpactLevel, RunRequest, SourceStatus, UseCase, MAX_COMPANY_NAME_LEN,
    };

    #[test]
    fn test_run_request_valid() {
        let request = RunRequest::new("Acme Corp").unwrap();
        assert_eq!(request.company_name, "Acme Corp");

        // 常见公司名中的标点
        assert!(RunRequest::new("Johnson & Johnson").is_ok());
        assert!(RunRequest::new("O'Reilly Media, Inc.").is_ok());
        assert!(RunRequest::new("Alphabet (Google)").is_ok());
        assert!(RunRequest::new("比亚迪").is_ok());
    }

    #[test]
    fn test_run_request_trims_whitespace() {
        let request = RunRequest::new("  Tesla  ").unwrap();
        assert_eq!(request.company_name, "Tesla");
    }

    #[test]
    fn test_run_request_empty() {
        assert_eq!(RunRequest::new(""), Err(InputError::EmptyCompanyName));
        assert_eq!(RunRequest::new("   "), Err(InputError::EmptyCompanyName));
    }

    #[test]
    fn test_run_request_too_long() {
        let long_name = "a".repeat(MAX_COMPANY_NAME_LEN + 1);
        assert_eq!(
            RunRequest::new(&long_name),
            Err(InputError::CompanyNameTooLong {
                max: MAX_COMPANY_NAME_LEN
            })
        );
    }

    #[test]
    fn test_run_request_forbidden_characters() {
        assert_eq!(
            RunRequest::new("Acme; DROP TABLE"),
            Err(InputError::ForbiddenCharacter(';'))
        );
        assert_eq!(
            RunRequest::new("Acme\nCorp"),
            Err(InputError::ForbiddenCharacter('\n'))
        );
        assert_eq!(
            RunRequest::new("Acme<script>"),
            Err(InputError::ForbiddenCharacter('<'))
        );
    }

    #[test]
    fn test_source_status_worst() {
        assert_eq!(
            SourceStatus::Full.worst(SourceStatus::Degraded),
            SourceStatus::Degraded
        );
        assert_eq!(
            SourceStatus::Fallback.worst(SourceStatus::Full),
            SourceStatus::Fallback
        );
        assert_eq!(
            SourceStatus::Degraded.worst(SourceStatus::Degraded),
            SourceStatus::Degraded
        );
    }

    #[test]
    fn test_priority_score_ordering() {
        // 高影响低复杂度优先于低影响高复杂度
        let best = UseCase::compute_priority(ImpactLevel::High, Complexity::Low);
        let worst = UseCase::compute_priority(ImpactLevel::Low, Complexity::High);
        assert!(best > worst);
        assert_eq!(best, 1.0);

        // 相同复杂度下影响越高评分越高
        assert!(
            UseCase::compute_priority(ImpactLevel::High, Complexity::Medium)
                > UseCase::compute_priority(ImpactLevel::Medium, Complexity::Medium)
        );

        // 相同影响下复杂度越低评分越高
        assert!(
            UseCase::compute_priority(ImpactLevel::Medium, Complexity::Low)
                > UseCase::compute_priority(ImpactLevel::Medium, Complexity::High)
        );

        // 评分落在(0, 1]区间
        assert!(worst > 0.0);
        assert!(best <= 1.0);
    }
}
