#[cfg(test)]
mod tests {
    use crate::cli::Args;
    use crate::config::LLMProvider;
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["prospect-rs"]).unwrap();

        assert!(args.company.is_none());
        assert_eq!(args.output_path, PathBuf::from("./prospect.reports"));
        assert!(args.config.is_none());
        assert!(!args.verbose);
    }

    #[test]
    fn test_args_company_positional() {
        let args = Args::try_parse_from(["prospect-rs", "Acme Corp"]).unwrap();
        assert_eq!(args.company, Some("Acme Corp".to_string()));
    }

    #[test]
    fn test_args_llm_overrides() {
        let args = Args::try_parse_from([
            "prospect-rs",
            "Acme Corp",
            "--llm-provider",
            "deepseek",
            "--llm-api-key",
            "sk-test",
            "--model-efficient",
            "deepseek-chat",
            "--max-tokens",
            "8192",
            "--temperature",
            "0.5",
            "--max-parallels",
            "5",
        ])
        .unwrap();

        assert_eq!(args.llm_provider, Some("deepseek".to_string()));
        assert_eq!(args.llm_api_key, Some("sk-test".to_string()));
        assert_eq!(args.model_efficient, Some("deepseek-chat".to_string()));
        assert_eq!(args.max_tokens, Some(8192));
        assert_eq!(args.temperature, Some(0.5));
        assert_eq!(args.max_parallels, Some(5));
    }

    #[test]
    fn test_into_config_applies_overrides() {
        let args = Args::try_parse_from([
            "prospect-rs",
            "Acme Corp",
            "--llm-provider",
            "anthropic",
            "--use-case-count",
            "8",
            "--max-parallels",
            "2",
            "--verbose",
        ])
        .unwrap();

        let config = args.into_config();

        assert_eq!(config.company_name, Some("Acme Corp".to_string()));
        assert_eq!(config.llm.provider, LLMProvider::Anthropic);
        assert_eq!(config.pipeline.use_case_count, 8);
        assert_eq!(config.resources.max_parallels, 2);
        assert!(config.verbose);
    }

    #[test]
    fn test_into_config_unknown_provider_keeps_default() {
        let args =
            Args::try_parse_from(["prospect-rs", "Acme", "--llm-provider", "nonsense"]).unwrap();
        let config = args.into_config();
        assert_eq!(config.llm.provider, LLMProvider::OpenAI);
    }

    #[test]
    fn test_args_target_language() {
        let args =
            Args::try_parse_from(["prospect-rs", "Acme", "--target-language", "ja"]).unwrap();
        let config = args.into_config();
        assert_eq!(config.target_language.to_string(), "ja");
    }
}
