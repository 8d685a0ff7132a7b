#[cfg(test)]
mod tests {
    use crate::config::{Config, LLMConfig, LLMProvider, PipelineConfig, ResourceConfig};
    use std::path::PathBuf;

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert!(config.company_name.is_none());
        assert_eq!(config.output_path, PathBuf::from("./prospect.reports"));
        assert!(!config.verbose);
    }

    #[test]
    fn test_llm_provider_default() {
        let provider = LLMProvider::default();
        assert_eq!(provider, LLMProvider::OpenAI);
    }

    #[test]
    fn test_llm_provider_from_str() {
        assert_eq!(
            "openai".parse::<LLMProvider>().unwrap(),
            LLMProvider::OpenAI
        );
        assert_eq!(
            "deepseek".parse::<LLMProvider>().unwrap(),
            LLMProvider::DeepSeek
        );
        assert_eq!(
            "mistral".parse::<LLMProvider>().unwrap(),
            LLMProvider::Mistral
        );
        assert_eq!(
            "openrouter".parse::<LLMProvider>().unwrap(),
            LLMProvider::OpenRouter
        );
        assert_eq!(
            "anthropic".parse::<LLMProvider>().unwrap(),
            LLMProvider::Anthropic
        );
        assert_eq!(
            "ollama".parse::<LLMProvider>().unwrap(),
            LLMProvider::Ollama
        );

        assert!("invalid".parse::<LLMProvider>().is_err());
    }

    #[test]
    fn test_llm_provider_display() {
        assert_eq!(LLMProvider::OpenAI.to_string(), "openai");
        assert_eq!(LLMProvider::DeepSeek.to_string(), "deepseek");
        assert_eq!(LLMProvider::Mistral.to_string(), "mistral");
        assert_eq!(LLMProvider::OpenRouter.to_string(), "openrouter");
        assert_eq!(LLMProvider::Anthropic.to_string(), "anthropic");
        assert_eq!(LLMProvider::Ollama.to_string(), "ollama");
    }

    #[test]
    fn test_llm_config_default() {
        let config = LLMConfig::default();

        assert_eq!(config.provider, LLMProvider::OpenAI);
        // api_key may be empty if env var is not set
        assert!(!config.api_base_url.is_empty());
        assert!(!config.model_efficient.is_empty());
        assert!(!config.model_powerful.is_empty());
        assert_eq!(config.max_tokens, 4096);
        assert_eq!(config.temperature, 0.3);
        assert_eq!(config.retry_attempts, 3);
        assert_eq!(config.retry_base_delay_ms, 1000);
        assert_eq!(config.timeout_seconds, 60);
    }

    #[test]
    fn test_pipeline_config_default() {
        let config = PipelineConfig::default();

        assert_eq!(config.use_case_count, 10);
        assert_eq!(config.ratio_ml_traditional, 0.5);
        assert_eq!(config.ratio_genai, 0.3);
        assert_eq!(config.ratio_other, 0.2);
        assert_eq!(config.distribution_tolerance, 1);
        assert_eq!(config.max_rewrite_cycles, 3);
    }

    #[test]
    fn test_resource_config_default() {
        let config = ResourceConfig::default();

        assert_eq!(config.min_resources, 3);
        assert_eq!(config.max_resources, 6);
        assert_eq!(config.max_per_platform, 5);
        assert_eq!(config.request_timeout_seconds, 30);
        assert_eq!(config.max_parallels, 3);

        // 占比之和应为1
        let total =
            config.mix_ratio.kaggle + config.mix_ratio.huggingface + config.mix_ratio.github;
        assert!((total - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_config_from_toml() {
        let toml_content = r#"
company_name = "Acme Corp"
output_path = "./out"
target_language = "en"
verbose = true

[llm]
provider = "deepseek"
api_key = "sk-test"
api_base_url = "https://api.deepseek.com/v1"
model_efficient = "deepseek-chat"
model_powerful = "deepseek-reasoner"
max_tokens = 8192
temperature = 0.2
retry_attempts = 5
retry_base_delay_ms = 500
timeout_seconds = 120

[search]
api_key = "tvly-test"
api_base_url = "https://api.tavily.com"
max_results = 10
request_timeout_seconds = 20
excluded_domains = ["facebook.com"]

[resources]
min_resources = 3
max_resources = 6
max_per_platform = 5
request_timeout_seconds = 30
max_parallels = 3
github_token = "ghp_test"

[resources.mix_ratio]
kaggle = 0.4
huggingface = 0.3
github = 0.3

[pipeline]
use_case_count = 10
ratio_ml_traditional = 0.5
ratio_genai = 0.3
ratio_other = 0.2
distribution_tolerance = 1
max_rewrite_cycles = 3
"#;

        let config: Config = toml::from_str(toml_content).unwrap();

        assert_eq!(config.company_name, Some("Acme Corp".to_string()));
        assert_eq!(config.llm.provider, LLMProvider::DeepSeek);
        assert_eq!(config.llm.retry_attempts, 5);
        assert_eq!(config.search.max_results, 10);
        assert_eq!(config.resources.github_token, Some("ghp_test".to_string()));
        assert!(config.resources.kaggle_username.is_none());
        assert_eq!(config.pipeline.use_case_count, 10);
    }
}
