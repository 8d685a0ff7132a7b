//! 资源Provider注册表 - 按凭据装配，缺席即跳过

use std::sync::Arc;

use crate::config::ResourceConfig;
use crate::providers::{
    ResourcePlatform, ResourceProvider, github::GitHubProvider, huggingface::HuggingFaceProvider,
    kaggle::KaggleProvider,
};

/// 运行期可用的资源Provider集合
///
/// 凭据未配置的平台不会进入注册表，该平台在扇出中自然缺席，
/// 对应的配额由混合比例执行器重新分配给其余平台。
#[derive(Clone, Default)]
pub struct ResourceRegistry {
    providers: Vec<Arc<dyn ResourceProvider>>,
}

impl ResourceRegistry {
    /// 根据配置装配注册表
    pub fn from_config(config: &ResourceConfig) -> anyhow::Result<Self> {
        let mut providers: Vec<Arc<dyn ResourceProvider>> = Vec::new();

        if let (Some(username), Some(key)) = (&config.kaggle_username, &config.kaggle_key) {
            providers.push(Arc::new(KaggleProvider::new(
                username.clone(),
                key.clone(),
                config,
            )?));
        } else {
            println!("   ⚠️ 未配置Kaggle凭据，跳过Kaggle平台");
        }

        if let Some(token) = &config.huggingface_token {
            providers.push(Arc::new(HuggingFaceProvider::new(token.clone(), config)?));
        } else {
            println!("   ⚠️ 未配置HuggingFace Token，跳过HuggingFace平台");
        }

        if let Some(token) = &config.github_token {
            providers.push(Arc::new(GitHubProvider::new(token.clone(), config)?));
        } else {
            println!("   ⚠️ 未配置GitHub Token，跳过GitHub平台");
        }

        Ok(Self { providers })
    }

    /// 直接由Provider实例构建注册表（测试与自定义装配）
    pub fn from_providers(providers: Vec<Arc<dyn ResourceProvider>>) -> Self {
        Self { providers }
    }

    pub fn providers(&self) -> &[Arc<dyn ResourceProvider>] {
        &self.providers
    }

    pub fn platforms(&self) -> Vec<ResourcePlatform> {
        self.providers.iter().map(|p| p.platform()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }
}
