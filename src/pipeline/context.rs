use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::providers::{GenerationProvider, ResourceRegistry, SearchProvider};

/// 流水线上下文 - 一次运行所需的全部协作方与配置
///
/// 运行之间不共享任何状态；阶段产出全部通过返回值显式传递，
/// 上下文只承载配置与Provider句柄。
pub struct PipelineContext<G: GenerationProvider> {
    /// 文本生成Provider
    pub generation: Arc<G>,
    /// Web搜索Provider
    pub search: Arc<dyn SearchProvider>,
    /// 资源平台注册表
    pub resources: ResourceRegistry,
    /// 配置
    pub config: Config,
    /// 取消令牌 - 仅在阶段边界检查，进行中的Provider调用允许自然结束
    pub cancel: CancellationToken,
}

impl<G: GenerationProvider> Clone for PipelineContext<G> {
    fn clone(&self) -> Self {
        Self {
            generation: Arc::clone(&self.generation),
            search: Arc::clone(&self.search),
            resources: self.resources.clone(),
            config: self.config.clone(),
            cancel: self.cancel.clone(),
        }
    }
}

impl<G: GenerationProvider> PipelineContext<G> {
    pub fn new(
        generation: Arc<G>,
        search: Arc<dyn SearchProvider>,
        resources: ResourceRegistry,
        config: Config,
    ) -> Self {
        Self {
            generation,
            search,
            resources,
            config,
            cancel: CancellationToken::new(),
        }
    }

    /// 获取可用于外部取消当前运行的令牌
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }
}
