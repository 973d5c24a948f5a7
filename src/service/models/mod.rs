//! 模型服务实现
//!
//! 本模块提供语言模型采样功能，包括：
//! - GPT-2 检查点的下载和加载
//! - logits 处理与随机采样
//! - 供名称生成器使用的 `TextSampler` 抽象
//!
//! 模型句柄要么完整加载（模型与分词器一致），要么完全不存在；
//! 调用方只会看到 `Option<Arc<dyn TextSampler>>`。

pub mod gpt2;
pub mod sampling;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Model initialization failed: {0}")]
    InitializationFailed(String),
    #[error("Tokenizer error: {0}")]
    Tokenizer(String),
    #[error("Candle error: {0}")]
    Candle(#[from] candle_core::Error),
    #[error("Invalid temperature: {0} (must be a finite, strictly positive value)")]
    InvalidTemperature(f64),
    #[error("Sampling failed: {0}")]
    Sampling(String),
    #[error("Prompt is too long: {len} tokens exceeds the context window of {max}")]
    PromptTooLong { len: usize, max: usize },
}

impl From<anyhow::Error> for ModelError {
    fn from(err: anyhow::Error) -> Self {
        ModelError::InitializationFailed(err.to_string())
    }
}

/// Per-call parameters for one conditional sampling run.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingRequest {
    pub max_new_tokens: usize,
    pub temperature: f64,
    pub seed: i64,
}

/// A loaded language model that can continue a prompt.
///
/// Implementations hold no per-call mutable state; every call owns its RNG,
/// so one instance can serve concurrent requests.
pub trait TextSampler: Send + Sync {
    /// Returns the decoded prompt plus continuation, special tokens stripped and trimmed.
    fn sample(&self, prompt: &str, request: &SamplingRequest) -> Result<String, ModelError>;
}
