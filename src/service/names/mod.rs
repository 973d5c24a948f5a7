//! 名称生成服务
//!
//! 有模型时采样并后处理，任何失败都退回规则生成。

pub mod flare;
pub mod rule_based;

pub use self::flare::{flare, Flared, Rejection};
pub use self::rule_based::{is_affixed_name, rule_based_name};

use std::sync::Arc;

use crate::entities::generation::GenerationRequest;
use crate::service::models::{SamplingRequest, TextSampler};

/// Which branch produced a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameSource {
    Model,
    /// No model is loaded.
    RuleBasedOnly,
    /// Sampling or decoding failed.
    SamplingFailed(String),
    /// The sampled text did not survive post-processing.
    Rejected(Rejection),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedName {
    pub name: String,
    pub source: NameSource,
}

/// Produces one name per call, from the model when it is loaded and usable,
/// otherwise from the fixed word lists.
#[derive(Clone)]
pub struct NameGenerator {
    sampler: Option<Arc<dyn TextSampler>>,
}

impl NameGenerator {
    pub fn new(sampler: Option<Arc<dyn TextSampler>>) -> Self {
        Self { sampler }
    }

    pub fn with_sampler(sampler: Arc<dyn TextSampler>) -> Self {
        Self::new(Some(sampler))
    }

    pub fn rule_based_only() -> Self {
        Self::new(None)
    }

    pub fn has_model(&self) -> bool {
        self.sampler.is_some()
    }

    /// Returns a non-empty name; never fails.
    pub fn generate(&self, request: &GenerationRequest) -> String {
        self.generate_detailed(request).name
    }

    pub fn generate_detailed(&self, request: &GenerationRequest) -> GeneratedName {
        let mut rng = rand::thread_rng();
        let Some(sampler) = &self.sampler else {
            return GeneratedName {
                name: rule_based_name(&mut rng),
                source: NameSource::RuleBasedOnly,
            };
        };

        let sampling = SamplingRequest {
            max_new_tokens: request.max_new_tokens,
            temperature: request.temperature,
            seed: request.seed,
        };
        let raw = match sampler.sample(&request.prompt, &sampling) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("Generate error: {}. Using rule-based fallback", e);
                return GeneratedName {
                    name: rule_based_name(&mut rng),
                    source: NameSource::SamplingFailed(e.to_string()),
                };
            }
        };
        log::debug!("Raw sample for seed {}: {:?}", request.seed, raw);

        match flare(&raw, &request.prompt, request.use_flare, &mut rng) {
            Flared::Name(name) => GeneratedName { name, source: NameSource::Model },
            Flared::Rejected(reason) => {
                log::debug!("Sample rejected ({}), using rule-based fallback", reason);
                GeneratedName {
                    name: rule_based_name(&mut rng),
                    source: NameSource::Rejected(reason),
                }
            }
        }
    }
}
