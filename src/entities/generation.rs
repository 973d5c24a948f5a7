use serde::{Deserialize, Serialize};

use crate::utils::config::GenerationDefaults;

/// Query string of `GET /generate`; every field is optional.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct GenerateQuery {
    pub prompt: Option<String>,
    pub temperature: Option<f64>,
    pub seed: Option<i64>,
    pub use_flare: Option<String>,
}

/// One name-generation call, after defaults are applied.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub max_new_tokens: usize,
    pub temperature: f64,
    pub seed: i64,
    pub use_flare: bool,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, temperature: f64, seed: i64, use_flare: bool) -> Self {
        Self {
            prompt: prompt.into(),
            max_new_tokens: GenerationDefaults::default().max_new_tokens,
            temperature,
            seed,
            use_flare,
        }
    }

    /// Fills missing query fields from `defaults`.
    ///
    /// `use_flare` is true only for a case-insensitive `"true"`; any other
    /// supplied value means false.
    pub fn from_query(query: GenerateQuery, defaults: &GenerationDefaults) -> Self {
        Self {
            prompt: query.prompt.unwrap_or_else(|| defaults.prompt.clone()),
            max_new_tokens: defaults.max_new_tokens,
            temperature: query.temperature.unwrap_or(defaults.temperature),
            seed: query.seed.unwrap_or(defaults.seed),
            use_flare: query
                .use_flare
                .map(|value| value.to_lowercase() == "true")
                .unwrap_or(defaults.use_flare),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NameResponse {
    pub name: String,
}
