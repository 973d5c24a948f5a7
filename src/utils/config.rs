use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_PROMPT: &str = "Single elf name, no spaces: ";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".to_string(), port: 5000, shutdown_timeout: 30 }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ModelFiles {
    pub weights: String,
    pub config: String,
    pub tokenizer: String,
}

impl Default for ModelFiles {
    fn default() -> Self {
        Self {
            weights: "model.safetensors".to_string(),
            config: "config.json".to_string(),
            tokenizer: "tokenizer.json".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ModelConfig {
    /// When false the service never touches the hub and runs rule-based only.
    pub enabled: bool,
    pub hf_hub_id: String,
    pub revision: String,
    pub cache_dir: String,
    pub files: ModelFiles,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            hf_hub_id: "distilgpt2".to_string(),
            revision: "main".to_string(),
            cache_dir: "models_cache".to_string(),
            files: ModelFiles::default(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GenerationDefaults {
    pub prompt: String,
    pub temperature: f64,
    pub seed: i64,
    pub use_flare: bool,
    pub max_new_tokens: usize,
}

impl Default for GenerationDefaults {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            temperature: 0.7,
            seed: 42,
            use_flare: true,
            max_new_tokens: 8,
        }
    }
}

/// Decoding hyperparameters shared by every sampling call.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SamplingConfig {
    pub top_k: usize,
    pub top_p: f64,
    pub repetition_penalty: f32,
    pub no_repeat_ngram_size: usize,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self { top_k: 5, top_p: 0.75, repetition_penalty: 1.5, no_repeat_ngram_size: 3 }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct GenerationConfig {
    pub defaults: GenerationDefaults,
    pub sampling: SamplingConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub model: ModelConfig,
    pub generation: GenerationConfig,
    pub outputs_dir: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            model: ModelConfig::default(),
            generation: GenerationConfig::default(),
            outputs_dir: "outputs".to_string(),
        }
    }
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(config_path: P) -> anyhow::Result<Self> {
        let config_file = std::fs::File::open(config_path)?;
        let config: Self = serde_yaml::from_reader(config_file)?;
        Ok(config)
    }

    pub fn outputs_path(&self) -> PathBuf {
        PathBuf::from(&self.outputs_dir)
    }
}
