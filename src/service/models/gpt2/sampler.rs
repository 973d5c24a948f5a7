use tokenizers::Tokenizer;

use super::config::Gpt2Config;
use super::loader::ModelLoader;
use super::transformer::Gpt2Model;
use crate::service::models::sampling::TokenSampler;
use crate::service::models::{ModelError, SamplingRequest, TextSampler};
use crate::utils::config::{ModelConfig, SamplingConfig};

const END_OF_TEXT: &str = "<|endoftext|>";

/// A loaded GPT-2 checkpoint plus its tokenizer.
pub struct Gpt2Sampler {
    model: Gpt2Model,
    tokenizer: Tokenizer,
    config: Gpt2Config,
    sampling: SamplingConfig,
    eos_token_id: u32,
}

impl Gpt2Sampler {
    /// Downloads (if needed) and loads the configured checkpoint.
    pub fn load(model_config: &ModelConfig, sampling: SamplingConfig) -> Result<Self, ModelError> {
        let loader = ModelLoader::new(model_config)?;
        Self::from_loader(&loader, sampling)
    }

    pub fn from_loader(loader: &ModelLoader, sampling: SamplingConfig) -> Result<Self, ModelError> {
        log::info!("Loading weights from {}", loader.weights_path().display());
        let config = loader.config()?;
        let model = Gpt2Model::new(&config, loader.get_var_builder()?)?;
        let tokenizer = loader.get_tokenizer()?;

        Ok(Self::from_parts(model, tokenizer, config, sampling))
    }

    pub fn from_parts(
        model: Gpt2Model,
        tokenizer: Tokenizer,
        config: Gpt2Config,
        sampling: SamplingConfig,
    ) -> Self {
        // GPT-2 没有 pad token，以 EOS 代替
        let eos_token_id = tokenizer.token_to_id(END_OF_TEXT).unwrap_or(config.eos_token_id);
        Self { model, tokenizer, config, sampling, eos_token_id }
    }

    pub fn eos_token_id(&self) -> u32 {
        self.eos_token_id
    }

    fn encode(&self, prompt: &str) -> Result<Vec<u32>, ModelError> {
        let encoding = self
            .tokenizer
            .encode(prompt, false)
            .map_err(|e| ModelError::Tokenizer(e.to_string()))?;
        Ok(encoding.get_ids().to_vec())
    }
}

impl TextSampler for Gpt2Sampler {
    fn sample(&self, prompt: &str, request: &SamplingRequest) -> Result<String, ModelError> {
        let mut tokens = self.encode(prompt)?;
        if tokens.is_empty() {
            tokens.push(self.eos_token_id);
        }
        let max_len = self.config.n_positions;
        if tokens.len() + request.max_new_tokens > max_len {
            return Err(ModelError::PromptTooLong { len: tokens.len(), max: max_len });
        }

        let mut attention_mask: Vec<u32> =
            tokens.iter().map(|&t| u32::from(t != self.eos_token_id)).collect();
        let mut sampler =
            TokenSampler::new(self.sampling.clone(), request.temperature, request.seed);

        for _ in 0..request.max_new_tokens {
            let logits = self.model.forward(&tokens, &attention_mask)?;
            let next = sampler.next_token(logits, &tokens)?;
            tokens.push(next);
            attention_mask.push(1);
            if next == self.eos_token_id {
                break;
            }
        }
        log::debug!("Sampled {} tokens on {:?}", tokens.len(), self.model.device());

        let text = self
            .tokenizer
            .decode(&tokens, true)
            .map_err(|e| ModelError::Tokenizer(e.to_string()))?;
        Ok(text.trim().to_string())
    }
}
