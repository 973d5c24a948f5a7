use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use safetensors::SafeTensors;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokenizers::Tokenizer;

use super::config::Gpt2Config;
use crate::service::models::ModelError;
use crate::utils::{config::ModelConfig, download::ModelDownloader, ModelPaths};

/// Some GPT-2 exports prefix every tensor with the head model's name.
const PREFIXED_EMBEDDING: &str = "transformer.wte.weight";

pub struct ModelLoader {
    paths: ModelPaths,
    device: Device,
}

impl ModelLoader {
    /// Resolves the checkpoint through the hub cache, downloading missing files.
    pub fn new(model_config: &ModelConfig) -> Result<Self, ModelError> {
        let paths = ModelDownloader::download_model(model_config)?;
        Self::from_paths(paths)
    }

    pub fn from_paths(paths: ModelPaths) -> Result<Self, ModelError> {
        let device = Device::cuda_if_available(0)
            .map_err(|e| ModelError::InitializationFailed(format!("Failed to get device: {}", e)))?;
        Ok(Self { paths, device })
    }

    pub fn config(&self) -> Result<Gpt2Config, ModelError> {
        Ok(Gpt2Config::from_file(&self.paths.config)?)
    }

    pub fn load(&self) -> Result<HashMap<String, Tensor>, ModelError> {
        load_safetensors(&self.paths.weights, &self.device)
    }

    pub fn get_var_builder(&self) -> Result<VarBuilder<'static>, ModelError> {
        let tensors = self.load()?;
        let prefixed = tensors.contains_key(PREFIXED_EMBEDDING);
        let vb = VarBuilder::from_tensors(tensors, DType::F32, &self.device);
        Ok(if prefixed { vb.pp("transformer") } else { vb })
    }

    pub fn get_tokenizer(&self) -> Result<Tokenizer, ModelError> {
        Tokenizer::from_file(&self.paths.tokenizer)
            .map_err(|e| ModelError::Tokenizer(format!("Failed to load tokenizer: {}", e)))
    }

    pub fn weights_path(&self) -> &PathBuf {
        &self.paths.weights
    }
}

fn load_safetensors(path: &Path, device: &Device) -> Result<HashMap<String, Tensor>, ModelError> {
    let file = std::fs::File::open(path).map_err(|e| {
        ModelError::InitializationFailed(format!("{}: {}", path.display(), e))
    })?;
    let mmap = unsafe { memmap2::MmapOptions::new().map(&file) }
        .map_err(|e| ModelError::InitializationFailed(format!("mmap failed: {}", e)))?;
    let tensors = SafeTensors::deserialize(&mmap)
        .map_err(|e| ModelError::InitializationFailed(format!("invalid safetensors: {}", e)))?;

    let mut model_tensors = HashMap::new();
    for (name, view) in tensors.tensors() {
        let dtype: DType = view.dtype().try_into()?;
        let tensor = Tensor::from_raw_buffer(view.data(), dtype, view.shape(), device)?;
        model_tensors.insert(name, tensor);
    }
    log::debug!("Loaded {} tensors from {}", model_tensors.len(), path.display());

    Ok(model_tensors)
}
