use anyhow::Result;
use hf_hub::api::sync::ApiBuilder;
use hf_hub::{Repo, RepoType};
use std::path::PathBuf;

use crate::utils::config::ModelConfig;

/// Resolved local paths of the files a GPT-2 checkpoint needs.
#[derive(Debug, Clone)]
pub struct ModelPaths {
    pub weights: PathBuf,
    pub config: PathBuf,
    pub tokenizer: PathBuf,
}

pub struct ModelDownloader;

impl ModelDownloader {
    /// Fetches the checkpoint files into the configured cache, reusing files already present.
    pub fn download_model(config: &ModelConfig) -> Result<ModelPaths> {
        let api = ApiBuilder::new()
            .with_cache_dir(PathBuf::from(&config.cache_dir))
            .with_progress(false)
            .build()?;
        let repo = api.repo(Repo::with_revision(
            config.hf_hub_id.clone(),
            RepoType::Model,
            config.revision.clone(),
        ));

        log::debug!("Resolving {} files from {}", config.hf_hub_id, config.cache_dir);
        let weights = repo.get(&config.files.weights)?;
        let model_config = repo.get(&config.files.config)?;
        let tokenizer = repo.get(&config.files.tokenizer)?;

        Ok(ModelPaths { weights, config: model_config, tokenizer })
    }
}
