use crate::service::models::gpt2::Gpt2Sampler;
use crate::service::models::TextSampler;
use crate::service::names::NameGenerator;
use crate::utils::config::AppConfig;
use anyhow::Context;
use log::{info, warn};
use std::sync::Arc;

pub const CONFIG_PATH: &str = "config/app.yml";
pub const LOG_CONFIG_PATH: &str = "config/log4rs.yml";

/// Initializes logging and loads the application configuration.
pub async fn init() -> crate::error::Result<Arc<AppConfig>> {
    // 初始化日志系统
    log4rs::init_file(LOG_CONFIG_PATH, Default::default())
        .with_context(|| format!("failed to initialize logging from {}", LOG_CONFIG_PATH))?;

    // 加载应用配置
    let config = AppConfig::load(CONFIG_PATH)
        .with_context(|| format!("failed to load {}", CONFIG_PATH))?;
    info!("Configuration loaded from {}", CONFIG_PATH);
    info!(
        "Generation defaults: prompt={:?}, temperature={}, seed={}, use_flare={}",
        config.generation.defaults.prompt,
        config.generation.defaults.temperature,
        config.generation.defaults.seed,
        config.generation.defaults.use_flare
    );

    Ok(Arc::new(config))
}

/// Builds the process-wide name generator.
///
/// A failed model load is not fatal: the generator is returned in rule-based-only
/// mode and stays that way for the lifetime of the process.
pub async fn init_generator(config: &AppConfig) -> NameGenerator {
    if !config.model.enabled {
        info!("{}", t!("logs.model_disabled"));
        return NameGenerator::rule_based_only();
    }

    let sampling = config.generation.sampling.clone();
    let model_config = config.model.clone();
    let loaded =
        tokio::task::spawn_blocking(move || Gpt2Sampler::load(&model_config, sampling)).await;

    match loaded {
        Ok(Ok(sampler)) => {
            info!("{}", t!("logs.model_loaded", model = config.model.hf_hub_id.as_str()));
            let sampler: Arc<dyn TextSampler> = Arc::new(sampler);
            NameGenerator::with_sampler(sampler)
        }
        Ok(Err(e)) => {
            warn!("{}", t!("logs.model_unavailable", msg = e.to_string()));
            NameGenerator::rule_based_only()
        }
        Err(e) => {
            warn!("{}", t!("logs.model_unavailable", msg = e.to_string()));
            NameGenerator::rule_based_only()
        }
    }
}
