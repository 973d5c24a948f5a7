//! 直接调用时的实验与样例输出
//!
//! 以固定的参数组合运行名称生成，并把若干样例名称写入输出目录。

use std::path::{Path, PathBuf};

use crate::entities::generation::GenerationRequest;
use crate::service::names::NameGenerator;
use crate::utils::config::DEFAULT_PROMPT;

/// Prompts used for the saved samples, one file each.
pub const SAMPLE_PROMPTS: [&str; 3] = [
    "Single elf name, no spaces: ",
    "Single dragon item name, no spaces: ",
    "Single fantasy village name, no spaces: ",
];

#[derive(Debug, Clone)]
pub struct ExperimentConfig {
    pub temperature: f64,
    pub seed: i64,
    pub use_flare: bool,
}

#[derive(Debug, Clone)]
pub struct ExperimentResult {
    pub prompt: String,
    pub temperature: f64,
    pub seed: i64,
    pub use_flare: bool,
    pub name: String,
}

pub fn experiment_configs() -> Vec<ExperimentConfig> {
    vec![
        ExperimentConfig { temperature: 0.5, seed: 42, use_flare: true },
        ExperimentConfig { temperature: 1.2, seed: 123, use_flare: true },
        ExperimentConfig { temperature: 0.7, seed: 456, use_flare: true },
        ExperimentConfig { temperature: 0.7, seed: 42, use_flare: false },
    ]
}

pub fn run_experiments(generator: &NameGenerator) -> Vec<ExperimentResult> {
    experiment_configs()
        .into_iter()
        .map(|config| {
            let request =
                GenerationRequest::new(DEFAULT_PROMPT, config.temperature, config.seed, config.use_flare);
            let name = generator.generate(&request);
            ExperimentResult {
                prompt: request.prompt,
                temperature: config.temperature,
                seed: config.seed,
                use_flare: config.use_flare,
                name,
            }
        })
        .collect()
}

/// Writes `name1.txt`..`name3.txt` under `dir`, creating it if needed.
///
/// Sample `i` uses temperature `0.7 + 0.2 * i` and seed `42 + 10 * i`.
pub fn save_samples(generator: &NameGenerator, dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(SAMPLE_PROMPTS.len());
    for (i, prompt) in SAMPLE_PROMPTS.iter().enumerate() {
        let request =
            GenerationRequest::new(*prompt, 0.7 + i as f64 * 0.2, 42 + i as i64 * 10, true);
        let name = generator.generate(&request);
        let path = dir.join(format!("name{}.txt", i + 1));
        std::fs::write(&path, name.as_bytes())?;
        log::info!("Saved '{}' to {}", name, path.display());
        written.push(path);
    }
    Ok(written)
}
