//! 直接运行：打印几组采样参数下的名称，并把三个样例名称保存到输出目录

use fantasy_namegen::service::experiments::{run_experiments, save_samples};
use fantasy_namegen::service::names::rule_based_name;
use fantasy_namegen::utils::{init, init_generator};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = init().await?;
    let generator = init_generator(&config).await;

    for r in run_experiments(&generator) {
        println!(
            "Prompt: {}, Temp: {}, Seed: {}, Flare: {}, Name: {}",
            r.prompt, r.temperature, r.seed, r.use_flare, r.name
        );
    }
    println!("Rule-based only (no ML): {}", rule_based_name(&mut rand::thread_rng()));

    match save_samples(&generator, &config.outputs_path()) {
        Ok(paths) => {
            for path in paths {
                println!("Saved {}", path.display());
            }
        }
        Err(e) => log::error!("Save error: {}", e),
    }
    Ok(())
}
