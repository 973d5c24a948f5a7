use candle_core::{DType, Device, Tensor};
use fantasy_namegen::service::models::gpt2::{Gpt2Sampler, ModelLoader};
use fantasy_namegen::service::models::{ModelError, SamplingRequest, TextSampler};
use fantasy_namegen::utils::config::SamplingConfig;
use fantasy_namegen::utils::ModelPaths;
use std::collections::HashMap;
use tempfile::{tempdir, TempDir};

const N_EMBD: usize = 8;
const N_POSITIONS: usize = 16;
const WORDS: [&str; 3] = ["elf", "name", "Galadwen"];

const CONFIG_JSON: &str =
    r#"{"vocab_size": 4, "n_positions": 16, "n_embd": 8, "n_layer": 1, "n_head": 2, "eos_token_id": 3}"#;

const TOKENIZER_JSON: &str = r#"{
  "version": "1.0",
  "truncation": null,
  "padding": null,
  "added_tokens": [
    {"id": 3, "content": "<|endoftext|>", "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true}
  ],
  "normalizer": null,
  "pre_tokenizer": {"type": "Whitespace"},
  "post_processor": null,
  "decoder": null,
  "model": {
    "type": "WordLevel",
    "vocab": {"elf": 0, "name": 1, "Galadwen": 2, "<|endoftext|>": 3},
    "unk_token": "<|endoftext|>"
  }
}"#;

fn zeros(shape: Vec<usize>) -> Tensor {
    Tensor::zeros(shape, DType::F32, &Device::Cpu).unwrap()
}

/// 单层 GPT-2 权重，全零时 logits 均匀；`eos_only` 时只有 EOS 得分
fn checkpoint(eos_only: bool) -> HashMap<String, Tensor> {
    let n = N_EMBD;
    let mut tensors = HashMap::new();

    let wte = if eos_only {
        let mut data = vec![0f32; 4 * n];
        data[3 * n..].fill(1.0);
        Tensor::from_vec(data, (4, n), &Device::Cpu).unwrap()
    } else {
        zeros(vec![4, n])
    };
    tensors.insert("wte.weight".to_string(), wte);
    tensors.insert("wpe.weight".to_string(), zeros(vec![N_POSITIONS, n]));

    for norm in ["h.0.ln_1", "h.0.ln_2", "ln_f"] {
        tensors.insert(format!("{}.weight", norm), zeros(vec![n]));
        tensors.insert(format!("{}.bias", norm), zeros(vec![n]));
    }
    if eos_only {
        tensors.insert("ln_f.bias".to_string(), Tensor::ones(n, DType::F32, &Device::Cpu).unwrap());
    }

    for (layer, in_dim, out_dim) in [
        ("h.0.attn.c_attn", n, 3 * n),
        ("h.0.attn.c_proj", n, n),
        ("h.0.mlp.c_fc", n, 4 * n),
        ("h.0.mlp.c_proj", 4 * n, n),
    ] {
        tensors.insert(format!("{}.weight", layer), zeros(vec![in_dim, out_dim]));
        tensors.insert(format!("{}.bias", layer), zeros(vec![out_dim]));
    }
    tensors
}

fn write_checkpoint(tensors: &HashMap<String, Tensor>) -> (TempDir, ModelPaths) {
    let dir = tempdir().unwrap();
    let paths = ModelPaths {
        weights: dir.path().join("model.safetensors"),
        config: dir.path().join("config.json"),
        tokenizer: dir.path().join("tokenizer.json"),
    };
    candle_core::safetensors::save(tensors, &paths.weights).unwrap();
    std::fs::write(&paths.config, CONFIG_JSON).unwrap();
    std::fs::write(&paths.tokenizer, TOKENIZER_JSON).unwrap();
    (dir, paths)
}

fn sampler_from(tensors: &HashMap<String, Tensor>) -> (TempDir, Gpt2Sampler) {
    let (dir, paths) = write_checkpoint(tensors);
    let loader = ModelLoader::from_paths(paths).unwrap();
    let sampler = Gpt2Sampler::from_loader(&loader, SamplingConfig::default()).unwrap();
    (dir, sampler)
}

fn request(temperature: f64, seed: i64) -> SamplingRequest {
    SamplingRequest { max_new_tokens: 8, temperature, seed }
}

fn only_known_words(text: &str) -> bool {
    text.split_whitespace().all(|word| WORDS.contains(&word))
}

#[test]
fn test_same_seed_gives_same_text() {
    let (_dir, sampler) = sampler_from(&checkpoint(false));

    let first = sampler.sample("elf name", &request(0.7, 42)).unwrap();
    let second = sampler.sample("elf name", &request(0.7, 42)).unwrap();

    assert_eq!(first, second);
    assert!(first.starts_with("elf name"), "{}", first);
    assert!(only_known_words(&first), "{}", first);
    assert!(!first.contains("<|endoftext|>"));
}

#[test]
fn test_empty_prompt_is_seeded_with_eos() {
    let (_dir, sampler) = sampler_from(&checkpoint(false));
    assert_eq!(sampler.eos_token_id(), 3);

    let text = sampler.sample("", &request(0.7, 42)).unwrap();
    assert!(only_known_words(&text), "{}", text);
    assert_eq!(text, text.trim());
}

#[test]
fn test_prompt_longer_than_context_is_rejected() {
    let (_dir, sampler) = sampler_from(&checkpoint(false));
    let prompt = "elf name elf name elf name elf name elf";

    match sampler.sample(prompt, &request(0.7, 42)) {
        Err(ModelError::PromptTooLong { len, max }) => {
            assert_eq!(len, 9);
            assert_eq!(max, N_POSITIONS);
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_non_positive_temperature_is_an_error() {
    let (_dir, sampler) = sampler_from(&checkpoint(false));
    assert!(matches!(
        sampler.sample("elf name", &request(0.0, 42)),
        Err(ModelError::InvalidTemperature(_))
    ));
}

#[test]
fn test_generation_stops_at_eos_and_trims() {
    let (_dir, sampler) = sampler_from(&checkpoint(true));

    assert_eq!(sampler.sample("elf name", &request(0.7, 1)).unwrap(), "elf name");
    assert_eq!(sampler.sample("  elf   name  ", &request(1.3, 9)).unwrap(), "elf name");
}

#[test]
fn test_eos_in_prompt_is_masked_and_skipped() {
    let (_dir, sampler) = sampler_from(&checkpoint(true));

    let text = sampler.sample("<|endoftext|> Galadwen", &request(0.7, 42)).unwrap();
    assert_eq!(text, "Galadwen");
}

#[test]
fn test_loader_reads_plain_tensor_names() {
    let tensors = checkpoint(false);
    let (_dir, paths) = write_checkpoint(&tensors);
    let loader = ModelLoader::from_paths(paths).unwrap();

    let loaded = loader.load().unwrap();
    assert_eq!(loaded.len(), tensors.len());
    assert_eq!(loaded["wte.weight"].dims(), &[4, N_EMBD]);
    assert_eq!(loader.config().unwrap().n_layer, 1);
}

#[test]
fn test_loader_strips_transformer_prefix() {
    let prefixed: HashMap<String, Tensor> = checkpoint(true)
        .into_iter()
        .map(|(name, tensor)| (format!("transformer.{}", name), tensor))
        .collect();
    let (_dir, sampler) = sampler_from(&prefixed);

    assert_eq!(sampler.sample("Galadwen elf", &request(0.7, 42)).unwrap(), "Galadwen elf");
}
