//! logits 处理与采样
//!
//! 每一步按固定顺序执行：重复惩罚、n-gram 禁止重复、温度缩放、top-k、top-p，
//! 然后用调用方提供种子的 RNG 从剩余分布中抽样。

use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;

use super::ModelError;
use crate::utils::config::SamplingConfig;

/// Scales logits of every token already in `history`.
///
/// Positive logits are divided by `penalty`, negative ones multiplied, so the
/// token always becomes less likely. Each distinct token is penalized once.
pub fn apply_repetition_penalty(logits: &mut [f32], history: &[u32], penalty: f32) {
    if (penalty - 1.0).abs() < f32::EPSILON {
        return;
    }
    let mut seen = vec![false; logits.len()];
    for &token in history {
        let idx = token as usize;
        if idx >= logits.len() || seen[idx] {
            continue;
        }
        seen[idx] = true;
        let score = logits[idx];
        logits[idx] = if score < 0.0 { score * penalty } else { score / penalty };
    }
}

/// Tokens that would complete an `n`-gram already present in `history`.
pub fn banned_ngram_tokens(history: &[u32], n: usize) -> Vec<u32> {
    if n == 0 || history.len() + 1 < n {
        return Vec::new();
    }
    let mut continuations: HashMap<&[u32], Vec<u32>> = HashMap::new();
    for ngram in history.windows(n) {
        continuations.entry(&ngram[..n - 1]).or_default().push(ngram[n - 1]);
    }
    let tail = &history[history.len() + 1 - n..];
    continuations.remove(tail).unwrap_or_default()
}

pub fn ban_repeated_ngrams(logits: &mut [f32], history: &[u32], n: usize) {
    for token in banned_ngram_tokens(history, n) {
        if let Some(score) = logits.get_mut(token as usize) {
            *score = f32::NEG_INFINITY;
        }
    }
}

pub fn apply_temperature(logits: &mut [f32], temperature: f64) -> Result<(), ModelError> {
    if !temperature.is_finite() || temperature <= 0.0 {
        return Err(ModelError::InvalidTemperature(temperature));
    }
    let temperature = temperature as f32;
    for score in logits.iter_mut() {
        *score /= temperature;
    }
    Ok(())
}

/// Keeps the `k` highest logits (ties with the k-th value survive).
pub fn top_k_filter(logits: &mut [f32], k: usize) {
    if k == 0 || k >= logits.len() {
        return;
    }
    let mut sorted: Vec<f32> = logits.to_vec();
    sorted.sort_unstable_by(|a, b| b.total_cmp(a));
    let threshold = sorted[k - 1];
    for score in logits.iter_mut() {
        if *score < threshold {
            *score = f32::NEG_INFINITY;
        }
    }
}

/// Nucleus filter.
///
/// Tokens are ordered by ascending probability; those whose cumulative
/// probability stays at or below `1 - top_p` are removed. The most likely
/// token is always kept.
pub fn top_p_filter(logits: &mut [f32], top_p: f64) {
    if top_p >= 1.0 {
        return;
    }
    let probs = softmax(logits);
    let mut order: Vec<usize> = (0..logits.len()).collect();
    order.sort_by(|&a, &b| logits[a].total_cmp(&logits[b]));

    let cutoff = 1.0 - top_p;
    let mut cumulative = 0.0f64;
    let last = order.len().saturating_sub(1);
    for (rank, &idx) in order.iter().enumerate() {
        cumulative += probs[idx] as f64;
        if rank != last && cumulative <= cutoff {
            logits[idx] = f32::NEG_INFINITY;
        }
    }
}

pub fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    if !max.is_finite() {
        return vec![0.0; logits.len()];
    }
    let exps: Vec<f32> = logits.iter().map(|&x| (x - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.into_iter().map(|x| x / sum).collect()
}

/// Stateful sampler for one generation run; owns the seeded RNG.
pub struct TokenSampler {
    config: SamplingConfig,
    temperature: f64,
    rng: StdRng,
}

impl TokenSampler {
    pub fn new(config: SamplingConfig, temperature: f64, seed: i64) -> Self {
        Self { config, temperature, rng: StdRng::seed_from_u64(seed as u64) }
    }

    /// Runs the processor chain over `logits` and draws the next token.
    pub fn next_token(&mut self, mut logits: Vec<f32>, history: &[u32]) -> Result<u32, ModelError> {
        apply_repetition_penalty(&mut logits, history, self.config.repetition_penalty);
        ban_repeated_ngrams(&mut logits, history, self.config.no_repeat_ngram_size);
        apply_temperature(&mut logits, self.temperature)?;
        top_k_filter(&mut logits, self.config.top_k);
        top_p_filter(&mut logits, self.config.top_p);

        let probs = softmax(&logits);
        let dist = WeightedIndex::new(&probs)
            .map_err(|e| ModelError::Sampling(format!("invalid distribution: {}", e)))?;
        Ok(dist.sample(&mut self.rng) as u32)
    }
}
