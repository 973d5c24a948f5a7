use candle_core::{DType, Device, IndexOp, Module, Result, Tensor};
use candle_nn::{Embedding, LayerNorm, VarBuilder};

use super::{attention::CausalSelfAttention, feed_forward::Gpt2Mlp};
use crate::service::models::gpt2::config::Gpt2Config;

const MASKED: f32 = -1e9;

/// Pre-norm transformer block: `x + attn(ln_1(x))`, then `h + mlp(ln_2(h))`.
pub struct Gpt2Block {
    ln_1: LayerNorm,
    attn: CausalSelfAttention,
    ln_2: LayerNorm,
    mlp: Gpt2Mlp,
}

impl Gpt2Block {
    pub fn new(config: &Gpt2Config, vb: VarBuilder) -> Result<Self> {
        let ln_1 = candle_nn::layer_norm(config.n_embd, config.layer_norm_epsilon, vb.pp("ln_1"))?;
        let attn = CausalSelfAttention::new(config.n_embd, config.n_head, vb.pp("attn"))?;
        let ln_2 = candle_nn::layer_norm(config.n_embd, config.layer_norm_epsilon, vb.pp("ln_2"))?;
        let mlp = Gpt2Mlp::new(config.n_embd, config.intermediate_size(), vb.pp("mlp"))?;

        Ok(Self { ln_1, attn, ln_2, mlp })
    }

    pub fn forward(&self, input: &Tensor, mask: &Tensor) -> Result<Tensor> {
        let residual = input;
        let hidden = self.attn.forward(&self.ln_1.forward(input)?, mask)?;
        let hidden = (hidden + residual)?;

        let residual = &hidden;
        let output = self.mlp.forward(&self.ln_2.forward(&hidden)?)?;
        output + residual
    }
}

/// GPT-2 language model with the output head tied to the token embeddings.
pub struct Gpt2Model {
    wte: Embedding,
    wpe: Embedding,
    blocks: Vec<Gpt2Block>,
    ln_f: LayerNorm,
    device: Device,
}

impl Gpt2Model {
    pub fn new(config: &Gpt2Config, vb: VarBuilder) -> Result<Self> {
        let device = vb.device().clone();
        let wte = candle_nn::embedding(config.vocab_size, config.n_embd, vb.pp("wte"))?;
        let wpe = candle_nn::embedding(config.n_positions, config.n_embd, vb.pp("wpe"))?;

        let mut blocks = Vec::with_capacity(config.n_layer);
        for i in 0..config.n_layer {
            blocks.push(Gpt2Block::new(config, vb.pp(format!("h.{}", i)))?);
        }
        let ln_f = candle_nn::layer_norm(config.n_embd, config.layer_norm_epsilon, vb.pp("ln_f"))?;
        log::debug!("Built GPT-2 with {} blocks on {:?}", blocks.len(), device);

        Ok(Self { wte, wpe, blocks, ln_f, device })
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    /// Returns next-token logits for the last position of a single sequence.
    ///
    /// `attention_mask` marks real tokens with 1 and padding with 0; keys that
    /// are padding or lie in the future are masked out.
    pub fn forward(&self, input_ids: &[u32], attention_mask: &[u32]) -> Result<Vec<f32>> {
        let seq_len = input_ids.len();
        let positions = position_ids(attention_mask);

        let ids = Tensor::new(input_ids, &self.device)?.unsqueeze(0)?;
        let positions = Tensor::new(positions.as_slice(), &self.device)?.unsqueeze(0)?;
        let mask = self.attention_bias(attention_mask)?;

        let mut hidden = (self.wte.forward(&ids)? + self.wpe.forward(&positions)?)?;
        for block in &self.blocks {
            hidden = block.forward(&hidden, &mask)?;
        }
        let hidden = self.ln_f.forward(&hidden)?;

        let last = hidden.i((0, seq_len - 1))?.unsqueeze(0)?;
        let logits = last.matmul(&self.wte.embeddings().t()?)?;
        logits.squeeze(0)?.to_dtype(DType::F32)?.to_vec1::<f32>()
    }

    fn attention_bias(&self, attention_mask: &[u32]) -> Result<Tensor> {
        let seq_len = attention_mask.len();
        let bias: Vec<f32> = (0..seq_len)
            .flat_map(|i| {
                (0..seq_len).map(move |j| {
                    if j <= i && attention_mask[j] != 0 {
                        0.0
                    } else {
                        MASKED
                    }
                })
            })
            .collect();
        Tensor::from_vec(bias, (1, 1, seq_len, seq_len), &self.device)
    }
}

/// Cumulative sum of the mask minus one; padded positions get position 1.
pub fn position_ids(attention_mask: &[u32]) -> Vec<u32> {
    let mut running = 0u32;
    attention_mask
        .iter()
        .map(|&m| {
            running += m;
            if m == 0 {
                1
            } else {
                running - 1
            }
        })
        .collect()
}
