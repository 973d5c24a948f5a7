use candle_core::{Module, Result, Tensor};
use candle_nn::{Linear, VarBuilder};

use super::conv1d;

pub struct Gpt2Mlp {
    c_fc: Linear,
    c_proj: Linear,
}

impl Gpt2Mlp {
    pub fn new(hidden_size: usize, intermediate_size: usize, vb: VarBuilder) -> Result<Self> {
        let c_fc = conv1d(hidden_size, intermediate_size, vb.pp("c_fc"))?;
        let c_proj = conv1d(intermediate_size, hidden_size, vb.pp("c_proj"))?;

        Ok(Self { c_fc, c_proj })
    }

    pub fn forward(&self, input: &Tensor) -> Result<Tensor> {
        let hidden = self.c_fc.forward(input)?;
        // tanh 近似，对应 GPT-2 的 `gelu_new`
        let hidden = hidden.gelu()?;
        self.c_proj.forward(&hidden)
    }
}
