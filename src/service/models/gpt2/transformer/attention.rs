use candle_core::{Module, Result, Tensor, D};
use candle_nn::{Linear, VarBuilder};

use super::conv1d;

/// 带因果掩码的多头自注意力
pub struct CausalSelfAttention {
    c_attn: Linear,
    c_proj: Linear,
    num_heads: usize,
    head_size: usize,
}

impl CausalSelfAttention {
    pub fn new(hidden_size: usize, num_heads: usize, vb: VarBuilder) -> Result<Self> {
        let head_size = hidden_size / num_heads;
        let c_attn = conv1d(hidden_size, 3 * hidden_size, vb.pp("c_attn"))?;
        let c_proj = conv1d(hidden_size, hidden_size, vb.pp("c_proj"))?;

        Ok(Self { c_attn, c_proj, num_heads, head_size })
    }

    /// 前向传播
    ///
    /// # 参数
    /// - input: [batch_size, seq_len, hidden_size]
    /// - mask: 加性掩码 [1, 1, seq_len, seq_len]，允许位置为 0
    pub fn forward(&self, input: &Tensor, mask: &Tensor) -> Result<Tensor> {
        let (batch_size, seq_len, hidden_size) = input.dims3()?;

        let qkv = self.c_attn.forward(input)?;
        let query = qkv.narrow(D::Minus1, 0, hidden_size)?;
        let key = qkv.narrow(D::Minus1, hidden_size, hidden_size)?;
        let value = qkv.narrow(D::Minus1, 2 * hidden_size, hidden_size)?;

        let split_heads = |t: Tensor| -> Result<Tensor> {
            t.reshape((batch_size, seq_len, self.num_heads, self.head_size))?
                .transpose(1, 2)?
                .contiguous()
        };
        let query = split_heads(query)?;
        let key = split_heads(key)?;
        let value = split_heads(value)?;

        // Q * K^T / sqrt(d_k)
        let scores = (query.matmul(&key.t()?)? / (self.head_size as f64).sqrt())?;
        let scores = scores.broadcast_add(mask)?;
        let weights = candle_nn::ops::softmax_last_dim(&scores)?;

        let context = weights.matmul(&value)?;
        let context =
            context.transpose(1, 2)?.reshape((batch_size, seq_len, self.num_heads * self.head_size))?;

        self.c_proj.forward(&context)
    }
}
