pub mod attention;
pub mod block;
pub mod feed_forward;

pub use self::attention::CausalSelfAttention;
pub use self::block::{Gpt2Block, Gpt2Model};
pub use self::feed_forward::Gpt2Mlp;

use candle_core::Result;
use candle_nn::{Linear, VarBuilder};

/// GPT-2 stores its projections as `Conv1D` weights of shape `[in, out]`;
/// candle's `Linear` expects `[out, in]`.
pub(crate) fn conv1d(in_dim: usize, out_dim: usize, vb: VarBuilder) -> Result<Linear> {
    let weight = vb.get((in_dim, out_dim), "weight")?.t()?.contiguous()?;
    let bias = vb.get(out_dim, "bias")?;
    Ok(Linear::new(weight, Some(bias)))
}
