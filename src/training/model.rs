// src/training/model.rs

use burn::{
    module::Module,
    nn::{Linear, LinearConfig},
    tensor::{activation, backend::Backend, Int, Tensor},
};

/// Per-token relation parser: two pooled one-hot views (token chars and
/// utterance chars) plus positional extras feed a shared trunk with a label
/// head and a head-offset head.
#[derive(Module, Debug)]
pub struct ParserModel<B: Backend> {
    trunk: Linear<B>,        // 2V+2 -> H
    label_head: Linear<B>,   // H -> num_labels
    offset_head: Linear<B>,  // H -> 2K+1
}

impl<B: Backend> ParserModel<B> {
    pub fn new(
        vocab: usize,
        hidden: usize,
        num_labels: usize,
        num_offsets: usize,
        dev: &B::Device,
    ) -> Self {
        Self {
            trunk: LinearConfig::new(2 * vocab + 2, hidden).init(dev),
            label_head: LinearConfig::new(hidden, num_labels).init(dev),
            offset_head: LinearConfig::new(hidden, num_offsets).init(dev),
        }
    }

    /// tok_oh [B,T1,V], ctx_oh [B,T2,V], extras [B,2]
    /// -> (label logits [B,L], head-offset logits [B,O])
    pub fn forward(
        &self,
        tok_oh: Tensor<B, 3>,
        ctx_oh: Tensor<B, 3>,
        extras: Tensor<B, 2>,
    ) -> (Tensor<B, 2>, Tensor<B, 2>) {
        let t = masked_mean(tok_oh); // [B,V]
        let c = masked_mean(ctx_oh); // [B,V]
        let x = Tensor::cat(vec![t, c, extras], 1); // [B,2V+2]

        let h = activation::relu(self.trunk.forward(x)); // [B,H]
        (
            self.label_head.forward(h.clone()), // [B,L]
            self.offset_head.forward(h),        // [B,O]
        )
    }
}

/// Mean over time of a one-hot sequence [B,T,V] -> [B,V]; channel 0 is PAD
/// and PAD timesteps are excluded from both the sum and the denominator.
fn masked_mean<B: Backend>(x_oh: Tensor<B, 3>) -> Tensor<B, 2> {
    let dev = x_oh.device();
    let dims = x_oh.dims(); // [B,T,V]
    let b = dims[0];
    let t = dims[1];

    // PAD selector (index 0) as Int tensor
    let idx0: Tensor<B, 1, Int> = Tensor::<B, 1, Int>::from_ints([0i32], &dev); // [1]

    let pad_bt1: Tensor<B, 3> = x_oh.clone().select(2, idx0); // [B,T,1]
    let pad_bt: Tensor<B, 2> = pad_bt1.squeeze::<2>(2);       // [B,T]

    // mask 1 for real tokens, 0 for PAD
    let ones_bt: Tensor<B, 2> = pad_bt.ones_like();
    let mask_bt: Tensor<B, 2> = ones_bt - pad_bt;

    let mask_bt1: Tensor<B, 3> = mask_bt.clone().reshape([b, t, 1]);
    let masked: Tensor<B, 3> = x_oh * mask_bt1; // PAD rows zeroed

    let sum_b1v: Tensor<B, 3> = masked.sum_dim(1);       // [B,1,V]
    let sum_bv: Tensor<B, 2> = sum_b1v.squeeze::<2>(1);  // [B,V]

    let denom_b1: Tensor<B, 2> = mask_bt.sum_dim(1).clamp_min(1.0); // [B,1]
    sum_bv / denom_b1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relations::NUM_LABELS;
    use crate::tokenizer::vocab::{one_hot_batch, VOCAB_SIZE};
    use burn_ndarray::NdArray;

    type B = NdArray<f32>;

    #[test]
    fn forward_shapes() {
        let dev = Default::default();
        let model = ParserModel::<B>::new(VOCAB_SIZE, 32, NUM_LABELS, 17, &dev);

        let tok = one_hot_batch::<B>(&[vec![5, 6, 0, 0], vec![9, 0, 0, 0]], VOCAB_SIZE, &dev);
        let ctx = one_hot_batch::<B>(&[vec![5; 8], vec![9; 8]], VOCAB_SIZE, &dev);
        let extras = Tensor::<B, 1>::from_floats([0.0, 0.5, 1.0, 0.5], &dev).reshape([2, 2]);

        let (labels, offsets) = model.forward(tok, ctx, extras);
        assert_eq!(labels.dims(), [2, NUM_LABELS]);
        assert_eq!(offsets.dims(), [2, 17]);
    }

    #[test]
    fn pad_only_rows_pool_to_zero() {
        let dev = Default::default();
        let pooled = masked_mean::<B>(one_hot_batch::<B>(&[vec![0, 0, 0]], VOCAB_SIZE, &dev));
        let total: f32 = pooled.sum().into_data().as_slice::<f32>().unwrap()[0];
        assert_eq!(total, 0.0);
    }
}
