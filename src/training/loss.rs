// src/training/loss.rs

use burn::tensor::{activation, backend::Backend, Tensor};

/// Build one-hot: labels len B, classes C -> [B, C]
pub fn one_hot<B: Backend>(
    labels: &[usize],
    num_classes: usize,
    device: &B::Device,
) -> Tensor<B, 2> {
    let b = labels.len();
    let mut data = vec![0.0f32; b * num_classes];
    for (i, &cls) in labels.iter().enumerate() {
        if cls < num_classes {
            data[i * num_classes + cls] = 1.0;
        }
    }
    let flat = Tensor::<B, 1>::from_floats(data.as_slice(), device);
    flat.reshape([b, num_classes])
}

/// Cross-entropy from logits [B,C] and integer labels -> per-sample loss [B]
pub fn cross_entropy_from_logits<B: Backend>(
    logits: Tensor<B, 2>,
    labels: &[usize],
    num_classes: usize,
) -> Tensor<B, 1> {
    let device = logits.device();
    let oh = one_hot::<B>(labels, num_classes, &device); // [B,C]
    let log_probs = activation::log_softmax(logits, 1);  // [B,C]
    let per_row = (oh * log_probs).sum_dim(1).squeeze(1); // [B]
    -per_row
}

/// Weights for the two-task loss
#[derive(Clone, Copy, Debug)]
pub struct LossWeights {
    pub w_label: f32,
    pub w_offset: f32,
}

/// Total loss: CE over relation labels + weighted CE over head offsets -> [1]
pub fn total_loss<B: Backend>(
    label_logits: Tensor<B, 2>,  // [B,L]
    labels: &[usize],
    num_labels: usize,
    offset_logits: Tensor<B, 2>, // [B,O]
    offsets: &[usize],
    num_offsets: usize,
    w: LossWeights,
) -> Tensor<B, 1> {
    let l_label = cross_entropy_from_logits(label_logits, labels, num_labels);    // [B]
    let l_offset = cross_entropy_from_logits(offset_logits, offsets, num_offsets); // [B]

    let total = l_label.mul_scalar(w.w_label) + l_offset.mul_scalar(w.w_offset); // [B]
    total.mean() // [1]
}

pub fn default_weights() -> LossWeights {
    LossWeights {
        w_label: 1.0,
        w_offset: 0.5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn_ndarray::NdArray;

    type B = NdArray<f32>;

    #[test]
    fn confident_correct_logits_give_small_loss() {
        let dev = Default::default();
        let logits = Tensor::<B, 1>::from_floats([10.0, -10.0, -10.0], &dev).reshape([1, 3]);
        let loss = cross_entropy_from_logits(logits, &[0], 3);
        let v = loss.into_data().as_slice::<f32>().unwrap()[0];
        assert!(v < 1e-3, "loss was {v}");
    }

    #[test]
    fn wrong_label_costs_more() {
        let dev = Default::default();
        let logits = Tensor::<B, 1>::from_floats([5.0, 0.0, 0.0], &dev).reshape([1, 3]);
        let good = cross_entropy_from_logits(logits.clone(), &[0], 3)
            .into_data()
            .as_slice::<f32>()
            .unwrap()[0];
        let bad = cross_entropy_from_logits(logits, &[2], 3)
            .into_data()
            .as_slice::<f32>()
            .unwrap()[0];
        assert!(bad > good);
    }
}
