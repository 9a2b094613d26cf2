// src/training/config.rs

use crate::relations::RelLabel;
use crate::tokenizer::vocab::VOCAB_SIZE;
use crate::training::loss::{default_weights, LossWeights};
use crate::training::trainer::ModelMeta;

#[derive(Clone, Debug)]
pub struct TrainCfg {
    pub n_iter: usize, // epochs over the corpus
    pub seed: u64,
    pub lr: f64,
    pub weight_decay: f32,
    // minibatch size compounds from min to max over the run
    pub batch_min: f32,
    pub batch_max: f32,
    pub batch_rate: f32,
    pub tok_len: usize,     // chars per token
    pub ctx_len: usize,     // chars of utterance context
    pub max_offset: usize,  // head offsets clamped to +/- this
    pub hidden: usize,
    pub loss_weights: LossWeights,
}

impl Default for TrainCfg {
    fn default() -> Self {
        Self {
            n_iter: 15,
            seed: 42,
            lr: 1e-3,
            weight_decay: 0.01,
            batch_min: 4.0,
            batch_max: 32.0,
            batch_rate: 1.001,
            tok_len: 12,
            ctx_len: 48,
            max_offset: 8,
            hidden: 128,
            loss_weights: default_weights(),
        }
    }
}

impl TrainCfg {
    pub fn num_offsets(&self) -> usize {
        2 * self.max_offset + 1
    }

    /// The geometry an artifact directory records so inference can rebuild
    /// an identical model.
    pub fn meta(&self) -> ModelMeta {
        ModelMeta {
            vocab_size: VOCAB_SIZE,
            tok_len: self.tok_len,
            ctx_len: self.ctx_len,
            max_offset: self.max_offset,
            hidden: self.hidden,
            labels: RelLabel::ALL.iter().map(|l| l.as_str().to_string()).collect(),
        }
    }
}
