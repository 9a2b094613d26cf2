// src/training/dataset.rs

use burn::tensor::{backend::Backend, Tensor};

use crate::tokenizer::tokenize;
use crate::tokenizer::vocab::{encode_fixed, one_hot_batch, VOCAB_SIZE};
use crate::training::config::TrainCfg;
use crate::training::corpus::TrainExample;

/// One training sample per token: the token's characters, the utterance
/// context characters, two positional extras, and the two targets.
#[derive(Clone, Debug)]
pub struct TokenSample {
    pub tok: Vec<usize>,     // [tok_len]
    pub ctx: Vec<usize>,     // [ctx_len]
    pub extras: [f32; 2],    // [pos_frac, len_norm]
    pub label: usize,        // relation class
    pub head_off: usize,     // offset class, 0..2*max_offset
}

/// Featurize one token of a tokenized utterance. Shared verbatim between
/// training and inference so the two sides can never drift apart.
pub fn encode_token(
    words: &[String],
    idx: usize,
    tok_len: usize,
    ctx_len: usize,
) -> (Vec<usize>, Vec<usize>, [f32; 2]) {
    let n = words.len();
    let ctx = words.join(" ");
    let pos_frac = idx as f32 / (n.saturating_sub(1).max(1)) as f32;
    let len_norm = (n.min(16)) as f32 / 16.0;
    (
        encode_fixed(&words[idx], tok_len),
        encode_fixed(&ctx, ctx_len),
        [pos_frac, len_norm],
    )
}

pub struct ParserDataset {
    samples: Vec<TokenSample>,
    tok_len: usize,
    ctx_len: usize,
}

impl ParserDataset {
    /// Flatten utterances into token samples. Misaligned examples are
    /// dropped with a warning rather than poisoning the run.
    pub fn from_corpus(corpus: &[TrainExample], cfg: &TrainCfg) -> Self {
        let mut samples = Vec::new();
        let mut dropped = 0usize;
        for e in corpus {
            let words = tokenize(&e.text);
            if words.is_empty() || words.len() != e.heads.len() || words.len() != e.deps.len() {
                dropped += 1;
                continue;
            }
            for i in 0..words.len() {
                let (tok, ctx, extras) = encode_token(&words, i, cfg.tok_len, cfg.ctx_len);
                let off = e.heads[i] as i64 - i as i64;
                let k = cfg.max_offset as i64;
                samples.push(TokenSample {
                    tok,
                    ctx,
                    extras,
                    label: e.deps[i].index(),
                    head_off: (off.clamp(-k, k) + k) as usize,
                });
            }
        }
        if dropped > 0 {
            eprintln!("[data] dropped {dropped} misaligned utterances");
        }
        Self {
            samples,
            tok_len: cfg.tok_len,
            ctx_len: cfg.ctx_len,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn shuffled_indices(&self, rng: &mut fastrand::Rng) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.samples.len()).collect();
        rng.shuffle(&mut order);
        order
    }

    /// Assemble a minibatch:
    /// tok one-hot [B,T1,V], ctx one-hot [B,T2,V], extras [B,2],
    /// label classes, head-offset classes.
    pub fn batch<B: Backend>(
        &self,
        idx: &[usize],
        dev: &B::Device,
    ) -> (Tensor<B, 3>, Tensor<B, 3>, Tensor<B, 2>, Vec<usize>, Vec<usize>) {
        debug_assert!(!idx.is_empty());
        let mut tok_rows = Vec::with_capacity(idx.len());
        let mut ctx_rows = Vec::with_capacity(idx.len());
        let mut extras = Vec::with_capacity(idx.len() * 2);
        let mut labels = Vec::with_capacity(idx.len());
        let mut offsets = Vec::with_capacity(idx.len());
        for &i in idx {
            let s = &self.samples[i];
            tok_rows.push(s.tok.clone());
            ctx_rows.push(s.ctx.clone());
            extras.extend_from_slice(&s.extras);
            labels.push(s.label);
            offsets.push(s.head_off);
        }
        let tok_oh = one_hot_batch::<B>(&tok_rows, VOCAB_SIZE, dev);
        let ctx_oh = one_hot_batch::<B>(&ctx_rows, VOCAB_SIZE, dev);
        let ex = Tensor::<B, 1>::from_floats(extras.as_slice(), dev).reshape([idx.len(), 2]);
        debug_assert_eq!(tok_rows[0].len(), self.tok_len);
        debug_assert_eq!(ctx_rows[0].len(), self.ctx_len);
        (tok_oh, ctx_oh, ex, labels, offsets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::training::corpus::builtin_corpus;

    #[test]
    fn one_sample_per_token() {
        let corpus = builtin_corpus();
        let cfg = TrainCfg::default();
        let ds = ParserDataset::from_corpus(&corpus, &cfg);
        let expected: usize = corpus.iter().map(|e| e.heads.len()).sum();
        assert_eq!(ds.len(), expected);
    }

    #[test]
    fn offsets_stay_in_window() {
        let cfg = TrainCfg::default();
        let ds = ParserDataset::from_corpus(&builtin_corpus(), &cfg);
        let num = cfg.num_offsets();
        assert!(ds.samples.iter().all(|s| s.head_off < num));
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let cfg = TrainCfg::default();
        let ds = ParserDataset::from_corpus(&builtin_corpus(), &cfg);
        let mut rng = fastrand::Rng::with_seed(7);
        let mut order = ds.shuffled_indices(&mut rng);
        order.sort_unstable();
        assert_eq!(order, (0..ds.len()).collect::<Vec<_>>());
    }
}
