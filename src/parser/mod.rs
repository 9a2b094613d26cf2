// src/parser/mod.rs

use std::path::Path;

use anyhow::Result;
use burn::tensor::{backend::Backend, Tensor};
use burn_ndarray::NdArray;

use crate::relations::{ParsedToken, RelLabel};
use crate::tokenizer::tokenize;
use crate::tokenizer::vocab::one_hot_batch;
use crate::training::dataset::encode_token;
use crate::training::model::ParserModel;
use crate::training::trainer::{load_model, ModelMeta};

type B = NdArray<f32>;

/// Inference-side parser: a trained model plus the geometry it was saved
/// with. Read-only after load.
pub struct Parser {
    model: ParserModel<B>,
    meta: ModelMeta,
}

impl Parser {
    pub fn load(dir: &Path) -> Result<Self> {
        let device = <B as Backend>::Device::default();
        let (model, meta) = load_model::<B>(dir, &device)?;
        Ok(Self { model, meta })
    }

    /// Wrap an in-memory model, e.g. one that was just trained.
    pub fn from_parts(model: ParserModel<B>, meta: ModelMeta) -> Self {
        Self { model, meta }
    }

    /// Tokenize and label one utterance. Heads are decoded from the offset
    /// head and clamped into the utterance.
    pub fn parse(&self, text: &str) -> Result<Vec<ParsedToken>> {
        let words = tokenize(text);
        if words.is_empty() {
            return Ok(Vec::new());
        }
        let device = <B as Backend>::Device::default();
        let n = words.len();

        let mut tok_rows = Vec::with_capacity(n);
        let mut ctx_rows = Vec::with_capacity(n);
        let mut extras = Vec::with_capacity(n * 2);
        for i in 0..n {
            let (tok, ctx, ex) = encode_token(&words, i, self.meta.tok_len, self.meta.ctx_len);
            tok_rows.push(tok);
            ctx_rows.push(ctx);
            extras.extend_from_slice(&ex);
        }

        let tok_oh = one_hot_batch::<B>(&tok_rows, self.meta.vocab_size, &device);
        let ctx_oh = one_hot_batch::<B>(&ctx_rows, self.meta.vocab_size, &device);
        let ex = Tensor::<B, 1>::from_floats(extras.as_slice(), &device).reshape([n, 2]);

        let (label_logits, offset_logits) = self.model.forward(tok_oh, ctx_oh, ex);
        let labels = argmax_vec(label_logits);
        let offsets = argmax_vec(offset_logits);

        let k = self.meta.max_offset as i64;
        let tokens = words
            .into_iter()
            .enumerate()
            .map(|(i, text)| {
                let off = offsets[i] as i64 - k;
                let head = (i as i64 + off).clamp(0, n as i64 - 1) as usize;
                ParsedToken {
                    text,
                    label: self.label_of(labels[i]),
                    head,
                }
            })
            .collect();
        Ok(tokens)
    }

    fn label_of(&self, class: usize) -> RelLabel {
        self.meta
            .labels
            .get(class)
            .and_then(|s| RelLabel::parse(s))
            .unwrap_or(RelLabel::NoRel)
    }
}

fn argmax_vec(logits: Tensor<B, 2>) -> Vec<usize> {
    logits
        .argmax(1)
        .into_data()
        .iter::<i64>()
        .map(|x| x as usize)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relations::NUM_LABELS;
    use crate::tokenizer::vocab::VOCAB_SIZE;
    use crate::training::TrainCfg;

    fn untrained() -> Parser {
        let cfg = TrainCfg::default();
        let device = Default::default();
        let model = ParserModel::<B>::new(
            VOCAB_SIZE,
            cfg.hidden,
            NUM_LABELS,
            cfg.num_offsets(),
            &device,
        );
        Parser::from_parts(model, cfg.meta())
    }

    #[test]
    fn parse_keeps_token_texts_and_valid_heads() {
        let p = untrained();
        let toks = p.parse("how are you doing?").unwrap();
        let texts: Vec<&str> = toks.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["how", "are", "you", "doing", "?"]);
        assert!(toks.iter().all(|t| t.head < toks.len()));
    }

    #[test]
    fn empty_text_parses_to_nothing() {
        let p = untrained();
        assert!(p.parse("   ").unwrap().is_empty());
    }
}
