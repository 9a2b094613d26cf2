// src/training/trainer.rs

use std::path::Path;

use anyhow::{ensure, Result};
use burn::{
    module::Module,
    optim::{AdamWConfig, GradientsParams, Optimizer},
    record::{CompactRecorder, Recorder},
    tensor::backend::{AutodiffBackend, Backend},
};
use serde::{Deserialize, Serialize};

use crate::relations::NUM_LABELS;
use crate::training::config::TrainCfg;
use crate::training::dataset::ParserDataset;
use crate::training::loss::total_loss;
use crate::training::model::ParserModel;

/// Geometry written next to the weights so inference can rebuild an
/// identical model without the training config.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ModelMeta {
    pub vocab_size: usize,
    pub tok_len: usize,
    pub ctx_len: usize,
    pub max_offset: usize,
    pub hidden: usize,
    pub labels: Vec<String>,
}

impl ModelMeta {
    pub fn num_offsets(&self) -> usize {
        2 * self.max_offset + 1
    }
}

/// Fine-tune the parser over shuffled minibatches whose size compounds from
/// `batch_min` to `batch_max`. `init` resumes from an existing model instead
/// of a fresh one.
pub fn train<B: AutodiffBackend>(
    ds: &ParserDataset,
    device: &B::Device,
    cfg: &TrainCfg,
    init: Option<ParserModel<B>>,
) -> Result<ParserModel<B>> {
    ensure!(!ds.is_empty(), "no training samples");

    let mut model = init.unwrap_or_else(|| {
        ParserModel::<B>::new(
            crate::tokenizer::vocab::VOCAB_SIZE,
            cfg.hidden,
            NUM_LABELS,
            cfg.num_offsets(),
            device,
        )
    });

    let mut opt = AdamWConfig::new()
        .with_weight_decay(cfg.weight_decay)
        .init::<B, ParserModel<B>>();

    <B as Backend>::seed(cfg.seed);
    let mut rng = fastrand::Rng::with_seed(cfg.seed);
    let mut batch_size = cfg.batch_min;

    for epoch in 1..=cfg.n_iter {
        let order = ds.shuffled_indices(&mut rng);
        let mut pos = 0usize;
        let mut loss_sum = 0.0f32;
        let mut loss_cnt = 0usize;

        while pos < order.len() {
            let take = (batch_size.round() as usize).clamp(1, order.len() - pos);
            let idx = &order[pos..pos + take];
            pos += take;
            batch_size = (batch_size * cfg.batch_rate).min(cfg.batch_max);

            let (tok_oh, ctx_oh, extras, labels, offsets) = ds.batch::<B>(idx, device);
            let (label_logits, offset_logits) = model.forward(tok_oh, ctx_oh, extras);

            let loss = total_loss(
                label_logits,
                &labels,
                NUM_LABELS,
                offset_logits,
                &offsets,
                cfg.num_offsets(),
                cfg.loss_weights,
            );

            let v = loss.clone().into_data().as_slice::<f32>().unwrap_or(&[0.0])[0];
            loss_sum += v;
            loss_cnt += 1;

            let grads_all = loss.backward();
            let grads = GradientsParams::from_grads(grads_all, &model);
            model = opt.step(cfg.lr, model, grads);
        }

        let avg = loss_sum / loss_cnt.max(1) as f32;
        eprintln!("[epoch {epoch}] loss={avg:.4}");
    }

    Ok(model)
}

/// Write `<dir>/parser.bin` + `<dir>/meta.json`.
pub fn save_model<B: Backend>(
    model: &ParserModel<B>,
    dir: &Path,
    meta: &ModelMeta,
) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    let bin = dir.join("parser.bin");
    CompactRecorder::new().record(model.clone().into_record(), bin.clone())?;
    std::fs::write(
        dir.join("meta.json"),
        serde_json::to_string_pretty(meta)?,
    )?;
    eprintln!("[ckpt] saved {}", bin.display());
    Ok(())
}

/// Load an artifact directory back into a model on `device`.
pub fn load_model<B: Backend>(dir: &Path, device: &B::Device) -> Result<(ParserModel<B>, ModelMeta)> {
    let meta: ModelMeta = serde_json::from_str(&std::fs::read_to_string(dir.join("meta.json"))?)?;
    let model = ParserModel::<B>::new(
        meta.vocab_size,
        meta.hidden,
        meta.labels.len(),
        meta.num_offsets(),
        device,
    );
    let record = CompactRecorder::new().load(dir.join("parser.bin"), device)?;
    Ok((model.load_record(record), meta))
}
