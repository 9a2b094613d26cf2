// src/training/mod.rs

pub mod config;
pub mod corpus;
pub mod dataset;
pub mod loss;
pub mod model;
pub mod trainer;

pub use config::TrainCfg;
pub use corpus::{builtin_corpus, load_jsonl, TrainExample};
pub use dataset::ParserDataset;
pub use model::ParserModel;
pub use trainer::{load_model, save_model, train, ModelMeta};
