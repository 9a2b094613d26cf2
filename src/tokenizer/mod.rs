// src/tokenizer/mod.rs

pub mod tokenizer;
pub mod vocab;

pub use tokenizer::tokenize;
pub use vocab::{encode_fixed, one_hot_batch, to_idx, PAD, VOCAB_SIZE};
