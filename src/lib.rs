// src/lib.rs

pub mod parser;
pub mod relations;
pub mod responder;
pub mod tokenizer;
pub mod training;

pub use crate::relations::{label_map, ParsedToken, RelLabel};
pub use crate::responder::{RespondError, Responder, ResponderConfig};
