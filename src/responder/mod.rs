// src/responder/mod.rs

pub mod config;
pub mod rules;

use std::fmt::{Display, Formatter, Result as FmtResult};

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::parser::Parser;
use crate::relations::{label_map, RelLabel};

pub use config::ResponderConfig;
pub use rules::{decide, ReplyKind};

#[derive(Debug)]
pub enum RespondError {
    /// The parse produced a label map the rules cannot work with (missing
    /// ROOT, or STATE without a TARGET).
    UnparsableUtterance(RelLabel),
    Model(String),
}

impl std::error::Error for RespondError {}

impl Display for RespondError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            RespondError::UnparsableUtterance(label) => {
                write!(f, "unparsable utterance: no {} token", label)
            }
            RespondError::Model(e) => write!(f, "model error: {}", e),
        }
    }
}

/// One message in, at most one canned reply out. The RNG is seedable so
/// reply selection can be made deterministic.
pub struct Responder {
    parser: Parser,
    cfg: ResponderConfig,
    rng: ChaCha20Rng,
}

impl Responder {
    pub fn new(parser: Parser, cfg: ResponderConfig) -> Self {
        Self {
            parser,
            cfg,
            rng: ChaCha20Rng::from_entropy(),
        }
    }

    pub fn with_seed(parser: Parser, cfg: ResponderConfig, seed: u64) -> Self {
        Self {
            parser,
            cfg,
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Empty input and the silent sentiment case both return `Ok(None)`.
    pub fn respond(&mut self, msg: &str) -> Result<Option<String>, RespondError> {
        if msg.trim().is_empty() {
            return Ok(None);
        }
        let tokens = self
            .parser
            .parse(msg)
            .map_err(|e| RespondError::Model(e.to_string()))?;
        if tokens.is_empty() {
            return Ok(None);
        }
        let map = label_map(&tokens);
        let kind = rules::decide(&self.cfg, &tokens, &map)?;
        Ok(self.cfg.pick(kind, &mut self.rng))
    }
}
