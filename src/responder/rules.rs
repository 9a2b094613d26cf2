// src/responder/rules.rs

use std::collections::HashMap;

use crate::relations::{ParsedToken, RelLabel};

use super::config::ResponderConfig;
use super::RespondError;

/// Which canned-reply list the utterance resolved to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplyKind {
    Greeting,
    SelfState,
    QuestionFallback,
    Happy,
    CheerUp,
    Farewell,
    Welcome,
    Silent,
}

fn in_set(set: &[String], word: &str) -> bool {
    set.iter().any(|w| w.eq_ignore_ascii_case(word))
}

fn need(map: &HashMap<RelLabel, usize>, label: RelLabel) -> Result<usize, RespondError> {
    map.get(&label)
        .copied()
        .ok_or(RespondError::UnparsableUtterance(label))
}

/// Fixed-priority decision over the label map:
/// 1. ROOT in the greeting set
/// 2. ROOT is a question word ("how") -> self-state if asked about the bot,
///    otherwise the fixed fallback
/// 3. STATE present and TARGET refers to the user -> sentiment of ROOT
///    (silent when ROOT matches neither list); any other TARGET falls
///    through to the next rule
/// 4. ROOT in the farewell set
/// 5. generic welcome
///
/// A label map without ROOT, or a STATE without a TARGET, is unparsable.
pub fn decide(
    cfg: &ResponderConfig,
    tokens: &[ParsedToken],
    map: &HashMap<RelLabel, usize>,
) -> Result<ReplyKind, RespondError> {
    let root = need(map, RelLabel::Root)?;
    let root_text = tokens[root].text.to_lowercase();

    if in_set(&cfg.greetings, &root_text) {
        return Ok(ReplyKind::Greeting);
    }

    if in_set(&cfg.questions, &root_text) {
        if map.contains_key(&RelLabel::State) {
            let target = need(map, RelLabel::Target)?;
            if in_set(&cfg.targets_self, &tokens[target].text) {
                return Ok(ReplyKind::SelfState);
            }
        }
        return Ok(ReplyKind::QuestionFallback);
    }

    if map.contains_key(&RelLabel::State) {
        let target = need(map, RelLabel::Target)?;
        if in_set(&cfg.targets_user, &tokens[target].text) {
            if in_set(&cfg.good_state, &root_text) {
                return Ok(ReplyKind::Happy);
            }
            if in_set(&cfg.bad_state, &root_text) {
                return Ok(ReplyKind::CheerUp);
            }
            return Ok(ReplyKind::Silent);
        }
    }

    if in_set(&cfg.farewells, &root_text) {
        return Ok(ReplyKind::Farewell);
    }

    Ok(ReplyKind::Welcome)
}
