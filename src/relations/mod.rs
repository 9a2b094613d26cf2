// src/relations/mod.rs

use std::collections::HashMap;

/// Relation labels the parser is trained to predict. `NoRel` is the
/// arbitrary "-" tag used for tokens that carry no relation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RelLabel {
    NoRel,
    Root,
    Target,
    State,
    Question,
    Time,
    Reason,
    Attribute,
    Quality,
}

pub const NUM_LABELS: usize = 9;

impl RelLabel {
    pub const ALL: [RelLabel; NUM_LABELS] = [
        RelLabel::NoRel,
        RelLabel::Root,
        RelLabel::Target,
        RelLabel::State,
        RelLabel::Question,
        RelLabel::Time,
        RelLabel::Reason,
        RelLabel::Attribute,
        RelLabel::Quality,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RelLabel::NoRel => "-",
            RelLabel::Root => "ROOT",
            RelLabel::Target => "TARGET",
            RelLabel::State => "STATE",
            RelLabel::Question => "QUESTION",
            RelLabel::Time => "TIME",
            RelLabel::Reason => "REASON",
            RelLabel::Attribute => "ATTRIBUTE",
            RelLabel::Quality => "QUALITY",
        }
    }

    pub fn parse(s: &str) -> Option<RelLabel> {
        RelLabel::ALL.iter().copied().find(|l| l.as_str() == s)
    }

    pub fn index(self) -> usize {
        RelLabel::ALL.iter().position(|&l| l == self).unwrap_or(0)
    }

    pub fn from_index(i: usize) -> RelLabel {
        RelLabel::ALL.get(i).copied().unwrap_or(RelLabel::NoRel)
    }
}

impl std::fmt::Display for RelLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One parsed word: its text, its relation label and the index of its head
/// token within the same utterance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedToken {
    pub text: String,
    pub label: RelLabel,
    pub head: usize,
}

/// label -> token index for one utterance. When a label occurs on more than
/// one token the last occurrence wins (dict-comprehension semantics the
/// responder rules were written against).
pub fn label_map(tokens: &[ParsedToken]) -> HashMap<RelLabel, usize> {
    let mut map = HashMap::new();
    for (i, t) in tokens.iter().enumerate() {
        map.insert(t.label, i);
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(text: &str, label: RelLabel) -> ParsedToken {
        ParsedToken {
            text: text.into(),
            label,
            head: 0,
        }
    }

    #[test]
    fn label_roundtrip() {
        for l in RelLabel::ALL {
            assert_eq!(RelLabel::parse(l.as_str()), Some(l));
            assert_eq!(RelLabel::from_index(l.index()), l);
        }
    }

    #[test]
    fn last_occurrence_wins() {
        // "how are you feeling" labels STATE twice
        let toks = [
            tok("how", RelLabel::Root),
            tok("are", RelLabel::State),
            tok("you", RelLabel::Target),
            tok("feeling", RelLabel::State),
        ];
        let map = label_map(&toks);
        assert_eq!(map[&RelLabel::State], 3);
        assert_eq!(map[&RelLabel::Root], 0);
    }
}
