// src/tokenizer/tokenizer.rs

/// Word splitter matched to the annotated corpus: whitespace-separated,
/// contractions split at the apostrophe ("I'm" -> "I", "'m"), trailing
/// sentence punctuation peeled into its own token ("doing?" -> "doing", "?").
/// Hyphenated words stay whole ("bye-bye").
pub fn tokenize(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    for piece in text.split_whitespace() {
        split_piece(piece, &mut out);
    }
    out
}

fn split_piece(piece: &str, out: &mut Vec<String>) {
    // peel trailing punctuation first, innermost last
    let mut tail: Vec<String> = Vec::new();
    let mut core = piece;
    while let Some(c) = core.chars().last() {
        if matches!(c, '.' | ',' | '!' | '?' | ';' | ':') {
            core = &core[..core.len() - c.len_utf8()];
            tail.push(c.to_string());
        } else {
            break;
        }
    }

    if !core.is_empty() {
        // split at an internal apostrophe; the apostrophe stays with the suffix
        let cut = core
            .char_indices()
            .skip(1)
            .find(|&(_, c)| c == '\'')
            .map(|(i, _)| i);
        match cut {
            Some(i) => {
                out.push(core[..i].to_string());
                out.push(core[i..].to_string());
            }
            None => out.push(core.to_string()),
        }
    }

    for t in tail.into_iter().rev() {
        out.push(t);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(s: &str) -> Vec<String> {
        tokenize(s)
    }

    #[test]
    fn contraction_splits_at_apostrophe() {
        assert_eq!(toks("I'm feeling sad"), vec!["I", "'m", "feeling", "sad"]);
    }

    #[test]
    fn trailing_question_mark_is_its_own_token() {
        assert_eq!(
            toks("how are you doing?"),
            vec!["how", "are", "you", "doing", "?"]
        );
    }

    #[test]
    fn hyphenated_word_stays_whole() {
        assert_eq!(toks("bye-bye"), vec!["bye-bye"]);
    }

    #[test]
    fn leading_apostrophe_does_not_split() {
        assert_eq!(toks("'m fine"), vec!["'m", "fine"]);
    }
}
