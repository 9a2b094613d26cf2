use relchat::tokenizer::tokenize;
use relchat::training::builtin_corpus;

#[test]
fn corpus_annotations_line_up_with_tokenizer() {
    for e in builtin_corpus() {
        let words = tokenize(&e.text);
        assert_eq!(
            words.len(),
            e.heads.len(),
            "token/head mismatch for {:?}: {:?}",
            e.text,
            words
        );
        assert_eq!(words.len(), e.deps.len(), "token/dep mismatch for {:?}", e.text);
    }
}

#[test]
fn contractions_and_punctuation() {
    assert_eq!(
        tokenize("I'm very stressed because of school"),
        vec!["I", "'m", "very", "stressed", "because", "of", "school"]
    );
    assert_eq!(tokenize("how are you doing?"), vec!["how", "are", "you", "doing", "?"]);
    assert_eq!(tokenize("Bye talk to you later"), vec!["Bye", "talk", "to", "you", "later"]);
}

#[test]
fn farewell_variants_stay_single_tokens() {
    for w in ["bye-bye", "byebye", "goodnight", "sayonara"] {
        assert_eq!(tokenize(w).len(), 1, "{w} split unexpectedly");
    }
}

#[test]
fn whitespace_only_yields_no_tokens() {
    assert!(tokenize("   \t ").is_empty());
}
