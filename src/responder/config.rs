// src/responder/config.rs

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;

use super::rules::ReplyKind;

/// Word sets the rules match on and the canned replies they pick from.
/// Immutable once constructed; an optional TOML file can override the
/// built-ins wholesale.
#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct ResponderConfig {
    pub greetings: Vec<String>,
    pub questions: Vec<String>,
    pub targets_self: Vec<String>,
    pub targets_user: Vec<String>,
    pub good_state: Vec<String>,
    pub bad_state: Vec<String>,
    pub farewells: Vec<String>,

    pub greeting_replies: Vec<String>,
    pub welcome_replies: Vec<String>,
    pub self_state_replies: Vec<String>,
    pub happy_replies: Vec<String>,
    pub cheerup_replies: Vec<String>,
    pub farewell_replies: Vec<String>,
    pub question_fallback: String,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for ResponderConfig {
    fn default() -> Self {
        Self {
            greetings: strings(&["hi", "hello", "hey", "morning", "afternoon", "yo"]),
            questions: strings(&["how"]),
            targets_self: strings(&["bot", "you", "chatbot"]),
            // the tokenizer splits "I'm" into "I" + "'m", so both spellings
            // of the contraction are listed
            targets_user: strings(&["I'm", "I", "i", "'m", "me", "my", "myself"]),
            good_state: strings(&[
                "good", "amazing", "happy", "excited", "exciting", "love", "great",
            ]),
            bad_state: strings(&[
                "angry", "stress", "stressed", "stressful", "sad", "down", "not good",
                "bad", "wrong", "anxious", "hard",
            ]),
            farewells: strings(&[
                "goodbye", "bye", "byebye", "bye-bye", "farewell", "sayonara", "goodnight",
            ]),

            greeting_replies: strings(&[
                "Hi!",
                "Hello friendly human.",
                "Hi there!",
                "Hey!",
            ]),
            welcome_replies: strings(&[
                "Hi there! I'm a bot and you can say hi to me.",
                "Hello! I'm a greeting bot.",
                "Welcome, feel free to say hi to me anytime.",
                "Hey human! I'm a bot, but you can say hi to me and I'll do my best to try and answer.",
                "You can tell me about your day if you wish.",
                "How is your day going?",
                "Any news from the real world?",
                "Is there anything you want to tell me?",
            ]),
            self_state_replies: strings(&[
                "I'm doing fine thank you.",
                "Thanks for asking, I'm doing alright.",
                "Right now I'm feeling great! Just a little sleepy.",
            ]),
            happy_replies: strings(&[
                "That's good to hear!",
                "I'm glad.",
                "Oh that's amazing! I'm so happy for you!",
                "That sounds great!",
                "That's cool.",
            ]),
            cheerup_replies: strings(&[
                "Everything is going to be fine!",
                "Don't worry, you can do this!",
                "It may be hard, but I know you can do it!",
                "Keep it up! I believe in you!",
                "Don't be too harsh with yourself",
                "Take a step back and breath, everything will work out!",
            ]),
            farewell_replies: strings(&[
                "Goodbye human friend, have a nice day!",
                "Bye, let's talk again soon!",
                "See you later!",
                "Farewell human!",
                "Are you leaving so soon? Goodbye!",
                "It was nice talking to you! Bye!",
            ]),
            question_fallback: "I'm sorry, I'm not sure how to answer that.".to_string(),
        }
    }
}

impl ResponderConfig {
    /// Read a TOML override; any read or parse failure falls back to the
    /// built-in lists.
    pub fn load_or_default(path: &str) -> Self {
        if let Ok(txt) = std::fs::read_to_string(path) {
            if let Ok(cfg) = toml::from_str::<ResponderConfig>(&txt) {
                return cfg;
            }
        }
        Self::default()
    }

    /// Candidate replies for a decision, None when the decision is silent.
    pub fn replies_for(&self, kind: ReplyKind) -> Option<&[String]> {
        match kind {
            ReplyKind::Greeting => Some(&self.greeting_replies),
            ReplyKind::SelfState => Some(&self.self_state_replies),
            ReplyKind::QuestionFallback => Some(std::slice::from_ref(&self.question_fallback)),
            ReplyKind::Happy => Some(&self.happy_replies),
            ReplyKind::CheerUp => Some(&self.cheerup_replies),
            ReplyKind::Farewell => Some(&self.farewell_replies),
            ReplyKind::Welcome => Some(&self.welcome_replies),
            ReplyKind::Silent => None,
        }
    }

    /// Uniform random pick from the candidate list for `kind`.
    pub fn pick<R: Rng>(&self, kind: ReplyKind, rng: &mut R) -> Option<String> {
        self.replies_for(kind)
            .and_then(|replies| replies.choose(rng))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_override_replaces_named_lists_and_defaults_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wordlists.toml");
        std::fs::write(&path, "greetings = [\"howdy\"]\n").unwrap();

        let cfg = ResponderConfig::load_or_default(path.to_str().unwrap());
        assert_eq!(cfg.greetings, vec!["howdy".to_string()]);
        // fields the file doesn't mention keep the built-ins
        let builtin = ResponderConfig::default();
        assert_eq!(cfg.questions, builtin.questions);
        assert_eq!(cfg.farewell_replies, builtin.farewell_replies);
        assert_eq!(cfg.question_fallback, builtin.question_fallback);
    }

    #[test]
    fn missing_file_falls_back_to_builtins() {
        let cfg = ResponderConfig::load_or_default("no/such/wordlists.toml");
        assert_eq!(cfg.greetings, ResponderConfig::default().greetings);
    }

    #[test]
    fn unparsable_file_falls_back_to_builtins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "greetings = not-a-list").unwrap();

        let cfg = ResponderConfig::load_or_default(path.to_str().unwrap());
        assert_eq!(cfg.farewells, ResponderConfig::default().farewells);
    }
}
