use lazy_static::lazy_static;

use super::{Chunk, Register, SentenceBreakdown, Word};

/// Question used when the caller does not supply one.
pub const DEFAULT_QUESTION: &str = "Have you ever been to Japan?";

/// A fixed translation embedded in the prompt to anchor the output shape.
#[derive(Debug, Clone)]
pub struct WorkedExample {
    pub japanese: Vec<Word>,
    pub grammar_breakdown: Vec<SentenceBreakdown>,
}

impl WorkedExample {
    /// `japanese` as compact JSON, the form embedded in prompts.
    pub fn japanese_json(&self) -> String {
        serde_json::to_string(&self.japanese).unwrap_or_default()
    }

    /// `grammar_breakdown` as compact JSON, the form embedded in prompts.
    pub fn grammar_breakdown_json(&self) -> String {
        serde_json::to_string(&self.grammar_breakdown).unwrap_or_default()
    }
}

lazy_static! {
    static ref FORMAL_EXAMPLE: WorkedExample = build_example("います", "か");
    static ref CASUAL_EXAMPLE: WorkedExample = build_example("いる", "の");
}

pub fn worked_example(register: Register) -> &'static WorkedExample {
    match register {
        Register::Formal => &FORMAL_EXAMPLE,
        Register::Casual => &CASUAL_EXAMPLE,
    }
}

// "Do you live in Japan?" in both registers; only the auxiliary and the
// sentence-final particle differ.
fn build_example(auxiliary: &str, particle: &str) -> WorkedExample {
    let sentence = vec![
        Word::with_reading("日本", "にほん"),
        Word::new("に"),
        Word::with_reading("住んで", "すんで"),
        Word::new(auxiliary),
        Word::new(particle),
        Word::new("?"),
    ];

    let chunk = |words: Vec<Word>, meaning: &str, grammar: String| Chunk {
        japanese: words,
        meaning: meaning.to_string(),
        grammar,
    };

    let chunks = vec![
        chunk(vec![Word::with_reading("日本", "にほん")], "Japan", "Noun".into()),
        chunk(vec![Word::new("に")], "in", "Particle".into()),
        chunk(
            vec![Word::with_reading("住んで", "すんで"), Word::new(auxiliary)],
            "live",
            format!("Verb + て form + {}", auxiliary),
        ),
        chunk(vec![Word::new(particle)], "question", "Particle".into()),
        chunk(vec![Word::new("?")], "question", "Punctuation".into()),
    ];

    WorkedExample {
        japanese: sentence.clone(),
        grammar_breakdown: vec![SentenceBreakdown {
            english: "Do you live in Japan?".to_string(),
            japanese: sentence,
            chunks,
        }],
    }
}
