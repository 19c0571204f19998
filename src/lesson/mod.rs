pub mod examples;
pub mod extract;
pub mod prompt;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

pub use examples::{worked_example, WorkedExample, DEFAULT_QUESTION};
pub use extract::{extract_json, parse_answer};
pub use prompt::build_prompt;

/// Grammatical style requested for the Japanese output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Register {
    #[default]
    Formal,
    Casual,
}

impl Register {
    pub fn as_str(&self) -> &'static str {
        match self {
            Register::Formal => "formal",
            Register::Casual => "casual",
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Register {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "formal" => Ok(Register::Formal),
            "casual" => Ok(Register::Casual),
            other => Err(format!("unknown speech register '{}'", other)),
        }
    }
}

/// A token of Japanese text with an optional phonetic reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub word: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "non_empty_reading"
    )]
    pub reading: Option<String>,
}

impl Word {
    pub fn new(word: &str) -> Self {
        Self {
            word: word.to_string(),
            reading: None,
        }
    }

    pub fn with_reading(word: &str, reading: &str) -> Self {
        Self {
            word: word.to_string(),
            reading: Some(reading.to_string()),
        }
    }
}

// The schema template shows `"reading": ""`, so models often echo it back.
fn non_empty_reading<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let reading = Option::<String>::deserialize(deserializer)?;
    Ok(reading.filter(|r| !r.trim().is_empty()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub japanese: Vec<Word>,
    pub meaning: String,
    pub grammar: String,
}

/// One sentence's decomposition into glossed chunks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceBreakdown {
    pub english: String,
    pub japanese: Vec<Word>,
    pub chunks: Vec<Chunk>,
}

impl SentenceBreakdown {
    /// True when the chunks, taken in order, reproduce `japanese` word for
    /// word with nothing missing and nothing repeated.
    pub fn chunks_cover_sentence(&self) -> bool {
        let mut chunked = self.chunks.iter().flat_map(|c| c.japanese.iter());
        let mut sentence = self.japanese.iter();

        loop {
            match (sentence.next(), chunked.next()) {
                (None, None) => return true,
                (Some(a), Some(b)) if a.word == b.word => continue,
                _ => return false,
            }
        }
    }
}

/// The structured response for one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub english: String,
    pub japanese: Vec<Word>,
    pub grammar_breakdown: Vec<SentenceBreakdown>,
}

impl Answer {
    /// Text handed to speech synthesis: the word tokens joined by single spaces.
    pub fn spoken_text(&self) -> String {
        self.japanese
            .iter()
            .map(|w| w.word.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
