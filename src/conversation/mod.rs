pub mod client;
pub mod speech;
pub mod store;
pub mod voice;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::lesson::{Answer, Register};

pub use client::{AnswerSource, HttpAnswerClient};
pub use speech::{NoSpeech, SpeechEvent, SpeechOptions, SpeechSynthesizer, Utterance, Voice};
pub use store::ConversationStore;
pub use voice::{NameMatchSelector, VoiceSelector};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Teacher {
    #[default]
    Nanami,
    Naoki,
}

impl Teacher {
    pub const ALL: [Teacher; 2] = [Teacher::Nanami, Teacher::Naoki];
}

impl fmt::Display for Teacher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Teacher::Nanami => f.write_str("Nanami"),
            Teacher::Naoki => f.write_str("Naoki"),
        }
    }
}

/// User-facing display and request settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub teacher: Teacher,
    pub classroom: String,
    pub furigana: bool,
    pub english: bool,
    pub speech: Register,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            teacher: Teacher::default(),
            classroom: "default".to_string(),
            furigana: true,
            english: true,
            speech: Register::default(),
        }
    }
}

/// One conversation turn. A failed request keeps `answer` empty and
/// records the failure in `error`.
#[derive(Debug, Clone)]
pub struct Message {
    pub id: u64,
    pub question: String,
    pub answer: Option<Answer>,
    pub error: Option<String>,
    pub speech: Register,
    pub speech_handle: Option<Utterance>,
}

/// What observers see after every state change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub loading: bool,
    pub current_message: Option<u64>,
    pub message_count: usize,
    pub settings: Settings,
}
