use crate::error::StoreError;

/// A synthesis voice as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    pub name: String,
    pub lang: String,
}

impl Voice {
    pub fn new(name: &str, lang: &str) -> Self {
        Self {
            name: name.to_string(),
            lang: lang.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpeechOptions {
    pub language: String,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl Default for SpeechOptions {
    fn default() -> Self {
        Self {
            language: "ja-JP".to_string(),
            // slightly slower for learners
            rate: 0.8,
            pitch: 1.0,
            volume: 1.0,
        }
    }
}

/// Speech handle: everything the host needs to (re)play one message.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub id: u64,
    pub text: String,
    pub options: SpeechOptions,
    pub voice: Option<Voice>,
}

/// Notifications from the host synthesis facility, keyed by the playback
/// id passed to `SpeechSynthesizer::speak`.
#[derive(Debug, Clone, PartialEq)]
pub enum SpeechEvent {
    Finished(u64),
    Errored { playback: u64, reason: String },
    /// The host's voice list became available or changed.
    VoicesChanged,
}

/// Host text-to-speech capability. Only one utterance plays at a time;
/// completion is reported back as `SpeechEvent`s on the channel the host
/// shares with the store.
pub trait SpeechSynthesizer: Send + Sync {
    fn is_supported(&self) -> bool {
        true
    }

    /// May be empty until the host sends `SpeechEvent::VoicesChanged`.
    fn list_voices(&self) -> Vec<Voice>;

    fn cancel_all(&self);

    /// Start `utterance`. Every call gets a fresh `playback` id, even when
    /// the same utterance is replayed; events must echo it back.
    fn speak(&self, playback: u64, utterance: &Utterance) -> Result<(), StoreError>;
}

/// Stand-in for hosts with no synthesis support.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSpeech;

impl SpeechSynthesizer for NoSpeech {
    fn is_supported(&self) -> bool {
        false
    }

    fn list_voices(&self) -> Vec<Voice> {
        Vec::new()
    }

    fn cancel_all(&self) {}

    fn speak(&self, _playback: u64, _utterance: &Utterance) -> Result<(), StoreError> {
        Err(StoreError::Speech("speech synthesis is not supported".into()))
    }
}
