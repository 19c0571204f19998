use std::sync::Arc;

use tokio::sync::{mpsc, watch};

use super::client::AnswerSource;
use super::speech::{SpeechEvent, SpeechOptions, SpeechSynthesizer, Utterance};
use super::voice::{NameMatchSelector, VoiceSelector};
use super::{Message, Settings, Snapshot, Teacher};
use crate::error::StoreError;
use crate::lesson::Register;

/// Owns the conversation history and sequences ask, answer and playback.
///
/// All commands take `&mut self`, so submissions are serialised by the
/// owner. Playback completion arrives as `SpeechEvent`s on the channel
/// passed to `new`, and is applied by `handle_event`, `next_event` or
/// `drain_events`.
pub struct ConversationStore {
    messages: Vec<Message>,
    current_message: Option<u64>,
    settings: Settings,
    loading: bool,
    next_message_id: u64,
    next_utterance_id: u64,
    next_playback_id: u64,
    active_playback: Option<u64>,
    // message waiting for the host's voice list
    pending_play: Option<u64>,
    answers: Arc<dyn AnswerSource>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    voice_selector: Box<dyn VoiceSelector>,
    speech_options: SpeechOptions,
    events: mpsc::UnboundedReceiver<SpeechEvent>,
    snapshot: watch::Sender<Snapshot>,
}

impl ConversationStore {
    pub fn new(
        answers: Arc<dyn AnswerSource>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        events: mpsc::UnboundedReceiver<SpeechEvent>,
    ) -> Self {
        let (snapshot, _) = watch::channel(Snapshot::default());
        Self {
            messages: Vec::new(),
            current_message: None,
            settings: Settings::default(),
            loading: false,
            next_message_id: 0,
            next_utterance_id: 0,
            next_playback_id: 0,
            active_playback: None,
            pending_play: None,
            answers,
            synthesizer,
            voice_selector: Box::new(NameMatchSelector),
            speech_options: SpeechOptions::default(),
            events,
            snapshot,
        }
    }

    pub fn with_voice_selector(mut self, selector: Box<dyn VoiceSelector>) -> Self {
        self.voice_selector = selector;
        self
    }

    pub fn with_speech_options(mut self, options: SpeechOptions) -> Self {
        self.speech_options = options;
        self
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshot.subscribe()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn message(&self, id: u64) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }

    pub fn current_message(&self) -> Option<&Message> {
        self.current_message.and_then(|id| self.message(id))
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Ask a question with the current speech register.
    ///
    /// Returns `Ok(None)` without touching any state when the question is
    /// missing or only whitespace; otherwise the question is stored trimmed. A failed request is still recorded in the history, with its
    /// error, before the error is returned.
    pub async fn submit_question(&mut self, question: Option<&str>) -> Result<Option<u64>, StoreError> {
        let question = match question.map(str::trim).filter(|q| !q.is_empty()) {
            Some(q) => q.to_string(),
            None => return Ok(None),
        };

        let id = self.next_message_id;
        self.next_message_id += 1;
        let register = self.settings.speech;

        self.loading = true;
        self.publish();

        let result = self.answers.fetch_answer(&question, register).await;

        let mut message = Message {
            id,
            question,
            answer: None,
            error: None,
            speech: register,
            speech_handle: None,
        };

        match result {
            Ok(answer) => {
                message.answer = Some(answer);
                self.current_message = Some(id);
                self.messages.push(message);
                self.loading = false;
                self.publish();

                if let Err(e) = self.play_message(id) {
                    tracing::warn!("Playback of message {} failed: {}", id, e);
                }
                Ok(Some(id))
            }
            Err(e) => {
                tracing::error!("Question {} failed: {}", id, e);
                message.error = Some(e.to_string());
                self.messages.push(message);
                self.loading = false;
                self.publish();
                Err(e)
            }
        }
    }

    /// Speak a message's Japanese text, reusing its cached speech handle
    /// when it has one. Any playback already in progress is cancelled.
    pub fn play_message(&mut self, id: u64) -> Result<(), StoreError> {
        let message = self.message(id).ok_or(StoreError::MessageNotFound(id))?;
        if message.answer.is_none() {
            return Err(StoreError::NoAnswer(id));
        }
        let cached = message.speech_handle.clone();

        self.current_message = Some(id);
        self.pending_play = None;

        if let Some(utterance) = cached {
            return self.start(utterance);
        }

        if !self.synthesizer.is_supported() {
            tracing::warn!("Speech synthesis not supported by this host");
            self.loading = false;
            self.publish();
            return Ok(());
        }

        self.loading = true;
        self.publish();

        if self.synthesizer.list_voices().is_empty() {
            tracing::debug!("No voices yet, deferring playback of message {}", id);
            self.pending_play = Some(id);
            return Ok(());
        }

        self.synthesize_and_play(id)
    }

    /// Cancel whatever is playing.
    pub fn stop_message(&mut self) {
        self.synthesizer.cancel_all();
        self.active_playback = None;
        if self.pending_play.take().is_some() {
            self.loading = false;
        }
        self.current_message = None;
        self.publish();
    }

    /// Switch teacher. Cached speech handles carry the old voice, so they
    /// are all dropped.
    pub fn set_teacher(&mut self, teacher: Teacher) {
        self.settings.teacher = teacher;
        for message in &mut self.messages {
            message.speech_handle = None;
        }
        self.publish();
    }

    pub fn set_classroom(&mut self, classroom: impl Into<String>) {
        self.settings.classroom = classroom.into();
        self.publish();
    }

    pub fn set_furigana(&mut self, furigana: bool) {
        self.settings.furigana = furigana;
        self.publish();
    }

    pub fn set_english(&mut self, english: bool) {
        self.settings.english = english;
        self.publish();
    }

    pub fn set_speech(&mut self, speech: Register) {
        self.settings.speech = speech;
        self.publish();
    }

    /// Apply one notification from the synthesis host.
    pub fn handle_event(&mut self, event: SpeechEvent) {
        match event {
            SpeechEvent::Finished(playback) => {
                if self.active_playback == Some(playback) {
                    self.active_playback = None;
                    self.current_message = None;
                    self.publish();
                }
            }
            SpeechEvent::Errored { playback, reason } => {
                if self.active_playback == Some(playback) {
                    tracing::error!("Speech synthesis error: {}", reason);
                    self.active_playback = None;
                    self.current_message = None;
                    self.loading = false;
                    self.publish();
                }
            }
            SpeechEvent::VoicesChanged => {
                if let Some(id) = self.pending_play.take() {
                    if let Err(e) = self.synthesize_and_play(id) {
                        tracing::warn!("Deferred playback of message {} failed: {}", id, e);
                    }
                }
            }
        }
    }

    /// Wait for the next host notification and apply it. Returns `None`
    /// once the host has dropped its sender.
    pub async fn next_event(&mut self) -> Option<SpeechEvent> {
        let event = self.events.recv().await?;
        self.handle_event(event.clone());
        Some(event)
    }

    /// Apply every notification already queued; returns how many there were.
    pub fn drain_events(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events.try_recv() {
            self.handle_event(event);
            applied += 1;
        }
        applied
    }

    fn synthesize_and_play(&mut self, id: u64) -> Result<(), StoreError> {
        let text = match self.message(id).and_then(|m| m.answer.as_ref()) {
            Some(answer) => answer.spoken_text(),
            None => {
                self.loading = false;
                self.publish();
                return Err(StoreError::NoAnswer(id));
            }
        };

        let voices = self.synthesizer.list_voices();
        let voice = self.voice_selector.select_voice(self.settings.teacher, &voices);
        if voice.is_none() {
            tracing::warn!("No Japanese voice for {}, using host default", self.settings.teacher);
        }

        let utterance = Utterance {
            id: self.next_utterance_id,
            text,
            options: self.speech_options.clone(),
            voice,
        };
        self.next_utterance_id += 1;

        if let Some(message) = self.messages.iter_mut().find(|m| m.id == id) {
            message.speech_handle = Some(utterance.clone());
        }

        self.start(utterance)
    }

    // Single active playback: always cancel before speaking. Each start gets
    // its own playback id so events from a cancelled replay of the same
    // handle are not mistaken for the new one.
    fn start(&mut self, utterance: Utterance) -> Result<(), StoreError> {
        let playback = self.next_playback_id;
        self.next_playback_id += 1;

        self.synthesizer.cancel_all();
        self.active_playback = Some(playback);
        self.loading = false;
        self.publish();

        if let Err(e) = self.synthesizer.speak(playback, &utterance) {
            tracing::error!("Speech synthesis error: {}", e);
            self.active_playback = None;
            self.current_message = None;
            self.loading = false;
            self.publish();
            return Err(e);
        }
        Ok(())
    }

    fn publish(&self) {
        self.snapshot.send_replace(Snapshot {
            loading: self.loading,
            current_message: self.current_message,
            message_count: self.messages.len(),
            settings: self.settings.clone(),
        });
    }
}
