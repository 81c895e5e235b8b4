//! Handlers for speech requests and the voice inventory.

use tracing::debug;

use crate::app::state::App;
use crate::app::update::Effect;
use crate::content::SpeakSpec;
use crate::speech::VoiceInfo;

impl App {
    /// Cards without an explicit language speak in the active one.
    pub(super) fn handle_speak_requested(&mut self, spec: SpeakSpec, effects: &mut Vec<Effect>) {
        let lang = spec
            .lang
            .unwrap_or_else(|| self.language.code().to_string());
        effects.push(Effect::Speak {
            text: spec.text,
            lang,
        });
    }

    pub(super) fn handle_voices_loaded(&mut self, voices: Vec<VoiceInfo>) {
        debug!(count = voices.len(), "voice inventory refreshed");
        self.speech.voices = voices;
    }
}
