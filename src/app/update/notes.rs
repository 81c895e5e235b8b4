//! Handlers for the note form.

use crate::app::state::App;
use crate::app::update::Effect;

impl App {
    /// Trims the draft first; an empty result is silently ignored and the
    /// draft is left as typed.
    pub(super) fn handle_note_submitted(&mut self, effects: &mut Vec<Effect>) {
        let text = self.notes.draft.trim().to_string();
        if text.is_empty() {
            return;
        }
        self.notes.draft.clear();
        effects.push(Effect::SubmitNote(text));
    }

    pub(super) fn handle_note_delete_requested(&mut self, index: usize, effects: &mut Vec<Effect>) {
        effects.push(Effect::DeleteNote(index));
    }
}
