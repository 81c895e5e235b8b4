//! The update half of the application: pure reduction, then effect execution.

pub(in crate::app) mod core;

mod content;
mod notes;
mod speech;

use crate::config::Language;

/// Side effects requested by the reducer and executed by the runtime. Keeping
/// them as data keeps the reducer free of IO and directly assertable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchScripts { language: Language },
    FetchActivities,
    FetchLibrary,
    RefreshVoices,
    Speak { text: String, lang: String },
    CopyToClipboard(String),
    SubmitNote(String),
    DeleteNote(usize),
}
