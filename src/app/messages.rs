//! Messages handled by the application update loop.

use std::time::Instant;

use crate::config::Language;
use crate::content::{SpeakSpec, ViewTree};
use crate::speech::VoiceInfo;

/// The four top-level views, in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Scripts,
    Activities,
    Library,
    Notes,
}

impl ViewKind {
    pub const ALL: [ViewKind; 4] = [
        ViewKind::Scripts,
        ViewKind::Activities,
        ViewKind::Library,
        ViewKind::Notes,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ViewKind::Scripts => "Scripts",
            ViewKind::Activities => "Activities",
            ViewKind::Library => "Library",
            ViewKind::Notes => "Notes",
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    ViewSelected(ViewKind),
    LanguageSelected(Language),
    SearchQueryChanged(String),
    AccordionToggled { view: ViewKind, index: usize },
    SpeakRequested(SpeakSpec),
    CopyRequested(String),
    NoteDraftChanged(String),
    NoteSubmitted,
    NoteDeleteRequested(usize),
    ScriptsLoaded {
        language: Language,
        tree: ViewTree,
    },
    ScriptsLoadFailed {
        language: Language,
        resource: String,
        error: String,
    },
    ActivitiesLoaded {
        tree: ViewTree,
    },
    ActivitiesLoadFailed {
        resource: String,
        error: String,
    },
    LibraryLoaded {
        tree: ViewTree,
    },
    LibraryLoadFailed {
        resource: String,
        error: String,
    },
    VoicesLoaded(Vec<VoiceInfo>),
    Tick(Instant),
}
