//! Application state: one struct per concern, composed into `App`.

pub mod constants;
mod content;
mod speech;
mod ui;

pub use content::{ContentState, LoadStatus};
pub use speech::SpeechState;
pub use ui::{SearchState, Toast};

use std::sync::Arc;

use iced::Task;
use tracing::info;

use crate::config::{AppConfig, Language};
use crate::content::{ViewTree, build_notes_tree};
use crate::loader::DocumentSource;
use crate::notes::NotesStore;
use crate::speech::SpeechEngine;
use crate::storage::KeyValueStore;

use super::messages::{Message, ViewKind};
use super::update::Effect;

pub struct NotesState {
    pub(in crate::app) store: NotesStore,
    pub(in crate::app) draft: String,
    pub(in crate::app) tree: ViewTree,
}

pub struct App {
    pub(in crate::app) config: AppConfig,
    pub(in crate::app) source: DocumentSource,
    pub(in crate::app) language: Language,
    pub(in crate::app) active_view: ViewKind,
    pub(in crate::app) content: ContentState,
    pub(in crate::app) search: SearchState,
    pub(in crate::app) speech: SpeechState,
    pub(in crate::app) notes: NotesState,
    pub(in crate::app) toast: Option<Toast>,
}

impl App {
    /// Builds the initial state and kicks off the startup work: all three
    /// documents fetched concurrently plus a voice inventory refresh. Notes
    /// are loaded synchronously since they live on local disk.
    pub fn bootstrap(
        mut config: AppConfig,
        source: DocumentSource,
        engine: Arc<dyn SpeechEngine>,
        store: Box<dyn KeyValueStore>,
    ) -> (App, Task<Message>) {
        clamp_config(&mut config);
        let notes_store = NotesStore::new(store);
        let saved = notes_store.load();
        info!(
            language = %config.language,
            notes = saved.len(),
            source = ?source,
            "starting up"
        );

        let mut app = App {
            language: config.language,
            active_view: ViewKind::Scripts,
            content: ContentState::default(),
            search: SearchState::default(),
            speech: SpeechState::new(engine),
            notes: NotesState {
                store: notes_store,
                draft: String::new(),
                tree: build_notes_tree(&saved),
            },
            toast: None,
            source,
            config,
        };

        let startup = [
            Effect::FetchScripts {
                language: app.language,
            },
            Effect::FetchActivities,
            Effect::FetchLibrary,
            Effect::RefreshVoices,
        ];
        let task = Task::batch(startup.into_iter().map(|effect| app.run_effect(effect)));
        (app, task)
    }

    /// Tree behind the active view, when it is in a filterable state.
    pub(in crate::app) fn active_tree_mut(&mut self) -> Option<&mut ViewTree> {
        match self.active_view {
            ViewKind::Scripts => self.content.scripts.tree_mut(),
            ViewKind::Activities => self.content.activities.tree_mut(),
            ViewKind::Library => self.content.library.tree_mut(),
            ViewKind::Notes => Some(&mut self.notes.tree),
        }
    }

    /// The notes tree mirrors whatever the store last persisted.
    pub(in crate::app) fn rebuild_notes_tree(&mut self, notes: &[String]) {
        self.notes.tree = build_notes_tree(notes);
    }
}

fn clamp_config(config: &mut AppConfig) {
    config.window_width = config.window_width.clamp(320.0, 7680.0);
    config.window_height = config.window_height.clamp(240.0, 4320.0);
    config.speech_rate = config.speech_rate.clamp(0.5, 2.0);
}
