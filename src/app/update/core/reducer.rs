//! Pure message reduction. Nothing here touches the outside world; anything
//! that must is returned as an `Effect` for the runtime to execute.

use std::time::Instant;

use tracing::{debug, info};

use crate::app::messages::{Message, ViewKind};
use crate::app::state::constants::TOAST_VISIBLE_FOR;
use crate::app::state::{App, Toast};
use crate::app::update::Effect;
use crate::config::Language;
use crate::content;

impl App {
    pub(in crate::app) fn reduce(&mut self, message: Message) -> Vec<Effect> {
        let mut effects = Vec::new();
        match message {
            Message::ViewSelected(view) => self.handle_view_selected(view),
            Message::LanguageSelected(language) => {
                self.handle_language_selected(language, &mut effects);
            }
            Message::SearchQueryChanged(query) => self.handle_search_changed(query),
            Message::AccordionToggled { view, index } => {
                self.handle_accordion_toggled(view, index);
            }
            Message::SpeakRequested(spec) => self.handle_speak_requested(spec, &mut effects),
            Message::CopyRequested(text) => self.handle_copy_requested(text, &mut effects),
            Message::NoteDraftChanged(draft) => self.notes.draft = draft,
            Message::NoteSubmitted => self.handle_note_submitted(&mut effects),
            Message::NoteDeleteRequested(index) => {
                self.handle_note_delete_requested(index, &mut effects);
            }
            Message::ScriptsLoaded { language, tree } => {
                self.handle_scripts_loaded(language, tree);
            }
            Message::ScriptsLoadFailed {
                language,
                resource,
                error,
            } => self.handle_scripts_failed(language, resource, error),
            Message::ActivitiesLoaded { tree } => self.handle_activities_loaded(tree),
            Message::ActivitiesLoadFailed { resource, error } => {
                self.handle_activities_failed(resource, error);
            }
            Message::LibraryLoaded { tree } => self.handle_library_loaded(tree),
            Message::LibraryLoadFailed { resource, error } => {
                self.handle_library_failed(resource, error);
            }
            Message::VoicesLoaded(voices) => self.handle_voices_loaded(voices),
            Message::Tick(now) => self.handle_tick(now),
        }
        effects
    }

    fn handle_view_selected(&mut self, view: ViewKind) {
        if self.active_view == view {
            return;
        }
        debug!(view = view.label(), "switching view");
        self.active_view = view;
        // The query resets on navigation, but the previous view keeps the
        // visibility it had; nothing is re-filtered.
        self.search.query.clear();
    }

    fn handle_language_selected(&mut self, language: Language, effects: &mut Vec<Effect>) {
        if self.language == language {
            return;
        }
        info!(language = %language, "language changed");
        self.language = language;
        effects.push(Effect::FetchScripts { language });
    }

    fn handle_search_changed(&mut self, query: String) {
        self.search.query = query;
        let query = self.search.query.clone();
        if let Some(tree) = self.active_tree_mut() {
            content::apply_filter(tree, &query);
        }
    }

    fn handle_accordion_toggled(&mut self, view: ViewKind, index: usize) {
        // Clicks carry the view they were rendered in; a press racing a view
        // switch must not flip an accordion in the wrong tree.
        if view != self.active_view {
            return;
        }
        if let Some(tree) = self.active_tree_mut() {
            if let Some(accordion) = tree.accordions.get_mut(index) {
                accordion.open = !accordion.open;
                debug!(
                    index,
                    id = accordion.id.as_deref().unwrap_or("-"),
                    open = accordion.open,
                    "accordion toggled"
                );
            }
        }
    }

    fn handle_copy_requested(&mut self, text: String, effects: &mut Vec<Effect>) {
        // The clipboard write completes without a callback, so the toast is
        // shown at dispatch time.
        self.toast = Some(Toast {
            message: "Copied!".to_string(),
            deadline: Instant::now() + TOAST_VISIBLE_FOR,
        });
        effects.push(Effect::CopyToClipboard(text));
    }

    fn handle_tick(&mut self, now: Instant) {
        if let Some(toast) = &self.toast {
            if now >= toast.deadline {
                self.toast = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    use crate::app::messages::{Message, ViewKind};
    use crate::app::state::{App, LoadStatus};
    use crate::app::update::Effect;
    use crate::config::{AppConfig, Language};
    use crate::content::{self, SpeakSpec, ViewTree};
    use crate::loader::DocumentSource;
    use crate::speech::fake::FakeEngine;
    use crate::storage::MemoryStore;

    fn test_app() -> App {
        let (app, _startup) = App::bootstrap(
            AppConfig::default(),
            DocumentSource::Local {
                root: "content".into(),
            },
            Arc::new(FakeEngine::default()),
            Box::new(MemoryStore::default()),
        );
        app
    }

    fn scripts_tree() -> ViewTree {
        let doc = content::parse_scripts(
            r#"{"modules": [{"title": "Greetings", "categories": [
                {"title": "Start", "phrases": ["Good morning!", "Goodbye"]}
            ]}]}"#,
            "content_en.json",
        )
        .unwrap();
        content::normalize_scripts(doc, "en")
    }

    fn ready_tree(status: &LoadStatus) -> &ViewTree {
        match status {
            LoadStatus::Ready(tree) => tree,
            other => panic!("expected a loaded tree, got {other:?}"),
        }
    }

    #[test]
    fn switching_views_clears_query_but_not_visibility() {
        let mut app = test_app();
        app.content.scripts = LoadStatus::Ready(scripts_tree());

        app.reduce(Message::SearchQueryChanged("morning".into()));
        let tree = ready_tree(&app.content.scripts);
        assert!(!tree.accordions[0].sections[0].cards[1].visible);

        let effects = app.reduce(Message::ViewSelected(ViewKind::Library));
        assert!(effects.is_empty());
        assert_eq!(app.active_view, ViewKind::Library);
        assert!(app.search.query.is_empty());
        // The scripts tree keeps the filter it had.
        let tree = ready_tree(&app.content.scripts);
        assert!(!tree.accordions[0].sections[0].cards[1].visible);
    }

    #[test]
    fn language_change_refetches_scripts_only() {
        let mut app = test_app();
        let effects = app.reduce(Message::LanguageSelected(Language::It));
        assert_eq!(
            effects,
            vec![Effect::FetchScripts {
                language: Language::It
            }]
        );
        assert_eq!(app.language, Language::It);
    }

    #[test]
    fn reselecting_the_same_language_is_a_no_op() {
        let mut app = test_app();
        let effects = app.reduce(Message::LanguageSelected(Language::En));
        assert!(effects.is_empty());
    }

    #[test]
    fn stale_scripts_document_is_discarded() {
        let mut app = test_app();
        app.reduce(Message::LanguageSelected(Language::It));
        let effects = app.reduce(Message::ScriptsLoaded {
            language: Language::En,
            tree: scripts_tree(),
        });
        assert!(effects.is_empty());
        assert_eq!(app.content.scripts, LoadStatus::Loading);

        app.reduce(Message::ScriptsLoaded {
            language: Language::It,
            tree: scripts_tree(),
        });
        assert!(matches!(app.content.scripts, LoadStatus::Ready(_)));
    }

    #[test]
    fn failed_load_records_the_resource() {
        let mut app = test_app();
        app.reduce(Message::ScriptsLoadFailed {
            language: Language::En,
            resource: "content_en.json".into(),
            error: "boom".into(),
        });
        assert_eq!(
            app.content.scripts,
            LoadStatus::Failed {
                resource: "content_en.json".into()
            }
        );
    }

    #[test]
    fn stale_script_failures_are_also_discarded() {
        let mut app = test_app();
        app.reduce(Message::LanguageSelected(Language::De));
        app.reduce(Message::ScriptsLoadFailed {
            language: Language::En,
            resource: "content_en.json".into(),
            error: "boom".into(),
        });
        assert_eq!(app.content.scripts, LoadStatus::Loading);
    }

    #[test]
    fn search_filters_the_active_view_and_opens_matches() {
        let mut app = test_app();
        app.content.scripts = LoadStatus::Ready(scripts_tree());

        app.reduce(Message::SearchQueryChanged("goodbye".into()));
        let tree = ready_tree(&app.content.scripts);
        assert!(tree.accordions[0].open);
        assert!(!tree.accordions[0].sections[0].cards[0].visible);
        assert!(tree.accordions[0].sections[0].cards[1].visible);
    }

    #[test]
    fn search_reaches_the_notes_view() {
        let mut app = test_app();
        app.rebuild_notes_tree(&["bring towels".to_string(), "check speakers".to_string()]);
        app.reduce(Message::ViewSelected(ViewKind::Notes));

        app.reduce(Message::SearchQueryChanged("towels".into()));
        let cards = &app.notes.tree.accordions[0].sections[0].cards;
        assert!(cards[0].visible);
        assert!(!cards[1].visible);
    }

    #[test]
    fn accordion_toggle_flips_only_the_addressed_view() {
        let mut app = test_app();
        app.content.scripts = LoadStatus::Ready(scripts_tree());

        app.reduce(Message::AccordionToggled {
            view: ViewKind::Scripts,
            index: 0,
        });
        assert!(ready_tree(&app.content.scripts).accordions[0].open);

        // A toggle rendered for another view is ignored.
        app.reduce(Message::AccordionToggled {
            view: ViewKind::Library,
            index: 0,
        });
        assert!(ready_tree(&app.content.scripts).accordions[0].open);

        app.reduce(Message::AccordionToggled {
            view: ViewKind::Scripts,
            index: 0,
        });
        assert!(!ready_tree(&app.content.scripts).accordions[0].open);
    }

    #[test]
    fn speak_request_fills_the_active_language() {
        let mut app = test_app();
        app.reduce(Message::LanguageSelected(Language::De));
        let effects = app.reduce(Message::SpeakRequested(SpeakSpec {
            text: "Guten Morgen".into(),
            lang: None,
        }));
        assert_eq!(
            effects,
            vec![Effect::Speak {
                text: "Guten Morgen".into(),
                lang: "de".into()
            }]
        );
    }

    #[test]
    fn speak_request_keeps_an_explicit_language() {
        let mut app = test_app();
        app.reduce(Message::LanguageSelected(Language::Ru));
        let effects = app.reduce(Message::SpeakRequested(SpeakSpec {
            text: "Welcome".into(),
            lang: Some("en".into()),
        }));
        assert_eq!(
            effects,
            vec![Effect::Speak {
                text: "Welcome".into(),
                lang: "en".into()
            }]
        );
    }

    #[test]
    fn copy_shows_a_toast_and_emits_the_clipboard_effect() {
        let mut app = test_app();
        let effects = app.reduce(Message::CopyRequested("Good morning!".into()));
        assert_eq!(effects, vec![Effect::CopyToClipboard("Good morning!".into())]);
        assert_eq!(app.toast.as_ref().unwrap().message, "Copied!");
    }

    #[test]
    fn toast_expires_on_a_late_enough_tick() {
        let mut app = test_app();
        app.reduce(Message::CopyRequested("x".into()));

        app.reduce(Message::Tick(Instant::now()));
        assert!(app.toast.is_some(), "fresh toast survives an early tick");

        app.reduce(Message::Tick(Instant::now() + Duration::from_secs(3)));
        assert!(app.toast.is_none());
    }

    #[test]
    fn blank_note_submission_is_silent() {
        let mut app = test_app();
        app.reduce(Message::NoteDraftChanged("   ".into()));
        let effects = app.reduce(Message::NoteSubmitted);
        assert!(effects.is_empty());
        assert_eq!(app.notes.draft, "   ");
    }

    #[test]
    fn note_submission_trims_and_clears_the_draft() {
        let mut app = test_app();
        app.reduce(Message::NoteDraftChanged("  stretch first  ".into()));
        let effects = app.reduce(Message::NoteSubmitted);
        assert_eq!(effects, vec![Effect::SubmitNote("stretch first".into())]);
        assert!(app.notes.draft.is_empty());
    }

    #[test]
    fn note_delete_becomes_an_effect() {
        let mut app = test_app();
        let effects = app.reduce(Message::NoteDeleteRequested(2));
        assert_eq!(effects, vec![Effect::DeleteNote(2)]);
    }
}
