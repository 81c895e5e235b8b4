//! Effect execution. This is the only place IO is started: fetches become
//! tasks, notes hit the store synchronously, speech goes to the engine.

use std::sync::Arc;

use iced::Task;
use tracing::{debug, info, warn};

use crate::app::messages::Message;
use crate::app::state::{App, LoadStatus};
use crate::app::update::Effect;
use crate::loader;
use crate::speech::{SpeakRequest, SpeechEngine, VoiceInfo};
use crate::voice;

impl App {
    pub(in crate::app) fn run_effect(&mut self, effect: Effect) -> Task<Message> {
        match effect {
            Effect::FetchScripts { language } => {
                self.content.scripts = LoadStatus::Loading;
                let source = self.source.clone();
                Task::perform(loader::load_scripts(source, language), move |result| {
                    match result {
                        Ok(tree) => Message::ScriptsLoaded { language, tree },
                        Err(err) => Message::ScriptsLoadFailed {
                            language,
                            resource: err.resource().to_string(),
                            error: err.to_string(),
                        },
                    }
                })
            }
            Effect::FetchActivities => {
                self.content.activities = LoadStatus::Loading;
                let source = self.source.clone();
                Task::perform(loader::load_activities(source), |result| match result {
                    Ok(tree) => Message::ActivitiesLoaded { tree },
                    Err(err) => Message::ActivitiesLoadFailed {
                        resource: err.resource().to_string(),
                        error: err.to_string(),
                    },
                })
            }
            Effect::FetchLibrary => {
                self.content.library = LoadStatus::Loading;
                let source = self.source.clone();
                Task::perform(loader::load_library(source), |result| match result {
                    Ok(tree) => Message::LibraryLoaded { tree },
                    Err(err) => Message::LibraryLoadFailed {
                        resource: err.resource().to_string(),
                        error: err.to_string(),
                    },
                })
            }
            Effect::RefreshVoices => {
                let engine = self.speech.engine.clone();
                Task::perform(
                    async move {
                        tokio::task::spawn_blocking(move || engine.list_voices())
                            .await
                            .unwrap_or_default()
                    },
                    Message::VoicesLoaded,
                )
            }
            Effect::Speak { text, lang } => {
                // Cancel at dispatch so the previous utterance stops even if
                // the replacement never starts.
                self.speech.engine.cancel_all();
                let engine = self.speech.engine.clone();
                let known = self.speech.voices.clone();
                Task::perform(
                    resolve_and_speak(engine, known, text, lang),
                    Message::VoicesLoaded,
                )
            }
            Effect::CopyToClipboard(text) => iced::clipboard::write(text),
            Effect::SubmitNote(text) => {
                let notes = self.notes.store.add(&text);
                info!(count = notes.len(), "note added");
                self.rebuild_notes_tree(&notes);
                Task::none()
            }
            Effect::DeleteNote(index) => {
                let notes = self.notes.store.remove_at(index);
                info!(count = notes.len(), "note removed");
                self.rebuild_notes_tree(&notes);
                Task::none()
            }
        }
    }
}

/// Voice lookup and playback both shell out, so the whole chain runs on a
/// blocking task. Resolves to the inventory it used; feeding that back in as
/// `VoicesLoaded` keeps a speak-time re-query around for later requests.
async fn resolve_and_speak(
    engine: Arc<dyn SpeechEngine>,
    known: Vec<VoiceInfo>,
    text: String,
    lang: String,
) -> Vec<VoiceInfo> {
    tokio::task::spawn_blocking(move || {
        let locale = voice::locale_for_code(&lang);
        let voices = if known.is_empty() {
            // Engines can report an empty inventory right after startup;
            // ask again at speak time.
            engine.list_voices()
        } else {
            known
        };
        let chosen = voice::resolve(locale, &voices).cloned();
        match &chosen {
            Some(voice) => debug!(%locale, voice = %voice.name, "speaking"),
            None => warn!(%locale, "no matching voice, speaking with the engine default"),
        }
        let request = SpeakRequest {
            text,
            locale: locale.to_string(),
            voice: chosen,
        };
        if let Err(err) = engine.speak(request) {
            warn!(error = %err, "speech playback failed");
        }
        voices
    })
    .await
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::resolve_and_speak;
    use crate::app::messages::Message;
    use crate::app::state::{App, LoadStatus};
    use crate::app::update::Effect;
    use crate::config::AppConfig;
    use crate::loader::DocumentSource;
    use crate::speech::VoiceInfo;
    use crate::speech::fake::{EngineCall, FakeEngine};
    use crate::storage::MemoryStore;

    fn engine_app(engine: Arc<FakeEngine>) -> App {
        let (app, _startup) = App::bootstrap(
            AppConfig::default(),
            DocumentSource::Local {
                root: "content".into(),
            },
            engine,
            Box::new(MemoryStore::default()),
        );
        app
    }

    #[test]
    fn speak_dispatch_cancels_the_previous_utterance() {
        let engine = Arc::new(FakeEngine::default());
        let mut app = engine_app(engine.clone());

        let _ = app.run_effect(Effect::Speak {
            text: "Buongiorno".into(),
            lang: "it".into(),
        });

        // The cancel lands before the playback task gets a chance to run.
        assert_eq!(engine.calls(), vec![EngineCall::Cancel]);
    }

    #[tokio::test]
    async fn speak_requeries_an_empty_inventory_and_keeps_it() {
        let engine = Arc::new(FakeEngine::with_voices(vec![VoiceInfo {
            name: "italian".into(),
            lang: "it".into(),
        }]));
        let mut app = engine_app(engine.clone());

        let voices =
            resolve_and_speak(engine.clone(), Vec::new(), "Buongiorno".into(), "it".into()).await;
        let _ = app.reduce(Message::VoicesLoaded(voices));
        assert_eq!(app.speech.voices.len(), 1);

        // The stored inventory is reused without asking the engine again.
        let _ = resolve_and_speak(
            engine.clone(),
            app.speech.voices.clone(),
            "Arrivederci".into(),
            "it".into(),
        )
        .await;

        assert_eq!(
            engine.calls(),
            vec![
                EngineCall::ListVoices,
                EngineCall::Speak {
                    text: "Buongiorno".into(),
                    locale: "it-IT".into(),
                    voice: Some("italian".into()),
                },
                EngineCall::Speak {
                    text: "Arrivederci".into(),
                    locale: "it-IT".into(),
                    voice: Some("italian".into()),
                },
            ]
        );
    }

    #[tokio::test]
    async fn speak_without_a_matching_voice_uses_the_engine_default() {
        let engine = Arc::new(FakeEngine::default());

        let voices =
            resolve_and_speak(engine.clone(), Vec::new(), "hello".into(), "en".into()).await;

        assert!(voices.is_empty());
        assert_eq!(
            engine.calls(),
            vec![
                EngineCall::ListVoices,
                EngineCall::Speak {
                    text: "hello".into(),
                    locale: "en-US".into(),
                    voice: None,
                },
            ]
        );
    }

    #[test]
    fn note_effects_persist_and_rebuild_the_tree() {
        let engine = Arc::new(FakeEngine::default());
        let mut app = engine_app(engine);

        let _ = app.run_effect(Effect::SubmitNote("first".into()));
        let _ = app.run_effect(Effect::SubmitNote("second".into()));
        assert_eq!(
            app.notes.store.load(),
            vec!["first".to_string(), "second".to_string()]
        );
        assert_eq!(app.notes.tree.accordions[0].sections[0].cards.len(), 2);

        let _ = app.run_effect(Effect::DeleteNote(0));
        assert_eq!(app.notes.store.load(), vec!["second".to_string()]);
        let cards = &app.notes.tree.accordions[0].sections[0].cards;
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].actions.delete, Some(0));
    }

    #[test]
    fn out_of_range_delete_keeps_the_tree_intact() {
        let engine = Arc::new(FakeEngine::default());
        let mut app = engine_app(engine);

        let _ = app.run_effect(Effect::SubmitNote("only".into()));
        let _ = app.run_effect(Effect::DeleteNote(9));
        assert_eq!(app.notes.store.load(), vec!["only".to_string()]);
        assert_eq!(app.notes.tree.accordions[0].sections[0].cards.len(), 1);
    }

    #[test]
    fn fetches_reset_the_slot_to_loading() {
        let engine = Arc::new(FakeEngine::default());
        let mut app = engine_app(engine);

        app.content.library = LoadStatus::Failed {
            resource: "library.json".into(),
        };
        let _ = app.run_effect(Effect::FetchLibrary);
        assert_eq!(app.content.library, LoadStatus::Loading);
    }
}
