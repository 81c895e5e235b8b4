mod messages;
mod state;
mod update;
mod view;

pub use state::App;

use std::sync::Arc;

use crate::config::AppConfig;
use crate::loader::DocumentSource;
use crate::speech::SpeechEngine;
use crate::storage::KeyValueStore;
use iced::{Size, Theme, window};

/// Helper to launch the app with its external collaborators.
pub fn run_app(
    config: AppConfig,
    source: DocumentSource,
    engine: Arc<dyn SpeechEngine>,
    store: Box<dyn KeyValueStore>,
) -> iced::Result {
    let window_settings = window::Settings {
        size: Size::new(config.window_width, config.window_height),
        ..window::Settings::default()
    };

    iced::application("PhraseDeck", App::update, App::view)
        .window(window_settings)
        .subscription(App::subscription)
        .theme(|app: &App| {
            if matches!(app.config.theme, crate::config::ThemeMode::Night) {
                Theme::Dark
            } else {
                Theme::Light
            }
        })
        .run_with(move || App::bootstrap(config, source, engine, store))
}
