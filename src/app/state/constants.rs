//! Tunables shared across the state and view layers.

use std::time::Duration;

use crate::config::Language;

/// Choices offered by the language picker, in display order.
pub const LANGUAGES: [Language; 5] = [
    Language::En,
    Language::It,
    Language::De,
    Language::Es,
    Language::Ru,
];

/// How long the copy toast stays on screen.
pub const TOAST_VISIBLE_FOR: Duration = Duration::from_secs(2);

/// Cadence of the housekeeping tick while a toast is showing.
pub const TICK_INTERVAL: Duration = Duration::from_millis(200);
