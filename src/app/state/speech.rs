//! Speech engine handle and the cached voice inventory.

use std::sync::Arc;

use crate::speech::{SpeechEngine, VoiceInfo};

pub struct SpeechState {
    pub(in crate::app) engine: Arc<dyn SpeechEngine>,
    /// Installed voices; empty until the startup refresh lands and re-queried
    /// at speak time if still empty.
    pub(in crate::app) voices: Vec<VoiceInfo>,
}

impl SpeechState {
    pub fn new(engine: Arc<dyn SpeechEngine>) -> Self {
        SpeechState {
            engine,
            voices: Vec::new(),
        }
    }
}
