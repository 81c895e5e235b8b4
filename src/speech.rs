//! Speech playback through an external engine process.
//!
//! The production backend shells out to espeak-ng. At most one utterance is
//! alive at a time: every new speak kills the previous child first.

use std::process::{Child, Command, Stdio};
use std::sync::{Mutex, MutexGuard};

use anyhow::{Context, Result};
use tracing::{debug, warn};

const BASE_WORDS_PER_MINUTE: f32 = 175.0;

/// One installed voice as reported by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceInfo {
    pub name: String,
    pub lang: String,
}

/// A single utterance. `voice` is a resolved handle; when absent the engine
/// is pointed at the lowercased locale and left to pick for itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeakRequest {
    pub text: String,
    pub locale: String,
    pub voice: Option<VoiceInfo>,
}

/// Boundary to the platform speech engine.
pub trait SpeechEngine: Send + Sync {
    fn list_voices(&self) -> Vec<VoiceInfo>;
    fn speak(&self, request: SpeakRequest) -> Result<()>;
    fn cancel_all(&self);
}

pub struct EspeakEngine {
    bin: String,
    wpm: u32,
    active: Mutex<Option<Child>>,
}

impl EspeakEngine {
    /// `rate` is a multiplier on the engine's base speed, clamped to a range
    /// that still produces intelligible output.
    pub fn new(bin: impl Into<String>, rate: f32) -> Self {
        let rate = rate.clamp(0.5, 2.0);
        EspeakEngine {
            bin: bin.into(),
            wpm: (BASE_WORDS_PER_MINUTE * rate) as u32,
            active: Mutex::new(None),
        }
    }

    fn active_slot(&self) -> MutexGuard<'_, Option<Child>> {
        self.active
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SpeechEngine for EspeakEngine {
    fn list_voices(&self) -> Vec<VoiceInfo> {
        let output = match Command::new(&self.bin).arg("--voices").output() {
            Ok(output) => output,
            Err(err) => {
                warn!(bin = %self.bin, error = %err, "voice listing failed to launch");
                return Vec::new();
            }
        };
        if !output.status.success() {
            warn!(bin = %self.bin, status = %output.status, "voice listing exited nonzero");
            return Vec::new();
        }
        parse_voices(&String::from_utf8_lossy(&output.stdout))
    }

    fn speak(&self, request: SpeakRequest) -> Result<()> {
        self.cancel_all();
        let tag = request
            .voice
            .map(|v| v.lang)
            .unwrap_or_else(|| request.locale.to_lowercase());
        let child = Command::new(&self.bin)
            .arg("-v")
            .arg(&tag)
            .arg("-s")
            .arg(self.wpm.to_string())
            .arg(&request.text)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("failed to launch {}", self.bin))?;
        debug!(voice = %tag, wpm = self.wpm, chars = request.text.len(), "speaking");
        *self.active_slot() = Some(child);
        Ok(())
    }

    fn cancel_all(&self) {
        if let Some(mut child) = self.active_slot().take() {
            if let Err(err) = child.kill() {
                debug!(error = %err, "utterance already finished");
            }
            let _ = child.wait();
        }
    }
}

impl Drop for EspeakEngine {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

/// Parses `--voices` output. Columns are pty, language, age/gender, name,
/// file; the header and anything too short to carry a language are skipped.
/// Only the language tag matters downstream, so the name is taken as a
/// single token.
fn parse_voices(raw: &str) -> Vec<VoiceInfo> {
    let mut voices = Vec::new();
    for line in raw.lines() {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 4 || parts[0].parse::<u32>().is_err() {
            continue;
        }
        voices.push(VoiceInfo {
            name: parts[3].to_string(),
            lang: parts[1].to_string(),
        });
    }
    debug!(count = voices.len(), "parsed voice listing");
    voices
}

#[cfg(test)]
pub mod fake {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum EngineCall {
        ListVoices,
        Speak {
            text: String,
            locale: String,
            voice: Option<String>,
        },
        Cancel,
    }

    /// Records every call so reducer and runtime tests can assert ordering.
    #[derive(Default)]
    pub struct FakeEngine {
        voices: Mutex<Vec<VoiceInfo>>,
        calls: Mutex<Vec<EngineCall>>,
    }

    impl FakeEngine {
        pub fn with_voices(voices: Vec<VoiceInfo>) -> Self {
            FakeEngine {
                voices: Mutex::new(voices),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> Vec<EngineCall> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl SpeechEngine for FakeEngine {
        fn list_voices(&self) -> Vec<VoiceInfo> {
            self.calls.lock().unwrap().push(EngineCall::ListVoices);
            self.voices.lock().unwrap().clone()
        }

        fn speak(&self, request: SpeakRequest) -> Result<()> {
            self.calls.lock().unwrap().push(EngineCall::Speak {
                text: request.text,
                locale: request.locale,
                voice: request.voice.map(|v| v.name),
            });
            Ok(())
        }

        fn cancel_all(&self) {
            self.calls.lock().unwrap().push(EngineCall::Cancel);
        }
    }
}
