//! Locale mapping and voice selection for speech playback.

use crate::speech::VoiceInfo;

/// Fixed mapping from a content language code to the locale the speech
/// engine should target. Unknown codes fall back to US English.
pub fn locale_for_code(code: &str) -> &'static str {
    match code {
        "en" => "en-US",
        "it" => "it-IT",
        "de" => "de-DE",
        "es" => "es-ES",
        "ru" => "ru-RU",
        _ => "en-US",
    }
}

/// Picks a voice for `locale`: exact tag match first, then the first voice
/// sharing the 2-letter subtag. `None` means let the engine use its default.
/// Engine tags tend to arrive lowercase, so comparisons ignore ASCII case.
pub fn resolve<'a>(locale: &str, voices: &'a [VoiceInfo]) -> Option<&'a VoiceInfo> {
    if let Some(exact) = voices.iter().find(|v| v.lang.eq_ignore_ascii_case(locale)) {
        return Some(exact);
    }
    let short = locale.get(..2).unwrap_or(locale).to_ascii_lowercase();
    voices
        .iter()
        .find(|v| v.lang.to_ascii_lowercase().starts_with(&short))
}
