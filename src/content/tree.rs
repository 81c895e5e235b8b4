//! The normalized view tree shared by every view.
//!
//! All three document families, plus the notes list, collapse into the same
//! Accordion → Section → Card shape. Nodes are plain data; the widget layer
//! projects them without inspecting document-specific structure again.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// One rendered view: an ordered list of collapsible groups.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewTree {
    pub accordions: Vec<AccordionNode>,
}

/// A collapsible group with a header row and an ordered body.
#[derive(Debug, Clone, PartialEq)]
pub struct AccordionNode {
    pub id: Option<String>,
    pub header: HeaderContent,
    /// Optional lead paragraph shown before the sections (activity
    /// category descriptions).
    pub intro: Option<String>,
    pub open: bool,
    pub sections: Vec<SectionNode>,
}

/// Header row content: icon and annotation are omitted when absent.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderContent {
    pub icon: Option<String>,
    pub title: String,
    pub annotation: Option<String>,
}

impl HeaderContent {
    pub fn plain(title: impl Into<String>) -> Self {
        HeaderContent {
            icon: None,
            title: title.into(),
            annotation: None,
        }
    }
}

/// A titled run of cards inside an accordion.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionNode {
    pub title: Option<String>,
    pub cards: Vec<CardNode>,
}

/// The smallest renderable unit: one phrase, item, pair, or note.
#[derive(Debug, Clone, PartialEq)]
pub struct CardNode {
    pub body: CardBody,
    pub actions: CardActions,
    /// Search visibility flag; filtering flips this, never the content.
    pub visible: bool,
    /// Flattened, case-folded card text the filter matches against.
    pub haystack: String,
}

impl CardNode {
    pub fn new(body: CardBody, actions: CardActions) -> Self {
        let haystack = search_fold(
            &body
                .display_lines()
                .iter()
                .map(|line| line.text.as_str())
                .collect::<Vec<_>>()
                .join(" "),
        );
        CardNode {
            body,
            actions,
            visible: true,
            haystack,
        }
    }
}

/// Closed set of card shapes; the widget layer matches exhaustively.
#[derive(Debug, Clone, PartialEq)]
pub enum CardBody {
    /// Script phrases and notes.
    Phrase(String),
    /// Bare-string activity items, whatever their section claims to hold.
    Warning(String),
    Playlist {
        title: String,
        artist: String,
        usage: String,
    },
    Routine {
        title: String,
        steps: Vec<String>,
    },
    Instruction {
        name: String,
        description: String,
        cue: String,
    },
    /// Library phrase pairs: reference text plus its translation.
    Pair {
        primary: String,
        translated: String,
    },
}

/// One line of card text with a presentation hint for the widget layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub text: String,
    pub tone: Tone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Strong,
    Dim,
    Accent,
}

impl Line {
    fn new(text: impl Into<String>, tone: Tone) -> Self {
        Line {
            text: text.into(),
            tone,
        }
    }
}

impl CardBody {
    /// Project the card into display lines. This is the single place that
    /// knows how each variant reads; the search haystack is derived from the
    /// same lines so filtering always matches what is on screen.
    pub fn display_lines(&self) -> Vec<Line> {
        match self {
            CardBody::Phrase(text) => vec![Line::new(text.clone(), Tone::Plain)],
            CardBody::Warning(text) => vec![Line::new(format!("⚠️ {text}"), Tone::Plain)],
            CardBody::Playlist {
                title,
                artist,
                usage,
            } => {
                let mut lines = vec![Line::new(format!("🎵 {title}"), Tone::Strong)];
                if !(artist.is_empty() && usage.is_empty()) {
                    lines.push(Line::new(format!("{artist} - {usage}"), Tone::Dim));
                }
                lines
            }
            CardBody::Routine { title, steps } => {
                let mut lines = vec![Line::new(title.clone(), Tone::Strong)];
                lines.extend(
                    steps
                        .iter()
                        .map(|step| Line::new(format!("• {step}"), Tone::Plain)),
                );
                lines
            }
            CardBody::Instruction {
                name,
                description,
                cue,
            } => {
                let mut lines = vec![Line::new(name.clone(), Tone::Accent)];
                if !description.is_empty() {
                    lines.push(Line::new(description.clone(), Tone::Plain));
                }
                if !cue.is_empty() {
                    lines.push(Line::new(format!("🗣️ {cue}"), Tone::Dim));
                }
                lines
            }
            CardBody::Pair {
                primary,
                translated,
            } => vec![
                Line::new(primary.clone(), Tone::Strong),
                Line::new(translated.clone(), Tone::Dim),
            ],
        }
    }
}

/// Per-card action set; absent actions render no button.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardActions {
    pub speak: Option<SpeakSpec>,
    pub copy: Option<String>,
    /// Note index to delete; positional identity, shifts after removal.
    pub delete: Option<usize>,
}

/// A speech request bound to a card.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeakSpec {
    pub text: String,
    /// 2-letter language code; `None` speaks with the active UI language.
    pub lang: Option<String>,
}

/// Normalize text for containment matching: NFC, lowercase, collapsed
/// whitespace. Applied to both card text and queries.
pub fn search_fold(text: &str) -> String {
    let composed: String = text.nfc().collect();
    WHITESPACE
        .replace_all(&composed, " ")
        .trim()
        .to_lowercase()
}
