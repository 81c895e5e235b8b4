//! Lowering from wire documents to the uniform view tree.
//!
//! All three families (and the notes list) come out as the same
//! accordion/section/card shape so search and rendering stay generic.

use tracing::debug;

use super::documents::{
    ActivityDocument, ActivityEntry, ActivityItemRaw, LibraryDocument, ScriptDocument,
};
use super::tree::{
    AccordionNode, CardActions, CardBody, CardNode, HeaderContent, SectionNode, SpeakSpec,
    ViewTree,
};

/// Library pairs always speak their primary side in this language.
pub const REFERENCE_LANGUAGE: &str = "en";

/// Closed set of activity section kinds. The wire value is free-form; anything
/// unrecognized renders its entries as instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Playlist,
    Routine,
    Instruction,
}

impl SectionKind {
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "playlist" => SectionKind::Playlist,
            "routines" => SectionKind::Routine,
            _ => SectionKind::Instruction,
        }
    }
}

/// A bare string is a warning card no matter what the section claims to hold.
fn classify(kind: SectionKind, item: ActivityItemRaw) -> CardBody {
    match item {
        ActivityItemRaw::Text(text) => CardBody::Warning(text),
        ActivityItemRaw::Entry(entry) => entry_body(kind, entry),
    }
}

fn entry_body(kind: SectionKind, entry: ActivityEntry) -> CardBody {
    match kind {
        SectionKind::Playlist => CardBody::Playlist {
            title: entry.title,
            artist: entry.artist,
            usage: entry.usage,
        },
        SectionKind::Routine => CardBody::Routine {
            title: entry.title,
            steps: entry.steps,
        },
        SectionKind::Instruction => CardBody::Instruction {
            name: entry.name,
            description: entry.description,
            cue: entry.cue,
        },
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

/// Scripts: one accordion per module, one section per category, one phrase
/// card per string. Cards speak in the language the document was fetched for.
pub fn normalize_scripts(doc: ScriptDocument, speak_lang: &str) -> ViewTree {
    let accordions = doc
        .modules
        .into_iter()
        .map(|module| AccordionNode {
            id: non_empty(module.id),
            header: HeaderContent::plain(module.title),
            intro: None,
            open: false,
            sections: module
                .categories
                .into_iter()
                .map(|category| SectionNode {
                    title: non_empty(category.title),
                    cards: category
                        .phrases
                        .into_iter()
                        .map(|phrase| {
                            CardNode::new(
                                CardBody::Phrase(phrase.clone()),
                                CardActions {
                                    speak: Some(SpeakSpec {
                                        text: phrase.clone(),
                                        lang: Some(speak_lang.to_string()),
                                    }),
                                    copy: Some(phrase),
                                    delete: None,
                                },
                            )
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect();
    let tree = ViewTree { accordions };
    debug!(accordions = tree.accordions.len(), "normalized scripts");
    tree
}

/// Activities: category header carries icon and bpm annotation, description
/// becomes the intro paragraph. Cards are display-only.
pub fn normalize_activities(doc: ActivityDocument) -> ViewTree {
    let accordions = doc
        .categories
        .into_iter()
        .map(|category| AccordionNode {
            id: None,
            header: HeaderContent {
                icon: category.icon.and_then(non_empty),
                title: category.title,
                annotation: category.bpm_range.and_then(non_empty),
            },
            intro: category.description.and_then(non_empty),
            open: false,
            sections: category
                .sections
                .into_iter()
                .map(|section| {
                    let kind = SectionKind::from_raw(&section.kind);
                    SectionNode {
                        title: non_empty(section.title),
                        cards: section
                            .items
                            .into_iter()
                            .map(|item| CardNode::new(classify(kind, item), CardActions::default()))
                            .collect(),
                    }
                })
                .collect(),
        })
        .collect();
    let tree = ViewTree { accordions };
    debug!(accordions = tree.accordions.len(), "normalized activities");
    tree
}

/// Library: chapter accordions, topic sections, bilingual pair cards. Speak
/// and copy both target the primary side, always in the reference language.
pub fn normalize_library(doc: LibraryDocument) -> ViewTree {
    let accordions = doc
        .chapters
        .into_iter()
        .map(|chapter| AccordionNode {
            id: non_empty(chapter.id),
            header: HeaderContent::plain(chapter.title),
            intro: None,
            open: false,
            sections: chapter
                .topics
                .into_iter()
                .map(|topic| SectionNode {
                    title: non_empty(topic.title),
                    cards: topic
                        .phrases
                        .into_iter()
                        .map(|pair| {
                            let primary = pair.primary.clone();
                            CardNode::new(
                                CardBody::Pair {
                                    primary: pair.primary,
                                    translated: pair.translated,
                                },
                                CardActions {
                                    speak: Some(SpeakSpec {
                                        text: primary.clone(),
                                        lang: Some(REFERENCE_LANGUAGE.to_string()),
                                    }),
                                    copy: Some(primary),
                                    delete: None,
                                },
                            )
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect();
    let tree = ViewTree { accordions };
    debug!(accordions = tree.accordions.len(), "normalized library");
    tree
}

/// Notes fold into one always-open accordion with no header chrome so the
/// same filter machinery applies. Delete identity is the card's index.
pub fn build_notes_tree(notes: &[String]) -> ViewTree {
    let cards = notes
        .iter()
        .enumerate()
        .map(|(index, note)| {
            CardNode::new(
                CardBody::Phrase(note.clone()),
                CardActions {
                    speak: Some(SpeakSpec {
                        text: note.clone(),
                        lang: None,
                    }),
                    copy: Some(note.clone()),
                    delete: Some(index),
                },
            )
        })
        .collect();
    ViewTree {
        accordions: vec![AccordionNode {
            id: None,
            header: HeaderContent::plain(String::new()),
            intro: None,
            open: true,
            sections: vec![SectionNode { title: None, cards }],
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::super::documents::{parse_activities, parse_library, parse_scripts};
    use super::*;
    use crate::content::tree::Tone;

    #[test]
    fn scripts_keep_source_order_and_wire_actions() {
        let doc = parse_scripts(
            r#"{"modules": [
                {"id": "warmup", "title": "Warmup", "categories": [
                    {"title": "Start", "phrases": ["Hello everyone!", "Ready?"]}
                ]},
                {"title": "Closing", "categories": [
                    {"phrases": ["Goodbye!"]}
                ]}
            ]}"#,
            "content_it.json",
        )
        .unwrap();
        let tree = normalize_scripts(doc, "it");

        assert_eq!(tree.accordions.len(), 2);
        assert_eq!(tree.accordions[0].id.as_deref(), Some("warmup"));
        assert_eq!(tree.accordions[0].header.title, "Warmup");
        assert!(tree.accordions[1].id.is_none());
        assert!(!tree.accordions[0].open);

        let card = &tree.accordions[0].sections[0].cards[0];
        assert_eq!(card.body, CardBody::Phrase("Hello everyone!".into()));
        let speak = card.actions.speak.as_ref().unwrap();
        assert_eq!(speak.text, "Hello everyone!");
        assert_eq!(speak.lang.as_deref(), Some("it"));
        assert_eq!(card.actions.copy.as_deref(), Some("Hello everyone!"));
        assert!(card.actions.delete.is_none());
    }

    #[test]
    fn activity_strings_become_warnings_in_any_section() {
        let doc = parse_activities(
            r#"{"categories": [{"title": "Aqua", "sections": [
                {"title": "Music", "type": "playlist", "items": [
                    "Count heads before starting",
                    {"title": "Splash Hits", "artist": "Pool DJs", "usage": "warm-up"}
                ]},
                {"title": "Drills", "type": "routines", "items": [
                    {"title": "Circuit", "steps": ["Stretch", "Jump"]}
                ]},
                {"title": "Notes", "type": "freestyle", "items": [
                    {"name": "Volume", "description": "Keep it low", "cue": "softer now"}
                ]}
            ]}]}"#,
            "activities.json",
        )
        .unwrap();
        let tree = normalize_activities(doc);
        let sections = &tree.accordions[0].sections;

        assert_eq!(
            sections[0].cards[0].body,
            CardBody::Warning("Count heads before starting".into())
        );
        assert!(matches!(sections[0].cards[1].body, CardBody::Playlist { .. }));
        match &sections[1].cards[0].body {
            CardBody::Routine { title, steps } => {
                assert_eq!(title, "Circuit");
                assert_eq!(steps, &vec!["Stretch".to_string(), "Jump".to_string()]);
            }
            other => panic!("expected routine, got {other:?}"),
        }
        assert!(matches!(
            sections[2].cards[0].body,
            CardBody::Instruction { .. }
        ));

        for section in sections {
            for card in &section.cards {
                assert_eq!(card.actions, CardActions::default());
            }
        }
    }

    #[test]
    fn activity_headers_drop_empty_decorations() {
        let doc = parse_activities(
            r#"{"categories": [
                {"icon": "🏊", "title": "Aqua", "bpm_range": "125-135", "description": "Poolside sets."},
                {"icon": "", "title": "Stretch"}
            ]}"#,
            "activities.json",
        )
        .unwrap();
        let tree = normalize_activities(doc);

        let first = &tree.accordions[0];
        assert_eq!(first.header.icon.as_deref(), Some("🏊"));
        assert_eq!(first.header.annotation.as_deref(), Some("125-135"));
        assert_eq!(first.intro.as_deref(), Some("Poolside sets."));

        let second = &tree.accordions[1];
        assert!(second.header.icon.is_none());
        assert!(second.header.annotation.is_none());
        assert!(second.intro.is_none());
    }

    #[test]
    fn library_pairs_speak_primary_in_reference_language() {
        let doc = parse_library(
            r#"{"chapters": [{"title": "Basics", "topics": [
                {"title": "Hello", "phrases": [{"en": "Welcome", "ar": "Benvenuti"}]}
            ]}]}"#,
            "library.json",
        )
        .unwrap();
        let tree = normalize_library(doc);
        let card = &tree.accordions[0].sections[0].cards[0];

        assert_eq!(
            card.body,
            CardBody::Pair {
                primary: "Welcome".into(),
                translated: "Benvenuti".into()
            }
        );
        let lines = card.body.display_lines();
        assert_eq!(lines[0].tone, Tone::Strong);
        assert_eq!(lines[1].tone, Tone::Dim);

        let speak = card.actions.speak.as_ref().unwrap();
        assert_eq!(speak.text, "Welcome");
        assert_eq!(speak.lang.as_deref(), Some(REFERENCE_LANGUAGE));
        assert_eq!(card.actions.copy.as_deref(), Some("Welcome"));
    }

    #[test]
    fn notes_tree_is_open_and_indexed() {
        let notes = vec!["first".to_string(), "second".to_string()];
        let tree = build_notes_tree(&notes);

        assert_eq!(tree.accordions.len(), 1);
        assert!(tree.accordions[0].open);
        let cards = &tree.accordions[0].sections[0].cards;
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].actions.delete, Some(0));
        assert_eq!(cards[1].actions.delete, Some(1));
        let speak = cards[1].actions.speak.as_ref().unwrap();
        assert_eq!(speak.text, "second");
        assert!(speak.lang.is_none());
    }

    #[test]
    fn unknown_section_kind_falls_back_to_instruction() {
        assert_eq!(SectionKind::from_raw("playlist"), SectionKind::Playlist);
        assert_eq!(SectionKind::from_raw("routines"), SectionKind::Routine);
        assert_eq!(SectionKind::from_raw("routine"), SectionKind::Instruction);
        assert_eq!(SectionKind::from_raw(""), SectionKind::Instruction);
        assert_eq!(SectionKind::from_raw("mystery"), SectionKind::Instruction);
    }
}
