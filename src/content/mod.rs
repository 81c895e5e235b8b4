//! Content pipeline: wire documents in, normalized view trees out.

pub mod documents;
pub mod normalize;
pub mod search;
pub mod tree;

use std::fmt;

use thiserror::Error;

pub use documents::{parse_activities, parse_library, parse_scripts};
pub use normalize::{build_notes_tree, normalize_activities, normalize_library, normalize_scripts};
pub use search::apply_filter;
pub use tree::{
    AccordionNode, CardNode, HeaderContent, Line, SectionNode, SpeakSpec, Tone, ViewTree,
};

/// Failure while obtaining or decoding a document. Carries the resource name
/// so the failing view can say which file went missing.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("error loading {resource}: {message}")]
    Transport { resource: String, message: String },
    #[error("error loading {resource}: {message}")]
    Malformed { resource: String, message: String },
}

impl ContentError {
    pub fn transport(resource: &str, err: impl fmt::Display) -> Self {
        ContentError::Transport {
            resource: resource.to_string(),
            message: err.to_string(),
        }
    }

    pub fn malformed(resource: &str, err: impl fmt::Display) -> Self {
        ContentError::Malformed {
            resource: resource.to_string(),
            message: err.to_string(),
        }
    }

    pub fn resource(&self) -> &str {
        match self {
            ContentError::Transport { resource, .. }
            | ContentError::Malformed { resource, .. } => resource,
        }
    }
}
