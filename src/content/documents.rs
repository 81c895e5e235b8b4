//! Wire schemas for the three document families.
//!
//! Required structure is limited to the top-level containers and the script
//! nesting; every leaf field is tolerated when missing so hand-edited content
//! files degrade to blank spots instead of load failures.

use serde::Deserialize;

use super::ContentError;

/// Scripts: modules → categories → phrase strings.
#[derive(Debug, Deserialize)]
pub struct ScriptDocument {
    pub modules: Vec<ScriptModule>,
}

#[derive(Debug, Deserialize)]
pub struct ScriptModule {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub categories: Vec<ScriptCategory>,
}

#[derive(Debug, Deserialize)]
pub struct ScriptCategory {
    #[serde(default)]
    pub title: String,
    pub phrases: Vec<String>,
}

/// Activities: categories → sections → polymorphic items.
#[derive(Debug, Deserialize)]
pub struct ActivityDocument {
    pub categories: Vec<ActivityCategory>,
}

#[derive(Debug, Deserialize)]
pub struct ActivityCategory {
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub bpm_range: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub sections: Vec<ActivitySection>,
}

#[derive(Debug, Deserialize)]
pub struct ActivitySection {
    #[serde(default)]
    pub title: String,
    /// Free-form on the wire; mapped to the closed section kinds during
    /// normalization, unknown values render their entries as instructions.
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub items: Vec<ActivityItemRaw>,
}

/// An item is either a bare string or a keyed entry. Which entry fields are
/// meaningful depends on the owning section's kind.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ActivityItemRaw {
    Text(String),
    Entry(ActivityEntry),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ActivityEntry {
    pub title: String,
    pub artist: String,
    pub usage: String,
    pub steps: Vec<String>,
    pub name: String,
    pub description: String,
    pub cue: String,
}

/// Library: chapters → topics → phrase pairs.
#[derive(Debug, Deserialize)]
pub struct LibraryDocument {
    pub chapters: Vec<LibraryChapter>,
}

#[derive(Debug, Deserialize)]
pub struct LibraryChapter {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub topics: Vec<LibraryTopic>,
}

#[derive(Debug, Deserialize)]
pub struct LibraryTopic {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub phrases: Vec<PhrasePair>,
}

/// Pairs accept both the current field names and the legacy `en`/`ar`
/// spelling still present in older content files.
#[derive(Debug, Deserialize)]
pub struct PhrasePair {
    #[serde(default, alias = "en")]
    pub primary: String,
    #[serde(default, alias = "ar")]
    pub translated: String,
}

pub fn parse_scripts(raw: &str, resource: &str) -> Result<ScriptDocument, ContentError> {
    serde_json::from_str(raw).map_err(|err| ContentError::malformed(resource, err))
}

pub fn parse_activities(raw: &str, resource: &str) -> Result<ActivityDocument, ContentError> {
    serde_json::from_str(raw).map_err(|err| ContentError::malformed(resource, err))
}

pub fn parse_library(raw: &str, resource: &str) -> Result<LibraryDocument, ContentError> {
    serde_json::from_str(raw).map_err(|err| ContentError::malformed(resource, err))
}
