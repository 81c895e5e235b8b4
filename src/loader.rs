//! Document retrieval and the fetch → parse → normalize pipeline.

use std::path::PathBuf;

use tracing::debug;

use crate::config::Language;
use crate::content::{self, ContentError, ViewTree};

pub const ACTIVITIES_RESOURCE: &str = "activities.json";
pub const LIBRARY_RESOURCE: &str = "library.json";

/// Script documents are one file per language.
pub fn scripts_resource(language: Language) -> String {
    format!("content_{}.json", language.code())
}

/// Where documents come from: an HTTP base URL or a local directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    Remote { base: String },
    Local { root: PathBuf },
}

impl DocumentSource {
    /// A base with an HTTP scheme is fetched over the network, anything else
    /// is treated as a directory path.
    pub fn from_config(base: &str) -> Self {
        if base.starts_with("http://") || base.starts_with("https://") {
            DocumentSource::Remote {
                base: base.trim_end_matches('/').to_string(),
            }
        } else {
            DocumentSource::Local {
                root: PathBuf::from(base),
            }
        }
    }

    async fn fetch_text(&self, resource: &str) -> Result<String, ContentError> {
        match self {
            DocumentSource::Remote { base } => {
                let url = format!("{base}/{resource}");
                debug!(%url, "fetching document");
                let response = reqwest::get(url)
                    .await
                    .and_then(|response| response.error_for_status())
                    .map_err(|err| ContentError::transport(resource, err))?;
                response
                    .text()
                    .await
                    .map_err(|err| ContentError::transport(resource, err))
            }
            DocumentSource::Local { root } => {
                let path = root.join(resource);
                debug!(path = %path.display(), "reading document");
                tokio::fs::read_to_string(&path)
                    .await
                    .map_err(|err| ContentError::transport(resource, err))
            }
        }
    }
}

pub async fn load_scripts(
    source: DocumentSource,
    language: Language,
) -> Result<ViewTree, ContentError> {
    let resource = scripts_resource(language);
    let raw = source.fetch_text(&resource).await?;
    let doc = content::parse_scripts(&raw, &resource)?;
    Ok(content::normalize_scripts(doc, language.code()))
}

pub async fn load_activities(source: DocumentSource) -> Result<ViewTree, ContentError> {
    let raw = source.fetch_text(ACTIVITIES_RESOURCE).await?;
    let doc = content::parse_activities(&raw, ACTIVITIES_RESOURCE)?;
    Ok(content::normalize_activities(doc))
}

pub async fn load_library(source: DocumentSource) -> Result<ViewTree, ContentError> {
    let raw = source.fetch_text(LIBRARY_RESOURCE).await?;
    let doc = content::parse_library(&raw, LIBRARY_RESOURCE)?;
    Ok(content::normalize_library(doc))
}
