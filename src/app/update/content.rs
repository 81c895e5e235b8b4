//! Handlers for document load completions.

use tracing::{info, warn};

use crate::app::state::{App, LoadStatus};
use crate::config::Language;
use crate::content::ViewTree;

impl App {
    /// A document for a language the user has already moved away from is
    /// dropped; the in-flight fetch for the new language owns the slot.
    pub(super) fn handle_scripts_loaded(&mut self, language: Language, tree: ViewTree) {
        if language != self.language {
            info!(arrived = %language, active = %self.language, "discarding stale scripts document");
            return;
        }
        info!(accordions = tree.accordions.len(), "scripts ready");
        self.content.scripts = LoadStatus::Ready(tree);
    }

    pub(super) fn handle_scripts_failed(
        &mut self,
        language: Language,
        resource: String,
        error: String,
    ) {
        if language != self.language {
            info!(arrived = %language, active = %self.language, "discarding stale scripts failure");
            return;
        }
        warn!(%resource, %error, "scripts load failed");
        self.content.scripts = LoadStatus::Failed { resource };
    }

    pub(super) fn handle_activities_loaded(&mut self, tree: ViewTree) {
        info!(accordions = tree.accordions.len(), "activities ready");
        self.content.activities = LoadStatus::Ready(tree);
    }

    pub(super) fn handle_activities_failed(&mut self, resource: String, error: String) {
        warn!(%resource, %error, "activities load failed");
        self.content.activities = LoadStatus::Failed { resource };
    }

    pub(super) fn handle_library_loaded(&mut self, tree: ViewTree) {
        info!(accordions = tree.accordions.len(), "library ready");
        self.content.library = LoadStatus::Ready(tree);
    }

    pub(super) fn handle_library_failed(&mut self, resource: String, error: String) {
        warn!(%resource, %error, "library load failed");
        self.content.library = LoadStatus::Failed { resource };
    }
}
