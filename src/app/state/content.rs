//! Per-view document lifecycle.

use crate::content::ViewTree;

/// One fetched document: in flight, usable, or failed with the resource name
/// so the view can say which file went missing.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadStatus {
    Loading,
    Ready(ViewTree),
    Failed { resource: String },
}

impl LoadStatus {
    pub fn tree_mut(&mut self) -> Option<&mut ViewTree> {
        match self {
            LoadStatus::Ready(tree) => Some(tree),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct ContentState {
    pub(in crate::app) scripts: LoadStatus,
    pub(in crate::app) activities: LoadStatus,
    pub(in crate::app) library: LoadStatus,
}

impl Default for ContentState {
    fn default() -> Self {
        ContentState {
            scripts: LoadStatus::Loading,
            activities: LoadStatus::Loading,
            library: LoadStatus::Loading,
        }
    }
}
