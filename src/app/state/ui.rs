//! Search box and transient notification state.

use std::time::Instant;

#[derive(Debug, Default)]
pub struct SearchState {
    pub(in crate::app) query: String,
}

/// A short-lived confirmation shown after copying to the clipboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub(in crate::app) message: String,
    pub(in crate::app) deadline: Instant,
}
