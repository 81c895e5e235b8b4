//! Live containment filter over a view tree.
//!
//! Mutates only the `visible` and `open` flags. The open flag is sticky:
//! once a match forces an accordion open it stays open until toggled by hand.

use tracing::trace;

use super::tree::{ViewTree, search_fold};

pub fn apply_filter(tree: &mut ViewTree, query: &str) {
    let folded = search_fold(query);
    if folded.is_empty() {
        for accordion in &mut tree.accordions {
            for section in &mut accordion.sections {
                for card in &mut section.cards {
                    card.visible = true;
                }
            }
        }
        return;
    }

    // Single-character queries filter but never auto-open.
    let sticky = query.chars().count() > 1;
    let mut shown = 0usize;
    for accordion in &mut tree.accordions {
        let mut any_match = false;
        for section in &mut accordion.sections {
            for card in &mut section.cards {
                card.visible = card.haystack.contains(&folded);
                if card.visible {
                    any_match = true;
                    shown += 1;
                }
            }
        }
        if sticky && any_match {
            accordion.open = true;
        }
    }
    trace!(query = %query, shown, "applied search filter");
}
