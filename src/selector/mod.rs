//! Selector Catalogues
//!
//! Fixed, ordered CSS selector tables used by the locator, the cleaner and the
//! metadata extractor. Order is significant: earlier entries win.
//!
//! Every lookup goes through [`select_each`], which skips a selector the
//! parser rejects instead of aborting the whole pass.

use dom_query::{NodeRef, Selection};

pub mod content;
pub mod discard;
pub mod meta;

/// Visit the matches of each selector in catalogue order, then document order.
///
/// The visitor returns `Some` to stop early. Invalid selectors are logged at
/// `trace` level and skipped.
pub fn select_each<'a, T, F>(root: &Selection<'a>, selectors: &[&'static str], mut visit: F) -> Option<T>
where
    F: FnMut(&'static str, NodeRef<'a>) -> Option<T>,
{
    for selector in selectors {
        let Some(found) = root.try_select(selector) else {
            tracing::trace!(selector, "selector skipped (no match or unsupported)");
            continue;
        };
        for node in found.nodes() {
            if let Some(result) = visit(selector, *node) {
                return Some(result);
            }
        }
    }
    None
}
