/// Watches the feed root for incrementally loaded posts.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, MutationObserver, MutationObserverInit};

use super::feed;

/// High-water mark of children seen under the feed root. The feed only needs
/// re-filtering when it grows; shrinkage (including our own sweeps) must not
/// re-trigger.
#[derive(Debug, Default)]
pub struct PostCounter {
    seen: usize,
}

impl PostCounter {
    pub fn new() -> Self {
        PostCounter { seen: 0 }
    }

    /// Record the current child count. Returns true only when the count
    /// strictly exceeds the previous mark.
    pub fn update(&mut self, count: usize) -> bool {
        if count > self.seen {
            self.seen = count;
            true
        } else {
            false
        }
    }
}

/// Observe direct child additions under the feed root and re-run filtering
/// and playback application on growth. Attribute and subtree churn is
/// ignored. A page without the feed root gets no observer; that is a normal
/// state, not an error.
pub fn start(document: &Document) -> Result<(), JsValue> {
    let Some(root) = document.query_selector(feed::FEED_ROOT_SELECTOR)? else {
        log::debug!("feed root not found; skipping mutation watcher");
        return Ok(());
    };

    let counter = Rc::new(RefCell::new(PostCounter::new()));
    let callback = Closure::<dyn FnMut()>::new({
        let root = root.clone();
        move || {
            let count = root.child_nodes().length() as usize;
            if counter.borrow_mut().update(count) {
                log::debug!("feed grew to {count} children; re-filtering");
                super::refresh();
            }
        }
    });

    let observer = MutationObserver::new(callback.as_ref().unchecked_ref())?;
    let options = MutationObserverInit::new();
    options.set_child_list(true);
    observer.observe_with_options(&root, &options)?;
    callback.forget();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_growth_triggers_exactly_once() {
        let mut counter = PostCounter::new();
        counter.update(5);

        assert!(counter.update(8));
        assert!(!counter.update(8));
    }

    #[test]
    fn test_shrinkage_does_not_trigger() {
        let mut counter = PostCounter::new();
        counter.update(8);

        assert!(!counter.update(5));
        // a sweep dropped posts; the next load has to beat the old mark
        assert!(!counter.update(8));
        assert!(counter.update(9));
    }

    #[test]
    fn test_first_observation_counts_as_growth() {
        let mut counter = PostCounter::new();

        assert!(counter.update(5));
    }
}
