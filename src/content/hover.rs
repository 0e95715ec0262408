/// Hover-to-toggle interaction on genre thumbnails.
///
/// Hovering a thumbnail for a moment previews a lock icon; clicking while
/// the preview shows toggles that genre's filter instead of navigating.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event, HtmlImageElement};

use super::feed;
use crate::storage;

/// How long a thumbnail must be hovered before the preview icon shows.
pub const PREVIEW_DELAY_MS: i32 = 250;

const LOCKED_ICON: &str =
    "https://upload.wikimedia.org/wikipedia/commons/thumb/c/c5/OOjs_UI_icon_lock-ltr.svg/1024px-OOjs_UI_icon_lock-ltr.svg.png";
const UNLOCKED_ICON: &str =
    "https://upload.wikimedia.org/wikipedia/commons/thumb/e/e2/Unlock_icon.svg/1024px-Unlock_icon.svg.png";

/// Icon reflecting a genre's current filter state.
pub fn preview_icon(filtered: bool) -> &'static str {
    if filtered { LOCKED_ICON } else { UNLOCKED_ICON }
}

/// One in-flight hover. The original icon src doubles as the sentinel the
/// delayed check compares against, and as the restore value on mouse-leave.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverSession {
    pub original_icon: String,
    pub started_at: f64,
}

/// Single global slot: at most one thumbnail is in hover-preview state at a
/// time.
#[derive(Debug, Default)]
pub struct HoverSlot {
    current: Option<HoverSession>,
}

impl HoverSlot {
    pub fn new() -> Self {
        HoverSlot { current: None }
    }

    /// Begin a hover if the slot is free. Returns false when another
    /// thumbnail already holds it.
    pub fn begin(&mut self, icon: &str, now: f64) -> bool {
        if self.current.is_some() {
            return false;
        }
        self.current = Some(HoverSession {
            original_icon: icon.to_string(),
            started_at: now,
        });
        true
    }

    /// The delayed check: preview only if the icon is still the one recorded
    /// at mouse-enter. A mouse-leave in the meantime cleared the slot, so a
    /// stale check does nothing and the icon never flashes.
    pub fn should_preview(&self, current_icon: &str) -> bool {
        self.current
            .as_ref()
            .is_some_and(|session| session.original_icon == current_icon)
    }

    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    /// End the hover, handing back the session so the caller can restore the
    /// original icon.
    pub fn end(&mut self) -> Option<HoverSession> {
        self.current.take()
    }
}

/// Wire hover and click handlers onto every thumbnail. The shared slot keeps
/// at most one preview active across the page.
pub fn wire_thumbnails(document: &Document, slot: Rc<RefCell<HoverSlot>>) -> Result<(), JsValue> {
    let thumbnails = document.query_selector_all(feed::THUMBNAIL_SELECTOR)?;

    for i in 0..thumbnails.length() {
        let Some(thumbnail) = thumbnails.item(i).and_then(|n| n.dyn_into::<Element>().ok())
        else {
            continue;
        };
        let Some(genre) = feed::thumbnail_genre(&thumbnail) else {
            continue;
        };
        let Some(icon) = thumbnail
            .first_element_child()
            .and_then(|c| c.dyn_into::<HtmlImageElement>().ok())
        else {
            continue;
        };

        attach(&thumbnail, genre, icon, slot.clone())?;
    }

    Ok(())
}

fn attach(
    thumbnail: &Element,
    genre: String,
    icon: HtmlImageElement,
    slot: Rc<RefCell<HoverSlot>>,
) -> Result<(), JsValue> {
    // Click only intercepts while the preview is showing; otherwise the
    // link navigates as usual.
    {
        let slot = slot.clone();
        let genre = genre.clone();
        let on_click = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            if slot.borrow().is_active() {
                event.prevent_default();
                event.stop_propagation();
                super::toggle_filter(genre.clone());
            }
        });
        thumbnail.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
    }

    // Mouse-enter claims the slot and schedules the preview check.
    {
        let slot = slot.clone();
        let icon = icon.clone();
        let on_enter = Closure::<dyn FnMut()>::new(move || {
            let src = icon.src();
            if slot.borrow_mut().begin(&src, js_sys::Date::now()) {
                schedule_preview_check(slot.clone(), icon.clone(), genre.clone());
            }
        });
        thumbnail
            .add_event_listener_with_callback("mouseenter", on_enter.as_ref().unchecked_ref())?;
        on_enter.forget();
    }

    // Mouse-leave restores the icon, frees the slot and recomputes dimming.
    {
        let on_leave = Closure::<dyn FnMut()>::new(move || {
            if let Some(session) = slot.borrow_mut().end() {
                icon.set_src(&session.original_icon);
                log::debug!(
                    "hover ended after {:.0}ms",
                    js_sys::Date::now() - session.started_at
                );
            }
            super::refresh_dimming();
        });
        thumbnail
            .add_event_listener_with_callback("mouseleave", on_leave.as_ref().unchecked_ref())?;
        on_leave.forget();
    }

    Ok(())
}

fn schedule_preview_check(slot: Rc<RefCell<HoverSlot>>, icon: HtmlImageElement, genre: String) {
    let check = Closure::once_into_js(move || {
        if !slot.borrow().should_preview(&icon.src()) {
            return;
        }
        spawn_local(async move {
            let filters = match storage::load_filters().await {
                Ok(filters) => filters,
                Err(err) => {
                    super::alert(&super::error_message(&err));
                    return;
                }
            };
            // re-check: the user may have left while the read was in flight
            if slot.borrow().should_preview(&icon.src()) {
                icon.set_src(preview_icon(filters.contains(&genre)));
            }
        });
    });

    if let Some(window) = web_sys::window() {
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            check.unchecked_ref(),
            PREVIEW_DELAY_MS,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_admits_one_hover_at_a_time() {
        let mut slot = HoverSlot::new();

        assert!(slot.begin("a.png", 0.0));
        assert!(!slot.begin("b.png", 1.0));
        assert!(slot.is_active());
    }

    #[test]
    fn test_preview_fires_when_sentinel_unchanged() {
        let mut slot = HoverSlot::new();
        slot.begin("a.png", 0.0);

        assert!(slot.should_preview("a.png"));
        assert!(!slot.should_preview("b.png"));
    }

    #[test]
    fn test_leave_before_delay_skips_preview() {
        let mut slot = HoverSlot::new();
        slot.begin("a.png", 0.0);

        let session = slot.end().unwrap();
        assert_eq!(session.original_icon, "a.png");
        // the 250ms check now sees an empty slot and does nothing
        assert!(!slot.should_preview("a.png"));
        assert!(!slot.is_active());
    }

    #[test]
    fn test_slot_is_reusable_after_end() {
        let mut slot = HoverSlot::new();
        slot.begin("a.png", 0.0);
        slot.end();

        assert!(slot.begin("b.png", 2.0));
        assert!(slot.should_preview("b.png"));
    }

    #[test]
    fn test_preview_icon_reflects_filter_state() {
        assert_eq!(preview_icon(true), LOCKED_ICON);
        assert_eq!(preview_icon(false), UNLOCKED_ICON);
    }
}
