/// Content agent: runs inside the feed page.
///
/// Filters posts by genre, keeps thumbnail dimming in sync, applies playback
/// settings to every video and listens for settings pushed from the popup.

pub mod feed;
pub mod hover;
pub mod observer;
pub mod video;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, console};

use crate::settings::PlaybackSettings;
use crate::{bridge, storage};

/// Entry point for the content script. Failures here are surfaced to the
/// user; a broken init would otherwise leave the feed silently unfiltered.
pub fn init() {
    console::log_1(&"feed-warden content agent starting".into());

    if let Err(err) = try_init() {
        alert(&error_message(&format!("{err:?}")));
    }
}

fn try_init() -> Result<(), JsValue> {
    let document = document().ok_or_else(|| JsValue::from_str("document unavailable"))?;

    let slot = Rc::new(RefCell::new(hover::HoverSlot::new()));
    hover::wire_thumbnails(&document, slot)?;
    observer::start(&document)?;
    listen_for_settings();
    refresh();

    Ok(())
}

/// Full pass: sweep filtered posts, refresh dimming, re-apply playback
/// settings. Runs at init and again whenever the feed grows.
pub(crate) fn refresh() {
    spawn_local(async {
        let Some(document) = document() else { return };

        match storage::load_filters().await {
            Ok(filters) => feed::sweep_posts(&document, &filters),
            Err(err) => alert(&error_message(&err)),
        }

        match storage::load_settings().await {
            Ok(settings) => video::apply(&document, &settings),
            Err(err) => alert(&error_message(&err)),
        }
    });
}

/// Recompute thumbnail dimming only; used after a hover restores an icon.
pub(crate) fn refresh_dimming() {
    spawn_local(async {
        let Some(document) = document() else { return };

        match storage::load_filters().await {
            Ok(filters) => feed::refresh_dimming(&document, &filters),
            Err(err) => alert(&error_message(&err)),
        }
    });
}

/// Toggle a genre's filter from the hover interaction.
pub(crate) fn toggle_filter(genre: String) {
    spawn_local(add_filter(genre));
}

/// Put a genre on the filter list, persist and sweep. A genre that is
/// already filtered comes back off instead; clicking a locked thumbnail
/// unlocks it.
pub(crate) async fn add_filter(genre: String) {
    let mut filters = match storage::load_filters().await {
        Ok(filters) => filters,
        Err(err) => {
            alert(&error_message(&err));
            return;
        }
    };

    if !filters.insert(&genre) {
        remove_filter(genre).await;
        return;
    }

    log::info!("filtering genre {genre:?}");
    if let Err(err) = storage::save_filters(&filters).await {
        alert(&error_message(&err));
        return;
    }
    refresh();
}

/// Take a genre off the filter list, persist and sweep. No-op if absent.
pub(crate) async fn remove_filter(genre: String) {
    let mut filters = match storage::load_filters().await {
        Ok(filters) => filters,
        Err(err) => {
            alert(&error_message(&err));
            return;
        }
    };

    filters.remove(&genre);
    log::info!("unfiltering genre {genre:?}");

    if let Err(err) = storage::save_filters(&filters).await {
        alert(&error_message(&err));
        return;
    }
    refresh();
}

/// Settings pushed from the popup land here: apply to every video right away
/// and persist the snapshot verbatim.
fn listen_for_settings() {
    let callback = Closure::<dyn FnMut(JsValue)>::new(|message: JsValue| {
        let settings: PlaybackSettings = match serde_wasm_bindgen::from_value(message) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("ignoring unrecognized message: {err}");
                return;
            }
        };

        if let Some(document) = document() {
            video::apply(&document, &settings);
        }

        spawn_local(async move {
            if let Err(err) = storage::save_settings(&settings).await {
                alert(&error_message(&err));
            }
        });
    });

    bridge::onRuntimeMessage(callback.as_ref().unchecked_ref());
    callback.forget();
}

fn document() -> Option<Document> {
    web_sys::window().and_then(|w| w.document())
}

/// User-facing text for a failed storage operation. Every storage failure in
/// the content agent goes through this one surface.
pub(crate) fn error_message(err: &str) -> String {
    format!("Error: {err}")
}

pub(crate) fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_carries_the_cause() {
        assert_eq!(
            error_message("Failed to read storage: timeout"),
            "Error: Failed to read storage: timeout"
        );
    }
}
