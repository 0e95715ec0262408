/// Applies persisted playback settings to the page's videos.

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlVideoElement};

use crate::settings::PlaybackSettings;

/// Whether a video's controls attribute needs changing: `Some(true)` to add
/// it, `Some(false)` to remove it, `None` to leave it alone.
pub fn controls_update(enabled: bool, present: bool) -> Option<bool> {
    match (enabled, present) {
        (true, false) => Some(true),
        (false, true) => Some(false),
        _ => None,
    }
}

/// Push the settings onto every `<video>` currently in the DOM. Safe to call
/// repeatedly; the controls attribute is only touched when it disagrees.
pub fn apply(document: &Document, settings: &PlaybackSettings) {
    let Ok(videos) = document.query_selector_all("video") else {
        return;
    };

    for i in 0..videos.length() {
        let Some(video) = videos.item(i).and_then(|n| n.dyn_into::<HtmlVideoElement>().ok())
        else {
            continue;
        };

        video.set_volume(settings.effective_volume());

        match controls_update(settings.controls, video.has_attribute("controls")) {
            Some(true) => {
                let _ = video.set_attribute("controls", "controls");
            }
            Some(false) => {
                let _ = video.remove_attribute("controls");
            }
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_controls_update_only_touches_disagreement() {
        assert_eq!(controls_update(true, false), Some(true));
        assert_eq!(controls_update(false, true), Some(false));
        assert_eq!(controls_update(true, true), None);
        assert_eq!(controls_update(false, false), None);
    }

    #[test]
    fn test_popup_message_scenario() {
        // the popup pushed {volume: 40, mute: true, controls: false}
        let settings: PlaybackSettings =
            serde_json::from_str(r#"{"volume":40,"mute":true,"controls":false}"#).unwrap();

        // every video goes silent and loses its controls attribute
        assert_eq!(settings.effective_volume(), 0.0);
        assert_eq!(controls_update(settings.controls, true), Some(false));
        assert_eq!(controls_update(settings.controls, false), None);

        // and the snapshot persists verbatim under its three keys
        let json = serde_json::to_value(&settings).unwrap();
        assert_eq!(json["volume"], 40.0);
        assert_eq!(json["mute"], true);
        assert_eq!(json["controls"], false);
    }
}
