/// Typed access to `browser.storage.local` via the JS bridge.

use js_sys::Reflect;
use wasm_bindgen::JsValue;

use crate::bridge;
use crate::filters::FilterList;
use crate::settings::PlaybackSettings;

pub const FILTERS_KEY: &str = "filters";
const SETTINGS_KEYS: [&str; 3] = ["volume", "mute", "controls"];

/// Read the persisted filter list. A missing or ill-typed value reads as an
/// empty list, which is what a fresh install looks like.
pub async fn load_filters() -> Result<FilterList, String> {
    let keys = serde_wasm_bindgen::to_value(&[FILTERS_KEY])
        .map_err(|e| format!("Failed to serialize storage keys: {e}"))?;
    let stored = bridge::getStorage(keys)
        .await
        .map_err(|e| format!("Failed to read storage: {e:?}"))?;

    let value = Reflect::get(&stored, &JsValue::from_str(FILTERS_KEY))
        .map_err(|e| format!("Failed to read storage object: {e:?}"))?;

    if value.is_undefined() || value.is_null() {
        return Ok(FilterList::new());
    }

    Ok(serde_wasm_bindgen::from_value(value).unwrap_or_else(|e| {
        log::warn!("stored filter list is not a string array ({e}); treating as empty");
        FilterList::new()
    }))
}

/// Persist the filter list: read the whole storage object, swap the one key
/// and write the object back. Two rapid toggles can both read the pre-toggle
/// list; that lost update is accepted.
pub async fn save_filters(filters: &FilterList) -> Result<(), String> {
    let stored = bridge::getStorage(JsValue::NULL)
        .await
        .map_err(|e| format!("Failed to read storage: {e:?}"))?;

    let value = serde_wasm_bindgen::to_value(filters)
        .map_err(|e| format!("Failed to serialize filters: {e}"))?;
    Reflect::set(&stored, &JsValue::from_str(FILTERS_KEY), &value)
        .map_err(|e| format!("Failed to update storage object: {e:?}"))?;

    bridge::setStorage(stored)
        .await
        .map_err(|e| format!("Failed to write storage: {e:?}"))
}

/// Read the persisted playback settings; missing keys take their defaults.
pub async fn load_settings() -> Result<PlaybackSettings, String> {
    let keys = serde_wasm_bindgen::to_value(&SETTINGS_KEYS)
        .map_err(|e| format!("Failed to serialize storage keys: {e}"))?;
    let stored = bridge::getStorage(keys)
        .await
        .map_err(|e| format!("Failed to read storage: {e:?}"))?;

    serde_wasm_bindgen::from_value(stored)
        .map_err(|e| format!("Failed to parse settings: {e}"))
}

/// Persist a settings snapshot verbatim under its three keys. `set` merges,
/// so the filter list is untouched.
pub async fn save_settings(settings: &PlaybackSettings) -> Result<(), String> {
    let items = serde_wasm_bindgen::to_value(settings)
        .map_err(|e| format!("Failed to serialize settings: {e}"))?;

    bridge::setStorage(items)
        .await
        .map_err(|e| format!("Failed to write storage: {e:?}"))
}
