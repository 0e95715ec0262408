/// Bindings to the JavaScript glue over the WebExtension APIs.

use wasm_bindgen::prelude::*;

#[wasm_bindgen(module = "/bridge.js")]
extern "C" {
    /// `browser.storage.local.get`; pass `JsValue::NULL` for the whole object.
    #[wasm_bindgen(catch)]
    pub async fn getStorage(keys: JsValue) -> Result<JsValue, JsValue>;

    /// `browser.storage.local.set`; merges the given keys into storage.
    #[wasm_bindgen(catch)]
    pub async fn setStorage(items: JsValue) -> Result<(), JsValue>;

    /// `browser.tabs.query` restricted to a URL pattern.
    #[wasm_bindgen(catch)]
    pub async fn queryTabs(pattern: &str) -> Result<JsValue, JsValue>;

    /// One-way `browser.tabs.sendMessage`; no response is awaited.
    #[wasm_bindgen(catch)]
    pub async fn sendTabMessage(tab_id: i32, message: JsValue) -> Result<(), JsValue>;

    /// Registers a `browser.runtime.onMessage` listener.
    pub fn onRuntimeMessage(callback: &js_sys::Function);
}
