/// Feed Warden - browser extension that filters a video feed by genre and
/// keeps playback preferences in sync across tabs.
/// Built with Rust + WASM + Yew

mod bridge;
pub mod content;
pub mod filters;
pub mod settings;
mod storage;
pub mod ui;

use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::Popup>::new().render();
}

// Run the content agent inside the feed page
#[wasm_bindgen]
pub fn start_content() {
    content::init();
}
