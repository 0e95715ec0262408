/// Popup UI: volume slider, mute toggle and controls checkbox. Every change
/// is broadcast immediately to all open feed tabs.

use patternfly_yew::prelude::*;
use serde::Deserialize;
use url::Url;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::bridge;
use crate::settings::PlaybackSettings;
use crate::storage;

/// Tab query pattern for pages showing the feed.
pub const FEED_URL_PATTERN: &str = "https://9gag.com/*";
const FEED_HOST: &str = "9gag.com";

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct FeedTab {
    id: i32,
    #[serde(default)]
    url: Option<String>,
}

/// Keep only tabs whose URL really is on the feed host. The query pattern
/// already narrows the list; the host check guards against pattern drift.
fn feed_tabs(tabs: Vec<FeedTab>) -> Vec<FeedTab> {
    tabs.into_iter()
        .filter(|tab| {
            tab.url
                .as_deref()
                .and_then(|u| Url::parse(u).ok())
                .and_then(|u| u.host_str().map(|host| host == FEED_HOST))
                .unwrap_or(false)
        })
        .collect()
}

/// Fire-and-forget the settings snapshot to every feed tab. Per-tab failures
/// are logged and skipped; a tab that navigated away just misses the update.
async fn broadcast(settings: PlaybackSettings) {
    let tabs_js = match bridge::queryTabs(FEED_URL_PATTERN).await {
        Ok(tabs) => tabs,
        Err(err) => {
            log::error!("tab query failed: {err:?}");
            return;
        }
    };

    let tabs: Vec<FeedTab> = match serde_wasm_bindgen::from_value(tabs_js) {
        Ok(tabs) => tabs,
        Err(err) => {
            log::error!("failed to parse tab list: {err}");
            return;
        }
    };

    let message = match serde_wasm_bindgen::to_value(&settings) {
        Ok(message) => message,
        Err(err) => {
            log::error!("failed to serialize settings: {err}");
            return;
        }
    };

    for tab in feed_tabs(tabs) {
        if let Err(err) = bridge::sendTabMessage(tab.id, message.clone()).await {
            log::warn!("send to tab {} failed: {:?}", tab.id, err);
        }
    }
}

#[function_component(Popup)]
pub fn popup() -> Html {
    let settings = use_state(PlaybackSettings::default);
    let load_error = use_state(|| None::<String>);

    // Pre-populate the controls from storage on popup open
    {
        let settings = settings.clone();
        let load_error = load_error.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match storage::load_settings().await {
                    Ok(stored) => settings.set(stored),
                    Err(err) => load_error.set(Some(err)),
                }
            });
            || ()
        });
    }

    let on_volume = {
        let settings = settings.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlInputElement = event.target_unchecked_into();
            let volume = input.value().parse().unwrap_or(100.0);
            let next = PlaybackSettings {
                volume,
                ..(*settings).clone()
            };
            settings.set(next.clone());
            spawn_local(broadcast(next));
        })
    };

    let on_mute = {
        let settings = settings.clone();
        Callback::from(move |_: MouseEvent| {
            let next = PlaybackSettings {
                mute: !settings.mute,
                ..(*settings).clone()
            };
            settings.set(next.clone());
            spawn_local(broadcast(next));
        })
    };

    let on_controls = {
        let settings = settings.clone();
        Callback::from(move |event: Event| {
            let input: HtmlInputElement = event.target_unchecked_into();
            let next = PlaybackSettings {
                controls: input.checked(),
                ..(*settings).clone()
            };
            settings.set(next.clone());
            spawn_local(broadcast(next));
        })
    };

    html! {
        <div class="padding-20">
            <h1 class="popup-title">{"Feed Warden"}</h1>

            if let Some(err) = (*load_error).clone() {
                <Alert r#type={AlertType::Danger} title={"Could not load settings"} inline={true}>
                    {err}
                </Alert>
            }

            <div class="control-row">
                <span class="material-icons volume_icon" onclick={on_mute}>
                    { if settings.mute { "volume_off" } else { "volume_up" } }
                </span>
                <input
                    type="range"
                    id="volume"
                    min="0"
                    max="100"
                    value={settings.volume.to_string()}
                    oninput={on_volume}
                />
            </div>

            <div class="control-row">
                <label for="controls">{"Show player controls"}</label>
                <input
                    type="checkbox"
                    id="controls"
                    checked={settings.controls}
                    onchange={on_controls}
                />
            </div>

            <p class="footer-popup">
                {"Feed Warden v0.1.0"}
            </p>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tab(id: i32, url: Option<&str>) -> FeedTab {
        FeedTab {
            id,
            url: url.map(str::to_string),
        }
    }

    #[test]
    fn test_feed_tabs_keeps_only_feed_host() {
        let tabs = vec![
            tab(1, Some("https://9gag.com/hot")),
            tab(2, Some("https://example.com/9gag.com")),
            tab(3, Some("https://9gag.com/")),
        ];

        let kept = feed_tabs(tabs);

        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].id, 1);
        assert_eq!(kept[1].id, 3);
    }

    #[test]
    fn test_feed_tabs_drops_missing_or_bad_urls() {
        let tabs = vec![tab(1, None), tab(2, Some("not a url"))];

        assert!(feed_tabs(tabs).is_empty());
    }
}
