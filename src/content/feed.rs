/// Genre filtering over the feed DOM.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::filters::FilterList;

/// Feed root that receives incrementally loaded posts.
pub const FEED_ROOT_SELECTOR: &str = "#list-view-2";
/// One feed entry.
pub const POST_SELECTOR: &str = "article";
/// Genre label inside a post.
pub const GENRE_LABEL_SELECTOR: &str = ".section";
/// Genre category links in the sidebar.
pub const THUMBNAIL_SELECTOR: &str = ".thumbnail";

const DIMMED_OPACITY: &str = "0.15";
const FULL_OPACITY: &str = "1.0";

/// Genre of a post: the trimmed text of its label child, if it has one.
pub fn post_genre(post: &Element) -> Option<String> {
    let label = post.query_selector(GENRE_LABEL_SELECTOR).ok()??;
    Some(label.text_content().unwrap_or_default().trim().to_string())
}

/// Genre of a thumbnail: the trimmed text of its enclosing link.
pub fn thumbnail_genre(thumbnail: &Element) -> Option<String> {
    let link = thumbnail.closest("a").ok()??;
    Some(link.text_content().unwrap_or_default().trim().to_string())
}

/// Whether a post should be dropped from the feed. Entries with an empty id
/// are malformed or ads and go unconditionally; otherwise a post goes when
/// its genre label is on the filter list.
pub fn should_remove(id: &str, genre: Option<&str>, filters: &FilterList) -> bool {
    if id.is_empty() {
        return true;
    }
    match genre {
        Some(genre) => filters.contains(genre),
        None => false,
    }
}

/// Remove every filtered post currently in the DOM, then refresh thumbnail
/// dimming to match. Removal is irreversible.
pub fn sweep_posts(document: &Document, filters: &FilterList) {
    if let Ok(posts) = document.query_selector_all(POST_SELECTOR) {
        for i in 0..posts.length() {
            let Some(post) = posts.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let genre = post_genre(&post);
            if should_remove(&post.id(), genre.as_deref(), filters) {
                post.remove();
            }
        }
    }

    refresh_dimming(document, filters);
}

/// Dim the thumbnails of filtered genres, restore the rest. Presentational
/// only; thumbnails are never removed.
pub fn refresh_dimming(document: &Document, filters: &FilterList) {
    let Ok(thumbnails) = document.query_selector_all(THUMBNAIL_SELECTOR) else {
        return;
    };

    for i in 0..thumbnails.length() {
        let Some(thumbnail) = thumbnails.item(i).and_then(|n| n.dyn_into::<HtmlElement>().ok())
        else {
            continue;
        };
        let filtered = thumbnail_genre(&thumbnail).is_some_and(|g| filters.contains(&g));
        let opacity = if filtered { DIMMED_OPACITY } else { FULL_OPACITY };
        let _ = thumbnail.style().set_property("opacity", opacity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filters(genres: &[&str]) -> FilterList {
        let mut list = FilterList::new();
        for genre in genres {
            list.insert(genre);
        }
        list
    }

    #[test]
    fn test_filtered_genre_is_removed() {
        let filters = filters(&["Meme"]);

        assert!(should_remove("a1", Some("Meme"), &filters));
        assert!(!should_remove("a2", Some("Art"), &filters));
    }

    #[test]
    fn test_empty_id_is_always_removed() {
        let filters = filters(&[]);

        assert!(should_remove("", Some("Art"), &filters));
        assert!(should_remove("", None, &filters));
        assert!(should_remove("", Some(""), &filters));
    }

    #[test]
    fn test_post_without_genre_label_survives() {
        let filters = filters(&["Meme"]);

        assert!(!should_remove("a1", None, &filters));
    }

    #[test]
    fn test_meme_scenario_leaves_only_art() {
        let filters = filters(&["Meme"]);
        let posts = [
            ("a1", Some("Meme")),
            ("a2", Some("Art")),
            ("", Some("")),
        ];

        let survivors: Vec<_> = posts
            .iter()
            .filter(|(id, genre)| !should_remove(id, *genre, &filters))
            .collect();

        assert_eq!(survivors.len(), 1);
        assert_eq!(survivors[0].0, "a2");
    }

    #[test]
    fn test_sweep_decision_is_idempotent() {
        let filters = filters(&["Meme"]);
        let posts = [("a1", Some("Meme")), ("a2", Some("Art")), ("a3", None)];

        let first_pass: Vec<_> = posts
            .iter()
            .filter(|(id, genre)| !should_remove(id, *genre, &filters))
            .collect();
        let second_pass: Vec<_> = first_pass
            .iter()
            .filter(|(id, genre)| !should_remove(id, *genre, &filters))
            .collect();

        assert_eq!(second_pass.len(), first_pass.len());
    }
}
