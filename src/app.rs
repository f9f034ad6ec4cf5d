//! Task Board Frontend App
//!
//! Picks the page from the URL hash.

use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::components::{ListPage, TaskPage};
use crate::config::AppConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Page {
    /// `#/board`: seeded list, drag only
    List,
    /// Default: add, edit, two boards
    Tasks,
}

fn page_for_hash(hash: &str) -> Page {
    match hash.trim_start_matches('#').trim_end_matches('/') {
        "/board" | "board" => Page::List,
        _ => Page::Tasks,
    }
}

/// Pages bind document listeners for their whole lifetime, so a page switch reloads
fn reload_on_hash_change() {
    let Some(win) = web_sys::window() else { return };
    let on_hashchange = Closure::<dyn FnMut()>::new(move || {
        if let Some(win) = web_sys::window() {
            let _ = win.location().reload();
        }
    });
    let _ = win.add_event_listener_with_callback("hashchange", on_hashchange.as_ref().unchecked_ref());
    on_hashchange.forget();
}

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let hash = web_sys::window()
        .and_then(|w| w.location().hash().ok())
        .unwrap_or_default();
    let page = page_for_hash(&hash);
    log::info!("[APP] Showing {:?} page", page);
    reload_on_hash_change();

    match page {
        Page::List => view! { <ListPage config=config /> }.into_any(),
        Page::Tasks => view! { <TaskPage config=config /> }.into_any(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_for_hash() {
        assert_eq!(page_for_hash("#/board"), Page::List);
        assert_eq!(page_for_hash("#/board/"), Page::List);
        assert_eq!(page_for_hash("#board"), Page::List);
        assert_eq!(page_for_hash(""), Page::Tasks);
        assert_eq!(page_for_hash("#/task"), Page::Tasks);
    }
}
