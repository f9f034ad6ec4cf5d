//! Edit Modal Component
//!
//! Dialog for the open edit session. Pressing outside the dialog cancels.

use leptos::prelude::*;

use crate::store::{store_cancel_edit, store_save_edit, store_set_draft, use_app_store, AppStateStoreFields};

#[component]
pub fn EditModal() -> impl IntoView {
    let store = use_app_store();

    let is_open = move || store.board().read().edit_session().is_some();
    let draft = move || {
        store
            .board()
            .read()
            .edit_session()
            .map(|e| e.draft.clone())
            .unwrap_or_default()
    };

    view! {
        <Show when=is_open>
            <div
                class="modal-backdrop"
                on:mousedown=move |ev: web_sys::MouseEvent| {
                    if ev.target() == ev.current_target() {
                        store_cancel_edit(&store);
                    }
                }
            >
                <div class="modal">
                    <input
                        type="text"
                        prop:value=draft
                        on:input=move |ev| store_set_draft(&store, event_target_value(&ev))
                    />
                    <div class="modal-actions">
                        <button on:click=move |_| store_save_edit(&store)>"Save"</button>
                        <button on:click=move |_| store_cancel_edit(&store)>"Cancel"</button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
