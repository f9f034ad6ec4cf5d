//! New Task Form Component
//!
//! Text input plus "Add Task" button. Blank text is rejected and stays in the input.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use crate::store::{store_add_task, store_clear_new_flags, use_app_store, AppStateStoreFields};

/// Length of the card entry animation
const NEW_FLAG_MS: u32 = 300;

#[component]
pub fn NewTaskForm() -> impl IntoView {
    let store = use_app_store();
    // Latest entry-animation timer; replacing it drops (cancels) the previous one
    let new_flag_timer = StoredValue::new_local(None::<Timeout>);

    let add_task = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if store_add_task(&store).is_some() {
            let generation = store.board().read_untracked().new_generation();
            let timer = Timeout::new(NEW_FLAG_MS, move || store_clear_new_flags(&store, generation));
            new_flag_timer.set_value(Some(timer));
        }
    };

    view! {
        <form class="new-task-form" on:submit=add_task>
            <input
                type="text"
                placeholder="Enter a task"
                prop:value=move || store.new_task_text().get()
                on:input=move |ev| *store.new_task_text().write() = event_target_value(&ev)
            />
            <button type="submit">"Add Task"</button>
        </form>
    }
}
