//! Add Task Form Component
//!
//! Collapsed "Add task" button that expands into a title/description form.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_board_context;
use crate::models::{ColumnKey, TaskDraft};

/// Form for creating a task at the end of `column_key`
#[component]
pub fn AddTaskForm(column_key: ColumnKey) -> impl IntoView {
    let ctx = use_board_context();

    let (adding, set_adding) = signal(false);
    let (title, set_title) = signal(String::new());
    let (description, set_description) = signal(String::new());

    let (submitting, set_submitting) = signal(false);

    let create_task = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() { return; }
        let draft = TaskDraft::new(title.get_untracked(), description.get_untracked());
        // Blank fields: silently ignore the submit
        if draft.validated().is_none() { return; }

        set_submitting.set(true);
        spawn_local(async move {
            let created = ctx.create_task(column_key, draft).await;
            set_submitting.set(false);
            if created.is_some() {
                set_title.set(String::new());
                set_description.set(String::new());
                set_adding.set(false);
            }
        });
    };

    view! {
        <div class="add-task-container">
            <Show
                when=move || adding.get()
                fallback=move || view! {
                    <button class="add-task-btn" on:click=move |_| set_adding.set(true)>
                        <span>"Add task"</span>
                        <span class="plus">"+"</span>
                    </button>
                }
            >
                <form class="add-task-form" on:submit=create_task>
                    <input
                        class="add-task-input"
                        type="text"
                        placeholder="Add task title"
                        autofocus=true
                        prop:value=move || title.get()
                        on:input=move |ev| set_title.set(event_target_value(&ev))
                    />
                    <textarea
                        class="add-task-input"
                        placeholder="Add whatever you want"
                        prop:value=move || description.get()
                        on:input=move |ev| set_description.set(event_target_value(&ev))
                    />
                    <div class="add-task-actions">
                        <button type="submit" disabled=move || submitting.get()>
                            {move || if submitting.get() { "Adding..." } else { "Add" }}
                        </button>
                        <button type="button" on:click=move |_| set_adding.set(false)>"Close"</button>
                    </div>
                </form>
            </Show>
        </div>
    }
}
