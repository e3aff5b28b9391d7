//! Edit Task Modal Component
//!
//! Inline editor for the task selected by a double activation.

use leptos::prelude::*;

use crate::context::use_board_context;
use crate::models::{Task, TaskDraft};
use crate::store::{editing_task, lookup_task, set_editing_task};

/// Shows the edit form while a task is selected for editing
#[component]
pub fn EditTaskModal() -> impl IntoView {
    let ctx = use_board_context();

    // Only the selection is tracked; board changes must not reset the form
    let editing = move || editing_task(&ctx.store).and_then(|id| lookup_task(&ctx.store, id));

    move || editing().map(|task| view! { <EditTaskForm task=task /> })
}

#[component]
fn EditTaskForm(task: Task) -> impl IntoView {
    let ctx = use_board_context();
    let id = task.id;

    let (title, set_title) = signal(task.title);
    let (description, set_description) = signal(task.description);
    // Delete needs a second click; the footer swaps to Keep / Delete task
    let (confirming_delete, set_confirming_delete) = signal(false);

    let close = move || set_editing_task(&ctx.store, None);
    let save = move |_| {
        let draft = TaskDraft::new(title.get_untracked(), description.get_untracked());
        if ctx.edit_task(id, &draft) {
            close();
        }
    };

    view! {
        <div class="modal-backdrop">
            <div class="edit-task-modal">
                <label class="edit-label">"Title"</label>
                <input
                    class="edit-task-input"
                    type="text"
                    prop:value=move || title.get()
                    on:input=move |ev| set_title.set(event_target_value(&ev))
                />

                <label class="edit-label">"Description"</label>
                <textarea
                    class="edit-task-input"
                    prop:value=move || description.get()
                    on:input=move |ev| set_description.set(event_target_value(&ev))
                />

                <div class="modal-footer">
                    <Show
                        when=move || confirming_delete.get()
                        fallback=move || view! {
                            <button class="edit-delete-btn" on:click=move |_| set_confirming_delete.set(true)>
                                "Delete"
                            </button>
                            <button class="edit-task-btn" on:click=save>"Save"</button>
                            <button class="edit-task-btn" on:click=move |_| close()>"Close"</button>
                        }
                    >
                        <span class="delete-confirm">
                            <span class="delete-confirm-text">"Delete this task?"</span>
                        </span>
                        <button class="edit-task-btn" on:click=move |_| set_confirming_delete.set(false)>
                            "Keep"
                        </button>
                        <button class="edit-delete-btn" on:click=move |_| ctx.delete_task(id)>
                            "Delete task"
                        </button>
                    </Show>
                </div>
            </div>
        </div>
    }
}
