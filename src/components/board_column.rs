//! Board Column Component
//!
//! One lane of the board. The delete column renders as a trash drop zone
//! without a header or add form.

use leptos::prelude::*;
use leptos_dragdrop::*;

use crate::components::{AddTaskForm, BoardDnd, TaskCard};
use crate::context::use_board_context;
use crate::models::ColumnKey;
use crate::store::column_tasks;

#[component]
pub fn BoardColumn(column_key: ColumnKey) -> impl IntoView {
    let ctx = use_board_context();
    let dnd = expect_context::<BoardDnd>();

    let tasks = move || column_tasks(&ctx.store, column_key);
    let is_delete = column_key == ColumnKey::Delete;

    let on_pointerenter = make_on_container_pointerenter(dnd, column_key);
    let on_pointerleave = make_on_container_pointerleave(dnd, column_key);

    let column_class = move || {
        let mut c = String::from("column");
        if is_delete { c.push_str(" delete-column"); }
        if matches!(dnd.drop_target_read.get(), Some(DropTarget::Container(key)) if key == column_key) {
            c.push_str(" drop-target");
        }
        c
    };

    view! {
        <section
            class=column_class
            data-column=column_key.as_str()
            on:pointerenter=on_pointerenter
            on:pointerleave=on_pointerleave
        >
            {(!is_delete).then(|| view! {
                <div class="column-header">
                    <h2>{column_key.title()}</h2>
                    <span class="task-count">{move || tasks().len()}</span>
                </div>
            })}

            <div class="task-list">
                <For
                    each=tasks
                    key=|task| (task.id, task.title.clone(), task.description.clone())
                    children=move |task| view! { <TaskCard task=task /> }
                />
            </div>

            {is_delete.then(|| view! {
                <div class="trash-icon" title="Drop a task here to delete it">"🗑"</div>
            })}

            {(!is_delete).then(|| view! { <AddTaskForm column_key=column_key /> })}
        </section>
    }
}
