//! Kanban Board Component
//!
//! Lays out the columns and wires leptos-dragdrop gesture callbacks to the
//! board context.

use leptos::prelude::*;
use leptos_dragdrop::*;

use crate::components::{BoardColumn, DragOverlay, EditTaskModal};
use crate::context::use_board_context;
use crate::models::{ColumnKey, TaskId};
use crate::store::get_columns;

/// DnD signals for this board: columns are containers, tasks are items
pub type BoardDnd = DndSignals<ColumnKey, TaskId>;

#[component]
pub fn KanbanBoard() -> impl IntoView {
    let ctx = use_board_context();

    let dnd: BoardDnd = create_dnd_signals();
    bind_dnd_handlers(
        dnd,
        DndHandlers {
            on_start: Callback::new(move |id| ctx.on_drag_start(id)),
            on_over: Callback::new(move |ev| ctx.on_drag_over(ev)),
            on_end: Callback::new(move |ev| ctx.on_drag_end(ev)),
            navigate: Callback::new(move |nav| ctx.keyboard_target(nav)),
        },
    );
    provide_context(dnd);

    let columns = move || get_columns(&ctx.store);

    view! {
        <div class="board">
            <h1 class="board-title">"Task Board"</h1>

            <div class="columns-container">
                <For
                    each=columns
                    key=|column| column.key
                    children=move |column| view! { <BoardColumn column_key=column.key /> }
                />
            </div>

            <DragOverlay dnd=dnd />
            <EditTaskModal />
        </div>
    }
}
