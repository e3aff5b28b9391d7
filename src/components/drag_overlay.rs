//! Drag Overlay Component
//!
//! Floating copy of the dragged task that follows the pointer. Keyboard
//! drags have no pointer to follow; the card itself is highlighted instead.

use leptos::prelude::*;

use crate::components::{BoardDnd, TaskContent};
use crate::context::use_board_context;
use crate::store::drag_session;

/// Offset from the pointer so the overlay does not cover the drop target
const OVERLAY_OFFSET_PX: i32 = 12;

#[component]
pub fn DragOverlay(dnd: BoardDnd) -> impl IntoView {
    let ctx = use_board_context();

    move || {
        let keyboard = dnd.keyboard_drag_read.get();
        drag_session(&ctx.store).filter(|_| !keyboard).map(|session| {
            let style = move || {
                format!(
                    "left: {}px; top: {}px;",
                    dnd.pointer_x_read.get() + OVERLAY_OFFSET_PX,
                    dnd.pointer_y_read.get() + OVERLAY_OFFSET_PX,
                )
            };
            view! {
                <div class="drag-overlay" style=style>
                    <TaskContent title=session.task.title.clone() description=session.task.description.clone() />
                </div>
            }
        })
    }
}
