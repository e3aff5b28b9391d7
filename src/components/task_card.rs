//! Task Card Component
//!
//! Draggable card. Double-click (mouse) or double-tap (touch) opens the
//! edit form. Focused cards can be picked up with Space or Enter.

use leptos::prelude::*;
use leptos_dragdrop::*;

use crate::components::BoardDnd;
use crate::context::use_board_context;
use crate::gesture::DoubleTap;
use crate::models::Task;
use crate::store::set_editing_task;

/// Title and description block, shared with the drag overlay
#[component]
pub fn TaskContent(title: String, description: String) -> impl IntoView {
    view! {
        <div class="task-content">
            <h5>{title}</h5>
            <hr class="bold-hr" />
            <p>{description}</p>
        </div>
    }
}

#[component]
pub fn TaskCard(task: Task) -> impl IntoView {
    let ctx = use_board_context();
    let dnd = expect_context::<BoardDnd>();
    let id = task.id;

    let start_drag = make_on_pointerdown(dnd, id);
    let on_pointerenter = make_on_item_pointerenter(dnd, id);
    let on_pointerleave = make_on_item_pointerleave(dnd, id);
    let on_keydown = make_on_item_keydown(dnd, id);

    let open_editor = move || {
        // the release ending a drag can land as a click on the card
        if dnd.drag_just_ended_read.get_untracked() { return; }
        set_editing_task(&ctx.store, Some(id));
    };

    let detector = StoredValue::new(DoubleTap::new(ctx.double_tap_window_ms()));
    let on_pointerdown = move |ev: web_sys::PointerEvent| {
        if ev.pointer_type() == "touch" {
            let now = js_sys::Date::now();
            if detector.try_update_value(|d| d.tap(id, now)).unwrap_or(false) {
                open_editor();
                return;
            }
        }
        start_drag(ev);
    };

    let card_class = move || {
        let mut c = String::from("task-card");
        if dnd.dragging_id_read.get() == Some(id) {
            c.push_str(" dragging");
            if dnd.keyboard_drag_read.get() { c.push_str(" lifted"); }
        }
        if matches!(dnd.drop_target_read.get(), Some(DropTarget::Item(tid)) if tid == id) {
            c.push_str(" drop-target");
        }
        c
    };

    view! {
        <div
            class=card_class
            tabindex="0"
            on:pointerdown=on_pointerdown
            on:pointerenter=on_pointerenter
            on:pointerleave=on_pointerleave
            on:keydown=on_keydown
            on:dblclick=move |_| open_editor()
        >
            <TaskContent title=task.title.clone() description=task.description.clone() />
        </div>
    }
}
