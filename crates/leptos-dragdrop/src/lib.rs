//! Leptos DragDrop Utilities
//!
//! Simple drag-and-drop for Leptos using pointer and keyboard events.
//! Uses movement threshold to distinguish click from drag, and reports
//! the start / over / end phases of a gesture to the caller.
//!
//! Drop targets are either containers (e.g. a column's empty space) or
//! items inside them. When both are hovered, the item wins.
//!
//! Keyboard: Space or Enter on a focused item picks it up, arrow keys ask
//! the caller's `navigate` callback for the next target, Space or Enter
//! drops, Escape cancels.

use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// Bound shared by container keys and item ids
pub trait DndKey: Copy + PartialEq + Send + Sync + 'static {}

impl<T: Copy + PartialEq + Send + Sync + 'static> DndKey for T {}

/// Drop target types
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropTarget<C, I> {
    /// Pointer is over a container but not over any item in it
    Container(C),
    /// Pointer is over an item
    Item(I),
}

/// Reported every time the effective drop target changes mid-drag
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragOver<C, I> {
    pub active: I,
    pub over: DropTarget<C, I>,
    /// Vertical movement since the gesture started (px, down is positive).
    /// Keyboard moves report +1 / -1.
    pub delta_y: i32,
}

/// Reported once when the gesture finishes. `over` is None when the drop
/// happened outside any target or the drag was cancelled.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragEnd<C, I> {
    pub active: I,
    pub over: Option<DropTarget<C, I>>,
}

/// Arrow key pressed during a keyboard drag
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyDirection {
    Up,
    Down,
    Left,
    Right,
}

impl KeyDirection {
    pub fn delta_y(self) -> i32 {
        match self {
            KeyDirection::Up => -1,
            KeyDirection::Down => 1,
            KeyDirection::Left | KeyDirection::Right => 0,
        }
    }
}

/// Input to the keyboard navigation callback
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeyNav<C, I> {
    pub active: I,
    pub current: Option<DropTarget<C, I>>,
    pub direction: KeyDirection,
}

/// Gesture callbacks
#[derive(Clone)]
pub struct DndHandlers<C: DndKey, I: DndKey> {
    pub on_start: Callback<I>,
    pub on_over: Callback<DragOver<C, I>>,
    pub on_end: Callback<DragEnd<C, I>>,
    /// Next target for an arrow key; None keeps the current one
    pub navigate: Callback<KeyNav<C, I>, Option<DropTarget<C, I>>>,
}

/// DnD state signals
#[derive(Clone, Copy)]
pub struct DndSignals<C: DndKey, I: DndKey> {
    pub dragging_id_read: ReadSignal<Option<I>>,
    pub dragging_id_write: WriteSignal<Option<I>>,
    pub drop_target_read: ReadSignal<Option<DropTarget<C, I>>>,
    pub drop_target_write: WriteSignal<Option<DropTarget<C, I>>>,
    pub drag_just_ended_read: ReadSignal<bool>,
    pub drag_just_ended_write: WriteSignal<bool>,
    /// Pending item id (pointerdown but not yet dragging)
    pub pending_id_read: ReadSignal<Option<I>>,
    pub pending_id_write: WriteSignal<Option<I>>,
    /// Start position for movement detection
    pub start_x_read: ReadSignal<i32>,
    pub start_x_write: WriteSignal<i32>,
    pub start_y_read: ReadSignal<i32>,
    pub start_y_write: WriteSignal<i32>,
    /// Latest pointer position while a drag is pending or active (for overlays)
    pub pointer_x_read: ReadSignal<i32>,
    pub pointer_x_write: WriteSignal<i32>,
    pub pointer_y_read: ReadSignal<i32>,
    pub pointer_y_write: WriteSignal<i32>,
    /// True while the active drag is driven by the keyboard
    pub keyboard_drag_read: ReadSignal<bool>,
    pub keyboard_drag_write: WriteSignal<bool>,
    hovered_container: StoredValue<Option<C>>,
    hovered_item: StoredValue<Option<I>>,
    handlers: StoredValue<Option<DndHandlers<C, I>>>,
}

/// Movement threshold in pixels to start dragging
const DRAG_THRESHOLD_PX: i32 = 5;

/// How long `drag_just_ended` stays set after a drop (ms)
const JUST_ENDED_MS: i32 = 100;

pub fn create_dnd_signals<C: DndKey, I: DndKey>() -> DndSignals<C, I> {
    let (dragging_id_read, dragging_id_write) = signal(None::<I>);
    let (drop_target_read, drop_target_write) = signal(None::<DropTarget<C, I>>);
    let (drag_just_ended_read, drag_just_ended_write) = signal(false);
    let (pending_id_read, pending_id_write) = signal(None::<I>);
    let (start_x_read, start_x_write) = signal(0i32);
    let (start_y_read, start_y_write) = signal(0i32);
    let (pointer_x_read, pointer_x_write) = signal(0i32);
    let (pointer_y_read, pointer_y_write) = signal(0i32);
    let (keyboard_drag_read, keyboard_drag_write) = signal(false);
    DndSignals {
        dragging_id_read,
        dragging_id_write,
        drop_target_read,
        drop_target_write,
        drag_just_ended_read,
        drag_just_ended_write,
        pending_id_read,
        pending_id_write,
        start_x_read,
        start_x_write,
        start_y_read,
        start_y_write,
        pointer_x_read,
        pointer_x_write,
        pointer_y_read,
        pointer_y_write,
        keyboard_drag_read,
        keyboard_drag_write,
        hovered_container: StoredValue::new(None),
        hovered_item: StoredValue::new(None),
        handlers: StoredValue::new(None),
    }
}

/// Effective drop target for the current hover state
pub fn resolve_target<C, I>(container: Option<C>, item: Option<I>) -> Option<DropTarget<C, I>> {
    match (item, container) {
        (Some(id), _) => Some(DropTarget::Item(id)),
        (None, Some(key)) => Some(DropTarget::Container(key)),
        (None, None) => None,
    }
}

/// Does the pointer movement exceed the drag threshold?
pub fn exceeds_threshold(start: (i32, i32), current: (i32, i32)) -> bool {
    let dx = (current.0 - start.0).abs();
    let dy = (current.1 - start.1).abs();
    dx > DRAG_THRESHOLD_PX || dy > DRAG_THRESHOLD_PX
}

/// What a pointer release means
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Release<I> {
    /// No press in progress
    Idle,
    /// Pressed and released without crossing the threshold
    Click,
    /// An active drag finished on this item
    Drop(I),
}

pub fn release_action<I>(pending: Option<I>, dragging: Option<I>) -> Release<I> {
    match (dragging, pending) {
        (Some(active), _) => Release::Drop(active),
        (None, Some(_)) => Release::Click,
        (None, None) => Release::Idle,
    }
}

/// Keyboard command on a focused item
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCommand {
    PickUp,
    Drop,
    Move(KeyDirection),
}

/// Map a `KeyboardEvent.key` to a command. `dragging` tells whether a
/// keyboard drag is already active.
pub fn key_command(key: &str, dragging: bool) -> Option<KeyCommand> {
    let direction = match key {
        " " | "Enter" => return Some(if dragging { KeyCommand::Drop } else { KeyCommand::PickUp }),
        "ArrowUp" => KeyDirection::Up,
        "ArrowDown" => KeyDirection::Down,
        "ArrowLeft" => KeyDirection::Left,
        "ArrowRight" => KeyDirection::Right,
        _ => return None,
    };
    dragging.then_some(KeyCommand::Move(direction))
}

/// End drag operation
pub fn end_drag<C: DndKey, I: DndKey>(dnd: &DndSignals<C, I>) {
    dnd.dragging_id_write.set(None);
    dnd.drop_target_write.set(None);
    dnd.pending_id_write.set(None);
    dnd.keyboard_drag_write.set(false);
    dnd.drag_just_ended_write.set(true);

    if let Some(win) = web_sys::window() {
        let clear = dnd.drag_just_ended_write;
        let cb = Closure::<dyn FnMut()>::new(move || {
            clear.set(false);
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(cb.as_ref().unchecked_ref(), JUST_ENDED_MS);
        cb.forget();
    }
}

fn finish<C: DndKey, I: DndKey>(dnd: DndSignals<C, I>, active: I, over: Option<DropTarget<C, I>>) {
    end_drag(&dnd);
    if let Some(handlers) = dnd.handlers.get_value() {
        handlers.on_end.run(DragEnd { active, over });
    }
}

fn start<C: DndKey, I: DndKey>(dnd: DndSignals<C, I>, id: I) {
    dnd.pending_id_write.set(None);
    dnd.dragging_id_write.set(Some(id));
    if let Some(handlers) = dnd.handlers.get_value() {
        handlers.on_start.run(id);
    }
}

/// Recompute the drop target and report it if it changed mid-drag
fn refresh_target<C: DndKey, I: DndKey>(dnd: DndSignals<C, I>, client_y: i32) {
    let Some(active) = dnd.dragging_id_read.get_untracked() else { return };
    if dnd.keyboard_drag_read.get_untracked() {
        return;
    }
    let target = resolve_target(dnd.hovered_container.get_value(), dnd.hovered_item.get_value());
    if target == dnd.drop_target_read.get_untracked() {
        return;
    }
    dnd.drop_target_write.set(target);

    if let (Some(over), Some(handlers)) = (target, dnd.handlers.get_value()) {
        let delta_y = client_y - dnd.start_y_read.get_untracked();
        handlers.on_over.run(DragOver { active, over, delta_y });
    }
}

/// Create pointerdown handler for draggable items
/// Records pending drag with start position
pub fn make_on_pointerdown<C: DndKey, I: DndKey>(dnd: DndSignals<C, I>, item_id: I) -> impl Fn(web_sys::PointerEvent) + Copy + 'static {
    move |ev: web_sys::PointerEvent| {
        if ev.button() != 0 || !ev.is_primary() {
            return;
        }
        if let Some(target) = ev.target() {
            // Ignore if target is a form control
            if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() { return; }
            if target.dyn_ref::<web_sys::HtmlTextAreaElement>().is_some() { return; }
            if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() { return; }

            // Touch pointers are implicitly captured by the pressed element;
            // release so enter/leave fire on whatever is under the finger
            if let Some(el) = target.dyn_ref::<web_sys::Element>() {
                if el.has_pointer_capture(ev.pointer_id()) {
                    let _ = el.release_pointer_capture(ev.pointer_id());
                }
            }
        }
        dnd.pending_id_write.set(Some(item_id));
        dnd.start_x_write.set(ev.client_x());
        dnd.start_y_write.set(ev.client_y());
        dnd.pointer_x_write.set(ev.client_x());
        dnd.pointer_y_write.set(ev.client_y());
    }
}

/// Create keydown handler for focusable items
pub fn make_on_item_keydown<C: DndKey, I: DndKey>(dnd: DndSignals<C, I>, item_id: I) -> impl Fn(web_sys::KeyboardEvent) + Copy + 'static {
    move |ev: web_sys::KeyboardEvent| {
        let dragging = dnd.dragging_id_read.get_untracked();
        let keyboard = dnd.keyboard_drag_read.get_untracked() && dragging == Some(item_id);
        if dragging.is_some() && !keyboard {
            return;
        }
        let Some(command) = key_command(&ev.key(), keyboard) else { return };
        ev.prevent_default();

        match command {
            KeyCommand::PickUp => {
                dnd.keyboard_drag_write.set(true);
                start(dnd, item_id);
            }
            KeyCommand::Drop => finish(dnd, item_id, dnd.drop_target_read.get_untracked()),
            KeyCommand::Move(direction) => {
                let Some(handlers) = dnd.handlers.get_value() else { return };
                let current = dnd.drop_target_read.get_untracked();
                let next = handlers.navigate.run(KeyNav { active: item_id, current, direction });
                if let Some(over) = next.filter(|&next| Some(next) != current) {
                    dnd.drop_target_write.set(Some(over));
                    handlers.on_over.run(DragOver { active: item_id, over, delta_y: direction.delta_y() });
                }
            }
        }
    }
}

/// Create pointerenter handler for items
pub fn make_on_item_pointerenter<C: DndKey, I: DndKey>(dnd: DndSignals<C, I>, item_id: I) -> impl Fn(web_sys::PointerEvent) + Copy + 'static {
    move |ev: web_sys::PointerEvent| {
        dnd.hovered_item.set_value(Some(item_id));
        refresh_target(dnd, ev.client_y());
    }
}

/// Create pointerleave handler for items
pub fn make_on_item_pointerleave<C: DndKey, I: DndKey>(dnd: DndSignals<C, I>, item_id: I) -> impl Fn(web_sys::PointerEvent) + Copy + 'static {
    move |ev: web_sys::PointerEvent| {
        if dnd.hovered_item.get_value() == Some(item_id) {
            dnd.hovered_item.set_value(None);
        }
        refresh_target(dnd, ev.client_y());
    }
}

/// Create pointerenter handler for containers
pub fn make_on_container_pointerenter<C: DndKey, I: DndKey>(dnd: DndSignals<C, I>, key: C) -> impl Fn(web_sys::PointerEvent) + Copy + 'static {
    move |ev: web_sys::PointerEvent| {
        dnd.hovered_container.set_value(Some(key));
        refresh_target(dnd, ev.client_y());
    }
}

/// Create pointerleave handler for containers
pub fn make_on_container_pointerleave<C: DndKey, I: DndKey>(dnd: DndSignals<C, I>, key: C) -> impl Fn(web_sys::PointerEvent) + Copy + 'static {
    move |ev: web_sys::PointerEvent| {
        if dnd.hovered_container.get_value() == Some(key) {
            dnd.hovered_container.set_value(None);
        }
        refresh_target(dnd, ev.client_y());
    }
}

fn add_document_listener(event: &str, callback: &web_sys::js_sys::Function) {
    if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
        let _ = doc.add_event_listener_with_callback(event, callback);
    }
}

fn listen_pointer(event: &str, handler: impl FnMut(web_sys::PointerEvent) + 'static) {
    let closure = Closure::<dyn FnMut(web_sys::PointerEvent)>::new(handler);
    add_document_listener(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

fn listen_key(event: &str, handler: impl FnMut(web_sys::KeyboardEvent) + 'static) {
    let closure = Closure::<dyn FnMut(web_sys::KeyboardEvent)>::new(handler);
    add_document_listener(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Bind document pointermove - tracks the pointer and starts the drag once
/// the pending item has moved far enough
fn bind_global_pointermove<C: DndKey, I: DndKey>(dnd: DndSignals<C, I>) {
    listen_pointer("pointermove", move |ev: web_sys::PointerEvent| {
        let pending = dnd.pending_id_read.get_untracked();
        let dragging = dnd.dragging_id_read.get_untracked();
        if pending.is_none() && dragging.is_none() {
            return;
        }
        dnd.pointer_x_write.set(ev.client_x());
        dnd.pointer_y_write.set(ev.client_y());

        if let (Some(id), None) = (pending, dragging) {
            let start_pos = (dnd.start_x_read.get_untracked(), dnd.start_y_read.get_untracked());
            if exceeds_threshold(start_pos, (ev.client_x(), ev.client_y())) {
                start(dnd, id);
                refresh_target(dnd, ev.client_y());
            }
        }
    });
}

/// Bind document pointerup - finishes the gesture
fn bind_global_pointerup<C: DndKey, I: DndKey>(dnd: DndSignals<C, I>) {
    listen_pointer("pointerup", move |_ev: web_sys::PointerEvent| {
        if dnd.keyboard_drag_read.get_untracked() {
            return;
        }
        match release_action(dnd.pending_id_read.get_untracked(), dnd.dragging_id_read.get_untracked()) {
            Release::Drop(active) => finish(dnd, active, dnd.drop_target_read.get_untracked()),
            // Not dragging: click and dblclick fire naturally on the element
            Release::Click => dnd.pending_id_write.set(None),
            Release::Idle => {}
        }
    });
}

/// Bind document pointercancel and Escape - abort an active drag
fn bind_global_cancel<C: DndKey, I: DndKey>(dnd: DndSignals<C, I>) {
    let cancel = move || {
        dnd.pending_id_write.set(None);
        if let Some(active) = dnd.dragging_id_read.get_untracked() {
            finish(dnd, active, None);
        }
    };

    listen_pointer("pointercancel", move |_ev: web_sys::PointerEvent| {
        if !dnd.keyboard_drag_read.get_untracked() {
            cancel();
        }
    });
    listen_key("keydown", move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Escape" {
            cancel();
        }
    });
}

/// Register gesture callbacks and bind the document-level listeners
pub fn bind_dnd_handlers<C: DndKey, I: DndKey>(dnd: DndSignals<C, I>, handlers: DndHandlers<C, I>) {
    dnd.handlers.set_value(Some(handlers));
    bind_global_pointermove(dnd);
    bind_global_pointerup(dnd);
    bind_global_cancel(dnd);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_wins_over_container() {
        let target = resolve_target(Some("todo"), Some(7u32));
        assert_eq!(target, Some(DropTarget::Item(7)));
    }

    #[test]
    fn test_container_when_no_item() {
        let target = resolve_target(Some("todo"), None::<u32>);
        assert_eq!(target, Some(DropTarget::Container("todo")));
        assert_eq!(resolve_target(None::<&str>, None::<u32>), None);
    }

    #[test]
    fn test_threshold() {
        assert!(!exceeds_threshold((10, 10), (15, 15)));
        assert!(exceeds_threshold((10, 10), (16, 10)));
        assert!(exceeds_threshold((10, 10), (10, 4)));
    }

    #[test]
    fn test_plain_click_is_not_a_drop() {
        // a press that never crossed the threshold must not flag a drop,
        // otherwise the following click/dblclick gets swallowed
        assert_eq!(release_action(Some(3u32), None), Release::Click);
        assert_eq!(release_action(None::<u32>, None), Release::Idle);
    }

    #[test]
    fn test_release_after_drag_drops() {
        assert_eq!(release_action(None, Some(3u32)), Release::Drop(3));
        assert_eq!(release_action(Some(3u32), Some(3)), Release::Drop(3));
    }

    #[test]
    fn test_key_commands() {
        assert_eq!(key_command(" ", false), Some(KeyCommand::PickUp));
        assert_eq!(key_command("Enter", true), Some(KeyCommand::Drop));
        assert_eq!(key_command("ArrowLeft", true), Some(KeyCommand::Move(KeyDirection::Left)));
        assert_eq!(key_command("ArrowDown", false), None);
        assert_eq!(key_command("a", true), None);
    }

    #[test]
    fn test_key_direction_delta() {
        assert_eq!(KeyDirection::Down.delta_y(), 1);
        assert_eq!(KeyDirection::Up.delta_y(), -1);
        assert_eq!(KeyDirection::Right.delta_y(), 0);
    }
}
