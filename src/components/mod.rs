//! UI Components
//!
//! Leptos components of the board view.

mod add_task_form;
mod board_column;
mod board_view;
mod drag_overlay;
mod edit_task_modal;
mod task_card;

pub use add_task_form::AddTaskForm;
pub use board_column::BoardColumn;
pub use board_view::{BoardDnd, KanbanBoard};
pub use drag_overlay::DragOverlay;
pub use edit_task_modal::EditTaskModal;
pub use task_card::{TaskCard, TaskContent};
