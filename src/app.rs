//! Kanban Board App
//!
//! Root component: owns the board store and kicks off the initial load.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::components::KanbanBoard;
use crate::config::BoardConfig;
use crate::context::BoardContext;
use crate::store::BoardState;

#[component]
pub fn App(config: BoardConfig) -> impl IntoView {
    let store = Store::new(BoardState::default());

    // Provide context to all children
    let ctx = BoardContext::new(store, config);
    provide_context(ctx);

    // Load tasks once on mount
    Effect::new(move |_| ctx.load());

    view! {
        <main class="app-layout">
            <KanbanBoard />
        </main>
    }
}
