//! The to-do list screen.
//!
//! SYSTEM CONTEXT
//! ==============
//! The list is redrawn in full from controller state on every change; rows
//! carry no state of their own beyond the inline editor's draft.

use leptos::prelude::*;

use crate::app::TodoHandle;
use crate::components::notification_stack::NotificationStack;
use crate::components::stats_bar::{EmptyState, StatsBar};
use crate::components::todo_form::TodoForm;
use crate::components::todo_item::TodoItem;
use crate::components::toolbar::Toolbar;

/// Single-page to-do widget.
#[component]
pub fn TodosPage() -> impl IntoView {
    let handle = expect_context::<TodoHandle>();
    let rows = move || handle.controller().with(|c| c.state().rows());

    view! {
        <div class="todos-page">
            <NotificationStack/>
            <header class="todos-page__header">
                <Toolbar/>
            </header>
            <main class="todos-page__body">
                <TodoForm/>
                <StatsBar/>
                <ul class="todo-list">
                    {move || {
                        rows()
                            .into_iter()
                            .map(|row| view! { <TodoItem row=row/> })
                            .collect::<Vec<_>>()
                    }}
                </ul>
                <EmptyState/>
            </main>
        </div>
    }
}
