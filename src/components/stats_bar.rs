//! Task counts and the empty-list placeholder.

use leptos::prelude::*;

use crate::app::TodoHandle;
use crate::state::todos::TodoStats;

/// Total / active / completed counters.
#[component]
pub fn StatsBar() -> impl IntoView {
    let handle = expect_context::<TodoHandle>();
    let stats = move || handle.controller().with(|c| c.state().stats());

    view! {
        <div class="stats">
            <span class="stats__item">
                <span class="stats__value">{move || stats().total}</span>
                " total"
            </span>
            <span class="stats__divider"></span>
            <span class="stats__item">
                <span class="stats__value">{move || stats().active}</span>
                " active"
            </span>
            <span class="stats__divider"></span>
            <span class="stats__item">
                <span class="stats__value">{move || stats().completed}</span>
                " completed"
            </span>
        </div>
    }
}

/// Placeholder shown exactly when the list is empty.
#[component]
pub fn EmptyState() -> impl IntoView {
    let handle = expect_context::<TodoHandle>();
    let class = move || empty_state_class(&handle.controller().with(|c| c.state().stats()));

    view! {
        <div class=class>
            <p class="empty-state__title">"No tasks yet"</p>
            <p class="empty-state__hint">"Add your first task above to get started."</p>
        </div>
    }
}

/// `visible` only when there are no tasks at all.
pub fn empty_state_class(stats: &TodoStats) -> &'static str {
    if stats.total == 0 { "empty-state empty-state--visible" } else { "empty-state empty-state--hidden" }
}

#[cfg(test)]
#[path = "stats_bar_test.rs"]
mod tests;
