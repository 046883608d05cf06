//! One list row: read-only display or inline editor.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rows are rebuilt from `RowView` on every change, so handlers are bound
//! fresh each render and always refer to the row's current index.

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;

use crate::app::TodoHandle;
use crate::controller::TodoListController;
use crate::state::todos::RowView;

/// Row for a single task, switching to the editor when `row.editing`.
#[component]
pub fn TodoItem(row: RowView) -> impl IntoView {
    let class = row_class(row.completed, row.editing);
    let body = if row.editing {
        view! { <TodoEditRow index=row.index text=row.text/> }.into_any()
    } else {
        view! { <TodoDisplayRow row=row/> }.into_any()
    };
    view! { <li class=class>{body}</li> }
}

#[component]
fn TodoDisplayRow(row: RowView) -> impl IntoView {
    let handle = expect_context::<TodoHandle>();
    let index = row.index;
    let checkbox_id = format!("todo-{}", row.id);

    view! {
        <div class="todo__row">
            <input
                class="todo__checkbox"
                type="checkbox"
                id=checkbox_id.clone()
                prop:checked=row.completed
                on:change=move |_| {
                    handle.run(|c| c.toggle_complete(index));
                }
            />
            <label class="todo__check-label" for=checkbox_id aria-label="Toggle task"></label>
            <span class="todo__text">{row.text}</span>
            <div class="todo__actions">
                <button
                    class="btn todo__edit"
                    title="Edit task"
                    on:click=move |_| {
                        handle.run(|c| c.begin_edit(index));
                    }
                >
                    "✎"
                </button>
                <button
                    class="btn todo__delete"
                    title="Delete task"
                    on:click=move |_| {
                        handle.run(|c| c.remove(index));
                    }
                >
                    "🗑"
                </button>
            </div>
        </div>
    }
}

#[component]
fn TodoEditRow(index: usize, text: String) -> impl IntoView {
    let handle = expect_context::<TodoHandle>();
    let max_len = handle.controller().with_untracked(|c| c.config().max_text_len);
    let value = RwSignal::new(text);
    let input_ref = NodeRef::<leptos::html::Input>::new();

    // Focus the editor with the caret after the existing text.
    #[cfg(feature = "csr")]
    {
        Effect::new(move || {
            if let Some(input) = input_ref.get() {
                let _ = input.focus();
                let end = u32::try_from(input.value().encode_utf16().count()).unwrap_or(u32::MAX);
                let _ = input.set_selection_range(end, end);
            }
        });
    }

    let save = move || {
        let text = value.get_untracked();
        handle.run(|c| c.commit_edit(index, &text));
    };
    let on_keydown = move |ev: leptos::ev::KeyboardEvent| match ev.key().as_str() {
        "Enter" => {
            ev.prevent_default();
            save();
        }
        "Escape" => {
            handle.run(TodoListController::cancel_edit);
        }
        _ => {}
    };

    view! {
        <div class="todo__row todo__row--edit">
            <input
                class="todo__edit-input"
                type="text"
                maxlength=max_len.to_string()
                node_ref=input_ref
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
                on:keydown=on_keydown
            />
            <div class="todo__actions">
                <button class="btn btn--primary todo__save" on:click=move |_| save()>
                    "Save"
                </button>
                <button
                    class="btn todo__cancel"
                    on:click=move |_| {
                        handle.run(TodoListController::cancel_edit);
                    }
                >
                    "Cancel"
                </button>
            </div>
        </div>
    }
}

/// CSS classes for a row container.
pub fn row_class(completed: bool, editing: bool) -> String {
    let mut class = String::from("todo");
    if completed {
        class.push_str(" todo--completed");
    }
    if editing {
        class.push_str(" todo--editing");
    }
    class
}

#[cfg(test)]
#[path = "todo_item_test.rs"]
mod tests;
