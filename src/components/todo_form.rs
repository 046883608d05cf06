//! Add-task form.

use leptos::prelude::*;

use crate::app::TodoHandle;
use crate::state::ui::UiState;

/// Text input plus submit button. Clears itself after a successful add and
/// keeps focus on rejection so the user can retype.
#[component]
pub fn TodoForm() -> impl IntoView {
    let handle = expect_context::<TodoHandle>();
    let ui = expect_context::<RwSignal<UiState>>();
    let input_ref = NodeRef::<leptos::html::Input>::new();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let draft = ui.get_untracked().draft;
        let outcome = handle.run(|c| c.add(&draft));
        if outcome.changed {
            ui.update(|u| u.draft.clear());
        } else {
            #[cfg(feature = "csr")]
            {
                if let Some(input) = input_ref.get_untracked() {
                    let _ = input.focus();
                }
            }
        }
    };

    view! {
        <form class="todo-form" on:submit=on_submit>
            <input
                class="todo-form__input"
                type="text"
                placeholder="What needs to be done?"
                node_ref=input_ref
                prop:value=move || ui.get().draft
                on:input=move |ev| ui.update(|u| u.draft = event_target_value(&ev))
                autofocus=true
            />
            <button class="btn btn--primary todo-form__submit" type="submit">
                "Add"
            </button>
        </form>
    }
}
