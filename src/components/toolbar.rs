//! Top bar with theme toggle, backup export/import and clear-all.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every action goes through the shared `TodoHandle`; nothing here reads or
//! writes document attributes or storage directly.

use leptos::prelude::*;

use crate::app::TodoHandle;
use crate::controller::TodoListController;
use crate::state::notifications::Notice;
use crate::state::ui::UiState;
use crate::util::transfer;

/// Widget toolbar.
#[component]
pub fn Toolbar() -> impl IntoView {
    let handle = expect_context::<TodoHandle>();
    let ui = expect_context::<RwSignal<UiState>>();

    let theme = move || handle.controller().with(TodoListController::theme);

    let on_theme = move |_| {
        handle.run(TodoListController::toggle_theme);
    };

    let on_export = move |_| export_backup(handle);

    let on_import = move |ev: leptos::ev::Event| {
        #[cfg(feature = "csr")]
        {
            let Some(file) = transfer::selected_file(&ev) else {
                return;
            };
            leptos::task::spawn_local(async move {
                match transfer::read_file_text(file).await {
                    Ok(text) => {
                        handle.run(|c| c.import_all(&text));
                    }
                    Err(err) => {
                        log::warn!("import read failed: {err}");
                        handle.notify(Notice::danger("Import failed: the file could not be read."));
                    }
                }
                ui.update(|u| u.import_seq += 1);
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (ev, ui);
        }
    };

    let on_clear = move |_| {
        if handle.controller().with_untracked(|c| c.state().is_empty()) {
            return;
        }
        let confirmed = transfer::confirm("Delete all tasks? This cannot be undone.");
        handle.run(|c| c.clear_all(confirmed));
    };

    view! {
        <div class="toolbar">
            <span class="toolbar__title">"To-Do List"</span>
            <span class="toolbar__spacer"></span>

            <button class="btn toolbar__export" on:click=on_export title="Download a JSON backup">
                "Export"
            </button>
            <label class="btn toolbar__import" title="Restore from a JSON backup">
                "Import"
                // Re-created after each import so picking the same file again fires `change`.
                {move || {
                    let _ = ui.get().import_seq;
                    view! {
                        <input
                            class="toolbar__import-input"
                            type="file"
                            accept=".json,application/json"
                            on:change=on_import
                        />
                    }
                }}
            </label>
            <button class="btn toolbar__clear" on:click=on_clear title="Delete every task">
                "Clear all"
            </button>

            <span class="toolbar__divider"></span>

            <button class="btn toolbar__dark-toggle" on:click=on_theme title="Toggle dark mode">
                {move || theme().toggle_icon()}
            </button>
        </div>
    }
}

fn export_backup(handle: TodoHandle) {
    let exported = handle
        .controller()
        .with_untracked(|c| c.export_all().map(|json| (json, c.config().export_filename.clone())));
    match exported {
        Ok((json, filename)) => match transfer::download_json(&filename, &json) {
            Ok(()) => handle.notify(Notice::success("Tasks exported.")),
            Err(err) => {
                log::warn!("export download failed: {err}");
                handle.notify(Notice::danger("Export failed: the download could not start."));
            }
        },
        Err(err) => handle.notify(Notice::from(&err)),
    }
}
