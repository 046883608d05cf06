//! Root application component and the shared controller handle.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};

use crate::config::WidgetConfig;
use crate::controller::{Outcome, TodoListController};
use crate::pages::todos::TodosPage;
use crate::state::notifications::{Notice, NotificationState};
use crate::state::ui::UiState;
use crate::util::{dark_mode, storage};

/// Copyable handle to the one controller instance plus the banner stack.
///
/// Provided via context; every component that wires input events receives
/// the same handle instead of reaching for globals.
#[derive(Clone, Copy)]
pub struct TodoHandle {
    controller: RwSignal<TodoListController>,
    notifications: RwSignal<NotificationState>,
}

impl TodoHandle {
    pub fn new(controller: TodoListController) -> Self {
        Self { controller: RwSignal::new(controller), notifications: RwSignal::new(NotificationState::default()) }
    }

    pub fn controller(&self) -> RwSignal<TodoListController> {
        self.controller
    }

    pub fn notifications(&self) -> RwSignal<NotificationState> {
        self.notifications
    }

    /// Apply one controller operation and surface its notice.
    ///
    /// Subscribers are only notified when the outcome reports a change, so a
    /// rejected edit keeps the user's draft in the open editor.
    pub fn run(&self, op: impl FnOnce(&mut TodoListController) -> Outcome) -> Outcome {
        let outcome = self.controller.try_update_untracked(op).unwrap_or_default();
        if outcome.changed {
            self.controller.notify();
        }
        if let Some(notice) = outcome.notice.clone() {
            self.notify(notice);
        }
        outcome
    }

    /// Show a banner that fades after the configured delay and is then
    /// removed. Banners are timed independently of each other.
    pub fn notify(&self, notice: Notice) {
        let Some(id) = self.notifications.try_update(|n| n.push(notice)) else {
            return;
        };
        #[cfg(feature = "csr")]
        {
            let (delay_ms, fade_ms) = self
                .controller
                .with_untracked(|c| (c.config().notice_delay_ms, c.config().notice_fade_ms));
            let notifications = self.notifications;
            gloo_timers::callback::Timeout::new(delay_ms, move || {
                let _ = notifications.try_update(|n| n.begin_fade(id));
                gloo_timers::callback::Timeout::new(fade_ms, move || {
                    let _ = notifications.try_update(|n| n.remove(id));
                })
                .forget();
            })
            .forget();
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = id;
        }
    }

    /// Remove a banner immediately (close button).
    pub fn dismiss(&self, id: u64) {
        let _ = self.notifications.try_update(|n| n.remove(id));
    }
}

/// Build the controller from build-time config, falling back to defaults.
fn build_controller() -> TodoListController {
    let config = WidgetConfig::from_env().unwrap_or_else(|err| {
        log::warn!("invalid widget config, using defaults: {err}");
        WidgetConfig::default()
    });
    let store = storage::open_store(config.persist);
    TodoListController::new(config, store)
}

/// Root application component.
///
/// Constructs the controller once and provides it to the page.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let handle = TodoHandle::new(build_controller());
    let ui = RwSignal::new(UiState::default());

    provide_context(handle);
    provide_context(ui);

    Effect::new(move || dark_mode::apply(handle.controller().with(TodoListController::theme)));

    view! {
        <Title text="To-Do List"/>
        <TodosPage/>
    }
}

/// WASM entry point: install logging and mount `<App/>` into `<body>`.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn mount() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Info) {
        leptos::logging::warn!("console logger already set: {err}");
    }
    leptos::mount::mount_to_body(App);
}

#[cfg(test)]
#[path = "app_test.rs"]
mod tests;
