//! Stack of transient notification banners.
//!
//! Banners are redrawn from `NotificationState` whenever it changes; the
//! fade is a CSS animation keyed off the `alert--fading` modifier.

use leptos::prelude::*;

use crate::app::TodoHandle;
use crate::state::notifications::{BannerPhase, Severity};

#[component]
pub fn NotificationStack() -> impl IntoView {
    let handle = expect_context::<TodoHandle>();

    view! {
        <div class="alert-container" aria-live="polite">
            {move || {
                handle
                    .notifications()
                    .get()
                    .banners
                    .into_iter()
                    .map(|banner| {
                        let id = banner.id;
                        view! {
                            <div class=banner_class(banner.severity, banner.phase) role="alert">
                                <strong class="alert__icon">{banner.severity.icon()}</strong>
                                <span class="alert__message">{banner.message}</span>
                                <button
                                    class="alert__close"
                                    aria-label="Close"
                                    on:click=move |_| handle.dismiss(id)
                                >
                                    "×"
                                </button>
                            </div>
                        }
                    })
                    .collect::<Vec<_>>()
            }}
        </div>
    }
}

/// CSS classes for one banner.
pub fn banner_class(severity: Severity, phase: BannerPhase) -> String {
    let mut class = format!("alert {}", severity.css_class());
    if phase == BannerPhase::Fading {
        class.push_str(" alert--fading");
    }
    class
}

#[cfg(test)]
#[path = "notification_stack_test.rs"]
mod tests;
