//! Global Application State
//!
//! Reactive state management using Leptos signals.

use leptos::*;

use crate::api::HttpClient;
use crate::config::UiConfig;
use crate::overlay::{create_dom_overlay, SharedOverlay};
use crate::state::toasts::{ToastKind, ToastQueue};

/// Global application state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    pub config: UiConfig,
    /// Backend client shared by the page controllers
    pub client: HttpClient,
    /// The one celebration overlay for the whole page
    pub overlay: SharedOverlay,
    /// Last balance the backend reported
    pub balance: RwSignal<Option<f64>>,
    /// Global loading state
    pub loading: RwSignal<bool>,
    /// Notices on screen, oldest first
    pub toasts: RwSignal<ToastQueue>,
}

/// Provide global state to the component tree
pub fn provide_global_state(config: UiConfig) {
    let state = GlobalState {
        client: HttpClient::new(config.api.base_url.clone()),
        overlay: create_dom_overlay(config.overlay.fallback()),
        config,
        balance: create_rw_signal(None),
        loading: create_rw_signal(false),
        toasts: create_rw_signal(ToastQueue::default()),
    };

    provide_context(state);
}

impl GlobalState {
    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.notify(ToastKind::Success, message);
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.notify(ToastKind::Error, message);
    }

    pub fn dismiss_toast(&self, id: u64) {
        self.toasts.update(|queue| {
            queue.dismiss(id);
        });
    }

    fn notify(&self, kind: ToastKind, message: &str) {
        let mut id = 0;
        self.toasts.update(|queue| id = queue.push(kind, message));

        let toasts = self.toasts;
        gloo_timers::callback::Timeout::new(kind.lifetime_ms(), move || {
            toasts.update(|queue| {
                queue.dismiss(id);
            });
        })
        .forget();
    }
}
