//! Toast Notification Component
//!
//! Stacked success and error notices. Click one to dismiss it early.

use leptos::*;

use crate::state::global::GlobalState;
use crate::state::{ToastEntry, ToastKind};

/// Toast notification container
#[component]
pub fn Toast() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let toasts = state.toasts;

    view! {
        <div class="fixed bottom-6 right-4 z-50 space-y-2">
            <For
                each=move || toasts.with(|queue| queue.entries().to_vec())
                key=|toast| toast.id
                children=move |toast| {
                    let state = state.clone();
                    let id = toast.id;
                    view! {
                        <ToastMessage
                            toast=toast
                            on_dismiss=Callback::new(move |_: ()| state.dismiss_toast(id))
                        />
                    }
                }
            />
        </div>
    }
}

#[component]
fn ToastMessage(toast: ToastEntry, on_dismiss: Callback<()>) -> impl IntoView {
    let (icon, bg_class) = match toast.kind {
        ToastKind::Success => ("✓", "bg-green-600"),
        ToastKind::Error => ("✕", "bg-red-600"),
    };

    view! {
        <div
            role=toast.kind.role()
            class=format!(
                "flex items-center space-x-3 {} text-white px-4 py-3 rounded-lg shadow-lg \
                 cursor-pointer animate-slide-in",
                bg_class
            )
            on:click=move |_| on_dismiss.call(())
        >
            <span class="text-lg">{icon}</span>
            <span class="text-sm font-medium">{toast.message}</span>
        </div>
    }
}
