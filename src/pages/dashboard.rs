//! Dashboard Page
//!
//! Balance, sleep chart and the good-things feed.

use std::rc::Rc;

use leptos::*;

use crate::api::HttpClient;
use crate::components::{InlineLoading, OthersList, OwnList, SleepChart};
use crate::controllers::{BootReport, DashboardController, DashboardState};
use crate::state::global::GlobalState;

type Controller = Rc<DashboardController<HttpClient>>;

/// Toast text for the sections that failed to load
fn failure_message(report: &BootReport) -> Option<String> {
    if report.is_ok() {
        return None;
    }
    let details: Vec<String> = report
        .failures
        .iter()
        .map(|(section, e)| format!("{}: {}", section, e))
        .collect();
    Some(format!("Failed to load {}", details.join("; ")))
}

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let controller: Controller = Rc::new(DashboardController::new(
        state.client.clone(),
        state.config.feed.others_limit,
    ));
    let view_state = create_rw_signal(DashboardState::default());

    // Boot on mount
    let state_for_effect = state.clone();
    let controller_for_effect = controller.clone();
    create_effect(move |_| {
        let state = state_for_effect.clone();
        let controller = controller_for_effect.clone();
        spawn_local(async move {
            state.loading.set(true);

            let report = controller.boot().await;
            let snapshot = controller.snapshot();
            if snapshot.balance.is_some() {
                state.balance.set(snapshot.balance);
            }
            view_state.set(snapshot);

            if let Some(message) = failure_message(&report) {
                state.show_error(&message);
            }
            state.loading.set(false);
        });
    });

    let chart = Signal::derive(move || view_state.with(|s| s.chart.clone()));
    let mine = Signal::derive(move || view_state.with(|s| s.mine.clone()));
    let others = Signal::derive(move || view_state.with(|s| s.others.clone()));
    let feed_loaded = Signal::derive(move || view_state.with(|s| s.feed_loaded));

    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"Dashboard"</h1>
                <p class="text-gray-400 mt-1">"Sleep and good things at a glance"</p>
            </div>

            <section class="bg-gray-800 rounded-xl p-6">
                <h2 class="text-xl font-semibold mb-4">"Sleep"</h2>
                <SleepChart points=chart />
            </section>

            <div class="grid md:grid-cols-2 gap-8">
                <section class="bg-gray-800 rounded-xl p-6">
                    <h2 class="text-xl font-semibold mb-4">"My good things"</h2>
                    <OwnList rows=mine loaded=feed_loaded />
                </section>

                <section class="bg-gray-800 rounded-xl p-6">
                    <div class="flex items-center justify-between mb-4">
                        <h2 class="text-xl font-semibold">"From others"</h2>
                        <ReloadOthers controller=controller view_state=view_state />
                    </div>
                    <OthersList entries=others loaded=feed_loaded />
                </section>
            </div>
        </div>
    }
}

/// Re-fetch the feed on demand
#[component]
fn ReloadOthers(controller: Controller, view_state: RwSignal<DashboardState>) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let reloading = create_rw_signal(false);

    let on_click = move |_| {
        if reloading.get_untracked() {
            return;
        }
        reloading.set(true);

        let state = state.clone();
        let controller = controller.clone();
        spawn_local(async move {
            match controller.refresh_feed().await {
                Ok(()) => view_state.set(controller.snapshot()),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to reload feed");
                    state.show_error(&format!("Failed to load good things: {}", e));
                }
            }
            reloading.set(false);
        });
    };

    view! {
        <button
            on:click=on_click
            disabled=move || reloading.get()
            class="px-3 py-1 rounded-lg text-sm bg-gray-700 text-gray-300 hover:bg-gray-600 transition-colors"
        >
            {move || if reloading.get() {
                view! { <InlineLoading /> }.into_view()
            } else {
                "Reload".into_view()
            }}
        </button>
    }
}
