//! App Root Component
//!
//! Main application component with routing and global providers.

use leptos::*;
use leptos_router::*;

use crate::components::nav::{DASHBOARD_PATH, SHOP_PATH};
use crate::components::{Nav, Toast};
use crate::config::UiConfig;
use crate::pages::{Dashboard, Storefront};
use crate::state::global::{provide_global_state, GlobalState};

/// Root application component
#[component]
pub fn App(config: UiConfig) -> impl IntoView {
    provide_global_state(config);

    view! {
        <Router>
            <div class="min-h-screen bg-gray-900 text-white flex flex-col">
                <Nav />

                <main class="flex-1 container mx-auto px-4 py-8 pb-24">
                    <Routes>
                        <Route path=DASHBOARD_PATH view=Dashboard />
                        <Route path=SHOP_PATH view=Storefront />
                        <Route path="/*any" view=NotFound />
                    </Routes>
                </main>

                <Footer />
                <Toast />
            </div>
        </Router>
    }
}

/// Footer with the global loading indicator
#[component]
fn Footer() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <footer class="fixed bottom-0 left-0 right-0 bg-gray-800 border-t border-gray-700 py-3 px-4">
            <div class="container mx-auto flex items-center justify-between text-sm text-gray-400">
                <span>{format!("v{}", env!("CARGO_PKG_VERSION"))}</span>

                {move || {
                    if state.loading.get() {
                        view! {
                            <div class="flex items-center space-x-2 text-primary-400">
                                <div class="loading-spinner w-4 h-4" />
                                <span>"Loading..."</span>
                            </div>
                        }.into_view()
                    } else {
                        view! {}.into_view()
                    }
                }}
            </div>
        </footer>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <div class="text-6xl mb-4">"🔍"</div>
            <h1 class="text-3xl font-bold mb-2">"Page Not Found"</h1>
            <p class="text-gray-400 mb-6">"The page you're looking for doesn't exist."</p>
            <A
                href=DASHBOARD_PATH
                class="px-6 py-3 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
            >
                "Go to Dashboard"
            </A>
        </div>
    }
}
