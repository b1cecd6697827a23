//! Navigation Component
//!
//! Header with the brand, page links and the balance badge.

use leptos::*;
use leptos_router::*;

use crate::components::PointsBadge;
use crate::state::global::GlobalState;

/// Dashboard route
pub const DASHBOARD_PATH: &str = "/";
/// Storefront route
pub const SHOP_PATH: &str = "/shop";

/// Header links in display order
pub const NAV_LINKS: [(&str, &str); 2] = [(DASHBOARD_PATH, "Dashboard"), (SHOP_PATH, "Shop")];

#[component]
pub fn Nav() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <nav class="bg-gray-800 border-b border-gray-700">
            <div class="container mx-auto px-4 flex items-center justify-between h-16">
                <A href=DASHBOARD_PATH class="flex items-center space-x-3">
                    <span class="text-2xl">"🌱"</span>
                    <span class="text-xl font-bold text-white">"Rewards"</span>
                </A>

                <div class="flex items-center space-x-1">
                    {NAV_LINKS
                        .iter()
                        .map(|&(href, label)| view! {
                            <A
                                href=href
                                exact=true
                                class="px-4 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-gray-700"
                                active_class="bg-gray-700 text-white"
                            >
                                {label}
                            </A>
                        })
                        .collect_view()}
                    <PointsBadge balance=state.balance />
                </div>
            </div>
        </nav>
    }
}

