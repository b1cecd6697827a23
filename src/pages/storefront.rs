//! Storefront Page
//!
//! Product catalog and the redeem dialog.

use std::rc::Rc;

use leptos::*;

use crate::api::HttpClient;
use crate::components::{Loading, ProductCard, RedeemModal};
use crate::controllers::{Celebration, StorefrontController, StorefrontState};
use crate::overlay::DomOverlaySurface;
use crate::state::global::GlobalState;

type Controller = Rc<StorefrontController<HttpClient, DomOverlaySurface>>;

/// Storefront page component
#[component]
pub fn Storefront() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let controller: Controller = Rc::new(StorefrontController::new(
        state.client.clone(),
        state.overlay.clone(),
        state.config.overlay.media(),
    ));
    let view_state = create_rw_signal(StorefrontState::default());
    let loaded = create_rw_signal(false);
    // Redemptions in flight; repeated clicks are not blocked, the backend decides
    let in_flight = create_rw_signal(0u32);

    // Balance, then catalog
    let state_for_effect = state.clone();
    let controller_for_effect = controller.clone();
    create_effect(move |_| {
        let state = state_for_effect.clone();
        let controller = controller_for_effect.clone();
        spawn_local(async move {
            state.loading.set(true);

            if let Err(e) = controller.load().await {
                tracing::error!(error = %e, "Failed to load storefront");
                state.show_error(&format!("Failed to load products: {}", e));
            }
            let snapshot = controller.snapshot();
            if snapshot.balance.is_some() {
                state.balance.set(snapshot.balance);
            }
            view_state.set(snapshot);

            loaded.set(true);
            state.loading.set(false);
        });
    });

    let controller_for_select = controller.clone();
    let on_select = Callback::new(move |product_id: i64| {
        if controller_for_select.select(product_id).is_none() {
            tracing::warn!(product_id, "Selected product is not in the catalog");
        }
        view_state.set(controller_for_select.snapshot());
    });

    let controller_for_quantity = controller.clone();
    let on_quantity = Callback::new(move |quantity: u32| {
        controller_for_quantity.set_quantity(quantity);
        view_state.set(controller_for_quantity.snapshot());
    });

    let controller_for_close = controller.clone();
    let on_close = Callback::new(move |_: ()| {
        controller_for_close.close_selection();
        view_state.set(controller_for_close.snapshot());
    });

    let state_for_buy = state.clone();
    let on_buy = Callback::new(move |_: ()| {
        in_flight.update(|n| *n += 1);

        let state = state_for_buy.clone();
        let controller = controller.clone();
        spawn_local(async move {
            match controller.purchase().await {
                Ok(outcome) => {
                    state.balance.set(Some(outcome.remaining_points));
                    if let Celebration::Notice(message) = outcome.celebration {
                        state.show_success(&message);
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Redemption failed");
                    state.show_error(&e.to_string());
                }
            }
            view_state.set(controller.snapshot());
            in_flight.update(|n| *n = n.saturating_sub(1));
        });
    });

    let selection = Signal::derive(move || view_state.with(|s| s.selection.clone()));
    let busy = Signal::derive(move || in_flight.get() > 0);

    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"Shop"</h1>
                <p class="text-gray-400 mt-1">"Spend your points"</p>
            </div>

            {move || {
                if !loaded.get() {
                    return view! { <Loading /> }.into_view();
                }

                let products = view_state.with(|s| s.products.clone());
                if products.is_empty() {
                    return view! {
                        <p class="text-gray-400">"No products available."</p>
                    }.into_view();
                }

                view! {
                    <div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-3 gap-6">
                        {products.into_iter()
                            .map(|product| view! { <ProductCard product=product on_select=on_select /> })
                            .collect_view()}
                    </div>
                }.into_view()
            }}

            <RedeemModal
                selection=selection
                busy=busy
                on_quantity=on_quantity
                on_buy=on_buy
                on_close=on_close
            />
        </div>
    }
}
