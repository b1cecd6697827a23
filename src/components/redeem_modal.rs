//! Redeem Modal Component
//!
//! Quantity slider and buy button for the selected product. Closes on the
//! backdrop, the close button, or Escape.

use leptos::*;

use crate::controllers::Selection;
use crate::overlay::MODAL_OPEN_CLASS;

fn set_body_modal_open(open: bool) {
    let Some(body) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
    else {
        return;
    };

    let classes = body.class_list();
    let result = if open {
        classes.add_1(MODAL_OPEN_CLASS)
    } else {
        classes.remove_1(MODAL_OPEN_CLASS)
    };
    if let Err(e) = result {
        tracing::warn!(error = ?e, "Failed to toggle body class");
    }
}

/// Redeem dialog, shown while a product is selected
#[component]
pub fn RedeemModal(
    #[prop(into)] selection: Signal<Option<Selection>>,
    /// A redemption is in flight
    #[prop(into)] busy: Signal<bool>,
    #[prop(into)] on_quantity: Callback<u32>,
    #[prop(into)] on_buy: Callback<()>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let is_open = create_memo(move |_| selection.with(Option::is_some));

    create_effect(move |first_run: Option<()>| {
        let open = is_open.get();
        if first_run.is_some() || open {
            set_body_modal_open(open);
        }
    });

    let escape = window_event_listener(ev::keydown, move |ev| {
        if ev.key() == "Escape" && is_open.get_untracked() {
            on_close.call(());
        }
    });
    on_cleanup(move || {
        escape.remove();
        set_body_modal_open(false);
    });

    // Each field tracks the selection on its own, so the slider element stays
    // mounted while it is dragged.
    let name = Signal::derive(move || {
        selection.with(|s| s.as_ref().map(|s| s.product.name.clone()).unwrap_or_default())
    });
    let image = Signal::derive(move || {
        selection.with(|s| s.as_ref().map(|s| s.product.image_src()).unwrap_or_default())
    });
    let max = Signal::derive(move || selection.with(|s| s.as_ref().map_or(0, |s| s.max_quantity)));
    let quantity =
        Signal::derive(move || selection.with(|s| s.as_ref().map_or(0, |s| s.quantity)));
    let cost = Signal::derive(move || selection.with(|s| s.as_ref().map_or(0.0, Selection::cost)));
    let hint = Signal::derive(move || {
        selection.with(|s| s.as_ref().map(|s| s.hint.clone()).unwrap_or_default())
    });
    let can_redeem =
        Signal::derive(move || selection.with(|s| s.as_ref().is_some_and(Selection::can_redeem)));

    view! {
        <Show when=move || is_open.get()>
            <div
                class="fixed inset-0 z-40 bg-black/60 flex items-center justify-center"
                on:click=move |_| on_close.call(())
            >
                <div
                    role="dialog"
                    aria-modal="true"
                    class="bg-gray-800 rounded-xl p-6 w-full max-w-md space-y-4"
                    on:click=|ev| ev.stop_propagation()
                >
                    <div class="flex items-start justify-between">
                        <h2 class="text-xl font-semibold">{move || name.get()}</h2>
                        <button
                            class="text-gray-400 hover:text-white"
                            aria-label="Close"
                            on:click=move |_| on_close.call(())
                        >
                            "✕"
                        </button>
                    </div>

                    <img src=move || image.get() alt=move || name.get() class="w-full h-48 object-cover rounded-lg" />

                    <div class="space-y-2">
                        <input
                            type="range"
                            min="0"
                            max=move || max.get().to_string()
                            step="1"
                            prop:value=move || quantity.get().to_string()
                            disabled=move || max.get() == 0
                            class="w-full"
                            on:input=move |ev| {
                                let value = event_target_value(&ev).parse::<u32>().unwrap_or(0);
                                on_quantity.call(value);
                            }
                        />
                        <div class="flex justify-between text-sm">
                            <span>{move || format!("Quantity: {}", quantity.get())}</span>
                            <span class="text-gray-400">{move || format!("{:.1} pts", cost.get())}</span>
                        </div>
                        <p class="text-sm text-gray-400">{move || hint.get()}</p>
                    </div>

                    <button
                        class="w-full py-3 rounded-lg font-medium bg-primary-600 hover:bg-primary-700 disabled:opacity-50 transition-colors"
                        disabled=move || !can_redeem.get()
                        on:click=move |_| on_buy.call(())
                    >
                        {move || if busy.get() { "Redeeming..." } else { "Redeem" }}
                    </button>
                </div>
            </div>
        </Show>
    }
}
