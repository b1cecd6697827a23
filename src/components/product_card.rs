//! Product Card Component

use leptos::*;

use crate::api::Product;

/// One catalog entry; clicking it opens the redeem dialog
#[component]
pub fn ProductCard(
    product: Product,
    #[prop(into)] on_select: Callback<i64>,
) -> impl IntoView {
    let id = product.id;
    let image = product.image_src();

    view! {
        <button
            class="bg-gray-800 rounded-xl overflow-hidden text-left hover:ring-2 hover:ring-primary-500 transition"
            on:click=move |_| on_select.call(id)
        >
            <img src=image alt=product.name.clone() class="w-full h-40 object-cover" />
            <div class="p-4 space-y-1">
                <h3 class="font-semibold">{product.name}</h3>
                <p class="text-primary-400 font-medium">{format!("{:.1} pts", product.price)}</p>
                {product.description.map(|d| view! {
                    <p class="text-sm text-gray-400">{d}</p>
                })}
            </div>
        </button>
    }
}
