//! Redeem dialog tests, run in a headless browser with `wasm-pack test`.

#![cfg(target_arch = "wasm32")]

use gloo_timers::future::TimeoutFuture;
use leptos::*;
use rewards_ui::api::Product;
use rewards_ui::components::RedeemModal;
use rewards_ui::controllers::Selection;
use rewards_ui::overlay::MODAL_OPEN_CLASS;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Event, EventInit, HtmlInputElement};

wasm_bindgen_test_configure!(run_in_browser);

fn donation_selection() -> Selection {
    Selection {
        product: Product {
            id: 1,
            name: "Donation to NPO".to_string(),
            price: 10.0,
            description: None,
            image: None,
        },
        max_quantity: 152,
        quantity: 0,
        hint: "You can redeem up to 152. (No 100-piece cap for donations.)".to_string(),
    }
}

fn sliders() -> u32 {
    document()
        .query_selector_all("input[type=range]")
        .map(|nodes| nodes.length())
        .unwrap_or(0)
}

async fn drag_to(slider: &HtmlInputElement, value: u32) {
    slider.set_value(&value.to_string());
    let mut init = EventInit::new();
    #[allow(deprecated)]
    init.bubbles(true);
    let event = Event::new_with_event_init_dict("input", &init).unwrap();
    slider.dispatch_event(&event).unwrap();
    TimeoutFuture::new(0).await;
}

#[wasm_bindgen_test]
async fn slider_stays_mounted_while_dragged() {
    let selection = create_rw_signal(Some(donation_selection()));
    let on_quantity = Callback::new(move |quantity: u32| {
        selection.update(|s| {
            if let Some(s) = s.as_mut() {
                s.quantity = quantity.min(s.max_quantity);
            }
        })
    });

    mount_to_body(move || {
        view! {
            <RedeemModal
                selection=selection
                busy=Signal::derive(|| false)
                on_quantity=on_quantity
                on_buy=Callback::new(|_: ()| ())
                on_close=Callback::new(move |_: ()| selection.set(None))
            />
        }
    });
    TimeoutFuture::new(0).await;
    assert!(document().body().unwrap().class_list().contains(MODAL_OPEN_CLASS));

    let slider: HtmlInputElement = document()
        .query_selector("input[type=range]")
        .unwrap()
        .expect("slider rendered")
        .dyn_into()
        .unwrap();

    drag_to(&slider, 5).await;
    drag_to(&slider, 12).await;

    assert_eq!(selection.with_untracked(|s| s.as_ref().map(|s| s.quantity)), Some(12));
    assert!(slider.is_connected());
    assert_eq!(sliders(), 1);
    assert_eq!(slider.value(), "12");
    let text = document().body().unwrap().text_content().unwrap_or_default();
    assert!(text.contains("Quantity: 12"));
    assert!(text.contains("120.0 pts"));

    selection.set(None);
    TimeoutFuture::new(0).await;
    assert_eq!(sliders(), 0);
    assert!(!document().body().unwrap().class_list().contains(MODAL_OPEN_CLASS));
}
