//! Rewards Dashboard
//!
//! Client-side rendered (CSR) Leptos application. Configuration comes from
//! the embedded TOML with local storage overrides; logging goes to the
//! browser console.

use leptos::*;

use rewards_ui::app::App;
use rewards_ui::config::UiConfig;
use rewards_ui::logging;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    let config = UiConfig::load_default().unwrap_or_else(|e| {
        web_sys::console::error_1(&format!("{}; using built-in defaults", e).into());
        UiConfig::default()
    });
    logging::init(&config.logging);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        api = %config.api.base_url,
        "Rewards UI starting"
    );

    mount_to_body(move || view! { <App config=config /> });
}
