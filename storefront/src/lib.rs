//! Shopfront storefront
//!
//! Product page of a Storefront API shop:
//! - Option selector rendering links for sibling products and buttons for
//!   same-product variant switches
//! - "Add to cart" and "Buy now" actions backed by cart mutations
//! - Cart side panel driven by an injected UI-state store

mod api;
mod app;
mod components;

pub use api::ProductPageData;
pub use app::App;

#[cfg(feature = "ssr")]
mod server;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use app::App;
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
