//! Side panel state and the cart panel.

use leptos::prelude::*;
use shopfront_commerce::view::CART_PANEL;

use crate::api::CartSubmitResult;

/// Which side panel is open. Created by the layout and handed to the
/// components that open or render panels.
#[derive(Debug, Clone, Copy)]
pub struct AsideStore {
    active: RwSignal<Option<String>>,
}

impl Default for AsideStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AsideStore {
    pub fn new() -> Self {
        Self {
            active: RwSignal::new(None),
        }
    }

    /// Open `panel`, closing any other.
    pub fn open(&self, panel: &str) {
        self.active.set(Some(panel.to_string()));
    }

    pub fn close(&self) {
        self.active.set(None);
    }

    pub fn is_open(&self, panel: &str) -> bool {
        self.active.with(|active| active.as_deref() == Some(panel))
    }
}

/// The shopper's cart as last reported by a cart mutation.
#[derive(Debug, Clone, Copy)]
pub struct CartStore {
    cart_id: RwSignal<Option<String>>,
    checkout_url: RwSignal<Option<String>>,
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CartStore {
    pub fn new() -> Self {
        Self {
            cart_id: RwSignal::new(None),
            checkout_url: RwSignal::new(None),
        }
    }

    /// Cart id echoed back as `cartId` by the next submission.
    pub fn cart_id(&self) -> Option<String> {
        self.cart_id.get()
    }

    pub fn checkout_url(&self) -> Option<String> {
        self.checkout_url.get()
    }

    /// Remember the cart from a submission; a result without a cart keeps
    /// the current one.
    pub fn record(&self, result: &CartSubmitResult) {
        if let Some(id) = &result.cart_id {
            self.cart_id.set(Some(id.clone()));
        }
        if let Some(url) = &result.redirect {
            self.checkout_url.set(Some(url.clone()));
        }
    }
}

/// The cart side panel.
#[component]
pub fn Aside(aside: AsideStore, cart: CartStore) -> impl IntoView {
    view! {
        <Show when=move || aside.is_open(CART_PANEL)>
            <div class="overlay" on:click=move |_| aside.close()></div>
            <aside class="aside">
                <header>
                    <h3>"Cart"</h3>
                    <button class="close" on:click=move |_| aside.close()>"×"</button>
                </header>
                <main>
                    {move || match cart.checkout_url() {
                        Some(url) => view! {
                            <p>"Your cart has been updated."</p>
                            <a class="btn" href=url>"Continue to Checkout →"</a>
                        }.into_any(),
                        None => view! {
                            <p>"Updating your cart..."</p>
                        }.into_any(),
                    }}
                </main>
            </aside>
        </Show>
    }
}
