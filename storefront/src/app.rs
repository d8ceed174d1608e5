//! Application shell, routes and pages.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::hooks::{use_location, use_params_map};
use leptos_router::path;

use crate::api::{get_product, ProductPageData};
use crate::components::{Aside, AsideStore, CartStore, ProductForm};

#[cfg(feature = "ssr")]
pub fn shell(options: leptos::config::LeptosOptions) -> impl IntoView {
    use leptos::hydration::{AutoReload, HydrationScripts};
    use leptos::view;

    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone() />
                <HydrationScripts options=options.clone() root=""/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root component. Owns the side panel and cart stores shared by pages.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let aside = AsideStore::new();
    let cart = CartStore::new();
    provide_context(aside);
    provide_context(cart);

    let fallback = || view! { <NotFound/> }.into_view();

    view! {
        <Stylesheet id="leptos" href="/pkg/shopfront_storefront.css"/>
        <Title text="Shopfront"/>

        <Router>
            <Header aside=aside/>
            <main>
                <Routes fallback>
                    <Route path=path!("") view=HomePage/>
                    <Route path=path!("/products/:handle") view=ProductPage/>
                    <Route path=path!("/*any") view=NotFound/>
                </Routes>
            </main>
            <Aside aside=aside cart=cart/>
        </Router>
    }
}

#[component]
fn Header(aside: AsideStore) -> impl IntoView {
    use shopfront_commerce::view::CART_PANEL;

    view! {
        <header>
            <a href="/"><h1>"Shopfront"</h1></a>
            <nav>
                <button class="cart-toggle" on:click=move |_| aside.open(CART_PANEL)>
                    "Cart"
                </button>
            </nav>
        </header>
    }
}

#[component]
fn HomePage() -> impl IntoView {
    view! {
        <div class="hero">
            <h2>"Shopfront"</h2>
            <p>"Open a product at /products/{handle} to pick options and check out."</p>
        </div>
    }
}

/// Product page. The selected options live in the URL query, so option
/// buttons only have to navigate for the product to reload.
#[component]
fn ProductPage() -> impl IntoView {
    let params = use_params_map();
    let location = use_location();
    let aside = use_context::<AsideStore>().unwrap_or_default();
    let cart = use_context::<CartStore>().unwrap_or_default();

    let product = Resource::new(
        move || {
            (
                params.get().get("handle").unwrap_or_default(),
                location.search.get(),
            )
        },
        |(handle, query)| get_product(handle, query),
    );

    view! {
        <Suspense fallback=move || view! { <ProductSkeleton/> }>
            {move || product.get().map(|result| match result {
                Ok(Some(page)) => view! {
                    <ProductMain page=page aside=aside cart=cart/>
                }.into_any(),
                Ok(None) => view! { <NotFound/> }.into_any(),
                Err(e) => view! {
                    <p class="form-error">"Error loading product: " {e.to_string()}</p>
                }.into_any(),
            })}
        </Suspense>
    }
}

#[component]
fn ProductMain(page: ProductPageData, aside: AsideStore, cart: CartStore) -> impl IntoView {
    let variant_title = page
        .selected_variant
        .as_ref()
        .and_then(|v| v.title.clone());

    view! {
        <Title text=page.title.clone()/>
        <div class="product">
            <div class="product-main">
                <h1>{page.title}</h1>
                {variant_title.map(|t| view! { <p class="product-variant">{t}</p> })}
                <ProductForm
                    options=page.options
                    selected_variant=page.selected_variant
                    aside=aside
                    cart=cart
                />
                {page.description.map(|d| view! { <p class="product-description">{d}</p> })}
            </div>
        </div>
    }
}

#[component]
fn ProductSkeleton() -> impl IntoView {
    view! {
        <div class="product">
            <div class="skeleton" style="width: 60%; height: 2rem; margin-bottom: 1rem;"></div>
            <div class="skeleton" style="width: 100%; height: 6rem; margin-bottom: 1rem;"></div>
            <div class="skeleton" style="width: 150px; height: 3rem;"></div>
        </div>
    }
}

#[component]
fn NotFound() -> impl IntoView {
    #[cfg(feature = "ssr")]
    {
        if let Some(resp) = use_context::<leptos_wasi::response::ResponseOptions>() {
            resp.set_status(leptos_wasi::prelude::StatusCode::NOT_FOUND);
        }
    }

    view! {
        <div style="text-align: center; padding: 4rem;">
            <h1>"404"</h1>
            <p>"Page not found"</p>
            <a href="/">"Back to Home"</a>
        </div>
    }
}
