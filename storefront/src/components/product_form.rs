//! The product form: option selector plus cart actions.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;
use shopfront_commerce::cart::{FIELD_CART_ID, FIELD_QUANTITY, FIELD_VARIANT_ID};
use shopfront_commerce::catalog::{ProductOption, SelectedVariant};
use shopfront_commerce::view::{
    option_groups, AddToCartView, BuyNowView, ControlKind, OptionControl, OptionGroupView,
    SwatchView, CART_PANEL,
};

use super::aside::{AsideStore, CartStore};
use crate::api::{get_product, CartSubmit, CartSubmitResult, FIELD_HYDRATED};

#[component]
pub fn ProductForm(
    options: Vec<ProductOption>,
    selected_variant: Option<SelectedVariant>,
    aside: AsideStore,
    cart: CartStore,
) -> impl IntoView {
    let groups = option_groups(&options);
    let add_to_cart = AddToCartView::new(selected_variant.as_ref());
    let buy_now = BuyNowView::new(selected_variant.as_ref());

    view! {
        <div class="product-form">
            {groups
                .into_iter()
                .map(|group| view! { <ProductOptionGroup group=group/> })
                .collect_view()}
            <AddToCartButton state=add_to_cart aside=aside cart=cart/>
            <BuyNowButton state=buy_now/>
        </div>
    }
}

#[component]
fn ProductOptionGroup(group: OptionGroupView) -> impl IntoView {
    view! {
        <div class="product-options">
            <h5>{group.name}</h5>
            <div class="product-options-grid">
                {group
                    .controls
                    .into_iter()
                    .map(|control| view! { <ProductOptionItem control=control/> })
                    .collect_view()}
            </div>
            <br/>
        </div>
    }
}

/// Splits `/products/{handle}?{query}` for prefetching.
fn link_target(href: &str) -> Option<(String, String)> {
    let rest = href.strip_prefix("/products/")?;
    let (handle, query) = rest.split_once('?').unwrap_or((rest, ""));
    Some((handle.to_string(), query.to_string()))
}

#[component]
fn ProductOptionItem(control: OptionControl) -> impl IntoView {
    let class = control.class();
    let style = control.style();
    let swatch = control.swatch.clone();

    match control.kind.clone() {
        ControlKind::Link { href } => {
            let prefetched = StoredValue::new(false);
            let target = link_target(&href);
            let prefetch = move || {
                if prefetched.get_value() {
                    return;
                }
                prefetched.set_value(true);
                if let Some((handle, query)) = target.clone() {
                    spawn_local(async move {
                        let _ = get_product(handle, query).await;
                    });
                }
            };
            let on_focus = prefetch.clone();

            view! {
                <a
                    class=class
                    style=style
                    href=href
                    replace=""
                    noscroll=""
                    on:mouseenter=move |_| prefetch()
                    on:focus=move |_| on_focus()
                >
                    <ProductOptionSwatch swatch=swatch/>
                </a>
            }
            .into_any()
        }
        ControlKind::Button { disabled, .. } => {
            let navigate = use_navigate();
            let target = control.click_target().map(str::to_string);

            view! {
                <button
                    type="button"
                    class=class
                    style=style
                    disabled=disabled
                    on:click=move |_| {
                        if let Some(query) = &target {
                            navigate(
                                query,
                                NavigateOptions {
                                    replace: true,
                                    scroll: false,
                                    ..Default::default()
                                },
                            );
                        }
                    }
                >
                    <ProductOptionSwatch swatch=swatch/>
                </button>
            }
            .into_any()
        }
    }
}

#[component]
fn ProductOptionSwatch(swatch: SwatchView) -> impl IntoView {
    let background = swatch.background().map(str::to_string);
    match swatch {
        SwatchView::Label(name) => view! { {name} }.into_any(),
        SwatchView::Color { name, .. } => view! {
            <div
                aria-label=name
                class="product-option-label-swatch"
                style=format!("background-color: {};", background.unwrap_or_default())
            ></div>
        }
        .into_any(),
        SwatchView::Image { name, url, .. } => view! {
            <div
                aria-label=name.clone()
                class="product-option-label-swatch"
                style=format!(
                    "background-color: {};",
                    background.unwrap_or_else(|| "transparent".to_string())
                )
            >
                <img src=url alt=name/>
            </div>
        }
        .into_any(),
    }
}

/// Full-page navigation to an off-site URL such as the checkout.
fn navigate_external(url: &str) {
    if let Err(e) = window().location().set_href(url) {
        leptos::logging::error!("checkout redirect failed: {:?}", e);
    }
}

/// Marks posts from the hydrated page. Server-rendered HTML leaves it empty,
/// so a form submitted before hydration gets an HTTP redirect.
#[component]
fn HydratedField() -> impl IntoView {
    let hydrated = RwSignal::new(false);
    Effect::new(move |_| hydrated.set(true));

    view! {
        <input
            type="hidden"
            name=FIELD_HYDRATED
            prop:value=move || if hydrated.get() { "true" } else { "" }
        />
    }
}

#[component]
fn CartLineFields(variant_id: String, quantity: String) -> impl IntoView {
    view! {
        <input type="hidden" name=FIELD_VARIANT_ID value=variant_id/>
        <input type="hidden" name=FIELD_QUANTITY value=quantity/>
    }
}

fn open_cart(aside: AsideStore) {
    aside.open(CART_PANEL);
}

#[component]
fn AddToCartButton(state: AddToCartView, aside: AsideStore, cart: CartStore) -> impl IntoView {
    let action = ServerAction::<CartSubmit>::new();
    let pending = action.pending();
    let value = action.value();

    Effect::new(move |_| {
        if let Some(Ok(result)) = value.get() {
            cart.record(&result);
        }
    });

    let line = state.lines.first().cloned();
    let variant_id = line
        .as_ref()
        .and_then(|l| l.merchandise_id.as_ref())
        .map(ToString::to_string)
        .unwrap_or_default();
    let quantity = line.and_then(|l| l.quantity).unwrap_or(1).to_string();
    let disabled = state.disabled;
    let label = state.label;

    view! {
        <ActionForm action=action>
            <CartLineFields variant_id=variant_id quantity=quantity/>
            <input
                type="hidden"
                name=FIELD_CART_ID
                prop:value=move || cart.cart_id().unwrap_or_default()
            />
            <HydratedField/>
            <button
                type="submit"
                disabled=move || disabled || pending.get()
                on:click=move |_| open_cart(aside)
            >
                {label}
            </button>
        </ActionForm>
        <CartActionError action=action/>
    }
}

/// "Buy now" always starts a new cart, so it posts no `cartId`.
#[component]
fn BuyNowButton(state: BuyNowView) -> impl IntoView {
    let action = ServerAction::<CartSubmit>::new();
    let pending = action.pending();
    let value = action.value();

    Effect::new(move |_| {
        if let Some(Ok(CartSubmitResult {
            redirect: Some(url),
            ..
        })) = value.get()
        {
            navigate_external(&url);
        }
    });

    let variant_id = state
        .variant_id
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_default();
    let quantity = state.quantity.to_string();
    let disabled = state.disabled;

    view! {
        <ActionForm action=action>
            <CartLineFields variant_id=variant_id quantity=quantity/>
            <HydratedField/>
            <button
                type="submit"
                class="buy-now"
                disabled=move || disabled || pending.get()
            >
                <span>"Buy Now"</span>
            </button>
        </ActionForm>
        <CartActionError action=action/>
    }
}

#[component]
fn CartActionError(action: ServerAction<CartSubmit>) -> impl IntoView {
    move || {
        action
            .value()
            .get()
            .and_then(|result| result.err())
            .map(|e| view! { <p class="form-error">{e.to_string()}</p> })
    }
}
