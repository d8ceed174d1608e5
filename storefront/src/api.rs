//! Server functions backing the product page.

use leptos::server_fn::error::ServerFnError;
use serde::{Deserialize, Serialize};
use shopfront_commerce::catalog::{
    map_product_options, ProductOption, ProductSnapshot, SelectedVariant,
};

#[cfg(feature = "ssr")]
use shopfront_commerce::{cart::CartForm, CommerceError, GraphqlStorefront, StorefrontApi};
#[cfg(feature = "ssr")]
use shopfront_observability::StructuredLogger;

/// What the product page renders.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductPageData {
    pub title: String,
    pub handle: String,
    pub description: Option<String>,
    pub options: Vec<ProductOption>,
    pub selected_variant: Option<SelectedVariant>,
}

impl ProductPageData {
    pub fn from_snapshot(product: &ProductSnapshot) -> Self {
        Self {
            title: product.title.clone(),
            handle: product.handle.clone(),
            description: product.description.clone(),
            options: map_product_options(product),
            selected_variant: product
                .selected_or_first_available_variant
                .as_ref()
                .map(SelectedVariant::from),
        }
    }
}

/// Result of a cart submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CartSubmitResult {
    /// Checkout URL to send the shopper to.
    pub redirect: Option<String>,
    pub cart_id: Option<String>,
}

#[cfg(feature = "ssr")]
fn storefront() -> Result<GraphqlStorefront, ServerFnError> {
    use shopfront_data::{GraphqlClient, StorefrontConfig};

    let config = StorefrontConfig::discover()
        .map_err(|e| ServerFnError::new(format!("Configuration error: {}", e)))?;
    Ok(GraphqlStorefront::new(GraphqlClient::from_config(&config)))
}

/// Shopper-facing message for a failed cart submission.
#[cfg(feature = "ssr")]
fn shopper_message(error: &CommerceError) -> String {
    match error {
        CommerceError::Api(messages) if !messages.is_empty() => messages.join(" "),
        _ => "Could not update your cart. Please try again.".to_string(),
    }
}

/// Hidden field the hydrated client fills in. Posts without it come from a
/// plain HTML form and get an HTTP redirect.
pub const FIELD_HYDRATED: &str = "hydrated";

#[cfg_attr(not(feature = "ssr"), allow(dead_code))]
fn wants_http_redirect(hydrated: Option<&str>) -> bool {
    hydrated != Some("true")
}

/// `302 Found` to `url` on the current response.
#[cfg(feature = "ssr")]
fn redirect_response(url: &str) -> Result<(), ServerFnError> {
    use http::header::{HeaderValue, LOCATION};
    use leptos::prelude::use_context;
    use leptos_wasi::prelude::StatusCode;
    use leptos_wasi::response::ResponseOptions;

    let location = HeaderValue::from_str(url)
        .map_err(|e| ServerFnError::new(format!("Invalid checkout url: {}", e)))?;
    if let Some(resp) = use_context::<ResponseOptions>() {
        resp.set_status(StatusCode::FOUND);
        resp.insert_header(LOCATION, location);
    }
    Ok(())
}

/// Load a product with the options encoded in `query` selected.
#[leptos::server(prefix = "/api")]
pub async fn get_product(
    handle: String,
    query: String,
) -> Result<Option<ProductPageData>, ServerFnError> {
    #[cfg(feature = "ssr")]
    {
        use shopfront_commerce::catalog::selected_options_from_query;

        let logger = StructuredLogger::for_route("/products/:handle");
        let api = storefront()?;
        let selected = selected_options_from_query(&query);

        let product = api.product(&handle, &selected).map_err(|e| {
            logger
                .error_builder("product query failed")
                .field("handle", handle.as_str())
                .field("error", e.to_string())
                .emit();
            ServerFnError::new(e.to_string())
        })?;

        if product.is_none() {
            logger
                .info_builder("product not found")
                .field("handle", handle.as_str())
                .emit();
        }

        Ok(product.as_ref().map(ProductPageData::from_snapshot))
    }

    #[cfg(not(feature = "ssr"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

/// Cart form handler: appends to `cartId` when given, otherwise creates a
/// cart, and answers with the checkout URL.
///
/// Field names follow the cart form contract (`variantId`, `quantity`,
/// `cartId`). A plain form post is answered with `302 Found` to the
/// checkout; the hydrated form navigates itself.
#[leptos::server(prefix = "/api")]
#[allow(non_snake_case)]
pub async fn cart_submit(
    variantId: Option<String>,
    quantity: Option<String>,
    cartId: Option<String>,
    hydrated: Option<String>,
) -> Result<CartSubmitResult, ServerFnError> {
    #[cfg(feature = "ssr")]
    {
        use shopfront_commerce::cart::CartSubmitOutcome;
        use shopfront_commerce::cart::CartSubmitHandler;

        let logger = StructuredLogger::for_route("/api/cart_submit");
        logger
            .debug_builder("cart form received")
            .field_opt("cart_id", cartId.as_deref())
            .emit();

        let form = CartForm::from_fields(
            variantId.as_deref(),
            quantity.as_deref(),
            cartId.as_deref(),
        );

        let api = storefront()?;
        let outcome = CartSubmitHandler::new(&api, &logger)
            .submit(&form)
            .map_err(|e| ServerFnError::new(shopper_message(&e)))?;

        Ok(match outcome {
            CartSubmitOutcome::Redirect { url, cart_id } => {
                if wants_http_redirect(hydrated.as_deref()) {
                    redirect_response(&url)?;
                }
                CartSubmitResult {
                    redirect: Some(url),
                    cart_id: cart_id.map(|id| id.into_inner()),
                }
            }
            CartSubmitOutcome::Stay => CartSubmitResult::default(),
        })
    }

    #[cfg(not(feature = "ssr"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}
