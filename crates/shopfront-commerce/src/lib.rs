//! Product options, cart mutations and cart-submit handling for Shopfront.
//!
//! - **Catalog**: product snapshots from the Storefront API, option values
//!   resolved against the selected variant, variant query strings
//! - **Cart**: cart lines, `cartCreate` / `cartLinesAdd` mutations, form
//!   parsing and the cart-submit handler
//! - **View**: what the product form renders for each option value and the
//!   state of its cart actions
//!
//! # Example
//!
//! ```rust,ignore
//! use shopfront_commerce::prelude::*;
//!
//! let api = GraphqlStorefront::new(GraphqlClient::from_config(&config));
//! let logger = StructuredLogger::for_route("/products/:handle");
//!
//! let form = CartForm::from_urlencoded("variantId=gid%3A%2F%2Fshopify%2FProductVariant%2F1&quantity=2");
//! match CartSubmitHandler::new(&api, &logger).submit(&form)? {
//!     CartSubmitOutcome::Redirect { url, .. } => redirect(&url),
//!     CartSubmitOutcome::Stay => {}
//! }
//! ```

pub mod api;
pub mod error;
pub mod ids;

pub mod cart;
pub mod catalog;
pub mod view;

pub use api::{GraphqlStorefront, StorefrontApi};
pub use error::CommerceError;
pub use ids::*;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::api::{GraphqlStorefront, StorefrontApi};
    pub use crate::error::CommerceError;
    pub use crate::ids::*;

    // Catalog
    pub use crate::catalog::{
        map_product_options, selected_options_from_query, ProductOption, ProductOptionValue,
        ProductSnapshot, SelectedOption, SelectedVariant, Swatch,
    };

    // Cart
    pub use crate::cart::{
        CartForm, CartLineInput, CartMutation, CartMutationKind, CartMutationResult,
        CartSubmitHandler, CartSubmitOutcome,
    };

    // View
    pub use crate::view::{
        option_groups, AddToCartView, BuyNowView, ControlKind, OptionControl, OptionGroupView,
        SwatchView, CART_PANEL,
    };

    pub use shopfront_data::{GraphqlClient, StorefrontConfig};
    pub use shopfront_observability::StructuredLogger;
}
