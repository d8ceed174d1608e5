//! The Storefront API as seen by this crate.

use serde::Serialize;
use shopfront_data::GraphqlClient;

use crate::cart::{CartMutation, CartMutationData, CartMutationResult};
use crate::catalog::{ProductQueryData, ProductSnapshot, SelectedOption, PRODUCT_QUERY};
use crate::error::CommerceError;

/// Operations the product page needs from the commerce platform.
pub trait StorefrontApi {
    /// Run a cart mutation.
    fn cart_mutation(&self, mutation: &CartMutation) -> Result<CartMutationResult, CommerceError>;

    /// Load a product by handle with the given options selected.
    fn product(
        &self,
        handle: &str,
        selected_options: &[SelectedOption],
    ) -> Result<Option<ProductSnapshot>, CommerceError>;
}

/// [`StorefrontApi`] backed by the Storefront GraphQL endpoint.
#[derive(Debug, Clone)]
pub struct GraphqlStorefront {
    client: GraphqlClient,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProductVariables<'a> {
    handle: &'a str,
    selected_options: &'a [SelectedOption],
}

impl GraphqlStorefront {
    pub fn new(client: GraphqlClient) -> Self {
        Self { client }
    }
}

impl StorefrontApi for GraphqlStorefront {
    fn cart_mutation(&self, mutation: &CartMutation) -> Result<CartMutationResult, CommerceError> {
        let variables = mutation.variables()?;
        let data: CartMutationData = self.client.execute(mutation.document(), &variables)?;
        Ok(data.into_result())
    }

    fn product(
        &self,
        handle: &str,
        selected_options: &[SelectedOption],
    ) -> Result<Option<ProductSnapshot>, CommerceError> {
        let variables = ProductVariables {
            handle,
            selected_options,
        };
        let data: ProductQueryData = self.client.execute(PRODUCT_QUERY, &variables)?;
        Ok(data.product)
    }
}
