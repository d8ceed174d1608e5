//! Cart module.
//!
//! Contains cart line inputs, the two Storefront cart mutations, form
//! parsing, and the cart-submit handler that ties them together.

mod form;
mod line;
mod mutation;
mod submit;

pub use form::{parse_quantity, CartForm, FIELD_CART_ID, FIELD_QUANTITY, FIELD_VARIANT_ID};
pub use line::CartLineInput;
pub use mutation::{
    CartMutation, CartMutationData, CartMutationKind, CartMutationResult, CartPayload,
    CartSnapshot, CartUserError, CART_CREATE_MUTATION, CART_LINES_ADD_MUTATION,
};
pub use submit::{CartSubmitHandler, CartSubmitOutcome};
