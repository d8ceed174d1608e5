//! Cart line input.

use serde::{Deserialize, Serialize};

use crate::ids::VariantId;

/// A merchandise line sent with a cart mutation.
///
/// Both fields are forwarded as submitted. An absent variant or a quantity
/// that is not a number goes out as `null` and the Storefront API decides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineInput {
    pub merchandise_id: Option<VariantId>,
    pub quantity: Option<i64>,
}

impl CartLineInput {
    pub fn new(merchandise_id: VariantId, quantity: i64) -> Self {
        Self {
            merchandise_id: Some(merchandise_id),
            quantity: Some(quantity),
        }
    }
}
