//! Cart form submission parsing.
//!
//! Fields are read, not validated: whatever the shopper's browser posted is
//! forwarded to the Storefront API, which is the only judge of what a valid
//! line is.

use crate::cart::{CartLineInput, CartMutation};
use crate::catalog::query::decode_component;
use crate::ids::{CartId, VariantId};

pub const FIELD_VARIANT_ID: &str = "variantId";
pub const FIELD_QUANTITY: &str = "quantity";
pub const FIELD_CART_ID: &str = "cartId";

/// A parsed cart form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartForm {
    /// `None` when the field was not posted at all.
    pub variant_id: Option<VariantId>,
    /// `None` when the posted value does not start with an integer.
    pub quantity: Option<i64>,
    pub cart_id: Option<CartId>,
}

impl CartForm {
    /// One unit of `variant_id`, no cart yet.
    pub fn new(variant_id: VariantId) -> Self {
        Self {
            variant_id: Some(variant_id),
            quantity: Some(1),
            cart_id: None,
        }
    }

    /// Submission of `line`, continuing `cart_id` when known.
    pub fn for_line(line: &CartLineInput, cart_id: Option<CartId>) -> Self {
        Self {
            variant_id: line.merchandise_id.clone(),
            quantity: line.quantity,
            cart_id,
        }
    }

    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn with_cart_id(mut self, cart_id: CartId) -> Self {
        self.cart_id = Some(cart_id);
        self
    }

    /// Build from raw field values. An empty `cartId` means no cart.
    pub fn from_fields(
        variant_id: Option<&str>,
        quantity: Option<&str>,
        cart_id: Option<&str>,
    ) -> Self {
        Self {
            variant_id: variant_id.map(VariantId::new),
            quantity: parse_quantity(quantity),
            cart_id: cart_id.filter(|c| !c.is_empty()).map(CartId::new),
        }
    }

    /// Parse an `application/x-www-form-urlencoded` body.
    ///
    /// The first occurrence of a field wins.
    pub fn from_urlencoded(body: &str) -> Self {
        let mut variant_id = None;
        let mut quantity = None;
        let mut cart_id = None;

        for pair in body.split('&').filter(|p| !p.is_empty()) {
            let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
            let slot = match decode_component(name).as_str() {
                FIELD_VARIANT_ID => &mut variant_id,
                FIELD_QUANTITY => &mut quantity,
                FIELD_CART_ID => &mut cart_id,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(decode_component(value));
            }
        }

        Self::from_fields(
            variant_id.as_deref(),
            quantity.as_deref(),
            cart_id.as_deref(),
        )
    }

    /// The single line this form submits.
    pub fn line(&self) -> CartLineInput {
        CartLineInput {
            merchandise_id: self.variant_id.clone(),
            quantity: self.quantity,
        }
    }

    /// `cartLinesAdd` when the form carries a cart id, `cartCreate` otherwise.
    pub fn mutation(&self) -> CartMutation {
        CartMutation::for_lines(self.cart_id.clone(), vec![self.line()])
    }
}

/// Parse `quantity` with integer-prefix semantics.
///
/// Missing or empty means 1. Leading whitespace is skipped and parsing stops
/// at the first non-digit, so `"3 items"` is 3. No leading digits, or a value
/// outside `i64`, gives `None`, which is sent to the API as `null`. Range
/// checks are left to the Storefront API.
pub fn parse_quantity(raw: Option<&str>) -> Option<i64> {
    let raw = match raw {
        None | Some("") => return Some(1),
        Some(raw) => raw,
    };

    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}
