//! "Add to cart" and "Buy now" action state.

use crate::cart::{CartForm, CartLineInput};
use crate::catalog::SelectedVariant;
use crate::ids::{CartId, VariantId};

/// Side panel opened by "Add to cart".
pub const CART_PANEL: &str = "cart";

/// "Buy now" always checks out a single unit.
pub const BUY_NOW_QUANTITY: i64 = 1;

/// State of the "Add to cart" button.
#[derive(Debug, Clone, PartialEq)]
pub struct AddToCartView {
    pub disabled: bool,
    pub label: &'static str,
    /// Lines submitted on click; empty without a selected variant.
    pub lines: Vec<CartLineInput>,
}

impl AddToCartView {
    pub fn new(selected: Option<&SelectedVariant>) -> Self {
        let available = selected.is_some_and(|v| v.available_for_sale);
        Self {
            disabled: !available,
            label: if available { "Add to cart" } else { "Sold out" },
            lines: selected
                .map(|v| vec![CartLineInput::new(v.id.clone(), 1)])
                .unwrap_or_default(),
        }
    }

    /// Form for the first line, continuing `cart_id` when known.
    pub fn form(&self, cart_id: Option<CartId>) -> Option<CartForm> {
        self.lines
            .first()
            .map(|line| CartForm::for_line(line, cart_id))
    }
}

/// State of the "Buy now" button.
///
/// Always rendered. Without a selected variant there is nothing to buy, so
/// the button is disabled and carries no variant.
#[derive(Debug, Clone, PartialEq)]
pub struct BuyNowView {
    pub variant_id: Option<VariantId>,
    pub quantity: i64,
    pub disabled: bool,
}

impl BuyNowView {
    pub fn new(selected: Option<&SelectedVariant>) -> Self {
        Self {
            variant_id: selected.map(|v| v.id.clone()),
            quantity: BUY_NOW_QUANTITY,
            disabled: selected.is_none(),
        }
    }

    /// Direct checkout always starts a fresh cart.
    pub fn form(&self) -> Option<CartForm> {
        self.variant_id
            .clone()
            .map(|id| CartForm::new(id).with_quantity(self.quantity))
    }
}
