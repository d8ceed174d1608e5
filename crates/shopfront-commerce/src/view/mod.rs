//! View models for the product form.

mod actions;
mod selector;

pub use actions::{AddToCartView, BuyNowView, BUY_NOW_QUANTITY, CART_PANEL};
pub use selector::{
    option_control, option_groups, ControlKind, OptionControl, OptionGroupView, SwatchView,
    OPTION_ITEM_CLASS,
};
