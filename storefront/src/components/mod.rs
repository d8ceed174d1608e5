//! Product page components.

mod aside;
mod product_form;

pub use aside::{Aside, AsideStore, CartStore};
pub use product_form::ProductForm;
