//! Product catalog projections.
//!
//! Contains the Storefront API product snapshot, the option/value model the
//! product form renders, and the variant query-string encoding.

mod option;
mod product;
pub(crate) mod query;

pub use option::{
    map_product_options, ProductOption, ProductOptionValue, SelectedOption, SelectedVariant,
    Swatch,
};
pub use product::{
    OptionValueSource, ProductOptionSource, ProductQueryData, ProductRef, ProductSnapshot,
    SwatchImage, SwatchSource, VariantSnapshot, PreviewImage, PRODUCT_QUERY,
};
pub use query::{encode_variant_query, selected_options_from_query};
