//! Product snapshot as returned by the Storefront API `product` query.

use serde::{Deserialize, Serialize};

use crate::catalog::SelectedOption;
use crate::ids::{ProductId, VariantId};

/// Product query used by the product page loader.
///
/// `adjacentVariants` returns every variant that differs from the selected
/// one by a single option, which is what the option selector needs to decide
/// whether a combination exists.
pub const PRODUCT_QUERY: &str = r#"
  query Product($handle: String!, $selectedOptions: [SelectedOptionInput!]!) {
    product(handle: $handle) {
      id
      title
      handle
      description
      options {
        name
        optionValues {
          name
          firstSelectableVariant {
            ...ProductVariant
          }
          swatch {
            color
            image {
              previewImage {
                url
              }
            }
          }
        }
      }
      selectedOrFirstAvailableVariant(selectedOptions: $selectedOptions, ignoreUnknownOptions: true, caseInsensitiveMatch: true) {
        ...ProductVariant
      }
      adjacentVariants(selectedOptions: $selectedOptions) {
        ...ProductVariant
      }
    }
  }

  fragment ProductVariant on ProductVariant {
    id
    title
    availableForSale
    selectedOptions {
      name
      value
    }
    product {
      handle
    }
  }
"#;

/// `data` of [`PRODUCT_QUERY`].
#[derive(Debug, Clone, Deserialize)]
pub struct ProductQueryData {
    pub product: Option<ProductSnapshot>,
}

/// The product fields the product page needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSnapshot {
    pub id: ProductId,
    pub title: String,
    pub handle: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub options: Vec<ProductOptionSource>,
    #[serde(default)]
    pub selected_or_first_available_variant: Option<VariantSnapshot>,
    #[serde(default)]
    pub adjacent_variants: Vec<VariantSnapshot>,
}

/// An option as declared on the product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductOptionSource {
    pub name: String,
    #[serde(default)]
    pub option_values: Vec<OptionValueSource>,
}

/// One declared value of an option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionValueSource {
    pub name: String,
    #[serde(default)]
    pub first_selectable_variant: Option<VariantSnapshot>,
    #[serde(default)]
    pub swatch: Option<SwatchSource>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwatchSource {
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub image: Option<SwatchImage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwatchImage {
    #[serde(default)]
    pub preview_image: Option<PreviewImage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewImage {
    pub url: String,
}

/// A purchasable variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantSnapshot {
    pub id: VariantId,
    #[serde(default)]
    pub title: Option<String>,
    pub available_for_sale: bool,
    #[serde(default)]
    pub selected_options: Vec<SelectedOption>,
    #[serde(default)]
    pub product: Option<ProductRef>,
}

/// The product a variant belongs to. Differs from the page's product for
/// combined listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRef {
    pub handle: String,
}

impl VariantSnapshot {
    /// Value of `option` on this variant.
    pub fn option_value(&self, option: &str) -> Option<&str> {
        self.selected_options
            .iter()
            .find(|o| o.name == option)
            .map(|o| o.value.as_str())
    }

    /// Whether this variant has exactly the given option combination.
    pub fn matches(&self, options: &[SelectedOption]) -> bool {
        self.selected_options.len() == options.len()
            && options
                .iter()
                .all(|o| self.option_value(&o.name) == Some(o.value.as_str()))
    }

    pub fn product_handle(&self) -> Option<&str> {
        self.product.as_ref().map(|p| p.handle.as_str())
    }
}
