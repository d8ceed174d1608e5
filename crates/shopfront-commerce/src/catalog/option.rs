//! Product options as rendered by the product form.

use serde::{Deserialize, Serialize};

use crate::catalog::{encode_variant_query, OptionValueSource, ProductSnapshot, VariantSnapshot};
use crate::ids::VariantId;

/// A `name: value` pair identifying one option of a variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectedOption {
    pub name: String,
    pub value: String,
}

impl SelectedOption {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// The variant currently selected on the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedVariant {
    /// Also the merchandise id used by cart lines.
    pub id: VariantId,
    pub available_for_sale: bool,
    pub title: Option<String>,
    pub selected_options: Vec<SelectedOption>,
}

impl From<&VariantSnapshot> for SelectedVariant {
    fn from(v: &VariantSnapshot) -> Self {
        Self {
            id: v.id.clone(),
            available_for_sale: v.available_for_sale,
            title: v.title.clone(),
            selected_options: v.selected_options.clone(),
        }
    }
}

/// Visual swatch of an option value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Swatch {
    pub color: Option<String>,
    pub image_url: Option<String>,
}

/// A product option with its values, in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductOption {
    pub name: String,
    pub option_values: Vec<ProductOptionValue>,
}

/// One value of an option, resolved against the selected variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductOptionValue {
    pub name: String,
    /// Handle of the product the value leads to.
    pub handle: String,
    /// Query string (without `?`) selecting the value's variant.
    pub variant_uri_query: String,
    pub selected: bool,
    pub available: bool,
    /// The resulting option combination is a real variant.
    pub exists: bool,
    /// The value leads to a sibling product of a combined listing.
    pub is_different_product: bool,
    pub swatch: Option<Swatch>,
}

/// Resolve every option value of `product` against its selected variant.
///
/// For each value the target combination is the selected variant's options
/// with that option swapped for the value. The value points at the variant
/// with exactly that combination when one is known, and otherwise at the
/// value's first selectable variant.
pub fn map_product_options(product: &ProductSnapshot) -> Vec<ProductOption> {
    let selected = product.selected_or_first_available_variant.as_ref();
    let known: Vec<&VariantSnapshot> = selected
        .into_iter()
        .chain(product.adjacent_variants.iter())
        .collect();

    product
        .options
        .iter()
        .map(|option| ProductOption {
            name: option.name.clone(),
            option_values: option
                .option_values
                .iter()
                .map(|value| map_value(product, &option.name, value, selected, &known))
                .collect(),
        })
        .collect()
}

fn map_value(
    product: &ProductSnapshot,
    option_name: &str,
    value: &OptionValueSource,
    selected: Option<&VariantSnapshot>,
    known: &[&VariantSnapshot],
) -> ProductOptionValue {
    let target = target_combination(selected, option_name, &value.name);

    let exact = known
        .iter()
        .copied()
        .chain(value.first_selectable_variant.iter())
        .find(|v| v.matches(&target));
    let chosen = exact.or(value.first_selectable_variant.as_ref());

    let handle = chosen
        .and_then(VariantSnapshot::product_handle)
        .unwrap_or(product.handle.as_str())
        .to_string();
    let is_different_product = handle != product.handle;
    let exists = exact.is_some() || (chosen.is_some() && is_different_product);
    let available = exists && chosen.map(|v| v.available_for_sale).unwrap_or(false);

    let variant_uri_query = match chosen {
        Some(v) => encode_variant_query(&v.selected_options),
        None => encode_variant_query(&target),
    };

    let is_selected = selected
        .and_then(|v| v.option_value(option_name))
        .map(|current| current == value.name)
        .unwrap_or(false);

    ProductOptionValue {
        name: value.name.clone(),
        handle,
        variant_uri_query,
        selected: is_selected,
        available,
        exists,
        is_different_product,
        swatch: value.swatch.as_ref().map(|s| Swatch {
            color: s.color.clone(),
            image_url: s
                .image
                .as_ref()
                .and_then(|i| i.preview_image.as_ref())
                .map(|p| p.url.clone()),
        }),
    }
}

fn target_combination(
    selected: Option<&VariantSnapshot>,
    option_name: &str,
    value: &str,
) -> Vec<SelectedOption> {
    let mut target: Vec<SelectedOption> = selected
        .map(|v| v.selected_options.clone())
        .unwrap_or_default();

    match target.iter_mut().find(|o| o.name == option_name) {
        Some(o) => o.value = value.to_string(),
        None => target.push(SelectedOption::new(option_name, value)),
    }
    target
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{PreviewImage, ProductOptionSource, ProductRef, SwatchImage, SwatchSource};
    use crate::ids::ProductId;

    fn variant(id: &str, handle: &str, available: bool, opts: &[(&str, &str)]) -> VariantSnapshot {
        VariantSnapshot {
            id: VariantId::new(id),
            title: None,
            available_for_sale: available,
            selected_options: opts.iter().map(|(n, v)| SelectedOption::new(*n, *v)).collect(),
            product: Some(ProductRef {
                handle: handle.to_string(),
            }),
        }
    }

    fn value(name: &str, first: Option<VariantSnapshot>) -> OptionValueSource {
        OptionValueSource {
            name: name.to_string(),
            first_selectable_variant: first,
            swatch: None,
        }
    }

    fn blue_154() -> VariantSnapshot {
        variant(
            "v-154-blue",
            "snowboard",
            true,
            &[("Size", "154cm"), ("Color", "Blue")],
        )
    }

    fn snowboard() -> ProductSnapshot {
        ProductSnapshot {
            id: ProductId::new("gid://shopify/Product/1"),
            title: "Snowboard".to_string(),
            handle: "snowboard".to_string(),
            description: None,
            options: vec![
                ProductOptionSource {
                    name: "Size".to_string(),
                    option_values: vec![
                        value("154cm", Some(blue_154())),
                        value(
                            "158cm",
                            Some(variant(
                                "v-158-blue",
                                "snowboard",
                                false,
                                &[("Size", "158cm"), ("Color", "Blue")],
                            )),
                        ),
                        value(
                            "162cm",
                            Some(variant(
                                "v-162-red",
                                "snowboard",
                                true,
                                &[("Size", "162cm"), ("Color", "Red")],
                            )),
                        ),
                    ],
                },
                ProductOptionSource {
                    name: "Color".to_string(),
                    option_values: vec![
                        value("Blue", Some(blue_154())),
                        value(
                            "Green",
                            Some(variant(
                                "g-1",
                                "snowboard-green",
                                true,
                                &[("Size", "154cm"), ("Color", "Green")],
                            )),
                        ),
                    ],
                },
            ],
            selected_or_first_available_variant: Some(variant(
                "v-154-blue",
                "snowboard",
                true,
                &[("Size", "154cm"), ("Color", "Blue")],
            )),
            adjacent_variants: vec![variant(
                "v-158-blue",
                "snowboard",
                false,
                &[("Size", "158cm"), ("Color", "Blue")],
            )],
        }
    }

    #[test]
    fn test_selected_value_is_flagged() {
        let options = map_product_options(&snowboard());
        let size = &options[0];
        assert_eq!(size.name, "Size");
        assert!(size.option_values[0].selected);
        assert!(!size.option_values[1].selected);
        assert!(options[1].option_values[0].selected);
    }

    #[test]
    fn test_existing_unavailable_combination() {
        let options = map_product_options(&snowboard());
        let v158 = &options[0].option_values[1];
        assert!(v158.exists);
        assert!(!v158.available);
        assert_eq!(v158.variant_uri_query, "Size=158cm&Color=Blue");
        assert!(!v158.is_different_product);
    }

    #[test]
    fn test_missing_combination_falls_back_to_first_selectable() {
        let options = map_product_options(&snowboard());
        let v162 = &options[0].option_values[2];
        assert!(!v162.exists);
        assert!(!v162.available);
        assert_eq!(v162.variant_uri_query, "Size=162cm&Color=Red");
        assert_eq!(v162.handle, "snowboard");
    }

    #[test]
    fn test_combined_listing_value_is_different_product() {
        let options = map_product_options(&snowboard());
        let green = &options[1].option_values[1];
        assert!(green.is_different_product);
        assert_eq!(green.handle, "snowboard-green");
        assert!(green.exists);
        assert!(green.available);
        assert_eq!(green.variant_uri_query, "Size=154cm&Color=Green");
    }

    #[test]
    fn test_no_selected_variant() {
        let mut product = snowboard();
        product.selected_or_first_available_variant = None;
        product.adjacent_variants.clear();
        product.options[0].option_values[0].first_selectable_variant = None;

        let options = map_product_options(&product);
        let v154 = &options[0].option_values[0];
        assert!(!v154.selected);
        assert!(!v154.exists);
        assert_eq!(v154.variant_uri_query, "Size=154cm");
        assert_eq!(v154.handle, "snowboard");
    }

    #[test]
    fn test_swatch_projection() {
        let mut product = snowboard();
        product.options[1].option_values[0].swatch = Some(SwatchSource {
            color: Some("#0000ff".to_string()),
            image: Some(SwatchImage {
                preview_image: Some(PreviewImage {
                    url: "https://cdn.example/blue.png".to_string(),
                }),
            }),
        });

        let options = map_product_options(&product);
        let swatch = options[1].option_values[0].swatch.clone().unwrap();
        assert_eq!(swatch.color.as_deref(), Some("#0000ff"));
        assert_eq!(swatch.image_url.as_deref(), Some("https://cdn.example/blue.png"));
        assert!(options[0].option_values[0].swatch.is_none());
    }
}
