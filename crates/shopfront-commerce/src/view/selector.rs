//! Option selector view model.
//!
//! Decides, per option value, which control the product form renders and
//! how it looks. The Leptos components only translate these into markup.

use crate::catalog::{ProductOption, ProductOptionValue, Swatch};

/// Base CSS class of every option control.
pub const OPTION_ITEM_CLASS: &str = "product-options-item";

/// One option with its controls. Single-valued options never produce one.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionGroupView {
    pub name: String,
    pub controls: Vec<OptionControl>,
}

/// How a value is presented.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlKind {
    /// Crawlable link to a sibling product: prefetched, replaces history,
    /// keeps scroll.
    Link { href: String },
    /// Same-product switch done with client navigation so no duplicate URL
    /// gets indexed.
    Button {
        /// Query string (with leading `?`) to navigate to on click.
        query: String,
        disabled: bool,
    },
}

/// A rendered option value.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionControl {
    /// Stable key: option name followed by value name.
    pub key: String,
    pub name: String,
    pub kind: ControlKind,
    pub selected: bool,
    pub available: bool,
    /// `exists && !selected` buttons get the extra `link` class.
    pub linkable: bool,
    pub swatch: SwatchView,
}

impl OptionControl {
    pub fn is_link(&self) -> bool {
        matches!(self.kind, ControlKind::Link { .. })
    }

    /// CSS class attribute.
    pub fn class(&self) -> String {
        if self.linkable {
            format!("{} link", OPTION_ITEM_CLASS)
        } else {
            OPTION_ITEM_CLASS.to_string()
        }
    }

    /// Inline style: black border when selected, dimmed when unavailable.
    pub fn style(&self) -> String {
        let border = if self.selected {
            "1px solid black"
        } else {
            "1px solid transparent"
        };
        let opacity = if self.available { "1" } else { "0.3" };
        format!("border: {}; opacity: {};", border, opacity)
    }

    /// Where a click on a button navigates; `None` for links, disabled
    /// buttons and the value already selected.
    pub fn click_target(&self) -> Option<&str> {
        match &self.kind {
            ControlKind::Button { query, disabled } if !*disabled && !self.selected => {
                Some(query.as_str())
            }
            _ => None,
        }
    }
}

/// Swatch presentation of a value.
#[derive(Debug, Clone, PartialEq)]
pub enum SwatchView {
    /// Plain text name.
    Label(String),
    /// Color box.
    Color { name: String, color: String },
    /// Preview image inside a box whose background is the color or
    /// `transparent`.
    Image {
        name: String,
        url: String,
        color: Option<String>,
    },
}

impl SwatchView {
    pub fn from_swatch(name: &str, swatch: Option<&Swatch>) -> Self {
        let image = swatch
            .and_then(|s| s.image_url.as_deref())
            .filter(|u| !u.is_empty());
        let color = swatch
            .and_then(|s| s.color.as_deref())
            .filter(|c| !c.is_empty());

        match (image, color) {
            (Some(url), color) => SwatchView::Image {
                name: name.to_string(),
                url: url.to_string(),
                color: color.map(str::to_string),
            },
            (None, Some(color)) => SwatchView::Color {
                name: name.to_string(),
                color: color.to_string(),
            },
            (None, None) => SwatchView::Label(name.to_string()),
        }
    }

    /// `background-color` of the swatch box.
    pub fn background(&self) -> Option<&str> {
        match self {
            SwatchView::Label(_) => None,
            SwatchView::Color { color, .. } => Some(color),
            SwatchView::Image { color, .. } => Some(color.as_deref().unwrap_or("transparent")),
        }
    }
}

/// Build the controls for every option worth showing.
pub fn option_groups(options: &[ProductOption]) -> Vec<OptionGroupView> {
    options
        .iter()
        .filter(|o| o.option_values.len() != 1)
        .map(|o| OptionGroupView {
            name: o.name.clone(),
            controls: o
                .option_values
                .iter()
                .map(|v| option_control(&o.name, v))
                .collect(),
        })
        .collect()
}

/// The control for one value of `option_name`.
pub fn option_control(option_name: &str, value: &ProductOptionValue) -> OptionControl {
    let kind = if value.is_different_product {
        ControlKind::Link {
            href: format!("/products/{}?{}", value.handle, value.variant_uri_query),
        }
    } else {
        ControlKind::Button {
            query: format!("?{}", value.variant_uri_query),
            disabled: !value.exists,
        }
    };

    OptionControl {
        key: format!("{}{}", option_name, value.name),
        name: value.name.clone(),
        linkable: !value.is_different_product && value.exists && !value.selected,
        kind,
        selected: value.selected,
        available: value.available,
        swatch: SwatchView::from_swatch(&value.name, value.swatch.as_ref()),
    }
}
