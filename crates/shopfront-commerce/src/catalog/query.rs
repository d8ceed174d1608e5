//! Variant selection <-> URL query string.
//!
//! Uses `application/x-www-form-urlencoded` rules: spaces become `+`, and
//! everything outside `A-Za-z0-9*-._` is percent-encoded.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::catalog::SelectedOption;

const FORM_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'*')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_');

fn encode_component(s: &str) -> String {
    utf8_percent_encode(s, FORM_COMPONENT)
        .to_string()
        .replace("%20", "+")
}

pub(crate) fn decode_component(s: &str) -> String {
    let spaced = s.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

/// Encode a variant's options as `name=value&...`, in option order.
pub fn encode_variant_query(options: &[SelectedOption]) -> String {
    options
        .iter()
        .map(|o| format!("{}={}", encode_component(&o.name), encode_component(&o.value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Decode the selected options from a page's query string.
///
/// A leading `?` is ignored, as are empty pairs and pairs without a name.
/// When a name repeats, the first value wins.
pub fn selected_options_from_query(query: &str) -> Vec<SelectedOption> {
    let mut options: Vec<SelectedOption> = Vec::new();
    for pair in query.trim_start_matches('?').split('&') {
        if pair.is_empty() {
            continue;
        }
        let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
        let name = decode_component(name);
        if name.is_empty() || options.iter().any(|o| o.name == name) {
            continue;
        }
        options.push(SelectedOption::new(name, decode_component(value)));
    }
    options
}
