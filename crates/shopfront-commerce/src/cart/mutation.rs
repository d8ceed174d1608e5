//! Storefront cart mutations and their results.

use serde::{Deserialize, Serialize};

use crate::cart::CartLineInput;
use crate::ids::CartId;

/// Creates a cart holding the given lines.
pub const CART_CREATE_MUTATION: &str = r#"
  mutation CartCreate($input: CartInput!) {
    cartCreate(input: $input) {
      cart {
        id
        checkoutUrl
      }
      userErrors {
        field
        message
        code
      }
    }
  }
"#;

/// Appends lines to an existing cart.
pub const CART_LINES_ADD_MUTATION: &str = r#"
  mutation CartLinesAdd($cartId: ID!, $lines: [CartLineInput!]!) {
    cartLinesAdd(cartId: $cartId, lines: $lines) {
      cart {
        id
        checkoutUrl
      }
      userErrors {
        field
        message
        code
      }
    }
  }
"#;

/// Which cart mutation to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartMutationKind {
    Create,
    LinesAdd,
}

impl CartMutationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CartMutationKind::Create => "cartCreate",
            CartMutationKind::LinesAdd => "cartLinesAdd",
        }
    }
}

/// A cart mutation ready to send.
#[derive(Debug, Clone, PartialEq)]
pub enum CartMutation {
    /// No cart yet: create one with these lines.
    Create { lines: Vec<CartLineInput> },
    /// Append lines to an existing cart.
    LinesAdd {
        cart_id: CartId,
        lines: Vec<CartLineInput>,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateVariables<'a> {
    input: CreateInput<'a>,
}

#[derive(Serialize)]
struct CreateInput<'a> {
    lines: &'a [CartLineInput],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LinesAddVariables<'a> {
    cart_id: &'a CartId,
    lines: &'a [CartLineInput],
}

impl CartMutation {
    /// Append to `cart_id` when there is one, otherwise create a cart.
    pub fn for_lines(cart_id: Option<CartId>, lines: Vec<CartLineInput>) -> Self {
        match cart_id {
            Some(cart_id) => CartMutation::LinesAdd { cart_id, lines },
            None => CartMutation::Create { lines },
        }
    }

    pub fn kind(&self) -> CartMutationKind {
        match self {
            CartMutation::Create { .. } => CartMutationKind::Create,
            CartMutation::LinesAdd { .. } => CartMutationKind::LinesAdd,
        }
    }

    pub fn lines(&self) -> &[CartLineInput] {
        match self {
            CartMutation::Create { lines } | CartMutation::LinesAdd { lines, .. } => lines,
        }
    }

    pub fn cart_id(&self) -> Option<&CartId> {
        match self {
            CartMutation::Create { .. } => None,
            CartMutation::LinesAdd { cart_id, .. } => Some(cart_id),
        }
    }

    /// GraphQL document for this mutation.
    pub fn document(&self) -> &'static str {
        match self {
            CartMutation::Create { .. } => CART_CREATE_MUTATION,
            CartMutation::LinesAdd { .. } => CART_LINES_ADD_MUTATION,
        }
    }

    /// GraphQL variables for this mutation.
    pub fn variables(&self) -> Result<serde_json::Value, serde_json::Error> {
        match self {
            CartMutation::Create { lines } => serde_json::to_value(CreateVariables {
                input: CreateInput { lines },
            }),
            CartMutation::LinesAdd { cart_id, lines } => {
                serde_json::to_value(LinesAddVariables { cart_id, lines })
            }
        }
    }
}

/// The `cart` returned by a mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    pub id: CartId,
    #[serde(default)]
    pub checkout_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartUserError {
    #[serde(default)]
    pub field: Option<Vec<String>>,
    pub message: String,
    #[serde(default)]
    pub code: Option<String>,
}

/// Payload shared by `cartCreate` and `cartLinesAdd`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartPayload {
    #[serde(default)]
    pub cart: Option<CartSnapshot>,
    #[serde(default)]
    pub user_errors: Vec<CartUserError>,
}

impl CartPayload {
    fn checkout_url(&self) -> Option<&str> {
        self.cart
            .as_ref()
            .and_then(|c| c.checkout_url.as_deref())
            .filter(|url| !url.is_empty())
    }
}

/// `data` of either cart mutation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartMutationData {
    #[serde(default)]
    pub cart_create: Option<CartPayload>,
    #[serde(default)]
    pub cart_lines_add: Option<CartPayload>,
}

impl CartMutationData {
    /// Pick the payload to act on.
    ///
    /// A payload with a checkout URL wins over one without; between two
    /// such payloads `cartCreate` wins.
    pub fn into_result(self) -> CartMutationResult {
        let create_has_url = self
            .cart_create
            .as_ref()
            .is_some_and(|p| p.checkout_url().is_some());
        let add_has_url = self
            .cart_lines_add
            .as_ref()
            .is_some_and(|p| p.checkout_url().is_some());

        match (self.cart_create, self.cart_lines_add) {
            (Some(create), _) if create_has_url => CartMutationResult::Created(create),
            (_, Some(added)) if add_has_url => CartMutationResult::LinesAdded(added),
            (Some(create), _) => CartMutationResult::Created(create),
            (None, Some(added)) => CartMutationResult::LinesAdded(added),
            (None, None) => CartMutationResult::Empty,
        }
    }
}

/// Result of a cart mutation, by mutation kind.
#[derive(Debug, Clone, PartialEq)]
pub enum CartMutationResult {
    Created(CartPayload),
    LinesAdded(CartPayload),
    /// Neither payload was present.
    Empty,
}

impl CartMutationResult {
    pub fn payload(&self) -> Option<&CartPayload> {
        match self {
            CartMutationResult::Created(p) | CartMutationResult::LinesAdded(p) => Some(p),
            CartMutationResult::Empty => None,
        }
    }

    pub fn cart(&self) -> Option<&CartSnapshot> {
        self.payload().and_then(|p| p.cart.as_ref())
    }

    /// Non-empty checkout URL, if any.
    pub fn checkout_url(&self) -> Option<&str> {
        self.payload().and_then(CartPayload::checkout_url)
    }

    pub fn user_errors(&self) -> &[CartUserError] {
        self.payload().map(|p| p.user_errors.as_slice()).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::VariantId;

    fn line() -> CartLineInput {
        CartLineInput::new(VariantId::new("gid://shop/Variant/1"), 2)
    }

    #[test]
    fn test_for_lines_picks_mutation() {
        let create = CartMutation::for_lines(None, vec![line()]);
        assert_eq!(create.kind(), CartMutationKind::Create);
        assert_eq!(create.document(), CART_CREATE_MUTATION);

        let add = CartMutation::for_lines(Some(CartId::new("c1")), vec![line()]);
        assert_eq!(add.kind(), CartMutationKind::LinesAdd);
        assert_eq!(add.cart_id().map(CartId::as_str), Some("c1"));
        assert_eq!(add.document(), CART_LINES_ADD_MUTATION);
    }

    #[test]
    fn test_create_variables() {
        let vars = CartMutation::for_lines(None, vec![line()]).variables().unwrap();
        assert_eq!(
            vars,
            serde_json::json!({
                "input": {"lines": [{"merchandiseId": "gid://shop/Variant/1", "quantity": 2}]}
            })
        );
    }

    #[test]
    fn test_lines_add_variables() {
        let vars = CartMutation::for_lines(Some(CartId::new("c1")), vec![line()])
            .variables()
            .unwrap();
        assert_eq!(
            vars,
            serde_json::json!({
                "cartId": "c1",
                "lines": [{"merchandiseId": "gid://shop/Variant/1", "quantity": 2}]
            })
        );
    }

    #[test]
    fn test_into_result_create() {
        let data: CartMutationData = serde_json::from_str(
            r#"{"cartCreate": {"cart": {"id": "c1", "checkoutUrl": "https://shop/checkout/c1"}, "userErrors": []}}"#,
        )
        .unwrap();
        let result = data.into_result();
        assert!(matches!(result, CartMutationResult::Created(_)));
        assert_eq!(result.checkout_url(), Some("https://shop/checkout/c1"));
        assert_eq!(result.cart().map(|c| c.id.as_str()), Some("c1"));
    }

    #[test]
    fn test_into_result_create_wins_when_both_have_urls() {
        let data: CartMutationData = serde_json::from_str(
            r#"{
                "cartCreate": {"cart": {"id": "c1", "checkoutUrl": "https://shop/create"}},
                "cartLinesAdd": {"cart": {"id": "c2", "checkoutUrl": "https://shop/add"}}
            }"#,
        )
        .unwrap();
        assert_eq!(data.into_result().checkout_url(), Some("https://shop/create"));
    }

    #[test]
    fn test_into_result_skips_empty_url() {
        let data: CartMutationData = serde_json::from_str(
            r#"{
                "cartCreate": {"cart": {"id": "c1", "checkoutUrl": ""}},
                "cartLinesAdd": {"cart": {"id": "c2", "checkoutUrl": "https://shop/add"}}
            }"#,
        )
        .unwrap();
        let result = data.into_result();
        assert!(matches!(result, CartMutationResult::LinesAdded(_)));
        assert_eq!(result.checkout_url(), Some("https://shop/add"));
    }

    #[test]
    fn test_into_result_without_url() {
        let data: CartMutationData = serde_json::from_str(
            r#"{"cartLinesAdd": {"cart": null, "userErrors": [{"field": ["lines"], "message": "Merchandise is sold out", "code": "INVALID"}]}}"#,
        )
        .unwrap();
        let result = data.into_result();
        assert_eq!(result.checkout_url(), None);
        assert_eq!(result.user_errors()[0].message, "Merchandise is sold out");

        let empty = CartMutationData::default().into_result();
        assert_eq!(empty, CartMutationResult::Empty);
        assert_eq!(empty.checkout_url(), None);
        assert!(empty.user_errors().is_empty());
    }
}
