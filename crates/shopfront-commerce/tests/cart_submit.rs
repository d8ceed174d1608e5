//! Cart-submit handler driven through an in-memory Storefront API.

use std::cell::RefCell;

use shopfront_commerce::cart::{CartMutationData, CartPayload, CartSnapshot, CartUserError};
use shopfront_commerce::prelude::*;
use shopfront_observability::{LogLevel, LogSink, RequestId};

/// Records every mutation and answers with a canned result.
struct RecordingApi {
    calls: RefCell<Vec<CartMutation>>,
    reply: Box<dyn Fn(&CartMutation) -> Result<CartMutationResult, CommerceError>>,
}

impl RecordingApi {
    fn replying(
        reply: impl Fn(&CartMutation) -> Result<CartMutationResult, CommerceError> + 'static,
    ) -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            reply: Box::new(reply),
        }
    }

    /// Echoes a cart with a checkout URL under the field matching the mutation.
    fn checkout() -> Self {
        Self::replying(|m| {
            let payload = CartPayload {
                cart: Some(CartSnapshot {
                    id: CartId::new("gid://shop/Cart/c1"),
                    checkout_url: Some("https://shop.example/checkouts/c1".to_string()),
                }),
                user_errors: Vec::new(),
            };
            Ok(match m.kind() {
                CartMutationKind::Create => CartMutationResult::Created(payload),
                CartMutationKind::LinesAdd => CartMutationResult::LinesAdded(payload),
            })
        })
    }

    fn calls(&self) -> Vec<CartMutation> {
        self.calls.borrow().clone()
    }
}

impl StorefrontApi for RecordingApi {
    fn cart_mutation(&self, mutation: &CartMutation) -> Result<CartMutationResult, CommerceError> {
        self.calls.borrow_mut().push(mutation.clone());
        (self.reply)(mutation)
    }

    fn product(
        &self,
        _handle: &str,
        _selected_options: &[SelectedOption],
    ) -> Result<Option<ProductSnapshot>, CommerceError> {
        Ok(None)
    }
}

fn logger() -> (StructuredLogger, LogSink) {
    let sink = LogSink::memory();
    let logger = StructuredLogger::new(RequestId::from_string("test"))
        .with_route("/products/:handle")
        .with_sink(sink.clone());
    (logger, sink)
}

#[test]
fn test_without_cart_id_creates_cart() {
    let api = RecordingApi::checkout();
    let (logger, _) = logger();
    let form = CartForm::from_fields(Some("gid://shop/Variant/1"), Some("2"), None);

    CartSubmitHandler::new(&api, &logger).submit(&form).unwrap();

    assert_eq!(
        api.calls(),
        vec![CartMutation::Create {
            lines: vec![CartLineInput::new(VariantId::new("gid://shop/Variant/1"), 2)]
        }]
    );
}

#[test]
fn test_with_cart_id_adds_lines() {
    let api = RecordingApi::checkout();
    let (logger, _) = logger();
    let form = CartForm::from_urlencoded(
        "variantId=gid%3A%2F%2Fshop%2FVariant%2F1&cartId=gid%3A%2F%2Fshop%2FCart%2Fc1",
    );

    CartSubmitHandler::new(&api, &logger).submit(&form).unwrap();

    let calls = api.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].kind(), CartMutationKind::LinesAdd);
    assert_eq!(calls[0].cart_id().map(CartId::as_str), Some("gid://shop/Cart/c1"));
    assert_eq!(
        calls[0].lines(),
        &[CartLineInput::new(VariantId::new("gid://shop/Variant/1"), 1)]
    );
}

#[test]
fn test_redirects_to_checkout_url() {
    let api = RecordingApi::checkout();
    let (logger, sink) = logger();
    let form = CartForm::new(VariantId::new("gid://shop/Variant/1"));

    let outcome = CartSubmitHandler::new(&api, &logger).submit(&form).unwrap();

    assert_eq!(
        outcome,
        CartSubmitOutcome::Redirect {
            url: "https://shop.example/checkouts/c1".to_string(),
            cart_id: Some(CartId::new("gid://shop/Cart/c1")),
        }
    );
    let messages: Vec<String> = sink.entries().into_iter().map(|e| e.message).collect();
    assert_eq!(messages, vec!["cart line add started", "cart line add completed"]);
}

#[test]
fn test_create_result_takes_precedence() {
    let api = RecordingApi::replying(|_| {
        let data: CartMutationData = serde_json::from_str(
            r#"{
                "cartCreate": {"cart": {"id": "c1", "checkoutUrl": "https://shop.example/create"}},
                "cartLinesAdd": {"cart": {"id": "c2", "checkoutUrl": "https://shop.example/add"}}
            }"#,
        )?;
        Ok(data.into_result())
    });
    let (logger, _) = logger();
    let form = CartForm::new(VariantId::new("v1"));

    let outcome = CartSubmitHandler::new(&api, &logger).submit(&form).unwrap();
    assert_eq!(outcome.redirect_url(), Some("https://shop.example/create"));
}

#[test]
fn test_no_checkout_url_stays() {
    let api = RecordingApi::replying(|_| {
        Ok(CartMutationResult::Created(CartPayload {
            cart: Some(CartSnapshot {
                id: CartId::new("c1"),
                checkout_url: None,
            }),
            user_errors: Vec::new(),
        }))
    });
    let (logger, sink) = logger();
    let form = CartForm::new(VariantId::new("v1"));

    let outcome = CartSubmitHandler::new(&api, &logger).submit(&form).unwrap();

    assert_eq!(outcome, CartSubmitOutcome::Stay);
    assert_eq!(outcome.redirect_url(), None);
    assert!(sink.entries().iter().any(|e| e.level == LogLevel::Warn));
}

#[test]
fn test_empty_response_stays() {
    let api = RecordingApi::replying(|_| Ok(CartMutationResult::Empty));
    let (logger, _) = logger();
    let form = CartForm::new(VariantId::new("v1"));

    let outcome = CartSubmitHandler::new(&api, &logger).submit(&form).unwrap();
    assert_eq!(outcome, CartSubmitOutcome::Stay);
}

#[test]
fn test_user_errors_without_url_stay() {
    let api = RecordingApi::replying(|_| {
        let data: CartMutationData = serde_json::from_str(
            r#"{"cartCreate": {"cart": null, "userErrors": [{"message": "quantity must be positive"}]}}"#,
        )?;
        Ok(data.into_result())
    });
    let (logger, sink) = logger();
    let form = CartForm::from_fields(Some("v1"), Some("0"), None);

    let outcome = CartSubmitHandler::new(&api, &logger).submit(&form).unwrap();

    assert_eq!(outcome, CartSubmitOutcome::Stay);
    let warning = sink
        .entries()
        .into_iter()
        .find(|e| e.level == LogLevel::Warn)
        .unwrap();
    assert_eq!(
        warning.fields["user_errors"],
        serde_json::json!("quantity must be positive")
    );
    assert!(sink.entries().iter().all(|e| e.level != LogLevel::Error));
}

#[test]
fn test_rejected_lines_add_stays() {
    let api = RecordingApi::replying(|_| {
        Ok(CartMutationResult::LinesAdded(CartPayload {
            cart: None,
            user_errors: vec![CartUserError {
                field: Some(vec!["lines".to_string()]),
                message: "The merchandise is out of stock".to_string(),
                code: None,
            }],
        }))
    });
    let (logger, _) = logger();
    let form = CartForm::new(VariantId::new("v1")).with_cart_id(CartId::new("c1"));

    let outcome = CartSubmitHandler::new(&api, &logger).submit(&form).unwrap();
    assert_eq!(outcome, CartSubmitOutcome::Stay);
}

#[test]
fn test_missing_variant_is_sent_unvalidated() {
    let api = RecordingApi::replying(|_| Err(CommerceError::Api(vec!["invalid id".to_string()])));
    let (logger, _) = logger();
    let form = CartForm::from_fields(None, Some("1"), None);

    let err = CartSubmitHandler::new(&api, &logger).submit(&form).unwrap_err();

    assert!(matches!(err, CommerceError::Api(_)));
    let calls = api.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0].variables().unwrap(),
        serde_json::json!({"input": {"lines": [{"merchandiseId": null, "quantity": 1}]}})
    );
}

#[test]
fn test_non_numeric_quantity_is_sent_as_null() {
    let api = RecordingApi::checkout();
    let (logger, sink) = logger();
    let form = CartForm::from_urlencoded("variantId=v1&quantity=many&cartId=c1");

    CartSubmitHandler::new(&api, &logger).submit(&form).unwrap();

    assert_eq!(
        api.calls()[0].variables().unwrap(),
        serde_json::json!({"cartId": "c1", "lines": [{"merchandiseId": "v1", "quantity": null}]})
    );
    assert_eq!(
        sink.entries()[0].fields["quantity_not_a_number"],
        serde_json::json!(true)
    );
}

#[test]
fn test_api_failure_propagates_and_is_logged() {
    let api =
        RecordingApi::replying(|_| Err(CommerceError::Upstream("connection reset".to_string())));
    let (logger, sink) = logger();
    let form = CartForm::new(VariantId::new("v1"));

    let err = CartSubmitHandler::new(&api, &logger).submit(&form).unwrap_err();

    assert!(matches!(err, CommerceError::Upstream(_)));
    assert_eq!(api.calls().len(), 1);
    let entries = sink.entries();
    let last = entries.last().unwrap();
    assert_eq!(last.message, "cart mutation failed");
    assert_eq!(last.fields["mutation"], serde_json::json!("cartCreate"));
}

#[test]
fn test_add_to_cart_then_continue_cart() {
    let api = RecordingApi::checkout();
    let (logger, _) = logger();
    let variant = SelectedVariant {
        id: VariantId::new("v1"),
        available_for_sale: true,
        title: None,
        selected_options: Vec::new(),
    };
    let view = AddToCartView::new(Some(&variant));
    let handler = CartSubmitHandler::new(&api, &logger);

    let first = handler.submit(&view.form(None).unwrap()).unwrap();
    let cart_id = match first {
        CartSubmitOutcome::Redirect { cart_id, .. } => cart_id,
        CartSubmitOutcome::Stay => None,
    };
    handler.submit(&view.form(cart_id).unwrap()).unwrap();

    let kinds: Vec<CartMutationKind> = api.calls().iter().map(CartMutation::kind).collect();
    assert_eq!(kinds, vec![CartMutationKind::Create, CartMutationKind::LinesAdd]);
}
