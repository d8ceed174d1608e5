//! Cart form submission handling.

use shopfront_observability::StructuredLogger;

use crate::api::StorefrontApi;
use crate::cart::CartForm;
use crate::error::CommerceError;
use crate::ids::{CartId, VariantId};

/// What the caller should do after a cart submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartSubmitOutcome {
    /// Send the client to the checkout URL.
    Redirect {
        url: String,
        /// Cart the line went into, for later submissions.
        cart_id: Option<CartId>,
    },
    /// No checkout URL came back; stay on the current page.
    Stay,
}

impl CartSubmitOutcome {
    pub fn redirect_url(&self) -> Option<&str> {
        match self {
            CartSubmitOutcome::Redirect { url, .. } => Some(url),
            CartSubmitOutcome::Stay => None,
        }
    }
}

/// Turns a cart form into one cart mutation and a redirect.
///
/// A form with a cart id appends to that cart; without one a new cart is
/// created. Exactly one mutation runs per call.
pub struct CartSubmitHandler<'a, A: ?Sized> {
    api: &'a A,
    logger: &'a StructuredLogger,
}

impl<'a, A: StorefrontApi + ?Sized> CartSubmitHandler<'a, A> {
    pub fn new(api: &'a A, logger: &'a StructuredLogger) -> Self {
        Self { api, logger }
    }

    /// Run the mutation for `form`.
    ///
    /// Transport and API failures are returned as errors. Any response
    /// without a checkout URL yields [`CartSubmitOutcome::Stay`], including
    /// one that only carries `userErrors`.
    pub fn submit(&self, form: &CartForm) -> Result<CartSubmitOutcome, CommerceError> {
        let mutation = form.mutation();

        let started = self
            .logger
            .info_builder("cart line add started")
            .field("mutation", mutation.kind().as_str())
            .field_opt("cart_id", form.cart_id.as_ref().map(CartId::as_str))
            .field_opt("variant_id", form.variant_id.as_ref().map(VariantId::as_str));
        match form.quantity {
            Some(quantity) => started.field_i64("quantity", quantity),
            None => started.field_bool("quantity_not_a_number", true),
        }
        .emit();

        let result = match self.api.cart_mutation(&mutation) {
            Ok(result) => result,
            Err(e) => {
                self.logger
                    .error_builder("cart mutation failed")
                    .field("mutation", mutation.kind().as_str())
                    .field("error", e.to_string())
                    .emit();
                return Err(e);
            }
        };

        let messages: Vec<&str> = result
            .user_errors()
            .iter()
            .map(|e| e.message.as_str())
            .collect();
        let user_errors = (!messages.is_empty()).then(|| messages.join("; "));

        let Some(url) = result.checkout_url() else {
            self.logger
                .warn_builder("cart mutation returned no checkout url")
                .field("mutation", mutation.kind().as_str())
                .field_opt("user_errors", user_errors.as_deref())
                .emit();
            return Ok(CartSubmitOutcome::Stay);
        };

        if let Some(user_errors) = &user_errors {
            self.logger
                .warn_builder("cart mutation returned user errors with a checkout url")
                .field("user_errors", user_errors.as_str())
                .emit();
        }

        let cart_id = result.cart().map(|c| c.id.clone());
        self.logger
            .info_builder("cart line add completed")
            .field("mutation", mutation.kind().as_str())
            .field_opt("cart_id", cart_id.as_ref().map(CartId::as_str))
            .emit();

        Ok(CartSubmitOutcome::Redirect {
            url: url.to_string(),
            cart_id,
        })
    }
}
