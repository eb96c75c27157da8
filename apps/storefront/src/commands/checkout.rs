//! # Checkout Command
//!
//! Prices the cart, runs the submit gate and, when the order is ready,
//! produces the WhatsApp message and its link. The cart is not cleared:
//! the order is only final once the kitchen confirms it on WhatsApp.
//!
//! ## User Workflow
//! ```text
//! $ lpi-storefront checkout --name Riya --phone 9876543210 \
//!       --address "C-14, Sector 62" --pin 201301
//!      │
//!      ├── quote      subtotal / delivery / total
//!      ├── decision   can_submit + blockers
//!      └── ready?     order message + https://wa.me/917505266931?text=…
//! ```

use serde::Serialize;
use tracing::{debug, info};

use lpi_core::checkout::{evaluate_submission, CheckoutForm, CheckoutQuote, SubmitDecision};
use lpi_core::order::{compose_order_message, order_link};
use lpi_core::validation::digits_only;
use lpi_core::{PHONE_DIGITS, PIN_CODE_DIGITS};
use lpi_store::{CartStore, LocalStorage};

use crate::config::AppConfig;
use crate::error::AppResult;

/// Everything the checkout page shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub quote: CheckoutQuote,
    pub decision: SubmitDecision,

    /// Present only when `decision.can_submit`.
    pub message: Option<String>,

    /// `https://wa.me/…` link carrying `message`.
    pub link: Option<String>,
}

/// Runs checkout against the current cart.
///
/// Phone and PIN are cleaned the way the form inputs clean them: non-digits
/// dropped, length capped.
pub fn checkout<S: LocalStorage>(
    store: &CartStore<S>,
    config: &AppConfig,
    form: CheckoutForm,
) -> AppResult<CheckoutResponse> {
    let form = CheckoutForm {
        phone: digits_only(&form.phone, PHONE_DIGITS),
        pin_code: digits_only(&form.pin_code, PIN_CODE_DIGITS),
        ..form
    };
    let policy = config.delivery_policy();

    let (quote, decision) = store.with_cart(|cart| {
        (policy.quote(cart), evaluate_submission(cart, &form, &policy))
    });
    debug!(can_submit = decision.can_submit, blockers = ?decision.blockers, "checkout command");

    if !decision.can_submit {
        return Ok(CheckoutResponse {
            quote,
            decision,
            message: None,
            link: None,
        });
    }

    let message =
        store.with_cart(|cart| compose_order_message(cart, &form, &policy, &config.kitchen_name))?;
    let link = order_link(&config.whatsapp_number, &message)?;

    info!(total = %quote.grand_total, "Order ready to send");

    Ok(CheckoutResponse {
        quote,
        decision,
        message: Some(message),
        link: Some(link.to_string()),
    })
}
