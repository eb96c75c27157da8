//! # Order Message
//!
//! Turns a ready cart and a filled form into the WhatsApp text the kitchen
//! receives, and the `wa.me` link that pre-fills it.
//!
//! ```text
//! Cart + CheckoutForm
//!      │
//!      ├── evaluate_submission() blocks? → OrderError::NotReady
//!      │
//!      ▼
//! compose_order_message() ──► String ──► order_link() ──► https://wa.me/…?text=…
//! ```

use tracing::debug;
use url::Url;

use crate::cart::Cart;
use crate::checkout::{evaluate_submission, CheckoutForm, DeliveryPolicy};
use crate::error::OrderError;

/// Base URL for WhatsApp click-to-chat.
pub const WHATSAPP_BASE_URL: &str = "https://wa.me/";

/// Builds the order text for the kitchen.
///
/// ## Behavior
/// - Refuses with [`OrderError::NotReady`] unless the submit gate passes
/// - One line per cart line: `{qty} × {name} - {price} = {line total}`
/// - Subtotal and final amount always carry two decimals
/// - Empty special instructions print as "None"
///
/// Form fields are trimmed; the cart is only read.
pub fn compose_order_message(
    cart: &Cart,
    form: &CheckoutForm,
    policy: &DeliveryPolicy,
    kitchen_name: &str,
) -> Result<String, OrderError> {
    let decision = evaluate_submission(cart, form, policy);
    if !decision.can_submit {
        return Err(OrderError::NotReady {
            reason: decision.reason,
        });
    }

    let quote = policy.quote(cart);
    let notes = form.special_instructions.trim();

    let mut out: Vec<String> = vec![
        format!("Hello {kitchen_name} Team!"),
        String::new(),
        "Order Details:".to_string(),
    ];
    out.extend(cart.lines().iter().map(|line| {
        format!(
            "{} × {} - {} = {}",
            line.quantity,
            line.name,
            line.price,
            line.line_total().display_compact()
        )
    }));
    out.extend([
        String::new(),
        format!("Subtotal: {}", quote.subtotal),
        format!(
            "Delivery Charge: {}",
            quote.delivery_charge.display_compact()
        ),
        format!("Final Amount: {}", quote.grand_total),
        String::new(),
        format!("Customer Name: {}", form.customer_name.trim()),
        format!("WhatsApp/Phone Number: {}", form.phone.trim()),
        String::new(),
        "Delivery Address:".to_string(),
        form.address.trim().to_string(),
        format!("PIN: {}", form.pin_code.trim()),
        String::new(),
        "Special Instructions / Notes:".to_string(),
        if notes.is_empty() { "None" } else { notes }.to_string(),
        String::new(),
        "Please confirm the order. Thank you!".to_string(),
    ]);
    let message = out.join("\n");

    debug!(
        lines = cart.distinct_items(),
        total = %quote.grand_total,
        "Composed order message"
    );

    Ok(message)
}

/// Builds the click-to-chat link for `phone` (country code included, digits
/// only) with `message` pre-filled.
///
/// ## Example
/// ```rust
/// use lpi_core::order::order_link;
///
/// let link = order_link("917505266931", "2 × Naan").unwrap();
/// assert_eq!(link.as_str(), "https://wa.me/917505266931?text=2%20%C3%97%20Naan");
/// ```
pub fn order_link(phone: &str, message: &str) -> Result<Url, OrderError> {
    let phone = phone.trim();
    if phone.is_empty() || !phone.bytes().all(|b| b.is_ascii_digit()) {
        return Err(OrderError::InvalidLink(format!(
            "WhatsApp number must be digits only, got {phone:?}"
        )));
    }

    let mut url = Url::parse(WHATSAPP_BASE_URL)
        .and_then(|base| base.join(phone))
        .map_err(|e| OrderError::InvalidLink(e.to_string()))?;

    let query = format!("text={}", urlencoding::encode(message));
    url.set_query(Some(&query));

    Ok(url)
}
