//! # Checkout
//!
//! Delivery charge, grand total, and the gate that decides whether an order
//! may be sent. Everything here reads the cart; nothing mutates it.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Cart.subtotal() ──► DeliveryPolicy::quote() ──► CheckoutQuote          │
//! │                        │                          subtotal              │
//! │                        │  < ₹250 → +₹100          delivery_charge       │
//! │                        │  ≥ ₹250 → free           grand_total           │
//! │                                                                         │
//! │  Cart + CheckoutForm ──► evaluate_submission() ──► SubmitDecision       │
//! │                            1. cart not empty        can_submit          │
//! │                            2. name ≥ 2 chars        reason              │
//! │                            3. phone = 10 digits     blockers            │
//! │                            4. address present                           │
//! │                            5. PIN well formed                           │
//! │                            6. PIN in delivery area                      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::Cart;
use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::{
    validate_address, validate_customer_name, validate_phone, validate_pin_code,
};

/// Delhi NCR PIN prefixes: Delhi, Faridabad, Gurgaon, Noida / Greater Noida,
/// Ghaziabad.
pub const NCR_PIN_PREFIXES: [&str; 5] = ["110", "121", "122", "201", "203"];

// =============================================================================
// Delivery Policy
// =============================================================================

/// Where the kitchen delivers and what it charges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryPolicy {
    /// Subtotals at or above this ship free.
    pub free_delivery_threshold: Money,

    /// Flat charge below the threshold.
    pub delivery_charge: Money,

    /// Human-readable delivery area, used in messages.
    pub area_name: String,

    /// PIN codes must start with one of these.
    pub serviceable_prefixes: Vec<String>,
}

impl Default for DeliveryPolicy {
    /// ₹100 delivery, free from ₹250, Delhi NCR only.
    fn default() -> Self {
        DeliveryPolicy {
            free_delivery_threshold: Money::from_rupees(250),
            delivery_charge: Money::from_rupees(100),
            area_name: "Delhi NCR".to_string(),
            serviceable_prefixes: NCR_PIN_PREFIXES.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl DeliveryPolicy {
    /// Delivery charge for a subtotal.
    ///
    /// ## Example
    /// ```rust
    /// use lpi_core::checkout::DeliveryPolicy;
    /// use lpi_core::Money;
    ///
    /// let policy = DeliveryPolicy::default();
    /// assert_eq!(policy.delivery_charge(Money::from_rupees(250)), Money::zero());
    /// assert_eq!(policy.delivery_charge(Money::from_paise(24999)), Money::from_rupees(100));
    /// ```
    pub fn delivery_charge(&self, subtotal: Money) -> Money {
        if subtotal >= self.free_delivery_threshold {
            Money::zero()
        } else {
            self.delivery_charge
        }
    }

    /// Subtotal plus delivery charge.
    pub fn grand_total(&self, subtotal: Money) -> Money {
        subtotal + self.delivery_charge(subtotal)
    }

    /// How much more to order for free delivery, if a charge applies.
    ///
    /// Exact to the paisa; displays round it with [`Money::round_to_rupee`].
    pub fn amount_until_free_delivery(&self, subtotal: Money) -> Option<Money> {
        (!self.delivery_charge(subtotal).is_zero())
            .then(|| self.free_delivery_threshold - subtotal)
    }

    /// Checks a PIN code's format and delivery area.
    pub fn is_serviceable(&self, pin_code: &str) -> bool {
        validate_pin_code(pin_code, self.serviceable_prefixes.as_slice()).is_ok()
    }

    /// Prices a cart.
    pub fn quote(&self, cart: &Cart) -> CheckoutQuote {
        let subtotal = cart.subtotal();
        CheckoutQuote {
            subtotal,
            delivery_charge: self.delivery_charge(subtotal),
            grand_total: self.grand_total(subtotal),
            free_delivery_shortfall: self.amount_until_free_delivery(subtotal),
        }
    }
}

/// Money breakdown shown above the order button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CheckoutQuote {
    pub subtotal: Money,
    pub delivery_charge: Money,
    pub grand_total: Money,

    /// "Add ₹X more for free delivery!"
    pub free_delivery_shortfall: Option<Money>,
}

// =============================================================================
// Checkout Form
// =============================================================================

/// What the customer typed into the checkout form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutForm {
    pub customer_name: String,
    pub phone: String,
    pub address: String,
    pub pin_code: String,

    #[serde(default)]
    pub special_instructions: String,
}

// =============================================================================
// Submit Gate
// =============================================================================

/// One reason the order button stays disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum SubmitBlocker {
    EmptyCart,
    CustomerName,
    Phone,
    Address,
    PinCode,
    UnserviceablePinCode,
}

impl SubmitBlocker {
    /// Message shown to the customer.
    pub fn describe(&self, policy: &DeliveryPolicy) -> String {
        match self {
            SubmitBlocker::EmptyCart => "Your cart is empty".to_string(),
            SubmitBlocker::CustomerName => {
                "Please enter your name (at least 2 characters)".to_string()
            }
            SubmitBlocker::Phone => "Please enter a valid 10-digit WhatsApp number".to_string(),
            SubmitBlocker::Address => "Please enter your delivery address".to_string(),
            SubmitBlocker::PinCode => "Please enter a valid 6-digit PIN code".to_string(),
            SubmitBlocker::UnserviceablePinCode => format!(
                "We currently deliver only in {}. Please enter a PIN code in our delivery area.",
                policy.area_name
            ),
        }
    }
}

/// Whether the order can be sent, and if not, why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SubmitDecision {
    pub can_submit: bool,

    /// First blocker's message, or "Ready to order".
    pub reason: String,

    /// Every failing check, in evaluation order.
    pub blockers: Vec<SubmitBlocker>,
}

/// Runs every checkout check against the cart and the form.
///
/// Pure: the same cart and form always give the same decision.
pub fn evaluate_submission(
    cart: &Cart,
    form: &CheckoutForm,
    policy: &DeliveryPolicy,
) -> SubmitDecision {
    let mut blockers = Vec::new();

    if cart.is_empty() {
        blockers.push(SubmitBlocker::EmptyCart);
    }
    if validate_customer_name(&form.customer_name).is_err() {
        blockers.push(SubmitBlocker::CustomerName);
    }
    if validate_phone(&form.phone).is_err() {
        blockers.push(SubmitBlocker::Phone);
    }
    if validate_address(&form.address).is_err() {
        blockers.push(SubmitBlocker::Address);
    }
    match validate_pin_code(&form.pin_code, policy.serviceable_prefixes.as_slice()) {
        Ok(()) => {}
        Err(ValidationError::NotServiceable { .. }) => {
            blockers.push(SubmitBlocker::UnserviceablePinCode)
        }
        Err(_) => blockers.push(SubmitBlocker::PinCode),
    }

    let reason = blockers
        .first()
        .map(|b| b.describe(policy))
        .unwrap_or_else(|| "Ready to order".to_string());

    SubmitDecision {
        can_submit: blockers.is_empty(),
        reason,
        blockers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CartItemInput;

    fn filled_form() -> CheckoutForm {
        CheckoutForm {
            customer_name: "Riya".to_string(),
            phone: "9876543210".to_string(),
            address: "C-14, Sector 62".to_string(),
            pin_code: "201301".to_string(),
            special_instructions: String::new(),
        }
    }

    fn cart_worth(price: &str) -> Cart {
        let mut cart = Cart::new();
        cart.add_item(&CartItemInput::new("Thali").with_price(price))
            .unwrap();
        cart
    }

    #[test]
    fn test_free_delivery_threshold() {
        let policy = DeliveryPolicy::default();
        assert_eq!(policy.delivery_charge(Money::from_rupees(250)), Money::zero());
        assert_eq!(
            policy.delivery_charge(Money::from_paise(24999)),
            Money::from_rupees(100)
        );
        assert_eq!(policy.delivery_charge(Money::from_rupees(900)), Money::zero());
    }

    #[test]
    fn test_grand_total_and_shortfall() {
        let policy = DeliveryPolicy::default();

        let quote = policy.quote(&cart_worth("₹180"));
        assert_eq!(quote.subtotal, Money::from_rupees(180));
        assert_eq!(quote.delivery_charge, Money::from_rupees(100));
        assert_eq!(quote.grand_total, Money::from_rupees(280));
        assert_eq!(quote.free_delivery_shortfall, Some(Money::from_rupees(70)));

        let quote = policy.quote(&cart_worth("₹250"));
        assert_eq!(quote.grand_total, Money::from_rupees(250));
        assert_eq!(quote.free_delivery_shortfall, None);
    }

    #[test]
    fn test_empty_cart_is_charged_delivery() {
        let quote = DeliveryPolicy::default().quote(&Cart::new());
        assert_eq!(quote.delivery_charge, Money::from_rupees(100));
        assert_eq!(quote.grand_total, Money::from_rupees(100));
    }

    #[test]
    fn test_is_serviceable() {
        let policy = DeliveryPolicy::default();
        assert!(policy.is_serviceable("110092"));
        assert!(policy.is_serviceable("203207"));
        assert!(!policy.is_serviceable("560001"));
        assert!(!policy.is_serviceable("1100"));
    }

    #[test]
    fn test_ready_to_submit() {
        let decision =
            evaluate_submission(&cart_worth("₹120"), &filled_form(), &DeliveryPolicy::default());
        assert!(decision.can_submit);
        assert_eq!(decision.reason, "Ready to order");
        assert!(decision.blockers.is_empty());
    }

    #[test]
    fn test_each_blocker() {
        let policy = DeliveryPolicy::default();
        let cart = cart_worth("₹120");

        let cases = vec![
            (
                CheckoutForm {
                    customer_name: "R".to_string(),
                    ..filled_form()
                },
                SubmitBlocker::CustomerName,
            ),
            (
                CheckoutForm {
                    phone: "98765".to_string(),
                    ..filled_form()
                },
                SubmitBlocker::Phone,
            ),
            (
                CheckoutForm {
                    address: "   ".to_string(),
                    ..filled_form()
                },
                SubmitBlocker::Address,
            ),
            (
                CheckoutForm {
                    pin_code: String::new(),
                    ..filled_form()
                },
                SubmitBlocker::PinCode,
            ),
            (
                CheckoutForm {
                    pin_code: "400001".to_string(),
                    ..filled_form()
                },
                SubmitBlocker::UnserviceablePinCode,
            ),
        ];

        for (form, expected) in cases {
            let decision = evaluate_submission(&cart, &form, &policy);
            assert!(!decision.can_submit);
            assert_eq!(decision.blockers, vec![expected]);
            assert_eq!(decision.reason, expected.describe(&policy));
        }
    }

    #[test]
    fn test_empty_cart_blocks_first() {
        let policy = DeliveryPolicy::default();
        let decision = evaluate_submission(&Cart::new(), &CheckoutForm::default(), &policy);

        assert!(!decision.can_submit);
        assert_eq!(decision.reason, "Your cart is empty");
        assert_eq!(
            decision.blockers,
            vec![
                SubmitBlocker::EmptyCart,
                SubmitBlocker::CustomerName,
                SubmitBlocker::Phone,
                SubmitBlocker::Address,
                SubmitBlocker::PinCode,
            ]
        );
    }

    #[test]
    fn test_unserviceable_message_names_area() {
        let policy = DeliveryPolicy::default();
        assert!(SubmitBlocker::UnserviceablePinCode
            .describe(&policy)
            .contains("Delhi NCR"));
    }
}
