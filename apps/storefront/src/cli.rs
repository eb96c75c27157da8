//! # Command Line
//!
//! Argument parsing and plain-text rendering of command responses.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use lpi_core::checkout::{CheckoutForm, CheckoutQuote};
use lpi_core::CartChange;

use crate::commands::cart::CartResponse;
use crate::commands::checkout::CheckoutResponse;
use crate::commands::menu::MenuResponse;
use crate::error::{AppError, AppResult};

#[derive(Debug, Parser)]
#[command(
    name = "lpi-storefront",
    version,
    about = "LPI Kitchen storefront: browse the menu, build a cart, order on WhatsApp",
    long_about = None
)]
pub struct Cli {
    /// Config file (default: <config dir>/storefront.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory the cart is saved in
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Print responses as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the menu by section
    Menu,

    /// Add a dish from the menu (or one more of it)
    Add { name: String },

    /// One more of a dish already in the cart
    Inc { name: String },

    /// One fewer of a dish (never below 1)
    Dec { name: String },

    /// Change a dish's quantity by DELTA
    Qty {
        name: String,
        #[arg(allow_negative_numbers = true)]
        delta: i64,
    },

    /// Remove a dish whatever its quantity
    Remove { name: String },

    /// Empty the cart
    Clear,

    /// Show the cart
    Show,

    /// Price the cart and build the WhatsApp order
    Checkout(CheckoutArgs),
}

#[derive(Debug, Args)]
pub struct CheckoutArgs {
    /// Your name
    #[arg(long)]
    pub name: String,

    /// 10-digit WhatsApp number
    #[arg(long)]
    pub phone: String,

    /// Delivery address
    #[arg(long)]
    pub address: String,

    /// 6-digit PIN code
    #[arg(long)]
    pub pin: String,

    /// Special instructions for the kitchen
    #[arg(long, default_value = "")]
    pub notes: String,
}

impl From<CheckoutArgs> for CheckoutForm {
    fn from(args: CheckoutArgs) -> Self {
        CheckoutForm {
            customer_name: args.name,
            phone: args.phone,
            address: args.address,
            pin_code: args.pin,
            special_instructions: args.notes,
        }
    }
}

// =============================================================================
// Rendering
// =============================================================================

/// Serializes a response for `--json`.
pub fn to_json<T: Serialize>(value: &T) -> AppResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| AppError::internal(format!("Failed to encode output: {e}")))
}

pub fn render_menu(menu: &MenuResponse) -> String {
    let mut out = Vec::new();
    for section in &menu.sections {
        out.push(format!("== {} ==", section.title));
        for item in &section.items {
            out.push(format!("  {:<28} {:>10}", item.name, item.price));
            if !item.description.is_empty() {
                out.push(format!("      {}", item.description));
            }
        }
        out.push(String::new());
    }
    out.join("\n")
}

pub fn render_cart(cart: &CartResponse) -> String {
    let mut out = Vec::new();

    if let Some(note) = cart.change.as_ref().map(describe_change) {
        out.push(note);
    }

    if cart.lines.is_empty() {
        out.push("Your cart is empty.".to_string());
        return out.join("\n");
    }

    out.push(format!("Cart ({} items)", cart.totals.total_items));
    for line in &cart.lines {
        out.push(format!(
            "  {:>3} × {:<28} {:>10} = {}",
            line.quantity,
            line.name,
            line.price,
            line.line_total().display_compact()
        ));
    }
    out.push(format!("Subtotal: {}", cart.totals.subtotal));
    out.join("\n")
}

pub fn render_quote(quote: &CheckoutQuote) -> String {
    let mut out = vec![
        format!("Subtotal:        {}", quote.subtotal),
        format!("Delivery Charge: {}", quote.delivery_charge),
        format!("Final Amount:    {}", quote.grand_total),
    ];

    // Shown in whole rupees.
    if let Some(shortfall) = quote.free_delivery_shortfall {
        out.push(format!(
            "Add {} more for free delivery!",
            shortfall.round_to_rupee().display_compact()
        ));
    }
    out.join("\n")
}

pub fn render_checkout(checkout: &CheckoutResponse) -> String {
    let mut out = vec![render_quote(&checkout.quote), String::new()];

    match (&checkout.message, &checkout.link) {
        (Some(message), Some(link)) => {
            out.push(message.clone());
            out.push(String::new());
            out.push(format!("Send on WhatsApp: {link}"));
        }
        _ => out.push(format!("Cannot place order: {}", checkout.decision.reason)),
    }

    out.join("\n")
}

fn describe_change(change: &CartChange) -> String {
    match change {
        CartChange::Added => "Added to cart.".to_string(),
        CartChange::Incremented { quantity } | CartChange::QuantityChanged { quantity } => {
            format!("Quantity is now {quantity}.")
        }
        CartChange::Removed => "Removed from cart.".to_string(),
        CartChange::Cleared { lines } => format!("Cleared {lines} dishes."),
        CartChange::Unchanged => "Nothing changed.".to_string(),
    }
}
