//! # LPI Kitchen Storefront Entry Point
//!
//! The actual setup is in lib.rs so it can be tested.

use std::process::ExitCode;

fn main() -> ExitCode {
    lpi_storefront::run()
}
