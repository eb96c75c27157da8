//! # LPI Kitchen Storefront
//!
//! Terminal front end for the LPI Kitchen cart: browse the menu, build a
//! cart that survives between runs, and turn it into a WhatsApp order.
//!
//! ## Module Organization
//! ```text
//! lpi_storefront/
//! ├── lib.rs          ◄─── You are here (startup & dispatch)
//! ├── cli.rs          ◄─── clap definitions + text rendering
//! ├── config.rs       ◄─── AppConfig (defaults → TOML → env)
//! ├── menu.rs         ◄─── Bundled / file menu loading
//! ├── commands/
//! │   ├── menu.rs     ◄─── list_menu
//! │   ├── cart.rs     ◄─── add / update / remove / clear / show
//! │   └── checkout.rs ◄─── quote, submit gate, order link
//! └── error.rs        ◄─── AppError with machine-readable code
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod menu;

use std::process::ExitCode;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use lpi_core::Menu;
use lpi_store::{CartStore, FileStorage};

use cli::{Cli, Command};
use config::AppConfig;
use error::{AppError, AppResult};

/// Runs the storefront CLI.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Storefront Startup                                │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, to stderr                     │
/// │     • Default: warn, lpi crates at info; RUST_LOG overrides             │
/// │                                                                         │
/// │  2. Load Config ──────────────────────────────────────────────────────► │
/// │     • defaults → storefront.toml → LPI_* env → --data-dir               │
/// │                                                                         │
/// │  3. Load Menu ────────────────────────────────────────────────────────► │
/// │     • bundled, or menu_path                                             │
/// │                                                                         │
/// │  4. Open Cart Store ──────────────────────────────────────────────────► │
/// │     • FileStorage under the data dir, key lpi_cart                      │
/// │     • bad snapshot → empty cart                                         │
/// │                                                                         │
/// │  5. Dispatch one command, print, close the store                        │
/// │     • blocked checkout prints the quote, then exits non-zero            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    let json = cli.json;

    match execute(cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            if json {
                match cli::to_json(&err) {
                    Ok(body) => println!("{body}"),
                    Err(_) => eprintln!("error [{}]: {}", err.code, err.message),
                }
            } else {
                eprintln!("error [{}]: {}", err.code, err.message);
            }
            ExitCode::FAILURE
        }
    }
}

/// Loads config, menu and cart, then runs one command.
///
/// Returns the text to print.
pub fn execute(cli: Cli) -> AppResult<String> {
    let config = AppConfig::load(cli.config.as_deref())?;
    execute_with_config(cli, config)
}

/// Runs one command against an already loaded config. `--data-dir` still
/// wins over `config.data_dir`.
pub fn execute_with_config(cli: Cli, mut config: AppConfig) -> AppResult<String> {
    if let Some(dir) = cli.data_dir {
        config.data_dir = Some(dir);
    }

    let menu = menu::load_menu(config.menu_path.as_deref())?;

    let storage = match &config.data_dir {
        Some(dir) => FileStorage::new(dir.clone()),
        None => FileStorage::default_location()?,
    };
    // Surface a bad key before any command runs.
    storage.path_for(&config.storage_key)?;

    let mut store = CartStore::open_with_key(storage, config.storage_key.clone());
    store.subscribe(|snapshot| {
        info!(
            lines = snapshot.totals.distinct_items,
            items = snapshot.totals.total_items,
            subtotal = %snapshot.totals.subtotal,
            "Cart updated"
        );
    });

    let output = dispatch(cli.command, cli.json, &mut store, &menu, &config);
    store.close();
    output
}

fn dispatch(
    command: Command,
    json: bool,
    store: &mut CartStore<FileStorage>,
    menu: &Menu,
    config: &AppConfig,
) -> AppResult<String> {
    use commands::{cart, checkout, menu as menu_cmd};

    let cart_output = |response: cart::CartResponse| -> AppResult<String> {
        if json {
            cli::to_json(&response)
        } else {
            Ok(cli::render_cart(&response))
        }
    };

    match command {
        Command::Menu => {
            let response = menu_cmd::list_menu(menu);
            if json {
                cli::to_json(&response)
            } else {
                Ok(cli::render_menu(&response))
            }
        }
        Command::Add { name } => cart_output(cart::add_to_cart(store, menu, &name)?),
        Command::Inc { name } => cart_output(cart::update_cart_item(store, &name, 1)),
        Command::Dec { name } => cart_output(cart::update_cart_item(store, &name, -1)),
        Command::Qty { name, delta } => cart_output(cart::update_cart_item(store, &name, delta)),
        Command::Remove { name } => cart_output(cart::remove_from_cart(store, &name)),
        Command::Clear => cart_output(cart::clear_cart(store)),
        Command::Show => cart_output(cart::get_cart(store)),
        Command::Checkout(args) => {
            let response = checkout::checkout(store, config, args.into())?;
            if json {
                return cli::to_json(&response);
            }

            if response.decision.can_submit {
                Ok(cli::render_checkout(&response))
            } else {
                println!("{}", cli::render_quote(&response.quote));
                Err(AppError::validation(response.decision.reason))
            }
        }
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=lpi_store=trace` - Trace for one crate only
/// - Default: warnings, plus info from the lpi crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,lpi_core=info,lpi_store=info,lpi_storefront=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Runs with default config, so the host's config file and `LPI_*`
    /// variables cannot leak in.
    fn run_in(dir: &std::path::Path, args: &[&str]) -> AppResult<String> {
        let data_dir = dir.to_string_lossy().into_owned();
        let mut argv = vec!["lpi-storefront", "--data-dir", data_dir.as_str()];
        argv.extend_from_slice(args);
        execute_with_config(Cli::try_parse_from(argv).unwrap(), AppConfig::default())
    }

    #[test]
    fn test_cart_survives_between_runs() {
        let dir = tempfile::tempdir().unwrap();

        run_in(dir.path(), &["add", "Masala Dosa"]).unwrap();
        run_in(dir.path(), &["add", "masala dosa"]).unwrap();
        run_in(dir.path(), &["add", "Butter Naan"]).unwrap();
        run_in(dir.path(), &["dec", "Masala Dosa"]).unwrap();

        let shown = run_in(dir.path(), &["show"]).unwrap();
        assert!(shown.contains("Cart (2 items)"));
        assert!(shown.contains("Subtotal: ₹160.00"));
        assert!(dir.path().join("lpi_cart.json").exists());
    }

    #[test]
    fn test_unknown_dish_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_in(dir.path(), &["add", "Pizza"]).unwrap_err();
        assert_eq!(err.code, error::ErrorCode::NotFound);
    }

    #[test]
    fn test_checkout_flow() {
        let dir = tempfile::tempdir().unwrap();
        let checkout = [
            "checkout",
            "--name",
            "Riya",
            "--phone",
            "9876543210",
            "--address",
            "C-14, Sector 62",
            "--pin",
            "201301",
        ];

        let err = run_in(dir.path(), &checkout).unwrap_err();
        assert_eq!(err.code, error::ErrorCode::ValidationError);
        assert_eq!(err.message, "Your cart is empty");

        run_in(dir.path(), &["add", "Paneer Tikka"]).unwrap();
        let output = run_in(dir.path(), &checkout).unwrap();
        assert!(output.contains("Add ₹70 more for free delivery!"));
        assert!(output.contains("1 × Paneer Tikka - ₹180 = ₹180"));
        assert!(output.contains("Send on WhatsApp: https://wa.me/917505266931?text="));

        // Checkout does not empty the cart.
        let shown = run_in(dir.path(), &["show"]).unwrap();
        assert!(shown.contains("Paneer Tikka"));
    }

    #[test]
    fn test_data_dir_flag_beats_config() {
        let flag_dir = tempfile::tempdir().unwrap();
        let config_dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            data_dir: Some(config_dir.path().to_path_buf()),
            ..AppConfig::default()
        };

        let data_dir = flag_dir.path().to_string_lossy().into_owned();
        let cli = Cli::try_parse_from([
            "lpi-storefront",
            "--data-dir",
            data_dir.as_str(),
            "add",
            "Samosa",
        ])
        .unwrap();
        execute_with_config(cli, config).unwrap();

        assert!(flag_dir.path().join("lpi_cart.json").exists());
        assert!(!config_dir.path().join("lpi_cart.json").exists());
    }

    #[test]
    fn test_explicit_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("storefront.toml");
        std::fs::write(&config_path, "whatsapp_number = \"919999999999\"\n").unwrap();

        let config = AppConfig::from_file(&config_path).unwrap();
        let data_dir = dir.path().to_string_lossy().into_owned();
        let checkout = |config: AppConfig| {
            let cli = Cli::try_parse_from([
                "lpi-storefront",
                "--data-dir",
                data_dir.as_str(),
                "checkout",
                "--name",
                "Riya",
                "--phone",
                "9876543210",
                "--address",
                "C-14, Sector 62",
                "--pin",
                "201301",
            ])
            .unwrap();
            execute_with_config(cli, config)
        };

        run_in(dir.path(), &["add", "Masala Dosa"]).unwrap();
        let output = checkout(config).unwrap();
        assert!(output.contains("https://wa.me/919999999999?text="));
    }

    #[test]
    fn test_json_output() {
        let dir = tempfile::tempdir().unwrap();
        let output = run_in(dir.path(), &["--json", "add", "Samosa"]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["change"]["kind"], "added");
        assert_eq!(value["totals"]["totalItems"], 1);
        assert_eq!(value["lines"][0]["price"], "₹30");
    }
}
