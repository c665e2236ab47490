//! # rocket-cli
//!
//! ```text
//! Usage: rocket-cli [OPTIONS] <COMMAND>
//!
//! Commands:
//!   show                 Print the cart
//!   add <ID>             Add one unit of a product
//!   remove <ID>          Remove a product
//!   set <ID> <AMOUNT>    Set a product's quantity
//!
//! Options:
//!   -c, --config <PATH>  Config file (default: platform config dir/cart.toml)
//!   -d, --db <PATH>      Cart database file
//!   -h, --help           Show this help message
//! ```

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

use rocket_cart::{
    ApiClient, CartConfig, CartManager, NotificationSink, SqliteCartStore, TracingNotifier,
};
use rocket_core::validation::parse_amount;
use rocket_core::{Cart, CartSummary, Outcome, ProductId};
use rocket_store::{Database, StoreConfig};

const USAGE: &str = "\
Usage: rocket-cli [OPTIONS] <COMMAND>

Commands:
  show                 Print the cart
  add <ID>             Add one unit of a product
  remove <ID>          Remove a product
  set <ID> <AMOUNT>    Set a product's quantity

Options:
  -c, --config <PATH>  Config file (default: platform config dir/cart.toml)
  -d, --db <PATH>      Cart database file
  -h, --help           Show this help message";

// =============================================================================
// Arguments
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Show,
    Add(ProductId),
    Remove(ProductId),
    Set(ProductId, u32),
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Options {
    config_path: Option<PathBuf>,
    db_path: Option<PathBuf>,
    command: Command,
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut config_path = None;
    let mut db_path = None;
    let mut positional = Vec::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                let value = args.get(i + 1).ok_or("--config needs a path")?;
                config_path = Some(PathBuf::from(value));
                i += 1;
            }
            "--db" | "-d" => {
                let value = args.get(i + 1).ok_or("--db needs a path")?;
                db_path = Some(PathBuf::from(value));
                i += 1;
            }
            "--help" | "-h" => {
                return Ok(Options {
                    config_path,
                    db_path,
                    command: Command::Help,
                })
            }
            other => positional.push(other),
        }
        i += 1;
    }

    let product = |raw: Option<&&str>| -> Result<ProductId, String> {
        let raw = raw.ok_or("missing product id")?;
        raw.parse::<ProductId>()
            .map_err(|e| format!("invalid product id '{}': {}", raw, e))
    };

    let command = match positional.as_slice() {
        [] | ["show"] => Command::Show,
        ["add", rest @ ..] if rest.len() <= 1 => Command::Add(product(rest.first())?),
        ["remove", rest @ ..] if rest.len() <= 1 => Command::Remove(product(rest.first())?),
        ["set", id, amount] => Command::Set(
            product(Some(id))?,
            parse_amount(amount).map_err(|e| e.to_string())?,
        ),
        ["set", ..] => return Err("set needs <ID> <AMOUNT>".to_string()),
        _ => return Err(format!("unrecognized command: {}", positional.join(" "))),
    };

    Ok(Options {
        config_path,
        db_path,
        command,
    })
}

// =============================================================================
// Output
// =============================================================================

/// What the command prints on stdout.
#[derive(Debug, Serialize)]
struct CartReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    outcome: Option<Outcome>,
    cart: Cart,
    summary: CartSummary,
}

/// Prints notices for the shopper on stderr and logs them.
struct StderrNotifier;

impl NotificationSink for StderrNotifier {
    fn notify_error(&self, message: &str) {
        eprintln!("⚠ {}", message);
        TracingNotifier.notify_error(message);
    }
}

// =============================================================================
// Main
// =============================================================================

/// Initializes the tracing subscriber. Logs go to stderr so stdout stays
/// machine-readable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,rocket=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::TRACE)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("error: {}", message);
            eprintln!();
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    };

    if options.command == Command::Help {
        println!("{}", USAGE);
        return Ok(());
    }

    init_tracing();

    let mut config = match options.config_path {
        Some(path) => CartConfig::load(Some(path))?,
        None => CartConfig::load_or_default(None),
    };
    if let Some(db_path) = options.db_path {
        config.storage.database_path = Some(db_path);
    }

    let db_path = config.storage.resolved_database_path();
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let db = Database::new(StoreConfig::new(&db_path)).await?;
    let api = Arc::new(ApiClient::new(&config.api)?);
    let store = Arc::new(SqliteCartStore::with_key(&db, config.storage.key.clone()));

    info!(api = %api.base_url(), db = %db_path.display(), "Cart shell ready");

    let handle = CartManager::load(api.clone(), api, store, Arc::new(StderrNotifier))
        .await
        .spawn(config.manager.channel_capacity);

    let outcome = match options.command {
        Command::Show | Command::Help => None,
        Command::Add(id) => Some(handle.add_product(id).await?),
        Command::Remove(id) => Some(handle.remove_product(id).await?),
        Command::Set(id, amount) => Some(handle.update_product_amount(id, amount).await?),
    };

    let cart = handle.cart().await?;
    let report = CartReport {
        outcome,
        summary: cart.summary(),
        cart,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    handle.shutdown().await?;
    db.close().await;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
