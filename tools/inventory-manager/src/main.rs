//! CLI tool for tracking shoe stock in a flat inventory file.
//!
//! # Usage
//!
//! ```bash
//! # Interactive menu (default)
//! inventory-manager --file inventory.txt
//!
//! # One-shot commands
//! inventory-manager list
//! inventory-manager find sc01
//! inventory-manager low --add 10
//! inventory-manager add "South Africa" SC07 "Nike Dunk" 89.5 12
//! inventory-manager value --json
//!
//! # Library logs go to stderr
//! RUST_LOG=shoe_inventory=debug inventory-manager low --add 5
//! ```

mod menu;
mod render;

use std::io::{self, Write, stdin, stdout};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use shoe_inventory::store::{InventoryStore, LoadOutcome};

use crate::menu::Menu;

/// Track shoe stock stored in a comma-separated inventory file.
///
/// Without a subcommand an interactive menu is started.
#[derive(Parser, Debug)]
#[command(name = "inventory-manager")]
#[command(version, about)]
struct Args {
    /// Inventory file path.
    #[arg(short, long, global = true, default_value = "inventory.txt")]
    file: PathBuf,

    /// Print JSON instead of tables (ignored by the interactive menu).
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
enum Command {
    /// Start the interactive menu.
    Menu,
    #[command(flatten)]
    Action(Action),
}

/// One-shot commands run against the loaded inventory.
#[derive(Subcommand, Debug, Clone, PartialEq)]
enum Action {
    /// Show full inventory.
    List,
    /// Search for a product by code (case-insensitive).
    Find {
        /// Product code.
        code: String,
    },
    /// Show the lowest stock product, optionally restocking it.
    Low {
        /// Units to add to the lowest stock product.
        #[arg(long, allow_negative_numbers = true)]
        add: Option<i64>,
    },
    /// Add a new product.
    Add {
        country: String,
        code: String,
        product: String,
        /// Unit cost (R).
        #[arg(allow_negative_numbers = true)]
        cost: f64,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Show value of each product.
    Value,
    /// View item with most stock (on sale).
    Sale,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    let mut store = InventoryStore::new(&args.file);
    let outcome = store
        .load()
        .with_context(|| format!("Failed to load inventory file: {}", args.file.display()))?;
    if matches!(outcome, LoadOutcome::SourceNotFound) {
        eprintln!("'{}' not found. Make sure the file exists.", args.file.display());
    }

    let mut out = stdout().lock();
    match args.command.unwrap_or(Command::Menu) {
        Command::Menu => {
            Menu::new(&mut store, stdin().lock(), &mut out).run().context("Menu I/O failed")
        }
        Command::Action(action) => execute(&mut store, action, args.json, &mut out),
    }
}

/// Runs a single non-interactive command against a loaded store.
fn execute<W: Write>(
    store: &mut InventoryStore,
    action: Action,
    json: bool,
    out: &mut W,
) -> Result<()> {
    match action {
        Action::List => {
            let records = store.list_all()?;
            if json {
                print_json(out, &records)
            } else if records.is_empty() {
                writeln!(out, "Inventory is empty.").map_err(Into::into)
            } else {
                write!(out, "{}", render::inventory_table(records)).map_err(Into::into)
            }
        }
        Action::Find { code } => {
            let record = store.search_by_code(&code)?;
            if json {
                print_json(out, record)
            } else {
                writeln!(out, "{record}").map_err(Into::into)
            }
        }
        Action::Low { add: None } => {
            let (_, record) = store.find_lowest_stock()?;
            if json {
                print_json(out, record)
            } else {
                writeln!(out, "Low Stock Item:\n\n{record}").map_err(Into::into)
            }
        }
        Action::Low { add: Some(units) } => {
            let (position, _) = store.find_lowest_stock()?;
            let record = store
                .restock(position, units)
                .context("Failed to restock the lowest stock product")?;
            if json {
                print_json(out, record)
            } else {
                writeln!(
                    out,
                    "'{}' has been restocked. New quantity: {}",
                    record.product, record.quantity
                )
                .map_err(Into::into)
            }
        }
        Action::Add { country, code, product, cost, quantity } => {
            let record = store
                .add(&country, &code, &product, cost, quantity)
                .context("Failed to add product")?;
            if json {
                print_json(out, record)
            } else {
                writeln!(out, "Product captured successfully!\n{record}").map_err(Into::into)
            }
        }
        Action::Value => {
            let values = store.value_per_item()?;
            if json {
                print_json(out, &values)
            } else if values.is_empty() {
                writeln!(out, "Inventory is empty.").map_err(Into::into)
            } else {
                write!(out, "{}", render::values_table(&values)).map_err(Into::into)
            }
        }
        Action::Sale => {
            let record = store.highest_quantity()?;
            if json {
                print_json(out, record)
            } else {
                writeln!(out, "{}", render::on_sale(record)).map_err(Into::into)
            }
        }
    }
}

fn print_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).context("Failed to serialize JSON")?;
    writeln!(out)?;
    Ok(())
}
