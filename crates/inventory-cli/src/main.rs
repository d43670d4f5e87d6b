//! Inventory CLI
//!
//! Command-line interface for Inventory - products, stock and suppliers.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use inventory_core::{Config, Inventory, SortOrder, StorageError};

mod commands;
mod editor;
mod logging;
mod output;

use commands::product::{AddArgs, EditArgs};
use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "inventory")]
#[command(about = "Inventory - Keep track of products, stock and suppliers")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Use this config file instead of the default
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List products (default)
    #[command(alias = "ls")]
    List {
        /// Only products from this supplier
        #[arg(short, long)]
        supplier: Option<String>,
        /// Sort by name, id, price or quantity
        #[arg(long, default_value = "name")]
        sort: SortOrder,
    },
    /// Add a new product
    #[command(alias = "create")]
    Add {
        /// Product name
        #[arg(short, long)]
        name: String,
        /// Unit price (whole number greater than zero)
        #[arg(short, long)]
        price: i64,
        /// Units in stock
        #[arg(long, default_value_t = 0)]
        quantity: i64,
        /// Supplier name
        #[arg(short, long)]
        supplier: String,
        /// Supplier phone number
        #[arg(long)]
        phone: Option<String>,
    },
    /// Show product details
    Show {
        /// Product ID
        id: i64,
    },
    /// Edit a product (prompts for each field when no flag is given)
    Edit {
        /// Product ID
        id: i64,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        price: Option<i64>,
        #[arg(long)]
        quantity: Option<i64>,
        #[arg(short, long)]
        supplier: Option<String>,
        /// New phone number ("none" to clear)
        #[arg(long)]
        phone: Option<String>,
    },
    /// Sell one unit
    Sell {
        /// Product ID
        id: i64,
    },
    /// Change stock by an amount (negative to decrease)
    Restock {
        /// Product ID
        id: i64,
        /// Units to add
        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        amount: i64,
    },
    /// Delete a product, or every product with --all
    #[command(alias = "rm")]
    Delete {
        /// Product ID
        #[arg(required_unless_present = "all")]
        id: Option<i64>,
        /// Delete all products
        #[arg(long, conflicts_with = "id")]
        all: bool,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
    /// Show status (storage location, schema, counts)
    Status,
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, log_file, log_level)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));
    let config_path = cli.config.as_ref();

    let command = match cli.command.unwrap_or(Commands::List {
        supplier: None,
        sort: SortOrder::default(),
    }) {
        // Config commands don't need the store
        Commands::Config { command } => {
            return handle_config_command(command, config_path, &output);
        }
        command => command,
    };

    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;
    logging::init(&config);

    let inventory = match Inventory::open(config) {
        Ok(inventory) => inventory,
        Err(e) => {
            if let Some(hint) = e
                .downcast_ref::<StorageError>()
                .and_then(StorageError::recovery_suggestion)
            {
                eprintln!("Hint: {}", hint);
            }
            return Err(e);
        }
    };

    match command {
        Commands::List { supplier, sort } => {
            commands::product::list(&inventory, supplier, sort, &output)
        }
        Commands::Add {
            name,
            price,
            quantity,
            supplier,
            phone,
        } => {
            let args = AddArgs {
                name,
                price,
                quantity,
                supplier,
                phone,
            };
            commands::product::add(&inventory, args, &output)
        }
        Commands::Show { id } => commands::product::show(&inventory, id, &output),
        Commands::Edit {
            id,
            name,
            price,
            quantity,
            supplier,
            phone,
        } => {
            let args = EditArgs {
                name,
                price,
                quantity,
                supplier,
                phone,
            };
            commands::product::edit(&inventory, id, args, &output)
        }
        Commands::Sell { id } => commands::product::sell(&inventory, id, &output),
        Commands::Restock { id, amount } => {
            commands::product::restock(&inventory, id, amount, &output)
        }
        Commands::Delete { id: Some(id), .. } => {
            commands::product::delete(&inventory, id, &output)
        }
        Commands::Delete { id: None, .. } => commands::product::delete_all(&inventory, &output),
        Commands::Config { .. } => unreachable!(), // Handled above
        Commands::Status => commands::status::show(&inventory, &output),
    }
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_restock_negative_amount() {
        let cli = Cli::try_parse_from(["inventory", "restock", "4", "--amount", "-3"]).unwrap();
        match cli.command {
            Some(Commands::Restock { id, amount }) => {
                assert_eq!(id, 4);
                assert_eq!(amount, -3);
            }
            _ => panic!("expected restock"),
        }
    }

    #[test]
    fn test_parse_delete_requires_id_or_all() {
        assert!(Cli::try_parse_from(["inventory", "delete"]).is_err());
        assert!(Cli::try_parse_from(["inventory", "delete", "3", "--all"]).is_err());

        let cli = Cli::try_parse_from(["inventory", "delete", "--all"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Delete { id: None, all: true })
        ));
    }

    #[test]
    fn test_parse_list_sort() {
        let cli = Cli::try_parse_from(["inventory", "--json", "list", "--sort", "price"]).unwrap();
        assert!(cli.json);
        assert!(matches!(
            cli.command,
            Some(Commands::List {
                sort: SortOrder::Price,
                ..
            })
        ));
        assert!(Cli::try_parse_from(["inventory", "list", "--sort", "colour"]).is_err());
    }
}
