//! Status command handler

use anyhow::Result;

use inventory_core::Inventory;

use crate::output::{Output, OutputFormat};

/// Show status information
pub fn show(inventory: &Inventory, output: &Output) -> Result<()> {
    let config = inventory.config();
    let database = inventory.database_path();
    let database_size = database
        .and_then(|p| std::fs::metadata(p).ok())
        .map(|m| m.len())
        .unwrap_or(0);
    let schema_version = inventory.schema_version()?;
    let products = inventory.product_count()?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "data_dir": config.data_dir,
                    "database": {
                        "path": database,
                        "size": database_size,
                        "schema_version": schema_version
                    },
                    "counts": {
                        "products": products
                    }
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", products);
        }
        OutputFormat::Human => {
            println!("Inventory Status");
            println!("================");
            println!();
            println!("Storage:");
            println!("  Location: {}", config.data_dir.display());
            if let Some(path) = database {
                println!("  Database: {}", path.display());
            }
            println!("  Size:     {}", human_size(database_size));
            println!(
                "  Schema:   {}",
                schema_version
                    .map(|v| format!("v{}", v))
                    .unwrap_or_else(|| "(not initialized)".to_string())
            );
            println!();
            println!("Contents:");
            println!("  Products: {}", products);
        }
    }

    Ok(())
}

fn human_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
