//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use inventory_core::Product;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print a single product
    pub fn print_product(&self, product: &Product) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:       {}", product.id);
                println!("Name:     {}", product.name);
                println!("Price:    {}", product.price);
                println!("Quantity: {}", stock_label(product));
                println!("Supplier: {}", product.supplier_name);
                if let Some(ref phone) = product.supplier_phone {
                    if !phone.is_empty() {
                        println!("Phone:    {}", phone);
                    }
                }
            }
            OutputFormat::Json => print_json(product),
            OutputFormat::Quiet => {
                println!("{}", product.id);
            }
        }
    }

    /// Print a list of products
    pub fn print_products(&self, products: &[Product]) {
        match self.format {
            OutputFormat::Human => {
                if products.is_empty() {
                    println!("No products found.");
                    return;
                }
                for product in products {
                    println!(
                        "{:>5} | {:<30} | {:>8} | {:>12} | {}",
                        product.id,
                        truncate(&product.name, 30),
                        product.price,
                        stock_label(product),
                        truncate(&product.supplier_name, 25)
                    );
                }
                println!("\n{} product(s)", products.len());
            }
            OutputFormat::Json => print_json(&products),
            OutputFormat::Quiet => {
                for product in products {
                    println!("{}", product.id);
                }
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize output: {}", e),
    }
}

/// Quantity, or a marker when nothing is left
fn stock_label(product: &Product) -> String {
    if product.is_in_stock() {
        product.quantity.to_string()
    } else {
        "out of stock".to_string()
    }
}

/// Truncate a string to max characters, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(quantity: i64) -> Product {
        Product {
            id: 1,
            name: "Atlas".to_string(),
            price: 25,
            quantity,
            supplier_name: "Acme".to_string(),
            supplier_phone: None,
        }
    }

    #[test]
    fn test_format_from_flags() {
        assert_eq!(OutputFormat::from_flags(false, false), OutputFormat::Human);
        assert_eq!(OutputFormat::from_flags(true, false), OutputFormat::Json);
        assert_eq!(OutputFormat::from_flags(false, true), OutputFormat::Quiet);
        // Quiet takes precedence
        assert_eq!(OutputFormat::from_flags(true, true), OutputFormat::Quiet);
    }

    #[test]
    fn test_should_prompt_only_for_humans() {
        assert!(Output::new(OutputFormat::Human).should_prompt());
        assert!(!Output::new(OutputFormat::Json).should_prompt());
        assert!(!Output::new(OutputFormat::Quiet).should_prompt());
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("this is a long string", 10), "this is...");
        assert_eq!(truncate("ÄÖÜäöüßÄÖÜäöü", 6), "ÄÖÜ...");
    }

    #[test]
    fn test_stock_label() {
        assert_eq!(stock_label(&product(4)), "4");
        assert_eq!(stock_label(&product(0)), "out of stock");
    }
}
