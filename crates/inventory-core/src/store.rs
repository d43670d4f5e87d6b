//! Inventory facade
//!
//! `Inventory` wraps a `ProductProvider` with typed, product-level
//! operations. Everything still goes through the provider, so validation
//! and change notifications behave exactly as they do for raw URI callers.
//!
//! ## Usage
//!
//! ```ignore
//! let inventory = Inventory::open(Config::load()?)?;
//!
//! let id = inventory.add_product(&NewProduct::new("Atlas", 25, "Acme"))?;
//! let products = inventory.all_products(SortOrder::Name)?;
//! ```

use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use tracing::debug;

use crate::config::Config;
use crate::contract::Column;
use crate::models::{NewProduct, Product, ProductChanges};
use crate::notify::Subscription;
use crate::provider::{ProductProvider, Selection};
use crate::storage::schema::get_schema_version;
use crate::uri::ContentUri;
use crate::values::ContentValues;

/// Row ordering for product listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Name,
    Id,
    Price,
    Quantity,
}

impl SortOrder {
    fn as_sql(&self) -> String {
        let column = match self {
            SortOrder::Name => Column::ProductName,
            SortOrder::Id => Column::Id,
            SortOrder::Price => Column::Price,
            SortOrder::Quantity => Column::Quantity,
        };
        // Break ties by id so listings are stable
        if column == Column::Id {
            format!("{} ASC", column)
        } else {
            format!("{} ASC, {} ASC", column, Column::Id)
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(SortOrder::Name),
            "id" => Ok(SortOrder::Id),
            "price" => Ok(SortOrder::Price),
            "quantity" | "qty" => Ok(SortOrder::Quantity),
            other => Err(format!("Unknown sort order: '{}'", other)),
        }
    }
}

/// Result of selling one unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaleOutcome {
    /// One unit sold; `remaining` left in stock
    Sold { remaining: i64 },
    /// Nothing to sell
    OutOfStock,
    /// No product with that id
    NotFound,
}

/// Typed product operations over a `ProductProvider`
pub struct Inventory {
    provider: ProductProvider,
    config: Config,
}

impl Inventory {
    /// Open the inventory stored under `config.data_dir`
    ///
    /// The database file is created on first use.
    pub fn open(config: Config) -> Result<Self> {
        let provider = ProductProvider::open(&config);
        provider
            .helper()
            .readable_database()
            .context("Failed to open product database")?;

        Ok(Self { provider, config })
    }

    /// Open a private in-memory inventory (for testing)
    pub fn open_in_memory() -> Self {
        Self {
            provider: ProductProvider::in_memory(),
            config: Config::default(),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The underlying provider, for URI-level access
    pub fn provider(&self) -> &ProductProvider {
        &self.provider
    }

    /// Path of the database file, `None` when in memory
    pub fn database_path(&self) -> Option<&Path> {
        self.provider.helper().path()
    }

    /// Schema version recorded in the database
    pub fn schema_version(&self) -> Result<Option<i32>> {
        let conn = self
            .provider
            .helper()
            .readable_database()
            .context("Failed to open product database")?;
        get_schema_version(conn).context("Failed to read schema version")
    }

    // ==================== Product Operations ====================

    /// Add a new product, returning its id
    ///
    /// Returns `None` if the database refused the row.
    pub fn add_product(&self, product: &NewProduct) -> Result<Option<i64>> {
        let uri = self
            .provider
            .insert(&ContentUri::collection(), &product.to_values())
            .context("Failed to add product")?;
        Ok(uri.and_then(|uri| uri.id()))
    }

    /// Get a product by id
    pub fn get_product(&self, id: i64) -> Result<Option<Product>> {
        let mut cursor = self
            .provider
            .query(&ContentUri::item(id), None, None, None)
            .context("Failed to get product")?;
        Ok(cursor.next().as_ref().and_then(Product::from_row))
    }

    /// Get all products
    pub fn all_products(&self, order: SortOrder) -> Result<Vec<Product>> {
        self.products_matching(None, order)
            .context("Failed to get products")
    }

    /// Get products from one supplier (exact name match)
    pub fn products_by_supplier(&self, supplier: &str, order: SortOrder) -> Result<Vec<Product>> {
        let selection = Selection::new(format!("{} = ?", Column::SupplierName)).arg(supplier);
        self.products_matching(Some(&selection), order)
            .context("Failed to get products by supplier")
    }

    /// Apply changes to a product
    ///
    /// Returns `false` if no product was changed.
    pub fn update_product(&self, id: i64, changes: &ProductChanges) -> Result<bool> {
        let rows = self
            .provider
            .update(&ContentUri::item(id), &changes.to_values(), None)
            .context("Failed to update product")?;
        Ok(rows > 0)
    }

    /// Sell one unit if any are in stock
    ///
    /// The decrement only lands if the stock is unchanged since it was
    /// read; otherwise the sale is retried against the new value.
    pub fn sell(&self, id: i64) -> Result<SaleOutcome> {
        loop {
            let Some(product) = self.get_product(id)? else {
                return Ok(SaleOutcome::NotFound);
            };
            if !product.is_in_stock() {
                debug!("Product {} is out of stock", id);
                return Ok(SaleOutcome::OutOfStock);
            }

            let remaining = product.quantity - 1;
            if self
                .replace_quantity(id, product.quantity, remaining)
                .context("Failed to record sale")?
            {
                return Ok(SaleOutcome::Sold { remaining });
            }
            debug!("Stock of product {} changed during sale, retrying", id);
        }
    }

    /// Add `delta` to a product's stock, never going below zero
    ///
    /// Returns the new quantity, or `None` if the product does not exist.
    pub fn adjust_quantity(&self, id: i64, delta: i64) -> Result<Option<i64>> {
        loop {
            let Some(product) = self.get_product(id)? else {
                return Ok(None);
            };

            let quantity = product.quantity.saturating_add(delta).max(0);
            if quantity == product.quantity
                || self
                    .replace_quantity(id, product.quantity, quantity)
                    .context("Failed to adjust quantity")?
            {
                return Ok(Some(quantity));
            }
            debug!("Stock of product {} changed during adjustment, retrying", id);
        }
    }

    /// Delete a product
    ///
    /// Returns `false` if it did not exist.
    pub fn delete_product(&self, id: i64) -> Result<bool> {
        let rows = self
            .provider
            .delete(&ContentUri::item(id), None)
            .context("Failed to delete product")?;
        Ok(rows > 0)
    }

    /// Delete every product, returning how many were removed
    pub fn delete_all(&self) -> Result<usize> {
        self.provider
            .delete(&ContentUri::collection(), None)
            .context("Failed to delete products")
    }

    /// Get product count
    pub fn product_count(&self) -> Result<usize> {
        let cursor = self
            .provider
            .query(&ContentUri::collection(), Some(&[Column::Id]), None, None)
            .context("Failed to count products")?;
        Ok(cursor.len())
    }

    /// Watch for changes to all products
    pub fn subscribe(&self) -> Subscription {
        self.provider.subscribe(&ContentUri::collection())
    }

    fn products_matching(
        &self,
        selection: Option<&Selection>,
        order: SortOrder,
    ) -> Result<Vec<Product>> {
        let cursor = self.provider.query(
            &ContentUri::collection(),
            None,
            selection,
            Some(&order.as_sql()),
        )?;
        Ok(cursor.filter_map(|row| Product::from_row(&row)).collect())
    }

    /// Write `quantity` only if the stored value is still `expected`
    fn replace_quantity(&self, id: i64, expected: i64, quantity: i64) -> Result<bool> {
        let values = ContentValues::new().with(Column::Quantity.as_str(), quantity);
        let selection = Selection::new(format!("{} = ? AND {} = ?", Column::Id, Column::Quantity))
            .arg(id)
            .arg(expected);
        let rows = self
            .provider
            .update(&ContentUri::collection(), &values, Some(&selection))?;
        Ok(rows > 0)
    }
}
