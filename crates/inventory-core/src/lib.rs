//! Inventory Core Library
//!
//! This crate provides the data layer for Inventory, a small stock keeping
//! store for products and their suppliers.
//!
//! # Architecture
//!
//! - **SQLite**: one `products` table in a single database file
//! - **ProductProvider**: content-URI addressed CRUD with validation and
//!   change notifications
//!
//! Nothing reaches the table without passing the field rules in
//! `validation`.
//!
//! # Quick Start
//!
//! ```text
//! let inventory = Inventory::open(Config::load()?)?;
//!
//! // Add a product
//! let id = inventory.add_product(&NewProduct::new("Atlas", 25, "Acme"))?;
//!
//! // Sell one
//! inventory.sell(id.unwrap())?;
//! ```
//!
//! # Modules
//!
//! - `store`: Typed inventory interface (main entry point)
//! - `provider`: URI-addressed queries and mutations
//! - `contract`: Table, column and URI constants
//! - `uri`: Content URIs and their classification
//! - `values`: Field-value mappings
//! - `validation`: Field rules for products
//! - `notify`: Change subscriptions
//! - `models`: Product structures
//! - `storage`: SQLite file and schema management
//! - `config`: Application configuration

pub mod config;
pub mod contract;
pub mod models;
pub mod notify;
pub mod provider;
pub mod storage;
pub mod store;
pub mod uri;
pub mod validation;
pub mod values;

pub use config::Config;
pub use contract::Column;
pub use models::{NewProduct, Product, ProductChanges};
pub use notify::{ChangeNotifier, Subscription};
pub use provider::{Cursor, ProductProvider, ProviderError, Row, Selection};
pub use storage::{DbHelper, StorageError};
pub use store::{Inventory, SaleOutcome, SortOrder};
pub use uri::{Address, ContentUri};
pub use validation::{ValidationError, ValidationReason};
pub use values::{ContentValues, Value};
