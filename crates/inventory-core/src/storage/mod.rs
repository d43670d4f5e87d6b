//! Storage layer
//!
//! Opens and creates the SQLite file behind the product store.
//!
//! ## Architecture
//!
//! - **DbHelper**: lazy connection, table creation, version checks
//! - **Schema**: the single `products` table and its version stamp
//!
//! Validation never happens here; the provider rejects bad data before it
//! reaches this layer.

pub mod error;
pub mod helper;
pub mod schema;

pub use error::{StorageError, StorageResult};
pub use helper::DbHelper;
pub use schema::{init_schema, SCHEMA_VERSION};
