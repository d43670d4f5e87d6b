//! Product provider
//!
//! Routes content URIs to table operations, validates field values before
//! anything is written, and publishes change notifications after
//! successful mutations.
//!
//! ## URIs
//!
//! - collection: query, insert, update, delete with the caller's selection
//! - item: query, update, delete; the caller's selection is replaced by
//!   `id = <item id>`
//!
//! ## Failures
//!
//! Validation and addressing errors are returned before storage is touched.
//! An insert the engine refuses yields `Ok(None)`; every other engine error
//! is returned as `ProviderError::Storage`. Matching zero rows is not an
//! error.

mod cursor;
mod error;

pub use cursor::{Cursor, Row};
pub use error::{Operation, ProviderError, ProviderResult};

use std::sync::Arc;

use rusqlite::params_from_iter;
use tracing::{debug, error, trace};

use crate::config::Config;
use crate::contract::{Column, ColumnKind, CONTENT_ITEM_TYPE, CONTENT_LIST_TYPE, TABLE_NAME};
use crate::notify::{ChangeNotifier, Subscription};
use crate::storage::DbHelper;
use crate::uri::{Address, ContentUri};
use crate::validation::{validate_insert, validate_update};
use crate::values::{ContentValues, Value};

/// A `WHERE` clause with positional `?` arguments
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    clause: String,
    args: Vec<Value>,
}

impl Selection {
    pub fn new(clause: impl Into<String>) -> Self {
        Self {
            clause: clause.into(),
            args: Vec::new(),
        }
    }

    /// Append the value bound to the next `?`
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.args.push(value.into());
        self
    }

    /// Exact-identity selection
    pub fn by_id(id: i64) -> Self {
        Self::new(format!("{} = ?", Column::Id)).arg(id)
    }

    pub fn clause(&self) -> &str {
        &self.clause
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }

    fn is_empty(&self) -> bool {
        self.clause.trim().is_empty()
    }
}

/// Validating data access layer over the products table
pub struct ProductProvider {
    helper: DbHelper,
    notifier: Arc<ChangeNotifier>,
}

impl ProductProvider {
    /// Create a provider over an injected store and notifier
    pub fn new(helper: DbHelper, notifier: Arc<ChangeNotifier>) -> Self {
        Self { helper, notifier }
    }

    /// Provider over the database named by the configuration
    pub fn open(config: &Config) -> Self {
        Self::new(DbHelper::from_config(config), Arc::new(ChangeNotifier::new()))
    }

    /// Provider over a private in-memory database (for testing)
    pub fn in_memory() -> Self {
        Self::new(DbHelper::in_memory(), Arc::new(ChangeNotifier::new()))
    }

    pub fn helper(&self) -> &DbHelper {
        &self.helper
    }

    /// The notifier mutations are published to
    pub fn notifier(&self) -> &Arc<ChangeNotifier> {
        &self.notifier
    }

    /// Register for changes overlapping `uri`
    pub fn subscribe(&self, uri: &ContentUri) -> Subscription {
        self.notifier.subscribe(uri)
    }

    /// Classify a URI
    pub fn resolve(&self, uri: &ContentUri) -> ProviderResult<Address> {
        Address::resolve(uri).ok_or_else(|| ProviderError::UnrecognizedAddress(uri.clone()))
    }

    /// Resource type descriptor for a URI
    pub fn get_type(&self, uri: &ContentUri) -> ProviderResult<&'static str> {
        Ok(match self.resolve(uri)? {
            Address::Collection => CONTENT_LIST_TYPE,
            Address::Item(_) => CONTENT_ITEM_TYPE,
        })
    }

    /// Run a query and subscribe the returned cursor to changes at `uri`
    ///
    /// Every matching row is read before this returns.
    ///
    /// `projection` defaults to every column. For item URIs the caller's
    /// selection is ignored.
    pub fn query(
        &self,
        uri: &ContentUri,
        projection: Option<&[Column]>,
        selection: Option<&Selection>,
        sort_order: Option<&str>,
    ) -> ProviderResult<Cursor> {
        let address = self.resolve(uri)?;
        let selection = effective_selection(address, selection);

        let columns: Arc<[Column]> = match projection {
            Some(columns) if !columns.is_empty() => Arc::from(columns),
            _ => Arc::from(&Column::ALL[..]),
        };

        let mut sql = format!("SELECT {} FROM {}", column_list(&columns), TABLE_NAME);
        let args = push_where(&mut sql, selection.as_ref());
        if let Some(order) = sort_order.filter(|o| !o.trim().is_empty()) {
            sql.push_str(" ORDER BY ");
            sql.push_str(order);
        }

        // Subscribe first so a change racing the read is not lost
        let subscription = self.notifier.subscribe(uri);

        let conn = self.helper.readable_database()?;
        debug!("Query {}: {}", uri, sql);
        let mut stmt = conn.prepare(&sql)?;
        let width = columns.len();
        let rows = stmt
            .query_map(params_from_iter(args), |row| {
                (0..width)
                    .map(|i| row.get::<_, Value>(i))
                    .collect::<rusqlite::Result<Vec<_>>>()
            })?
            .map(|values| values.map(|v| Row::new(Arc::clone(&columns), v)))
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(Cursor::new(columns, rows, subscription))
    }

    /// Validate and insert a product, returning its item URI
    ///
    /// Returns `Ok(None)` when the storage engine refuses the row.
    pub fn insert(
        &self,
        uri: &ContentUri,
        values: &ContentValues,
    ) -> ProviderResult<Option<ContentUri>> {
        match Address::resolve(uri) {
            Some(Address::Collection) => {}
            _ => return Err(unsupported(Operation::Insert, uri)),
        }

        let fields = writable_fields(values)?;
        validate_insert(values)?;

        let conn = self.helper.writable_database()?;

        let names: Vec<&str> = fields.iter().map(|(c, _)| c.as_str()).collect();
        let placeholders = vec!["?"; fields.len()].join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            TABLE_NAME,
            names.join(", "),
            placeholders
        );
        let args = fields.into_iter().map(|(_, v)| v);

        let id = match conn.execute(&sql, params_from_iter(args)) {
            Ok(_) => conn.last_insert_rowid(),
            Err(e) => {
                error!("Failed to insert row for {}: {}", uri, e);
                return Ok(None);
            }
        };
        trace!("Saved row ID: {}", id);

        self.notifier.notify_change(uri);
        Ok(Some(ContentUri::item(id)))
    }

    /// Validate the present fields and apply them to matching rows
    pub fn update(
        &self,
        uri: &ContentUri,
        values: &ContentValues,
        selection: Option<&Selection>,
    ) -> ProviderResult<usize> {
        let address = Address::resolve(uri).ok_or_else(|| unsupported(Operation::Update, uri))?;
        let selection = effective_selection(address, selection);

        let fields = writable_fields(values)?;
        validate_update(values)?;

        if fields.is_empty() {
            debug!("Update {} with no values", uri);
            return Ok(0);
        }

        let assignments: Vec<String> = fields
            .iter()
            .map(|(c, _)| format!("{} = ?", c.as_str()))
            .collect();
        let mut sql = format!("UPDATE {} SET {}", TABLE_NAME, assignments.join(", "));
        let where_args = push_where(&mut sql, selection.as_ref());

        let args: Vec<Value> = fields
            .into_iter()
            .map(|(_, v)| v)
            .chain(where_args)
            .collect();

        let conn = self.helper.writable_database()?;
        debug!("Update {}: {}", uri, sql);
        let rows = conn.execute(&sql, params_from_iter(args))?;

        if rows > 0 {
            self.notifier.notify_change(uri);
        }
        Ok(rows)
    }

    /// Delete matching rows
    pub fn delete(&self, uri: &ContentUri, selection: Option<&Selection>) -> ProviderResult<usize> {
        let address = Address::resolve(uri).ok_or_else(|| unsupported(Operation::Delete, uri))?;
        let selection = effective_selection(address, selection);

        let mut sql = format!("DELETE FROM {}", TABLE_NAME);
        let args = push_where(&mut sql, selection.as_ref());

        let conn = self.helper.writable_database()?;
        debug!("Delete {}: {}", uri, sql);
        let rows = conn.execute(&sql, params_from_iter(args))?;

        if rows > 0 {
            self.notifier.notify_change(uri);
        }
        Ok(rows)
    }
}

fn unsupported(operation: Operation, uri: &ContentUri) -> ProviderError {
    ProviderError::UnsupportedOperation {
        operation,
        uri: uri.clone(),
    }
}

/// Item addresses always select by id, whatever the caller passed
fn effective_selection(address: Address, selection: Option<&Selection>) -> Option<Selection> {
    match address {
        Address::Item(id) => Some(Selection::by_id(id)),
        Address::Collection => selection.filter(|s| !s.is_empty()).cloned(),
    }
}

/// Append a `WHERE` clause and return its arguments
fn push_where(sql: &mut String, selection: Option<&Selection>) -> Vec<Value> {
    match selection {
        Some(selection) => {
            sql.push_str(" WHERE ");
            sql.push_str(selection.clause());
            selection.args().to_vec()
        }
        None => Vec::new(),
    }
}

fn column_list(columns: &[Column]) -> String {
    columns
        .iter()
        .map(Column::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Map keys to writable columns, with values coerced to the column's kind
fn writable_fields(values: &ContentValues) -> ProviderResult<Vec<(Column, Value)>> {
    values
        .iter()
        .map(|(key, value)| {
            let column: Column = key
                .parse()
                .map_err(|_| ProviderError::UnknownColumn(key.to_string()))?;
            if !column.is_writable() {
                return Err(ProviderError::ReadOnlyColumn(column));
            }
            let value = match column.kind() {
                ColumnKind::Integer => value.as_integer().map(Value::Integer),
                ColumnKind::Text => value.as_text().map(Value::Text),
            };
            Ok((column, value.unwrap_or(Value::Null)))
        })
        .collect()
}
