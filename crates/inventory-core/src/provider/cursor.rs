//! Query results
//!
//! A `Cursor` hands out the rows of one query, once, in order. The rows are
//! read from the database when the query runs, so the cursor holds no
//! statement or connection borrow. It also carries the change subscription
//! registered for the queried URI so the caller can tell when its rows have
//! gone stale. Dropping the cursor drops that subscription.

use std::sync::Arc;

use crate::contract::Column;
use crate::notify::Subscription;
use crate::values::Value;

/// One result row, restricted to the projected columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    columns: Arc<[Column]>,
    values: Vec<Value>,
}

impl Row {
    pub(crate) fn new(columns: Arc<[Column]>, values: Vec<Value>) -> Self {
        Self { columns, values }
    }

    /// Columns present in this row
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Values in projection order
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Value of a column, `None` if it was not projected
    pub fn get(&self, column: Column) -> Option<&Value> {
        let index = self.columns.iter().position(|c| *c == column)?;
        self.values.get(index)
    }

    pub fn get_i64(&self, column: Column) -> Option<i64> {
        self.get(column).and_then(Value::as_integer)
    }

    pub fn get_string(&self, column: Column) -> Option<String> {
        self.get(column).and_then(Value::as_text)
    }
}

/// Finite, single-pass sequence of rows from one query
#[derive(Debug)]
pub struct Cursor {
    columns: Arc<[Column]>,
    rows: std::vec::IntoIter<Row>,
    subscription: Subscription,
}

impl Cursor {
    pub(crate) fn new(columns: Arc<[Column]>, rows: Vec<Row>, subscription: Subscription) -> Self {
        Self {
            columns,
            rows: rows.into_iter(),
            subscription,
        }
    }

    /// Projected columns, in order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Rows not yet consumed
    pub fn remaining(&self) -> usize {
        self.rows.len()
    }

    /// Whether the data behind this cursor changed since the query ran
    pub fn has_changed(&self) -> bool {
        self.subscription.has_pending()
    }

}

impl Iterator for Cursor {
    type Item = Row;

    fn next(&mut self) -> Option<Row> {
        self.rows.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rows.size_hint()
    }
}

impl ExactSizeIterator for Cursor {}
