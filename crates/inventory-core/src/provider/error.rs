//! Provider errors

use std::fmt;

use thiserror::Error;

use crate::contract::Column;
use crate::storage::StorageError;
use crate::uri::ContentUri;
use crate::validation::ValidationError;

/// Provider entry points, for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Query,
    Insert,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Operation::Query => "Query",
            Operation::Insert => "Insertion",
            Operation::Update => "Update",
            Operation::Delete => "Deletion",
        };
        f.write_str(s)
    }
}

/// Errors returned by `ProductProvider`
#[derive(Error, Debug)]
pub enum ProviderError {
    /// A field failed validation; nothing was written
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The URI matches neither the collection nor an item
    #[error("Unknown URI: {0}")]
    UnrecognizedAddress(ContentUri),

    /// The URI is not valid for this operation
    #[error("{operation} is not supported for {uri}")]
    UnsupportedOperation { operation: Operation, uri: ContentUri },

    /// The field-value mapping names a column the table does not have
    #[error("Unknown column: '{0}'")]
    UnknownColumn(String),

    /// The field-value mapping tries to write a system-assigned column
    #[error("Column '{0}' is assigned by the store and cannot be written")]
    ReadOnlyColumn(Column),

    /// The storage engine could not complete the request
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ProviderError {
    /// Whether the caller can fix the input and retry
    pub fn is_validation(&self) -> bool {
        matches!(self, ProviderError::Validation(_))
    }
}

impl From<rusqlite::Error> for ProviderError {
    fn from(error: rusqlite::Error) -> Self {
        ProviderError::Storage(StorageError::Database(error))
    }
}

/// Result type for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationReason;

    #[test]
    fn test_unsupported_display() {
        let err = ProviderError::UnsupportedOperation {
            operation: Operation::Insert,
            uri: ContentUri::item(4),
        };
        assert_eq!(
            err.to_string(),
            "Insertion is not supported for content://com.example.inventory/products/4"
        );
    }

    #[test]
    fn test_validation_is_transparent() {
        let err: ProviderError = ValidationError {
            field: Column::ProductName,
            reason: ValidationReason::Empty,
        }
        .into();

        assert!(err.is_validation());
        assert!(matches!(
            err,
            ProviderError::Validation(ValidationError {
                field: Column::ProductName,
                ..
            })
        ));
        assert_eq!(err.to_string(), "Product name cannot be empty");
    }

    #[test]
    fn test_sqlite_error_is_storage() {
        let err: ProviderError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(
            err,
            ProviderError::Storage(StorageError::Database(_))
        ));
        assert!(!err.is_validation());
    }
}
