//! Product contract
//!
//! Single source of truth for the names shared by the storage layer and the
//! provider: content authority, resource path, table and column identifiers,
//! and the resource-type descriptors returned by `get_type`.

use std::fmt;
use std::str::FromStr;

/// Authority every product URI is rooted under
pub const CONTENT_AUTHORITY: &str = "com.example.inventory";

/// URI scheme for content addresses
pub const CONTENT_SCHEME: &str = "content";

/// Path segment for the product collection
pub const PATH_PRODUCTS: &str = "products";

/// Table holding every product row
pub const TABLE_NAME: &str = "products";

/// Database file name inside the data directory
pub const DATABASE_NAME: &str = "storage.db";

/// Schema version written to a freshly created store
pub const DATABASE_VERSION: i32 = 1;

/// Resource type of a URI addressing the whole collection
pub const CONTENT_LIST_TYPE: &str = "vnd.android.cursor.dir/com.example.inventory/products";

/// Resource type of a URI addressing a single product
pub const CONTENT_ITEM_TYPE: &str = "vnd.android.cursor.item/com.example.inventory/products";

/// Storage class of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    Text,
}

/// Columns of the products table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    Id,
    ProductName,
    Price,
    Quantity,
    SupplierName,
    SupplierPhone,
}

impl Column {
    /// Every column, in table order
    pub const ALL: [Column; 6] = [
        Column::Id,
        Column::ProductName,
        Column::Price,
        Column::Quantity,
        Column::SupplierName,
        Column::SupplierPhone,
    ];

    /// Column identifier as it appears in SQL
    pub fn as_str(&self) -> &'static str {
        match self {
            Column::Id => "id",
            Column::ProductName => "product_name",
            Column::Price => "price",
            Column::Quantity => "quantity",
            Column::SupplierName => "supplier_name",
            Column::SupplierPhone => "supplier_phone",
        }
    }

    pub fn kind(&self) -> ColumnKind {
        match self {
            Column::Id | Column::Price | Column::Quantity => ColumnKind::Integer,
            Column::ProductName | Column::SupplierName | Column::SupplierPhone => ColumnKind::Text,
        }
    }

    /// Whether callers may write this column
    ///
    /// The id is assigned by SQLite and never changes afterwards.
    pub fn is_writable(&self) -> bool {
        !matches!(self, Column::Id)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Column {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Column::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("Unknown column: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_names_round_trip() {
        for column in Column::ALL {
            assert_eq!(column.as_str().parse::<Column>().unwrap(), column);
        }
        assert!("_id".parse::<Column>().is_err());
    }

    #[test]
    fn test_only_id_is_read_only() {
        let read_only: Vec<_> = Column::ALL.iter().filter(|c| !c.is_writable()).collect();
        assert_eq!(read_only, vec![&Column::Id]);
    }

    #[test]
    fn test_resource_types_differ() {
        assert_ne!(CONTENT_LIST_TYPE, CONTENT_ITEM_TYPE);
        assert!(CONTENT_LIST_TYPE.ends_with(PATH_PRODUCTS));
        assert!(CONTENT_ITEM_TYPE.contains(CONTENT_AUTHORITY));
    }
}
