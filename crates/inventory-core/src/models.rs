//! Data models for Inventory
//!
//! Typed views over the products table. `Product` is decoded from a full
//! row; `NewProduct` and `ProductChanges` turn into the field-value
//! mappings the provider validates.

use serde::{Deserialize, Serialize};

use crate::contract::Column;
use crate::provider::Row;
use crate::values::ContentValues;

/// A stored product
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    /// Identifier assigned by the store
    pub id: i64,
    /// Display name
    pub name: String,
    /// Unit price in whole currency units
    pub price: i64,
    /// Units in stock
    pub quantity: i64,
    /// Who supplies it
    pub supplier_name: String,
    /// Supplier contact number
    pub supplier_phone: Option<String>,
}

impl Product {
    /// Decode a row carrying every column
    ///
    /// Returns `None` if a required column was not projected.
    pub fn from_row(row: &Row) -> Option<Self> {
        Some(Self {
            id: row.get_i64(Column::Id)?,
            name: row.get_string(Column::ProductName)?,
            price: row.get_i64(Column::Price)?,
            quantity: row.get_i64(Column::Quantity)?,
            supplier_name: row.get_string(Column::SupplierName)?,
            supplier_phone: row.get_string(Column::SupplierPhone),
        })
    }

    pub fn is_in_stock(&self) -> bool {
        self.quantity > 0
    }
}

/// Fields for a product that has not been stored yet
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub price: i64,
    #[serde(default)]
    pub quantity: i64,
    pub supplier_name: String,
    #[serde(default)]
    pub supplier_phone: Option<String>,
}

impl NewProduct {
    /// Create a product with no stock and no supplier phone
    pub fn new(name: impl Into<String>, price: i64, supplier_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price,
            quantity: 0,
            supplier_name: supplier_name.into(),
            supplier_phone: None,
        }
    }

    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_supplier_phone(mut self, phone: impl Into<String>) -> Self {
        self.supplier_phone = Some(phone.into());
        self
    }

    /// Complete field set for an insert
    pub fn to_values(&self) -> ContentValues {
        let mut values = ContentValues::new()
            .with(Column::ProductName.as_str(), self.name.as_str())
            .with(Column::Price.as_str(), self.price)
            .with(Column::Quantity.as_str(), self.quantity)
            .with(Column::SupplierName.as_str(), self.supplier_name.as_str());

        if let Some(ref phone) = self.supplier_phone {
            values.put(Column::SupplierPhone.as_str(), phone.as_str());
        }
        values
    }
}

/// A partial update; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub price: Option<i64>,
    pub quantity: Option<i64>,
    pub supplier_name: Option<String>,
    /// `Some(None)` clears the phone
    pub supplier_phone: Option<Option<String>>,
}

impl ProductChanges {
    pub fn is_empty(&self) -> bool {
        self.to_values().is_empty()
    }

    /// Only the fields being changed
    pub fn to_values(&self) -> ContentValues {
        let mut values = ContentValues::new();

        if let Some(ref name) = self.name {
            values.put(Column::ProductName.as_str(), name.as_str());
        }
        if let Some(price) = self.price {
            values.put(Column::Price.as_str(), price);
        }
        if let Some(quantity) = self.quantity {
            values.put(Column::Quantity.as_str(), quantity);
        }
        if let Some(ref supplier) = self.supplier_name {
            values.put(Column::SupplierName.as_str(), supplier.as_str());
        }
        match self.supplier_phone {
            Some(Some(ref phone)) => values.put(Column::SupplierPhone.as_str(), phone.as_str()),
            Some(None) => values.put_null(Column::SupplierPhone.as_str()),
            None => {}
        }

        values
    }
}
