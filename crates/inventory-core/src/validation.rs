//! Field validation
//!
//! Rules are checked in a fixed order and the first failure wins:
//! name, price (present, then positive), quantity, supplier name,
//! supplier phone. Inserts check every rule; updates check only the
//! fields present in the mapping.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::contract::Column;
use crate::values::{ContentValues, Value};

/// Writable columns in the order their rules are checked
const RULE_ORDER: [Column; 5] = [
    Column::ProductName,
    Column::Price,
    Column::Quantity,
    Column::SupplierName,
    Column::SupplierPhone,
];

static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+]?[0-9]{7,13}$").expect("phone pattern is valid"));

/// Why a field was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationReason {
    /// Absent from the mapping or explicitly null
    Missing,
    /// Text that is empty or only whitespace
    Empty,
    /// Present but not readable as an integer
    NotAnInteger,
    /// Zero or negative where a positive number is required
    NonPositive,
    /// Does not match the expected format
    Malformed,
}

impl fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ValidationReason::Missing => "is required",
            ValidationReason::Empty => "cannot be empty",
            ValidationReason::NotAnInteger => "must be a whole number",
            ValidationReason::NonPositive => "must be greater than zero",
            ValidationReason::Malformed => "is not a valid phone number",
        };
        f.write_str(s)
    }
}

/// A field rule violation, detected before anything reaches storage
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{} {reason}", field_label(.field))]
pub struct ValidationError {
    pub field: Column,
    pub reason: ValidationReason,
}

impl ValidationError {
    fn new(field: Column, reason: ValidationReason) -> Self {
        Self { field, reason }
    }
}

fn field_label(column: &Column) -> &'static str {
    match column {
        Column::Id => "Product id",
        Column::ProductName => "Product name",
        Column::Price => "Price",
        Column::Quantity => "Quantity",
        Column::SupplierName => "Supplier name",
        Column::SupplierPhone => "Supplier phone",
    }
}

/// Check a complete field set for insertion
pub fn validate_insert(values: &ContentValues) -> Result<(), ValidationError> {
    for column in RULE_ORDER {
        check_field(column, values.get(column.as_str()))?;
    }
    Ok(())
}

/// Check only the fields present in a partial update
pub fn validate_update(values: &ContentValues) -> Result<(), ValidationError> {
    for column in RULE_ORDER {
        if let Some(value) = values.get(column.as_str()) {
            check_field(column, Some(value))?;
        }
    }
    Ok(())
}

/// Whether `phone` is an optional `+` followed by 7 to 13 digits
pub fn is_phone_valid(phone: &str) -> bool {
    PHONE_PATTERN.is_match(phone)
}

fn check_field(column: Column, value: Option<&Value>) -> Result<(), ValidationError> {
    match column {
        Column::ProductName | Column::SupplierName => required_text(column, value),
        Column::Price => {
            let price = required_integer(column, value)?;
            if price <= 0 {
                return Err(ValidationError::new(column, ValidationReason::NonPositive));
            }
            Ok(())
        }
        Column::Quantity => required_integer(column, value).map(|_| ()),
        Column::SupplierPhone => match value.and_then(Value::as_text) {
            Some(phone) if !phone.is_empty() && !is_phone_valid(&phone) => {
                Err(ValidationError::new(column, ValidationReason::Malformed))
            }
            _ => Ok(()),
        },
        Column::Id => Ok(()),
    }
}

fn required_text(column: Column, value: Option<&Value>) -> Result<(), ValidationError> {
    let text = value
        .and_then(Value::as_text)
        .ok_or_else(|| ValidationError::new(column, ValidationReason::Missing))?;

    if text.trim().is_empty() {
        return Err(ValidationError::new(column, ValidationReason::Empty));
    }
    Ok(())
}

fn required_integer(column: Column, value: Option<&Value>) -> Result<i64, ValidationError> {
    match value {
        None | Some(Value::Null) => Err(ValidationError::new(column, ValidationReason::Missing)),
        Some(v) => v
            .as_integer()
            .ok_or_else(|| ValidationError::new(column, ValidationReason::NotAnInteger)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> ContentValues {
        ContentValues::new()
            .with("product_name", "Atlas")
            .with("price", 25)
            .with("quantity", 3)
            .with("supplier_name", "Acme")
            .with("supplier_phone", "+15551234567")
    }

    fn insert_error(values: &ContentValues) -> (Column, ValidationReason) {
        let err = validate_insert(values).unwrap_err();
        (err.field, err.reason)
    }

    #[test]
    fn test_valid_insert() {
        assert!(validate_insert(&valid()).is_ok());
    }

    #[test]
    fn test_name_rules() {
        let mut values = valid();
        values.remove("product_name");
        assert_eq!(
            insert_error(&values),
            (Column::ProductName, ValidationReason::Missing)
        );

        values.put("product_name", "");
        assert_eq!(
            insert_error(&values),
            (Column::ProductName, ValidationReason::Empty)
        );

        values.put("product_name", "   ");
        assert_eq!(
            insert_error(&values),
            (Column::ProductName, ValidationReason::Empty)
        );
    }

    #[test]
    fn test_price_rules() {
        let mut values = valid();
        values.put_null("price");
        assert_eq!(insert_error(&values), (Column::Price, ValidationReason::Missing));

        values.put("price", "cheap");
        assert_eq!(
            insert_error(&values),
            (Column::Price, ValidationReason::NotAnInteger)
        );

        for price in [0, -1, -500] {
            values.put("price", price);
            assert_eq!(
                insert_error(&values),
                (Column::Price, ValidationReason::NonPositive)
            );
        }

        values.put("price", "12");
        assert!(validate_insert(&values).is_ok());
    }

    #[test]
    fn test_quantity_required_on_insert() {
        let mut values = valid();
        values.remove("quantity");
        assert_eq!(
            insert_error(&values),
            (Column::Quantity, ValidationReason::Missing)
        );

        // zero and negative quantities are not the data layer's concern
        values.put("quantity", 0);
        assert!(validate_insert(&values).is_ok());
        values.put("quantity", -3);
        assert!(validate_insert(&values).is_ok());
    }

    #[test]
    fn test_supplier_name_required() {
        let mut values = valid();
        values.remove("supplier_name");
        assert_eq!(
            insert_error(&values),
            (Column::SupplierName, ValidationReason::Missing)
        );
    }

    #[test]
    fn test_phone_optional() {
        let mut values = valid();
        values.remove("supplier_phone");
        assert!(validate_insert(&values).is_ok());

        values.put("supplier_phone", "");
        assert!(validate_insert(&values).is_ok());

        values.put_null("supplier_phone");
        assert!(validate_insert(&values).is_ok());
    }

    #[test]
    fn test_phone_malformed() {
        let mut values = valid();
        for phone in ["123456", "12345678901234", "++1234567", "555-1234", "abc1234567", " 1234567"] {
            values.put("supplier_phone", phone);
            assert_eq!(
                insert_error(&values),
                (Column::SupplierPhone, ValidationReason::Malformed),
                "{} should be rejected",
                phone
            );
        }
    }

    #[test]
    fn test_phone_pattern() {
        assert!(is_phone_valid("1234567"));
        assert!(is_phone_valid("+1234567890123"));
        assert!(!is_phone_valid("+"));
        assert!(!is_phone_valid("1234567\n"));
    }

    #[test]
    fn test_first_failure_wins() {
        let values = ContentValues::new()
            .with("price", -1)
            .with("supplier_phone", "bad");
        assert_eq!(
            insert_error(&values),
            (Column::ProductName, ValidationReason::Missing)
        );

        let values = ContentValues::new()
            .with("product_name", "Atlas")
            .with("price", 0);
        assert_eq!(
            insert_error(&values),
            (Column::Price, ValidationReason::NonPositive)
        );

        let mut values = valid();
        values.remove("quantity");
        values.remove("supplier_name");
        assert_eq!(
            insert_error(&values),
            (Column::Quantity, ValidationReason::Missing)
        );

        let mut values = valid().with("supplier_phone", "12-34");
        values.remove("supplier_name");
        assert_eq!(
            insert_error(&values),
            (Column::SupplierName, ValidationReason::Missing)
        );

        let values = valid()
            .with("supplier_name", "  ")
            .with("supplier_phone", "12-34");
        assert_eq!(
            insert_error(&values),
            (Column::SupplierName, ValidationReason::Empty)
        );

        let values = valid().with("supplier_phone", "12-34");
        assert_eq!(
            insert_error(&values),
            (Column::SupplierPhone, ValidationReason::Malformed)
        );

        // Update follows the same order over present fields
        let values = ContentValues::new()
            .with("quantity", "many")
            .with("supplier_name", "");
        let err = validate_update(&values).unwrap_err();
        assert_eq!(
            (err.field, err.reason),
            (Column::Quantity, ValidationReason::NotAnInteger)
        );
    }

    #[test]
    fn test_update_checks_present_fields_only() {
        let values = ContentValues::new().with("quantity", 9);
        assert!(validate_update(&values).is_ok());

        let values = ContentValues::new().with("price", -5);
        let err = validate_update(&values).unwrap_err();
        assert_eq!(err.field, Column::Price);
        assert_eq!(err.reason, ValidationReason::NonPositive);

        let mut values = ContentValues::new();
        values.put_null("product_name");
        let err = validate_update(&values).unwrap_err();
        assert_eq!(err.reason, ValidationReason::Missing);
    }

    #[test]
    fn test_error_display() {
        let err = ValidationError::new(Column::Price, ValidationReason::NonPositive);
        assert_eq!(err.to_string(), "Price must be greater than zero");
    }
}
