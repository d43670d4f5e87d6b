//! Content URIs and address resolution
//!
//! Format: `content://<authority>/products[/<id>]`
//!
//! Examples:
//! - `content://com.example.inventory/products` - every product
//! - `content://com.example.inventory/products/42` - the product with id 42
//!
//! A `ContentUri` is any address a caller hands to the provider. Only two
//! shapes are understood; `Address::resolve` classifies them and returns
//! `None` for everything else.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::contract::{CONTENT_AUTHORITY, CONTENT_SCHEME, PATH_PRODUCTS};

/// An address handed to the provider, recognised or not
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentUri(String);

impl ContentUri {
    /// Wrap an arbitrary URI string
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    /// URI of the whole product collection
    pub fn collection() -> Self {
        Self(format!(
            "{}://{}/{}",
            CONTENT_SCHEME, CONTENT_AUTHORITY, PATH_PRODUCTS
        ))
    }

    /// URI of a single product
    pub fn item(id: i64) -> Self {
        Self::collection().with_appended_id(id)
    }

    /// Append an id segment to this URI
    pub fn with_appended_id(&self, id: i64) -> Self {
        Self(format!("{}/{}", self.0.trim_end_matches('/'), id))
    }

    /// The id this URI addresses, if it is an item URI
    pub fn id(&self) -> Option<i64> {
        match Address::resolve(self)? {
            Address::Item(id) => Some(id),
            Address::Collection => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ContentUri {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<Address> for ContentUri {
    fn from(address: Address) -> Self {
        match address {
            Address::Collection => ContentUri::collection(),
            Address::Item(id) => ContentUri::item(id),
        }
    }
}

/// The two resource shapes the provider understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Address {
    /// Every product
    Collection,
    /// One product by id
    Item(i64),
}

impl Address {
    /// Classify a URI, returning `None` when it matches neither shape
    pub fn resolve(uri: &ContentUri) -> Option<Self> {
        let rest = uri
            .as_str()
            .strip_prefix(CONTENT_SCHEME)?
            .strip_prefix("://")?;

        let (authority, path) = rest.split_once('/')?;
        if authority != CONTENT_AUTHORITY {
            return None;
        }

        let path = path.strip_suffix('/').unwrap_or(path);
        let mut segments = path.split('/');

        if segments.next()? != PATH_PRODUCTS {
            return None;
        }

        match (segments.next(), segments.next()) {
            (None, _) => Some(Address::Collection),
            (Some(id), None) => parse_id(id).map(Address::Item),
            _ => None,
        }
    }

    /// Whether a change at `other` is visible to an observer of `self`
    ///
    /// The collection is an ancestor of every item, so it overlaps with
    /// everything; two items overlap only when they are the same product.
    pub fn overlaps(&self, other: &Address) -> bool {
        match (self, other) {
            (Address::Collection, _) | (_, Address::Collection) => true,
            (Address::Item(a), Address::Item(b)) => a == b,
        }
    }
}

/// Item ids are unsigned decimal numbers
fn parse_id(segment: &str) -> Option<i64> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_uri() {
        let uri = ContentUri::collection();
        assert_eq!(uri.as_str(), "content://com.example.inventory/products");
        assert_eq!(Address::resolve(&uri), Some(Address::Collection));
        assert_eq!(uri.id(), None);
    }

    #[test]
    fn test_item_uri() {
        let uri = ContentUri::item(42);
        assert_eq!(uri.as_str(), "content://com.example.inventory/products/42");
        assert_eq!(Address::resolve(&uri), Some(Address::Item(42)));
        assert_eq!(uri.id(), Some(42));
    }

    #[test]
    fn test_trailing_slash_accepted() {
        let uri = ContentUri::new("content://com.example.inventory/products/");
        assert_eq!(Address::resolve(&uri), Some(Address::Collection));
    }

    #[test]
    fn test_unrecognized_uris() {
        let cases = [
            "",
            "products",
            "http://com.example.inventory/products",
            "content://com.example.other/products",
            "content://com.example.inventory/staff",
            "content://com.example.inventory/products/abc",
            "content://com.example.inventory/products/-1",
            "content://com.example.inventory/products/1/2",
            "content://com.example.inventory/products/99999999999999999999",
        ];

        for case in cases {
            assert_eq!(
                Address::resolve(&ContentUri::new(case)),
                None,
                "{} should not resolve",
                case
            );
        }
    }

    #[test]
    fn test_overlap() {
        assert!(Address::Collection.overlaps(&Address::Item(1)));
        assert!(Address::Item(1).overlaps(&Address::Collection));
        assert!(Address::Item(1).overlaps(&Address::Item(1)));
        assert!(!Address::Item(1).overlaps(&Address::Item(2)));
    }

    #[test]
    fn test_address_into_uri() {
        let uri: ContentUri = Address::Item(7).into();
        assert_eq!(uri, ContentUri::item(7));
    }
}
