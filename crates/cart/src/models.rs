//! Cart and catalog data transfer types.
//!
//! Field names follow the catalog service's JSON shape (camelCase), which is
//! also the shape of the persisted cart mirror.

use rocket_shoes_core::{Price, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product as returned by the catalog service (`GET products/{id}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub image_url: String,
}

/// Available stock for a product (`GET stock/{id}`).
///
/// Read-only external fact; never cached so quantity checks stay fresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    pub id: ProductId,
    pub amount: u32,
}

/// A cart entry: a catalog product plus the quantity held in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub image_url: String,
    /// Quantity held in the cart. Always at least 1.
    pub amount: u32,
}

impl CartItem {
    /// Build a cart entry from a catalog record and an initial quantity.
    #[must_use]
    pub fn from_record(record: ProductRecord, amount: u32) -> Self {
        Self {
            id: record.id,
            name: record.name,
            price: record.price,
            image_url: record.image_url,
            amount,
        }
    }

    /// Line total: unit price times held quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price.amount() * Decimal::from(self.amount)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn shoe_record() -> ProductRecord {
        serde_json::from_str(
            r#"{"id":1,"name":"Shoe","price":100.0,"imageUrl":"https://cdn.example/shoe.jpg"}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_product_record_uses_camel_case() {
        let record = shoe_record();
        assert_eq!(record.id, ProductId::new(1));
        assert_eq!(record.name, "Shoe");
        assert_eq!(record.image_url, "https://cdn.example/shoe.jpg");
    }

    #[test]
    fn test_cart_item_from_record() {
        let item = CartItem::from_record(shoe_record(), 1);
        assert_eq!(item.id, ProductId::new(1));
        assert_eq!(item.amount, 1);
        assert_eq!(item.name, "Shoe");
    }

    #[test]
    fn test_cart_item_serde_roundtrip() {
        let item = CartItem::from_record(shoe_record(), 3);
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"imageUrl\""));
        let back: CartItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn test_line_total() {
        let item = CartItem::from_record(shoe_record(), 3);
        assert_eq!(item.line_total(), Decimal::new(300, 0));
    }

    #[test]
    fn test_stock_parses_catalog_shape() {
        let stock: Stock = serde_json::from_str(r#"{"id":2,"amount":5}"#).unwrap();
        assert_eq!(stock.id, ProductId::new(2));
        assert_eq!(stock.amount, 5);
    }
}
