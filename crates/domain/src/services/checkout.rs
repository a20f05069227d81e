//! Checkout pricing.
//!
//! Turns requested checkout lines into priced order items using the
//! current catalog. Prices always come from the catalog, never the client.

use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

use crate::models::order::{CheckoutItem, OrderItem};
use crate::models::product::Product;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("Product {0} is not available")]
    ProductUnavailable(Uuid),

    #[error("Quantity {quantity} for product {product_id} is out of range")]
    InvalidQuantity { product_id: Uuid, quantity: i32 },

    #[error("Product {0} does not accept customization")]
    CustomizationNotAllowed(Uuid),

    #[error("Order total overflowed")]
    Overflow,
}

/// Priced lines and totals ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedOrder {
    pub items: Vec<OrderItem>,
    pub subtotal: i64,
    pub total: i64,
}

/// Prices the requested lines against `catalog`.
///
/// Every line must reference a visible product. Blank customization text
/// is dropped.
pub fn price_order(
    items: &[CheckoutItem],
    catalog: &HashMap<Uuid, Product>,
) -> Result<PricedOrder, CheckoutError> {
    let mut priced = Vec::with_capacity(items.len());
    let mut subtotal: i64 = 0;

    for item in items {
        let product = catalog
            .get(&item.product_id)
            .filter(|p| p.is_visible)
            .ok_or(CheckoutError::ProductUnavailable(item.product_id))?;

        if !(1..=100).contains(&item.quantity) {
            return Err(CheckoutError::InvalidQuantity {
                product_id: item.product_id,
                quantity: item.quantity,
            });
        }

        let customization = item
            .customization
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);
        if customization.is_some() && !product.is_customizable {
            return Err(CheckoutError::CustomizationNotAllowed(product.id));
        }

        let line_total = product
            .offer_price
            .checked_mul(i64::from(item.quantity))
            .ok_or(CheckoutError::Overflow)?;
        subtotal = subtotal
            .checked_add(line_total)
            .ok_or(CheckoutError::Overflow)?;

        priced.push(OrderItem {
            product_id: product.id,
            product_name: product.name.clone(),
            unit_price: product.offer_price,
            quantity: item.quantity,
            customization,
            line_total,
        });
    }

    Ok(PricedOrder {
        items: priced,
        subtotal,
        total: subtotal,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn product(offer_price: i64, is_visible: bool, is_customizable: bool) -> Product {
        Product {
            id: Uuid::new_v4(),
            name: "Photo Mug".to_string(),
            slug: "photo-mug".to_string(),
            description: String::new(),
            category: "mugs".to_string(),
            mrp: offer_price,
            offer_percentage: 0,
            offer_price,
            images: vec![],
            is_customizable,
            customization_note: None,
            is_visible,
            is_featured: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn catalog(products: &[Product]) -> HashMap<Uuid, Product> {
        products.iter().map(|p| (p.id, p.clone())).collect()
    }

    fn line(product_id: Uuid, quantity: i32, customization: Option<&str>) -> CheckoutItem {
        CheckoutItem {
            product_id,
            quantity,
            customization: customization.map(str::to_string),
        }
    }

    #[test]
    fn test_totals() {
        let mug = product(49_900, true, true);
        let card = product(9_900, true, false);
        let priced = price_order(
            &[
                line(mug.id, 2, Some("Happy Birthday")),
                line(card.id, 3, None),
            ],
            &catalog(&[mug.clone(), card.clone()]),
        )
        .unwrap();

        assert_eq!(priced.items.len(), 2);
        assert_eq!(priced.items[0].line_total, 99_800);
        assert_eq!(priced.items[1].line_total, 29_700);
        assert_eq!(priced.subtotal, 129_500);
        assert_eq!(priced.total, priced.subtotal);
        assert_eq!(
            priced.items[0].customization.as_deref(),
            Some("Happy Birthday")
        );
    }

    #[test]
    fn test_hidden_product_rejected() {
        let hidden = product(1_000, false, false);
        let err = price_order(&[line(hidden.id, 1, None)], &catalog(&[hidden.clone()]))
            .unwrap_err();
        assert_eq!(err, CheckoutError::ProductUnavailable(hidden.id));
    }

    #[test]
    fn test_unknown_product_rejected() {
        let missing = Uuid::new_v4();
        let err = price_order(&[line(missing, 1, None)], &HashMap::new()).unwrap_err();
        assert_eq!(err, CheckoutError::ProductUnavailable(missing));
    }

    #[test]
    fn test_quantity_bounds() {
        let mug = product(1_000, true, false);
        let items = catalog(&[mug.clone()]);
        assert!(price_order(&[line(mug.id, 0, None)], &items).is_err());
        assert!(price_order(&[line(mug.id, 101, None)], &items).is_err());
        assert!(price_order(&[line(mug.id, 100, None)], &items).is_ok());
    }

    #[test]
    fn test_customization_rules() {
        let plain = product(1_000, true, false);
        let items = catalog(&[plain.clone()]);
        assert_eq!(
            price_order(&[line(plain.id, 1, Some("Name"))], &items).unwrap_err(),
            CheckoutError::CustomizationNotAllowed(plain.id)
        );

        let priced = price_order(&[line(plain.id, 1, Some("   "))], &items).unwrap();
        assert!(priced.items[0].customization.is_none());
    }
}
