//! Cart Records

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::domain::{
    products::records::{ProductId, ProductRecord},
    users::records::UserId,
};

/// Cart Record
///
/// Items are keyed by product id, so iteration and serialisation always follow product id order.
#[derive(Debug, Clone, PartialEq)]
pub struct CartRecord {
    pub user_id: UserId,
    pub items: BTreeMap<ProductId, CartItemRecord>,
}

impl CartRecord {
    /// Build a cart from its item rows. A later row for the same product replaces an earlier one.
    pub fn from_items(user_id: UserId, items: impl IntoIterator<Item = CartItemRecord>) -> Self {
        Self {
            user_id,
            items: items
                .into_iter()
                .map(|item| (item.product.id, item))
                .collect(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of every item's line total.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items.values().map(CartItemRecord::line_total).sum()
    }
}

/// Cart Item Record
#[derive(Debug, Clone, PartialEq)]
pub struct CartItemRecord {
    pub product: ProductRecord,
    pub quantity: i32,
    pub discount_percent: Decimal,
}

impl CartItemRecord {
    /// `price × quantity × (1 − discount_percent / 100)`
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        let gross = self.product.price * Decimal::from(self.quantity);

        gross * (Decimal::ONE_HUNDRED - self.discount_percent) / Decimal::ONE_HUNDRED
    }
}
