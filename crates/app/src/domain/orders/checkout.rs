//! Checkout planning.
//!
//! Pure helpers that decide which cart entries become line items and what gets copied onto the
//! order. The database work lives in [`crate::domain::orders::PgOrdersService::checkout`].

use jiff::Timestamp;
use rust_decimal::Decimal;
use rustc_hash::FxHashSet;

use crate::domain::{
    carts::records::{CartItemRecord, CartRecord},
    orders::{
        data::{NewOrder, NewOrderLineItem},
        records::OrderId,
    },
    products::records::ProductId,
    profiles::records::ProfileRecord,
};

/// Which cart entries a checkout converts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CheckoutSelection {
    /// Every entry in the cart.
    #[default]
    All,

    /// Only entries whose product id is in the set. Ids not in the cart are ignored.
    Only(FxHashSet<ProductId>),
}

impl CheckoutSelection {
    /// `None` or an empty list selects the whole cart. Duplicate ids collapse.
    #[must_use]
    pub fn from_product_ids(ids: Option<Vec<ProductId>>) -> Self {
        match ids {
            Some(ids) if !ids.is_empty() => Self::Only(ids.into_iter().collect()),
            _ => Self::All,
        }
    }

    #[must_use]
    pub fn includes(&self, product: ProductId) -> bool {
        match self {
            Self::All => true,
            Self::Only(ids) => ids.contains(&product),
        }
    }

    /// The cart entries to convert, in product id order.
    #[must_use]
    pub fn select<'a>(&self, cart: &'a CartRecord) -> Vec<&'a CartItemRecord> {
        cart.items
            .iter()
            .filter(|(id, _)| self.includes(**id))
            .map(|(_, item)| item)
            .collect()
    }
}

/// Order header shipped to the profile's address, with no shipping charge.
pub(crate) fn new_order(profile: &ProfileRecord, date: Timestamp) -> NewOrder {
    NewOrder {
        user_id: profile.user_id,
        date,
        address: profile.address.clone(),
        city: profile.city.clone(),
        state: profile.state.clone(),
        zip: profile.zip.clone(),
        shipping_amount: Decimal::ZERO,
    }
}

/// Snapshot of a cart entry's current price and discount.
pub(crate) fn new_line_item(order: OrderId, item: &CartItemRecord) -> NewOrderLineItem {
    NewOrderLineItem {
        order_id: order,
        product_id: item.product.id,
        sales_price: item.product.price,
        quantity: item.quantity,
        discount: item.discount_percent,
    }
}
