//! Order Records

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{
    domain::{products::records::ProductId, users::records::UserId},
    ids::TypedId,
};

/// Order ID
pub type OrderId = TypedId<OrderRecord>;

/// Order Record
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub id: OrderId,
    pub user_id: UserId,
    pub date: Timestamp,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub shipping_amount: Decimal,
}

/// Order Line Item ID
pub type OrderLineItemId = TypedId<OrderLineItemRecord>;

/// Order Line Item Record
///
/// `sales_price` and `discount` are copied from the cart at checkout and never recomputed.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLineItemRecord {
    pub id: OrderLineItemId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub sales_price: Decimal,
    pub quantity: i32,
    pub discount: Decimal,
}

/// An order header together with its line items.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDetails {
    pub order: OrderRecord,
    pub line_items: Vec<OrderLineItemRecord>,
}
