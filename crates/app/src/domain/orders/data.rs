//! Order Data

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::domain::{
    orders::records::OrderId, products::records::ProductId, users::records::UserId,
};

/// New Order Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub user_id: UserId,
    pub date: Timestamp,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub shipping_amount: Decimal,
}

/// New Order Line Item Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderLineItem {
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub sales_price: Decimal,
    pub quantity: i32,
    pub discount: Decimal,
}
