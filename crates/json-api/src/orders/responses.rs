//! Order Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use storefront_app::domain::orders::records::{OrderDetails, OrderLineItemRecord, OrderRecord};

use crate::money::format_money;

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderResponse {
    pub order_id: i64,

    pub user_id: i64,

    /// When the order was placed (RFC 3339)
    pub date: String,

    /// Shipping address, copied from the profile at checkout
    pub address: String,

    pub city: String,

    pub state: String,

    pub zip: String,

    pub shipping_amount: String,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        Self {
            order_id: order.id.into_id(),
            user_id: order.user_id.into_id(),
            date: order.date.to_string(),
            address: order.address,
            city: order.city,
            state: order.state,
            zip: order.zip,
            shipping_amount: format_money(order.shipping_amount),
        }
    }
}

/// Order Line Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderLineItemResponse {
    pub line_item_id: i64,

    pub product_id: i64,

    /// Unit price at the time of checkout
    pub sales_price: String,

    pub quantity: i32,

    /// Discount percent at the time of checkout
    pub discount: String,
}

impl From<OrderLineItemRecord> for OrderLineItemResponse {
    fn from(item: OrderLineItemRecord) -> Self {
        Self {
            line_item_id: item.id.into_id(),
            product_id: item.product_id.into_id(),
            sales_price: format_money(item.sales_price),
            quantity: item.quantity,
            discount: format_money(item.discount),
        }
    }
}

/// Order Details Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderDetailsResponse {
    pub order: OrderResponse,

    pub line_items: Vec<OrderLineItemResponse>,
}

impl From<OrderDetails> for OrderDetailsResponse {
    fn from(details: OrderDetails) -> Self {
        Self {
            order: details.order.into(),
            line_items: details.line_items.into_iter().map(Into::into).collect(),
        }
    }
}

/// Orders Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersResponse {
    /// The user's orders, newest first
    pub orders: Vec<OrderResponse>,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use jiff::Timestamp;
    use rust_decimal::Decimal;

    use storefront_app::domain::orders::records::{OrderId, OrderRecord};

    use crate::test_helpers::TEST_USER_ID;

    pub(crate) fn make_order(id: i64) -> OrderRecord {
        OrderRecord {
            id: OrderId::from_id(id),
            user_id: TEST_USER_ID,
            date: Timestamp::UNIX_EPOCH,
            address: "1 Main St".to_string(),
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            zip: "62701".to_string(),
            shipping_amount: Decimal::ZERO,
        }
    }
}
