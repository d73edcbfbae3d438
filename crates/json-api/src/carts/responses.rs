//! Cart Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use storefront_app::domain::carts::records::{CartItemRecord, CartRecord};

use crate::{money::format_money, products::get::ProductResponse};

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartResponse {
    /// Owner of the cart
    pub user_id: i64,

    /// The items in the cart, ordered by product id
    pub items: Vec<CartItemResponse>,

    /// Sum of every line total
    pub total: String,
}

impl From<CartRecord> for CartResponse {
    fn from(cart: CartRecord) -> Self {
        let total = format_money(cart.total());

        CartResponse {
            user_id: cart.user_id.into_id(),
            items: cart.items.into_values().map(CartItemResponse::from).collect(),
            total,
        }
    }
}

/// Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartItemResponse {
    pub product: ProductResponse,

    pub quantity: i32,

    pub discount_percent: String,

    /// `price × quantity` less the discount
    pub line_total: String,
}

impl From<CartItemRecord> for CartItemResponse {
    fn from(item: CartItemRecord) -> Self {
        let line_total = format_money(item.line_total());

        Self {
            product: item.product.into(),
            quantity: item.quantity,
            discount_percent: format_money(item.discount_percent),
            line_total,
        }
    }
}
