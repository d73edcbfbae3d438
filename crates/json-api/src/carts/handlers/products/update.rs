//! Update Cart Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::products::records::ProductId;

use crate::{
    carts::{errors::into_status_error, responses::CartResponse},
    extensions::*,
    state::State,
};

/// Update Cart Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCartProductRequest {
    /// New absolute quantity, at least 1
    pub quantity: i32,
}

/// Update Cart Product Handler
///
/// Sets the quantity of a product already in the cart.
#[endpoint(
    tags("cart"),
    summary = "Set Cart Product Quantity",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Quantity updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Quantity below 1"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not in cart"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "carts.products.update",
    skip(product, json, depot),
    fields(
        user_id = tracing::field::Empty,
        product_id = tracing::field::Empty,
        quantity = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    product: PathParam<i64>,
    json: JsonBody<UpdateCartProductRequest>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_id_or_401()?;
    let product = ProductId::from_id(product.into_inner());
    let quantity = json.into_inner().quantity;

    let span = tracing::Span::current();

    span.record("user_id", user.into_id());
    span.record("product_id", product.into_id());
    span.record("quantity", quantity);

    let cart = state
        .app
        .carts
        .update_quantity(user, product, quantity)
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}
