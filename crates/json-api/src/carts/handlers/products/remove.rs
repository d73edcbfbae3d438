//! Remove Cart Product Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use storefront_app::domain::products::records::ProductId;

use crate::{
    carts::{errors::into_status_error, responses::CartResponse},
    extensions::*,
    state::State,
};

/// Remove Cart Product Handler
#[endpoint(
    tags("cart"),
    summary = "Remove Product from Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product removed"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not in cart"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "carts.products.remove",
    skip(product, depot),
    fields(
        user_id = tracing::field::Empty,
        product_id = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    product: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_id_or_401()?;
    let product = ProductId::from_id(product.into_inner());

    let span = tracing::Span::current();

    span.record("user_id", user.into_id());
    span.record("product_id", product.into_id());

    let cart = state
        .app
        .carts
        .remove_product(user, product)
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}
