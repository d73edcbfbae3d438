//! Get Order Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use storefront_app::domain::orders::records::OrderId;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, responses::OrderDetailsResponse},
    state::State,
};

/// Get Order Handler
///
/// Returns one of the caller's orders with its line items. Orders of other users are not found.
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order found"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "orders.get",
    skip(order, depot),
    fields(
        user_id = tracing::field::Empty,
        order_id = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    order: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<OrderDetailsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_id_or_401()?;
    let order = OrderId::from_id(order.into_inner());

    let span = tracing::Span::current();

    span.record("user_id", user.into_id());
    span.record("order_id", order.into_id());

    let details = state
        .app
        .orders
        .get_order(user, order)
        .await
        .map_err(into_status_error)?;

    Ok(Json(details.into()))
}
