//! Checkout Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use storefront_app::domain::{orders::CheckoutSelection, products::records::ProductId};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, responses::OrderResponse},
    state::State,
};

/// Checkout Request
///
/// The whole body is optional. Without `selectedProductIds`, or with an empty list, every cart
/// entry is converted.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CheckoutRequest {
    #[serde(default)]
    pub selected_product_ids: Option<Vec<i64>>,
}

impl From<CheckoutRequest> for CheckoutSelection {
    fn from(request: CheckoutRequest) -> Self {
        CheckoutSelection::from_product_ids(
            request
                .selected_product_ids
                .map(|ids| ids.into_iter().map(ProductId::from_id).collect()),
        )
    }
}

async fn parse_checkout_request(req: &mut Request) -> Result<CheckoutRequest, StatusError> {
    let payload = req.payload().await.or_400("could not read request body")?;

    if payload.iter().all(u8::is_ascii_whitespace) {
        return Ok(CheckoutRequest::default());
    }

    serde_json::from_slice::<Option<CheckoutRequest>>(payload)
        .or_400("invalid checkout request body")
        .map(Option::unwrap_or_default)
}

/// Checkout Handler
///
/// Converts the selected cart entries into an order and removes them from the cart.
#[endpoint(
    tags("orders"),
    summary = "Checkout",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Empty cart or missing profile"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "orders.checkout",
    skip(req, depot),
    fields(
        user_id = tracing::field::Empty,
        selected = tracing::field::Empty,
        order_id = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_id_or_401()?;
    let selection = CheckoutSelection::from(parse_checkout_request(req).await?);

    let span = tracing::Span::current();

    span.record("user_id", user.into_id());

    if let CheckoutSelection::Only(ids) = &selection {
        span.record("selected", ids.len());
    }

    let order = state
        .app
        .orders
        .checkout(user, selection)
        .await
        .map_err(into_status_error)?;

    span.record("order_id", order.id.into_id());

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::orders::{MockOrdersService, OrdersServiceError};

    use crate::{
        orders::responses::fixtures::make_order,
        test_helpers::{TEST_USER_ID, orders_service},
    };

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        orders_service(orders, Router::with_path("orders").post(handler))
    }

    fn expect_only_checkout(orders: &mut MockOrdersService) {
        orders.expect_list_orders().never();
        orders.expect_get_order().never();
    }

    #[tokio::test]
    async fn test_checkout_without_body_converts_whole_cart() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_checkout()
            .once()
            .withf(|user, selection| {
                *user == TEST_USER_ID && *selection == CheckoutSelection::All
            })
            .return_once(|_, _| Ok(make_order(11)));

        expect_only_checkout(&mut orders);

        let mut res = TestClient::post("http://example.com/orders")
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: OrderResponse = res.take_json().await?;

        assert_eq!(body.order_id, 11);
        assert_eq!(body.user_id, TEST_USER_ID.into_id());
        assert_eq!(body.shipping_amount, "0.00");
        assert_eq!(body.city, "Springfield");

        Ok(())
    }

    #[tokio::test]
    async fn test_checkout_with_empty_selection_converts_whole_cart() {
        let mut orders = MockOrdersService::new();

        orders
            .expect_checkout()
            .once()
            .withf(|_, selection| *selection == CheckoutSelection::All)
            .return_once(|_, _| Ok(make_order(12)));

        expect_only_checkout(&mut orders);

        let res = TestClient::post("http://example.com/orders")
            .json(&json!({ "selectedProductIds": [] }))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
    }

    #[tokio::test]
    async fn test_checkout_with_selection_forwards_product_ids() {
        let mut orders = MockOrdersService::new();

        orders
            .expect_checkout()
            .once()
            .withf(|_, selection| {
                *selection
                    == CheckoutSelection::from_product_ids(Some(vec![ProductId::from_id(10)]))
            })
            .return_once(|_, _| Ok(make_order(13)));

        expect_only_checkout(&mut orders);

        let res = TestClient::post("http://example.com/orders")
            .json(&json!({ "selectedProductIds": [10, 10] }))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
    }

    #[tokio::test]
    async fn test_checkout_empty_cart_returns_400() {
        let mut orders = MockOrdersService::new();

        orders
            .expect_checkout()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::EmptyCart));

        expect_only_checkout(&mut orders);

        let res = TestClient::post("http://example.com/orders")
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn test_checkout_missing_profile_returns_400() {
        let mut orders = MockOrdersService::new();

        orders
            .expect_checkout()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::MissingProfile));

        expect_only_checkout(&mut orders);

        let res = TestClient::post("http://example.com/orders")
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn test_checkout_storage_error_returns_500() {
        let mut orders = MockOrdersService::new();

        orders
            .expect_checkout()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::Sql(sqlx::Error::PoolTimedOut)));

        expect_only_checkout(&mut orders);

        let res = TestClient::post("http://example.com/orders")
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[tokio::test]
    async fn test_checkout_malformed_body_returns_400() {
        let mut orders = MockOrdersService::new();

        orders.expect_checkout().never();

        expect_only_checkout(&mut orders);

        let res = TestClient::post("http://example.com/orders")
            .raw_json("{\"selectedProductIds\": \"ten\"}")
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }
}
