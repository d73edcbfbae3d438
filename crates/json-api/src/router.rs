//! App Router

use salvo::Router;

use crate::{auth, carts, orders, products, profile};

/// Every route that requires a bearer token.
pub fn app_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .push(Router::with_path("{product}").get(products::get::handler)),
        )
        .push(
            Router::with_path("cart")
                .get(carts::get::handler)
                .delete(carts::clear::handler)
                .push(
                    Router::with_path("products/{product}")
                        .post(carts::products::add::handler)
                        .put(carts::products::update::handler)
                        .delete(carts::products::remove::handler),
                ),
        )
        .push(
            Router::with_path("profile")
                .get(profile::get::handler)
                .put(profile::update::handler),
        )
        .push(
            Router::with_path("orders")
                .get(orders::index::handler)
                .post(orders::checkout::handler)
                .push(Router::with_path("{order}").get(orders::get::handler)),
        )
}
