//! Get Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::products::records::{ProductId, ProductRecord};

use crate::{extensions::*, money::format_money, products::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub product_id: i64,

    pub name: String,

    /// Unit price as a decimal string, e.g. `"19.99"`
    pub price: String,

    pub category_id: i64,

    pub description: String,

    pub sub_category: String,

    /// Units in stock
    pub stock: i32,

    pub image_url: String,

    /// Whether the product is shown on the storefront's landing page
    pub featured: bool,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        ProductResponse {
            product_id: product.id.into_id(),
            name: product.name,
            price: format_money(product.price),
            category_id: product.category_id,
            description: product.description,
            sub_category: product.sub_category,
            stock: product.stock,
            image_url: product.image_url,
            featured: product.featured,
        }
    }
}

/// Get Product Handler
///
/// Returns a product.
#[endpoint(
    tags("products"),
    summary = "Get Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product found"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "products.get",
    skip(product, depot),
    fields(product_id = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    product: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let product = ProductId::from_id(product.into_inner());

    tracing::Span::current().record("product_id", product.into_id());

    let product = state
        .app
        .products
        .get_product(product)
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}
