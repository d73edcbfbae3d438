//! Product Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::products::ProductsServiceError;

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        ProductsServiceError::Sql(source) => {
            error!("failed to read products: {source}");

            StatusError::internal_server_error()
        }
        error @ (ProductsServiceError::AlreadyExists
        | ProductsServiceError::MissingRequiredData
        | ProductsServiceError::InvalidData) => {
            error!("unexpected products error: {error}");

            StatusError::internal_server_error()
        }
    }
}
