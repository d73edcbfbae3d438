//! Profile Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::profiles::ProfilesServiceError;

pub(crate) fn profile_not_found() -> StatusError {
    StatusError::not_found().brief("Profile not found")
}

pub(crate) fn into_status_error(error: ProfilesServiceError) -> StatusError {
    match error {
        ProfilesServiceError::MissingRequiredData | ProfilesServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid profile payload")
        }
        ProfilesServiceError::InvalidReference => profile_not_found(),
        ProfilesServiceError::Sql(source) => {
            error!("failed to access profile: {source}");

            StatusError::internal_server_error()
        }
        ProfilesServiceError::AlreadyExists => {
            error!("unexpected duplicate profile");

            StatusError::internal_server_error()
        }
    }
}
