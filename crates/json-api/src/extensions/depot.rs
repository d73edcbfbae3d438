//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use storefront_app::domain::users::records::UserId;

const USER_ID_DEPOT_KEY: &str = "user_id";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// Record the authenticated user for the rest of the request.
    fn insert_user_id(&mut self, user: UserId);

    /// The authenticated user, or 401 when the auth middleware did not run.
    fn user_id_or_401(&self) -> Result<UserId, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_user_id(&mut self, user: UserId) {
        self.insert(USER_ID_DEPOT_KEY, user.into_id());
    }

    fn user_id_or_401(&self) -> Result<UserId, StatusError> {
        self.get::<i64>(USER_ID_DEPOT_KEY)
            .map(|id| UserId::from_id(*id))
            .map_err(|_ignored| StatusError::unauthorized())
    }
}
