//! Get Profile Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    profile::{
        ProfileResponse,
        errors::{into_status_error, profile_not_found},
    },
    state::State,
};

/// Get Profile Handler
#[endpoint(
    tags("profile"),
    summary = "Get Profile",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Profile found"),
        (status_code = StatusCode::NOT_FOUND, description = "No profile for this user"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "profile.get",
    skip(depot),
    fields(user_id = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ProfileResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_id_or_401()?;

    tracing::Span::current().record("user_id", user.into_id());

    let profile = state
        .app
        .profiles
        .get_profile(user)
        .await
        .map_err(into_status_error)?
        .ok_or_else(profile_not_found)?;

    Ok(Json(profile.into()))
}
