//! Update Profile Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::profiles::records::ProfileRecord;

use crate::{
    extensions::*,
    profile::{
        ProfileResponse,
        errors::{into_status_error, profile_not_found},
    },
    state::State,
};

/// Update Profile Request
///
/// Any `userId` in the body is ignored; the profile always belongs to the caller.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateProfileRequest {
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

/// Update Profile Handler
///
/// Overwrites the address of an existing profile.
#[endpoint(
    tags("profile"),
    summary = "Update Profile",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Profile updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::NOT_FOUND, description = "No profile for this user"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "profile.update",
    skip(json, depot),
    fields(user_id = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<UpdateProfileRequest>,
    depot: &mut Depot,
) -> Result<Json<ProfileResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_id_or_401()?;
    let request = json.into_inner();

    tracing::Span::current().record("user_id", user.into_id());

    let profile = state
        .app
        .profiles
        .update_profile(ProfileRecord {
            user_id: user,
            address: request.address,
            city: request.city,
            state: request.state,
            zip: request.zip,
        })
        .await
        .map_err(into_status_error)?
        .ok_or_else(profile_not_found)?;

    tracing::info!(user_id = user.into_id(), "updated profile");

    Ok(Json(profile.into()))
}
