//! Profile
//!
//! The authenticated user's shipping address.

mod errors;
pub(crate) mod get;
pub(crate) mod update;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use storefront_app::domain::profiles::records::ProfileRecord;

/// Profile Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProfileResponse {
    pub user_id: i64,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

impl From<ProfileRecord> for ProfileResponse {
    fn from(profile: ProfileRecord) -> Self {
        Self {
            user_id: profile.user_id.into_id(),
            address: profile.address,
            city: profile.city,
            state: profile.state,
            zip: profile.zip,
        }
    }
}
