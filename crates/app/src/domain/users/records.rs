//! User Records

use jiff::Timestamp;

use crate::ids::TypedId;

/// User Id
pub type UserId = TypedId<UserRecord>;

/// User Record
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub id: UserId,
    pub username: String,
    pub created_at: Timestamp,
}
