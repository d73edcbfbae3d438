//! Profile Records

use crate::domain::users::records::UserId;

/// Profile Record
///
/// Shipping address of a user, copied onto every order at checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRecord {
    pub user_id: UserId,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}
