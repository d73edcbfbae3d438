//! User Data

/// New User Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: String,
}
