//! Users
//!
//! The user directory: resolves bearer tokens to user records.

pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;
pub mod token;

pub use errors::UsersServiceError;
pub use service::*;
