//! Orders

pub(crate) mod checkout;
mod errors;
pub(crate) mod get;
pub(crate) mod index;
mod responses;
