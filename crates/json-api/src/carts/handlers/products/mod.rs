//! Cart Product Handlers
//!
//! Mutations of a single product's entry in the authenticated user's cart.

pub(crate) mod add;
pub(crate) mod remove;
pub(crate) mod update;
