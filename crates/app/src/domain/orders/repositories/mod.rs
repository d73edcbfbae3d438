//! Order Repositories

mod line_items;
mod orders;

pub(crate) use line_items::PgOrderLineItemsRepository;
pub(crate) use orders::PgOrdersRepository;
