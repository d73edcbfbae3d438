//! Order Line Items Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    orders::{
        data::NewOrderLineItem,
        records::{OrderId, OrderLineItemId, OrderLineItemRecord},
    },
    products::records::ProductId,
};

const CREATE_LINE_ITEM_SQL: &str = include_str!("../sql/create_line_item.sql");
const LIST_LINE_ITEMS_SQL: &str = include_str!("../sql/list_line_items.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrderLineItemsRepository;

impl PgOrderLineItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_line_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: NewOrderLineItem,
    ) -> Result<OrderLineItemRecord, sqlx::Error> {
        query_as::<Postgres, OrderLineItemRecord>(CREATE_LINE_ITEM_SQL)
            .bind(item.order_id.into_id())
            .bind(item.product_id.into_id())
            .bind(item.sales_price)
            .bind(item.quantity)
            .bind(item.discount)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_line_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderId,
    ) -> Result<Vec<OrderLineItemRecord>, sqlx::Error> {
        query_as::<Postgres, OrderLineItemRecord>(LIST_LINE_ITEMS_SQL)
            .bind(order.into_id())
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for OrderLineItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: OrderLineItemId::from_id(row.try_get("order_line_item_id")?),
            order_id: OrderId::from_id(row.try_get("order_id")?),
            product_id: ProductId::from_id(row.try_get("product_id")?),
            sales_price: row.try_get("sales_price")?,
            quantity: row.try_get("quantity")?,
            discount: row.try_get("discount")?,
        })
    }
}
