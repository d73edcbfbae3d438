//! Shopping Cart Repository

use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    carts::records::CartItemRecord,
    products::{records::ProductId, repository::product_from_row},
    users::records::UserId,
};

const GET_CART_ITEMS_SQL: &str = include_str!("sql/get_cart_items.sql");
const LOCK_CART_ITEMS_SQL: &str = include_str!("sql/lock_cart_items.sql");
const ADD_PRODUCT_SQL: &str = include_str!("sql/add_product.sql");
const UPDATE_QUANTITY_SQL: &str = include_str!("sql/update_quantity.sql");
const REMOVE_PRODUCT_SQL: &str = include_str!("sql/remove_product.sql");
const CLEAR_CART_SQL: &str = include_str!("sql/clear_cart.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartsRepository;

impl PgCartsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_cart_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserId,
    ) -> Result<Vec<CartItemRecord>, sqlx::Error> {
        query_as::<Postgres, CartItemRecord>(GET_CART_ITEMS_SQL)
            .bind(user.into_id())
            .fetch_all(&mut **tx)
            .await
    }

    /// Read the cart and hold row locks on it until the transaction ends.
    pub(crate) async fn lock_cart_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserId,
    ) -> Result<Vec<CartItemRecord>, sqlx::Error> {
        query_as::<Postgres, CartItemRecord>(LOCK_CART_ITEMS_SQL)
            .bind(user.into_id())
            .fetch_all(&mut **tx)
            .await
    }

    /// Insert the product, or add `quantity` to the existing row.
    pub(crate) async fn add_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserId,
        product: ProductId,
        quantity: i32,
    ) -> Result<(), sqlx::Error> {
        query(ADD_PRODUCT_SQL)
            .bind(user.into_id())
            .bind(product.into_id())
            .bind(quantity)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn update_quantity(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserId,
        product: ProductId,
        quantity: i32,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_QUANTITY_SQL)
            .bind(user.into_id())
            .bind(product.into_id())
            .bind(quantity)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn remove_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserId,
        product: ProductId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(REMOVE_PRODUCT_SQL)
            .bind(user.into_id())
            .bind(product.into_id())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn clear_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CLEAR_CART_SQL)
            .bind(user.into_id())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for CartItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            product: product_from_row(row)?,
            quantity: row.try_get("quantity")?,
            // not persisted
            discount_percent: Decimal::ZERO,
        })
    }
}
