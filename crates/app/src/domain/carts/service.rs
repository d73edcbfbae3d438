//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};

use crate::{
    database::Db,
    domain::{
        carts::{errors::CartsServiceError, records::CartRecord, repository::PgCartsRepository},
        products::records::ProductId,
        users::records::UserId,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    repository: PgCartsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCartsRepository::new(),
        }
    }

    async fn read_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserId,
    ) -> Result<CartRecord, CartsServiceError> {
        let items = self.repository.get_cart_items(tx, user).await?;

        Ok(CartRecord::from_items(user, items))
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_cart(&self, user: UserId) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let cart = self.read_cart(&mut tx, user).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn add_product(
        &self,
        user: UserId,
        product: ProductId,
    ) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        self.repository
            .add_product(&mut tx, user, product, 1)
            .await?;

        let cart = self.read_cart(&mut tx, user).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn update_quantity(
        &self,
        user: UserId,
        product: ProductId,
        quantity: i32,
    ) -> Result<CartRecord, CartsServiceError> {
        if quantity < 1 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self
            .repository
            .update_quantity(&mut tx, user, product, quantity)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        let cart = self.read_cart(&mut tx, user).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn remove_product(
        &self,
        user: UserId,
        product: ProductId,
    ) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self
            .repository
            .remove_product(&mut tx, user, product)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        let cart = self.read_cart(&mut tx, user).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn clear_cart(&self, user: UserId) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        self.repository.clear_cart(&mut tx, user).await?;

        let cart = self.read_cart(&mut tx, user).await?;

        tx.commit().await?;

        Ok(cart)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve the user's cart. A user without cart rows has an empty cart.
    async fn get_cart(&self, user: UserId) -> Result<CartRecord, CartsServiceError>;

    /// Add one of `product` to the cart, inserting it when absent.
    async fn add_product(
        &self,
        user: UserId,
        product: ProductId,
    ) -> Result<CartRecord, CartsServiceError>;

    /// Set the absolute quantity of a product already in the cart.
    async fn update_quantity(
        &self,
        user: UserId,
        product: ProductId,
        quantity: i32,
    ) -> Result<CartRecord, CartsServiceError>;

    /// Remove a single product from the cart.
    async fn remove_product(
        &self,
        user: UserId,
        product: ProductId,
    ) -> Result<CartRecord, CartsServiceError>;

    /// Remove every product from the cart.
    async fn clear_cart(&self, user: UserId) -> Result<CartRecord, CartsServiceError>;
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    fn quantities(cart: &CartRecord) -> Vec<(i64, i32)> {
        cart.items
            .iter()
            .map(|(id, item)| (id.into_id(), item.quantity))
            .collect()
    }

    #[tokio::test]
    async fn get_cart_without_rows_is_empty() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("alice").await;

        let cart = ctx.carts.get_cart(user).await?;

        assert_eq!(cart.user_id, user);
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Decimal::ZERO);

        Ok(())
    }

    #[tokio::test]
    async fn add_product_inserts_with_quantity_one() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("alice").await;
        let product = ctx.create_product("Mug", Decimal::new(1_200, 2)).await;

        let cart = ctx.carts.add_product(user, product).await?;

        assert_eq!(quantities(&cart), vec![(product.into_id(), 1)]);
        assert_eq!(cart.total(), Decimal::new(1_200, 2));

        Ok(())
    }

    #[tokio::test]
    async fn add_product_twice_increments_quantity() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("alice").await;
        let product = ctx.create_product("Mug", Decimal::new(1_200, 2)).await;

        ctx.carts.add_product(user, product).await?;
        let cart = ctx.carts.add_product(user, product).await?;

        assert_eq!(quantities(&cart), vec![(product.into_id(), 2)]);
        assert_eq!(cart.total(), Decimal::new(2_400, 2));

        Ok(())
    }

    #[tokio::test]
    async fn add_unknown_product_returns_invalid_reference() {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("alice").await;

        let result = ctx
            .carts
            .add_product(user, ProductId::from_id(999_999))
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );
    }

    #[tokio::test]
    async fn update_quantity_sets_absolute_value() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("alice").await;
        let product = ctx.create_product("Mug", Decimal::ONE).await;

        ctx.carts.add_product(user, product).await?;
        let cart = ctx.carts.update_quantity(user, product, 7).await?;

        assert_eq!(quantities(&cart), vec![(product.into_id(), 7)]);

        Ok(())
    }

    #[tokio::test]
    async fn update_quantity_below_one_returns_invalid_quantity() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("alice").await;
        let product = ctx.create_product("Mug", Decimal::ONE).await;

        ctx.carts.add_product(user, product).await?;
        let result = ctx.carts.update_quantity(user, product, 0).await;

        assert!(
            matches!(result, Err(CartsServiceError::InvalidQuantity)),
            "expected InvalidQuantity, got {result:?}"
        );

        let cart = ctx.carts.get_cart(user).await?;

        assert_eq!(quantities(&cart), vec![(product.into_id(), 1)]);

        Ok(())
    }

    #[tokio::test]
    async fn update_quantity_for_product_not_in_cart_returns_not_found() {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("alice").await;
        let product = ctx.create_product("Mug", Decimal::ONE).await;

        let result = ctx.carts.update_quantity(user, product, 3).await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn remove_product_leaves_other_products() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("alice").await;
        let mug = ctx.create_product("Mug", Decimal::ONE).await;
        let pen = ctx.create_product("Pen", Decimal::ONE).await;

        ctx.add_to_cart(user, mug, 2).await;
        ctx.add_to_cart(user, pen, 1).await;

        let cart = ctx.carts.remove_product(user, mug).await?;

        assert_eq!(quantities(&cart), vec![(pen.into_id(), 1)]);

        Ok(())
    }

    #[tokio::test]
    async fn remove_product_not_in_cart_returns_not_found() {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("alice").await;
        let product = ctx.create_product("Mug", Decimal::ONE).await;

        let result = ctx.carts.remove_product(user, product).await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn clear_cart_only_affects_owner() -> TestResult {
        let ctx = TestContext::new().await;
        let alice = ctx.create_user("alice").await;
        let bob = ctx.create_user("bob").await;
        let product = ctx.create_product("Mug", Decimal::ONE).await;

        ctx.add_to_cart(alice, product, 2).await;
        ctx.add_to_cart(bob, product, 3).await;

        let cleared = ctx.carts.clear_cart(alice).await?;
        let untouched = ctx.carts.get_cart(bob).await?;

        assert!(cleared.is_empty());
        assert_eq!(quantities(&untouched), vec![(product.into_id(), 3)]);

        Ok(())
    }

    #[tokio::test]
    async fn repeated_reads_return_identical_carts() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("alice").await;
        let b = ctx.create_product("B", Decimal::new(250, 2)).await;
        let a = ctx.create_product("A", Decimal::new(100, 2)).await;

        ctx.add_to_cart(user, a, 1).await;
        ctx.add_to_cart(user, b, 4).await;

        let first = ctx.carts.get_cart(user).await?;
        let second = ctx.carts.get_cart(user).await?;

        assert_eq!(first, second);
        assert_eq!(first.total(), Decimal::new(1_100, 2));

        Ok(())
    }
}
