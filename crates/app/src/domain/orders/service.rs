//! Orders service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        carts::{records::CartRecord, repository::PgCartsRepository},
        orders::{
            checkout::{CheckoutSelection, new_line_item, new_order},
            errors::OrdersServiceError,
            records::{OrderDetails, OrderId, OrderRecord},
            repositories::{PgOrderLineItemsRepository, PgOrdersRepository},
        },
        profiles::repository::PgProfilesRepository,
        users::records::UserId,
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    orders_repository: PgOrdersRepository,
    line_items_repository: PgOrderLineItemsRepository,
    carts_repository: PgCartsRepository,
    profiles_repository: PgProfilesRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            orders_repository: PgOrdersRepository::new(),
            line_items_repository: PgOrderLineItemsRepository::new(),
            carts_repository: PgCartsRepository::new(),
            profiles_repository: PgProfilesRepository::new(),
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn checkout(
        &self,
        user: UserId,
        selection: CheckoutSelection,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let items = self.carts_repository.lock_cart_items(&mut tx, user).await?;
        let cart = CartRecord::from_items(user, items);

        if cart.is_empty() {
            return Err(OrdersServiceError::EmptyCart);
        }

        let profile = self
            .profiles_repository
            .get_profile(&mut tx, user)
            .await?
            .ok_or(OrdersServiceError::MissingProfile)?;

        // A selection matching no entry still places an order, with no line items.
        let selected = selection.select(&cart);

        let order = self
            .orders_repository
            .create_order(&mut tx, new_order(&profile, Timestamp::now()))
            .await?;

        for item in &selected {
            self.line_items_repository
                .create_line_item(&mut tx, new_line_item(order.id, item))
                .await?;

            self.carts_repository
                .remove_product(&mut tx, user, item.product.id)
                .await?;
        }

        tx.commit().await?;

        info!(
            order_id = %order.id,
            user_id = %user,
            line_items = selected.len(),
            "checkout completed"
        );

        Ok(order)
    }

    async fn list_orders(&self, user: UserId) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let orders = self.orders_repository.list_orders(&mut tx, user).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn get_order(
        &self,
        user: UserId,
        order: OrderId,
    ) -> Result<OrderDetails, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let Some(order) = self
            .orders_repository
            .get_order(&mut tx, user, order)
            .await?
        else {
            return Err(OrdersServiceError::NotFound);
        };

        let line_items = self
            .line_items_repository
            .list_line_items(&mut tx, order.id)
            .await?;

        tx.commit().await?;

        Ok(OrderDetails { order, line_items })
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Convert the selected cart entries into an order, removing them from the cart.
    ///
    /// Runs in a single transaction holding row locks on the cart, so either the order, all
    /// of its line items and the cart removals are committed together or nothing is.
    async fn checkout(
        &self,
        user: UserId,
        selection: CheckoutSelection,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// The user's orders, newest first.
    async fn list_orders(&self, user: UserId) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Retrieve one of the user's orders with its line items.
    async fn get_order(
        &self,
        user: UserId,
        order: OrderId,
    ) -> Result<OrderDetails, OrdersServiceError>;
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{
        domain::{carts::CartsService, products::records::ProductId},
        test::TestContext,
    };

    use super::*;

    struct Fixture {
        ctx: TestContext,
        user: UserId,
        first: ProductId,
        second: ProductId,
    }

    /// A user with a profile at "1 Main St" and a cart of `{first: 2, second: 1}`.
    async fn fixture() -> Fixture {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("alice").await;
        let first = ctx.create_product("Kettle", Decimal::new(2_500, 2)).await;
        let second = ctx.create_product("Teapot", Decimal::new(1_800, 2)).await;

        ctx.create_profile(user, "1 Main St").await;
        ctx.add_to_cart(user, first, 2).await;
        ctx.add_to_cart(user, second, 1).await;

        Fixture {
            ctx,
            user,
            first,
            second,
        }
    }

    fn lines(details: &OrderDetails) -> Vec<(ProductId, i32)> {
        details
            .line_items
            .iter()
            .map(|line| (line.product_id, line.quantity))
            .collect()
    }

    #[tokio::test]
    async fn checkout_converts_whole_cart() -> TestResult {
        let Fixture {
            ctx,
            user,
            first,
            second,
        } = fixture().await;

        let order = ctx.orders.checkout(user, CheckoutSelection::All).await?;

        assert_eq!(order.user_id, user);
        assert_eq!(order.address, "1 Main St");
        assert_eq!(order.shipping_amount, Decimal::ZERO);

        let details = ctx.orders.get_order(user, order.id).await?;

        assert_eq!(lines(&details), vec![(first, 2), (second, 1)]);
        assert!(ctx.carts.get_cart(user).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn checkout_with_selection_leaves_unselected_entries() -> TestResult {
        let Fixture {
            ctx,
            user,
            first,
            second,
        } = fixture().await;

        let selection = CheckoutSelection::from_product_ids(Some(vec![first]));
        let order = ctx.orders.checkout(user, selection).await?;

        let details = ctx.orders.get_order(user, order.id).await?;
        let cart = ctx.carts.get_cart(user).await?;

        assert_eq!(lines(&details), vec![(first, 2)]);
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items.get(&second).map(|item| item.quantity), Some(1));
        assert_eq!(
            cart.items.get(&second).map(|item| item.discount_percent),
            Some(Decimal::ZERO)
        );

        Ok(())
    }

    #[tokio::test]
    async fn checkout_empty_cart_returns_empty_cart() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("bob").await;

        ctx.create_profile(user, "7 Side St").await;

        let result = ctx.orders.checkout(user, CheckoutSelection::All).await;

        assert!(
            matches!(result, Err(OrdersServiceError::EmptyCart)),
            "expected EmptyCart, got {result:?}"
        );
        assert!(ctx.orders.list_orders(user).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn checkout_empty_cart_without_profile_reports_empty_cart_first() {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("bob").await;

        let result = ctx.orders.checkout(user, CheckoutSelection::All).await;

        assert!(
            matches!(result, Err(OrdersServiceError::EmptyCart)),
            "expected EmptyCart, got {result:?}"
        );
    }

    #[tokio::test]
    async fn checkout_without_profile_returns_missing_profile() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("carol").await;
        let product = ctx.create_product("Kettle", Decimal::TEN).await;

        ctx.add_to_cart(user, product, 1).await;

        let result = ctx.orders.checkout(user, CheckoutSelection::All).await;

        assert!(
            matches!(result, Err(OrdersServiceError::MissingProfile)),
            "expected MissingProfile, got {result:?}"
        );
        assert!(ctx.orders.list_orders(user).await?.is_empty());
        assert_eq!(ctx.carts.get_cart(user).await?.items.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn checkout_selection_matching_nothing_creates_order_without_line_items() -> TestResult {
        let Fixture { ctx, user, .. } = fixture().await;

        let selection = CheckoutSelection::from_product_ids(Some(vec![ProductId::from_id(999)]));
        let order = ctx.orders.checkout(user, selection).await?;

        let details = ctx.orders.get_order(user, order.id).await?;

        assert_eq!(details.order, order);
        assert!(details.line_items.is_empty());
        assert_eq!(ctx.orders.list_orders(user).await?.len(), 1);
        assert_eq!(ctx.carts.get_cart(user).await?.items.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn line_items_keep_price_at_checkout() -> TestResult {
        let Fixture {
            ctx, user, first, ..
        } = fixture().await;

        let order = ctx.orders.checkout(user, CheckoutSelection::All).await?;

        ctx.set_product_price(first, Decimal::new(9_900, 2)).await;

        let details = ctx.orders.get_order(user, order.id).await?;
        let line = details
            .line_items
            .iter()
            .find(|line| line.product_id == first);

        assert_eq!(line.map(|line| line.sales_price), Some(Decimal::new(2_500, 2)));
        assert_eq!(line.map(|line| line.discount), Some(Decimal::ZERO));

        Ok(())
    }

    #[tokio::test]
    async fn second_checkout_after_full_checkout_sees_empty_cart() -> TestResult {
        let Fixture { ctx, user, .. } = fixture().await;

        ctx.orders.checkout(user, CheckoutSelection::All).await?;

        let result = ctx.orders.checkout(user, CheckoutSelection::All).await;

        assert!(
            matches!(result, Err(OrdersServiceError::EmptyCart)),
            "expected EmptyCart, got {result:?}"
        );
        assert_eq!(ctx.orders.list_orders(user).await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_checkouts_create_one_order() -> TestResult {
        let Fixture { ctx, user, .. } = fixture().await;

        let (a, b) = tokio::join!(
            ctx.orders.checkout(user, CheckoutSelection::All),
            ctx.orders.checkout(user, CheckoutSelection::All),
        );

        let succeeded = [a.is_ok(), b.is_ok()].into_iter().filter(|ok| *ok).count();

        assert_eq!(succeeded, 1);
        assert_eq!(ctx.orders.list_orders(user).await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn get_order_of_another_user_returns_not_found() -> TestResult {
        let Fixture { ctx, user, .. } = fixture().await;
        let other = ctx.create_user("mallory").await;

        let order = ctx.orders.checkout(user, CheckoutSelection::All).await?;

        let result = ctx.orders.get_order(other, order.id).await;

        assert!(
            matches!(result, Err(OrdersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn list_orders_returns_newest_first() -> TestResult {
        let Fixture {
            ctx,
            user,
            first,
            second,
        } = fixture().await;

        let older = ctx
            .orders
            .checkout(user, CheckoutSelection::from_product_ids(Some(vec![first])))
            .await?;
        let newer = ctx
            .orders
            .checkout(user, CheckoutSelection::from_product_ids(Some(vec![second])))
            .await?;

        let ids: Vec<OrderId> = ctx
            .orders
            .list_orders(user)
            .await?
            .into_iter()
            .map(|order| order.id)
            .collect();

        assert_eq!(ids, vec![newer.id, older.id]);

        Ok(())
    }
}
