//! Test helpers.

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};

use storefront_app::{
    context::AppContext,
    domain::{
        carts::{
            MockCartsService,
            records::{CartItemRecord, CartRecord},
        },
        orders::MockOrdersService,
        products::{
            MockProductsService,
            records::{ProductId, ProductRecord},
        },
        profiles::MockProfilesService,
        users::{MockUsersService, records::UserId},
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_ID: UserId = UserId::from_id(1);

#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_user_id(TEST_USER_ID);
    ctrl.call_next(req, depot, res).await;
}

pub(crate) fn make_product(id: i64, price: Decimal) -> ProductRecord {
    ProductRecord {
        id: ProductId::from_id(id),
        name: format!("Product {id}"),
        price,
        category_id: 1,
        description: String::new(),
        sub_category: String::new(),
        stock: 10,
        image_url: String::new(),
        featured: false,
    }
}

/// A cart for [`TEST_USER_ID`] from `(product id, price, quantity)` triples.
pub(crate) fn make_cart(items: &[(i64, Decimal, i32)]) -> CartRecord {
    CartRecord::from_items(
        TEST_USER_ID,
        items.iter().map(|&(id, price, quantity)| CartItemRecord {
            product: make_product(id, price),
            quantity,
            discount_percent: Decimal::ZERO,
        }),
    )
}

/// Mocks for every service; any call not set up by the test fails it.
#[derive(Default)]
struct Mocks {
    users: Option<MockUsersService>,
    products: Option<MockProductsService>,
    carts: Option<MockCartsService>,
    profiles: Option<MockProfilesService>,
    orders: Option<MockOrdersService>,
}

impl Mocks {
    fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            users: Arc::new(self.users.unwrap_or_else(strict_users_mock)),
            products: Arc::new(self.products.unwrap_or_else(strict_products_mock)),
            carts: Arc::new(self.carts.unwrap_or_else(strict_carts_mock)),
            profiles: Arc::new(self.profiles.unwrap_or_else(strict_profiles_mock)),
            orders: Arc::new(self.orders.unwrap_or_else(strict_orders_mock)),
        })
    }
}

fn strict_users_mock() -> MockUsersService {
    let mut users = MockUsersService::new();

    users.expect_authenticate_bearer().never();
    users.expect_create_user().never();
    users.expect_issue_token().never();

    users
}

fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_get_product().never();
    products.expect_create_product().never();

    products
}

fn strict_carts_mock() -> MockCartsService {
    let mut carts = MockCartsService::new();

    carts.expect_get_cart().never();
    carts.expect_add_product().never();
    carts.expect_update_quantity().never();
    carts.expect_remove_product().never();
    carts.expect_clear_cart().never();

    carts
}

fn strict_profiles_mock() -> MockProfilesService {
    let mut profiles = MockProfilesService::new();

    profiles.expect_get_profile().never();
    profiles.expect_create_profile().never();
    profiles.expect_update_profile().never();

    profiles
}

fn strict_orders_mock() -> MockOrdersService {
    let mut orders = MockOrdersService::new();

    orders.expect_checkout().never();
    orders.expect_list_orders().never();
    orders.expect_get_order().never();

    orders
}

pub(crate) fn state_with_users(users: MockUsersService) -> Arc<State> {
    Mocks {
        users: Some(users),
        ..Mocks::default()
    }
    .into_state()
}

fn authenticated_service(state: Arc<State>, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(inject_user)
            .push(route),
    )
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    let state = Mocks {
        products: Some(products),
        ..Mocks::default()
    }
    .into_state();

    authenticated_service(state, route)
}

pub(crate) fn carts_service(carts: MockCartsService, route: Router) -> Service {
    let state = Mocks {
        carts: Some(carts),
        ..Mocks::default()
    }
    .into_state();

    authenticated_service(state, route)
}

pub(crate) fn profiles_service(profiles: MockProfilesService, route: Router) -> Service {
    let state = Mocks {
        profiles: Some(profiles),
        ..Mocks::default()
    }
    .into_state();

    authenticated_service(state, route)
}

pub(crate) fn orders_service(orders: MockOrdersService, route: Router) -> Service {
    let state = Mocks {
        orders: Some(orders),
        ..Mocks::default()
    }
    .into_state();

    authenticated_service(state, route)
}
