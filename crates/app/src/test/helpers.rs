//! Test Helpers

use rust_decimal::Decimal;

use crate::domain::{
    products::data::NewProduct, profiles::records::ProfileRecord, users::records::UserId,
};

pub(crate) fn new_product(name: &str, price: Decimal) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        price,
        category_id: 1,
        description: format!("{name} description"),
        sub_category: "general".to_string(),
        stock: 10,
        image_url: format!("{}.jpg", name.to_lowercase()),
        featured: false,
    }
}

pub(crate) fn new_profile(user: UserId, address: &str) -> ProfileRecord {
    ProfileRecord {
        user_id: user,
        address: address.to_string(),
        city: "Springfield".to_string(),
        state: "IL".to_string(),
        zip: "62701".to_string(),
    }
}
