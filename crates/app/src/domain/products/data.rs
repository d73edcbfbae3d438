//! Products Data

use rust_decimal::Decimal;

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: Decimal,
    pub category_id: i64,
    pub description: String,
    pub sub_category: String,
    pub stock: i32,
    pub image_url: String,
    pub featured: bool,
}
