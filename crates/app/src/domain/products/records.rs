//! Product Records

use rust_decimal::Decimal;

use crate::ids::TypedId;

/// Product Id
pub type ProductId = TypedId<ProductRecord>;

/// Product Record
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub category_id: i64,
    pub description: String,
    pub sub_category: String,
    pub stock: i32,
    pub image_url: String,
    pub featured: bool,
}
