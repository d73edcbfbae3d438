use clap::Args;
use rust_decimal::Decimal;
use storefront_app::{
    database::Db,
    domain::products::{PgProductsService, ProductsService, data::NewProduct},
};

#[derive(Debug, Args)]
pub(crate) struct CreateProductArgs {
    #[arg(long)]
    name: String,

    /// Unit price, e.g. `19.99`
    #[arg(long)]
    price: Decimal,

    #[arg(long, default_value_t = 1)]
    category_id: i64,

    #[arg(long, default_value = "")]
    description: String,

    #[arg(long, default_value = "")]
    sub_category: String,

    #[arg(long, default_value_t = 0)]
    stock: i32,

    #[arg(long, default_value = "")]
    image_url: String,

    #[arg(long)]
    featured: bool,
}

impl From<CreateProductArgs> for NewProduct {
    fn from(args: CreateProductArgs) -> Self {
        Self {
            name: args.name,
            price: args.price,
            category_id: args.category_id,
            description: args.description,
            sub_category: args.sub_category,
            stock: args.stock,
            image_url: args.image_url,
            featured: args.featured,
        }
    }
}

pub(crate) async fn run(db: &Db, args: CreateProductArgs) -> Result<(), String> {
    let product = PgProductsService::new(db.clone())
        .create_product(args.into())
        .await
        .map_err(|error| format!("failed to create product: {error}"))?;

    println!("product_id: {}", product.id);
    println!("name: {}", product.name);
    println!("price: {}", product.price);

    Ok(())
}
