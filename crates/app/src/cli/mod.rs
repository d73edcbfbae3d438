use clap::{Parser, Subcommand};
use storefront_app::database::{self, Db};

mod product;
mod user;

#[derive(Debug, Parser)]
#[command(name = "storefront-app", about = "Storefront CLI", long_about = None)]
pub(crate) struct Cli {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true, global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    User(user::UserCommand),
    Product(product::ProductCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        let database_url = self
            .database_url
            .ok_or_else(|| "DATABASE_URL must be set".to_string())?;

        let pool = database::connect(&database_url)
            .await
            .map_err(|error| format!("failed to connect to database: {error}"))?;

        let db = Db::new(pool);

        match self.command {
            Commands::User(command) => user::run(&db, command).await,
            Commands::Product(command) => product::run(&db, command).await,
        }
    }
}
