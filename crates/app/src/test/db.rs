//! Per-test PostgreSQL databases inside one shared testcontainer.

use once_cell::sync::Lazy;
use sqlx::{Connection, PgConnection, PgPool, query};
use testcontainers::{ContainerAsync, ImageExt, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres as PostgresImage;
use tokio::sync::{OnceCell, mpsc};

const DB_USER: &str = "storefront_test";
const DB_PASSWORD: &str = "storefront_test_password";

static POSTGRES_CONTAINER: Lazy<OnceCell<ContainerAsync<PostgresImage>>> = Lazy::new(OnceCell::new);

/// Databases queued for dropping once their `TestDb` goes away.
static CLEANUP_SENDER: Lazy<OnceCell<mpsc::UnboundedSender<String>>> = Lazy::new(OnceCell::new);

/// Names are interpolated into `CREATE DATABASE` and `DROP DATABASE`, so only plain identifiers pass.
fn validate_database_name(name: &str) -> Result<(), String> {
    let Some(first) = name.chars().next() else {
        return Err("database name is empty".to_string());
    };

    if name.len() > 63 {
        return Err(format!("database name '{name}' exceeds 63 bytes"));
    }

    if !(first.is_ascii_alphabetic() || first == '_') {
        return Err(format!("database name '{name}' must start with a letter or '_'"));
    }

    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(format!("database name '{name}' contains invalid characters"));
    }

    Ok(())
}

async fn start_container() -> ContainerAsync<PostgresImage> {
    PostgresImage::default()
        .with_user(DB_USER)
        .with_password(DB_PASSWORD)
        .with_db_name("storefront_test")
        .with_env_var("POSTGRES_INITDB_ARGS", "--auth-host=trust")
        .start()
        .await
        .expect("Failed to start PostgreSQL container")
}

/// Connection URL for `database` on the shared container.
async fn database_url(container: &ContainerAsync<PostgresImage>, database: &str) -> String {
    let port = container
        .get_host_port_ipv4(5432)
        .await
        .expect("Failed to get container port");

    let host =
        std::env::var("TESTCONTAINERS_HOST_OVERRIDE").unwrap_or_else(|_| "localhost".to_string());

    format!("postgresql://{DB_USER}:{DB_PASSWORD}@{host}:{port}/{database}")
}

async fn spawn_cleanup_task() -> mpsc::UnboundedSender<String> {
    let (sender, mut receiver) = mpsc::unbounded_channel::<String>();

    tokio::spawn(async move {
        while let Some(name) = receiver.recv().await {
            if let Err(error) = drop_database(&name).await {
                eprintln!("Failed to drop test database '{name}': {error}");
            }
        }
    });

    sender
}

async fn drop_database(name: &str) -> Result<(), sqlx::Error> {
    let Some(container) = POSTGRES_CONTAINER.get() else {
        return Ok(());
    };

    if validate_database_name(name).is_err() {
        return Ok(());
    }

    let mut conn = PgConnection::connect(&database_url(container, "postgres").await).await?;

    query(&format!("DROP DATABASE IF EXISTS \"{name}\""))
        .execute(&mut conn)
        .await?;

    conn.close().await
}

fn unique_database_name() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("System clock is before the Unix epoch")
        .as_nanos();

    let thread = format!("{:?}", std::thread::current().id());
    let thread: String = thread.chars().filter(char::is_ascii_digit).collect();

    format!("storefront_test_{nanos}_{thread}")
}

/// A freshly migrated database owned by a single test.
///
/// Services commit normally; isolation comes from every test getting its own database. The
/// database is dropped in the background when the `TestDb` is dropped.
#[derive(Debug, Clone)]
pub struct TestDb {
    pool: PgPool,
    name: String,
}

impl Drop for TestDb {
    fn drop(&mut self) {
        if let Some(sender) = CLEANUP_SENDER.get() {
            let _ = sender.send(self.name.clone());
        }
    }
}

impl TestDb {
    pub async fn new() -> Self {
        CLEANUP_SENDER.get_or_init(spawn_cleanup_task).await;

        let name = unique_database_name();

        if let Err(error) = validate_database_name(&name) {
            panic!("{error}");
        }

        let container = POSTGRES_CONTAINER.get_or_init(start_container).await;

        let mut admin = PgConnection::connect(&database_url(container, "postgres").await)
            .await
            .expect("Failed to connect to postgres database");

        query(&format!("CREATE DATABASE \"{name}\""))
            .execute(&mut admin)
            .await
            .expect("Failed to create test database");

        admin
            .close()
            .await
            .expect("Failed to close admin connection");

        let pool = PgPool::connect(&database_url(container, &name).await)
            .await
            .expect("Failed to connect to test database");

        sqlx::migrate!("../../migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        Self { pool, name }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_names_are_valid() {
        assert!(validate_database_name(&unique_database_name()).is_ok());
    }

    #[test]
    fn names_must_start_with_letter_or_underscore() {
        assert!(validate_database_name("_scratch").is_ok());
        assert!(validate_database_name("9lives").is_err());
        assert!(validate_database_name("").is_err());
    }

    #[test]
    fn names_reject_quote_breaking_characters() {
        assert!(validate_database_name("orders\"; DROP").is_err());
        assert!(validate_database_name("has-hyphen").is_err());
        assert!(validate_database_name(&"a".repeat(64)).is_err());
    }

    #[tokio::test]
    async fn new_database_has_migrated_schema() {
        let db = TestDb::new().await;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shopping_cart")
            .fetch_one(db.pool())
            .await
            .expect("shopping_cart should exist");

        assert_eq!(count, 0);
    }
}
