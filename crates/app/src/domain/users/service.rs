//! Users service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::users::{
        data::NewUser,
        errors::UsersServiceError,
        records::{UserId, UserRecord},
        repository::PgUsersRepository,
        token::hash_token,
    },
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    db: Db,
    repository: PgUsersRepository,
}

impl PgUsersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgUsersRepository::new(),
        }
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn authenticate_bearer(&self, token: &str) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let user = self
            .repository
            .find_user_by_token_hash(&mut tx, &hash_token(token))
            .await?;

        tx.commit().await?;

        user.ok_or(UsersServiceError::NotFound)
    }

    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError> {
        if user.username.trim().is_empty() {
            return Err(UsersServiceError::InvalidData);
        }

        let mut tx = self.db.begin_transaction().await?;

        let created = self.repository.create_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn issue_token(&self, user: UserId, token: &str) -> Result<(), UsersServiceError> {
        if token.trim().is_empty() {
            return Err(UsersServiceError::InvalidData);
        }

        let mut tx = self.db.begin_transaction().await?;

        self.repository
            .create_api_token(&mut tx, user, &hash_token(token))
            .await?;

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Resolve a raw bearer token to the user it was issued to.
    async fn authenticate_bearer(&self, token: &str) -> Result<UserRecord, UsersServiceError>;

    /// Creates a new user.
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError>;

    /// Store the hash of `token` as an API token for `user`.
    async fn issue_token(&self, user: UserId, token: &str) -> Result<(), UsersServiceError>;
}
