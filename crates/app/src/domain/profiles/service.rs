//! Profiles service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        profiles::{
            errors::ProfilesServiceError, records::ProfileRecord,
            repository::PgProfilesRepository,
        },
        users::records::UserId,
    },
};

#[derive(Debug, Clone)]
pub struct PgProfilesService {
    db: Db,
    repository: PgProfilesRepository,
}

impl PgProfilesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProfilesRepository::new(),
        }
    }
}

#[async_trait]
impl ProfilesService for PgProfilesService {
    async fn get_profile(
        &self,
        user: UserId,
    ) -> Result<Option<ProfileRecord>, ProfilesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let profile = self.repository.get_profile(&mut tx, user).await?;

        tx.commit().await?;

        Ok(profile)
    }

    async fn create_profile(
        &self,
        profile: ProfileRecord,
    ) -> Result<ProfileRecord, ProfilesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let created = self.repository.create_profile(&mut tx, profile).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_profile(
        &self,
        profile: ProfileRecord,
    ) -> Result<Option<ProfileRecord>, ProfilesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let updated = self.repository.update_profile(&mut tx, profile).await?;

        tx.commit().await?;

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait ProfilesService: Send + Sync {
    /// Retrieve the user's profile, if one exists.
    async fn get_profile(
        &self,
        user: UserId,
    ) -> Result<Option<ProfileRecord>, ProfilesServiceError>;

    /// Creates the profile for `profile.user_id`.
    async fn create_profile(
        &self,
        profile: ProfileRecord,
    ) -> Result<ProfileRecord, ProfilesServiceError>;

    /// Overwrite the address fields of an existing profile. `None` when the user has no profile.
    async fn update_profile(
        &self,
        profile: ProfileRecord,
    ) -> Result<Option<ProfileRecord>, ProfilesServiceError>;
}
