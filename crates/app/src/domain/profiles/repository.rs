//! Profiles Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{profiles::records::ProfileRecord, users::records::UserId};

const GET_PROFILE_SQL: &str = include_str!("sql/get_profile.sql");
const CREATE_PROFILE_SQL: &str = include_str!("sql/create_profile.sql");
const UPDATE_PROFILE_SQL: &str = include_str!("sql/update_profile.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProfilesRepository;

impl PgProfilesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_profile(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserId,
    ) -> Result<Option<ProfileRecord>, sqlx::Error> {
        query_as::<Postgres, ProfileRecord>(GET_PROFILE_SQL)
            .bind(user.into_id())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_profile(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        profile: ProfileRecord,
    ) -> Result<ProfileRecord, sqlx::Error> {
        query_as::<Postgres, ProfileRecord>(CREATE_PROFILE_SQL)
            .bind(profile.user_id.into_id())
            .bind(profile.address)
            .bind(profile.city)
            .bind(profile.state)
            .bind(profile.zip)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_profile(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        profile: ProfileRecord,
    ) -> Result<Option<ProfileRecord>, sqlx::Error> {
        query_as::<Postgres, ProfileRecord>(UPDATE_PROFILE_SQL)
            .bind(profile.user_id.into_id())
            .bind(profile.address)
            .bind(profile.city)
            .bind(profile.state)
            .bind(profile.zip)
            .fetch_optional(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for ProfileRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            user_id: UserId::from_id(row.try_get("user_id")?),
            address: row.try_get("address")?,
            city: row.try_get("city")?,
            state: row.try_get("state")?,
            zip: row.try_get("zip")?,
        })
    }
}
