//! PostgreSQL-backed profile repository using Diesel ORM.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::PageWindow;
use uuid::Uuid;

use crate::domain::ports::{ProfileCriteria, Repository, RepositoryError};
use crate::domain::{AccountType, Profile, StudentLink};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewProfileRow, ProfileRow, ProfileUpdate};
use super::pool::DbPool;
use super::schema::{profiles, students};

/// Diesel-backed implementation of the profile repository port.
#[derive(Clone)]
pub struct DieselProfileRepository {
    pool: DbPool,
}

impl DieselProfileRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Convert a database row into a domain profile, resolving the owned
/// student link.
async fn hydrate_profile<C>(conn: &mut C, row: ProfileRow) -> Result<Profile, RepositoryError>
where
    C: diesel_async::AsyncConnection<Backend = diesel::pg::Pg> + Send,
{
    let student = students::table
        .filter(students::profile_id.eq(row.id))
        .select(students::id)
        .first::<Uuid>(conn)
        .await
        .optional()
        .map_err(map_diesel_error)?
        .map(|id| StudentLink { id });

    let account_type = row
        .account_type
        .parse::<AccountType>()
        .map_err(|error| RepositoryError::query(error.to_string()))?;

    Ok(Profile {
        id: row.id,
        name: row.name,
        email: row.email,
        password_digest: row.password_digest,
        account_type,
        student,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

#[async_trait]
impl Repository for DieselProfileRepository {
    type Entity = Profile;
    type Criteria = ProfileCriteria;

    async fn create(&self, data: Profile) -> Result<Profile, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewProfileRow {
            id: data.id,
            name: &data.name,
            email: &data.email,
            password_digest: &data.password_digest,
            account_type: data.account_type.as_str(),
            created_at: data.created_at,
            updated_at: data.updated_at,
        };
        diesel::insert_into(profiles::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let row = profiles::table
            .find(data.id)
            .select(ProfileRow::as_select())
            .first(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        hydrate_profile(&mut conn, row).await
    }

    async fn find(&self, criteria: ProfileCriteria) -> Result<Option<Profile>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = match criteria {
            ProfileCriteria::Id(id) => profiles::table
                .find(id)
                .select(ProfileRow::as_select())
                .first(&mut conn)
                .await
                .optional(),
            ProfileCriteria::Email(email) => profiles::table
                .filter(profiles::email.eq(email))
                .select(ProfileRow::as_select())
                .first(&mut conn)
                .await
                .optional(),
        }
        .map_err(map_diesel_error)?;

        match row {
            Some(row) => Ok(Some(hydrate_profile(&mut conn, row).await?)),
            None => Ok(None),
        }
    }

    async fn list(&self, window: PageWindow) -> Result<Vec<Profile>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = profiles::table
            .order((profiles::created_at.asc(), profiles::id.asc()))
            .offset(window.skip())
            .limit(window.take())
            .select(ProfileRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let mut entities = Vec::with_capacity(rows.len());
        for row in rows {
            entities.push(hydrate_profile(&mut conn, row).await?);
        }
        Ok(entities)
    }

    async fn update(&self, data: Profile) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changeset = ProfileUpdate {
            name: &data.name,
            email: &data.email,
            password_digest: &data.password_digest,
            account_type: data.account_type.as_str(),
            updated_at: Utc::now(),
        };
        let affected = diesel::update(profiles::table.find(data.id))
            .set(&changeset)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if affected == 0 {
            return Err(RepositoryError::missing(format!("no profile {}", data.id)));
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        // The owned student row and its enrollments go with the profile via
        // the FK cascades.
        let affected = diesel::delete(profiles::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if affected == 0 {
            return Err(RepositoryError::missing(format!("no profile {id}")));
        }
        Ok(())
    }
}
