//! PostgreSQL-backed specification repository using Diesel ORM.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::PageWindow;
use uuid::Uuid;

use crate::domain::ports::{Repository, RepositoryError, SpecificationCriteria};
use crate::domain::Specification;

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewSpecificationRow, SpecificationRow, SpecificationUpdate};
use super::pool::DbPool;
use super::schema::specifications;

/// Diesel-backed implementation of the specification repository port.
#[derive(Clone)]
pub struct DieselSpecificationRepository {
    pool: DbPool,
}

impl DieselSpecificationRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn specification_from(row: SpecificationRow) -> Specification {
    Specification {
        id: row.id,
        name: row.name,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

#[async_trait]
impl Repository for DieselSpecificationRepository {
    type Entity = Specification;
    type Criteria = SpecificationCriteria;

    async fn create(&self, data: Specification) -> Result<Specification, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewSpecificationRow {
            id: data.id,
            name: &data.name,
            created_at: data.created_at,
            updated_at: data.updated_at,
        };
        diesel::insert_into(specifications::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(data)
    }

    async fn find(
        &self,
        criteria: SpecificationCriteria,
    ) -> Result<Option<Specification>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let SpecificationCriteria::Id(id) = criteria;
        let row = specifications::table
            .find(id)
            .select(SpecificationRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(specification_from))
    }

    async fn list(&self, window: PageWindow) -> Result<Vec<Specification>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = specifications::table
            .order((specifications::created_at.asc(), specifications::id.asc()))
            .offset(window.skip())
            .limit(window.take())
            .select(SpecificationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(specification_from).collect())
    }

    async fn update(&self, data: Specification) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changeset = SpecificationUpdate {
            name: &data.name,
            updated_at: Utc::now(),
        };
        let affected = diesel::update(specifications::table.find(data.id))
            .set(&changeset)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if affected == 0 {
            return Err(RepositoryError::missing(format!(
                "no specification {}",
                data.id
            )));
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let affected = diesel::delete(specifications::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if affected == 0 {
            return Err(RepositoryError::missing(format!("no specification {id}")));
        }
        Ok(())
    }
}
