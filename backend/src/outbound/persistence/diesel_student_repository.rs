//! PostgreSQL-backed student repository using Diesel ORM.
//!
//! The student's subject list is derived: it is read through the enrollment
//! join table on every fetch and never written from this side.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::PageWindow;
use uuid::Uuid;

use crate::domain::ports::{Repository, RepositoryError, StudentCriteria};
use crate::domain::{EnrolledSubject, Student};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewStudentRow, StudentRow, StudentUpdate};
use super::pool::DbPool;
use super::schema::{students, subject_students, subjects};

/// Diesel-backed implementation of the student repository port.
#[derive(Clone)]
pub struct DieselStudentRepository {
    pool: DbPool,
}

impl DieselStudentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Convert a database row into a domain student with the derived subject
/// list.
async fn hydrate_student<C>(conn: &mut C, row: StudentRow) -> Result<Student, RepositoryError>
where
    C: diesel_async::AsyncConnection<Backend = diesel::pg::Pg> + Send,
{
    let subjects = subject_students::table
        .inner_join(subjects::table)
        .filter(subject_students::student_id.eq(row.id))
        .order((subject_students::enrolled_at.asc(), subjects::id.asc()))
        .select((subjects::id, subjects::name))
        .load::<(Uuid, String)>(conn)
        .await
        .map_err(map_diesel_error)?
        .into_iter()
        .map(|(id, name)| EnrolledSubject { id, name })
        .collect();

    Ok(Student {
        id: row.id,
        profile_id: row.profile_id,
        subjects,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

#[async_trait]
impl Repository for DieselStudentRepository {
    type Entity = Student;
    type Criteria = StudentCriteria;

    async fn create(&self, data: Student) -> Result<Student, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewStudentRow {
            id: data.id,
            profile_id: data.profile_id,
            created_at: data.created_at,
            updated_at: data.updated_at,
        };
        diesel::insert_into(students::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let row = students::table
            .find(data.id)
            .select(StudentRow::as_select())
            .first(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        hydrate_student(&mut conn, row).await
    }

    async fn find(&self, criteria: StudentCriteria) -> Result<Option<Student>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = match criteria {
            StudentCriteria::Id(id) => students::table
                .find(id)
                .select(StudentRow::as_select())
                .first(&mut conn)
                .await
                .optional(),
            StudentCriteria::Profile(profile_id) => students::table
                .filter(students::profile_id.eq(profile_id))
                .select(StudentRow::as_select())
                .first(&mut conn)
                .await
                .optional(),
        }
        .map_err(map_diesel_error)?;

        match row {
            Some(row) => Ok(Some(hydrate_student(&mut conn, row).await?)),
            None => Ok(None),
        }
    }

    async fn list(&self, window: PageWindow) -> Result<Vec<Student>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = students::table
            .order((students::created_at.asc(), students::id.asc()))
            .offset(window.skip())
            .limit(window.take())
            .select(StudentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let mut entities = Vec::with_capacity(rows.len());
        for row in rows {
            entities.push(hydrate_student(&mut conn, row).await?);
        }
        Ok(entities)
    }

    async fn update(&self, data: Student) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changeset = StudentUpdate {
            profile_id: data.profile_id,
            updated_at: Utc::now(),
        };
        let affected = diesel::update(students::table.find(data.id))
            .set(&changeset)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if affected == 0 {
            return Err(RepositoryError::missing(format!("no student {}", data.id)));
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let affected = diesel::delete(students::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if affected == 0 {
            return Err(RepositoryError::missing(format!("no student {id}")));
        }
        Ok(())
    }
}
