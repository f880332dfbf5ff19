//! PostgreSQL-backed subject repository using Diesel ORM.
//!
//! Enrollment writes go through [`Repository::update`] as a wholesale
//! replacement of the join rows for the subject. The replacement is two
//! statements (delete, then batch insert) without a wrapping transaction —
//! by design the service layer treats its membership check as advisory and
//! the composite primary key on `subject_students` as the authoritative
//! guard: a racing insert of the same pair fails with a unique violation,
//! surfaced as [`RepositoryError::Duplicate`].

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::PageWindow;
use uuid::Uuid;

use crate::domain::ports::{Repository, RepositoryError, SubjectCriteria};
use crate::domain::{EnrolledStudent, RoomLink, Subject};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewSubjectRow, NewSubjectStudentRow, SubjectRow, SubjectUpdate};
use super::pool::DbPool;
use super::schema::{rooms, students, subject_students, subjects};

/// Diesel-backed implementation of the subject repository port.
#[derive(Clone)]
pub struct DieselSubjectRepository {
    pool: DbPool,
}

impl DieselSubjectRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Convert a database row into a domain subject, resolving the room link
/// and the enrolled-student collection.
async fn hydrate_subject<C>(conn: &mut C, row: SubjectRow) -> Result<Subject, RepositoryError>
where
    C: diesel_async::AsyncConnection<Backend = diesel::pg::Pg> + Send,
{
    let room = match row.room_id {
        Some(room_id) => rooms::table
            .find(room_id)
            .select((rooms::id, rooms::number, rooms::capacity))
            .first::<(Uuid, i32, i32)>(conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(|(id, number, capacity)| RoomLink {
                id,
                number,
                capacity,
            }),
        None => None,
    };

    let enrolled_students = subject_students::table
        .inner_join(students::table)
        .filter(subject_students::subject_id.eq(row.id))
        .order((subject_students::enrolled_at.asc(), students::id.asc()))
        .select((students::id, students::profile_id))
        .load::<(Uuid, Uuid)>(conn)
        .await
        .map_err(map_diesel_error)?
        .into_iter()
        .map(|(id, profile_id)| EnrolledStudent { id, profile_id })
        .collect();

    Ok(Subject {
        id: row.id,
        name: row.name,
        taught_by: row.taught_by,
        room,
        enrolled_students,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

/// Batch-insert the enrollment join rows for a subject.
async fn insert_enrollments<C>(
    conn: &mut C,
    subject_id: Uuid,
    members: &[EnrolledStudent],
) -> Result<(), RepositoryError>
where
    C: diesel_async::AsyncConnection<Backend = diesel::pg::Pg> + Send,
{
    if members.is_empty() {
        return Ok(());
    }
    let enrolled_at = Utc::now();
    let rows: Vec<NewSubjectStudentRow> = members
        .iter()
        .map(|member| NewSubjectStudentRow {
            subject_id,
            student_id: member.id,
            enrolled_at,
        })
        .collect();
    diesel::insert_into(subject_students::table)
        .values(&rows)
        .execute(conn)
        .await
        .map_err(map_diesel_error)?;
    Ok(())
}

#[async_trait]
impl Repository for DieselSubjectRepository {
    type Entity = Subject;
    type Criteria = SubjectCriteria;

    async fn create(&self, data: Subject) -> Result<Subject, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewSubjectRow {
            id: data.id,
            name: &data.name,
            taught_by: &data.taught_by,
            room_id: data.room.as_ref().map(|room| room.id),
            created_at: data.created_at,
            updated_at: data.updated_at,
        };
        diesel::insert_into(subjects::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        insert_enrollments(&mut conn, data.id, &data.enrolled_students).await?;

        let row = subjects::table
            .find(data.id)
            .select(SubjectRow::as_select())
            .first(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        hydrate_subject(&mut conn, row).await
    }

    async fn find(&self, criteria: SubjectCriteria) -> Result<Option<Subject>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = match criteria {
            SubjectCriteria::Id(id) => subjects::table
                .find(id)
                .select(SubjectRow::as_select())
                .first(&mut conn)
                .await
                .optional(),
            SubjectCriteria::Name(name) => subjects::table
                .filter(subjects::name.eq(name))
                .select(SubjectRow::as_select())
                .first(&mut conn)
                .await
                .optional(),
        }
        .map_err(map_diesel_error)?;

        match row {
            Some(row) => Ok(Some(hydrate_subject(&mut conn, row).await?)),
            None => Ok(None),
        }
    }

    async fn list(&self, window: PageWindow) -> Result<Vec<Subject>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = subjects::table
            .order((subjects::created_at.asc(), subjects::id.asc()))
            .offset(window.skip())
            .limit(window.take())
            .select(SubjectRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let mut entities = Vec::with_capacity(rows.len());
        for row in rows {
            entities.push(hydrate_subject(&mut conn, row).await?);
        }
        Ok(entities)
    }

    async fn update(&self, data: Subject) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changeset = SubjectUpdate {
            name: &data.name,
            taught_by: &data.taught_by,
            room_id: data.room.as_ref().map(|room| room.id),
            updated_at: Utc::now(),
        };
        let affected = diesel::update(subjects::table.find(data.id))
            .set(&changeset)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if affected == 0 {
            return Err(RepositoryError::missing(format!("no subject {}", data.id)));
        }

        // Wholesale replacement of the enrollment collection.
        diesel::delete(
            subject_students::table.filter(subject_students::subject_id.eq(data.id)),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        insert_enrollments(&mut conn, data.id, &data.enrolled_students).await
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let affected = diesel::delete(subjects::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if affected == 0 {
            return Err(RepositoryError::missing(format!("no subject {id}")));
        }
        Ok(())
    }
}
