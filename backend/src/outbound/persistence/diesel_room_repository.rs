//! PostgreSQL-backed room repository using Diesel ORM.
//!
//! Deleting a room detaches its subject via the database's set-null policy
//! on `subjects.room_id`; the subject record itself is never touched.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::PageWindow;
use uuid::Uuid;

use crate::domain::ports::{Repository, RepositoryError, RoomCriteria};
use crate::domain::{Room, Specification, SubjectLink};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{
    NewRoomRow, NewRoomSpecificationRow, RoomRow, RoomUpdate, SpecificationRow,
};
use super::pool::DbPool;
use super::schema::{room_specifications, rooms, specifications, subjects};

/// Diesel-backed implementation of the room repository port.
#[derive(Clone)]
pub struct DieselRoomRepository {
    pool: DbPool,
}

impl DieselRoomRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Convert a database row into a domain room, resolving the attached
/// specifications and the subject back-reference.
async fn hydrate_room<C>(conn: &mut C, row: RoomRow) -> Result<Room, RepositoryError>
where
    C: diesel_async::AsyncConnection<Backend = diesel::pg::Pg> + Send,
{
    let specifications = room_specifications::table
        .inner_join(specifications::table)
        .filter(room_specifications::room_id.eq(row.id))
        .order((specifications::created_at.asc(), specifications::id.asc()))
        .select(SpecificationRow::as_select())
        .load::<SpecificationRow>(conn)
        .await
        .map_err(map_diesel_error)?
        .into_iter()
        .map(|specification| Specification {
            id: specification.id,
            name: specification.name,
            created_at: specification.created_at,
            updated_at: specification.updated_at,
        })
        .collect();

    let subject = subjects::table
        .filter(subjects::room_id.eq(row.id))
        .select((subjects::id, subjects::name, subjects::taught_by))
        .first::<(Uuid, String, String)>(conn)
        .await
        .optional()
        .map_err(map_diesel_error)?
        .map(|(id, name, taught_by)| SubjectLink {
            id,
            name,
            taught_by,
        });

    Ok(Room {
        id: row.id,
        number: row.number,
        capacity: row.capacity,
        specifications,
        subject,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

/// Batch-insert the room↔specification join rows for a room.
async fn insert_specifications<C>(
    conn: &mut C,
    room_id: Uuid,
    attached: &[Specification],
) -> Result<(), RepositoryError>
where
    C: diesel_async::AsyncConnection<Backend = diesel::pg::Pg> + Send,
{
    if attached.is_empty() {
        return Ok(());
    }
    let rows: Vec<NewRoomSpecificationRow> = attached
        .iter()
        .map(|specification| NewRoomSpecificationRow {
            room_id,
            specification_id: specification.id,
        })
        .collect();
    diesel::insert_into(room_specifications::table)
        .values(&rows)
        .execute(conn)
        .await
        .map_err(map_diesel_error)?;
    Ok(())
}

#[async_trait]
impl Repository for DieselRoomRepository {
    type Entity = Room;
    type Criteria = RoomCriteria;

    async fn create(&self, data: Room) -> Result<Room, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewRoomRow {
            id: data.id,
            number: data.number,
            capacity: data.capacity,
            created_at: data.created_at,
            updated_at: data.updated_at,
        };
        diesel::insert_into(rooms::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        insert_specifications(&mut conn, data.id, &data.specifications).await?;

        let row = rooms::table
            .find(data.id)
            .select(RoomRow::as_select())
            .first(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        hydrate_room(&mut conn, row).await
    }

    async fn find(&self, criteria: RoomCriteria) -> Result<Option<Room>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let RoomCriteria::Id(id) = criteria;
        let row = rooms::table
            .find(id)
            .select(RoomRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        match row {
            Some(row) => Ok(Some(hydrate_room(&mut conn, row).await?)),
            None => Ok(None),
        }
    }

    async fn list(&self, window: PageWindow) -> Result<Vec<Room>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = rooms::table
            .order((rooms::created_at.asc(), rooms::id.asc()))
            .offset(window.skip())
            .limit(window.take())
            .select(RoomRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let mut entities = Vec::with_capacity(rows.len());
        for row in rows {
            entities.push(hydrate_room(&mut conn, row).await?);
        }
        Ok(entities)
    }

    async fn update(&self, data: Room) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changeset = RoomUpdate {
            number: data.number,
            capacity: data.capacity,
            updated_at: Utc::now(),
        };
        let affected = diesel::update(rooms::table.find(data.id))
            .set(&changeset)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if affected == 0 {
            return Err(RepositoryError::missing(format!("no room {}", data.id)));
        }

        diesel::delete(
            room_specifications::table.filter(room_specifications::room_id.eq(data.id)),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        insert_specifications(&mut conn, data.id, &data.specifications).await
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let affected = diesel::delete(rooms::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if affected == 0 {
            return Err(RepositoryError::missing(format!("no room {id}")));
        }
        Ok(())
    }
}
