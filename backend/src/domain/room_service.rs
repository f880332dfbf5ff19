//! Room domain service.

use pagination::PageWindow;
use uuid::Uuid;

use crate::domain::ports::{
    Repository, RoomCriteria, RoomRepo, SpecificationCriteria, SpecificationRepo,
};
use crate::domain::room::{NewRoom, DEFAULT_ROOM_CAPACITY};
use crate::domain::{Error, Room};

/// Room lifecycle service.
#[derive(Clone)]
pub struct RoomService {
    repository: RoomRepo,
    specifications: SpecificationRepo,
}

impl RoomService {
    /// Create a new service with the room and specification repositories.
    pub fn new(repository: RoomRepo, specifications: SpecificationRepo) -> Self {
        Self {
            repository,
            specifications,
        }
    }

    /// Create a room, resolving every requested specification first.
    ///
    /// Capacity falls back to [`DEFAULT_ROOM_CAPACITY`] when omitted. A
    /// specification id that resolves to nothing fails the whole operation
    /// before any write happens.
    pub async fn create(&self, data: NewRoom) -> Result<Room, Error> {
        let mut specifications = Vec::with_capacity(data.specification_ids.len());
        for specification_id in data.specification_ids {
            let specification = self
                .specifications
                .find(SpecificationCriteria::Id(specification_id))
                .await
                .map_err(Error::from)?
                .ok_or_else(|| Error::not_found("No specification were found"))?;
            specifications.push(specification);
        }

        let capacity = data.capacity.unwrap_or(DEFAULT_ROOM_CAPACITY);
        self.repository
            .create(Room::new(data.number, capacity, specifications))
            .await
            .map_err(Error::from)
    }

    /// Resolve a room by id.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Room, Error> {
        self.repository
            .find(RoomCriteria::Id(id))
            .await
            .map_err(Error::from)?
            .ok_or_else(|| Error::not_found("No room were found"))
    }

    /// List rooms in creation order.
    pub async fn list(&self, window: PageWindow) -> Result<Vec<Room>, Error> {
        self.repository.list(window).await.map_err(Error::from)
    }
}

#[cfg(test)]
#[path = "room_service_tests.rs"]
mod tests;
