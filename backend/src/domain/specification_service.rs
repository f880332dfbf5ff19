//! Specification domain service.

use pagination::PageWindow;
use uuid::Uuid;

use crate::domain::ports::{Repository, SpecificationCriteria, SpecificationRepo};
use crate::domain::{Error, Specification};

/// Specification lifecycle service.
#[derive(Clone)]
pub struct SpecificationService {
    repository: SpecificationRepo,
}

impl SpecificationService {
    /// Create a new service with the specification repository.
    pub fn new(repository: SpecificationRepo) -> Self {
        Self { repository }
    }

    /// Create a specification.
    pub async fn create(&self, name: impl Into<String>) -> Result<Specification, Error> {
        self.repository
            .create(Specification::new(name))
            .await
            .map_err(Error::from)
    }

    /// Delete a specification by id; rooms referencing it simply lose the
    /// attachment (join rows are removed, rooms are untouched).
    pub async fn delete(&self, id: Uuid) -> Result<(), Error> {
        self.repository
            .find(SpecificationCriteria::Id(id))
            .await
            .map_err(Error::from)?
            .ok_or_else(|| Error::not_found("No specification were found"))?;

        self.repository.delete(id).await.map_err(Error::from)
    }

    /// List specifications in creation order.
    pub async fn list(&self, window: PageWindow) -> Result<Vec<Specification>, Error> {
        self.repository.list(window).await.map_err(Error::from)
    }
}
