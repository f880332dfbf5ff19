//! Student domain service.
//!
//! Thin read-side collaborator used by enrollment: resolves students and
//! their derived subject list. The service layer is where repository absence
//! becomes a raised failure.

use uuid::Uuid;

use crate::domain::ports::{Repository, StudentCriteria, StudentRepo};
use crate::domain::{Error, Student};

/// Student lookup service.
#[derive(Clone)]
pub struct StudentService {
    repository: StudentRepo,
}

impl StudentService {
    /// Create a new service with the student repository.
    pub fn new(repository: StudentRepo) -> Self {
        Self { repository }
    }

    /// Resolve a student by id, with the derived enrolled-subject list.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Student, Error> {
        self.repository
            .find(StudentCriteria::Id(id))
            .await
            .map_err(Error::from)?
            .ok_or_else(|| Error::not_found("No student were found"))
    }

    /// Resolve the student record owned by a profile, if any.
    pub async fn find_by_profile(&self, profile_id: Uuid) -> Result<Option<Student>, Error> {
        self.repository
            .find(StudentCriteria::Profile(profile_id))
            .await
            .map_err(Error::from)
    }
}
