//! Profile domain service: account lifecycle and authentication.

use pagination::PageWindow;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::domain::ports::{
    ProfileCriteria, ProfileRepo, Repository, RepositoryError, StudentRepo,
};
use crate::domain::profile::{NewProfile, StudentLink};
use crate::domain::{AccountType, Error, Profile, Student};

/// Digest a plain-text password into its opaque stored form.
fn digest_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Profile lifecycle and authentication service.
#[derive(Clone)]
pub struct ProfileService {
    repository: ProfileRepo,
    students: StudentRepo,
}

impl ProfileService {
    /// Create a new service with the profile and student repositories.
    pub fn new(repository: ProfileRepo, students: StudentRepo) -> Self {
        Self {
            repository,
            students,
        }
    }

    /// Create a profile, enforcing e-mail uniqueness.
    ///
    /// A STUDENT profile owns exactly one student record, created in the
    /// same operation and returned embedded in the profile.
    pub async fn create(&self, data: NewProfile) -> Result<Profile, Error> {
        let profile_already_exists = self
            .repository
            .find(ProfileCriteria::Email(data.email.clone()))
            .await
            .map_err(Error::from)?
            .is_some();

        if profile_already_exists {
            return Err(Error::duplicate_entity(
                "Profile already exists with the given e-mail",
            ));
        }

        let profile = Profile::new(
            data.name,
            data.email,
            digest_password(&data.password),
            data.account_type,
        );

        let mut stored = self
            .repository
            .create(profile)
            .await
            .map_err(|error| match error {
                RepositoryError::Duplicate { .. } => {
                    Error::duplicate_entity("Profile already exists with the given e-mail")
                }
                other => Error::from(other),
            })?;

        if stored.account_type == AccountType::Student {
            let student = self
                .students
                .create(Student::new(stored.id))
                .await
                .map_err(Error::from)?;
            stored.student = Some(StudentLink { id: student.id });
        }

        Ok(stored)
    }

    /// Verify credentials and return the matching profile.
    ///
    /// The same failure is returned for an unknown e-mail and a wrong
    /// password, so callers cannot probe which addresses exist.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Profile, Error> {
        let profile = self
            .repository
            .find(ProfileCriteria::Email(email.to_owned()))
            .await
            .map_err(Error::from)?
            .ok_or_else(|| Error::unauthorized("Invalid e-mail or password"))?;

        if profile.password_digest != digest_password(password) {
            return Err(Error::unauthorized("Invalid e-mail or password"));
        }

        Ok(profile)
    }

    /// Resolve a profile by id.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Profile, Error> {
        self.repository
            .find(ProfileCriteria::Id(id))
            .await
            .map_err(Error::from)?
            .ok_or_else(|| Error::not_found("No profile were found"))
    }

    /// Delete a profile by id; the owned student record (if any) goes with
    /// it via the storage cascade.
    pub async fn delete(&self, id: Uuid) -> Result<(), Error> {
        self.find_by_id(id).await?;
        self.repository.delete(id).await.map_err(Error::from)
    }

    /// List profiles in creation order.
    pub async fn list(&self, window: PageWindow) -> Result<Vec<Profile>, Error> {
        self.repository.list(window).await.map_err(Error::from)
    }
}

#[cfg(test)]
#[path = "profile_service_tests.rs"]
mod tests;
