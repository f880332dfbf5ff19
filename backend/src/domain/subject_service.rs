//! Subject domain service: subject lifecycle and enrollment consistency.
//!
//! This is the owning side of the student↔subject relation. Enrollment and
//! cancellation always re-fetch both records inside the operation, run the
//! membership check against that fresh state, and persist the subject's
//! `enrolled_students` collection wholesale in a single `update` call. The
//! membership pre-check exists for fast user-facing rejection only; the
//! composite key on the join association is the authoritative guard, and a
//! write it rejects surfaces as a duplicate-enrollment failure rather than a
//! storage error.

use pagination::PageWindow;
use uuid::Uuid;

use crate::domain::ports::{
    Repository, RepositoryError, RoomCriteria, RoomRepo, SubjectCriteria, SubjectRepo,
};
use crate::domain::student_service::StudentService;
use crate::domain::subject::{EnrolledStudent, NewSubject, RoomLink};
use crate::domain::{Error, Subject};

/// Subject lifecycle and enrollment service.
#[derive(Clone)]
pub struct SubjectService {
    repository: SubjectRepo,
    rooms: RoomRepo,
    students: StudentService,
}

impl SubjectService {
    /// Create a new service with its repository and collaborators.
    pub fn new(repository: SubjectRepo, rooms: RoomRepo, students: StudentService) -> Self {
        Self {
            repository,
            rooms,
            students,
        }
    }

    /// Create a subject, enforcing the global name-uniqueness invariant.
    ///
    /// One read (the name pre-check) plus one write. A storage-level unique
    /// violation on the write maps to the same duplicate-entity failure, so
    /// racing creators cannot leak a raw storage error to the boundary.
    pub async fn create(&self, data: NewSubject) -> Result<Subject, Error> {
        let subject_already_exists = self
            .repository
            .find(SubjectCriteria::Name(data.name.clone()))
            .await
            .map_err(Error::from)?
            .is_some();

        if subject_already_exists {
            return Err(Error::duplicate_entity(
                "Subject already exists with the given name",
            ));
        }

        let room = match data.room_id {
            Some(room_id) => Some(self.resolve_room_link(room_id).await?),
            None => None,
        };

        self.repository
            .create(Subject::new(data.name, data.taught_by, room))
            .await
            .map_err(|error| match error {
                RepositoryError::Duplicate { .. } => {
                    Error::duplicate_entity("Subject already exists with the given name")
                }
                other => Error::from(other),
            })
    }

    /// Resolve a subject by id; absence becomes a not-found failure here,
    /// never at the repository layer.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Subject, Error> {
        self.repository
            .find(SubjectCriteria::Id(id))
            .await
            .map_err(Error::from)?
            .ok_or_else(|| Error::not_found("No subject were found"))
    }

    /// List subjects in creation order.
    pub async fn list(&self, window: PageWindow) -> Result<Vec<Subject>, Error> {
        self.repository.list(window).await.map_err(Error::from)
    }

    /// Enroll a student into a subject.
    ///
    /// Both records are resolved inside this operation and the membership
    /// check runs against the student's current subject list, never a cached
    /// snapshot. The new collection is built copy-on-write and persisted in
    /// one `update`; the returned subject is re-fetched so the caller sees
    /// persisted state rather than an assumed one.
    pub async fn create_student_subject_enrollment(
        &self,
        student_id: Uuid,
        subject_id: Uuid,
    ) -> Result<Subject, Error> {
        let student = self.students.find_by_id(student_id).await?;
        let subject = self.find_by_id(subject_id).await?;

        let student_already_enrolled = student
            .subjects
            .iter()
            .any(|enrolled| enrolled.id == subject_id);

        if student_already_enrolled {
            return Err(Error::duplicate_enrollment(
                "Student already enrolled to this subject",
            ));
        }

        let mut enrolled_students =
            Vec::with_capacity(subject.enrolled_students.len() + 1);
        enrolled_students.extend(subject.enrolled_students.iter().copied());
        enrolled_students.push(EnrolledStudent {
            id: student.id,
            profile_id: student.profile_id,
        });

        self.repository
            .update(Subject {
                enrolled_students,
                ..subject
            })
            .await
            .map_err(|error| match error {
                // Lost the race against a concurrent enrollment: the join
                // association's composite key is the authoritative guard.
                RepositoryError::Duplicate { .. } => {
                    Error::duplicate_enrollment("Student already enrolled to this subject")
                }
                other => Error::from(other),
            })?;

        self.find_by_id(subject_id).await
    }

    /// Cancel a student's enrollment in a subject.
    ///
    /// Requires the student to be currently enrolled; cancelling a missing
    /// enrollment is an error, never a silent success. The member is removed
    /// by identity match on id (first match) and the reduced collection is
    /// persisted wholesale.
    pub async fn cancel_student_subject_enrollment(
        &self,
        student_id: Uuid,
        subject_id: Uuid,
    ) -> Result<(), Error> {
        let student = self.students.find_by_id(student_id).await?;
        let subject = self.find_by_id(subject_id).await?;

        let student_enrolled = student
            .subjects
            .iter()
            .any(|enrolled| enrolled.id == subject_id);

        if !student_enrolled {
            return Err(Error::not_enrolled(
                "Student is not enrolled in this subject",
            ));
        }

        let mut enrolled_students = subject.enrolled_students.clone();
        if let Some(position) = enrolled_students
            .iter()
            .position(|member| member.id == student_id)
        {
            enrolled_students.remove(position);
        }

        self.repository
            .update(Subject {
                enrolled_students,
                ..subject
            })
            .await
            .map_err(Error::from)
    }

    async fn resolve_room_link(&self, room_id: Uuid) -> Result<RoomLink, Error> {
        let room = self
            .rooms
            .find(RoomCriteria::Id(room_id))
            .await
            .map_err(Error::from)?
            .ok_or_else(|| Error::not_found("No room were found"))?;

        if room.subject.is_some() {
            return Err(Error::invalid_request(
                "Room is already assigned to another subject",
            ));
        }

        Ok(RoomLink {
            id: room.id,
            number: room.number,
            capacity: room.capacity,
        })
    }
}

#[cfg(test)]
#[path = "subject_service_tests.rs"]
mod tests;
