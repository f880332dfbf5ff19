//! Presenters: pure projections from entities to response shapes.
//!
//! Total functions with no failure modes. Optional relations appear in the
//! output only when populated, internal fields (credential digests) never
//! appear at all, and bulk projection preserves input order.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    AccountType, EnrolledStudent, EnrolledSubject, Profile, Room, RoomLink, Specification,
    Student, StudentLink, Subject, SubjectLink,
};

/// Response shape for a profile. Credentials are not part of this shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    /// Profile identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Login e-mail.
    pub email: String,
    /// Account category.
    pub account_type: AccountType,
    /// Owned student record, present for STUDENT accounts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student: Option<StudentLink>,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Response shape for a subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubjectResponse {
    /// Subject identifier.
    pub id: Uuid,
    /// Subject name.
    pub name: String,
    /// Instructor identifier.
    pub taught_by: String,
    /// Linked room, included only when populated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<RoomLink>,
    /// Enrolled students in enrollment order.
    pub enrolled_students: Vec<EnrolledStudent>,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Response shape for a specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpecificationResponse {
    /// Specification identifier.
    pub id: Uuid,
    /// Amenity name.
    pub name: String,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Response shape for a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoomResponse {
    /// Room identifier.
    pub id: Uuid,
    /// Room number.
    pub number: i32,
    /// Seating capacity.
    pub capacity: i32,
    /// Attached specifications.
    pub specifications: Vec<SpecificationResponse>,
    /// Subject taught here, included only when populated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<SubjectLink>,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Response shape for a student with the derived subject list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentResponse {
    /// Student identifier.
    pub id: Uuid,
    /// Owning profile.
    pub profile_id: Uuid,
    /// Enrolled subjects in enrollment order.
    pub subjects: Vec<EnrolledSubject>,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Success envelope for operations without a meaningful payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct MessageResponse {
    /// Mirrors the HTTP status code.
    pub code: u16,
    /// Human-readable confirmation.
    pub message: String,
}

impl MessageResponse {
    /// A `200`-coded confirmation envelope.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            code: 200,
            message: message.into(),
        }
    }
}

/// Project a profile into its response shape.
pub fn present_profile(profile: Profile) -> ProfileResponse {
    ProfileResponse {
        id: profile.id,
        name: profile.name,
        email: profile.email,
        account_type: profile.account_type,
        student: profile.student,
        created_at: profile.created_at,
        updated_at: profile.updated_at,
    }
}

/// Project a sequence of profiles, preserving order.
pub fn present_profiles(profiles: Vec<Profile>) -> Vec<ProfileResponse> {
    profiles.into_iter().map(present_profile).collect()
}

/// Project a subject into its response shape.
pub fn present_subject(subject: Subject) -> SubjectResponse {
    SubjectResponse {
        id: subject.id,
        name: subject.name,
        taught_by: subject.taught_by,
        room: subject.room,
        enrolled_students: subject.enrolled_students,
        created_at: subject.created_at,
        updated_at: subject.updated_at,
    }
}

/// Project a sequence of subjects, preserving order.
pub fn present_subjects(subjects: Vec<Subject>) -> Vec<SubjectResponse> {
    subjects.into_iter().map(present_subject).collect()
}

/// Project a specification into its response shape.
pub fn present_specification(specification: Specification) -> SpecificationResponse {
    SpecificationResponse {
        id: specification.id,
        name: specification.name,
        created_at: specification.created_at,
        updated_at: specification.updated_at,
    }
}

/// Project a sequence of specifications, preserving order.
pub fn present_specifications(specifications: Vec<Specification>) -> Vec<SpecificationResponse> {
    specifications.into_iter().map(present_specification).collect()
}

/// Project a room into its response shape.
pub fn present_room(room: Room) -> RoomResponse {
    RoomResponse {
        id: room.id,
        number: room.number,
        capacity: room.capacity,
        specifications: present_specifications(room.specifications),
        subject: room.subject,
        created_at: room.created_at,
        updated_at: room.updated_at,
    }
}

/// Project a sequence of rooms, preserving order.
pub fn present_rooms(rooms: Vec<Room>) -> Vec<RoomResponse> {
    rooms.into_iter().map(present_room).collect()
}

/// Project a student into its response shape.
pub fn present_student(student: Student) -> StudentResponse {
    StudentResponse {
        id: student.id,
        profile_id: student.profile_id,
        subjects: student.subjects,
        created_at: student.created_at,
        updated_at: student.updated_at,
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use super::*;

    fn sample_room(subject: Option<SubjectLink>) -> Room {
        Room {
            subject,
            ..Room::new(101, 40, Vec::new())
        }
    }

    #[test]
    fn bulk_projection_preserves_order_and_length() {
        let subjects: Vec<Subject> = (0..5)
            .map(|index| Subject::new(format!("subject-{index}"), "T1", None))
            .collect();
        let expected: Vec<Uuid> = subjects.iter().map(|subject| subject.id).collect();

        let presented = present_subjects(subjects);
        assert_eq!(presented.len(), 5);
        let ids: Vec<Uuid> = presented.iter().map(|response| response.id).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn room_subject_is_omitted_when_absent() {
        let json = serde_json::to_value(present_room(sample_room(None))).expect("serialisable");
        assert!(json.get("subject").is_none());
        assert!(json.get("specifications").is_some());
    }

    #[test]
    fn room_subject_is_included_when_populated() {
        let link = SubjectLink {
            id: Uuid::new_v4(),
            name: "Algebra".to_owned(),
            taught_by: "T1".to_owned(),
        };
        let json = serde_json::to_value(present_room(sample_room(Some(link))))
            .expect("serialisable");
        assert_eq!(json["subject"]["name"], "Algebra");
    }

    #[test]
    fn profile_projection_never_exposes_the_digest() {
        let profile = Profile::new("Ada", "ada@example.com", "digest", AccountType::Admin);
        let json = serde_json::to_value(present_profile(profile)).expect("serialisable");
        assert!(json.get("passwordDigest").is_none());
        assert!(json.get("password_digest").is_none());
        assert_eq!(json["accountType"], "ADMIN");
    }
}
