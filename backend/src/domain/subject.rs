//! Subject entity: a taught class with enrolled students and an optional
//! room.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Slim reference to a student enrolled in a subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrolledStudent {
    /// Student identifier.
    pub id: Uuid,
    /// Profile owning the student record.
    pub profile_id: Uuid,
}

/// Slim reference to the room a subject is taught in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RoomLink {
    /// Room identifier.
    pub id: Uuid,
    /// Room number.
    pub number: i32,
    /// Seating capacity.
    pub capacity: i32,
}

/// A taught subject.
///
/// `name` is globally unique. `enrolled_students` is the owning side of the
/// student↔subject relation: enrollment changes always go through this
/// collection, persisted wholesale in a single update call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    /// Stable identifier, assigned at creation and immutable thereafter.
    pub id: Uuid,
    /// Unique subject name.
    pub name: String,
    /// Instructor identifier.
    pub taught_by: String,
    /// Linked room, at most one (1:1).
    pub room: Option<RoomLink>,
    /// Students currently enrolled (owning side of the relation).
    pub enrolled_students: Vec<EnrolledStudent>,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Subject {
    /// Build a new subject with a generated identifier and no enrollments.
    pub fn new(name: impl Into<String>, taught_by: impl Into<String>, room: Option<RoomLink>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            taught_by: taught_by.into(),
            room,
            enrolled_students: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Payload accepted by subject creation.
#[derive(Debug, Clone)]
pub struct NewSubject {
    /// Unique subject name.
    pub name: String,
    /// Instructor identifier.
    pub taught_by: String,
    /// Optional room to link (1:1).
    pub room_id: Option<Uuid>,
}
