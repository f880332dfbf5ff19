//! Room entity: a physical room with amenities and an optional subject.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::specification::Specification;

/// Seating capacity used when room creation does not name one.
pub const DEFAULT_ROOM_CAPACITY: i32 = 40;

/// Slim reference to the subject taught in a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubjectLink {
    /// Subject identifier.
    pub id: Uuid,
    /// Subject name.
    pub name: String,
    /// Instructor identifier.
    pub taught_by: String,
}

/// A room.
///
/// `subject` is the reverse side of the subject↔room 1:1 link; deleting the
/// room clears the link on the subject (set-null, never a cascade into the
/// subject itself).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Stable identifier, assigned at creation and immutable thereafter.
    pub id: Uuid,
    /// Room number.
    pub number: i32,
    /// Seating capacity, defaults to [`DEFAULT_ROOM_CAPACITY`].
    pub capacity: i32,
    /// Amenities attached to this room.
    pub specifications: Vec<Specification>,
    /// Subject taught here, at most one (1:1 back-reference).
    pub subject: Option<SubjectLink>,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Room {
    /// Build a new room with a generated identifier.
    pub fn new(number: i32, capacity: i32, specifications: Vec<Specification>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            number,
            capacity,
            specifications,
            subject: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Payload accepted by room creation.
#[derive(Debug, Clone, Default)]
pub struct NewRoom {
    /// Room number.
    pub number: i32,
    /// Seating capacity; [`DEFAULT_ROOM_CAPACITY`] when omitted.
    pub capacity: Option<i32>,
    /// Specifications to attach, resolved before the write.
    pub specification_ids: Vec<Uuid>,
}
