//! Student entity: the enrollable record owned by a STUDENT profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Slim reference to a subject a student is enrolled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EnrolledSubject {
    /// Subject identifier.
    pub id: Uuid,
    /// Subject name.
    pub name: String,
}

/// A student record.
///
/// The `subjects` collection is the read-only reverse side of
/// `Subject::enrolled_students`: it is recomputed from the subject side on
/// every fetch and is never written through directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Stable identifier, assigned at creation and immutable thereafter.
    pub id: Uuid,
    /// Owning profile (1:1).
    pub profile_id: Uuid,
    /// Subjects this student is currently enrolled in (derived).
    pub subjects: Vec<EnrolledSubject>,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Student {
    /// Build a new student record owned by the given profile.
    pub fn new(profile_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            profile_id,
            subjects: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}
