//! Per-entity lookup filters accepted by [`super::Repository::find`].

use uuid::Uuid;

/// Single-record filters for profiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileCriteria {
    /// Lookup by identifier.
    Id(Uuid),
    /// Lookup by unique login e-mail.
    Email(String),
}

/// Single-record filters for students.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentCriteria {
    /// Lookup by identifier.
    Id(Uuid),
    /// Lookup by owning profile.
    Profile(Uuid),
}

/// Single-record filters for subjects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubjectCriteria {
    /// Lookup by identifier.
    Id(Uuid),
    /// Lookup by unique subject name.
    Name(String),
}

/// Single-record filters for rooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomCriteria {
    /// Lookup by identifier.
    Id(Uuid),
}

/// Single-record filters for specifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecificationCriteria {
    /// Lookup by identifier.
    Id(Uuid),
}
