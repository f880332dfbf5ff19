//! Profile entity: a user account with an account type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Account category attached to a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountType {
    /// Administrative account: manages subjects, rooms and specifications.
    Admin,
    /// Student account: owns a student record and can enroll in subjects.
    Student,
}

impl AccountType {
    /// Stable storage representation of the account type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Student => "STUDENT",
        }
    }
}

/// Raised when a stored account type string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown account type: {0}")]
pub struct UnknownAccountType(pub String);

impl std::str::FromStr for AccountType {
    type Err = UnknownAccountType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Self::Admin),
            "STUDENT" => Ok(Self::Student),
            other => Err(UnknownAccountType(other.to_owned())),
        }
    }
}

/// Slim reference to the student record owned by a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StudentLink {
    /// Identifier of the owned student record.
    pub id: Uuid,
}

/// A user account.
///
/// A profile with [`AccountType::Student`] owns exactly one student record;
/// other account types own none. The `password_digest` is opaque to the
/// domain and must never appear in presented output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Stable identifier, assigned at creation and immutable thereafter.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Login e-mail, unique across all profiles.
    pub email: String,
    /// Opaque credential digest.
    pub password_digest: String,
    /// Account category.
    pub account_type: AccountType,
    /// Owned student record when the account type is STUDENT.
    pub student: Option<StudentLink>,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Build a new profile with a generated identifier and fresh timestamps.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password_digest: impl Into<String>,
        account_type: AccountType,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            password_digest: password_digest.into(),
            account_type,
            student: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Payload accepted by profile creation.
#[derive(Debug, Clone)]
pub struct NewProfile {
    /// Display name.
    pub name: String,
    /// Login e-mail.
    pub email: String,
    /// Plain-text password; digested before it reaches storage.
    pub password: String,
    /// Requested account category.
    pub account_type: AccountType,
}
