//! Generic CRUD contract every entity repository implements.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::PageWindow;
use uuid::Uuid;

use crate::domain::Error;

/// Storage-level failures raised by repository adapters.
///
/// `Duplicate` and `Missing` are split out from the generic query failure so
/// services can classify business-predictable conflicts (duplicate
/// enrollment, duplicate names) without matching on backend message strings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    /// A uniqueness constraint rejected the write.
    #[error("unique constraint violated: {constraint}")]
    Duplicate {
        /// Name of the violated constraint, as reported by the backend.
        constraint: String,
    },
    /// An update or delete addressed a record that does not exist.
    #[error("record not found: {message}")]
    Missing {
        /// Description of the missing record.
        message: String,
    },
    /// The storage backend could not be reached.
    #[error("repository connection failed: {message}")]
    Connection {
        /// Backend-reported connection failure.
        message: String,
    },
    /// A query or mutation failed during execution.
    #[error("repository query failed: {message}")]
    Query {
        /// Backend-reported query failure.
        message: String,
    },
}

impl RepositoryError {
    /// Build a [`RepositoryError::Duplicate`].
    pub fn duplicate(constraint: impl Into<String>) -> Self {
        Self::Duplicate {
            constraint: constraint.into(),
        }
    }

    /// Build a [`RepositoryError::Missing`].
    pub fn missing(message: impl Into<String>) -> Self {
        Self::Missing {
            message: message.into(),
        }
    }

    /// Build a [`RepositoryError::Connection`].
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Build a [`RepositoryError::Query`].
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

impl From<RepositoryError> for Error {
    /// Fallback mapping for repository failures a service did not classify
    /// as a business condition first.
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::Connection { message } => {
                Self::service_unavailable(format!("storage backend unavailable: {message}"))
            }
            other => Self::internal(other.to_string()),
        }
    }
}

/// Storage-agnostic CRUD contract, generic over the stored entity.
///
/// Implemented once per storage technology (PostgreSQL via diesel-async in
/// `outbound::persistence`, an in-memory fake in `test_support`); services
/// depend only on this trait. Lookups return `None` for absence — deciding
/// whether absence is exceptional is the caller's job, never the adapter's.
#[async_trait]
pub trait Repository: Send + Sync {
    /// Entity type stored by this repository.
    type Entity: Send + Sync + 'static;
    /// Filter accepted by single-record lookups.
    type Criteria: Send + 'static;

    /// Persist a new record and return the stored form.
    ///
    /// Fails with [`RepositoryError::Duplicate`] when a uniqueness
    /// constraint rejects the write.
    async fn create(&self, data: Self::Entity) -> Result<Self::Entity, RepositoryError>;

    /// Single-record lookup; `None` when no record matches.
    async fn find(&self, criteria: Self::Criteria) -> Result<Option<Self::Entity>, RepositoryError>;

    /// Paginated listing in creation order.
    async fn list(&self, window: PageWindow) -> Result<Vec<Self::Entity>, RepositoryError>;

    /// Full replace of the record identified by the entity's id, including
    /// nested relation collections.
    ///
    /// Fails with [`RepositoryError::Missing`] when the id does not exist
    /// and [`RepositoryError::Duplicate`] when the replacement violates a
    /// uniqueness constraint.
    async fn update(&self, data: Self::Entity) -> Result<(), RepositoryError>;

    /// Remove the record with the given id.
    ///
    /// Fails with [`RepositoryError::Missing`] when the id does not exist.
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}

/// Boxed repository handle parameterised by entity and criteria types.
pub type DynRepository<E, C> = Arc<dyn Repository<Entity = E, Criteria = C>>;
