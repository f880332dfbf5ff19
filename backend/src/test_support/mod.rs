//! Test support: in-memory repository fakes.
//!
//! Available to unit tests and, behind the `test-support` feature, to the
//! integration tests in `tests/`. Nothing here may be reachable from a
//! production code path.

pub mod memory;

pub use memory::{
    InMemoryProfileRepository, InMemoryRoomRepository, InMemorySpecificationRepository,
    InMemoryStudentRepository, InMemorySubjectRepository, MemoryStore,
};
