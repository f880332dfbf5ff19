//! Domain entities, services and ports.
//!
//! Purpose: hold the business rules of the classroom backend — entity
//! shapes, the relationship-consistency logic over them, and the storage
//! contract the services depend on. Everything here is transport agnostic;
//! inbound adapters translate to and from HTTP at the boundary.

pub mod error;
pub mod ports;
pub mod profile;
pub mod profile_service;
pub mod room;
pub mod room_service;
pub mod specification;
pub mod specification_service;
pub mod student;
pub mod student_service;
pub mod subject;
pub mod subject_service;

pub use self::error::{Error, ErrorCode};
pub use self::profile::{AccountType, NewProfile, Profile, StudentLink};
pub use self::profile_service::ProfileService;
pub use self::room::{NewRoom, Room, SubjectLink, DEFAULT_ROOM_CAPACITY};
pub use self::room_service::RoomService;
pub use self::specification::Specification;
pub use self::specification_service::SpecificationService;
pub use self::student::{EnrolledSubject, Student};
pub use self::student_service::StudentService;
pub use self::subject::{EnrolledStudent, NewSubject, RoomLink, Subject};
pub use self::subject_service::SubjectService;

/// Convenient result alias for service operations.
pub type DomainResult<T> = Result<T, Error>;
