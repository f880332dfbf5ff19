//! PostgreSQL persistence adapters for the repository ports.

mod diesel_profile_repository;
mod diesel_room_repository;
mod diesel_specification_repository;
mod diesel_student_repository;
mod diesel_subject_repository;
mod error_mapping;
mod models;
mod pool;
pub(crate) mod schema;

pub use diesel_profile_repository::DieselProfileRepository;
pub use diesel_room_repository::DieselRoomRepository;
pub use diesel_specification_repository::DieselSpecificationRepository;
pub use diesel_student_repository::DieselStudentRepository;
pub use diesel_subject_repository::DieselSubjectRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
