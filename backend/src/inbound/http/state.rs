//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data`; it bundles
//! the domain services wired over whatever repository implementations the
//! process was started with (PostgreSQL in production, in-memory in tests).

use crate::domain::ports::{
    ProfileRepo, RoomRepo, SpecificationRepo, StudentRepo, SubjectRepo,
};
use crate::domain::{
    ProfileService, RoomService, SpecificationService, StudentService, SubjectService,
};

/// Parameter object bundling the repository handles for all services.
#[derive(Clone)]
pub struct HttpStatePorts {
    /// Profile repository handle.
    pub profiles: ProfileRepo,
    /// Student repository handle.
    pub students: StudentRepo,
    /// Subject repository handle.
    pub subjects: SubjectRepo,
    /// Room repository handle.
    pub rooms: RoomRepo,
    /// Specification repository handle.
    pub specifications: SpecificationRepo,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Profile service.
    pub profiles: ProfileService,
    /// Student service.
    pub students: StudentService,
    /// Subject service.
    pub subjects: SubjectService,
    /// Room service.
    pub rooms: RoomService,
    /// Specification service.
    pub specifications: SpecificationService,
}

impl HttpState {
    /// Wire the domain services over a bundle of repository handles.
    pub fn new(ports: HttpStatePorts) -> Self {
        let students = StudentService::new(ports.students.clone());
        Self {
            profiles: ProfileService::new(ports.profiles, ports.students),
            subjects: SubjectService::new(
                ports.subjects,
                ports.rooms.clone(),
                students.clone(),
            ),
            rooms: RoomService::new(ports.rooms, ports.specifications.clone()),
            specifications: SpecificationService::new(ports.specifications),
            students,
        }
    }
}
