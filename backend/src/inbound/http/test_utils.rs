//! Helpers shared by handler and integration tests.

use std::sync::Arc;

use actix_session::storage::CookieSessionStore;
use actix_session::SessionMiddleware;
use actix_web::cookie::Key;

use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::test_support::{
    InMemoryProfileRepository, InMemoryRoomRepository, InMemorySpecificationRepository,
    InMemoryStudentRepository, InMemorySubjectRepository, MemoryStore,
};

/// Cookie-session middleware with an ephemeral key and `Secure` disabled so
/// plain-HTTP test requests carry the cookie.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_secure(false)
        .build()
}

/// Handler state wired over a fresh in-memory store.
///
/// The store handle is returned alongside so tests can attach further
/// repositories to the same tables.
pub fn memory_state() -> (Arc<MemoryStore>, HttpState) {
    let store = MemoryStore::new();
    let ports = HttpStatePorts {
        profiles: Arc::new(InMemoryProfileRepository::new(store.clone())),
        students: Arc::new(InMemoryStudentRepository::new(store.clone())),
        subjects: Arc::new(InMemorySubjectRepository::new(store.clone())),
        rooms: Arc::new(InMemoryRoomRepository::new(store.clone())),
        specifications: Arc::new(InMemorySpecificationRepository::new(store.clone())),
    };
    (store, HttpState::new(ports))
}
