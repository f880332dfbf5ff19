//! Tests for the room service and the room↔subject detach policy.

use std::sync::Arc;

use uuid::Uuid;

use super::*;
use crate::domain::ports::{Repository, SubjectCriteria};
use crate::domain::{ErrorCode, SpecificationService, Subject};
use crate::test_support::{
    InMemoryRoomRepository, InMemorySpecificationRepository, InMemorySubjectRepository,
    MemoryStore,
};

struct Harness {
    store: Arc<MemoryStore>,
    rooms: RoomService,
    specifications: SpecificationService,
}

fn harness() -> Harness {
    let store = MemoryStore::new();
    let specification_repo = Arc::new(InMemorySpecificationRepository::new(store.clone()));
    let rooms = RoomService::new(
        Arc::new(InMemoryRoomRepository::new(store.clone())),
        specification_repo.clone(),
    );
    let specifications = SpecificationService::new(specification_repo);
    Harness {
        store,
        rooms,
        specifications,
    }
}

#[tokio::test]
async fn capacity_defaults_to_forty() {
    let harness = harness();
    let room = harness
        .rooms
        .create(NewRoom {
            number: 101,
            capacity: None,
            specification_ids: Vec::new(),
        })
        .await
        .expect("create succeeds");
    assert_eq!(room.capacity, DEFAULT_ROOM_CAPACITY);
    assert_eq!(room.capacity, 40);
}

#[tokio::test]
async fn create_attaches_resolved_specifications_in_order() {
    let harness = harness();
    let projector = harness
        .specifications
        .create("projector")
        .await
        .expect("create specification");
    let benches = harness
        .specifications
        .create("lab benches")
        .await
        .expect("create specification");

    let room = harness
        .rooms
        .create(NewRoom {
            number: 101,
            capacity: Some(24),
            specification_ids: vec![projector.id, benches.id],
        })
        .await
        .expect("create succeeds");

    let names: Vec<&str> = room
        .specifications
        .iter()
        .map(|specification| specification.name.as_str())
        .collect();
    assert_eq!(names, vec!["projector", "lab benches"]);
}

#[tokio::test]
async fn create_with_unknown_specification_fails_before_writing() {
    let harness = harness();
    let error = harness
        .rooms
        .create(NewRoom {
            number: 101,
            capacity: None,
            specification_ids: vec![Uuid::new_v4()],
        })
        .await
        .expect_err("unknown specification rejected");
    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "No specification were found");

    let listed = harness
        .rooms
        .list(pagination::PageWindow::default())
        .await
        .expect("list succeeds");
    assert!(listed.is_empty());
}

#[tokio::test]
async fn deleting_a_room_detaches_its_subject_without_deleting_it() {
    let harness = harness();
    let room = harness
        .rooms
        .create(NewRoom {
            number: 101,
            capacity: None,
            specification_ids: Vec::new(),
        })
        .await
        .expect("create room");

    let subjects: crate::domain::ports::SubjectRepo =
        Arc::new(InMemorySubjectRepository::new(harness.store.clone()));
    let subject = subjects
        .create(Subject::new(
            "Algebra",
            "T1",
            Some(crate::domain::RoomLink {
                id: room.id,
                number: room.number,
                capacity: room.capacity,
            }),
        ))
        .await
        .expect("create subject");

    let room_repo: crate::domain::ports::RoomRepo =
        Arc::new(InMemoryRoomRepository::new(harness.store.clone()));
    room_repo.delete(room.id).await.expect("delete room");

    let detached = subjects
        .find(SubjectCriteria::Id(subject.id))
        .await
        .expect("lookup succeeds")
        .expect("subject survives the room");
    assert!(detached.room.is_none());
}

#[tokio::test]
async fn find_by_id_raises_not_found_for_missing_room() {
    let harness = harness();
    let error = harness
        .rooms
        .find_by_id(Uuid::new_v4())
        .await
        .expect_err("missing room");
    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "No room were found");
}

#[tokio::test]
async fn deleted_specification_detaches_from_rooms() {
    let harness = harness();
    let projector = harness
        .specifications
        .create("projector")
        .await
        .expect("create specification");
    let room = harness
        .rooms
        .create(NewRoom {
            number: 101,
            capacity: None,
            specification_ids: vec![projector.id],
        })
        .await
        .expect("create room");

    harness
        .specifications
        .delete(projector.id)
        .await
        .expect("delete specification");

    let fetched = harness
        .rooms
        .find_by_id(room.id)
        .await
        .expect("room survives");
    assert!(fetched.specifications.is_empty());
}

#[tokio::test]
async fn specification_delete_requires_an_existing_record() {
    let harness = harness();
    let error = harness
        .specifications
        .delete(Uuid::new_v4())
        .await
        .expect_err("missing specification rejected");
    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "No specification were found");
}
