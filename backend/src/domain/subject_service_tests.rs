//! Tests for the subject service and its enrollment invariants.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::PageWindow;
use uuid::Uuid;

use super::*;
use crate::domain::ports::Repository;
use crate::domain::{ErrorCode, Student};
use crate::test_support::{
    InMemoryRoomRepository, InMemoryStudentRepository, InMemorySubjectRepository, MemoryStore,
};

struct Harness {
    subjects: SubjectService,
    students: Arc<InMemoryStudentRepository>,
}

fn harness() -> Harness {
    let store = MemoryStore::new();
    let students = Arc::new(InMemoryStudentRepository::new(store.clone()));
    let student_service = StudentService::new(students.clone());
    let subjects = SubjectService::new(
        Arc::new(InMemorySubjectRepository::new(store.clone())),
        Arc::new(InMemoryRoomRepository::new(store)),
        student_service,
    );
    Harness { subjects, students }
}

fn new_subject(name: &str, taught_by: &str) -> NewSubject {
    NewSubject {
        name: name.to_owned(),
        taught_by: taught_by.to_owned(),
        room_id: None,
    }
}

async fn seed_student(harness: &Harness) -> Student {
    harness
        .students
        .create(Student::new(Uuid::new_v4()))
        .await
        .expect("seed student")
}

#[tokio::test]
async fn create_rejects_duplicate_name_without_writing() {
    let harness = harness();
    harness
        .subjects
        .create(new_subject("Algebra", "T1"))
        .await
        .expect("first create succeeds");

    let error = harness
        .subjects
        .create(new_subject("Algebra", "T2"))
        .await
        .expect_err("duplicate name rejected");
    assert_eq!(error.code(), ErrorCode::DuplicateEntity);
    assert_eq!(error.message(), "Subject already exists with the given name");

    let listed = harness
        .subjects
        .list(PageWindow::default())
        .await
        .expect("list succeeds");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].taught_by, "T1");
}

#[tokio::test]
async fn find_by_id_raises_not_found_for_missing_subject() {
    let harness = harness();
    let error = harness
        .subjects
        .find_by_id(Uuid::new_v4())
        .await
        .expect_err("missing subject");
    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "No subject were found");
}

#[tokio::test]
async fn enrollment_adds_student_exactly_once() {
    let harness = harness();
    let student = seed_student(&harness).await;
    let subject = harness
        .subjects
        .create(new_subject("Algebra", "T1"))
        .await
        .expect("create subject");

    let updated = harness
        .subjects
        .create_student_subject_enrollment(student.id, subject.id)
        .await
        .expect("enrollment succeeds");

    let members: Vec<Uuid> = updated
        .enrolled_students
        .iter()
        .map(|member| member.id)
        .collect();
    assert_eq!(members, vec![student.id]);
}

#[tokio::test]
async fn second_enrollment_fails_and_keeps_single_membership() {
    let harness = harness();
    let student = seed_student(&harness).await;
    let subject = harness
        .subjects
        .create(new_subject("Algebra", "T1"))
        .await
        .expect("create subject");

    harness
        .subjects
        .create_student_subject_enrollment(student.id, subject.id)
        .await
        .expect("first enrollment succeeds");
    let error = harness
        .subjects
        .create_student_subject_enrollment(student.id, subject.id)
        .await
        .expect_err("second enrollment rejected");
    assert_eq!(error.code(), ErrorCode::DuplicateEnrollment);
    assert_eq!(error.message(), "Student already enrolled to this subject");

    let fetched = harness
        .subjects
        .find_by_id(subject.id)
        .await
        .expect("subject still present");
    let occurrences = fetched
        .enrolled_students
        .iter()
        .filter(|member| member.id == student.id)
        .count();
    assert_eq!(occurrences, 1);
}

#[tokio::test]
async fn cancel_without_enrollment_fails_and_leaves_state_unchanged() {
    let harness = harness();
    let student = seed_student(&harness).await;
    let subject = harness
        .subjects
        .create(new_subject("Algebra", "T1"))
        .await
        .expect("create subject");

    let error = harness
        .subjects
        .cancel_student_subject_enrollment(student.id, subject.id)
        .await
        .expect_err("cancel rejected");
    assert_eq!(error.code(), ErrorCode::NotEnrolled);
    assert_eq!(error.message(), "Student is not enrolled in this subject");

    let fetched = harness
        .subjects
        .find_by_id(subject.id)
        .await
        .expect("subject still present");
    assert!(fetched.enrolled_students.is_empty());
}

#[tokio::test]
async fn enroll_then_cancel_round_trip() {
    let harness = harness();
    let student = seed_student(&harness).await;
    let subject = harness
        .subjects
        .create(new_subject("Algebra", "T1"))
        .await
        .expect("create subject");

    harness
        .subjects
        .create_student_subject_enrollment(student.id, subject.id)
        .await
        .expect("enrollment succeeds");
    harness
        .subjects
        .cancel_student_subject_enrollment(student.id, subject.id)
        .await
        .expect("cancellation succeeds");

    let fetched = harness
        .subjects
        .find_by_id(subject.id)
        .await
        .expect("subject still present");
    assert!(fetched.enrolled_students.is_empty());

    let error = harness
        .subjects
        .cancel_student_subject_enrollment(student.id, subject.id)
        .await
        .expect_err("second cancel rejected");
    assert_eq!(error.code(), ErrorCode::NotEnrolled);
}

#[tokio::test]
async fn enrollment_for_unknown_student_raises_not_found() {
    let harness = harness();
    let subject = harness
        .subjects
        .create(new_subject("Algebra", "T1"))
        .await
        .expect("create subject");

    let error = harness
        .subjects
        .create_student_subject_enrollment(Uuid::new_v4(), subject.id)
        .await
        .expect_err("unknown student rejected");
    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "No student were found");
}

/// Passes reads through but fails every write with a unique violation, the
/// shape a concurrent enrollment race leaves behind.
struct DuplicateOnUpdate {
    inner: crate::domain::ports::SubjectRepo,
}

#[async_trait]
impl Repository for DuplicateOnUpdate {
    type Entity = Subject;
    type Criteria = crate::domain::ports::SubjectCriteria;

    async fn create(
        &self,
        data: Subject,
    ) -> Result<Subject, crate::domain::ports::RepositoryError> {
        self.inner.create(data).await
    }

    async fn find(
        &self,
        criteria: Self::Criteria,
    ) -> Result<Option<Subject>, crate::domain::ports::RepositoryError> {
        self.inner.find(criteria).await
    }

    async fn list(
        &self,
        window: PageWindow,
    ) -> Result<Vec<Subject>, crate::domain::ports::RepositoryError> {
        self.inner.list(window).await
    }

    async fn update(&self, _data: Subject) -> Result<(), crate::domain::ports::RepositoryError> {
        Err(crate::domain::ports::RepositoryError::duplicate(
            "subject_students_pkey",
        ))
    }

    async fn delete(&self, id: Uuid) -> Result<(), crate::domain::ports::RepositoryError> {
        self.inner.delete(id).await
    }
}

#[tokio::test]
async fn storage_duplicate_on_enrollment_write_maps_to_duplicate_enrollment() {
    let store = MemoryStore::new();
    let students = Arc::new(InMemoryStudentRepository::new(store.clone()));
    let inner: crate::domain::ports::SubjectRepo =
        Arc::new(InMemorySubjectRepository::new(store.clone()));
    let student_service = StudentService::new(students.clone());

    let seeded = inner
        .create(Subject::new("Algebra", "T1", None))
        .await
        .expect("seed subject");
    let student = students
        .create(Student::new(Uuid::new_v4()))
        .await
        .expect("seed student");

    let subjects = SubjectService::new(
        Arc::new(DuplicateOnUpdate { inner }),
        Arc::new(InMemoryRoomRepository::new(store)),
        student_service,
    );

    let error = subjects
        .create_student_subject_enrollment(student.id, seeded.id)
        .await
        .expect_err("racing write rejected");
    assert_eq!(error.code(), ErrorCode::DuplicateEnrollment);
}

#[tokio::test]
async fn create_with_unknown_room_raises_not_found() {
    let harness = harness();
    let error = harness
        .subjects
        .create(NewSubject {
            name: "Algebra".to_owned(),
            taught_by: "T1".to_owned(),
            room_id: Some(Uuid::new_v4()),
        })
        .await
        .expect_err("unknown room rejected");
    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "No room were found");
}

#[tokio::test]
async fn create_links_room_and_room_reports_subject_back() {
    let store = MemoryStore::new();
    let rooms: crate::domain::ports::RoomRepo =
        Arc::new(InMemoryRoomRepository::new(store.clone()));
    let students = StudentService::new(Arc::new(InMemoryStudentRepository::new(store.clone())));
    let subjects = SubjectService::new(
        Arc::new(InMemorySubjectRepository::new(store.clone())),
        rooms.clone(),
        students,
    );

    let room = rooms
        .create(crate::domain::Room::new(12, 40, Vec::new()))
        .await
        .expect("seed room");

    let subject = subjects
        .create(NewSubject {
            name: "Algebra".to_owned(),
            taught_by: "T1".to_owned(),
            room_id: Some(room.id),
        })
        .await
        .expect("create with room");
    assert_eq!(subject.room.map(|link| link.id), Some(room.id));

    let error = subjects
        .create(NewSubject {
            name: "Geometry".to_owned(),
            taught_by: "T2".to_owned(),
            room_id: Some(room.id),
        })
        .await
        .expect_err("room already linked");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}
