//! Tests for the profile service.

use std::sync::Arc;

use uuid::Uuid;

use super::*;
use crate::domain::ports::{Repository, StudentCriteria};
use crate::domain::ErrorCode;
use crate::test_support::{InMemoryProfileRepository, InMemoryStudentRepository, MemoryStore};

struct Harness {
    profiles: ProfileService,
    students: Arc<InMemoryStudentRepository>,
}

fn harness() -> Harness {
    let store = MemoryStore::new();
    let students = Arc::new(InMemoryStudentRepository::new(store.clone()));
    let profiles = ProfileService::new(
        Arc::new(InMemoryProfileRepository::new(store)),
        students.clone(),
    );
    Harness { profiles, students }
}

fn new_profile(email: &str, account_type: AccountType) -> NewProfile {
    NewProfile {
        name: "Ada".to_owned(),
        email: email.to_owned(),
        password: "correct horse".to_owned(),
        account_type,
    }
}

#[tokio::test]
async fn student_profile_creation_embeds_owned_student() {
    let harness = harness();
    let profile = harness
        .profiles
        .create(new_profile("ada@example.com", AccountType::Student))
        .await
        .expect("create succeeds");

    let student_link = profile.student.expect("student record embedded");
    let student = harness
        .students
        .find(StudentCriteria::Id(student_link.id))
        .await
        .expect("lookup succeeds")
        .expect("student persisted");
    assert_eq!(student.profile_id, profile.id);
}

#[tokio::test]
async fn admin_profile_creation_owns_no_student() {
    let harness = harness();
    let profile = harness
        .profiles
        .create(new_profile("root@example.com", AccountType::Admin))
        .await
        .expect("create succeeds");
    assert!(profile.student.is_none());
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let harness = harness();
    harness
        .profiles
        .create(new_profile("ada@example.com", AccountType::Admin))
        .await
        .expect("first create succeeds");

    let error = harness
        .profiles
        .create(new_profile("ada@example.com", AccountType::Student))
        .await
        .expect_err("duplicate e-mail rejected");
    assert_eq!(error.code(), ErrorCode::DuplicateEntity);
    assert_eq!(
        error.message(),
        "Profile already exists with the given e-mail"
    );
}

#[tokio::test]
async fn authenticate_accepts_matching_credentials() {
    let harness = harness();
    let created = harness
        .profiles
        .create(new_profile("ada@example.com", AccountType::Admin))
        .await
        .expect("create succeeds");

    let profile = harness
        .profiles
        .authenticate("ada@example.com", "correct horse")
        .await
        .expect("authentication succeeds");
    assert_eq!(profile.id, created.id);
}

#[tokio::test]
async fn authenticate_rejects_wrong_password_and_unknown_email_identically() {
    let harness = harness();
    harness
        .profiles
        .create(new_profile("ada@example.com", AccountType::Admin))
        .await
        .expect("create succeeds");

    let wrong_password = harness
        .profiles
        .authenticate("ada@example.com", "battery staple")
        .await
        .expect_err("wrong password rejected");
    let unknown_email = harness
        .profiles
        .authenticate("ghost@example.com", "correct horse")
        .await
        .expect_err("unknown e-mail rejected");

    assert_eq!(wrong_password.code(), ErrorCode::Unauthorized);
    assert_eq!(wrong_password, unknown_email);
}

#[tokio::test]
async fn delete_requires_an_existing_profile() {
    let harness = harness();
    let error = harness
        .profiles
        .delete(Uuid::new_v4())
        .await
        .expect_err("missing profile rejected");
    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "No profile were found");
}

#[tokio::test]
async fn delete_cascades_into_the_owned_student() {
    let harness = harness();
    let profile = harness
        .profiles
        .create(new_profile("ada@example.com", AccountType::Student))
        .await
        .expect("create succeeds");
    let student_link = profile.student.expect("student record embedded");

    harness
        .profiles
        .delete(profile.id)
        .await
        .expect("delete succeeds");

    let student = harness
        .students
        .find(StudentCriteria::Id(student_link.id))
        .await
        .expect("lookup succeeds");
    assert!(student.is_none());
}
