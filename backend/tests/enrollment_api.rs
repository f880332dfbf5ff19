//! End-to-end enrollment flow over the HTTP surface.
//!
//! Drives the full scenario against the in-memory repositories: admin
//! provisions a subject, a student enrolls, double-enrollment and stray
//! cancellation are rejected, and the enrollment round-trip leaves the
//! subject's collection empty.

use actix_web::body::MessageBody;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use serde_json::{json, Value};

use classroom_backend::inbound::http::{self, test_utils};
use classroom_backend::Trace;

const SESSION_COOKIE: &str = "id";

async fn create_profile<S, B>(app: &S, name: &str, email: &str, account_type: &str)
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/profiles")
            .set_json(json!({
                "name": name,
                "email": email,
                "password": "secret",
                "accountType": account_type,
            }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
}

async fn login<S, B>(app: &S, email: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/profiles/auth")
            .set_json(json!({ "email": email, "password": "secret" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .expect("session cookie set")
        .into_owned()
}

#[actix_web::test]
async fn full_enrollment_scenario() {
    let (_store, state) = test_utils::memory_state();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .wrap(Trace)
            .service(
                web::scope("/api/v1")
                    .wrap(test_utils::test_session_middleware())
                    .configure(http::configure),
            ),
    )
    .await;

    // Subject creation requires authentication.
    let anonymous = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/subjects")
            .set_json(json!({ "name": "Algebra", "taughtBy": "T1" }))
            .to_request(),
    )
    .await;
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    create_profile(&app, "Root", "root@example.com", "ADMIN").await;
    let admin = login(&app, "root@example.com").await;

    create_profile(&app, "Ada", "ada@example.com", "STUDENT").await;
    let student = login(&app, "ada@example.com").await;

    // A student account cannot create subjects.
    let forbidden = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/subjects")
            .cookie(student.clone())
            .set_json(json!({ "name": "Algebra", "taughtBy": "T1" }))
            .to_request(),
    )
    .await;
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

    // Admin creates the subject.
    let created = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/subjects")
            .cookie(admin.clone())
            .set_json(json!({ "name": "Algebra", "taughtBy": "T1" }))
            .to_request(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let subject: Value = test::read_body_json(created).await;
    let subject_id = subject["id"].as_str().expect("generated id").to_owned();
    assert_eq!(subject["enrolledStudents"], json!([]));

    // The same name cannot be created twice.
    let duplicate = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/subjects")
            .cookie(admin.clone())
            .set_json(json!({ "name": "Algebra", "taughtBy": "T2" }))
            .to_request(),
    )
    .await;
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);
    let payload: Value = test::read_body_json(duplicate).await;
    assert_eq!(payload["code"], "duplicate_entity");
    assert_eq!(payload["message"], "Subject already exists with the given name");

    // Enrollment is a student-only operation.
    let admin_enroll = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/subjects/enroll/{subject_id}"))
            .cookie(admin.clone())
            .to_request(),
    )
    .await;
    assert_eq!(admin_enroll.status(), StatusCode::FORBIDDEN);

    // The student enrolls once.
    let enrolled = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/subjects/enroll/{subject_id}"))
            .cookie(student.clone())
            .to_request(),
    )
    .await;
    assert_eq!(enrolled.status(), StatusCode::CREATED);
    let enrolled_subject: Value = test::read_body_json(enrolled).await;
    assert_eq!(
        enrolled_subject["enrolledStudents"]
            .as_array()
            .expect("array")
            .len(),
        1
    );

    // A second enrollment attempt is rejected and changes nothing.
    let again = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/subjects/enroll/{subject_id}"))
            .cookie(student.clone())
            .to_request(),
    )
    .await;
    assert_eq!(again.status(), StatusCode::CONFLICT);
    let payload: Value = test::read_body_json(again).await;
    assert_eq!(payload["code"], "duplicate_enrollment");

    let fetched = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/subjects/{subject_id}"))
            .cookie(student.clone())
            .to_request(),
    )
    .await;
    assert_eq!(fetched.status(), StatusCode::OK);
    let fetched_subject: Value = test::read_body_json(fetched).await;
    assert_eq!(
        fetched_subject["enrolledStudents"]
            .as_array()
            .expect("array")
            .len(),
        1
    );

    // Cancellation succeeds and empties the collection.
    let cancelled = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/subjects/enroll/{subject_id}/cancel"))
            .cookie(student.clone())
            .to_request(),
    )
    .await;
    assert_eq!(cancelled.status(), StatusCode::OK);
    let payload: Value = test::read_body_json(cancelled).await;
    assert_eq!(payload["code"], 200);
    assert_eq!(payload["message"], "Enrollment successfully canceled");

    let emptied = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/subjects/{subject_id}"))
            .cookie(student.clone())
            .to_request(),
    )
    .await;
    let emptied_subject: Value = test::read_body_json(emptied).await;
    assert_eq!(emptied_subject["enrolledStudents"], json!([]));

    // Cancelling again is an error, not a silent success.
    let stray = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/subjects/enroll/{subject_id}/cancel"))
            .cookie(student)
            .to_request(),
    )
    .await;
    assert_eq!(stray.status(), StatusCode::CONFLICT);
    let payload: Value = test::read_body_json(stray).await;
    assert_eq!(payload["code"], "not_enrolled");
    assert_eq!(payload["message"], "Student is not enrolled in this subject");
}

#[actix_web::test]
async fn unknown_subject_lookup_is_a_404() {
    let (_store, state) = test_utils::memory_state();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .wrap(Trace)
            .service(
                web::scope("/api/v1")
                    .wrap(test_utils::test_session_middleware())
                    .configure(http::configure),
            ),
    )
    .await;

    create_profile(&app, "Root", "root@example.com", "ADMIN").await;
    let admin = login(&app, "root@example.com").await;

    let missing = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!(
                "/api/v1/subjects/{}",
                uuid::Uuid::new_v4()
            ))
            .cookie(admin)
            .to_request(),
    )
    .await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    let payload: Value = test::read_body_json(missing).await;
    assert_eq!(payload["code"], "not_found");
    assert_eq!(payload["message"], "No subject were found");
}
