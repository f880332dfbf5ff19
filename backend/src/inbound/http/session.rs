//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Authentication stores a [`SessionIdentity`] in the cookie session; the
//! role-gate helpers on [`SessionContext`] are the only auth checks handlers
//! perform. The identity is resolved before any service call, so the domain
//! can trust it as pre-validated.

use actix_session::Session;
use actix_web::{dev::Payload, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{AccountType, Error};

pub(crate) const IDENTITY_KEY: &str = "identity";

/// Caller identity persisted in the session cookie after authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionIdentity {
    /// Authenticated profile.
    pub profile_id: Uuid,
    /// Account category of the profile.
    pub account_type: AccountType,
    /// Owned student record, present for STUDENT accounts.
    pub student_id: Option<Uuid>,
}

/// Caller identity narrowed to a student account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StudentIdentity {
    /// Authenticated profile.
    pub profile_id: Uuid,
    /// The caller's own student record.
    pub student_id: Uuid,
}

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated caller's identity in the session cookie.
    pub fn persist_identity(&self, identity: &SessionIdentity) -> Result<(), Error> {
        self.0
            .insert(IDENTITY_KEY, identity)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the current identity from the session, if present.
    pub fn identity(&self) -> Result<Option<SessionIdentity>, Error> {
        self.0
            .get::<SessionIdentity>(IDENTITY_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))
    }

    /// Require an authenticated caller or fail with `401 Unauthorized`.
    pub fn require_identity(&self) -> Result<SessionIdentity, Error> {
        self.identity()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Require an authenticated caller of the given account type or fail
    /// with `403 Forbidden`.
    pub fn require_account(&self, account_type: AccountType) -> Result<SessionIdentity, Error> {
        let identity = self.require_identity()?;
        if identity.account_type != account_type {
            return Err(Error::forbidden("insufficient account privileges"));
        }
        Ok(identity)
    }

    /// Require an authenticated STUDENT caller and resolve their own
    /// student id.
    pub fn require_student(&self) -> Result<StudentIdentity, Error> {
        let identity = self.require_account(AccountType::Student)?;
        let student_id = identity
            .student_id
            .ok_or_else(|| Error::forbidden("profile has no student record"))?;
        Ok(StudentIdentity {
            profile_id: identity.profile_id,
            student_id,
        })
    }

    /// Drop the whole session, logging the caller out.
    pub fn purge(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App, HttpResponse};

    use super::*;

    #[actix_web::test]
    async fn round_trips_identity_and_gates_roles() {
        let app = test::init_service(
            App::new()
                .wrap(crate::inbound::http::test_utils::test_session_middleware())
                .route(
                    "/login",
                    web::get().to(|session: SessionContext| async move {
                        session.persist_identity(&SessionIdentity {
                            profile_id: Uuid::new_v4(),
                            account_type: AccountType::Student,
                            student_id: Some(Uuid::new_v4()),
                        })?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                )
                .route(
                    "/student-only",
                    web::get().to(|session: SessionContext| async move {
                        session.require_student()?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                )
                .route(
                    "/admin-only",
                    web::get().to(|session: SessionContext| async move {
                        session.require_account(AccountType::Admin)?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                ),
        )
        .await;

        // Unauthenticated access is rejected outright.
        let anonymous = test::call_service(
            &app,
            test::TestRequest::get().uri("/student-only").to_request(),
        )
        .await;
        assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

        let login =
            test::call_service(&app, test::TestRequest::get().uri("/login").to_request()).await;
        assert_eq!(login.status(), StatusCode::OK);
        let cookie = login
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "id")
            .expect("session cookie set")
            .into_owned();

        let student = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/student-only")
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        assert_eq!(student.status(), StatusCode::OK);

        // A student session does not pass the admin gate.
        let admin = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/admin-only")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(admin.status(), StatusCode::FORBIDDEN);
    }
}
