//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{
    profiles, room_specifications, rooms, specifications, students, subject_students, subjects,
};

// ---------------------------------------------------------------------------
// Profile models
// ---------------------------------------------------------------------------

/// Row struct for reading from the profiles table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProfileRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_digest: String,
    pub account_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new profile records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = profiles)]
pub(crate) struct NewProfileRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub password_digest: &'a str,
    pub account_type: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset struct for updating existing profile records.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = profiles)]
pub(crate) struct ProfileUpdate<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password_digest: &'a str,
    pub account_type: &'a str,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Student models
// ---------------------------------------------------------------------------

/// Row struct for reading from the students table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = students)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct StudentRow {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new student records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = students)]
pub(crate) struct NewStudentRow {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset struct for updating existing student records.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = students)]
pub(crate) struct StudentUpdate {
    pub profile_id: Uuid,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Subject models
// ---------------------------------------------------------------------------

/// Row struct for reading from the subjects table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = subjects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SubjectRow {
    pub id: Uuid,
    pub name: String,
    pub taught_by: String,
    pub room_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new subject records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = subjects)]
pub(crate) struct NewSubjectRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub taught_by: &'a str,
    pub room_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset struct for updating existing subject records.
///
/// `treat_none_as_null` matters here: a full replace with no room must clear
/// the join column rather than leave the previous link behind.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = subjects)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct SubjectUpdate<'a> {
    pub name: &'a str,
    pub taught_by: &'a str,
    pub room_id: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Room models
// ---------------------------------------------------------------------------

/// Row struct for reading from the rooms table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = rooms)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RoomRow {
    pub id: Uuid,
    pub number: i32,
    pub capacity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new room records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = rooms)]
pub(crate) struct NewRoomRow {
    pub id: Uuid,
    pub number: i32,
    pub capacity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset struct for updating existing room records.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = rooms)]
pub(crate) struct RoomUpdate {
    pub number: i32,
    pub capacity: i32,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Specification models
// ---------------------------------------------------------------------------

/// Row struct for reading from the specifications table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = specifications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SpecificationRow {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new specification records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = specifications)]
pub(crate) struct NewSpecificationRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset struct for updating existing specification records.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = specifications)]
pub(crate) struct SpecificationUpdate<'a> {
    pub name: &'a str,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Join table models
// ---------------------------------------------------------------------------

/// Insertable struct for enrollment join rows.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = subject_students)]
pub(crate) struct NewSubjectStudentRow {
    pub subject_id: Uuid,
    pub student_id: Uuid,
    pub enrolled_at: DateTime<Utc>,
}

/// Insertable struct for room↔specification join rows.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = room_specifications)]
pub(crate) struct NewRoomSpecificationRow {
    pub room_id: Uuid,
    pub specification_id: Uuid,
}
