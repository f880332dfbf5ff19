//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the deployed schema exactly; they are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//! Relation policies live in the database constraints: `subjects.room_id` is
//! unique (1:1) with `ON DELETE SET NULL`, `students.profile_id` is unique
//! with `ON DELETE CASCADE`, the join tables carry composite primary keys
//! and cascade on both sides. The composite key on `subject_students` is the
//! authoritative duplicate-enrollment guard.

diesel::table! {
    /// User accounts with their account type.
    profiles (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Display name.
        name -> Varchar,
        /// Login e-mail, unique.
        email -> Varchar,
        /// Opaque credential digest.
        password_digest -> Varchar,
        /// Account category (`ADMIN` or `STUDENT`).
        account_type -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Student records, one per STUDENT profile.
    students (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owning profile; unique, cascades on profile deletion.
        profile_id -> Uuid,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Taught subjects.
    subjects (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Subject name, unique.
        name -> Text,
        /// Instructor identifier.
        taught_by -> Text,
        /// Join column of the subject↔room 1:1 link; unique, set to null
        /// when the room is deleted.
        room_id -> Nullable<Uuid>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Physical rooms.
    rooms (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Room number.
        number -> Int4,
        /// Seating capacity (defaults to 40 at the application layer).
        capacity -> Int4,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Room amenities.
    specifications (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Amenity name.
        name -> Text,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Join table for the room↔specification many-to-many relation.
    room_specifications (room_id, specification_id) {
        /// Referenced room; cascades on deletion.
        room_id -> Uuid,
        /// Referenced specification; cascades on deletion.
        specification_id -> Uuid,
    }
}

diesel::table! {
    /// Join table for the subject↔student many-to-many relation
    /// (enrollment). The composite primary key rejects duplicate
    /// enrollments that race past the service-level membership check.
    subject_students (subject_id, student_id) {
        /// Referenced subject; cascades on deletion.
        subject_id -> Uuid,
        /// Referenced student; cascades on deletion.
        student_id -> Uuid,
        /// Enrollment timestamp, used for stable listing order.
        enrolled_at -> Timestamptz,
    }
}

diesel::joinable!(students -> profiles (profile_id));
diesel::joinable!(subjects -> rooms (room_id));
diesel::joinable!(subject_students -> subjects (subject_id));
diesel::joinable!(subject_students -> students (student_id));
diesel::joinable!(room_specifications -> rooms (room_id));
diesel::joinable!(room_specifications -> specifications (specification_id));

diesel::allow_tables_to_appear_in_same_query!(
    profiles,
    students,
    subjects,
    rooms,
    specifications,
    room_specifications,
    subject_students,
);
