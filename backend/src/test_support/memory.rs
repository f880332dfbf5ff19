//! In-memory repository adapters backed by a shared table store.
//!
//! One [`MemoryStore`] plays the role of the database: normalised entity
//! tables plus the two join tables and the subject→room join column, all
//! behind a single mutex. The per-entity repositories honour the full port
//! contract — uniqueness constraints, missing-record failures, cascade and
//! set-null policies — so services behave identically over this fake and the
//! PostgreSQL adapter.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::PageWindow;
use uuid::Uuid;

use crate::domain::ports::{
    ProfileCriteria, Repository, RepositoryError, RoomCriteria, SpecificationCriteria,
    StudentCriteria, SubjectCriteria,
};
use crate::domain::{
    EnrolledStudent, EnrolledSubject, Profile, Room, RoomLink, Specification, Student,
    StudentLink, Subject, SubjectLink,
};

#[derive(Debug, Clone)]
struct StudentRecord {
    id: Uuid,
    profile_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct SubjectRecord {
    id: Uuid,
    name: String,
    taught_by: String,
    room_id: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct RoomRecord {
    id: Uuid,
    number: i32,
    capacity: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Normalised tables; the join vectors keep insertion order, which is the
/// listing order of relation collections.
#[derive(Debug, Default)]
struct Tables {
    profiles: HashMap<Uuid, Profile>,
    students: HashMap<Uuid, StudentRecord>,
    subjects: HashMap<Uuid, SubjectRecord>,
    rooms: HashMap<Uuid, RoomRecord>,
    specifications: HashMap<Uuid, Specification>,
    subject_students: Vec<(Uuid, Uuid)>,
    room_specifications: Vec<(Uuid, Uuid)>,
}

impl Tables {
    fn profile_from(&self, profile: &Profile) -> Profile {
        let student = self
            .students
            .values()
            .find(|student| student.profile_id == profile.id)
            .map(|student| StudentLink { id: student.id });
        Profile {
            student,
            ..profile.clone()
        }
    }

    fn student_from(&self, record: &StudentRecord) -> Student {
        let subjects = self
            .subject_students
            .iter()
            .filter(|(_, student_id)| *student_id == record.id)
            .filter_map(|(subject_id, _)| self.subjects.get(subject_id))
            .map(|subject| EnrolledSubject {
                id: subject.id,
                name: subject.name.clone(),
            })
            .collect();
        Student {
            id: record.id,
            profile_id: record.profile_id,
            subjects,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }

    fn subject_from(&self, record: &SubjectRecord) -> Subject {
        let room = record
            .room_id
            .and_then(|room_id| self.rooms.get(&room_id))
            .map(|room| RoomLink {
                id: room.id,
                number: room.number,
                capacity: room.capacity,
            });
        let enrolled_students = self
            .subject_students
            .iter()
            .filter(|(subject_id, _)| *subject_id == record.id)
            .filter_map(|(_, student_id)| self.students.get(student_id))
            .map(|student| EnrolledStudent {
                id: student.id,
                profile_id: student.profile_id,
            })
            .collect();
        Subject {
            id: record.id,
            name: record.name.clone(),
            taught_by: record.taught_by.clone(),
            room,
            enrolled_students,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }

    fn room_from(&self, record: &RoomRecord) -> Room {
        let specifications = self
            .room_specifications
            .iter()
            .filter(|(room_id, _)| *room_id == record.id)
            .filter_map(|(_, specification_id)| self.specifications.get(specification_id))
            .cloned()
            .collect();
        let subject = self
            .subjects
            .values()
            .find(|subject| subject.room_id == Some(record.id))
            .map(|subject| SubjectLink {
                id: subject.id,
                name: subject.name.clone(),
                taught_by: subject.taught_by.clone(),
            });
        Room {
            id: record.id,
            number: record.number,
            capacity: record.capacity,
            specifications,
            subject,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }

    fn replace_subject_students(
        &mut self,
        subject_id: Uuid,
        members: &[EnrolledStudent],
    ) -> Result<(), RepositoryError> {
        self.subject_students
            .retain(|(existing, _)| *existing != subject_id);

        for member in members {
            if !self.students.contains_key(&member.id) {
                return Err(RepositoryError::query(format!(
                    "foreign key violation: no student {}",
                    member.id
                )));
            }
            let pair = (subject_id, member.id);
            if self.subject_students.contains(&pair) {
                return Err(RepositoryError::duplicate("subject_students_pkey"));
            }
            self.subject_students.push(pair);
        }
        Ok(())
    }

    fn replace_room_specifications(
        &mut self,
        room_id: Uuid,
        specifications: &[Specification],
    ) -> Result<(), RepositoryError> {
        self.room_specifications
            .retain(|(existing, _)| *existing != room_id);

        for specification in specifications {
            if !self.specifications.contains_key(&specification.id) {
                return Err(RepositoryError::query(format!(
                    "foreign key violation: no specification {}",
                    specification.id
                )));
            }
            let pair = (room_id, specification.id);
            if self.room_specifications.contains(&pair) {
                return Err(RepositoryError::duplicate("room_specifications_pkey"));
            }
            self.room_specifications.push(pair);
        }
        Ok(())
    }
}

/// Shared in-memory database standing in for PostgreSQL in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().expect("memory store mutex poisoned")
    }
}

fn sorted_by_creation<E>(mut entities: Vec<(DateTime<Utc>, Uuid, E)>, window: PageWindow) -> Vec<E> {
    entities.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));
    entities
        .into_iter()
        .skip(usize::try_from(window.skip()).unwrap_or(usize::MAX))
        .take(usize::try_from(window.take()).unwrap_or(usize::MAX))
        .map(|(_, _, entity)| entity)
        .collect()
}

/// In-memory profile repository.
#[derive(Clone)]
pub struct InMemoryProfileRepository {
    store: Arc<MemoryStore>,
}

impl InMemoryProfileRepository {
    /// Create a repository over the shared store.
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Repository for InMemoryProfileRepository {
    type Entity = Profile;
    type Criteria = ProfileCriteria;

    async fn create(&self, data: Profile) -> Result<Profile, RepositoryError> {
        let mut tables = self.store.tables();
        if tables
            .profiles
            .values()
            .any(|profile| profile.email == data.email)
        {
            return Err(RepositoryError::duplicate("profiles_email_key"));
        }
        let stored = Profile {
            student: None,
            ..data
        };
        tables.profiles.insert(stored.id, stored.clone());
        Ok(tables.profile_from(&stored))
    }

    async fn find(&self, criteria: ProfileCriteria) -> Result<Option<Profile>, RepositoryError> {
        let tables = self.store.tables();
        let profile = match criteria {
            ProfileCriteria::Id(id) => tables.profiles.get(&id),
            ProfileCriteria::Email(email) => tables
                .profiles
                .values()
                .find(|profile| profile.email == email),
        };
        Ok(profile.map(|profile| tables.profile_from(profile)))
    }

    async fn list(&self, window: PageWindow) -> Result<Vec<Profile>, RepositoryError> {
        let tables = self.store.tables();
        let entities = tables
            .profiles
            .values()
            .map(|profile| (profile.created_at, profile.id, tables.profile_from(profile)))
            .collect();
        Ok(sorted_by_creation(entities, window))
    }

    async fn update(&self, data: Profile) -> Result<(), RepositoryError> {
        let mut tables = self.store.tables();
        if tables
            .profiles
            .values()
            .any(|profile| profile.id != data.id && profile.email == data.email)
        {
            return Err(RepositoryError::duplicate("profiles_email_key"));
        }
        if !tables.profiles.contains_key(&data.id) {
            return Err(RepositoryError::missing(format!("no profile {}", data.id)));
        }
        let stored = Profile {
            student: None,
            updated_at: Utc::now(),
            ..data
        };
        tables.profiles.insert(stored.id, stored);
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let mut tables = self.store.tables();
        if tables.profiles.remove(&id).is_none() {
            return Err(RepositoryError::missing(format!("no profile {id}")));
        }
        // Cascade: the owned student record and its enrollments go with the
        // profile.
        let owned: Vec<Uuid> = tables
            .students
            .values()
            .filter(|student| student.profile_id == id)
            .map(|student| student.id)
            .collect();
        for student_id in owned {
            tables.students.remove(&student_id);
            tables
                .subject_students
                .retain(|(_, enrolled)| *enrolled != student_id);
        }
        Ok(())
    }
}

/// In-memory student repository.
#[derive(Clone)]
pub struct InMemoryStudentRepository {
    store: Arc<MemoryStore>,
}

impl InMemoryStudentRepository {
    /// Create a repository over the shared store.
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Repository for InMemoryStudentRepository {
    type Entity = Student;
    type Criteria = StudentCriteria;

    async fn create(&self, data: Student) -> Result<Student, RepositoryError> {
        let mut tables = self.store.tables();
        if tables
            .students
            .values()
            .any(|student| student.profile_id == data.profile_id)
        {
            return Err(RepositoryError::duplicate("students_profile_id_key"));
        }
        let record = StudentRecord {
            id: data.id,
            profile_id: data.profile_id,
            created_at: data.created_at,
            updated_at: data.updated_at,
        };
        tables.students.insert(record.id, record.clone());
        Ok(tables.student_from(&record))
    }

    async fn find(&self, criteria: StudentCriteria) -> Result<Option<Student>, RepositoryError> {
        let tables = self.store.tables();
        let record = match criteria {
            StudentCriteria::Id(id) => tables.students.get(&id),
            StudentCriteria::Profile(profile_id) => tables
                .students
                .values()
                .find(|student| student.profile_id == profile_id),
        };
        Ok(record.map(|record| tables.student_from(record)))
    }

    async fn list(&self, window: PageWindow) -> Result<Vec<Student>, RepositoryError> {
        let tables = self.store.tables();
        let entities = tables
            .students
            .values()
            .map(|record| (record.created_at, record.id, tables.student_from(record)))
            .collect();
        Ok(sorted_by_creation(entities, window))
    }

    async fn update(&self, data: Student) -> Result<(), RepositoryError> {
        let mut tables = self.store.tables();
        let Some(record) = tables.students.get_mut(&data.id) else {
            return Err(RepositoryError::missing(format!("no student {}", data.id)));
        };
        record.profile_id = data.profile_id;
        record.updated_at = Utc::now();
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let mut tables = self.store.tables();
        if tables.students.remove(&id).is_none() {
            return Err(RepositoryError::missing(format!("no student {id}")));
        }
        tables
            .subject_students
            .retain(|(_, student_id)| *student_id != id);
        Ok(())
    }
}

/// In-memory subject repository.
#[derive(Clone)]
pub struct InMemorySubjectRepository {
    store: Arc<MemoryStore>,
}

impl InMemorySubjectRepository {
    /// Create a repository over the shared store.
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Repository for InMemorySubjectRepository {
    type Entity = Subject;
    type Criteria = SubjectCriteria;

    async fn create(&self, data: Subject) -> Result<Subject, RepositoryError> {
        let mut tables = self.store.tables();
        if tables
            .subjects
            .values()
            .any(|subject| subject.name == data.name)
        {
            return Err(RepositoryError::duplicate("subjects_name_key"));
        }
        let room_id = data.room.as_ref().map(|room| room.id);
        if let Some(room_id) = room_id {
            if tables
                .subjects
                .values()
                .any(|subject| subject.room_id == Some(room_id))
            {
                return Err(RepositoryError::duplicate("subjects_room_id_key"));
            }
        }
        let record = SubjectRecord {
            id: data.id,
            name: data.name.clone(),
            taught_by: data.taught_by.clone(),
            room_id,
            created_at: data.created_at,
            updated_at: data.updated_at,
        };
        tables.subjects.insert(record.id, record.clone());
        tables.replace_subject_students(record.id, &data.enrolled_students)?;
        Ok(tables.subject_from(&record))
    }

    async fn find(&self, criteria: SubjectCriteria) -> Result<Option<Subject>, RepositoryError> {
        let tables = self.store.tables();
        let record = match criteria {
            SubjectCriteria::Id(id) => tables.subjects.get(&id),
            SubjectCriteria::Name(name) => tables
                .subjects
                .values()
                .find(|subject| subject.name == name),
        };
        Ok(record.map(|record| tables.subject_from(record)))
    }

    async fn list(&self, window: PageWindow) -> Result<Vec<Subject>, RepositoryError> {
        let tables = self.store.tables();
        let entities = tables
            .subjects
            .values()
            .map(|record| (record.created_at, record.id, tables.subject_from(record)))
            .collect();
        Ok(sorted_by_creation(entities, window))
    }

    async fn update(&self, data: Subject) -> Result<(), RepositoryError> {
        let mut tables = self.store.tables();
        if !tables.subjects.contains_key(&data.id) {
            return Err(RepositoryError::missing(format!("no subject {}", data.id)));
        }
        if tables
            .subjects
            .values()
            .any(|subject| subject.id != data.id && subject.name == data.name)
        {
            return Err(RepositoryError::duplicate("subjects_name_key"));
        }
        let room_id = data.room.as_ref().map(|room| room.id);
        if let Some(room_id) = room_id {
            if tables
                .subjects
                .values()
                .any(|subject| subject.id != data.id && subject.room_id == Some(room_id))
            {
                return Err(RepositoryError::duplicate("subjects_room_id_key"));
            }
        }

        tables.replace_subject_students(data.id, &data.enrolled_students)?;

        let Some(record) = tables.subjects.get_mut(&data.id) else {
            return Err(RepositoryError::missing(format!("no subject {}", data.id)));
        };
        record.name = data.name;
        record.taught_by = data.taught_by;
        record.room_id = room_id;
        record.updated_at = Utc::now();
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let mut tables = self.store.tables();
        if tables.subjects.remove(&id).is_none() {
            return Err(RepositoryError::missing(format!("no subject {id}")));
        }
        tables
            .subject_students
            .retain(|(subject_id, _)| *subject_id != id);
        Ok(())
    }
}

/// In-memory room repository.
#[derive(Clone)]
pub struct InMemoryRoomRepository {
    store: Arc<MemoryStore>,
}

impl InMemoryRoomRepository {
    /// Create a repository over the shared store.
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Repository for InMemoryRoomRepository {
    type Entity = Room;
    type Criteria = RoomCriteria;

    async fn create(&self, data: Room) -> Result<Room, RepositoryError> {
        let mut tables = self.store.tables();
        let record = RoomRecord {
            id: data.id,
            number: data.number,
            capacity: data.capacity,
            created_at: data.created_at,
            updated_at: data.updated_at,
        };
        tables.rooms.insert(record.id, record.clone());
        tables.replace_room_specifications(record.id, &data.specifications)?;
        Ok(tables.room_from(&record))
    }

    async fn find(&self, criteria: RoomCriteria) -> Result<Option<Room>, RepositoryError> {
        let tables = self.store.tables();
        let RoomCriteria::Id(id) = criteria;
        Ok(tables.rooms.get(&id).map(|record| tables.room_from(record)))
    }

    async fn list(&self, window: PageWindow) -> Result<Vec<Room>, RepositoryError> {
        let tables = self.store.tables();
        let entities = tables
            .rooms
            .values()
            .map(|record| (record.created_at, record.id, tables.room_from(record)))
            .collect();
        Ok(sorted_by_creation(entities, window))
    }

    async fn update(&self, data: Room) -> Result<(), RepositoryError> {
        let mut tables = self.store.tables();
        if !tables.rooms.contains_key(&data.id) {
            return Err(RepositoryError::missing(format!("no room {}", data.id)));
        }
        tables.replace_room_specifications(data.id, &data.specifications)?;
        let Some(record) = tables.rooms.get_mut(&data.id) else {
            return Err(RepositoryError::missing(format!("no room {}", data.id)));
        };
        record.number = data.number;
        record.capacity = data.capacity;
        record.updated_at = Utc::now();
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let mut tables = self.store.tables();
        if tables.rooms.remove(&id).is_none() {
            return Err(RepositoryError::missing(format!("no room {id}")));
        }
        // Set-null detach: the linked subject survives, only its room link
        // is cleared.
        for subject in tables.subjects.values_mut() {
            if subject.room_id == Some(id) {
                subject.room_id = None;
            }
        }
        tables
            .room_specifications
            .retain(|(room_id, _)| *room_id != id);
        Ok(())
    }
}

/// In-memory specification repository.
#[derive(Clone)]
pub struct InMemorySpecificationRepository {
    store: Arc<MemoryStore>,
}

impl InMemorySpecificationRepository {
    /// Create a repository over the shared store.
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Repository for InMemorySpecificationRepository {
    type Entity = Specification;
    type Criteria = SpecificationCriteria;

    async fn create(&self, data: Specification) -> Result<Specification, RepositoryError> {
        let mut tables = self.store.tables();
        tables.specifications.insert(data.id, data.clone());
        Ok(data)
    }

    async fn find(
        &self,
        criteria: SpecificationCriteria,
    ) -> Result<Option<Specification>, RepositoryError> {
        let tables = self.store.tables();
        let SpecificationCriteria::Id(id) = criteria;
        Ok(tables.specifications.get(&id).cloned())
    }

    async fn list(&self, window: PageWindow) -> Result<Vec<Specification>, RepositoryError> {
        let tables = self.store.tables();
        let entities = tables
            .specifications
            .values()
            .map(|specification| {
                (
                    specification.created_at,
                    specification.id,
                    specification.clone(),
                )
            })
            .collect();
        Ok(sorted_by_creation(entities, window))
    }

    async fn update(&self, data: Specification) -> Result<(), RepositoryError> {
        let mut tables = self.store.tables();
        let Some(stored) = tables.specifications.get_mut(&data.id) else {
            return Err(RepositoryError::missing(format!(
                "no specification {}",
                data.id
            )));
        };
        stored.name = data.name;
        stored.updated_at = Utc::now();
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let mut tables = self.store.tables();
        if tables.specifications.remove(&id).is_none() {
            return Err(RepositoryError::missing(format!("no specification {id}")));
        }
        tables
            .room_specifications
            .retain(|(_, specification_id)| *specification_id != id);
        Ok(())
    }
}
