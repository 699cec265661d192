use async_trait::async_trait;
use edu_core::model::{Course, CourseId, LiveClass, LiveClassId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("invalid seed data: {0}")]
    Seed(#[from] edu_core::Error),
}

/// Read/write access to the course catalog.
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Insert or replace a course.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the course cannot be stored.
    async fn upsert_course(&self, course: &Course) -> Result<(), StorageError>;

    /// Fetch a course by ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing, or other storage errors.
    async fn get_course(&self, id: &CourseId) -> Result<Course, StorageError>;

    /// All courses in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the catalog cannot be read.
    async fn list_courses(&self) -> Result<Vec<Course>, StorageError>;
}

#[async_trait]
pub trait LiveClassRepository: Send + Sync {
    /// Insert or replace a live class.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the class cannot be stored.
    async fn upsert_live_class(&self, class: &LiveClass) -> Result<(), StorageError>;

    /// Fetch a live class by ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing, or other storage errors.
    async fn get_live_class(&self, id: &LiveClassId) -> Result<LiveClass, StorageError>;

    /// All live classes in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the schedule cannot be read.
    async fn list_live_classes(&self) -> Result<Vec<LiveClass>, StorageError>;
}

/// Insertion-ordered map guarded by a mutex.
struct Table<K, V> {
    order: Vec<K>,
    rows: HashMap<K, V>,
}

impl<K, V> Default for Table<K, V> {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            rows: HashMap::new(),
        }
    }
}

impl<K: Clone + Eq + std::hash::Hash, V: Clone> Table<K, V> {
    fn upsert(&mut self, key: K, value: V) {
        if self.rows.insert(key.clone(), value).is_none() {
            self.order.push(key);
        }
    }

    fn get(&self, key: &K) -> Option<V> {
        self.rows.get(key).cloned()
    }

    fn list(&self) -> Vec<V> {
        self.order
            .iter()
            .filter_map(|key| self.rows.get(key).cloned())
            .collect()
    }
}

/// Simple in-memory repository implementation; the only backend.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    courses: Arc<Mutex<Table<CourseId, Course>>>,
    live_classes: Arc<Mutex<Table<LiveClassId, LiveClass>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-filled with the bundled sample catalog.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Seed` if the sample data fails validation.
    pub async fn with_samples() -> Result<Self, StorageError> {
        let repo = Self::new();
        for course in crate::seed::sample_courses()? {
            repo.upsert_course(&course).await?;
        }
        for class in crate::seed::sample_live_classes()? {
            repo.upsert_live_class(&class).await?;
        }
        Ok(repo)
    }
}

#[async_trait]
impl CourseRepository for InMemoryRepository {
    async fn upsert_course(&self, course: &Course) -> Result<(), StorageError> {
        let mut guard = self
            .courses
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.upsert(course.id().clone(), course.clone());
        Ok(())
    }

    async fn get_course(&self, id: &CourseId) -> Result<Course, StorageError> {
        let guard = self
            .courses
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.get(id).ok_or(StorageError::NotFound)
    }

    async fn list_courses(&self) -> Result<Vec<Course>, StorageError> {
        let guard = self
            .courses
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.list())
    }
}

#[async_trait]
impl LiveClassRepository for InMemoryRepository {
    async fn upsert_live_class(&self, class: &LiveClass) -> Result<(), StorageError> {
        let mut guard = self
            .live_classes
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.upsert(class.id().clone(), class.clone());
        Ok(())
    }

    async fn get_live_class(&self, id: &LiveClassId) -> Result<LiveClass, StorageError> {
        let guard = self
            .live_classes
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.get(id).ok_or(StorageError::NotFound)
    }

    async fn list_live_classes(&self) -> Result<Vec<LiveClass>, StorageError> {
        let guard = self
            .live_classes
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.list())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub courses: Arc<dyn CourseRepository>,
    pub live_classes: Arc<dyn LiveClassRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_repository(InMemoryRepository::new())
    }

    /// # Errors
    ///
    /// Returns `StorageError::Seed` if the sample data fails validation.
    pub async fn with_samples() -> Result<Self, StorageError> {
        Ok(Self::from_repository(InMemoryRepository::with_samples().await?))
    }

    fn from_repository(repo: InMemoryRepository) -> Self {
        let courses: Arc<dyn CourseRepository> = Arc::new(repo.clone());
        let live_classes: Arc<dyn LiveClassRepository> = Arc::new(repo);
        Self {
            courses,
            live_classes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edu_core::model::{CourseLevel, CourseMeta};

    fn build_course(id: &str, title: &str) -> Course {
        Course::new(
            CourseId::new(id),
            title,
            "",
            vec![],
            CourseMeta {
                duration: "1 week".into(),
                level: CourseLevel::Beginner,
                thumbnail: None,
            },
        )
        .unwrap()
    }

    #[tokio::test]
    async fn upsert_replaces_and_keeps_order() {
        let repo = InMemoryRepository::new();
        repo.upsert_course(&build_course("2", "Second")).await.unwrap();
        repo.upsert_course(&build_course("1", "First")).await.unwrap();
        repo.upsert_course(&build_course("2", "Second v2")).await.unwrap();

        let titles: Vec<String> = repo
            .list_courses()
            .await
            .unwrap()
            .iter()
            .map(|c| c.title().to_string())
            .collect();
        assert_eq!(titles, ["Second v2", "First"]);
    }

    #[tokio::test]
    async fn missing_course_is_not_found() {
        let repo = InMemoryRepository::new();
        let err = repo.get_course(&CourseId::new("404")).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound));
    }

    #[tokio::test]
    async fn in_memory_storage_shares_one_repository() {
        let storage = Storage::in_memory();
        assert!(storage.courses.list_courses().await.unwrap().is_empty());
        assert!(storage.live_classes.list_live_classes().await.unwrap().is_empty());

        storage
            .courses
            .upsert_course(&build_course("7", "Geometry"))
            .await
            .unwrap();
        let course = storage.courses.get_course(&CourseId::new("7")).await.unwrap();
        assert_eq!(course.title(), "Geometry");
    }

    #[tokio::test]
    async fn samples_load_into_storage() {
        let storage = Storage::with_samples().await.unwrap();
        assert_eq!(storage.courses.list_courses().await.unwrap().len(), 2);
        assert_eq!(storage.live_classes.list_live_classes().await.unwrap().len(), 2);

        let live = storage
            .live_classes
            .get_live_class(&LiveClassId::new("live-1"))
            .await
            .unwrap();
        assert!(live.is_live());
    }
}
