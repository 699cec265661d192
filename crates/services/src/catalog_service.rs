use std::sync::Arc;

use edu_core::CompletionPolicy;
use edu_core::model::{Course, CourseId, LiveClass, LiveClassId};
use storage::repository::{CourseRepository, LiveClassRepository, Storage, StorageError};
use tracing::debug;

use crate::error::CatalogError;
use crate::sessions::CourseSession;

/// Number of upcoming classes shown next to the catalog.
pub const DEFAULT_UPCOMING_LIMIT: usize = 2;

/// Course catalog and live-class schedule lookups.
#[derive(Clone)]
pub struct CatalogService {
    courses: Arc<dyn CourseRepository>,
    live_classes: Arc<dyn LiveClassRepository>,
}

impl CatalogService {
    #[must_use]
    pub fn new(
        courses: Arc<dyn CourseRepository>,
        live_classes: Arc<dyn LiveClassRepository>,
    ) -> Self {
        Self {
            courses,
            live_classes,
        }
    }

    #[must_use]
    pub fn from_storage(storage: &Storage) -> Self {
        Self::new(
            Arc::clone(&storage.courses),
            Arc::clone(&storage.live_classes),
        )
    }

    /// # Errors
    ///
    /// Returns `CatalogError::Storage` if the catalog cannot be read.
    pub async fn list_courses(&self) -> Result<Vec<Course>, CatalogError> {
        Ok(self.courses.list_courses().await?)
    }

    /// # Errors
    ///
    /// Returns `CatalogError::CourseNotFound` for an unknown id.
    pub async fn get_course(&self, id: &CourseId) -> Result<Course, CatalogError> {
        match self.courses.get_course(id).await {
            Ok(course) => Ok(course),
            Err(StorageError::NotFound) => Err(CatalogError::CourseNotFound(id.clone())),
            Err(other) => Err(other.into()),
        }
    }

    /// Courses whose title or description contains `query`, ignoring case.
    /// An empty query returns every course; whitespace is matched literally.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Storage` if the catalog cannot be read.
    pub async fn search(&self, query: &str) -> Result<Vec<Course>, CatalogError> {
        let mut courses = self.list_courses().await?;
        courses.retain(|course| course.matches_query(query));
        debug!(query, hits = courses.len(), "catalog search");
        Ok(courses)
    }

    /// Opens a course session for the given course.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::CourseNotFound` for an unknown id.
    pub async fn start_session(
        &self,
        id: &CourseId,
        policy: CompletionPolicy,
    ) -> Result<CourseSession, CatalogError> {
        let course = self.get_course(id).await?;
        Ok(CourseSession::start(course, policy))
    }

    /// # Errors
    ///
    /// Returns `CatalogError::LiveClassNotFound` for an unknown id.
    pub async fn get_live_class(&self, id: &LiveClassId) -> Result<LiveClass, CatalogError> {
        match self.live_classes.get_live_class(id).await {
            Ok(class) => Ok(class),
            Err(StorageError::NotFound) => Err(CatalogError::LiveClassNotFound(id.clone())),
            Err(other) => Err(other.into()),
        }
    }

    /// Classes currently streaming.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Storage` if the schedule cannot be read.
    pub async fn live_now(&self) -> Result<Vec<LiveClass>, CatalogError> {
        let mut classes = self.live_classes.list_live_classes().await?;
        classes.retain(LiveClass::is_live);
        Ok(classes)
    }

    /// The first `limit` classes that are not live yet, in schedule order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Storage` if the schedule cannot be read.
    pub async fn upcoming(&self, limit: usize) -> Result<Vec<LiveClass>, CatalogError> {
        let mut classes = self.live_classes.list_live_classes().await?;
        classes.retain(|class| !class.is_live());
        classes.truncate(limit);
        Ok(classes)
    }
}
