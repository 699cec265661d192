#![forbid(unsafe_code)]

pub mod repository;
pub mod seed;

pub use repository::{
    CourseRepository, InMemoryRepository, LiveClassRepository, Storage, StorageError,
};
