//! File storage implementation for visits.

mod repository;

pub use repository::FileVisitRepository;
