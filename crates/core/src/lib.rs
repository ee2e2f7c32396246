//! Vitals Core - visit records, ingestion, queries, and mutations.
//!
//! This crate holds all record-keeping logic. It is storage-agnostic: the
//! only persistence seam is the [`patients::VisitSink`] trait, implemented
//! by the `storage-file` crate.

pub mod constants;
pub mod errors;
pub mod ingest;
pub mod patients;
pub mod queries;
pub mod visits;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
