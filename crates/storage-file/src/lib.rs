//! Flat-file storage implementation for vitals records.
//!
//! Implements the [`VisitSink`](vitals_core::patients::VisitSink) seam from
//! `vitals-core` over a plain text file, one visit per line.
//!
//! ```text
//! vitals-core (records, codec)
//!        │
//!        ▼
//! storage-file (this crate)
//!        │
//!        ▼
//!   patients.txt
//! ```

pub mod visits;

pub use visits::FileVisitRepository;

// Re-export from vitals-core for convenience
pub use vitals_core::errors::{Error, Result, StorageError};
