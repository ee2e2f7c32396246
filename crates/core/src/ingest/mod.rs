//! Ingest module - reading and writing the delimited visit file format.

mod csv_parser;
mod ingest_model;

pub use csv_parser::{
    format_new_visit_line, format_visit_line, load_store, load_store_from_path, write_store,
    write_visit,
};
pub use ingest_model::{DiagnosticKind, LoadDiagnostic, LoadReport};
