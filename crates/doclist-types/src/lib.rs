//! # Doclist Types
//!
//! Domain types shared by every doclist crate:
//! - [`DoctorRecord`] and the lenient decoding of the remote directory payload
//! - [`FilterSpecification`] with its [`ConsultationMode`] and [`SortDirection`] selectors
//!
//! This crate has no I/O. Fetching, filtering and query-string handling live in `doclist-core`.

pub mod doctor;
pub mod filter;

pub use doctor::{decode_directory, extract_amount, Clinic, ClinicAddress, DoctorRecord};
pub use filter::{ConsultationMode, FilterSpecification, SortDirection};

/// Errors raised while decoding or parsing doclist domain values.
#[derive(Debug, thiserror::Error)]
pub enum TypesError {
    /// The directory payload did not match the expected JSON shape.
    #[error("directory payload schema mismatch at {path}: {message}")]
    Schema { path: String, message: String },

    #[error("unknown consultation mode: {0:?}")]
    UnknownConsultationMode(String),

    #[error("unknown sort direction: {0:?}")]
    UnknownSortDirection(String),
}

pub type TypesResult<T> = Result<T, TypesError>;
