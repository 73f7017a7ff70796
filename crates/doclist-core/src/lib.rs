//! # Doclist Core
//!
//! Core logic for the doctor directory listing.
//!
//! This crate contains:
//! - [`engine`]: the pure filter/sort pipeline producing the derived view
//! - [`query`]: the mapping between a [`FilterSpecification`] and its query string
//! - [`fetcher`] and [`directory`]: the one-shot load of the remote directory
//! - [`page`]: explicit listing page state and its reconciliation step
//! - [`facets`]: specialty facets and search suggestions
//!
//! **No API concerns**: HTTP routing and HTML rendering belong in `api-rest`.

pub mod config;
pub mod constants;
pub mod directory;
pub mod engine;
pub mod error;
pub mod facets;
pub mod fetcher;
pub mod page;
pub mod query;

pub use config::CoreConfig;
pub use directory::Directory;
pub use error::{DirectoryError, DirectoryResult};
pub use fetcher::DirectoryFetcher;
pub use page::ListingPage;

pub use doclist_types::{
    decode_directory, ConsultationMode, DoctorRecord, FilterSpecification, SortDirection,
    TypesError,
};
