//! The raw doctor collection, written once and read many times.
//!
//! A [`Directory`] starts out loading with an empty collection. The first call to
//! [`Directory::publish`] (normally via [`Directory::populate`]) sets the collection and ends the
//! loading state; later publishes are ignored. Readers never block.

use doclist_types::DoctorRecord;
use std::sync::OnceLock;

use crate::DirectoryFetcher;

#[derive(Debug, Default)]
pub struct Directory {
    records: OnceLock<Vec<DoctorRecord>>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    /// A directory that is already loaded with `records`.
    pub fn loaded(records: Vec<DoctorRecord>) -> Self {
        let directory = Self::new();
        directory.publish(records);
        directory
    }

    /// True until the collection has been published.
    pub fn is_loading(&self) -> bool {
        self.records.get().is_none()
    }

    /// The raw collection; empty while loading.
    pub fn records(&self) -> &[DoctorRecord] {
        self.records.get().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Publish the collection. Returns `false` if it was already published.
    pub fn publish(&self, records: Vec<DoctorRecord>) -> bool {
        let published = self.records.set(records).is_ok();
        if !published {
            tracing::warn!("doctor directory already loaded; ignoring second publish");
        }
        published
    }

    /// Load the directory through `fetcher` and publish the result.
    ///
    /// A failed fetch publishes an empty collection, so loading always ends. Does nothing if the
    /// directory is already loaded.
    pub async fn populate(&self, fetcher: &DirectoryFetcher) {
        if !self.is_loading() {
            tracing::warn!("doctor directory already loaded; skipping fetch");
            return;
        }
        self.publish(fetcher.load().await);
    }
}
