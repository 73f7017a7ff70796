//! Listing page state.
//!
//! [`ListingPage`] owns the page-level state explicitly: the raw collection (borrowed from the
//! [`Directory`]), the current [`FilterSpecification`], the derived view and the query string that
//! mirrors the filters. The filter specification is only ever replaced as a whole, through
//! [`ListingPage::set_filters`], which runs the single reconciliation step. The derived view and
//! the query string are therefore always consistent with the current specification.

use doclist_types::{DoctorRecord, FilterSpecification};

use crate::{engine, facets, query, Directory};

#[derive(Debug)]
pub struct ListingPage<'a> {
    raw: &'a [DoctorRecord],
    loading: bool,
    filters: FilterSpecification,
    view: Vec<&'a DoctorRecord>,
    query: String,
}

impl<'a> ListingPage<'a> {
    /// Build a page over `raw` with the initial `filters`.
    pub fn new(raw: &'a [DoctorRecord], loading: bool, filters: FilterSpecification) -> Self {
        let mut page = Self {
            raw,
            loading,
            filters,
            view: Vec::new(),
            query: String::new(),
        };
        page.reconcile();
        page
    }

    /// Open the page for a (possibly shared) URL query string.
    ///
    /// Absent or malformed parameters fall back to their defaults; opening never fails.
    pub fn open(directory: &'a Directory, query_string: &str) -> Self {
        Self::new(
            directory.records(),
            directory.is_loading(),
            query::decode(query_string),
        )
    }

    /// Replace the filter specification and reconcile the view and query string.
    pub fn set_filters(&mut self, filters: FilterSpecification) {
        self.filters = filters;
        self.reconcile();
    }

    fn reconcile(&mut self) {
        self.view = engine::apply(self.raw, &self.filters);
        self.query = query::encode(&self.filters);
        tracing::debug!(
            query = %self.query,
            shown = self.view.len(),
            total = self.raw.len(),
            "reconciled listing"
        );
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn filters(&self) -> &FilterSpecification {
        &self.filters
    }

    /// The derived view: filtered, sorted records from the raw collection.
    pub fn view(&self) -> &[&'a DoctorRecord] {
        &self.view
    }

    /// Canonical query string for the current filters, without a leading `?`.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Relative URL of the page for the current filters.
    pub fn location(&self) -> String {
        query::location(&self.filters)
    }

    pub fn raw(&self) -> &'a [DoctorRecord] {
        self.raw
    }

    pub fn specialty_facets(&self) -> Vec<&'a str> {
        facets::specialty_facets(self.raw)
    }

    pub fn suggestions(&self) -> Vec<&'a DoctorRecord> {
        facets::suggestions(self.raw, &self.filters.search_query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doclist_types::{decode_directory, ConsultationMode, SortDirection};

    fn directory() -> Directory {
        let payload = r#"[
            { "id": "a", "name": "Dr. Priya Shah", "fees": "₹200", "experience": "5 Years",
              "specialities": [{ "name": "Dentist" }], "video_consult": true },
            { "id": "b", "name": "Dr. Arjun Mehta", "fees": "₹100", "experience": "10 Years",
              "specialities": [{ "name": "ENT" }], "in_clinic": true },
            { "id": "c", "name": "Dr. Anita Rao", "fees": "₹100", "experience": "20 Years",
              "video_consult": true, "in_clinic": true }
        ]"#;
        Directory::loaded(decode_directory(payload.as_bytes()).unwrap())
    }

    fn ids(page: &ListingPage<'_>) -> Vec<String> {
        page.view().iter().map(|d| d.id.clone()).collect()
    }

    #[test]
    fn open_reproduces_shared_url() {
        let directory = directory();
        let page = ListingPage::open(&directory, "feesSort=asc&experienceSort=desc");

        assert_eq!(ids(&page), vec!["c", "b", "a"]);
        assert_eq!(page.query(), "feesSort=asc&experienceSort=desc");
        assert_eq!(page.location(), "/?feesSort=asc&experienceSort=desc");
    }

    #[test]
    fn set_filters_resyncs_view_and_query() {
        let directory = directory();
        let mut page = ListingPage::open(&directory, "");
        assert_eq!(page.query(), "");
        assert_eq!(page.location(), "/");
        assert_eq!(ids(&page), vec!["a", "b", "c"]);

        let next = page
            .filters()
            .clone()
            .with_consultation_type(Some(ConsultationMode::VideoConsult))
            .with_fees_sort(Some(SortDirection::Desc));
        page.set_filters(next);

        assert_eq!(ids(&page), vec!["a", "c"]);
        assert_eq!(page.query(), "consultationType=Video+Consult&feesSort=desc");
        assert_eq!(query::decode(page.query()), *page.filters());
    }

    #[test]
    fn malformed_url_opens_unfiltered() {
        let directory = directory();
        let page = ListingPage::open(&directory, "consultationType=Teleport&feesSort=%%%");

        assert!(page.filters().is_unset());
        assert_eq!(page.view().len(), 3);
        assert_eq!(page.query(), "");
    }

    #[test]
    fn loading_page_has_empty_view() {
        let directory = Directory::new();
        let page = ListingPage::open(&directory, "search=priya");

        assert!(page.is_loading());
        assert!(page.view().is_empty());
        assert!(page.specialty_facets().is_empty());
        assert_eq!(page.query(), "search=priya");
    }

    #[test]
    fn facets_and_suggestions_come_from_raw_collection() {
        let directory = directory();
        let page = ListingPage::open(&directory, "specialties=ENT&search=dr");

        assert_eq!(ids(&page), vec!["b"]);
        assert_eq!(page.specialty_facets(), vec!["Dentist", "ENT"]);
        assert_eq!(page.suggestions().len(), 3);
    }
}
