//! Filter/sort engine.
//!
//! [`apply`] derives the visible listing from the raw directory and a [`FilterSpecification`].
//! The pipeline order is fixed:
//!
//! 1. text search on the doctor name (case-insensitive substring)
//! 2. consultation mode
//! 3. specialties (a record matches if it has *any* selected specialty)
//! 4. sort by fee, with experience breaking fee ties; experience alone when no fee sort is set
//!
//! The engine never mutates its input. The derived view borrows from the raw collection, so every
//! element of the view is an element of the input.

use doclist_types::{DoctorRecord, FilterSpecification};
use std::cmp::Ordering;

/// Apply `spec` to `raw`, returning the filtered and sorted view.
///
/// Sorting is stable: records that compare equal under the active keys, and all records when no
/// sort is set, keep their relative order from `raw`.
pub fn apply<'a>(raw: &'a [DoctorRecord], spec: &FilterSpecification) -> Vec<&'a DoctorRecord> {
    let needle = spec.search_query.to_lowercase();

    let mut view: Vec<&DoctorRecord> = raw
        .iter()
        .filter(|doctor| needle.is_empty() || doctor.name.to_lowercase().contains(&needle))
        .filter(|doctor| {
            spec.consultation_type.map_or(true, |mode| doctor.supports(mode))
        })
        .filter(|doctor| {
            spec.specialties.is_empty() || doctor.has_any_speciality(&spec.specialties)
        })
        .collect();

    if spec.fees_sort.is_some() || spec.experience_sort.is_some() {
        view.sort_by(|a, b| compare(a, b, spec));
    }

    view
}

fn compare(a: &DoctorRecord, b: &DoctorRecord, spec: &FilterSpecification) -> Ordering {
    let by_fee = spec
        .fees_sort
        .map(|direction| direction.orient(a.fee_amount().cmp(&b.fee_amount())))
        .unwrap_or(Ordering::Equal);

    match spec.experience_sort {
        Some(direction) if by_fee == Ordering::Equal => {
            direction.orient(a.experience_years().cmp(&b.experience_years()))
        }
        _ => by_fee,
    }
}
