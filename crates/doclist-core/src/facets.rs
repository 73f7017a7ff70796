//! Specialty facets and search suggestions derived from the raw directory.

use doclist_types::DoctorRecord;
use std::collections::BTreeSet;

use crate::constants::{SUGGESTION_LIMIT, SUGGESTION_MIN_CHARS};

/// Distinct specialty names across the directory, sorted ascending.
///
/// Records without specialties contribute nothing.
pub fn specialty_facets(raw: &[DoctorRecord]) -> Vec<&str> {
    raw.iter()
        .flat_map(|doctor| doctor.specialities.iter().map(String::as_str))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Name suggestions for a partially typed search.
///
/// Offers up to [`SUGGESTION_LIMIT`] records, in directory order, whose name contains `search`
/// case-insensitively. Searches shorter than [`SUGGESTION_MIN_CHARS`] characters get none.
/// Suggestions ignore every other filter.
pub fn suggestions<'a>(raw: &'a [DoctorRecord], search: &str) -> Vec<&'a DoctorRecord> {
    if search.chars().count() < SUGGESTION_MIN_CHARS {
        return Vec::new();
    }

    let needle = search.to_lowercase();
    raw.iter()
        .filter(|doctor| doctor.name.to_lowercase().contains(&needle))
        .take(SUGGESTION_LIMIT)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use doclist_types::decode_directory;

    fn directory() -> Vec<DoctorRecord> {
        let payload = r#"[
            { "id": "1", "name": "Dr. Priya Shah", "specialities": [{ "name": "Dentist" }] },
            { "id": "2", "name": "Dr. Arjun Mehta", "specialities": [{ "name": "ENT" }, { "name": "Dentist" }] },
            { "id": "3", "name": "Dr. Anita Rao" },
            { "id": "4", "name": "Dr. Ravi Kumar", "specialities": [{ "name": "Cardiologist" }] },
            { "id": "5", "name": "Dr. Rashmi Rai", "specialities": "Dentist" }
        ]"#;
        decode_directory(payload.as_bytes()).unwrap()
    }

    #[test]
    fn facets_are_distinct_and_sorted() {
        assert_eq!(
            specialty_facets(&directory()),
            vec!["Cardiologist", "Dentist", "ENT"]
        );
    }

    #[test]
    fn facets_of_empty_directory_are_empty() {
        assert!(specialty_facets(&[]).is_empty());
    }

    #[test]
    fn suggestions_need_two_characters() {
        let raw = directory();
        assert!(suggestions(&raw, "").is_empty());
        assert!(suggestions(&raw, "r").is_empty());
        assert_eq!(suggestions(&raw, "pr").len(), 1);
    }

    #[test]
    fn suggestions_are_capped_in_directory_order() {
        let raw = directory();
        let ids: Vec<&str> = suggestions(&raw, "DR.").iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }
}
