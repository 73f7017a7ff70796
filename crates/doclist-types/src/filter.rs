//! Filter specification for the doctor listing.
//!
//! A [`FilterSpecification`] is a value: every change produces a new specification, which the
//! listing page then reconciles against the directory.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::TypesError;

/// Consultation mode a doctor can offer.
///
/// The labels double as the values of the `consultationType` query parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConsultationMode {
    #[serde(rename = "Video Consult")]
    VideoConsult,
    #[serde(rename = "In Clinic")]
    InClinic,
}

impl ConsultationMode {
    pub const ALL: [ConsultationMode; 2] = [ConsultationMode::VideoConsult, ConsultationMode::InClinic];

    pub fn label(self) -> &'static str {
        match self {
            ConsultationMode::VideoConsult => "Video Consult",
            ConsultationMode::InClinic => "In Clinic",
        }
    }
}

impl fmt::Display for ConsultationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ConsultationMode {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConsultationMode::ALL
            .into_iter()
            .find(|mode| mode.label() == s)
            .ok_or_else(|| TypesError::UnknownConsultationMode(s.to_string()))
    }
}

/// Direction of a sort key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    /// Orient an ascending comparison result.
    pub fn orient(self, ordering: std::cmp::Ordering) -> std::cmp::Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(TypesError::UnknownSortDirection(other.to_string())),
        }
    }
}

/// The full set of user-chosen search, filter and sort criteria.
///
/// `None`, an empty set and an empty string are the "unset" defaults. The default value applies
/// no filtering and no sorting.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpecification {
    pub consultation_type: Option<ConsultationMode>,
    pub specialties: BTreeSet<String>,
    pub fees_sort: Option<SortDirection>,
    pub experience_sort: Option<SortDirection>,
    pub search_query: String,
}

impl FilterSpecification {
    pub fn with_consultation_type(self, consultation_type: Option<ConsultationMode>) -> Self {
        Self {
            consultation_type,
            ..self
        }
    }

    pub fn with_fees_sort(self, fees_sort: Option<SortDirection>) -> Self {
        Self { fees_sort, ..self }
    }

    pub fn with_experience_sort(self, experience_sort: Option<SortDirection>) -> Self {
        Self {
            experience_sort,
            ..self
        }
    }

    pub fn with_search_query(self, search_query: impl Into<String>) -> Self {
        Self {
            search_query: search_query.into(),
            ..self
        }
    }

    /// Select `specialty` if it is not selected yet, otherwise deselect it.
    pub fn toggle_specialty(self, specialty: &str) -> Self {
        let mut specialties = self.specialties;
        if !specialties.remove(specialty) {
            specialties.insert(specialty.to_string());
        }
        Self {
            specialties,
            ..self
        }
    }

    /// True when no criterion is set.
    pub fn is_unset(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::Ordering;

    #[test]
    fn consultation_mode_parses_its_labels_only() {
        assert_eq!(
            "Video Consult".parse::<ConsultationMode>().unwrap(),
            ConsultationMode::VideoConsult
        );
        assert_eq!(
            "In Clinic".parse::<ConsultationMode>().unwrap(),
            ConsultationMode::InClinic
        );
        let err = "video".parse::<ConsultationMode>().expect_err("should reject");
        assert!(matches!(err, TypesError::UnknownConsultationMode(s) if s == "video"));
    }

    #[test]
    fn consultation_mode_serialises_as_label() {
        let s = serde_json::to_string(&ConsultationMode::InClinic).unwrap();
        assert_eq!(s, "\"In Clinic\"");
    }

    #[test]
    fn sort_direction_round_trips_through_str() {
        for direction in [SortDirection::Asc, SortDirection::Desc] {
            assert_eq!(direction.as_str().parse::<SortDirection>().unwrap(), direction);
        }
        assert!("ASC".parse::<SortDirection>().is_err());
    }

    #[test]
    fn desc_reverses_ordering() {
        assert_eq!(SortDirection::Asc.orient(Ordering::Less), Ordering::Less);
        assert_eq!(SortDirection::Desc.orient(Ordering::Less), Ordering::Greater);
        assert_eq!(SortDirection::Desc.orient(Ordering::Equal), Ordering::Equal);
    }

    #[test]
    fn toggle_specialty_adds_then_removes() {
        let spec = FilterSpecification::default().toggle_specialty("Dentist");
        assert!(spec.specialties.contains("Dentist"));

        let spec = spec.toggle_specialty("Dentist");
        assert!(spec.specialties.is_empty());
        assert!(spec.is_unset());
    }

    #[test]
    fn builders_replace_single_fields() {
        let spec = FilterSpecification::default()
            .with_search_query("priya")
            .with_fees_sort(Some(SortDirection::Asc))
            .with_consultation_type(Some(ConsultationMode::VideoConsult));

        assert_eq!(spec.search_query, "priya");
        assert_eq!(spec.fees_sort, Some(SortDirection::Asc));
        assert_eq!(spec.experience_sort, None);
        assert_eq!(spec.consultation_type, Some(ConsultationMode::VideoConsult));
        assert!(!spec.is_unset());
    }
}
