//! JSON response bodies served by the REST API.

use doclist_types::DoctorRecord;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    /// True while the directory fetch is pending.
    pub loading: bool,
    pub message: String,
}

/// The derived view for a filter query.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct ListDoctorsRes {
    /// True while the directory fetch is pending; `doctors` is then empty.
    pub loading: bool,
    /// Canonical query string for the applied filters, without a leading `?`.
    pub query: String,
    /// Number of records in the raw directory.
    pub total: usize,
    pub doctors: Vec<DoctorRecord>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SpecialtiesRes {
    /// Distinct specialty names, sorted ascending.
    pub specialties: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Suggestion {
    pub id: String,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SuggestionsRes {
    pub suggestions: Vec<Suggestion>,
}

impl From<&DoctorRecord> for Suggestion {
    fn from(doctor: &DoctorRecord) -> Self {
        Self {
            id: doctor.id.clone(),
            name: doctor.name.clone(),
        }
    }
}
