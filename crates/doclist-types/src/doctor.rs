//! Doctor directory records and their wire model.
//!
//! The remote directory is a loosely typed JSON array. Records are decoded through an internal,
//! lenient wire model and translated into the domain-level [`DoctorRecord`].
//!
//! Decoding rules:
//! - the payload must be a JSON array; anything else is a schema error
//! - `id` and `name` are required; a record without them is skipped
//! - `id` may be a JSON string or number
//! - list fields (`specialities`, `languages`) that are missing, `null` or not arrays decode as
//!   empty; individual list items that do not decode are skipped
//! - every other field falls back to its default when missing or of the wrong type

use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use utoipa::ToSchema;

use crate::filter::ConsultationMode;
use crate::{TypesError, TypesResult};

// ============================================================================
// Public domain-level types
// ============================================================================

/// A single doctor in the directory.
///
/// Records are immutable once decoded. The fee and experience are kept as the display strings the
/// directory provides; numeric values for sorting are derived with [`extract_amount`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct DoctorRecord {
    pub id: String,
    pub name: String,
    pub name_initials: String,
    pub photo: String,
    pub doctor_introduction: String,
    /// Specialty names, in directory order.
    pub specialities: Vec<String>,
    /// Fee display string, e.g. `"₹500"`.
    pub fees: String,
    /// Experience display string, e.g. `"13 Years of experience"`.
    pub experience: String,
    pub languages: Vec<String>,
    pub clinic: Clinic,
    pub video_consult: bool,
    pub in_clinic: bool,
}

/// Clinic a doctor practises from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Clinic {
    pub name: String,
    pub address: ClinicAddress,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ClinicAddress {
    pub locality: String,
    pub city: String,
    pub address_line1: String,
    pub location: String,
    pub logo_url: String,
}

impl DoctorRecord {
    /// Numeric fee used for sorting. See [`extract_amount`].
    pub fn fee_amount(&self) -> u64 {
        extract_amount(&self.fees)
    }

    /// Numeric experience used for sorting. See [`extract_amount`].
    pub fn experience_years(&self) -> u64 {
        extract_amount(&self.experience)
    }

    /// Whether the doctor offers the given consultation mode.
    pub fn supports(&self, mode: ConsultationMode) -> bool {
        match mode {
            ConsultationMode::VideoConsult => self.video_consult,
            ConsultationMode::InClinic => self.in_clinic,
        }
    }

    /// Whether at least one of the doctor's specialties is in `selected`.
    pub fn has_any_speciality(&self, selected: &BTreeSet<String>) -> bool {
        self.specialities.iter().any(|s| selected.contains(s))
    }
}

/// Extract the numeric value embedded in a display string.
///
/// All characters other than ASCII digits are dropped and the remaining digits are read as a
/// base-10 integer, so `"₹1,200"` yields `1200`. A string without digits yields `0`. Values that
/// do not fit in a `u64` saturate at `u64::MAX`.
pub fn extract_amount(display: &str) -> u64 {
    display
        .chars()
        .filter_map(|c| c.to_digit(10))
        .fold(0u64, |acc, digit| {
            acc.saturating_mul(10).saturating_add(u64::from(digit))
        })
}

/// Decode a directory payload (a JSON array of doctor objects).
///
/// A record that cannot be decoded (not an object, or missing `id` or `name`) is skipped with a
/// warning carrying its index; the remaining records are kept in order.
///
/// # Errors
///
/// Returns [`TypesError::Schema`] if the payload is not a JSON array or has trailing data.
pub fn decode_directory(payload: &[u8]) -> TypesResult<Vec<DoctorRecord>> {
    let mut deserializer = serde_json::Deserializer::from_slice(payload);

    let items: Vec<Value> =
        serde_path_to_error::deserialize(&mut deserializer).map_err(|err| {
            let path = err.path().to_string();
            let path = if path.is_empty() || path == "." {
                "<root>".to_string()
            } else {
                path
            };
            TypesError::Schema {
                path,
                message: err.into_inner().to_string(),
            }
        })?;

    deserializer.end().map_err(|err| TypesError::Schema {
        path: "<root>".to_string(),
        message: err.to_string(),
    })?;

    Ok(items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| decode_record(index, item))
        .collect())
}

fn decode_record(index: usize, item: Value) -> Option<DoctorRecord> {
    match serde_path_to_error::deserialize::<_, DoctorWire>(item) {
        Ok(wire) => Some(wire_to_domain(wire)),
        Err(err) => {
            let path = err.path().to_string();
            tracing::warn!(
                index,
                path = %path,
                error = %err.into_inner(),
                "skipping malformed doctor record"
            );
            None
        }
    }
}

// ============================================================================
// Wire types (internal)
// ============================================================================

#[derive(Deserialize)]
struct DoctorWire {
    #[serde(deserialize_with = "string_or_number")]
    id: String,
    name: String,
    #[serde(default, deserialize_with = "lenient")]
    name_initials: String,
    #[serde(default, deserialize_with = "lenient")]
    photo: String,
    #[serde(default, deserialize_with = "lenient")]
    doctor_introduction: String,
    #[serde(default, deserialize_with = "lenient_list")]
    specialities: Vec<SpecialityWire>,
    #[serde(default, deserialize_with = "lenient")]
    fees: String,
    #[serde(default, deserialize_with = "lenient")]
    experience: String,
    #[serde(default, deserialize_with = "lenient_list")]
    languages: Vec<String>,
    #[serde(default, deserialize_with = "lenient")]
    clinic: Clinic,
    #[serde(default, deserialize_with = "lenient")]
    video_consult: bool,
    #[serde(default, deserialize_with = "lenient")]
    in_clinic: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SpecialityWire {
    Named { name: String },
    Bare(String),
}

impl SpecialityWire {
    fn into_name(self) -> String {
        match self {
            SpecialityWire::Named { name } => name,
            SpecialityWire::Bare(name) => name,
        }
    }
}

fn wire_to_domain(wire: DoctorWire) -> DoctorRecord {
    DoctorRecord {
        id: wire.id,
        name: wire.name,
        name_initials: wire.name_initials,
        photo: wire.photo,
        doctor_introduction: wire.doctor_introduction,
        specialities: wire
            .specialities
            .into_iter()
            .map(SpecialityWire::into_name)
            .collect(),
        fees: wire.fees,
        experience: wire.experience,
        languages: wire.languages,
        clinic: wire.clinic,
        video_consult: wire.video_consult,
        in_clinic: wire.in_clinic,
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(serde::de::Error::custom("expected a string or number id")),
    }
}

fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect()),
        _ => Ok(Vec::new()),
    }
}
