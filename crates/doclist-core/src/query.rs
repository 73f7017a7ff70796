//! Query-string synchronisation for the filter specification.
//!
//! The listing's filter state lives in the page URL so a shared link reproduces the same view.
//! Parameters:
//!
//! | parameter          | value                                   |
//! |--------------------|-----------------------------------------|
//! | `consultationType` | `Video Consult` or `In Clinic`          |
//! | `specialties`      | specialty names joined with `,`         |
//! | `feesSort`         | `asc` or `desc`                         |
//! | `experienceSort`   | `asc` or `desc`                         |
//! | `search`           | free text                               |
//!
//! [`encode`] omits every parameter whose field is unset or empty. [`decode`] never fails: an
//! absent or malformed parameter leaves its field at the default.

use doclist_types::{FilterSpecification, TypesError};
use std::str::FromStr;
use url::form_urlencoded;

use crate::constants::{
    PARAM_CONSULTATION_TYPE, PARAM_EXPERIENCE_SORT, PARAM_FEES_SORT, PARAM_SEARCH,
    PARAM_SPECIALTIES, SPECIALTY_SEPARATOR,
};

/// Render `spec` as an `application/x-www-form-urlencoded` query string (without a leading `?`).
///
/// Parameters appear in a fixed order and specialties are joined in sorted order, so equal
/// specifications always produce the same string.
pub fn encode(spec: &FilterSpecification) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());

    if let Some(mode) = spec.consultation_type {
        serializer.append_pair(PARAM_CONSULTATION_TYPE, mode.label());
    }
    if !spec.specialties.is_empty() {
        let joined = spec
            .specialties
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(SPECIALTY_SEPARATOR);
        serializer.append_pair(PARAM_SPECIALTIES, &joined);
    }
    if let Some(direction) = spec.fees_sort {
        serializer.append_pair(PARAM_FEES_SORT, direction.as_str());
    }
    if let Some(direction) = spec.experience_sort {
        serializer.append_pair(PARAM_EXPERIENCE_SORT, direction.as_str());
    }
    if !spec.search_query.is_empty() {
        serializer.append_pair(PARAM_SEARCH, &spec.search_query);
    }

    serializer.finish()
}

/// Parse a query string (with or without a leading `?`) into a specification.
///
/// For single-valued parameters the first occurrence wins. `specialties` may be repeated (as an
/// HTML form with several checked boxes submits it); all occurrences are merged and empty names
/// are dropped. Unknown parameters are ignored.
pub fn decode(query: &str) -> FilterSpecification {
    let query = query.strip_prefix('?').unwrap_or(query);

    let mut consultation_type: Option<String> = None;
    let mut fees_sort: Option<String> = None;
    let mut experience_sort: Option<String> = None;
    let mut search: Option<String> = None;
    let mut spec = FilterSpecification::default();

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            PARAM_CONSULTATION_TYPE => {
                consultation_type.get_or_insert_with(|| value.into_owned());
            }
            PARAM_SPECIALTIES => {
                spec.specialties.extend(
                    value
                        .split(SPECIALTY_SEPARATOR)
                        .filter(|name| !name.is_empty())
                        .map(str::to_string),
                );
            }
            PARAM_FEES_SORT => {
                fees_sort.get_or_insert_with(|| value.into_owned());
            }
            PARAM_EXPERIENCE_SORT => {
                experience_sort.get_or_insert_with(|| value.into_owned());
            }
            PARAM_SEARCH => {
                search.get_or_insert_with(|| value.into_owned());
            }
            _ => {}
        }
    }

    spec.consultation_type = parse_field(PARAM_CONSULTATION_TYPE, consultation_type);
    spec.fees_sort = parse_field(PARAM_FEES_SORT, fees_sort);
    spec.experience_sort = parse_field(PARAM_EXPERIENCE_SORT, experience_sort);
    spec.search_query = search.unwrap_or_default();
    spec
}

/// The canonical form of `query`: what [`encode`] produces for the filters it decodes to.
pub fn canonicalize(query: &str) -> String {
    encode(&decode(query))
}

/// Whether the raw query string (as it appears after the `?`) is exactly the canonical form.
///
/// A stray leading `?` makes the string non-canonical even though [`decode`] tolerates it.
pub fn is_canonical(query: &str) -> bool {
    canonicalize(query) == query
}

/// Relative URL of the listing page for `spec`: `/` when nothing is set, otherwise `/?<query>`.
pub fn location(spec: &FilterSpecification) -> String {
    let query = encode(spec);
    if query.is_empty() {
        "/".to_string()
    } else {
        format!("/?{query}")
    }
}

fn parse_field<T>(param: &str, value: Option<String>) -> Option<T>
where
    T: FromStr<Err = TypesError>,
{
    let value = value.filter(|v| !v.is_empty())?;
    match value.parse() {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            tracing::debug!(param, error = %err, "ignoring malformed query parameter");
            None
        }
    }
}
