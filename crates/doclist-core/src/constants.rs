//! Constants used throughout the doclist core crate.

/// Directory endpoint used when no source URL is configured.
pub const DEFAULT_SOURCE_URL: &str = "https://srijandubey.github.io/campus-api-mock/SRM-C1-25.json";

/// Request timeout for the directory fetch when none is configured.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Query parameter carrying the consultation mode label.
pub const PARAM_CONSULTATION_TYPE: &str = "consultationType";

/// Query parameter carrying the comma-joined specialty names.
pub const PARAM_SPECIALTIES: &str = "specialties";

/// Query parameter carrying the fee sort direction.
pub const PARAM_FEES_SORT: &str = "feesSort";

/// Query parameter carrying the experience sort direction.
pub const PARAM_EXPERIENCE_SORT: &str = "experienceSort";

/// Query parameter carrying the free-text search.
pub const PARAM_SEARCH: &str = "search";

/// Separator between specialty names in the `specialties` parameter.
pub const SPECIALTY_SEPARATOR: &str = ",";

/// Minimum search length before suggestions are offered.
pub const SUGGESTION_MIN_CHARS: usize = 2;

/// Maximum number of suggestions offered.
pub const SUGGESTION_LIMIT: usize = 3;
