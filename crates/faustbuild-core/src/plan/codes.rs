//! Stable note codes for build plans.
//!
//! All codes are SCREAMING_SNAKE_CASE and stable across versions.

/// The architecture template is in none of the search directories.
pub const PLAN_ARCHITECTURE_NOT_FOUND: &str = "PLAN_ARCHITECTURE_NOT_FOUND";

/// An import directive matched no file.
pub const PLAN_IMPORT_UNRESOLVED: &str = "PLAN_IMPORT_UNRESOLVED";

/// A requested source does not exist (yet).
pub const PLAN_SOURCE_NOT_FOUND: &str = "PLAN_SOURCE_NOT_FOUND";
