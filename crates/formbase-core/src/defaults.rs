//! Centralized default constants for formbase.
//!
//! Shared values for the query grammar and the REST backend live here so the
//! encoder, the client and the tests agree on one spelling.

// =============================================================================
// QUERY GRAMMAR
// =============================================================================

/// Resource path for records.
pub const RECORD_RESOURCE: &str = "/record";

/// Resource path for field definitions.
pub const FIELD_RESOURCE: &str = "/field";

/// Column linking fields and records to their form.
pub const FORM_ID_COLUMN: &str = "form_id";

/// JSON column holding a record's field values.
pub const VALUES_COLUMN: &str = "values";

/// JSON-path operator extracting a member as text.
pub const JSON_TEXT_EXTRACT: &str = "->>";

/// Wildcard marker understood by the backend's `like`/`ilike` comparators.
pub const WILDCARD: &str = "*";

/// Separator joining query parameters (logical AND on the backend).
pub const AND_SEPARATOR: &str = "&";

// =============================================================================
// BACKEND
// =============================================================================

/// Default REST backend URL.
pub const API_URL: &str = "http://localhost:3000";

/// Timeout for backend requests (seconds).
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Requests slower than this are logged as slow (milliseconds).
pub const SLOW_REQUEST_MS: u64 = 2000;
