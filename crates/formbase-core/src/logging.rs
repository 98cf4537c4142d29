//! Structured logging schema and field name constants for formbase.
//!
//! Both crates use these constants for consistent structured logging fields,
//! so log output can be queried by the same names whether a filter ran on the
//! device or through the backend.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue, automatic fallback applied |
//! | INFO  | Lifecycle events (startup, config load), fetch completions |
//! | DEBUG | Decision points (inferred profiles, rejected clauses) |
//! | TRACE | Per-record iteration, per-clause evaluation |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Subsystem originating the log event.
/// Values: "engine", "client", "cli"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "inference", "evaluator", "encoder", "rest"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "infer_profiles", "evaluate", "fetch_records"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Form id being filtered.
pub const FORM_ID: &str = "form_id";

/// Record id being evaluated.
pub const RECORD_ID: &str = "record_id";

/// Filter clause id.
pub const CLAUSE_ID: &str = "clause_id";

/// Field category name.
pub const CATEGORY: &str = "category";

/// Encoded query string.
pub const QUERY: &str = "query";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of fields fed to inference.
pub const FIELD_COUNT: &str = "field_count";

/// Number of records fed to inference or evaluation.
pub const RECORD_COUNT: &str = "record_count";

/// Number of clauses in a filter set.
pub const CLAUSE_COUNT: &str = "clause_count";

/// Number of records returned by a filter.
pub const RESULT_COUNT: &str = "result_count";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Boolean success/failure indicator.
pub const SUCCESS: &str = "success";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";

/// Slow operation threshold exceeded.
pub const SLOW: &str = "slow";
