//! # formbase-core
//!
//! Filter engine and data model for formbase forms.
//!
//! Given a form's field definitions and the values stored in its records,
//! this crate infers per-category data kinds, resolves the operators a user
//! may pick, and executes a composed filter set either as a backend query
//! string or as an in-memory predicate. Every engine operation is a pure,
//! synchronous function of its inputs.

pub mod defaults;
pub mod error;
pub mod evaluate;
pub mod filter_set;
pub mod inference;
pub mod logging;
pub mod models;
pub mod operators;
pub mod query;
pub mod snapshot;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use evaluate::{evaluate, evaluate_with_profiles};
pub use filter_set::{ClauseDraft, ClauseId, Combinator, FilterClause, FilterSet};
pub use inference::{infer_profiles, CategoryProfile, CategoryProfiles};
pub use models::{Category, Field, FieldKind, Record};
pub use operators::{description_for, operators_for, Operator, OperatorOption};
pub use query::{base_query, encode};
pub use snapshot::FormSnapshot;
pub use traits::FormDataSource;
