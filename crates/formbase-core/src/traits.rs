//! Core traits for formbase abstractions.
//!
//! The filter engine itself is synchronous; these traits describe the
//! network collaborator that supplies its inputs and runs the backend path.

use async_trait::async_trait;

use crate::error::Result;
use crate::filter_set::FilterSet;
use crate::models::{Field, Record};

/// Source of a form's field definitions and records.
#[async_trait]
pub trait FormDataSource: Send + Sync {
    /// Field definitions of a form.
    async fn fetch_fields(&self, form_id: i64) -> Result<Vec<Field>>;

    /// Every record of a form, unfiltered.
    async fn fetch_records(&self, form_id: i64) -> Result<Vec<Record>>;

    /// Records of a form filtered on the backend by the encoded filter set.
    async fn fetch_filtered(&self, form_id: i64, filters: &FilterSet) -> Result<Vec<Record>>;
}
