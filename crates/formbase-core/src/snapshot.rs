//! A fully fetched form: the input every engine operation works on.
//!
//! Fields and records are fetched together before any inference, encoding or
//! evaluation runs, so the engine never sees partial data. Nothing is cached:
//! profiles are recomputed from the snapshot on every call.

use tracing::info;

use crate::error::Result;
use crate::evaluate::evaluate_with_profiles;
use crate::filter_set::FilterSet;
use crate::inference::{infer_profiles, CategoryProfiles};
use crate::models::{Category, Field, Record};
use crate::operators::{description_for, operators_for, OperatorOption};
use crate::query::encode;
use crate::traits::FormDataSource;

/// Field definitions and records of one form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormSnapshot {
    pub form_id: i64,
    pub fields: Vec<Field>,
    pub records: Vec<Record>,
}

impl FormSnapshot {
    pub fn new(form_id: i64, fields: Vec<Field>, records: Vec<Record>) -> Self {
        Self {
            form_id,
            fields,
            records,
        }
    }

    /// Fetch fields, then records. Either failure aborts the load.
    pub async fn load(source: &dyn FormDataSource, form_id: i64) -> Result<Self> {
        let fields = source.fetch_fields(form_id).await?;
        let records = source.fetch_records(form_id).await?;
        info!(
            subsystem = "engine",
            form_id,
            field_count = fields.len(),
            record_count = records.len(),
            "Form snapshot loaded"
        );
        Ok(Self::new(form_id, fields, records))
    }

    pub fn profiles(&self) -> CategoryProfiles {
        infer_profiles(&self.fields, &self.records)
    }

    /// Operators and description for a category, from fresh profiles.
    pub fn operators(&self, category: Category) -> (Vec<OperatorOption>, &'static str) {
        let profile = self.profiles().get(category);
        (operators_for(&profile), description_for(&profile))
    }

    /// Backend query for this form.
    pub fn query(&self, filters: &FilterSet) -> String {
        encode(self.form_id, filters)
    }

    /// Local evaluation path.
    pub fn filter_local(&self, filters: &FilterSet) -> Vec<Record> {
        evaluate_with_profiles(&self.records, &self.fields, filters, &self.profiles())
    }

    /// Network evaluation path.
    pub async fn filter_remote(
        &self,
        source: &dyn FormDataSource,
        filters: &FilterSet,
    ) -> Result<Vec<Record>> {
        source.fetch_filtered(self.form_id, filters).await
    }
}
