//! Filter clause composition.
//!
//! Clauses are composed as [`ClauseDraft`]s and validated against the current
//! [`CategoryProfiles`] before they enter a [`FilterSet`]. Once added a clause
//! is never changed; editing one means removing it and pushing a new draft,
//! which is what [`ClauseDraft::from_clause`] is for.
//!
//! # Example
//!
//! ```
//! use formbase_core::{infer_profiles, Category, ClauseDraft, Field, FilterSet, Operator, Record};
//!
//! let fields = vec![Field::new("Age", Category::PlainText).numeric()];
//! let records = vec![Record::new(1).with_value("Age", "20")];
//! let profiles = infer_profiles(&fields, &records);
//!
//! let mut filters = FilterSet::new();
//! let id = filters
//!     .push(
//!         ClauseDraft::new()
//!             .category(Category::PlainText)
//!             .operator(Operator::GreaterThan)
//!             .value("15"),
//!         &profiles,
//!     )
//!     .unwrap();
//!
//! assert_eq!(filters.len(), 1);
//! filters.remove(id).unwrap();
//! assert!(filters.is_empty());
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::inference::CategoryProfiles;
use crate::models::Category;
use crate::operators::{is_legal, Operator};

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Unique, time-ordered clause identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClauseId(Uuid);

impl ClauseId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ClauseId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ClauseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a clause joins the clauses before it.
///
/// Currently inert: both the query encoder and the evaluator AND every
/// clause regardless of this value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Combinator {
    #[default]
    And,
    Or,
}

impl std::fmt::Display for Combinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::And => write!(f, "and"),
            Self::Or => write!(f, "or"),
        }
    }
}

impl std::str::FromStr for Combinator {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "and" | "&&" => Ok(Self::And),
            "or" | "||" => Ok(Self::Or),
            _ => Err(format!("Invalid combinator: {}", s)),
        }
    }
}

// =============================================================================
// CLAUSES
// =============================================================================

/// A complete, validated filter condition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterClause {
    id: ClauseId,
    category: Category,
    operator: Operator,
    value: String,
    combinator: Combinator,
}

impl FilterClause {
    pub fn id(&self) -> ClauseId {
        self.id
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// Comparison value as entered; never blank.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn combinator(&self) -> Combinator {
        self.combinator
    }
}

/// A clause under construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClauseDraft {
    pub category: Option<Category>,
    pub operator: Option<Operator>,
    pub value: String,
    pub combinator: Combinator,
}

impl ClauseDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draft prefilled from an existing clause, for editing.
    pub fn from_clause(clause: &FilterClause) -> Self {
        Self {
            category: Some(clause.category),
            operator: Some(clause.operator),
            value: clause.value.clone(),
            combinator: clause.combinator,
        }
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn operator(mut self, operator: Operator) -> Self {
        self.operator = Some(operator);
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn combinator(mut self, combinator: Combinator) -> Self {
        self.combinator = combinator;
        self
    }

    /// Whether category, operator and a non-blank value are all set.
    pub fn is_complete(&self) -> bool {
        self.category.is_some() && self.operator.is_some() && !self.value.trim().is_empty()
    }

    /// Validate against the current profiles and produce a clause with a
    /// fresh id.
    pub fn build(&self, profiles: &CategoryProfiles) -> Result<FilterClause> {
        let category = self
            .category
            .ok_or_else(|| Error::InvalidClause("missing category".to_string()))?;
        let operator = self
            .operator
            .ok_or_else(|| Error::InvalidClause("missing operator".to_string()))?;
        if self.value.trim().is_empty() {
            return Err(Error::InvalidClause("missing value".to_string()));
        }

        let profile = profiles.get(category);
        if !profile.has_evidence() {
            return Err(Error::InvalidClause(format!(
                "category {} has no data to filter",
                category
            )));
        }
        if !is_legal(&profile, operator) {
            return Err(Error::InvalidClause(format!(
                "operator {} is not available for category {}",
                operator, category
            )));
        }

        Ok(FilterClause {
            id: ClauseId::new(),
            category,
            operator,
            value: self.value.clone(),
            combinator: self.combinator,
        })
    }
}

// =============================================================================
// FILTER SET
// =============================================================================

/// Ordered, append-only collection of clauses.
///
/// An empty set means no filtering.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterSet {
    clauses: Vec<FilterClause>,
}

impl FilterSet {
    /// Create an empty filter set (matches every record).
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a draft and append it. Returns the new clause id.
    pub fn push(&mut self, draft: ClauseDraft, profiles: &CategoryProfiles) -> Result<ClauseId> {
        let clause = draft.build(profiles).inspect_err(|e| {
            debug!(
                subsystem = "engine",
                component = "filter_set",
                error = %e,
                "Clause rejected"
            );
        })?;
        let id = clause.id;
        self.clauses.push(clause);
        Ok(id)
    }

    /// Remove a clause by id, returning it.
    pub fn remove(&mut self, id: ClauseId) -> Result<FilterClause> {
        let pos = self
            .clauses
            .iter()
            .position(|c| c.id == id)
            .ok_or(Error::ClauseNotFound(id))?;
        Ok(self.clauses.remove(pos))
    }

    pub fn get(&self, id: ClauseId) -> Option<&FilterClause> {
        self.clauses.iter().find(|c| c.id == id)
    }

    pub fn clauses(&self) -> &[FilterClause] {
        &self.clauses
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FilterClause> {
        self.clauses.iter()
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

impl<'a> IntoIterator for &'a FilterSet {
    type Item = &'a FilterClause;
    type IntoIter = std::slice::Iter<'a, FilterClause>;

    fn into_iter(self) -> Self::IntoIter {
        self.clauses.iter()
    }
}
