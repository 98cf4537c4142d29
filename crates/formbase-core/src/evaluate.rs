//! In-memory evaluation of filter sets.
//!
//! This is the local counterpart of [`crate::query::encode`]: a record is kept
//! when every clause holds (clause combinators are ignored, as on the wire).
//! A clause holds when any value on the record under a field of the clause's
//! category satisfies it.
//!
//! Each stored value is tried against two branches, numeric first:
//!
//! 1. If the category has numeric evidence and the value parses as a finite
//!    number, `eq`/`gt`/`lt`/`gte`/`lte` compare numerically against the
//!    clause value. Pattern operators, and clause values that are not
//!    numbers, fall through.
//! 2. If the category has text evidence, comparison is case-insensitive:
//!    `eq` is equality, `ilike` containment, `like` prefix. Numeric operators
//!    parse both sides and fail if either is not a number.
//!
//! A value neither branch accepts does not satisfy the clause.

use std::cmp::Ordering;
use std::collections::HashMap;

use tracing::{debug, trace};

use crate::filter_set::{FilterClause, FilterSet};
use crate::inference::{field_index, infer_profiles, CategoryProfile, CategoryProfiles};
use crate::models::{filterable_text, parse_finite, Field, Record};
use crate::operators::Operator;

/// Records satisfying every clause of `filters`, in input order.
///
/// Profiles are inferred from `fields` and `records` on each call.
pub fn evaluate(records: &[Record], fields: &[Field], filters: &FilterSet) -> Vec<Record> {
    if filters.is_empty() {
        return records.to_vec();
    }
    let profiles = infer_profiles(fields, records);
    evaluate_with_profiles(records, fields, filters, &profiles)
}

/// Same as [`evaluate`] with caller-supplied profiles.
pub fn evaluate_with_profiles(
    records: &[Record],
    fields: &[Field],
    filters: &FilterSet,
    profiles: &CategoryProfiles,
) -> Vec<Record> {
    if filters.is_empty() {
        return records.to_vec();
    }

    let index = field_index(fields);
    let matched: Vec<Record> = records
        .iter()
        .filter(|record| record_matches(record, &index, filters, profiles))
        .cloned()
        .collect();

    debug!(
        subsystem = "engine",
        component = "evaluator",
        record_count = records.len(),
        clause_count = filters.len(),
        result_count = matched.len(),
        "Filter set evaluated"
    );
    matched
}

fn record_matches(
    record: &Record,
    index: &HashMap<&str, &Field>,
    filters: &FilterSet,
    profiles: &CategoryProfiles,
) -> bool {
    filters.iter().all(|clause| {
        let profile = profiles.get(clause.category());
        let holds = record.values.iter().any(|(name, raw)| {
            let in_category = index
                .get(name.as_str())
                .and_then(|field| field.category())
                == Some(clause.category());
            in_category
                && filterable_text(raw)
                    .map(|text| value_satisfies(&text, clause, &profile))
                    .unwrap_or(false)
        });
        trace!(record_id = record.id, clause_id = %clause.id(), holds, "Clause evaluated");
        holds
    })
}

/// Whether one stored value satisfies a clause under a category profile.
pub fn value_satisfies(stored: &str, clause: &FilterClause, profile: &CategoryProfile) -> bool {
    let operator = clause.operator();

    if profile.has_numeric_evidence {
        if let Some(stored_num) = parse_finite(stored) {
            if let Some(result) = numeric_compare(operator, stored_num, clause.value()) {
                return result;
            }
        }
    }

    if profile.has_text_evidence {
        let stored_lower = stored.to_lowercase();
        let wanted = clause.value().to_lowercase();
        return match operator {
            Operator::Equals => stored_lower == wanted,
            Operator::Contains => stored_lower.contains(&wanted),
            Operator::StartsWith => stored_lower.starts_with(&wanted),
            Operator::GreaterThan
            | Operator::LessThan
            | Operator::GreaterOrEqual
            | Operator::LessOrEqual => parse_finite(stored)
                .and_then(|n| numeric_compare(operator, n, clause.value()))
                .unwrap_or(false),
        };
    }

    false
}

/// Numeric comparison, or `None` when the operator is a text pattern or the
/// clause value is not a number.
fn numeric_compare(operator: Operator, stored: f64, wanted: &str) -> Option<bool> {
    if operator.is_text() {
        return None;
    }
    let wanted = parse_finite(wanted)?;
    let ordering = stored.partial_cmp(&wanted)?;
    Some(match operator {
        Operator::Equals => ordering == Ordering::Equal,
        Operator::GreaterThan => ordering == Ordering::Greater,
        Operator::LessThan => ordering == Ordering::Less,
        Operator::GreaterOrEqual => ordering != Ordering::Less,
        Operator::LessOrEqual => ordering != Ordering::Greater,
        Operator::Contains | Operator::StartsWith => return None,
    })
}
