//! Backend query string encoding for filter sets.
//!
//! The backend speaks a PostgREST-style grammar. Every clause becomes one
//! query parameter comparing a member of the record's `values` JSON column:
//!
//! ```text
//! /record?form_id=eq.5&values->>%22plain_text%22=ilike.*hello*
//! ```
//!
//! Members are always extracted as text (`->>`) and clauses are always joined
//! with `&`, so the backend ANDs them. A clause's [`Combinator`] does not
//! change the encoding.
//!
//! [`Combinator`]: crate::filter_set::Combinator

use tracing::debug;

use crate::defaults::{
    AND_SEPARATOR, FORM_ID_COLUMN, JSON_TEXT_EXTRACT, RECORD_RESOURCE, VALUES_COLUMN, WILDCARD,
};
use crate::filter_set::{FilterClause, FilterSet};
use crate::operators::Operator;

/// Unfiltered record query for a form.
pub fn base_query(form_id: i64) -> String {
    format!("{}?{}=eq.{}", RECORD_RESOURCE, FORM_ID_COLUMN, form_id)
}

/// Encode a filter set as a record query for `form_id`.
pub fn encode(form_id: i64, filters: &FilterSet) -> String {
    let mut query = base_query(form_id);
    for clause in filters {
        query.push_str(AND_SEPARATOR);
        query.push_str(&encode_clause(clause));
    }

    debug!(
        subsystem = "engine",
        component = "encoder",
        form_id,
        clause_count = filters.len(),
        query = %query,
        "Filter set encoded"
    );
    query
}

/// Single `path=comparator.value` parameter for a clause.
pub fn encode_clause(clause: &FilterClause) -> String {
    let key = format!("\"{}\"", clause.category().key());
    format!(
        "{}{}{}={}",
        VALUES_COLUMN,
        JSON_TEXT_EXTRACT,
        urlencoding::encode(&key),
        comparator(clause.operator(), clause.value())
    )
}

fn comparator(operator: Operator, value: &str) -> String {
    let value = urlencoding::encode(value);
    let name = operator.wire_name();
    match operator {
        Operator::Contains => format!("{}.{}{}{}", name, WILDCARD, value, WILDCARD),
        Operator::StartsWith => format!("{}.{}{}", name, value, WILDCARD),
        Operator::Equals
        | Operator::GreaterThan
        | Operator::LessThan
        | Operator::GreaterOrEqual
        | Operator::LessOrEqual => format!("{}.{}", name, value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter_set::{ClauseDraft, Combinator};
    use crate::inference::{infer_profiles, CategoryProfiles};
    use crate::models::{Category, Field, Record};

    fn mixed_profiles() -> CategoryProfiles {
        let fields = vec![
            Field::new("Name", Category::PlainText),
            Field::new("Notes", Category::MultilineText),
        ];
        let records = vec![
            Record::new(1).with_value("Name", "12"),
            Record::new(2).with_value("Notes", "3"),
        ];
        infer_profiles(&fields, &records)
    }

    fn set_of(drafts: Vec<ClauseDraft>) -> FilterSet {
        let profiles = mixed_profiles();
        let mut set = FilterSet::new();
        for draft in drafts {
            set.push(draft, &profiles).unwrap();
        }
        set
    }

    fn draft(category: Category, operator: Operator, value: &str) -> ClauseDraft {
        ClauseDraft::new()
            .category(category)
            .operator(operator)
            .value(value)
    }

    #[test]
    fn test_empty_set_is_base_query() {
        assert_eq!(encode(5, &FilterSet::new()), "/record?form_id=eq.5");
        assert_eq!(encode(5, &FilterSet::new()), base_query(5));
    }

    #[test]
    fn test_equals_encodes_key_and_value() {
        let set = set_of(vec![draft(Category::PlainText, Operator::Equals, "A B")]);
        assert_eq!(
            encode(5, &set),
            "/record?form_id=eq.5&values->>%22plain_text%22=eq.A%20B"
        );
    }

    #[test]
    fn test_comparators() {
        let cases = [
            (Operator::GreaterThan, "10", "gt.10"),
            (Operator::LessThan, "10", "lt.10"),
            (Operator::GreaterOrEqual, "1.5", "gte.1.5"),
            (Operator::LessOrEqual, "-3", "lte.-3"),
            (Operator::Contains, "hello", "ilike.*hello*"),
            (Operator::StartsWith, "he llo", "like.he%20llo*"),
        ];
        for (operator, value, expected) in cases {
            let set = set_of(vec![draft(Category::MultilineText, operator, value)]);
            let clause = set.iter().next().unwrap();
            assert_eq!(
                encode_clause(clause),
                format!("values->>%22multiline_text%22={}", expected)
            );
        }
    }

    #[test]
    fn test_reserved_characters_in_value_are_escaped() {
        let set = set_of(vec![draft(Category::PlainText, Operator::Equals, "a&b=c")]);
        assert!(encode(1, &set).ends_with("=eq.a%26b%3Dc"));
    }

    #[test]
    fn test_or_combinator_still_joins_with_and() {
        let set = set_of(vec![
            draft(Category::PlainText, Operator::Contains, "x"),
            draft(Category::MultilineText, Operator::Equals, "y").combinator(Combinator::Or),
        ]);
        assert_eq!(
            encode(9, &set),
            "/record?form_id=eq.9\
             &values->>%22plain_text%22=ilike.*x*\
             &values->>%22multiline_text%22=eq.y"
        );
    }
}
