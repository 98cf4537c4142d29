//! Operator taxonomy and per-category operator resolution.
//!
//! `Equals` is valid for any observed data. The comparison operators only
//! make sense for numeric data and the pattern operators only for text, so
//! the set offered for a category follows its [`CategoryProfile`]:
//!
//! | Evidence | Operators |
//! |----------|-----------|
//! | numeric + text | `Equals`, numeric, text |
//! | numeric | `Equals`, numeric |
//! | text | `Equals`, text |
//! | none | (empty) |

use serde::{Deserialize, Serialize};

use crate::inference::CategoryProfile;

/// A filter comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Equals,
    GreaterThan,
    LessThan,
    GreaterOrEqual,
    LessOrEqual,
    Contains,
    StartsWith,
}

impl Operator {
    /// Operators that require numeric data, in display order.
    pub const NUMERIC: [Operator; 4] = [
        Operator::GreaterThan,
        Operator::LessThan,
        Operator::GreaterOrEqual,
        Operator::LessOrEqual,
    ];

    /// Operators that require text data, in display order.
    pub const TEXT: [Operator; 2] = [Operator::Contains, Operator::StartsWith];

    /// Comparator keyword in the backend query grammar.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::Equals => "eq",
            Self::GreaterThan => "gt",
            Self::LessThan => "lt",
            Self::GreaterOrEqual => "gte",
            Self::LessOrEqual => "lte",
            Self::Contains => "ilike",
            Self::StartsWith => "like",
        }
    }

    /// Label shown in the operator picker.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Equals => "Equals",
            Self::GreaterThan => "Greater than",
            Self::LessThan => "Less than",
            Self::GreaterOrEqual => "Greater than or equal",
            Self::LessOrEqual => "Less than or equal",
            Self::Contains => "Contains",
            Self::StartsWith => "Starts with",
        }
    }

    pub fn is_numeric(&self) -> bool {
        Self::NUMERIC.contains(self)
    }

    pub fn is_text(&self) -> bool {
        Self::TEXT.contains(self)
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

impl std::str::FromStr for Operator {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "eq" | "equals" | "=" => Ok(Self::Equals),
            "gt" | "greater_than" | ">" => Ok(Self::GreaterThan),
            "lt" | "less_than" | "<" => Ok(Self::LessThan),
            "gte" | "greater_or_equal" | ">=" => Ok(Self::GreaterOrEqual),
            "lte" | "less_or_equal" | "<=" => Ok(Self::LessOrEqual),
            "ilike" | "contains" => Ok(Self::Contains),
            "like" | "starts_with" => Ok(Self::StartsWith),
            _ => Err(format!("Invalid operator: {}", s)),
        }
    }
}

/// An operator paired with its display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OperatorOption {
    pub operator: Operator,
    pub label: &'static str,
}

impl From<Operator> for OperatorOption {
    fn from(operator: Operator) -> Self {
        Self {
            operator,
            label: operator.label(),
        }
    }
}

/// Description shown when both kinds of data were observed.
pub const MIXED_DESCRIPTION: &str =
    "This field contains both numbers and text. Number and text comparisons are available.";

/// Description shown for numeric-only data.
pub const NUMERIC_DESCRIPTION: &str =
    "This field contains numbers. Use numeric comparisons such as greater than or less than.";

/// Description shown for text-only data.
pub const TEXT_DESCRIPTION: &str =
    "This field contains text. Use text matching such as contains or starts with.";

/// Legal operators for a category, `Equals` first.
pub fn operators_for(profile: &CategoryProfile) -> Vec<OperatorOption> {
    if !profile.has_evidence() {
        return Vec::new();
    }

    let mut ops = vec![Operator::Equals];
    if profile.has_numeric_evidence {
        ops.extend(Operator::NUMERIC);
    }
    if profile.has_text_evidence {
        ops.extend(Operator::TEXT);
    }
    ops.into_iter().map(OperatorOption::from).collect()
}

/// User-facing description of the data kind behind a category.
pub fn description_for(profile: &CategoryProfile) -> &'static str {
    match (profile.has_numeric_evidence, profile.has_text_evidence) {
        (true, true) => MIXED_DESCRIPTION,
        (true, false) => NUMERIC_DESCRIPTION,
        (false, _) => TEXT_DESCRIPTION,
    }
}

/// Whether `operator` is offered for `profile`.
pub fn is_legal(profile: &CategoryProfile, operator: Operator) -> bool {
    operators_for(profile)
        .iter()
        .any(|option| option.operator == operator)
}
