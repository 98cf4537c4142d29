//! Category type inference over field definitions and stored record values.
//!
//! Each [`Category`] pools evidence from every field of that kind. A field
//! declared numeric contributes numeric evidence and its values are not
//! inspected further; any other tracked field contributes text evidence and
//! then each of its non-empty values adds numeric evidence when it parses as
//! a finite number, text evidence otherwise.
//!
//! Evidence only ever accumulates, so the result does not depend on record
//! order and adding records can never remove a flag.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::models::{filterable_text, parse_finite, Category, Field, Record};

/// Evidence observed for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryProfile {
    pub category: Category,
    pub has_numeric_evidence: bool,
    pub has_text_evidence: bool,
}

impl CategoryProfile {
    /// A profile with no evidence.
    pub fn empty(category: Category) -> Self {
        Self {
            category,
            has_numeric_evidence: false,
            has_text_evidence: false,
        }
    }

    /// Whether anything was observed; profiles without evidence are not
    /// selectable in a filter clause.
    pub fn has_evidence(&self) -> bool {
        self.has_numeric_evidence || self.has_text_evidence
    }

    /// Both numeric and text values were observed.
    pub fn is_mixed(&self) -> bool {
        self.has_numeric_evidence && self.has_text_evidence
    }

    fn add_numeric(&mut self) {
        self.has_numeric_evidence = true;
    }

    fn add_text(&mut self) {
        self.has_text_evidence = true;
    }
}

/// One profile per category, always complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryProfiles {
    profiles: BTreeMap<Category, CategoryProfile>,
}

impl Default for CategoryProfiles {
    fn default() -> Self {
        Self {
            profiles: Category::ALL
                .iter()
                .map(|c| (*c, CategoryProfile::empty(*c)))
                .collect(),
        }
    }
}

impl CategoryProfiles {
    /// Profile for a category.
    pub fn get(&self, category: Category) -> CategoryProfile {
        self.profiles
            .get(&category)
            .copied()
            .unwrap_or_else(|| CategoryProfile::empty(category))
    }

    /// All profiles in category order.
    pub fn iter(&self) -> impl Iterator<Item = &CategoryProfile> {
        self.profiles.values()
    }

    /// Categories a user may pick for a clause.
    pub fn selectable(&self) -> Vec<Category> {
        self.iter()
            .filter(|p| p.has_evidence())
            .map(|p| p.category)
            .collect()
    }

    fn entry(&mut self, category: Category) -> &mut CategoryProfile {
        self.profiles
            .entry(category)
            .or_insert_with(|| CategoryProfile::empty(category))
    }
}

/// Index of fields by name. The first definition of a name wins.
pub(crate) fn field_index(fields: &[Field]) -> HashMap<&str, &Field> {
    let mut index = HashMap::with_capacity(fields.len());
    for field in fields {
        index.entry(field.name.as_str()).or_insert(field);
    }
    index
}

/// Infer per-category evidence from field definitions and record values.
pub fn infer_profiles(fields: &[Field], records: &[Record]) -> CategoryProfiles {
    let mut profiles = CategoryProfiles::default();

    for field in fields {
        let Some(category) = field.category() else {
            continue;
        };
        if field.declared_numeric {
            profiles.entry(category).add_numeric();
        } else {
            profiles.entry(category).add_text();
        }
    }

    let index = field_index(fields);
    for record in records {
        for (name, raw) in &record.values {
            let Some(field) = index.get(name.as_str()) else {
                trace!(record_id = record.id, field = %name, "Skipping value for unknown field");
                continue;
            };
            let Some(category) = field.category() else {
                continue;
            };
            if field.declared_numeric {
                continue;
            }
            let Some(text) = filterable_text(raw) else {
                continue;
            };
            if parse_finite(&text).is_some() {
                profiles.entry(category).add_numeric();
            } else {
                profiles.entry(category).add_text();
            }
        }
    }

    debug!(
        subsystem = "engine",
        component = "inference",
        field_count = fields.len(),
        record_count = records.len(),
        selectable = profiles.selectable().len(),
        "Category profiles inferred"
    );
    profiles
}
