//! # Conditional Values
//!
//! `select()` expressions that pick an attribute value by matching condition.

use super::{Expr, KeyValue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Reserved condition key matched when no other condition applies
pub const DEFAULT_CONDITION: &str = "//conditions:default";

/// One `condition: value` branch of a [`Select`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectEntry {
    pub condition: String,
    pub value: String,
}

/// A conditional value in canonical order
///
/// Conditions are sorted ascending, with [`DEFAULT_CONDITION`] (if present)
/// always last. The order is fixed so regenerating the same mapping renders
/// byte-identical text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<SelectEntry>", into = "Vec<SelectEntry>")]
pub struct Select {
    entries: Vec<SelectEntry>,
}

impl Select {
    /// Build a conditional value from a condition to value mapping
    ///
    /// Later duplicates of a condition replace earlier ones.
    pub fn new<I, K, V>(mapping: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut conditions: BTreeMap<String, String> = mapping
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        let default = conditions.remove(DEFAULT_CONDITION);

        let mut entries: Vec<SelectEntry> = conditions
            .into_iter()
            .map(|(condition, value)| SelectEntry { condition, value })
            .collect();
        if let Some(value) = default {
            entries.push(SelectEntry {
                condition: DEFAULT_CONDITION.to_string(),
                value,
            });
        }

        Self { entries }
    }

    pub fn entries(&self) -> &[SelectEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn has_default(&self) -> bool {
        self.entries
            .last()
            .is_some_and(|entry| entry.condition == DEFAULT_CONDITION)
    }

    /// Value for a condition, if present
    pub fn get(&self, condition: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.condition == condition)
            .map(|entry| entry.value.as_str())
    }

    /// `select({...})` with one branch per line
    pub fn to_expr(&self) -> Expr {
        let entries = self
            .entries
            .iter()
            .map(|entry| KeyValue {
                key: Expr::string(&entry.condition),
                value: Expr::string(&entry.value),
            })
            .collect();

        Expr::Call {
            func: Box::new(Expr::ident("select")),
            args: vec![Expr::Dict {
                entries,
                force_multiline: true,
            }],
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Select
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Select::new(iter)
    }
}

impl From<Vec<SelectEntry>> for Select {
    fn from(entries: Vec<SelectEntry>) -> Self {
        Select::new(entries.into_iter().map(|entry| (entry.condition, entry.value)))
    }
}

impl From<Select> for Vec<SelectEntry> {
    fn from(select: Select) -> Self {
        select.entries
    }
}
