//! # Rules and Build Files
//!
//! In-memory build units as exchanged with the host: existing rules and
//! directives read from a directory's build file, and the rules generated
//! for it.

use crate::expr::{Expr, Select};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Value of a rule attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    String(String),
    List(Vec<String>),
    /// Serialized as `{"select": [...]}` so an empty select stays a select
    Select { select: Select },
}

impl AttrValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            AttrValue::List(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_select(&self) -> Option<&Select> {
        match self {
            AttrValue::Select { select } => Some(select),
            _ => None,
        }
    }

    /// Expression the build-file writer renders for this value
    pub fn to_expr(&self) -> Expr {
        match self {
            AttrValue::String(value) => Expr::string(value),
            AttrValue::List(values) => Expr::string_list(values),
            AttrValue::Select { select } => select.to_expr(),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::String(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::String(value)
    }
}

impl From<Vec<String>> for AttrValue {
    fn from(values: Vec<String>) -> Self {
        AttrValue::List(values)
    }
}

impl From<Select> for AttrValue {
    fn from(select: Select) -> Self {
        AttrValue::Select { select }
    }
}

/// A named, typed build unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    kind: String,
    name: String,
    #[serde(default)]
    attrs: BTreeMap<String, AttrValue>,
}

impl Rule {
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
            attrs: BTreeMap::new(),
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Same-package label of this rule, e.g. `:server`
    pub fn label(&self) -> String {
        format!(":{}", self.name)
    }

    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) {
        self.attrs.insert(key.into(), value.into());
    }

    pub fn attr(&self, key: &str) -> Option<&AttrValue> {
        self.attrs.get(key)
    }

    pub fn attrs(&self) -> &BTreeMap<String, AttrValue> {
        &self.attrs
    }
}

/// A `# gazelle:<key> <value>` comment from a build file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directive {
    pub key: String,
    pub value: String,
}

impl Directive {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// An already-parsed build file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildFile {
    /// Slash-separated package path relative to the repository root
    #[serde(default)]
    pub pkg: String,
    #[serde(default)]
    pub directives: Vec<Directive>,
    #[serde(default)]
    pub rules: Vec<Rule>,
}

impl BuildFile {
    pub fn new(pkg: impl Into<String>) -> Self {
        Self {
            pkg: pkg.into(),
            ..Default::default()
        }
    }

    pub fn with_directive(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.directives.push(Directive::new(key, value));
        self
    }

    /// Directives carrying `key`, in file order
    pub fn directives_for<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a Directive> + 'a {
        self.directives.iter().filter(move |d| d.key == key)
    }
}

/// How the host matches and merges attributes of a rule kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KindInfo {
    /// Attributes that must be non-empty for the rule to be kept
    pub non_empty_attrs: &'static [&'static str],
    /// Attributes the host may overwrite when merging with an existing rule
    pub mergeable_attrs: &'static [&'static str],
}

/// A `.bzl` file and the symbols it must define
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadInfo {
    pub name: String,
    pub symbols: Vec<String>,
}

/// Marks a generated rule as indexable without carrying import data
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportMarker;
