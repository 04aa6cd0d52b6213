//! # Target Labels
//!
//! Parsing and rendering of build target labels such as `@repo//pkg:name`.

use crate::error::LabelError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A parsed build target label
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Label {
    repo: String,
    pkg: String,
    name: String,
    relative: bool,
    canonical: bool,
}

impl Label {
    /// Sentinel meaning "no label configured"
    pub const NO_LABEL: Label = Label {
        repo: String::new(),
        pkg: String::new(),
        name: String::new(),
        relative: false,
        canonical: false,
    };

    /// Parse a label string
    ///
    /// Accepts `@repo//pkg:name`, `@repo//pkg`, `@repo`, `//pkg:name`,
    /// `//pkg`, `:name` and `name`. A leading `@@` marks a canonical
    /// repository name.
    pub fn parse(s: &str) -> Result<Label, LabelError> {
        if s.is_empty() {
            return Err(LabelError::Empty);
        }

        let mut rest = s;
        let mut repo = "";
        let mut relative = true;
        let mut canonical = false;

        if let Some(after) = rest.strip_prefix('@') {
            relative = false;
            let after = match after.strip_prefix('@') {
                Some(stripped) => {
                    canonical = true;
                    stripped
                }
                None => after,
            };
            let (name, tail) = match after.find("//") {
                Some(end) => after.split_at(end),
                None => (after, ""),
            };
            if name.is_empty() || !name.chars().all(is_repo_char) {
                return Err(LabelError::InvalidRepo(s.to_string()));
            }
            repo = name;

            // "@repo" shorthand for "@repo//:repo"
            if tail.is_empty() {
                return Ok(Label {
                    repo: repo.to_string(),
                    pkg: String::new(),
                    name: repo.to_string(),
                    relative,
                    canonical,
                });
            }
            rest = tail;
        }

        let mut pkg = "";
        if let Some(after) = rest.strip_prefix("//") {
            relative = false;
            let (path, tail) = match after.find(':') {
                Some(end) => after.split_at(end),
                None => (after, ""),
            };
            if !is_valid_package(path) {
                return Err(LabelError::InvalidPackage(s.to_string()));
            }
            pkg = path;
            rest = tail;
        }

        let name = match rest.strip_prefix(':') {
            Some(name) => name,
            None if rest.is_empty() => last_segment(pkg),
            None => rest,
        };
        if !is_valid_name(name) {
            return Err(LabelError::InvalidName(s.to_string()));
        }

        Ok(Label {
            repo: repo.to_string(),
            pkg: pkg.to_string(),
            name: name.to_string(),
            relative,
            canonical,
        })
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    pub fn pkg(&self) -> &str {
        &self.pkg
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_relative(&self) -> bool {
        self.relative
    }

    /// Whether this is the [`Label::NO_LABEL`] sentinel
    pub fn is_none(&self) -> bool {
        *self == Self::NO_LABEL
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.relative {
            return write!(f, ":{}", self.name);
        }

        if !self.repo.is_empty() {
            let at = if self.canonical { "@@" } else { "@" };
            write!(f, "{}{}", at, self.repo)?;
            if self.pkg.is_empty() && self.name == self.repo {
                return Ok(());
            }
        }

        if !self.pkg.is_empty() && last_segment(&self.pkg) == self.name {
            write!(f, "//{}", self.pkg)
        } else {
            write!(f, "//{}:{}", self.pkg, self.name)
        }
    }
}

impl TryFrom<String> for Label {
    type Error = LabelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Label::parse(&value)
    }
}

impl From<Label> for String {
    fn from(label: Label) -> Self {
        label.to_string()
    }
}

impl std::str::FromStr for Label {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Label::parse(s)
    }
}

fn is_repo_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '~' | '+' | '-')
}

fn is_valid_package(pkg: &str) -> bool {
    if pkg.is_empty() {
        return true;
    }
    !pkg.starts_with('/')
        && !pkg.ends_with('/')
        && !pkg.contains("//")
        && !pkg.chars().any(|c| matches!(c, ':' | '@') || c.is_whitespace())
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('/')
        && !name.ends_with('/')
        && !name.chars().any(|c| c == ':' || c.is_whitespace())
}

fn last_segment(pkg: &str) -> &str {
    pkg.rsplit('/').next().unwrap_or(pkg)
}
