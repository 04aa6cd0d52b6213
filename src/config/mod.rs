//! # Directory Configuration
//!
//! Per-directory configuration state. Each directory starts from a copy of
//! its parent's [`OciConfig`] and applies the directives found in its own
//! build file; nothing a directory applies is visible to its parent or
//! siblings.

mod directive;

pub use directive::*;

use crate::error::{OciError, Result};
use crate::label::Label;
use crate::rule::BuildFile;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Language tag matching any language without its own base image
pub const WILDCARD_LANG: &str = "*";

/// The concrete language whose binaries are packaged
pub const GO_LANG: &str = "go";

const LANGS: &[&str] = &[GO_LANG, WILDCARD_LANG];

/// Resolves a module name to its apparent repository name, or `""` if the
/// module is unknown
pub type ApparentNameFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Whether `lang` is recognized by this version of the generator
///
/// Directives written for languages added later are rejected instead of
/// being silently ignored.
pub fn supports_lang(lang: &str) -> bool {
    LANGS.contains(&lang)
}

/// Source of the module to apparent name mapping, consulted once at the
/// repository root
pub trait ModuleMapping: Send + Sync {
    fn module_to_apparent_name(
        &self,
        repo_root: &Path,
    ) -> std::result::Result<ApparentNameFn, Box<dyn std::error::Error + Send + Sync>>;
}

impl<F> ModuleMapping for F
where
    F: Fn(&Path) -> std::result::Result<ApparentNameFn, Box<dyn std::error::Error + Send + Sync>>
        + Send
        + Sync,
{
    fn module_to_apparent_name(
        &self,
        repo_root: &Path,
    ) -> std::result::Result<ApparentNameFn, Box<dyn std::error::Error + Send + Sync>> {
        self(repo_root)
    }
}

/// Mapping already extracted by the host, e.g. from `bazel_dep(repo_name = ...)`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaticModuleMapping {
    names: HashMap<String, String>,
}

impl StaticModuleMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, module: impl Into<String>, apparent_name: impl Into<String>) -> Self {
        self.names.insert(module.into(), apparent_name.into());
        self
    }
}

impl ModuleMapping for StaticModuleMapping {
    fn module_to_apparent_name(
        &self,
        _repo_root: &Path,
    ) -> std::result::Result<ApparentNameFn, Box<dyn std::error::Error + Send + Sync>> {
        let names = self.names.clone();
        Ok(Arc::new(move |module: &str| {
            names.get(module).cloned().unwrap_or_default()
        }))
    }
}

/// Configuration node for one directory
#[derive(Clone)]
pub struct OciConfig {
    base_images: BTreeMap<String, Label>,
    module_to_apparent_name: ApparentNameFn,
}

impl OciConfig {
    /// Empty configuration with an identity module resolver
    pub fn new() -> Self {
        Self {
            base_images: BTreeMap::new(),
            module_to_apparent_name: Arc::new(|module: &str| module.to_string()),
        }
    }

    pub fn supports_lang(&self, lang: &str) -> bool {
        supports_lang(lang)
    }

    /// Base image for `lang`, falling back to the wildcard entry
    ///
    /// Returns [`Label::NO_LABEL`] when neither is configured.
    pub fn base_image(&self, lang: &str) -> Label {
        self.base_images
            .get(lang)
            .or_else(|| self.base_images.get(WILDCARD_LANG))
            .cloned()
            .unwrap_or(Label::NO_LABEL)
    }

    pub fn base_images(&self) -> &BTreeMap<String, Label> {
        &self.base_images
    }

    /// Apparent repository name for `module`
    ///
    /// Falls back to the legacy WORKSPACE name for `rules_go`, and to the
    /// module name itself for anything else the resolver doesn't know.
    pub fn repo_name(&self, module: &str) -> String {
        let name = (self.module_to_apparent_name)(module);
        if !name.is_empty() {
            return name;
        }
        match module {
            "rules_go" => "io_bazel_rules_go".to_string(),
            _ => module.to_string(),
        }
    }

    /// Copy of this node with `base` recorded for `lang`
    pub fn with_base_image(mut self, lang: impl Into<String>, base: Label) -> Self {
        self.base_images.insert(lang.into(), base);
        self
    }

    pub fn with_module_resolver(mut self, resolver: ApparentNameFn) -> Self {
        self.module_to_apparent_name = resolver;
        self
    }
}

impl Default for OciConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for OciConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OciConfig")
            .field("base_images", &self.base_images)
            .finish_non_exhaustive()
    }
}

/// Inputs for configuring one directory
#[derive(Debug, Clone, Copy)]
pub struct ConfigureArgs<'a> {
    /// Configuration of the parent directory, `None` at the top of the walk
    pub parent: Option<&'a OciConfig>,
    /// Slash-separated path from the repository root, `""` for the root
    pub rel: &'a str,
    pub repo_root: &'a Path,
    /// The directory's build file, if it has one
    pub file: Option<&'a BuildFile>,
}

impl ConfigureArgs<'_> {
    pub fn is_root(&self) -> bool {
        self.rel.is_empty()
    }
}

/// Produce the configuration for a directory
///
/// Starts from a copy of the parent node (or an empty node), resolves the
/// module mapping at the repository root, then folds the directory's
/// `oci_base_image` directives over the copy.
pub fn configure(args: &ConfigureArgs<'_>, modules: &dyn ModuleMapping) -> Result<OciConfig> {
    let mut cfg = args.parent.cloned().unwrap_or_default();

    if args.is_root() {
        let resolver = modules
            .module_to_apparent_name(args.repo_root)
            .map_err(OciError::ModuleMapping)?;
        cfg = cfg.with_module_resolver(resolver);
        tracing::debug!("[oci] Resolved module names for {}", args.repo_root.display());
    }

    let Some(file) = args.file else {
        return Ok(cfg);
    };

    file.directives_for(BASE_IMAGE_DIRECTIVE)
        .try_fold(cfg, |cfg, directive| apply_base_image_directive(cfg, &directive.value))
}
