//! # Host Extension Point
//!
//! [`OciLanguage`] is the object a build-file generator host drives: once per
//! directory it calls [`OciLanguage::configure`], then
//! [`OciLanguage::generate_rules`] with the configuration it got back. The
//! host stores each directory's configuration and passes it as the parent of
//! the directory's children.

use crate::config::{self, ConfigureArgs, ModuleMapping, OciConfig, StaticModuleMapping, BASE_IMAGE_DIRECTIVE};
use crate::error::Result;
use crate::generate::{self, GenerateArgs, GenerateResult};
use crate::kinds;
use crate::label::Label;
use crate::loads;
use crate::rule::{BuildFile, KindInfo, LoadInfo, Rule};
use std::collections::BTreeMap;

/// Prefix of the generated kinds' family, and the directive namespace
pub const LANGUAGE_NAME: &str = "oci";

/// Generator of OCI image rules for Go binaries
pub struct OciLanguage {
    modules: Box<dyn ModuleMapping>,
}

impl OciLanguage {
    pub fn new(modules: impl ModuleMapping + 'static) -> Self {
        Self {
            modules: Box::new(modules),
        }
    }

    pub fn name(&self) -> &'static str {
        LANGUAGE_NAME
    }

    /// Directive keys this generator interprets
    pub fn known_directives(&self) -> &'static [&'static str] {
        &[BASE_IMAGE_DIRECTIVE]
    }

    pub fn kinds(&self) -> BTreeMap<&'static str, KindInfo> {
        kinds::kinds()
    }

    /// Configuration for one directory, see [`config::configure`]
    pub fn configure(&self, args: &ConfigureArgs<'_>) -> Result<OciConfig> {
        config::configure(args, self.modules.as_ref())
    }

    /// Rules for one directory, see [`generate::generate_rules`]
    pub fn generate_rules(&self, args: &GenerateArgs<'_>) -> Result<GenerateResult> {
        generate::generate_rules(args)
    }

    /// Generated rules carry no import specs of their own
    pub fn imports(&self, _rule: &Rule, _file: &BuildFile) -> Option<Vec<String>> {
        None
    }

    pub fn embeds(&self, _rule: &Rule, _from: &Label) -> Vec<Label> {
        Vec::new()
    }

    /// Nothing to migrate
    pub fn fix(&self, _file: &mut BuildFile) {}

    pub fn apparent_loads(&self, module_to_apparent_name: &dyn Fn(&str) -> String) -> Vec<LoadInfo> {
        loads::apparent_loads(module_to_apparent_name)
    }
}

impl Default for OciLanguage {
    fn default() -> Self {
        Self::new(StaticModuleMapping::new())
    }
}
