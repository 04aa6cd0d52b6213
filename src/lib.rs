//! # OCI Rule Generator
//!
//! Build-file rule generation for packaging Go binaries as container images.
//!
//! For every `go_binary` in a directory, four rules are derived, each
//! consuming the previous one:
//! - `pkg_tar` named `<binary>_layer` holding the binary
//! - `oci_image` named `image` on top of the configured base image
//! - `platform_transition_filegroup` named `transitioned_image` selecting a
//!   Go toolchain per CPU architecture
//! - `oci_tarball` named `tarball`, tagged `<binary>:latest`
//!
//! The base image is configured with a directive in any build file and is
//! inherited by subdirectories:
//!
//! ```text
//! # gazelle:oci_base_image go @distroless//base
//! # gazelle:oci_base_image * //images:default
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use oci_rulegen::{BuildFile, ConfigureArgs, GenerateArgs, OciLanguage, Rule, StaticModuleMapping};
//! use std::path::Path;
//!
//! let lang = OciLanguage::new(StaticModuleMapping::new().with("rules_go", "io_bazel_rules_go"));
//! let file = BuildFile::new("").with_directive("oci_base_image", "go @distroless//base");
//!
//! let config = lang.configure(&ConfigureArgs {
//!     parent: None,
//!     rel: "",
//!     repo_root: Path::new("/src/repo"),
//!     file: Some(&file),
//! })?;
//!
//! let binaries = [Rule::new("go_binary", "server")];
//! let result = lang.generate_rules(&GenerateArgs {
//!     config: &config,
//!     rel: "",
//!     file: Some(&file),
//!     other_gen: &binaries,
//! })?;
//!
//! for rule in &result.generated {
//!     println!("{} {}", rule.kind(), rule.name());
//! }
//! # Ok::<(), oci_rulegen::OciError>(())
//! ```
//!
//! ## Errors
//!
//! Every [`OciError`] is fatal: a malformed directive or a missing base image
//! means the repository configuration is wrong. Hosts end the run with
//! [`OrAbort::or_abort`] instead of writing any rules for the directory.

pub mod codegen;
pub mod config;
pub mod error;
pub mod expr;
pub mod generate;
pub mod kinds;
pub mod label;
pub mod language;
pub mod loads;
pub mod rule;

pub use codegen::ImageChainGenerator;
pub use config::{
    configure, supports_lang, ApparentNameFn, BaseImageDirective, ConfigureArgs, ModuleMapping,
    OciConfig, StaticModuleMapping, BASE_IMAGE_DIRECTIVE, GO_LANG, WILDCARD_LANG,
};
pub use error::{LabelError, OciError, OrAbort, Result};
pub use expr::{Expr, KeyValue, Select, SelectEntry, DEFAULT_CONDITION};
pub use generate::{generate_rules, GenerateArgs, GenerateResult};
pub use label::Label;
pub use language::{OciLanguage, LANGUAGE_NAME};
pub use loads::apparent_loads;
pub use rule::{AttrValue, BuildFile, Directive, ImportMarker, KindInfo, LoadInfo, Rule};
