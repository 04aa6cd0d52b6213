//! # Directory Rule Generation
//!
//! Main entry point for generating the image rules of one directory.

use crate::codegen::ImageChainGenerator;
use crate::config::OciConfig;
use crate::error::Result;
use crate::rule::{BuildFile, ImportMarker, Rule};
use serde::Serialize;

/// Inputs for generating one directory's rules
#[derive(Debug, Clone, Copy)]
pub struct GenerateArgs<'a> {
    /// Configuration produced for this directory by [`crate::config::configure`]
    pub config: &'a OciConfig,
    /// Slash-separated path from the repository root
    pub rel: &'a str,
    /// The directory's build file, if it has one
    pub file: Option<&'a BuildFile>,
    /// Rules generated earlier in this pass by other language generators
    pub other_gen: &'a [Rule],
}

/// Rules generated for one directory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerateResult {
    pub generated: Vec<Rule>,
    /// One marker per generated rule, so the host indexes all of them
    pub imports: Vec<ImportMarker>,
}

impl GenerateResult {
    pub fn is_empty(&self) -> bool {
        self.generated.is_empty()
    }

    fn push(&mut self, rule: Rule) {
        self.generated.push(rule);
        self.imports.push(ImportMarker);
    }

    /// Serialize for hand-off to a host process
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Generate the image rules for a directory
///
/// Every `go_binary` among `args.other_gen` gets its own layer, image,
/// transition and tarball rules, in the order the binaries appear. All other
/// rules are ignored. A directory without a build file generates nothing.
///
/// # Returns
///
/// * `Ok(GenerateResult)` - The generated rules, possibly none
/// * `Err(OciError)` - A fatal configuration error; nothing should be written
///   for this directory
///
/// # Examples
///
/// ```rust
/// use oci_rulegen::{generate_rules, BuildFile, GenerateArgs, Label, OciConfig, Rule};
///
/// let config = OciConfig::new().with_base_image("go", Label::parse("@distroless//base")?);
/// let file = BuildFile::new("cmd/server");
/// let binaries = [Rule::new("go_binary", "server")];
///
/// let result = generate_rules(&GenerateArgs {
///     config: &config,
///     rel: "cmd/server",
///     file: Some(&file),
///     other_gen: &binaries,
/// })?;
/// assert_eq!(result.generated.len(), 4);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn generate_rules(args: &GenerateArgs<'_>) -> Result<GenerateResult> {
    let mut result = GenerateResult::default();
    if args.file.is_none() {
        return Ok(result);
    }

    tracing::info!("[oci] Generating rules for '{}' ({} candidate rules)",
        args.rel,
        args.other_gen.len());

    let generator = ImageChainGenerator::new(args.config);
    for rule in args.other_gen {
        if !ImageChainGenerator::qualifies(rule) {
            tracing::debug!("[oci] Skipping {} {}", rule.kind(), rule.name());
            continue;
        }

        for generated in generator.generate_chain(rule)? {
            tracing::debug!("[oci]   - {} {}", generated.kind(), generated.name());
            result.push(generated);
        }
    }

    tracing::info!("[oci] Generated {} rules for '{}'", result.generated.len(), args.rel);

    Ok(result)
}
