//! # Image Chain Generator
//!
//! Derives the rules that package one binary into an image tarball:
//!
//! ```text
//! pkg_tar <- oci_image <- platform_transition_filegroup <- oci_tarball
//! ```

use crate::config::{OciConfig, GO_LANG};
use crate::error::{OciError, Result};
use crate::expr::Select;
use crate::kinds::{GO_BINARY_KIND, IMAGE_KIND, LAYER_KIND, TARBALL_KIND, TRANSITION_KIND};
use crate::rule::Rule;

/// Module providing the Go toolchains the image is transitioned to
const TOOLCHAIN_MODULE: &str = "rules_go";

/// CPU constraint and the toolchain package targeting it
const PLATFORM_TOOLCHAINS: &[(&str, &str)] = &[
    ("@platforms//cpu:arm64", "//go/toolchain:linux_arm64"),
    ("@platforms//cpu:x86_64", "//go/toolchain:linux_amd64"),
];

pub const IMAGE_RULE_NAME: &str = "image";
pub const TRANSITION_RULE_NAME: &str = "transitioned_image";
pub const TARBALL_RULE_NAME: &str = "tarball";

/// Generates the image rule chain for binaries in one directory
pub struct ImageChainGenerator<'a> {
    config: &'a OciConfig,
}

impl<'a> ImageChainGenerator<'a> {
    pub fn new(config: &'a OciConfig) -> Self {
        Self { config }
    }

    /// Whether `rule` is a binary this generator packages
    pub fn qualifies(rule: &Rule) -> bool {
        rule.kind() == GO_BINARY_KIND
    }

    /// Generate the four chained rules for `binary`, in dependency order
    ///
    /// # Errors
    ///
    /// * [`OciError::MissingBaseImage`] if no base image is configured for Go
    pub fn generate_chain(&self, binary: &Rule) -> Result<Vec<Rule>> {
        let layer = Self::layer_rule(binary);
        let image = self.image_rule(binary, &layer)?;
        let transition = self.transition_rule(&image);
        let tarball = Self::tarball_rule(binary, &transition);

        Ok(vec![layer, image, transition, tarball])
    }

    fn layer_rule(binary: &Rule) -> Rule {
        let mut layer = Rule::new(LAYER_KIND, format!("{}_layer", binary.name()));
        layer.set_attr("srcs", vec![binary.label()]);
        layer
    }

    fn image_rule(&self, binary: &Rule, layer: &Rule) -> Result<Rule> {
        let base = self.config.base_image(GO_LANG);
        if base.is_none() {
            return Err(OciError::MissingBaseImage(GO_LANG.to_string()));
        }

        let mut image = Rule::new(IMAGE_KIND, IMAGE_RULE_NAME);
        image.set_attr("base", base.to_string());
        image.set_attr("entrypoint", vec![format!("/{}", binary.name())]);
        image.set_attr("tars", vec![layer.label()]);
        Ok(image)
    }

    fn transition_rule(&self, image: &Rule) -> Rule {
        let mut transition = Rule::new(TRANSITION_KIND, TRANSITION_RULE_NAME);
        transition.set_attr("srcs", vec![image.label()]);
        transition.set_attr("target_platform", self.target_platforms());
        transition
    }

    fn tarball_rule(binary: &Rule, transition: &Rule) -> Rule {
        let mut tarball = Rule::new(TARBALL_KIND, TARBALL_RULE_NAME);
        tarball.set_attr("image", transition.label());
        tarball.set_attr("repo_tags", vec![format!("{}:latest", binary.name())]);
        tarball
    }

    /// Toolchain to transition to for each CPU constraint
    fn target_platforms(&self) -> Select {
        let repo = self.config.repo_name(TOOLCHAIN_MODULE);
        PLATFORM_TOOLCHAINS
            .iter()
            .map(|(constraint, toolchain)| (*constraint, format!("@{}{}", repo, toolchain)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::Label;
    use crate::rule::AttrValue;

    fn config() -> OciConfig {
        OciConfig::new().with_base_image("go", Label::parse("@distroless//base").unwrap())
    }

    #[test]
    fn test_qualifies() {
        assert!(ImageChainGenerator::qualifies(&Rule::new("go_binary", "server")));
        assert!(!ImageChainGenerator::qualifies(&Rule::new("go_library", "server_lib")));
    }

    #[test]
    fn test_chain_links() {
        let cfg = config();
        let chain = ImageChainGenerator::new(&cfg)
            .generate_chain(&Rule::new("go_binary", "server"))
            .unwrap();

        let names: Vec<_> = chain.iter().map(Rule::name).collect();
        assert_eq!(names, vec!["server_layer", "image", "transitioned_image", "tarball"]);

        let kinds: Vec<_> = chain.iter().map(Rule::kind).collect();
        assert_eq!(kinds, vec![LAYER_KIND, IMAGE_KIND, TRANSITION_KIND, TARBALL_KIND]);

        assert_eq!(chain[0].attr("srcs"), Some(&AttrValue::List(vec![":server".into()])));
        assert_eq!(chain[1].attr("tars"), Some(&AttrValue::List(vec![":server_layer".into()])));
        assert_eq!(chain[2].attr("srcs"), Some(&AttrValue::List(vec![":image".into()])));
        assert_eq!(chain[3].attr("image"), Some(&AttrValue::String(":transitioned_image".into())));
    }

    #[test]
    fn test_wildcard_base_image() {
        let cfg = OciConfig::new().with_base_image("*", Label::parse("//images:any").unwrap());
        let chain = ImageChainGenerator::new(&cfg)
            .generate_chain(&Rule::new("go_binary", "cli"))
            .unwrap();
        assert_eq!(chain[1].attr("base"), Some(&AttrValue::String("//images:any".into())));
    }

    #[test]
    fn test_missing_base_image() {
        let cfg = OciConfig::new();
        let err = ImageChainGenerator::new(&cfg)
            .generate_chain(&Rule::new("go_binary", "server"))
            .unwrap_err();
        assert!(matches!(err, OciError::MissingBaseImage(ref lang) if lang == "go"));
    }

    #[test]
    fn test_target_platforms_use_resolved_repo() {
        let cfg = config().with_module_resolver(std::sync::Arc::new(|m: &str| match m {
            "rules_go" => "my_rules_go".to_string(),
            _ => String::new(),
        }));
        let select = ImageChainGenerator::new(&cfg).target_platforms();

        assert_eq!(select.len(), 2);
        assert_eq!(
            select.get("@platforms//cpu:x86_64"),
            Some("@my_rules_go//go/toolchain:linux_amd64")
        );
        assert!(!select.has_default());
    }

    #[test]
    fn test_image_attrs_render() {
        let cfg = config();
        let chain = ImageChainGenerator::new(&cfg)
            .generate_chain(&Rule::new("go_binary", "server"))
            .unwrap();
        let image = &chain[1];

        let render = |key: &str| image.attr(key).map(|value| value.to_expr().to_string());
        assert_eq!(render("entrypoint").as_deref(), Some(r#"["/server"]"#));
        assert_eq!(render("base").as_deref(), Some(r#""@distroless//base""#));
        assert_eq!(render("tars").as_deref(), Some(r#"[":server_layer"]"#));
    }
}
