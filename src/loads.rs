//! # Load Statements
//!
//! The `.bzl` files that define the generated rule kinds.

use crate::kinds::{IMAGE_KIND, LAYER_KIND, TARBALL_KIND, TRANSITION_KIND};
use crate::rule::LoadInfo;

/// Load information for the generated kinds
///
/// `module_to_apparent_name` returns the apparent repository name configured
/// for a module, or `""` when there is none, in which case the module's
/// well-known name is used.
pub fn apparent_loads(module_to_apparent_name: &dyn Fn(&str) -> String) -> Vec<LoadInfo> {
    let repo = |module: &str| {
        let name = module_to_apparent_name(module);
        if name.is_empty() {
            module.to_string()
        } else {
            name
        }
    };

    vec![
        LoadInfo {
            name: format!("@{}//lib:transitions.bzl", repo("aspect_bazel_lib")),
            symbols: vec![TRANSITION_KIND.to_string()],
        },
        LoadInfo {
            name: format!("@{}//oci:defs.bzl", repo("rules_oci")),
            symbols: vec![IMAGE_KIND.to_string(), TARBALL_KIND.to_string()],
        },
        LoadInfo {
            name: format!("@{}//pkg:tar.bzl", repo("rules_pkg")),
            symbols: vec![LAYER_KIND.to_string()],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_names() {
        let loads = apparent_loads(&|_| String::new());
        let names: Vec<_> = loads.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "@aspect_bazel_lib//lib:transitions.bzl",
                "@rules_oci//oci:defs.bzl",
                "@rules_pkg//pkg:tar.bzl",
            ]
        );
        assert_eq!(loads[1].symbols, vec!["oci_image", "oci_tarball"]);
    }

    #[test]
    fn test_apparent_names() {
        let loads = apparent_loads(&|module| match module {
            "rules_oci" => "oci".to_string(),
            _ => String::new(),
        });
        assert_eq!(loads[1].name, "@oci//oci:defs.bzl");
        assert_eq!(loads[2].name, "@rules_pkg//pkg:tar.bzl");
    }
}
