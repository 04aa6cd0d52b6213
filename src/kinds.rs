//! # Rule Kinds
//!
//! Kinds of rules read and generated, and how the host merges them.

use crate::rule::KindInfo;
use std::collections::BTreeMap;

/// Source units that get packaged into an image
pub const GO_BINARY_KIND: &str = "go_binary";

pub const LAYER_KIND: &str = "pkg_tar";
pub const IMAGE_KIND: &str = "oci_image";
pub const TRANSITION_KIND: &str = "platform_transition_filegroup";
pub const TARBALL_KIND: &str = "oci_tarball";

/// Merge information for every generated kind
pub fn kinds() -> BTreeMap<&'static str, KindInfo> {
    BTreeMap::from([
        (
            LAYER_KIND,
            KindInfo {
                non_empty_attrs: &["srcs"],
                mergeable_attrs: &["srcs"],
            },
        ),
        (
            IMAGE_KIND,
            KindInfo {
                non_empty_attrs: &["base", "entrypoint", "tars"],
                mergeable_attrs: &["tars"],
            },
        ),
        (
            TRANSITION_KIND,
            KindInfo {
                non_empty_attrs: &["srcs"],
                mergeable_attrs: &["srcs", "target_platform"],
            },
        ),
        (
            TARBALL_KIND,
            KindInfo {
                non_empty_attrs: &["image"],
                mergeable_attrs: &["repo_tags"],
            },
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_generated_kind_is_listed() {
        let kinds = kinds();
        assert_eq!(kinds.len(), 4);
        assert!(!kinds.contains_key(GO_BINARY_KIND));
        assert_eq!(kinds[IMAGE_KIND].non_empty_attrs, &["base", "entrypoint", "tars"]);
        assert!(kinds[TRANSITION_KIND].mergeable_attrs.contains(&"target_platform"));
        assert_eq!(kinds[TARBALL_KIND].mergeable_attrs, &["repo_tags"]);
    }
}
