//! # Base Image Directive
//!
//! `# gazelle:oci_base_image <lang> <label>` selects the base image used for
//! images built from binaries of `<lang>`, or of any language for `*`.

use super::{supports_lang, OciConfig};
use crate::error::{OciError, Result};
use crate::label::Label;

/// Directive key for base image selection
pub const BASE_IMAGE_DIRECTIVE: &str = "oci_base_image";

/// A validated `oci_base_image` directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseImageDirective {
    pub lang: String,
    pub base: Label,
}

impl BaseImageDirective {
    /// Parse the value of an `oci_base_image` directive
    ///
    /// # Errors
    ///
    /// * [`OciError::MalformedDirective`] unless the value is exactly two tokens
    /// * [`OciError::UnsupportedLanguage`] for an unrecognized language tag
    /// * [`OciError::InvalidLabel`] when the base image is not a valid label
    pub fn parse(value: &str) -> Result<Self> {
        let tokens: Vec<&str> = value.split_whitespace().collect();
        let [lang, base] = tokens[..] else {
            return Err(OciError::MalformedDirective {
                directive: BASE_IMAGE_DIRECTIVE,
                value: value.to_string(),
            });
        };

        if !supports_lang(lang) {
            return Err(OciError::UnsupportedLanguage {
                directive: BASE_IMAGE_DIRECTIVE,
                lang: lang.to_string(),
            });
        }

        let base = Label::parse(base).map_err(|source| OciError::InvalidLabel {
            directive: BASE_IMAGE_DIRECTIVE,
            label: base.to_string(),
            source,
        })?;

        Ok(Self {
            lang: lang.to_string(),
            base,
        })
    }

    pub fn apply(self, cfg: OciConfig) -> OciConfig {
        tracing::debug!("[oci] Base image for {}: {}", self.lang, self.base);
        cfg.with_base_image(self.lang, self.base)
    }
}

/// Validate one directive value and record it in `cfg`
pub fn apply_base_image_directive(cfg: OciConfig, value: &str) -> Result<OciConfig> {
    Ok(BaseImageDirective::parse(value)?.apply(cfg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_to_fresh_node() {
        let cfg = apply_base_image_directive(OciConfig::new(), "go @foo//bar:baz").unwrap();
        assert_eq!(cfg.base_image("go"), Label::parse("@foo//bar:baz").unwrap());
    }

    #[test]
    fn test_later_directive_overrides() {
        let cfg = apply_base_image_directive(OciConfig::new(), "go //a").unwrap();
        let cfg = apply_base_image_directive(cfg, "go //b").unwrap();
        assert_eq!(cfg.base_image("go").to_string(), "//b");
    }

    #[test]
    fn test_wrong_token_count() {
        for value in ["", "go", "go //a //b"] {
            let err = BaseImageDirective::parse(value).unwrap_err();
            assert!(matches!(err, OciError::MalformedDirective { .. }), "{value:?}");
        }
    }

    #[test]
    fn test_unsupported_language() {
        let err = BaseImageDirective::parse("python @foo//bar:baz").unwrap_err();
        assert!(matches!(err, OciError::UnsupportedLanguage { ref lang, .. } if lang == "python"));
    }

    #[test]
    fn test_invalid_label() {
        let err = BaseImageDirective::parse("* @foo//bar:").unwrap_err();
        assert!(matches!(err, OciError::InvalidLabel { ref label, .. } if label == "@foo//bar:"));
    }

    #[test]
    fn test_tokens_split_on_any_whitespace() {
        let expected = Label::parse("//images:go").unwrap();
        for value in ["go  //images:go", " go //images:go ", "go\t//images:go"] {
            let directive = BaseImageDirective::parse(value).unwrap();
            assert_eq!(directive.lang, "go", "{value:?}");
            assert_eq!(directive.base, expected, "{value:?}");
        }
    }
}
