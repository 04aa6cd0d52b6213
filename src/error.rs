//! # Errors
//!
//! Every error produced while configuring a directory or generating its rules
//! is fatal: it describes a broken repository configuration, and the run must
//! stop rather than emit a wrong build graph.

use thiserror::Error;

/// Result type used throughout the crate
pub type Result<T, E = OciError> = std::result::Result<T, E>;

/// Fatal configuration or generation failure
#[derive(Debug, Error)]
pub enum OciError {
    /// Directive value did not split into `<lang> <base_image>`
    #[error("bad {directive}, should be gazelle:{directive} <lang> <base_image>")]
    MalformedDirective { directive: &'static str, value: String },

    /// Directive names a language this version does not recognize
    #[error("bad {directive}, language {lang} is not supported")]
    UnsupportedLanguage { directive: &'static str, lang: String },

    /// Directive base image is not a valid label
    #[error("bad {directive}, invalid label {label}: {source}")]
    InvalidLabel {
        directive: &'static str,
        label: String,
        #[source]
        source: LabelError,
    },

    /// No base image configured for the language at generation time
    #[error("failed to get base image for {0}")]
    MissingBaseImage(String),

    /// The module to apparent name mapping could not be extracted at the root
    #[error("could not extract module apparent names: {0}")]
    ModuleMapping(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Label syntax errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LabelError {
    #[error("empty label")]
    Empty,

    #[error("label parse error: repository has invalid characters: {0:?}")]
    InvalidRepo(String),

    #[error("label parse error: package has invalid characters: {0:?}")]
    InvalidPackage(String),

    #[error("label parse error: target name has invalid characters: {0:?}")]
    InvalidName(String),
}

/// Converts a fatal result into process termination at the host boundary.
///
/// Library code only ever returns [`OciError`]; the host decides where the
/// run ends by calling `or_abort` on the value it was about to commit.
pub trait OrAbort<T> {
    fn or_abort(self) -> T;
}

impl<T> OrAbort<T> for Result<T> {
    fn or_abort(self) -> T {
        match self {
            Ok(value) => value,
            Err(err) => {
                tracing::error!("[oci] {}", err);
                std::process::exit(1);
            }
        }
    }
}
