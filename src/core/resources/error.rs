//=========================================================================
// Resource Errors
//=========================================================================

use std::path::PathBuf;

use thiserror::Error;

use super::ResourceKind;

/// Failures raised while populating or querying the [`super::ResourceCache`].
///
/// All variants are non-fatal: callers log and degrade (e.g. skip drawing).
#[derive(Error, Debug)]
pub enum ResourceError {
    /// No resource is registered under this logical name.
    #[error("resource '{name}' not found")]
    NotFound { name: String },

    /// The name exists but holds a different kind of resource.
    #[error("resource '{name}' is {actual:?}, not {expected:?}")]
    WrongKind {
        name: String,
        expected: ResourceKind,
        actual: ResourceKind,
    },

    /// The file could not be read or decoded.
    #[error("failed to load {kind:?} resource {}: {message}", path.display())]
    LoadFailed {
        path: PathBuf,
        kind: ResourceKind,
        message: String,
    },

    /// A font descriptor pointed at bytes `fontdue` could not parse.
    #[error("invalid font data in {}: {message}", path.display())]
    InvalidFormat { path: PathBuf, message: String },

    /// Font sizes must be positive.
    #[error("invalid font size {size} for '{name}'")]
    InvalidFontSize { name: String, size: u32 },
}
