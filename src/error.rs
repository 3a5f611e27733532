// ============================================================================
// Error types shared across the engine
// ============================================================================

use std::path::PathBuf;
use thiserror::Error;

/// Format error raised at the point of typed access on a matched element.
///
/// Malformed files are skipped wholesale during scanning, but a present,
/// malformed value on an element a dialect recognized must surface to the
/// caller requesting the typed field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("element `{element}` has no `{child}` child")]
    MissingChild {
        element: &'static str,
        child: &'static str,
    },

    #[error("element `{element}` carries non-numeric `{field}` value `{value}`")]
    InvalidInt {
        element: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("element `{element}` carries non-boolean `{field}` value `{value}`")]
    InvalidBool {
        element: &'static str,
        field: &'static str,
        value: String,
    },
}

/// Precondition failure that aborts a scan. Per-file parse and read
/// failures never show up here; those are skipped where they occur.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("`{0}` does not exist or is not a directory")]
    MissingDirectory(PathBuf),

    #[error("expected a compiled-classes directory at `{0}`")]
    MissingClassesDirectory(PathBuf),
}
