use std::path::PathBuf;

use thiserror::Error;

/// Failures a resolver reports in place of content.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The selection is not one of the resolver's catalog keys.
    #[error("`{key}` is not a known option for {resolver}")]
    KeyNotFound { resolver: String, key: String },
    /// The asset named by the catalog could not be read.
    #[error("Unable to read `{}`", .path.display())]
    AssetUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ResolveError {
    pub fn key_not_found(resolver: impl Into<String>, key: impl Into<String>) -> Self {
        Self::KeyNotFound { resolver: resolver.into(), key: key.into() }
    }

    pub fn asset_unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::AssetUnreadable { path: path.into(), source }
    }

    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::KeyNotFound { .. } => "Unknown Selection",
            Self::AssetUnreadable { .. } => "Map Unavailable",
        }
    }
}
