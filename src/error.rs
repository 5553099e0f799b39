//! Error taxonomy for the coordinator.
//!
//! Only [`InitError`] ever reaches the host. Surface and storage failures are
//! handled where they happen: the feature degrades and the rest of the page
//! keeps working.

/// Failure reported by a [`crate::surface::Surface`] implementation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    #[error("element not found: {selector}")]
    MissingElement { selector: String },
    #[error("{backend} storage unavailable: {reason}")]
    Storage { backend: &'static str, reason: String },
    #[error("host call failed: {0}")]
    Host(String),
}

impl SurfaceError {
    pub fn missing(selector: &str) -> Self {
        Self::MissingElement { selector: selector.to_owned() }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config field `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// The coordinator as a whole could not start.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("page surface unusable: {0}")]
    Surface(#[from] SurfaceError),
}

/// Log a best-effort surface write that failed. Absent optional elements are
/// routine and only logged at debug level.
pub fn soft<T>(context: &str, result: Result<T, SurfaceError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e @ SurfaceError::MissingElement { .. }) => {
            log::debug!("{context}: {e}");
            None
        }
        Err(e) => {
            log::warn!("{context}: {e}");
            None
        }
    }
}
