use serde_json::Value;
use std::path::PathBuf;

use crate::error::ApiError;

/// Per-location search filter fragments, one JSON document per file under
/// the configured templates directory. Lookup is case-insensitive on the
/// location name; the fragment itself is opaque and spliced into the search
/// payload as-is.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    dir: PathBuf,
}

impl TemplateStore {
    pub fn new(dir: impl Into<PathBuf>) -> TemplateStore {
        TemplateStore { dir: dir.into() }
    }

    /// Missing or malformed templates are configuration errors, reported
    /// before any network call is made.
    pub fn load(&self, location: &str) -> Result<Value, ApiError> {
        let path = self.dir.join(format!("{}.json", location.to_lowercase()));
        let raw = std::fs::read_to_string(&path)
            .map_err(|_| ApiError::TemplateNotFound(location.to_string()))?;
        serde_json::from_str(&raw).map_err(|e| ApiError::TemplateInvalid {
            location: location.to_string(),
            reason: e.to_string(),
        })
    }
}
