//! Error types for repository operations.

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// The requested entity does not exist (or belongs to another store).
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// A uniqueness or referential constraint was violated.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The input failed domain validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The repository was misconfigured (missing env vars, bad settings).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The storage backend failed.
    #[error("Backend error: {0}")]
    Backend(String),
}

impl RepositoryError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Whether this error maps to a 404 at the API boundary.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = RepositoryError::not_found("category", "abc");
        assert_eq!(err.to_string(), "category not found: abc");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_conflict_is_not_not_found() {
        assert!(!RepositoryError::Conflict("slug taken".into()).is_not_found());
    }
}
