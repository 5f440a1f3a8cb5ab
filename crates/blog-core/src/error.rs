//! Domain-level error types.

use thiserror::Error;

/// Domain errors - failures surfaced by page assembly.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} '{key}'")]
    NotFound {
        entity_type: &'static str,
        key: String,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found: {entity_type} '{key}'")]
    NotFound {
        entity_type: &'static str,
        key: String,
    },
}

impl RepoError {
    pub fn post_not_found(slug: &str) -> Self {
        Self::NotFound {
            entity_type: "post",
            key: slug.to_string(),
        }
    }

    pub fn tag_not_found(title: &str) -> Self {
        Self::NotFound {
            entity_type: "tag",
            key: title.to_string(),
        }
    }
}

impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound { entity_type, key } => DomainError::NotFound { entity_type, key },
            other => DomainError::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_survives_conversion() {
        let err: DomainError = RepoError::tag_not_found("missing-tag").into();
        assert!(matches!(
            err,
            DomainError::NotFound { entity_type: "tag", ref key } if key == "missing-tag"
        ));
    }

    #[test]
    fn test_query_error_becomes_internal() {
        let err: DomainError = RepoError::Query("relation does not exist".into()).into();
        assert!(matches!(err, DomainError::Internal(_)));
    }
}
