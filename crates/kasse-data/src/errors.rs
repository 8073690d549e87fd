use thiserror::Error as ThisError;

/// Store and engine errors. Callers get one of three kinds:
/// caller-correctable input problems, unknown references and
/// conflicts with already existing state.
#[derive(Debug, Clone, ThisError)]
pub enum Error {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
}

impl Error {
    /// Is this a conflict error? Charge generation uses this to
    /// count already existing charges as skipped instead of
    /// failing the run.
    pub fn is_conflict(err: &anyhow::Error) -> bool {
        matches!(err.downcast_ref::<Error>(), Some(Error::Conflict(_)))
    }

    pub fn is_not_found(err: &anyhow::Error) -> bool {
        matches!(err.downcast_ref::<Error>(), Some(Error::NotFound(_)))
    }
}
