use crate::domain::FineKind;

/// Structural failures raised by the engine.
///
/// Business refusals (an ineligible borrow, an exceeded limit, a blocked
/// user) are never errors; they travel as `ValidationOutcome` values. Only
/// unresolved references and programmer misuse surface here.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("{entity} '{id}' was not found")]
    NotFound { entity: &'static str, id: String },
    #[error("no calculator is registered for fine kind {0:?}")]
    UnsupportedFineKind(FineKind),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl EngineError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}
