/// Page replacement simulator error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MmuError {
    /// The engine cannot be built with the requested settings (e.g. zero
    /// frames).
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Replacement policy name is not recognized.
    #[error("Unknown replacement policy: {0}")]
    UnknownPolicy(String),
}

/// Page replacement simulator result type.
pub type MmuResult<T> = Result<T, MmuError>;
