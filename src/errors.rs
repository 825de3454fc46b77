#[derive(thiserror::Error, Debug)]
pub enum LieCryptoError {
    /// The coefficient matrix of a linear system is not invertible.
    /// Surfaced by `decrypt` when the private key yields a singular
    /// bracket-equation system for some ciphertext block.
    #[error("SingularSystem: {0}")]
    SingularSystem(String),
    #[error("DimensionMismatch: {0}")]
    DimensionMismatch(String),
    #[error("InvalidParameters: {0}")]
    InvalidParameters(String),
    #[error("InternalError: {0}")]
    InternalError(String),
    #[error("EncodingError: {0}")]
    EncodingError(String),

    #[error("Data serialization: {0}")]
    SerializationError(#[from] serde_json::Error),
}
