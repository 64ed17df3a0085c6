use thiserror::Error;

/// Failure decoding a shared message token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("hex token has odd length {0}")]
    OddLength(usize),

    #[error("invalid hex pair {pair:?} at offset {offset}")]
    InvalidHexPair { offset: usize, pair: String },
}

/// Why the microphone could not be used for blow detection.
/// Both variants only disable blow-out; the rest of the widget keeps working.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AudioError {
    #[error("audio input is not supported by this host")]
    Unsupported,

    #[error("microphone access denied: {0}")]
    PermissionDenied(String),
}
