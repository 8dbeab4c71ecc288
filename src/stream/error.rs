use thiserror::Error;

use crate::model::ModelError;

/// Errors raised while processing a JSON-lines message stream.
///
/// Line numbers are 1-based and count blank lines.
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("stream I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid message on line {line}: {source}")]
    InvalidMessage {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("processing message on line {line} failed: {source}")]
    Model {
        line: usize,
        #[source]
        source: ModelError,
    },

    #[error("failed to encode message on line {line}: {source}")]
    Encode {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

pub type StreamResult<T> = Result<T, StreamError>;
