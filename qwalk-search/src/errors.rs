use std::io;
use std::path::PathBuf;

use qwalk_circuit::errors::CircuitError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalkError {
    #[error("circuit error: {0}")]
    Circuit(#[from] CircuitError),
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("'{text}' is not a {width}-bit binary string")]
    InvalidBits { text: String, width: u8 },
    #[error("combination index {0} is outside the 2^15 parameter space")]
    IndexOutOfRange(usize),
    #[error("invalid sweep range {start}..{end}")]
    InvalidRange { start: usize, end: usize },
    #[error("line {line}: {reason}")]
    MalformedRow { line: usize, reason: String },
}

impl WalkError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> WalkError {
        let path = path.into();
        move |source| WalkError::Io { path, source }
    }
}

pub type Result<T> = std::result::Result<T, WalkError>;
