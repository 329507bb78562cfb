//! Errors surfaced to the binary.

use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("{}: {source}", .path.display())]
    ProgramOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("program image is {0} bytes, at most 65280 fit above 0100h")]
    ProgramTooLarge(usize),
    #[error("invalid value {value:?} for {var}")]
    Config { var: &'static str, value: String },
}
