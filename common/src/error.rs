use std::num::ParseIntError;

use thiserror::Error;

/// Configuration errors raised while expanding a target specification.
///
/// Any of these aborts the run before a single host is scanned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TargetError {
    #[error("provided IP address '{0}' is incorrect or malformed")]
    Malformed(String),

    #[error("starting IP not valid in '{item}': {source}")]
    InvalidStart {
        item: String,
        #[source]
        source: ParseIntError,
    },

    #[error("ending IP not valid in '{item}': {source}")]
    InvalidEnd {
        item: String,
        #[source]
        source: ParseIntError,
    },
}
