//! World error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorldError {
    #[error("unknown block identifier: {0}")]
    UnknownBlock(String),

    #[error("y = {y} is outside the build range [{min}, {max})")]
    OutOfBuildRange { y: i32, min: i32, max: i32 },
}
