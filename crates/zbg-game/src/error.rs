//! Game-level errors.

use thiserror::Error;
use zbg_world::WorldError;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("unknown mob type: {0}")]
    UnknownMobType(String),

    #[error("invalid glass break config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    World(#[from] WorldError),
}
