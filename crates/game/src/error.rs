//! Game-level errors.

use thiserror::Error;

use corelib::CoreError;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("invalid player number {0}: only 1 or 2 is allowed")]
    InvalidPlayer(u8),

    #[error("unknown scene '{0}'")]
    UnknownScene(String),

    #[error("config parse error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type GameResult<T> = Result<T, GameError>;
