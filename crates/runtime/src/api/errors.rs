//! Unified error types surfaced by the runtime API.
use thiserror::Error;

use combat_core::Rejection;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("action provider channel closed")]
    ActionProviderChannelClosed,

    #[error("player action rejected {attempts} times in a row, last: {last}")]
    TooManyRejections { attempts: u32, last: Rejection },
}
