// Game simulation: characters, combat resolution and round orchestration

pub mod characters;
pub mod combat;
pub mod round;
pub mod tuning;

pub use round::{Match, MatchEvent, RoundEnd};
pub use tuning::{Tuning, DEFAULT_TUNING};

/// Errors raised while loading or validating simulation data
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("Invalid data: {0}")]
    Invalid(String),

    #[error("Failed to parse data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
