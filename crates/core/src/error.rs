use thiserror::Error;

/// Caller defects. Ordinary races (clicking during the mismatch delay, clicking
/// a matched tile) are not errors; they come back as rejected selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RoundError {
    #[error("tile index {index} out of range (round has {len} tiles)")]
    TileOutOfRange { index: usize, len: usize },
    #[error("no round in progress")]
    NotStarted,
}
