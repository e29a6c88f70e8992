use thiserror::Error;

/// Fatal setup failures: the grid cannot legally host the snake and its food.
///
/// These abort the attempted reset or tick; no world is published in an
/// invalid state. Collisions are not errors, they are ordinary tick outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{width}x{height} grid cannot host a {snake_len}-cell snake with room for food")]
    GridTooSmall {
        width: usize,
        height: usize,
        snake_len: usize,
    },

    #[error("no free cell left for food on the {width}x{height} grid")]
    NoFreeCell { width: usize, height: usize },

    #[error("tick interval must be non-zero")]
    ZeroTickInterval,
}
