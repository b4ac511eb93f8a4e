use thiserror::Error;

use crate::board::Color;
use crate::movegen::Move;
use crate::square::Square;

/// Faults reported by the rules core. Every variant is raised at the point
/// of the offending call; nothing is retried or silently corrected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    /// An index or (rank, file) coordinate outside the board.
    #[error("{0} is not a square on the board")]
    InvalidSquare(String),

    #[error("no piece on {0}")]
    EmptyOrigin(Square),

    #[error("the piece on {square} is {found}, but it is {to_move} to move")]
    WrongSideToMove {
        square: Square,
        found: Color,
        to_move: Color,
    },

    #[error("{0} is not a legal move")]
    IllegalMove(Move),

    #[error("pawn move {from}{to} reaches the last rank without a promotion piece")]
    MissingPromotionChoice { from: Square, to: Square },

    /// More or fewer than one king of a color. Positions in this state cannot
    /// be queried.
    #[error("{color} has {count} kings on the board, expected exactly one")]
    InvariantViolation { color: Color, count: usize },

    /// The side not on move is in check, so its king could be taken.
    #[error("the {0} king is in check but it is not {0}'s move")]
    OpponentInCheck(Color),

    #[error("{0} is already occupied")]
    SquareOccupied(Square),

    #[error("{from} and {to} do not share a rank, file or diagonal")]
    NotAligned { from: Square, to: Square },
}

pub type Result<T> = std::result::Result<T, ChessError>;
