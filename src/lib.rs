pub mod attacks;
pub mod board;
pub mod catalog;
pub mod error;
pub mod movegen;
pub mod perft;
pub mod position;
pub mod special;
pub mod square;

pub use attacks::AttackSet;
pub use board::{Board, Color, Piece, PieceKind};
pub use error::{ChessError, Result};
pub use movegen::{GameStatus, Move, MoveGenerator, MoveKind};
pub use perft::{perft, perft_divide};
pub use position::{Arrangement, CastlingRights, GameState, Position};
pub use special::{castle_path, CastlePath, CastleSide};
pub use square::Square;

/// Standard opening position, or the caller's arrangement when given.
pub fn new_position(arrangement: Option<&Arrangement>) -> Result<Position> {
    match arrangement {
        Some(arrangement) => Position::from_arrangement(arrangement),
        None => Ok(Position::new()),
    }
}

pub fn legal_moves(position: &Position, color: Color) -> Result<Vec<Move>> {
    MoveGenerator::new().legal_moves(position, color)
}

pub fn is_legal(position: &Position, mv: &Move) -> Result<bool> {
    MoveGenerator::new().is_legal(position, mv)
}

/// The position after `mv`. The input is left untouched either way.
pub fn apply(position: &Position, mv: Move) -> Result<Position> {
    let mut next = position.duplicate();
    next.apply(mv)?;
    Ok(next)
}

pub fn in_check(position: &Position, color: Color) -> Result<bool> {
    position.validate()?;
    MoveGenerator::new().is_king_in_check(position, color)
}

pub fn is_checkmate(position: &Position, color: Color) -> Result<bool> {
    MoveGenerator::new().is_checkmate(position, color)
}

pub fn is_stalemate(position: &Position, color: Color) -> Result<bool> {
    MoveGenerator::new().is_stalemate(position, color)
}
