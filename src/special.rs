use crate::board::{Color, Piece, PieceKind};
use crate::catalog::{double_push_rank, pawn_advance, PAWN_CAPTURE_FILES};
use crate::movegen::{Move, MoveGenerator, MoveKind};
use crate::position::Position;
use crate::square::Square;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    pub const BOTH: [CastleSide; 2] = [CastleSide::Kingside, CastleSide::Queenside];

    pub fn move_kind(self) -> MoveKind {
        match self {
            CastleSide::Kingside => MoveKind::CastleKingside,
            CastleSide::Queenside => MoveKind::CastleQueenside,
        }
    }
}

/// Home and destination squares of the king and rook for one castle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlePath {
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
}

impl CastlePath {
    /// Squares the king passes over, destination included, origin excluded.
    pub fn king_transit(&self) -> Vec<Square> {
        let step = if self.king_to > self.king_from { 1 } else { -1 };
        let mut squares = Vec::new();
        let mut current = self.king_from;
        while current != self.king_to {
            match current.offset(0, step) {
                Some(next) => {
                    squares.push(next);
                    current = next;
                }
                None => break,
            }
        }
        squares
    }

    pub fn as_move(&self, side: CastleSide) -> Move {
        Move::new(self.king_from, self.king_to, side.move_kind())
    }
}

pub fn castle_path(color: Color, side: CastleSide) -> CastlePath {
    match (color, side) {
        (Color::White, CastleSide::Kingside) => CastlePath {
            king_from: Square::E1,
            king_to: Square::G1,
            rook_from: Square::H1,
            rook_to: Square::F1,
        },
        (Color::White, CastleSide::Queenside) => CastlePath {
            king_from: Square::E1,
            king_to: Square::C1,
            rook_from: Square::A1,
            rook_to: Square::D1,
        },
        (Color::Black, CastleSide::Kingside) => CastlePath {
            king_from: Square::E8,
            king_to: Square::G8,
            rook_from: Square::H8,
            rook_to: Square::F8,
        },
        (Color::Black, CastleSide::Queenside) => CastlePath {
            king_from: Square::E8,
            king_to: Square::C8,
            rook_from: Square::A8,
            rook_to: Square::D8,
        },
    }
}

impl MoveGenerator {
    /// Full castling eligibility for `color` on `side`.
    pub fn can_castle(&self, position: &Position, color: Color, side: CastleSide) -> bool {
        self.castle_is_unobstructed(position, color, side)
            && self.castle_path_is_safe(position, color, side)
    }

    // Right still held, king and rook at home, nothing between them.
    pub(crate) fn castle_is_unobstructed(
        &self,
        position: &Position,
        color: Color,
        side: CastleSide,
    ) -> bool {
        if !position.castling_rights().has(color, side) {
            return false;
        }
        let board = position.board();
        let path = castle_path(color, side);
        if board.get(path.king_from) != Some(Piece::new(PieceKind::King, color))
            || board.get(path.rook_from) != Some(Piece::new(PieceKind::Rook, color))
        {
            return false;
        }
        board
            .pieces_between(path.king_from, path.rook_from)
            .map_or(false, |between| between.is_empty())
    }

    // King not in check now, and no square it crosses or lands on attacked.
    pub(crate) fn castle_path_is_safe(
        &self,
        position: &Position,
        color: Color,
        side: CastleSide,
    ) -> bool {
        let enemy = color.opposite();
        let path = castle_path(color, side);
        !self.is_square_attacked(position, path.king_from, enemy)
            && path
                .king_transit()
                .into_iter()
                .all(|square| !self.is_square_attacked(position, square, enemy))
    }

    pub(crate) fn castling_candidates(
        &self,
        position: &Position,
        color: Color,
        moves: &mut Vec<Move>,
    ) {
        for side in CastleSide::BOTH {
            if self.castle_is_unobstructed(position, color, side) {
                moves.push(castle_path(color, side).as_move(side));
            }
        }
    }

    /// En-passant captures for `color`. Only the side to move can have any,
    /// and only on the ply straight after the opponent's double push.
    pub(crate) fn en_passant_moves(&self, position: &Position, color: Color, moves: &mut Vec<Move>) {
        if position.side_to_move() != color {
            return;
        }
        let Some(file) = position.en_passant_file() else {
            return;
        };
        let board = position.board();
        let enemy = color.opposite();

        let Ok(pushed) = Square::from_rank_file(double_push_rank(enemy), file) else {
            return;
        };
        if board.get(pushed) != Some(Piece::new(PieceKind::Pawn, enemy)) {
            return;
        }
        let Some(skipped) = pushed.offset(pawn_advance(color), 0) else {
            return;
        };
        if !board.is_empty(skipped) {
            return;
        }

        for d_file in PAWN_CAPTURE_FILES {
            if let Some(from) = pushed.offset(0, d_file) {
                if board.get(from) == Some(Piece::new(PieceKind::Pawn, color)) {
                    moves.push(Move::new(from, skipped, MoveKind::EnPassantCapture));
                }
            }
        }
    }
}
