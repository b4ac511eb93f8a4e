use std::fmt;

use log::trace;

use crate::board::{Board, Color, PieceKind};
use crate::catalog::{
    pawn_advance, pawn_home_rank, promotion_rank, Movement, PAWN_CAPTURE_FILES, PROMOTION_KINDS,
};
use crate::error::Result;
use crate::position::Position;
use crate::special::CastleSide;
use crate::square::Square;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Normal,
    Capture,
    DoublePawnPush,
    EnPassantCapture,
    CastleKingside,
    CastleQueenside,
    /// Pawn reaching the last rank, with or without a capture.
    Promotion(PieceKind),
}

/// A single ply. Castling is written as the king's move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub kind: MoveKind,
}

impl Move {
    pub fn new(from: Square, to: Square, kind: MoveKind) -> Self {
        Self { from, to, kind }
    }

    pub fn new_promotion(from: Square, to: Square, promotion: PieceKind) -> Self {
        Self::new(from, to, MoveKind::Promotion(promotion))
    }

    pub fn promotion_choice(&self) -> Option<PieceKind> {
        match self.kind {
            MoveKind::Promotion(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn castle_side(&self) -> Option<CastleSide> {
        match self.kind {
            MoveKind::CastleKingside => Some(CastleSide::Kingside),
            MoveKind::CastleQueenside => Some(CastleSide::Queenside),
            _ => None,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion_choice() {
            let letter = match kind {
                PieceKind::Queen => 'q',
                PieceKind::Rook => 'r',
                PieceKind::Bishop => 'b',
                PieceKind::Knight => 'n',
                PieceKind::Pawn => 'p',
                PieceKind::King => 'k',
            };
            write!(f, "{}", letter)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    /// The side to move is in check but has a way out.
    Check(Color),
    /// Color is the winner.
    Checkmate(Color),
    Stalemate,
}

/// Stateless entry point for move generation and position queries.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveGenerator;

impl MoveGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Moves that obey piece geometry and occupancy for `color`, without
    /// regard to the safety of its own king. Squares are visited in index
    /// order, vectors in catalog order; en-passant captures and castling
    /// candidates follow.
    pub fn pseudo_legal_moves(&self, position: &Position, color: Color) -> Vec<Move> {
        let board = position.board();
        let mut moves = Vec::new();

        for (from, piece) in board.pieces_of(color) {
            match piece.kind.movement() {
                Some(movement) => self.piece_moves(board, from, color, movement, &mut moves),
                None => self.pawn_moves(board, from, color, &mut moves),
            }
        }

        self.en_passant_moves(position, color, &mut moves);
        self.castling_candidates(position, color, &mut moves);
        moves
    }

    fn piece_moves(
        &self,
        board: &Board,
        from: Square,
        color: Color,
        movement: Movement,
        moves: &mut Vec<Move>,
    ) {
        for &(d_rank, d_file) in movement.directions {
            let mut current = from;
            while let Some(to) = current.offset(d_rank, d_file) {
                match board.get(to) {
                    None => moves.push(Move::new(from, to, MoveKind::Normal)),
                    Some(target) => {
                        if target.color != color {
                            moves.push(Move::new(from, to, MoveKind::Capture));
                        }
                        break;
                    }
                }
                if !movement.slider {
                    break;
                }
                current = to;
            }
        }
    }

    fn pawn_moves(&self, board: &Board, from: Square, color: Color, moves: &mut Vec<Move>) {
        let advance = pawn_advance(color);

        if let Some(one) = from.offset(advance, 0) {
            if board.is_empty(one) {
                self.push_pawn_move(from, one, color, MoveKind::Normal, moves);

                if from.rank() == pawn_home_rank(color) {
                    if let Some(two) = one.offset(advance, 0) {
                        if board.is_empty(two) {
                            moves.push(Move::new(from, two, MoveKind::DoublePawnPush));
                        }
                    }
                }
            }
        }

        for d_file in PAWN_CAPTURE_FILES {
            if let Some(to) = from.offset(advance, d_file) {
                if matches!(board.get(to), Some(target) if target.color != color) {
                    self.push_pawn_move(from, to, color, MoveKind::Capture, moves);
                }
            }
        }
    }

    // Arriving on the last rank fans out into one move per promotion piece.
    fn push_pawn_move(
        &self,
        from: Square,
        to: Square,
        color: Color,
        kind: MoveKind,
        moves: &mut Vec<Move>,
    ) {
        if to.rank() == promotion_rank(color) {
            for promotion in PROMOTION_KINDS {
                moves.push(Move::new_promotion(from, to, promotion));
            }
        } else {
            moves.push(Move::new(from, to, kind));
        }
    }

    /// Fully legal moves for `color`.
    pub fn legal_moves(&self, position: &Position, color: Color) -> Result<Vec<Move>> {
        position.validate()?;
        Ok(self
            .pseudo_legal_moves(position, color)
            .into_iter()
            .filter(|mv| self.keeps_king_safe(position, color, mv))
            .collect())
    }

    // Castling must also clear the origin and transit squares; everything is
    // then played out on a copy and kept only if the mover's king is safe.
    fn keeps_king_safe(&self, position: &Position, color: Color, mv: &Move) -> bool {
        if let Some(side) = mv.castle_side() {
            if !self.castle_path_is_safe(position, color, side) {
                trace!("discarding {}: castling out of or through check", mv);
                return false;
            }
        }

        let mut simulated = position.duplicate();
        simulated.make_move(*mv);
        let safe = !self.is_king_in_check(&simulated, color).unwrap_or(true);
        if !safe {
            trace!("discarding {}: leaves the {} king attacked", mv, color);
        }
        safe
    }

    /// Whether `mv` is among the legal moves of the side to move.
    pub fn is_legal(&self, position: &Position, mv: &Move) -> Result<bool> {
        Ok(self
            .legal_moves(position, position.side_to_move())?
            .contains(mv))
    }

    pub fn is_checkmate(&self, position: &Position, color: Color) -> Result<bool> {
        let no_moves = self.legal_moves(position, color)?.is_empty();
        Ok(no_moves && self.is_king_in_check(position, color)?)
    }

    pub fn is_stalemate(&self, position: &Position, color: Color) -> Result<bool> {
        let no_moves = self.legal_moves(position, color)?.is_empty();
        Ok(no_moves && !self.is_king_in_check(position, color)?)
    }

    /// Classify the position from the side to move's point of view.
    pub fn game_status(&self, position: &Position) -> Result<GameStatus> {
        let color = position.side_to_move();
        let can_move = !self.legal_moves(position, color)?.is_empty();
        let in_check = self.is_king_in_check(position, color)?;

        Ok(match (can_move, in_check) {
            (true, false) => GameStatus::Ongoing,
            (true, true) => GameStatus::Check(color),
            (false, true) => GameStatus::Checkmate(color.opposite()),
            (false, false) => GameStatus::Stalemate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Arrangement;

    fn sq(index: u8) -> Square {
        Square::new(index).unwrap()
    }

    fn destinations(moves: &[Move], from: Square) -> Vec<u8> {
        let mut targets: Vec<u8> = moves
            .iter()
            .filter(|mv| mv.from == from)
            .map(|mv| mv.to.index())
            .collect();
        targets.sort();
        targets.dedup();
        targets
    }

    fn kings_and(extra: &[(u8, PieceKind, Color)], side_to_move: Color) -> Position {
        let mut arrangement = Arrangement::new(side_to_move)
            .with(sq(0), PieceKind::King, Color::White)
            .with(sq(39), PieceKind::King, Color::Black);
        for &(index, kind, color) in extra {
            arrangement = arrangement.with(sq(index), kind, color);
        }
        Position::from_arrangement(&arrangement).unwrap()
    }

    #[test]
    fn slider_stops_at_blockers() {
        // Queen c3, own pawn d3, enemy rook h3, enemy knight c6.
        let position = kings_and(
            &[
                (18, PieceKind::Queen, Color::White),
                (19, PieceKind::Pawn, Color::White),
                (23, PieceKind::Rook, Color::Black),
                (42, PieceKind::Knight, Color::Black),
            ],
            Color::White,
        );
        let moves = MoveGenerator::new().pseudo_legal_moves(&position, Color::White);
        let queen = destinations(&moves, sq(18));

        assert!(!queen.contains(&19), "own pawn is not a target");
        assert!(!queen.contains(&20), "cannot jump the pawn");
        assert!(queen.contains(&42), "enemy knight can be captured");
        assert!(!queen.contains(&50), "ray ends at the knight");
        assert!(moves.contains(&Move::new(sq(18), sq(42), MoveKind::Capture)));
        assert!(moves.contains(&Move::new(sq(18), sq(26), MoveKind::Normal)));
    }

    #[test]
    fn knight_steps_once_per_vector() {
        let position = kings_and(&[(1, PieceKind::Knight, Color::White)], Color::White);
        let moves = MoveGenerator::new().pseudo_legal_moves(&position, Color::White);
        assert_eq!(destinations(&moves, sq(1)), vec![11, 16, 18]);
    }

    #[test]
    fn pawn_pushes_and_captures() {
        let position = kings_and(
            &[
                (12, PieceKind::Pawn, Color::White),
                (21, PieceKind::Knight, Color::Black),
                (19, PieceKind::Pawn, Color::White),
                (10, PieceKind::Pawn, Color::White),
                (18, PieceKind::Bishop, Color::Black),
            ],
            Color::White,
        );
        let moves = MoveGenerator::new().pseudo_legal_moves(&position, Color::White);

        // e2: both pushes and the capture on f3.
        assert!(moves.contains(&Move::new(sq(12), sq(20), MoveKind::Normal)));
        assert!(moves.contains(&Move::new(sq(12), sq(28), MoveKind::DoublePawnPush)));
        assert!(moves.contains(&Move::new(sq(12), sq(21), MoveKind::Capture)));
        // d3 is off its home rank.
        assert_eq!(destinations(&moves, sq(19)), vec![27]);
        // c2 is blocked by the bishop but no capture straight ahead.
        assert!(destinations(&moves, sq(10)).is_empty());
    }

    #[test]
    fn blocked_double_push() {
        let position = kings_and(
            &[
                (12, PieceKind::Pawn, Color::White),
                (28, PieceKind::Knight, Color::Black),
            ],
            Color::White,
        );
        let moves = MoveGenerator::new().pseudo_legal_moves(&position, Color::White);
        assert_eq!(destinations(&moves, sq(12)), vec![20]);
    }

    #[test]
    fn promotions_fan_out() {
        let position = kings_and(&[(14, PieceKind::Pawn, Color::Black)], Color::Black);
        let moves = MoveGenerator::new()
            .legal_moves(&position, Color::Black)
            .unwrap();
        let kinds: Vec<PieceKind> = moves
            .iter()
            .filter(|mv| mv.from == sq(14))
            .map(|mv| {
                assert_eq!(mv.to, sq(6));
                mv.promotion_choice().unwrap()
            })
            .collect();
        assert_eq!(
            kinds,
            vec![
                PieceKind::Queen,
                PieceKind::Rook,
                PieceKind::Bishop,
                PieceKind::Knight
            ]
        );
    }

    #[test]
    fn capture_promotion_is_generated() {
        // g7 pawn, f8 rook, g8 knight blocking the push.
        let position = kings_and(
            &[
                (54, PieceKind::Pawn, Color::White),
                (61, PieceKind::Rook, Color::Black),
                (62, PieceKind::Knight, Color::Black),
            ],
            Color::White,
        );
        let moves = MoveGenerator::new()
            .legal_moves(&position, Color::White)
            .unwrap();
        let from_g7: Vec<&Move> = moves.iter().filter(|mv| mv.from == sq(54)).collect();
        assert_eq!(from_g7.len(), 4);
        assert!(from_g7.iter().all(|mv| mv.to == sq(61)));
    }

    #[test]
    fn pinned_piece_cannot_leave_the_line() {
        // White king a1, white rook a4, black rook a8.
        let position = kings_and(
            &[
                (24, PieceKind::Rook, Color::White),
                (56, PieceKind::Rook, Color::Black),
            ],
            Color::White,
        );
        let moves = MoveGenerator::new()
            .legal_moves(&position, Color::White)
            .unwrap();
        let rook = destinations(&moves, sq(24));
        assert_eq!(rook, vec![8, 16, 32, 40, 48, 56]);
    }

    #[test]
    fn generation_is_deterministic() {
        let position = Position::new();
        let generator = MoveGenerator::new();
        assert_eq!(
            generator.legal_moves(&position, Color::White).unwrap(),
            generator.legal_moves(&position, Color::White).unwrap()
        );
    }

    #[test]
    fn status_reports_check_and_stalemate() {
        let generator = MoveGenerator::new();

        let check = kings_and(&[(7, PieceKind::Rook, Color::Black)], Color::White);
        assert_eq!(generator.game_status(&check).unwrap(), GameStatus::Check(Color::White));

        // White king a1, black king c2, black queen b3.
        let stalemate = Position::from_arrangement(
            &Arrangement::new(Color::White)
                .with(sq(0), PieceKind::King, Color::White)
                .with(sq(10), PieceKind::King, Color::Black)
                .with(sq(17), PieceKind::Queen, Color::Black),
        )
        .unwrap();
        assert_eq!(generator.game_status(&stalemate).unwrap(), GameStatus::Stalemate);
        assert!(generator.is_stalemate(&stalemate, Color::White).unwrap());
        assert!(!generator.is_checkmate(&stalemate, Color::White).unwrap());

        assert_eq!(
            generator.game_status(&Position::new()).unwrap(),
            GameStatus::Ongoing
        );
    }

    #[test]
    fn move_display() {
        assert_eq!(Move::new(sq(12), sq(28), MoveKind::DoublePawnPush).to_string(), "e2e4");
        assert_eq!(
            Move::new_promotion(sq(52), sq(60), PieceKind::Knight).to_string(),
            "e7e8n"
        );
    }
}
