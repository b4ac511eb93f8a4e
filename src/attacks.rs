use crate::board::{Board, Color, Piece, PieceKind};
use crate::catalog::{pawn_advance, PAWN_CAPTURE_FILES};
use crate::error::Result;
use crate::movegen::MoveGenerator;
use crate::position::Position;
use crate::square::Square;

const NON_PAWNS: [PieceKind; 5] = [
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
    PieceKind::King,
];

/// Squares attacked or defended by one side, as a 64-bit mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AttackSet(u64);

impl AttackSet {
    pub fn contains(&self, square: Square) -> bool {
        self.0 & square.mask() != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn squares(&self) -> impl Iterator<Item = Square> + '_ {
        Square::all().filter(move |square| self.contains(*square))
    }

    fn insert(&mut self, square: Square) {
        self.0 |= square.mask();
    }
}

impl MoveGenerator {
    pub fn is_square_attacked(&self, position: &Position, square: Square, by: Color) -> bool {
        attacks_square(position.board(), square, by)
    }

    /// Whether the king of `color` is attacked by the other side. Fails if
    /// either color does not have exactly one king.
    pub fn is_king_in_check(&self, position: &Position, color: Color) -> Result<bool> {
        position.check_kings()?;
        let king = position.board().king_square(color)?;
        Ok(self.is_square_attacked(position, king, color.opposite()))
    }

    /// Every square `by` attacks, including squares held by its own pieces.
    pub fn attack_set(&self, position: &Position, by: Color) -> AttackSet {
        let board = position.board();
        let mut set = AttackSet::default();

        for (from, piece) in board.pieces_of(by) {
            let Some(movement) = piece.kind.movement() else {
                for d_file in PAWN_CAPTURE_FILES {
                    if let Some(target) = from.offset(pawn_advance(by), d_file) {
                        set.insert(target);
                    }
                }
                continue;
            };

            for &(d_rank, d_file) in movement.directions {
                let mut current = from;
                while let Some(target) = current.offset(d_rank, d_file) {
                    set.insert(target);
                    if !movement.slider || !board.is_empty(target) {
                        break;
                    }
                    current = target;
                }
            }
        }
        set
    }
}

// Walks outward from the target along every vector in reverse: the first
// piece met on a ray attacks the square if it moves along that vector.
fn attacks_square(board: &Board, square: Square, by: Color) -> bool {
    let pawn = Piece::new(PieceKind::Pawn, by);
    for d_file in PAWN_CAPTURE_FILES {
        if let Some(from) = square.offset(-pawn_advance(by), d_file) {
            if board.get(from) == Some(pawn) {
                return true;
            }
        }
    }

    for kind in NON_PAWNS {
        let Some(movement) = kind.movement() else {
            continue;
        };
        for &(d_rank, d_file) in movement.directions {
            let mut current = square;
            while let Some(from) = current.offset(-d_rank, -d_file) {
                if let Some(piece) = board.get(from) {
                    if piece.is(kind, by) {
                        return true;
                    }
                    break;
                }
                if !movement.slider {
                    break;
                }
                current = from;
            }
        }
    }
    false
}
