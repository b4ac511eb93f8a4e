use crate::board::{Color, PieceKind};

/// (Δrank, Δfile) vectors for one piece kind. Sliders repeat a vector until
/// the ray leaves the board or meets a piece; steppers apply it once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Movement {
    pub directions: &'static [(i8, i8)],
    pub slider: bool,
}

const ORTHOGONAL: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

const ALL_DIRECTIONS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

/// Pieces a pawn may become, in generation order.
pub const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// File offsets of a pawn's two capture diagonals.
pub const PAWN_CAPTURE_FILES: [i8; 2] = [-1, 1];

impl PieceKind {
    /// Vector table for the piece. Pawns have none.
    pub fn movement(self) -> Option<Movement> {
        match self {
            PieceKind::Pawn => None,
            PieceKind::Knight => Some(Movement {
                directions: &KNIGHT_JUMPS,
                slider: false,
            }),
            PieceKind::Bishop => Some(Movement {
                directions: &DIAGONAL,
                slider: true,
            }),
            PieceKind::Rook => Some(Movement {
                directions: &ORTHOGONAL,
                slider: true,
            }),
            PieceKind::Queen => Some(Movement {
                directions: &ALL_DIRECTIONS,
                slider: true,
            }),
            PieceKind::King => Some(Movement {
                directions: &ALL_DIRECTIONS,
                slider: false,
            }),
        }
    }

    pub fn is_promotion_choice(self) -> bool {
        PROMOTION_KINDS.contains(&self)
    }
}

/// Rank delta of a pawn push.
pub fn pawn_advance(color: Color) -> i8 {
    match color {
        Color::White => 1,
        Color::Black => -1,
    }
}

/// Rank from which a double push is allowed.
pub fn pawn_home_rank(color: Color) -> u8 {
    match color {
        Color::White => 1,
        Color::Black => 6,
    }
}

/// Rank on which a pawn must promote.
pub fn promotion_rank(color: Color) -> u8 {
    match color {
        Color::White => 7,
        Color::Black => 0,
    }
}

/// Rank a pawn of `color` stands on right after its double push.
pub fn double_push_rank(color: Color) -> u8 {
    match color {
        Color::White => 3,
        Color::Black => 4,
    }
}
