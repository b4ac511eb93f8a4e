use std::fmt;

use crate::error::{ChessError, Result};
use crate::square::Square;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(&self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

/// A piece is a plain value: its kind and its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self { kind, color }
    }

    pub fn is(&self, kind: PieceKind, color: Color) -> bool {
        self.kind == kind && self.color == color
    }
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// 64 squares, each empty or holding one piece.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<Piece>; 64],
}

impl Board {
    pub fn empty() -> Self {
        Self {
            squares: [None; 64],
        }
    }

    /// The standard opening arrangement.
    pub fn new() -> Self {
        let mut board = Board::empty();
        for (file, &kind) in BACK_RANK.iter().enumerate() {
            board.squares[file] = Some(Piece::new(kind, Color::White));
            board.squares[8 + file] = Some(Piece::new(PieceKind::Pawn, Color::White));
            board.squares[48 + file] = Some(Piece::new(PieceKind::Pawn, Color::Black));
            board.squares[56 + file] = Some(Piece::new(kind, Color::Black));
        }
        board
    }

    pub fn get(&self, square: Square) -> Option<Piece> {
        self.squares[square.idx()]
    }

    pub fn is_empty(&self, square: Square) -> bool {
        self.squares[square.idx()].is_none()
    }

    /// Put `piece` on an empty square.
    pub fn place(&mut self, piece: Piece, square: Square) -> Result<()> {
        if !self.is_empty(square) {
            return Err(ChessError::SquareOccupied(square));
        }
        self.squares[square.idx()] = Some(piece);
        Ok(())
    }

    /// Overwrite whatever stands on `square`, returning it.
    pub(crate) fn put(&mut self, piece: Piece, square: Square) -> Option<Piece> {
        self.squares[square.idx()].replace(piece)
    }

    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        self.squares[square.idx()].take()
    }

    /// Occupied squares in index order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |square| self.get(square).map(|piece| (square, piece)))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }

    /// The unique king square of `color`.
    pub fn king_square(&self, color: Color) -> Result<Square> {
        let mut kings = self
            .pieces_of(color)
            .filter(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(square, _)| square);
        match (kings.next(), kings.count()) {
            (Some(square), 0) => Ok(square),
            (first, rest) => Err(ChessError::InvariantViolation {
                color,
                count: first.map_or(0, |_| 1 + rest),
            }),
        }
    }

    /// Occupied squares strictly between `from` and `to`, walking from `from`.
    /// The two squares must share a rank, file or diagonal.
    pub fn pieces_between(&self, from: Square, to: Square) -> Result<Vec<(Square, Piece)>> {
        let d_rank = to.rank() as i8 - from.rank() as i8;
        let d_file = to.file() as i8 - from.file() as i8;
        let aligned = (d_rank == 0 || d_file == 0 || d_rank.abs() == d_file.abs())
            && (d_rank, d_file) != (0, 0);
        if !aligned {
            return Err(ChessError::NotAligned { from, to });
        }

        let step = (d_rank.signum(), d_file.signum());
        let mut between = Vec::new();
        let mut current = from;
        while let Some(next) = current.offset(step.0, step.1) {
            if next == to {
                break;
            }
            if let Some(piece) = self.get(next) {
                between.push((next, piece));
            }
            current = next;
        }
        Ok(between)
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}
