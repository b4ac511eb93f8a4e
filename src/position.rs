use log::{debug, trace};

use crate::board::{Board, Color, Piece, PieceKind};
use crate::catalog::promotion_rank;
use crate::error::{ChessError, Result};
use crate::movegen::{Move, MoveGenerator, MoveKind};
use crate::special::{castle_path, CastleSide};
use crate::square::Square;

/// Castling rights as four bits, KQkq from low to high. Rights can be
/// revoked but there is no way to grant one back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub fn all() -> Self {
        CastlingRights(0b1111)
    }

    pub fn none() -> Self {
        CastlingRights(0)
    }

    fn bit(color: Color, side: CastleSide) -> u8 {
        match (color, side) {
            (Color::White, CastleSide::Kingside) => 0b0001,
            (Color::White, CastleSide::Queenside) => 0b0010,
            (Color::Black, CastleSide::Kingside) => 0b0100,
            (Color::Black, CastleSide::Queenside) => 0b1000,
        }
    }

    pub fn has(&self, color: Color, side: CastleSide) -> bool {
        self.0 & Self::bit(color, side) != 0
    }

    pub fn revoke(&mut self, color: Color, side: CastleSide) {
        self.0 &= !Self::bit(color, side);
    }

    /// Copy with one right cleared.
    pub fn without(mut self, color: Color, side: CastleSide) -> Self {
        self.revoke(color, side);
        self
    }

    /// True if every right held by `self` is also held by `other`.
    pub fn is_subset_of(&self, other: &CastlingRights) -> bool {
        self.0 & !other.0 == 0
    }
}

impl Default for CastlingRights {
    fn default() -> Self {
        CastlingRights::all()
    }
}

/// Everything about a position that is not piece placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameState {
    pub side_to_move: Color,
    pub castling: CastlingRights,
    /// File of a pawn that double-pushed on the previous ply.
    pub en_passant_file: Option<u8>,
}

/// Caller-supplied starting setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arrangement {
    pub pieces: Vec<(Square, Piece)>,
    pub side_to_move: Color,
    /// `None` grants every right the placement supports. Rights whose king
    /// or rook is not on its home square are dropped either way.
    pub castling: Option<CastlingRights>,
    pub en_passant_file: Option<u8>,
}

impl Arrangement {
    /// No pieces yet.
    pub fn new(side_to_move: Color) -> Self {
        Self {
            pieces: Vec::new(),
            side_to_move,
            castling: None,
            en_passant_file: None,
        }
    }

    pub fn standard() -> Self {
        Self {
            pieces: Board::new().pieces().collect(),
            ..Arrangement::new(Color::White)
        }
    }

    pub fn with(mut self, square: Square, kind: PieceKind, color: Color) -> Self {
        self.pieces.push((square, Piece::new(kind, color)));
        self
    }
}

impl Default for Arrangement {
    fn default() -> Self {
        Arrangement::standard()
    }
}

/// Board plus game state. Changes only through [`Position::apply`] once play
/// has started.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    board: Board,
    state: GameState,
}

impl Position {
    /// The standard opening position, White to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            state: GameState {
                side_to_move: Color::White,
                castling: CastlingRights::all(),
                en_passant_file: None,
            },
        }
    }

    /// A bare board with no castling rights. Kings still have to be placed
    /// before the position can be queried.
    pub fn empty(side_to_move: Color) -> Self {
        Self {
            board: Board::empty(),
            state: GameState {
                side_to_move,
                castling: CastlingRights::none(),
                en_passant_file: None,
            },
        }
    }

    pub fn from_arrangement(arrangement: &Arrangement) -> Result<Self> {
        let mut position = Position::empty(arrangement.side_to_move);
        position.state.castling = arrangement.castling.unwrap_or_default();
        for &(square, piece) in &arrangement.pieces {
            position.board.place(piece, square)?;
        }
        if let Some(file) = arrangement.en_passant_file {
            if file >= 8 {
                return Err(ChessError::InvalidSquare(format!("file {}", file)));
            }
            position.state.en_passant_file = Some(file);
        }
        position.refresh_castling_rights();
        position.validate()?;
        Ok(position)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn side_to_move(&self) -> Color {
        self.state.side_to_move
    }

    pub fn castling_rights(&self) -> CastlingRights {
        self.state.castling
    }

    pub fn en_passant_file(&self) -> Option<u8> {
        self.state.en_passant_file
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board.get(square)
    }

    /// Add a piece during setup. Fails on an occupied square.
    pub fn place(&mut self, piece: Piece, square: Square) -> Result<()> {
        self.board.place(piece, square)?;
        self.refresh_castling_rights();
        Ok(())
    }

    /// Clear a square during setup, returning what stood there.
    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        let removed = self.board.remove(square);
        self.refresh_castling_rights();
        removed
    }

    /// Independent deep copy for speculative play.
    pub fn duplicate(&self) -> Position {
        self.clone()
    }

    /// Checks what every query depends on: one king per color, and the side
    /// that just moved not left in check.
    pub fn validate(&self) -> Result<()> {
        self.check_kings()?;
        let waiting = self.state.side_to_move.opposite();
        if MoveGenerator::new().is_king_in_check(self, waiting)? {
            debug!("position rejected: {} king can be captured", waiting);
            return Err(ChessError::OpponentInCheck(waiting));
        }
        Ok(())
    }

    // King count only. Simulated positions from the legality filter stop here.
    pub(crate) fn check_kings(&self) -> Result<()> {
        for color in [Color::White, Color::Black] {
            if let Err(err) = self.board.king_square(color) {
                debug!("position rejected: {}", err);
                return Err(err);
            }
        }
        Ok(())
    }

    /// Play `mv` for the side to move. On error the position is unchanged.
    pub fn apply(&mut self, mv: Move) -> Result<()> {
        if let Err(err) = self.check_move(&MoveGenerator::new(), mv) {
            debug!("rejected {}: {}", mv, err);
            return Err(err);
        }
        self.make_move(mv);
        Ok(())
    }

    /// Resolve a (from, to, promotion) request into the matching legal move.
    pub fn find_move(
        &self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Result<Move> {
        let piece = self.owned_piece(from)?;
        let requested = Move::new(
            from,
            to,
            promotion.map_or(MoveKind::Normal, MoveKind::Promotion),
        );

        let candidates: Vec<Move> = MoveGenerator::new()
            .legal_moves(self, piece.color)?
            .into_iter()
            .filter(|mv| mv.from == from && mv.to == to)
            .collect();

        let found = match promotion {
            Some(kind) => candidates
                .into_iter()
                .find(|mv| mv.kind == MoveKind::Promotion(kind)),
            None => {
                if candidates.iter().any(|mv| mv.promotion_choice().is_some()) {
                    return Err(ChessError::MissingPromotionChoice { from, to });
                }
                candidates.into_iter().next()
            }
        };
        found.ok_or(ChessError::IllegalMove(requested))
    }

    fn owned_piece(&self, from: Square) -> Result<Piece> {
        let piece = self.board.get(from).ok_or(ChessError::EmptyOrigin(from))?;
        if piece.color != self.state.side_to_move {
            return Err(ChessError::WrongSideToMove {
                square: from,
                found: piece.color,
                to_move: self.state.side_to_move,
            });
        }
        Ok(piece)
    }

    fn check_move(&self, generator: &MoveGenerator, mv: Move) -> Result<()> {
        self.validate()?;
        let piece = self.owned_piece(mv.from)?;
        if piece.kind == PieceKind::Pawn
            && mv.to.rank() == promotion_rank(piece.color)
            && mv.promotion_choice().is_none()
        {
            return Err(ChessError::MissingPromotionChoice {
                from: mv.from,
                to: mv.to,
            });
        }
        if !generator.legal_moves(self, piece.color)?.contains(&mv) {
            return Err(ChessError::IllegalMove(mv));
        }
        Ok(())
    }

    /// Play `mv` without any validation. The mover is whoever stands on the
    /// origin square; the side to move becomes their opponent.
    pub(crate) fn make_move(&mut self, mv: Move) {
        let Some(piece) = self.board.remove(mv.from) else {
            return;
        };
        let color = piece.color;
        self.state.en_passant_file = None;

        match mv.kind {
            MoveKind::EnPassantCapture => {
                // The captured pawn stands beside the origin, on the target file.
                let d_file = mv.to.file() as i8 - mv.from.file() as i8;
                if let Some(captured) = mv.from.offset(0, d_file) {
                    self.board.remove(captured);
                }
            }
            MoveKind::DoublePawnPush => {
                self.state.en_passant_file = Some(mv.from.file());
            }
            _ => {}
        }

        if let Some(side) = mv.castle_side() {
            let path = castle_path(color, side);
            if let Some(rook) = self.board.remove(path.rook_from) {
                self.board.put(rook, path.rook_to);
            }
        }

        let landed = match mv.kind {
            MoveKind::Promotion(kind) => Piece::new(kind, color),
            _ => piece,
        };
        self.board.put(landed, mv.to);

        self.refresh_castling_rights();
        self.state.side_to_move = color.opposite();
        trace!("{} played {}", color, mv);
    }

    /// Drop every right whose king or rook has left its home square.
    fn refresh_castling_rights(&mut self) {
        for color in [Color::White, Color::Black] {
            for side in CastleSide::BOTH {
                let path = castle_path(color, side);
                let king = Piece::new(PieceKind::King, color);
                let rook = Piece::new(PieceKind::Rook, color);
                let home = self.board.get(path.king_from) == Some(king)
                    && self.board.get(path.rook_from) == Some(rook);
                if !home {
                    self.state.castling.revoke(color, side);
                }
            }
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::new()
    }
}
