use anyhow::{anyhow, bail, Result};
use salmon_rules::{
    new_position, Arrangement, CastleSide, CastlingRights, Color, PieceKind, Position, Square,
};

/// Builds a position from a placement record: ranks 8 down to 1 separated
/// by `/`, then side to move, castling letters and en-passant square.
/// Clock fields, if present, are ignored.
pub fn position_from(record: &str) -> Result<Position> {
    let mut fields = record.split_whitespace();
    let placement = fields.next().ok_or_else(|| anyhow!("empty record"))?;
    let side = match fields.next().unwrap_or("w") {
        "w" => Color::White,
        "b" => Color::Black,
        other => bail!("bad side to move {:?}", other),
    };

    let mut arrangement = Arrangement::new(side);
    for (row, rank_text) in placement.split('/').enumerate() {
        if row >= 8 {
            bail!("more than eight ranks in {:?}", placement);
        }
        let rank = 7 - row as u8;
        let mut file = 0u8;
        for symbol in rank_text.chars() {
            if let Some(skip) = symbol.to_digit(10) {
                file += skip as u8;
                continue;
            }
            let kind = match symbol.to_ascii_lowercase() {
                'p' => PieceKind::Pawn,
                'n' => PieceKind::Knight,
                'b' => PieceKind::Bishop,
                'r' => PieceKind::Rook,
                'q' => PieceKind::Queen,
                'k' => PieceKind::King,
                _ => bail!("unknown piece {:?}", symbol),
            };
            let color = if symbol.is_ascii_uppercase() {
                Color::White
            } else {
                Color::Black
            };
            arrangement = arrangement.with(Square::from_rank_file(rank, file)?, kind, color);
            file += 1;
        }
    }

    let castling = fields.next().unwrap_or("-");
    let mut rights = CastlingRights::all();
    for (letter, color, castle) in [
        ('K', Color::White, CastleSide::Kingside),
        ('Q', Color::White, CastleSide::Queenside),
        ('k', Color::Black, CastleSide::Kingside),
        ('q', Color::Black, CastleSide::Queenside),
    ] {
        if !castling.contains(letter) {
            rights = rights.without(color, castle);
        }
    }
    arrangement.castling = Some(rights);

    arrangement.en_passant_file = match fields.next().unwrap_or("-") {
        "-" => None,
        target => {
            let file = target
                .bytes()
                .next()
                .filter(|byte| (b'a'..=b'h').contains(byte))
                .ok_or_else(|| anyhow!("bad en-passant square {:?}", target))?;
            Some(file - b'a')
        }
    };

    Ok(new_position(Some(&arrangement))?)
}
