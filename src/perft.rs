use crate::error::Result;
use crate::movegen::{Move, MoveGenerator};
use crate::position::Position;

/// Number of leaf positions reachable in exactly `depth` plies.
pub fn perft(generator: &MoveGenerator, position: &Position, depth: u32) -> Result<u64> {
    if depth == 0 {
        return Ok(1);
    }

    let moves = generator.legal_moves(position, position.side_to_move())?;
    if depth == 1 {
        return Ok(moves.len() as u64);
    }

    let mut nodes = 0;
    for mv in moves {
        let mut child = position.duplicate();
        child.make_move(mv);
        nodes += perft(generator, &child, depth - 1)?;
    }
    Ok(nodes)
}

/// Per-root-move breakdown of [`perft`], in generation order.
pub fn perft_divide(
    generator: &MoveGenerator,
    position: &Position,
    depth: u32,
) -> Result<Vec<(Move, u64)>> {
    if depth == 0 {
        return Ok(Vec::new());
    }

    generator
        .legal_moves(position, position.side_to_move())?
        .into_iter()
        .map(|mv| {
            let mut child = position.duplicate();
            child.make_move(mv);
            Ok((mv, perft(generator, &child, depth - 1)?))
        })
        .collect()
}
