//! Path feasibility for moves.
//!
//! A complete move takes exactly as many orthogonal steps as the digit of the
//! piece's starting square, never enters a square twice, never passes through
//! an occupied square, and may only land on a square that is empty or held by
//! the opponent. Everything here works on a borrowed board and mutates
//! nothing, so the engine can answer "is this piece movable" questions and
//! search quick-move paths without touching game state.

use crate::game::board::{Board, BoardPosition, Direction};
use crate::game::player::Player;

/// Whether the piece standing on `origin` has at least one complete move.
pub(crate) fn complete_move_exists(board: &Board, origin: BoardPosition) -> bool {
    let Some(piece) = board.occupant(origin) else {
        return false;
    };
    let steps = board.digit(origin);
    let mut visited = vec![origin];
    let mut path = Vec::new();
    search(board, piece.owner, origin, &mut visited, steps, None, &mut path)
}

/// Whether `player` has any piece standing on the prescribed digit that can
/// make a complete move. When this is false the prescribed-digit restriction
/// is dropped and insertion becomes available.
pub(crate) fn prescribed_movable_exists(board: &Board, player: Player, prescribed: i32) -> bool {
    board.positions().any(|position| {
        i32::from(board.digit(position)) == prescribed
            && matches!(board.occupant(position), Some(piece) if piece.owner == player)
            && complete_move_exists(board, position)
    })
}

/// A sequence of directions forming a complete legal move from `origin`
/// landing on `target`, or None when no such path exists. When several paths
/// exist, any one of them is returned.
pub(crate) fn find_path(
    board: &Board,
    origin: BoardPosition,
    target: BoardPosition,
) -> Option<Vec<Direction>> {
    let piece = board.occupant(origin)?;
    let steps = board.digit(origin);
    let mut visited = vec![origin];
    let mut path = Vec::new();
    if search(
        board,
        piece.owner,
        origin,
        &mut visited,
        steps,
        Some(target),
        &mut path,
    ) {
        Some(path)
    } else {
        None
    }
}

// Depth-first over the four directions. Intermediate squares must be empty
// and unvisited; the landing square may also hold an opponent piece.
fn search(
    board: &Board,
    mover: Player,
    position: BoardPosition,
    visited: &mut Vec<BoardPosition>,
    steps_left: u8,
    target: Option<BoardPosition>,
    path: &mut Vec<Direction>,
) -> bool {
    for direction in Direction::ALL {
        let Some(next) = position.step(direction) else {
            continue;
        };
        if visited.contains(&next) {
            continue;
        }
        if steps_left == 1 {
            let landing_ok = match board.occupant(next) {
                None => true,
                Some(piece) => piece.owner != mover,
            };
            if landing_ok && target.map_or(true, |t| t == next) {
                path.push(direction);
                return true;
            }
            continue;
        }
        if board.occupant(next).is_some() {
            continue;
        }
        visited.push(next);
        path.push(direction);
        if search(board, mover, next, visited, steps_left - 1, target, path) {
            return true;
        }
        path.pop();
        visited.pop();
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::board::DIMENSION;
    use crate::game::piece::Piece;

    fn pos(line: i32, column: i32) -> BoardPosition {
        BoardPosition::new(line, column).unwrap()
    }

    fn uniform_board(digit: u8) -> Board {
        Board::from_digits([[digit; DIMENSION]; DIMENSION])
    }

    #[test]
    fn test_lone_piece_is_movable() {
        let mut board = uniform_board(3);
        board.put(pos(2, 2), Some(Piece::pawn(Player::North)));
        assert!(complete_move_exists(&board, pos(2, 2)));
    }

    #[test]
    fn test_empty_square_is_not_movable() {
        let board = uniform_board(1);
        assert!(!complete_move_exists(&board, pos(2, 2)));
    }

    #[test]
    fn test_surrounded_piece_is_not_movable() {
        let mut board = uniform_board(1);
        board.put(pos(2, 2), Some(Piece::pawn(Player::North)));
        board.put(pos(1, 2), Some(Piece::pawn(Player::North)));
        board.put(pos(3, 2), Some(Piece::pawn(Player::North)));
        board.put(pos(2, 1), Some(Piece::pawn(Player::North)));
        board.put(pos(2, 3), Some(Piece::pawn(Player::North)));
        assert!(!complete_move_exists(&board, pos(2, 2)));
    }

    #[test]
    fn test_surrounded_by_opponents_can_still_capture() {
        // Digit 1: every neighbour is a landing square, so an opponent next
        // door is a legal capture
        let mut board = uniform_board(1);
        board.put(pos(2, 2), Some(Piece::pawn(Player::North)));
        board.put(pos(1, 2), Some(Piece::pawn(Player::South)));
        board.put(pos(3, 2), Some(Piece::pawn(Player::South)));
        board.put(pos(2, 1), Some(Piece::pawn(Player::South)));
        board.put(pos(2, 3), Some(Piece::pawn(Player::South)));
        assert!(complete_move_exists(&board, pos(2, 2)));
    }

    #[test]
    fn test_opponent_blocks_intermediate_steps() {
        // Digit 2 from a corner: both exits are opponent squares, which may
        // not be passed through on a non-final step
        let mut board = uniform_board(2);
        board.put(pos(0, 0), Some(Piece::pawn(Player::North)));
        board.put(pos(0, 1), Some(Piece::pawn(Player::South)));
        board.put(pos(1, 0), Some(Piece::pawn(Player::South)));
        assert!(!complete_move_exists(&board, pos(0, 0)));
    }

    #[test]
    fn test_find_path_reaches_target() {
        let mut board = uniform_board(3);
        board.put(pos(2, 2), Some(Piece::pawn(Player::North)));
        let path = find_path(&board, pos(2, 2), pos(2, 5)).unwrap();
        assert_eq!(path.len(), 3);
        // Walk the path and check it ends on the target
        let mut position = pos(2, 2);
        for direction in path {
            position = position.step(direction).unwrap();
        }
        assert_eq!(position, pos(2, 5));
    }

    #[test]
    fn test_find_path_wrong_distance() {
        let mut board = uniform_board(2);
        board.put(pos(2, 2), Some(Piece::pawn(Player::North)));
        // Adjacent square: would take 1 step or 3, never exactly 2
        assert!(find_path(&board, pos(2, 2), pos(2, 3)).is_none());
    }

    #[test]
    fn test_find_path_routes_around_block() {
        let mut board = uniform_board(2);
        board.put(pos(0, 0), Some(Piece::pawn(Player::North)));
        board.put(pos(0, 1), Some(Piece::pawn(Player::North)));
        // The only 2-step route to (0,2) passes through the occupied (0,1)
        assert!(find_path(&board, pos(0, 0), pos(0, 2)).is_none());
        // (1,1) stays reachable via (1,0)
        let path = find_path(&board, pos(0, 0), pos(1, 1)).unwrap();
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn test_find_path_lands_on_opponent_only_at_the_end() {
        let mut board = uniform_board(2);
        board.put(pos(2, 2), Some(Piece::pawn(Player::North)));
        board.put(pos(2, 4), Some(Piece::pawn(Player::South)));
        assert!(find_path(&board, pos(2, 2), pos(2, 4)).is_some());
        // Own piece on the landing square is never legal
        board.put(pos(2, 4), Some(Piece::pawn(Player::North)));
        assert!(find_path(&board, pos(2, 2), pos(2, 4)).is_none());
    }

    #[test]
    fn test_find_path_never_revisits() {
        // Digit 2 cannot end where it started: that would revisit the origin
        let mut board = uniform_board(2);
        board.put(pos(2, 2), Some(Piece::pawn(Player::North)));
        assert!(find_path(&board, pos(2, 2), pos(2, 2)).is_none());
    }

    #[test]
    fn test_prescribed_movable_exists() {
        let mut board = uniform_board(2);
        board.put(pos(2, 2), Some(Piece::pawn(Player::North)));
        assert!(prescribed_movable_exists(&board, Player::North, 2));
        assert!(!prescribed_movable_exists(&board, Player::North, 3));
        assert!(!prescribed_movable_exists(&board, Player::South, 2));
        // Digit 0 never matches any square
        assert!(!prescribed_movable_exists(&board, Player::North, 0));
    }
}
