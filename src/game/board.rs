use crate::game::piece::Piece;
use crate::game::player::Player;
use crate::game::rng::LayoutRng;
use serde::{Deserialize, Serialize};

/// Side length of the square board.
pub const DIMENSION: usize = 6;

/// Digits run from 1 to NB_DIGITS and are evenly distributed, so each digit
/// labels exactly DIMENSION * DIMENSION / NB_DIGITS squares.
pub const NB_DIGITS: usize = 3;

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];
}

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
pub struct BoardPosition {
    line: usize,
    column: usize,
}

impl BoardPosition {
    // Takes signed integers because callers probe out-of-grid coordinates
    pub fn new(line: i32, column: i32) -> Option<Self> {
        let line = usize::try_from(line).ok()?;
        let column = usize::try_from(column).ok()?;
        if line >= DIMENSION || column >= DIMENSION {
            return None;
        }
        Some(BoardPosition { line, column })
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    // One orthogonal step, None when it would leave the grid.
    // North is towards decreasing line numbers.
    pub fn step(&self, direction: Direction) -> Option<BoardPosition> {
        let (line, column) = (self.line as i32, self.column as i32);
        match direction {
            Direction::North => BoardPosition::new(line - 1, column),
            Direction::South => BoardPosition::new(line + 1, column),
            Direction::East => BoardPosition::new(line, column + 1),
            Direction::West => BoardPosition::new(line, column - 1),
        }
    }
}

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
struct Square {
    digit: u8,
    occupant: Option<Piece>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Board {
    squares: [[Square; DIMENSION]; DIMENSION],
}

impl Board {
    /// A deterministic periodic layout: the digit of a square only depends on
    /// (line + column) % NB_DIGITS, giving every digit exactly twelve squares.
    pub fn periodic() -> Board {
        Board::from_digit_fn(|line, column| ((line + column) % NB_DIGITS + 1) as u8)
    }

    /// A random layout under the balance constraint: the two top lines
    /// together and the two bottom lines together each hold the same count of
    /// every digit (four of each). Each two-line band is an independently
    /// shuffled multiset, so the constraint holds by construction and no
    /// rejection loop is needed.
    pub fn random<R: LayoutRng>(rng: &mut R) -> Board {
        let mut bands = [balanced_band(), balanced_band(), balanced_band()];
        for band in &mut bands {
            rng.shuffle_digits(band);
        }
        Board::from_digit_fn(|line, column| bands[line / 2][(line % 2) * DIMENSION + column])
    }

    fn from_digit_fn<F: Fn(usize, usize) -> u8>(digit: F) -> Board {
        let mut squares = [[Square {
            digit: 0,
            occupant: None,
        }; DIMENSION]; DIMENSION];
        for (line, row) in squares.iter_mut().enumerate() {
            for (column, square) in row.iter_mut().enumerate() {
                square.digit = digit(line, column);
            }
        }
        Board { squares }
    }

    #[cfg(test)]
    pub(crate) fn from_digits(digits: [[u8; DIMENSION]; DIMENSION]) -> Board {
        Board::from_digit_fn(|line, column| digits[line][column])
    }

    pub fn digit(&self, position: BoardPosition) -> u8 {
        self.squares[position.line][position.column].digit
    }

    // Out-of-grid probes return 0 rather than failing
    pub fn digit_at(&self, line: i32, column: i32) -> u8 {
        match BoardPosition::new(line, column) {
            Some(position) => self.digit(position),
            None => 0,
        }
    }

    pub fn occupant(&self, position: BoardPosition) -> Option<Piece> {
        self.squares[position.line][position.column].occupant
    }

    pub(crate) fn take(&mut self, position: BoardPosition) -> Option<Piece> {
        self.squares[position.line][position.column].occupant.take()
    }

    pub(crate) fn put(&mut self, position: BoardPosition, piece: Option<Piece>) -> Option<Piece> {
        std::mem::replace(
            &mut self.squares[position.line][position.column].occupant,
            piece,
        )
    }

    pub fn count_pieces(&self, player: Player) -> usize {
        self.positions()
            .filter(|&p| matches!(self.occupant(p), Some(piece) if piece.owner == player))
            .count()
    }

    pub fn positions(&self) -> impl Iterator<Item = BoardPosition> {
        (0..DIMENSION).flat_map(|line| {
            (0..DIMENSION).map(move |column| BoardPosition { line, column })
        })
    }
}

fn balanced_band() -> [u8; 2 * DIMENSION] {
    let mut band = [0u8; 2 * DIMENSION];
    for (i, slot) in band.iter_mut().enumerate() {
        *slot = (i % NB_DIGITS + 1) as u8;
    }
    band
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::rng::BoardRng;

    // Reverses instead of shuffling, so layouts are deterministic
    struct MockRng;

    impl LayoutRng for MockRng {
        fn shuffle_digits(&mut self, digits: &mut [u8]) {
            digits.reverse();
        }
    }

    fn digit_counts(board: &Board) -> [usize; NB_DIGITS] {
        let mut counts = [0usize; NB_DIGITS];
        for position in board.positions() {
            counts[board.digit(position) as usize - 1] += 1;
        }
        counts
    }

    #[test]
    fn test_position_bounds() {
        assert!(BoardPosition::new(0, 0).is_some());
        assert!(BoardPosition::new(5, 5).is_some());
        assert!(BoardPosition::new(-1, 0).is_none());
        assert!(BoardPosition::new(0, -1).is_none());
        assert!(BoardPosition::new(6, 0).is_none());
        assert!(BoardPosition::new(0, 6).is_none());
    }

    #[test]
    fn test_step_leaves_grid() {
        let corner = BoardPosition::new(0, 0).unwrap();
        assert!(corner.step(Direction::North).is_none());
        assert!(corner.step(Direction::West).is_none());
        assert_eq!(corner.step(Direction::South), BoardPosition::new(1, 0));
        assert_eq!(corner.step(Direction::East), BoardPosition::new(0, 1));
    }

    #[test]
    fn test_periodic_digit_counts() {
        let board = Board::periodic();
        assert_eq!(digit_counts(&board), [12, 12, 12]);
    }

    #[test]
    fn test_random_digit_counts() {
        let board = Board::random(&mut BoardRng::from_seed(42));
        assert_eq!(digit_counts(&board), [12, 12, 12]);
    }

    #[test]
    fn test_random_band_balance() {
        for seed in 0..20 {
            let board = Board::random(&mut BoardRng::from_seed(seed));
            for lines in [[0, 1], [DIMENSION - 2, DIMENSION - 1]] {
                let mut counts = [0usize; NB_DIGITS];
                for line in lines {
                    for column in 0..DIMENSION {
                        counts[board.digit_at(line as i32, column as i32) as usize - 1] += 1;
                    }
                }
                assert_eq!(counts, [4, 4, 4]);
            }
        }
    }

    #[test]
    fn test_mock_rng_layout() {
        let board = Board::random(&mut MockRng);
        // balanced_band is 1,2,3 repeating; reversed it reads 3,2,1
        assert_eq!(board.digit_at(0, 0), 3);
        assert_eq!(board.digit_at(0, 1), 2);
        assert_eq!(board.digit_at(0, 2), 1);
    }

    #[test]
    fn test_digit_at_out_of_grid() {
        let board = Board::periodic();
        assert_eq!(board.digit_at(-1, 0), 0);
        assert_eq!(board.digit_at(0, 6), 0);
        assert_eq!(board.digit_at(17, -3), 0);
        assert_ne!(board.digit_at(3, 3), 0);
    }

    #[test]
    fn test_take_and_put() {
        let mut board = Board::periodic();
        let position = BoardPosition::new(2, 2).unwrap();
        assert_eq!(board.occupant(position), None);
        assert_eq!(board.put(position, Some(Piece::king(Player::North))), None);
        assert_eq!(board.count_pieces(Player::North), 1);
        let taken = board.take(position);
        assert_eq!(taken, Some(Piece::king(Player::North)));
        assert_eq!(board.count_pieces(Player::North), 0);
    }
}
