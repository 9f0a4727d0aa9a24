use crate::game::board::{Board, BoardPosition, Direction};
use crate::game::moves;
use crate::game::piece::{Piece, PieceKind};
use crate::game::player::Player;
use crate::game::rng::{BoardRng, LayoutRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of pieces each player owns at the beginning: one king, five pawns.
pub const NB_INITIAL_PIECES: usize = 6;

// Sentinel values of the prescribed digit outside the playing phase
const PRESCRIBED_SETUP: i32 = -1;
const PRESCRIBED_NONE: i32 = 0;

/// Why an operation was rejected. Every fallible engine operation documents
/// the order in which these are checked; the first applicable one wins and
/// the game state is left untouched.
#[derive(Error, Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
pub enum RuleError {
    #[error("coordinates are not on the grid")]
    Out,
    #[error("a square that needed to be empty is occupied, or holds no piece of the right player")]
    Busy,
    #[error("the move does not respect the rules")]
    Rules,
    #[error("it is not the right time for this action")]
    Stage,
}

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Setup,
    Playing,
    Finished,
}

// A started move. The moving piece stays on its origin square on the board
// until the final step lands, so cancelling is just dropping this state.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
struct MoveInProgress {
    origin: BoardPosition,
    position: BoardPosition,
    visited: Vec<BoardPosition>,
    steps_left: u8,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    phase: Phase,
    current: Player,
    prescribed: i32,
    // Pieces placed during setup, per player
    placed: [u8; 2],
    // Captured pawns awaiting re-insertion, per player
    reserves: [u8; 2],
    selection: Option<MoveInProgress>,
    winner: Option<Player>,
}

impl GameState {
    /// A fresh game on the deterministic periodic board. North places first.
    pub fn new() -> GameState {
        GameState::with_board(Board::periodic())
    }

    /// A fresh game on a randomly laid out board (two top lines and two
    /// bottom lines each hold four squares of every digit).
    pub fn new_random() -> GameState {
        GameState::new_random_with(&mut BoardRng::default())
    }

    pub fn new_random_with<R: LayoutRng>(rng: &mut R) -> GameState {
        GameState::with_board(Board::random(rng))
    }

    /// A reproducible random game, for replays and tests.
    pub fn from_seed(seed: u64) -> GameState {
        GameState::new_random_with(&mut BoardRng::from_seed(seed))
    }

    fn with_board(board: Board) -> GameState {
        GameState {
            board,
            phase: Phase::Setup,
            current: Player::North,
            prescribed: PRESCRIBED_SETUP,
            placed: [0, 0],
            reserves: [0, 0],
            selection: None,
            winner: None,
        }
    }

    // === Queries ===

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The player whose turn it is, also meaningful during setup.
    pub fn current_player(&self) -> Player {
        self.current
    }

    /// The digit prescribed for the next move: -1 during setup, 0 once setup
    /// is over but before the first completed move, otherwise the digit of
    /// the previous move's landing square.
    pub fn prescribed_digit(&self) -> i32 {
        self.prescribed
    }

    /// Digit of a square, 0 when the coordinates are off the grid.
    pub fn digit_at(&self, line: i32, column: i32) -> u8 {
        self.board.digit_at(line, column)
    }

    /// The player holding the square, None when empty or off the grid.
    pub fn holder_at(&self, line: i32, column: i32) -> Option<Player> {
        let position = BoardPosition::new(line, column)?;
        self.board.occupant(position).map(|piece| piece.owner)
    }

    pub fn is_king_at(&self, line: i32, column: i32) -> bool {
        match BoardPosition::new(line, column) {
            Some(position) => {
                matches!(self.board.occupant(position), Some(piece) if piece.is_king())
            }
            None => false,
        }
    }

    /// The player who caught the opponent's king, None while the game is
    /// still running. Set exactly once, at the moment of capture.
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    pub fn pieces_on_board(&self, player: Player) -> usize {
        self.board.count_pieces(player)
    }

    /// Captured pawns of `player` available for re-insertion.
    pub fn reserve(&self, player: Player) -> usize {
        self.reserves[player.idx()] as usize
    }

    /// Whether the current player has a movable piece on the prescribed
    /// digit. When false, the restriction is dropped for selection and
    /// bringing back a captured pawn becomes legal.
    pub fn has_prescribed_move(&self) -> bool {
        moves::prescribed_movable_exists(&self.board, self.current, self.prescribed)
    }

    // === Setting up ===

    /// Which piece the current player must place next: the king first, then
    /// the pawns. None once the setting up is over.
    pub fn piece_to_place(&self) -> Option<PieceKind> {
        if self.phase != Phase::Setup {
            return None;
        }
        if self.placed[self.current.idx()] == 0 {
            Some(PieceKind::King)
        } else {
            Some(PieceKind::Pawn)
        }
    }

    /// Places the current player's next piece on the given square.
    ///
    /// Checked in this order: Stage when the setting up is over, Out for
    /// off-grid coordinates, Rules when the square is not on the player's two
    /// home lines, Busy when the square is occupied.
    pub fn place_piece(&mut self, line: i32, column: i32) -> Result<(), RuleError> {
        if self.phase != Phase::Setup {
            return Err(RuleError::Stage);
        }
        let position = BoardPosition::new(line, column).ok_or(RuleError::Out)?;
        if !self.current.home_lines().contains(&position.line()) {
            return Err(RuleError::Rules);
        }
        if self.board.occupant(position).is_some() {
            return Err(RuleError::Busy);
        }

        let kind = if self.placed[self.current.idx()] == 0 {
            PieceKind::King
        } else {
            PieceKind::Pawn
        };
        self.board.put(
            position,
            Some(Piece {
                owner: self.current,
                kind,
            }),
        );
        self.placed[self.current.idx()] += 1;
        if self.placed[self.current.idx()] as usize == NB_INITIAL_PIECES {
            if self.current == Player::North {
                self.current = Player::South;
            } else {
                self.phase = Phase::Playing;
                self.current = Player::North;
                self.prescribed = PRESCRIBED_NONE;
            }
        }
        Ok(())
    }

    // === Playing ===

    /// Whether the square holds a piece the current player may select now.
    /// Useful for highlighting movable pieces; `select_piece` repeats these
    /// checks itself.
    pub fn can_select(&self, line: i32, column: i32) -> bool {
        if self.phase != Phase::Playing || self.selection.is_some() {
            return false;
        }
        let Some(position) = BoardPosition::new(line, column) else {
            return false;
        };
        if !matches!(self.board.occupant(position), Some(piece) if piece.owner == self.current) {
            return false;
        }
        self.selectable(position)
    }

    // A selectable piece has a complete move and either stands on the
    // prescribed digit or no current-player piece on that digit is movable
    fn selectable(&self, position: BoardPosition) -> bool {
        if !moves::complete_move_exists(&self.board, position) {
            return false;
        }
        i32::from(self.board.digit(position)) == self.prescribed || !self.has_prescribed_move()
    }

    /// Selects the piece to move and starts a move with a step budget equal
    /// to the digit of its square.
    ///
    /// Checked in this order: Out for off-grid coordinates; Stage during
    /// setup or when a selection or move is already active; Busy when the
    /// square holds no piece of the current player; Rules when the piece is
    /// off the prescribed digit while a movable piece stands on it, or when
    /// the piece has no complete move at all.
    pub fn select_piece(&mut self, line: i32, column: i32) -> Result<(), RuleError> {
        let position = BoardPosition::new(line, column).ok_or(RuleError::Out)?;
        if self.phase != Phase::Playing || self.selection.is_some() {
            return Err(RuleError::Stage);
        }
        if !matches!(self.board.occupant(position), Some(piece) if piece.owner == self.current) {
            return Err(RuleError::Busy);
        }
        if !self.selectable(position) {
            return Err(RuleError::Rules);
        }

        self.selection = Some(MoveInProgress {
            origin: position,
            position,
            visited: vec![position],
            steps_left: self.board.digit(position),
        });
        Ok(())
    }

    /// Discards the started move; the piece stays on its original square.
    /// Stage when there is nothing to cancel.
    pub fn cancel_move(&mut self) -> Result<(), RuleError> {
        if self.phase != Phase::Playing || self.selection.is_none() {
            return Err(RuleError::Stage);
        }
        self.selection = None;
        Ok(())
    }

    /// Moves the selected piece one orthogonal step.
    ///
    /// Checked in this order: Stage when no move is in progress; Out when the
    /// step would leave the grid; Busy when the target is occupied and this
    /// is not the final step, or occupied by the mover's own piece on the
    /// final step; Rules when the target was already entered during this
    /// move. The final step concludes the move: an opponent piece on the
    /// landing square is caught (the game ends if it is the king), the
    /// prescribed digit becomes the landing square's digit and the turn
    /// passes.
    pub fn move_one_step(&mut self, direction: Direction) -> Result<(), RuleError> {
        let Some(mip) = self.selection.as_mut() else {
            return Err(RuleError::Stage);
        };
        let target = mip.position.step(direction).ok_or(RuleError::Out)?;
        if let Some(piece) = self.board.occupant(target) {
            if mip.steps_left > 1 || piece.owner == self.current {
                return Err(RuleError::Busy);
            }
        }
        if mip.visited.contains(&target) {
            return Err(RuleError::Rules);
        }

        if mip.steps_left > 1 {
            mip.visited.push(target);
            mip.position = target;
            mip.steps_left -= 1;
            return Ok(());
        }
        let origin = mip.origin;
        self.selection = None;
        self.finish_move(origin, target);
        Ok(())
    }

    fn finish_move(&mut self, origin: BoardPosition, landing: BoardPosition) {
        let mover = self.board.take(origin);
        let caught = self.board.put(landing, mover);
        if let Some(piece) = caught {
            if piece.is_king() {
                self.winner = Some(self.current);
                self.phase = Phase::Finished;
                return;
            }
            self.reserves[piece.owner.idx()] += 1;
        }
        self.prescribed = i32::from(self.board.digit(landing));
        self.current = self.current.opponent();
    }

    /// Selects the piece on the start square and plays a complete move to the
    /// target square in one call, searching for any legal path of exactly the
    /// start square's digit in length.
    ///
    /// Checked in this order: Out when any coordinate is off the grid; Stage
    /// during setup or when a selection or move is already active; Busy when
    /// the start square holds no piece of the current player; Rules when the
    /// piece is off the prescribed digit while a movable piece stands on it,
    /// or when no legal path reaches the target. On Rules the board is left
    /// exactly as it was.
    pub fn quick_move(
        &mut self,
        start_line: i32,
        start_column: i32,
        target_line: i32,
        target_column: i32,
    ) -> Result<(), RuleError> {
        let start = BoardPosition::new(start_line, start_column).ok_or(RuleError::Out)?;
        let target = BoardPosition::new(target_line, target_column).ok_or(RuleError::Out)?;
        if self.phase != Phase::Playing || self.selection.is_some() {
            return Err(RuleError::Stage);
        }
        if !matches!(self.board.occupant(start), Some(piece) if piece.owner == self.current) {
            return Err(RuleError::Busy);
        }
        if i32::from(self.board.digit(start)) != self.prescribed && self.has_prescribed_move() {
            return Err(RuleError::Rules);
        }
        // Search before touching anything, then replay the found path through
        // the stepwise operation so both entry points share one rule set
        let path = moves::find_path(&self.board, start, target).ok_or(RuleError::Rules)?;

        self.selection = Some(MoveInProgress {
            origin: start,
            position: start,
            visited: vec![start],
            steps_left: self.board.digit(start),
        });
        for direction in path {
            self.move_one_step(direction)?;
        }
        Ok(())
    }

    /// Brings one previously caught pawn back onto an empty square bearing
    /// the prescribed digit. Legal only while the current player has no
    /// movable piece on the prescribed digit. Concludes the turn without
    /// changing the prescribed digit.
    ///
    /// Checked in this order: Out for off-grid coordinates; Stage during
    /// setup, after the game ended, or when a selection or move is active;
    /// Busy when the square is occupied; Rules when the player has no caught
    /// pawn, or has a movable piece on the prescribed digit, or the square
    /// does not bear the prescribed digit.
    pub fn insert_pawn(&mut self, line: i32, column: i32) -> Result<(), RuleError> {
        let position = BoardPosition::new(line, column).ok_or(RuleError::Out)?;
        if self.phase != Phase::Playing || self.selection.is_some() {
            return Err(RuleError::Stage);
        }
        if self.board.occupant(position).is_some() {
            return Err(RuleError::Busy);
        }
        if self.reserves[self.current.idx()] == 0 {
            return Err(RuleError::Rules);
        }
        if self.has_prescribed_move() {
            return Err(RuleError::Rules);
        }
        if i32::from(self.board.digit(position)) != self.prescribed {
            return Err(RuleError::Rules);
        }

        self.board.put(position, Some(Piece::pawn(self.current)));
        self.reserves[self.current.idx()] -= 1;
        self.current = self.current.opponent();
        Ok(())
    }
}

impl Default for GameState {
    fn default() -> Self {
        GameState::new()
    }
}
