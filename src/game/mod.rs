mod board;
mod game_state;
mod moves;
mod piece;
mod player;
mod rng;

pub use board::{Board, BoardPosition, Direction, DIMENSION, NB_DIGITS};
pub use game_state::{GameState, Phase, RuleError, NB_INITIAL_PIECES};
pub use piece::{Piece, PieceKind};
pub use player::Player;
pub use rng::{BoardRng, LayoutRng};
