mod game;

pub use game::{
    Board, BoardPosition, Direction, GameState, LayoutRng, Phase, Piece, PieceKind, Player,
    BoardRng, RuleError, DIMENSION, NB_DIGITS, NB_INITIAL_PIECES,
};
