use crate::game::player::Player;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
pub enum PieceKind {
    Pawn,
    King,
}

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
pub struct Piece {
    pub owner: Player,
    pub kind: PieceKind,
}

impl Piece {
    pub fn pawn(owner: Player) -> Piece {
        Piece {
            owner,
            kind: PieceKind::Pawn,
        }
    }

    pub fn king(owner: Player) -> Piece {
        Piece {
            owner,
            kind: PieceKind::King,
        }
    }

    pub fn is_king(&self) -> bool {
        self.kind == PieceKind::King
    }
}
