//! Chess pieces.

use serde::{Deserialize, Serialize};

use crate::core::Side;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

/// A piece: kind plus owner. `Side::First` plays White from the bottom rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub side: Side,
}

impl Piece {
    #[must_use]
    pub const fn new(kind: PieceKind, side: Side) -> Self {
        Self { kind, side }
    }

    /// Row delta of a pawn step for this piece's owner.
    #[must_use]
    pub const fn forward(&self) -> i32 {
        match self.side {
            Side::First => -1,
            Side::Second => 1,
        }
    }

    /// Unicode glyph for display.
    #[must_use]
    pub const fn glyph(&self) -> char {
        match (self.side, self.kind) {
            (Side::First, PieceKind::King) => '♔',
            (Side::First, PieceKind::Queen) => '♕',
            (Side::First, PieceKind::Rook) => '♖',
            (Side::First, PieceKind::Bishop) => '♗',
            (Side::First, PieceKind::Knight) => '♘',
            (Side::First, PieceKind::Pawn) => '♙',
            (Side::Second, PieceKind::King) => '♚',
            (Side::Second, PieceKind::Queen) => '♛',
            (Side::Second, PieceKind::Rook) => '♜',
            (Side::Second, PieceKind::Bishop) => '♝',
            (Side::Second, PieceKind::Knight) => '♞',
            (Side::Second, PieceKind::Pawn) => '♟',
        }
    }
}
