//! Chess board binding
//!
//! [`Board`] wraps a `shakmaty` position with an undo stack so the search
//! can apply and retract moves in place.

use std::fmt;

use shakmaty::fen::Fen;
use shakmaty::uci::UciMove;
use shakmaty::{
    Bitboard, CastlingMode, Chess, Color, EnPassantMode, Move, MoveList, Piece, Position, Square,
};
use thiserror::Error;

use super::rules::Rules;

/// Failures raised by the rules binding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("illegal move {uci} in position {fen}")]
    IllegalMove { uci: String, fen: String },

    #[error("no move to undo")]
    EmptyMoveStack,

    #[error("invalid FEN {fen:?}: {reason}")]
    InvalidFen { fen: String, reason: String },
}

/// A chess position with a move stack.
#[derive(Clone, Debug, Default)]
pub struct Board {
    pos: Chess,
    /// Previous position and the move played from it, newest last.
    stack: Vec<(Chess, Move)>,
}

impl Board {
    pub fn startpos() -> Self {
        Board::default()
    }

    pub fn from_fen(fen: &str) -> Result<Self, BoardError> {
        let invalid = |reason: String| BoardError::InvalidFen {
            fen: fen.to_string(),
            reason,
        };
        let parsed: Fen = fen.trim().parse().map_err(|e| invalid(format!("{e}")))?;
        let pos: Chess = parsed
            .into_position(CastlingMode::Standard)
            .map_err(|e| invalid(format!("{e}")))?;
        Ok(Board::from(pos))
    }

    pub fn position(&self) -> &Chess {
        &self.pos
    }

    /// Moves pushed so far, oldest first.
    pub fn move_stack(&self) -> Vec<Move> {
        self.stack.iter().map(|(_, mv)| mv.clone()).collect()
    }

    /// Parses a UCI move string and checks it against the current position.
    pub fn parse_uci_move(&self, move_str: &str) -> Option<Move> {
        let uci: UciMove = move_str.parse().ok()?;
        let mv = uci.to_move(&self.pos).ok()?;
        if self.pos.is_legal(&mv) { Some(mv) } else { None }
    }

    /// Full FEN of the current position. The en passant square is only
    /// written when a capture is actually possible.
    pub fn fen_key(&self) -> String {
        Fen::from_position(self.pos.clone(), EnPassantMode::Legal).to_string()
    }

    fn uci(mv: &Move) -> String {
        mv.to_uci(CastlingMode::Standard).to_string()
    }
}

impl From<Chess> for Board {
    fn from(pos: Chess) -> Self {
        Board {
            pos,
            stack: Vec::new(),
        }
    }
}

impl Rules for Board {
    type Key = String;

    fn turn(&self) -> Color {
        self.pos.turn()
    }

    fn piece_at(&self, square: Square) -> Option<Piece> {
        self.pos.board().piece_at(square)
    }

    fn occupied(&self) -> Bitboard {
        self.pos.board().occupied()
    }

    fn legal_moves(&self) -> MoveList {
        self.pos.legal_moves()
    }

    fn is_capture(&self, mv: &Move) -> bool {
        mv.is_capture()
    }

    fn is_en_passant(&self, mv: &Move) -> bool {
        mv.is_en_passant()
    }

    fn is_check(&self) -> bool {
        self.pos.is_check()
    }

    fn push(&mut self, mv: &Move) -> Result<(), BoardError> {
        let next = self
            .pos
            .clone()
            .play(mv)
            .map_err(|_| BoardError::IllegalMove {
                uci: Board::uci(mv),
                fen: self.fen_key(),
            })?;
        let prev = std::mem::replace(&mut self.pos, next);
        self.stack.push((prev, mv.clone()));
        Ok(())
    }

    fn pop(&mut self) -> Result<Move, BoardError> {
        let (prev, mv) = self.stack.pop().ok_or(BoardError::EmptyMoveStack)?;
        self.pos = prev;
        Ok(mv)
    }

    fn key(&self) -> String {
        self.fen_key()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:?}", self.pos.board())?;
        write!(f, "Key: {}", self.fen_key())
    }
}
