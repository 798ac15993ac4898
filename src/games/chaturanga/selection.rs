//! Two-click move entry: pick a piece, then pick its destination.

use serde::{Deserialize, Serialize};

use crate::board::Cell;
use crate::rules::{Outcome, RulesEngine};

use super::game::{Chaturanga, ChessMove, ChessState};

/// What a click did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickResult {
    /// A piece of the side to move is now selected.
    Selected(Cell),
    /// The move was refused and the selection dropped.
    Deselected,
    /// The selected piece moved.
    Moved(Outcome),
    /// Nothing happened.
    Ignored,
}

/// Click-driven selection state for one board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    selected: Option<Cell>,
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn selected(&self) -> Option<Cell> {
        self.selected
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Handle a click on `cell`.
    pub fn click(
        &mut self,
        engine: &Chaturanga,
        state: &mut ChessState,
        cell: Cell,
    ) -> ClickResult {
        if engine.is_finished(state) {
            self.selected = None;
            return ClickResult::Ignored;
        }

        let owns = state
            .piece_at(cell)
            .is_some_and(|p| p.side == state.side_to_move);

        match self.selected {
            _ if owns => {
                self.selected = Some(cell);
                ClickResult::Selected(cell)
            }
            None => ClickResult::Ignored,
            Some(from) => {
                self.selected = None;
                match engine.apply_move(state, &ChessMove::new(from, cell)) {
                    Outcome::Invalid(_) => ClickResult::Deselected,
                    outcome => ClickResult::Moved(outcome),
                }
            }
        }
    }
}
