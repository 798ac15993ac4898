//! Moksha Patam rules.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{GameRng, Side, SideMap};
use crate::rules::{GameResult, Outcome, Rejection, RulesEngine};

use super::board::{TeleportKind, TeleportTable, FIRST_SQUARE, LAST_SQUARE};

/// How a roll resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    Step,
    Ladder,
    Snake,
    /// The roll would pass the last square; the token stays put.
    Overshoot,
}

/// One entry in the move log.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub side: Side,
    pub roll: u8,
    pub from: u8,
    pub to: u8,
    pub kind: MoveKind,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MokshaState {
    pub positions: SideMap<u8>,
    pub side_to_move: Side,
    pub last_roll: Option<u8>,
    pub winner: Option<Side>,
    pub log: Vector<MoveRecord>,
}

impl Default for MokshaState {
    fn default() -> Self {
        Self {
            positions: SideMap::with_value(FIRST_SQUARE),
            side_to_move: Side::First,
            last_roll: None,
            winner: None,
            log: Vector::new(),
        }
    }
}

impl MokshaState {
    #[must_use]
    pub fn position(&self, side: Side) -> u8 {
        self.positions[side]
    }

    /// Most recent log entry.
    #[must_use]
    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.log.back()
    }
}

/// Moksha Patam rule book. A move is the die value rolled.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MokshaPatam {
    table: TeleportTable,
}

impl MokshaPatam {
    #[must_use]
    pub fn new(table: TeleportTable) -> Self {
        Self { table }
    }

    #[must_use]
    pub fn table(&self) -> &TeleportTable {
        &self.table
    }

    /// Roll the die for the side to move and apply the result.
    pub fn roll(&self, state: &mut MokshaState, rng: &mut GameRng) -> Outcome {
        if state.winner.is_some() {
            return Outcome::Invalid(Rejection::Finished);
        }
        let value = rng.roll_die();
        self.apply_move(state, &value)
    }

    fn resolve(&self, from: u8, roll: u8) -> (u8, MoveKind) {
        let target = from + roll;
        if target > LAST_SQUARE {
            return (from, MoveKind::Overshoot);
        }
        match self.table.get(target) {
            Some(t) if t.kind == TeleportKind::Ladder => (t.to, MoveKind::Ladder),
            Some(t) => (t.to, MoveKind::Snake),
            None => (target, MoveKind::Step),
        }
    }
}

impl RulesEngine for MokshaPatam {
    type State = MokshaState;
    type Move = u8;

    fn initial_state(&self, _rng: &mut GameRng) -> MokshaState {
        MokshaState::default()
    }

    fn side_to_move(&self, state: &MokshaState) -> Side {
        state.side_to_move
    }

    fn legal_moves(&self, state: &MokshaState) -> Vec<u8> {
        if state.winner.is_some() {
            return Vec::new();
        }
        (1..=6).collect()
    }

    fn apply_move(&self, state: &mut MokshaState, roll: &u8) -> Outcome {
        if state.winner.is_some() {
            return Outcome::Invalid(Rejection::Finished);
        }
        if !(1..=6).contains(roll) {
            return Outcome::Invalid(Rejection::IllegalMove);
        }

        let side = state.side_to_move;
        let from = state.positions[side];
        let (to, kind) = self.resolve(from, *roll);

        match kind {
            MoveKind::Ladder | MoveKind::Snake => {
                tracing::debug!(%side, roll, landed = from + roll, to, ?kind, "teleport");
            }
            _ => tracing::debug!(%side, roll, from, to, ?kind, "token moved"),
        }

        state.positions[side] = to;
        state.last_roll = Some(*roll);
        state.log.push_back(MoveRecord { side, roll: *roll, from, to, kind });

        if to == LAST_SQUARE {
            tracing::info!(%side, "moksha patam won");
            state.winner = Some(side);
            return Outcome::GameOver(GameResult::Winner(side));
        }

        state.side_to_move = side.opponent();
        Outcome::Continues
    }

    fn is_terminal(&self, state: &MokshaState) -> Option<GameResult> {
        state.winner.map(GameResult::Winner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(first: u8, second: u8) -> MokshaState {
        let mut state = MokshaState::default();
        state.positions[Side::First] = first;
        state.positions[Side::Second] = second;
        state
    }

    #[test]
    fn test_plain_step_and_turn_passes() {
        let engine = MokshaPatam::default();
        let mut state = MokshaState::default();

        assert_eq!(engine.apply_move(&mut state, &1), Outcome::Continues);
        assert_eq!(state.position(Side::First), 2);
        assert_eq!(state.side_to_move, Side::Second);
        assert_eq!(state.last_roll, Some(1));
        assert_eq!(state.last_move().map(|m| m.kind), Some(MoveKind::Step));
    }

    #[test]
    fn test_ladder_from_four() {
        let engine = MokshaPatam::default();
        let mut state = MokshaState::default();

        engine.apply_move(&mut state, &3);
        assert_eq!(state.position(Side::First), 14);
        assert_eq!(
            state.last_move().copied(),
            Some(MoveRecord { side: Side::First, roll: 3, from: 1, to: 14, kind: MoveKind::Ladder })
        );
    }

    #[test]
    fn test_snake_at_sixteen() {
        let engine = MokshaPatam::default();
        let mut state = at(12, 1);

        engine.apply_move(&mut state, &4);
        assert_eq!(state.position(Side::First), 6);
        assert_eq!(state.last_move().map(|m| m.kind), Some(MoveKind::Snake));
    }

    #[test]
    fn test_overshoot_forfeits_move() {
        let engine = MokshaPatam::default();
        let mut state = at(97, 1);

        assert_eq!(engine.apply_move(&mut state, &5), Outcome::Continues);
        assert_eq!(state.position(Side::First), 97);
        assert_eq!(state.side_to_move, Side::Second);
        assert_eq!(state.last_move().map(|m| m.kind), Some(MoveKind::Overshoot));
    }

    #[test]
    fn test_exact_hundred_wins() {
        let engine = MokshaPatam::default();
        let mut state = at(97, 1);

        assert_eq!(
            engine.apply_move(&mut state, &3),
            Outcome::GameOver(GameResult::Winner(Side::First))
        );
        assert_eq!(engine.winner(&state), Some(Side::First));
        assert!(engine.legal_moves(&state).is_empty());

        let frozen = state.clone();
        assert_eq!(engine.apply_move(&mut state, &1), Outcome::Invalid(Rejection::Finished));
        assert_eq!(state, frozen);
    }

    #[test]
    fn test_ladder_to_hundred_wins() {
        let engine = MokshaPatam::default();
        let mut state = at(78, 1);
        assert!(engine.apply_move(&mut state, &2).is_game_over());
        assert_eq!(state.position(Side::First), 100);
    }

    #[test]
    fn test_rejects_impossible_roll() {
        let engine = MokshaPatam::default();
        let mut state = MokshaState::default();
        assert_eq!(engine.apply_move(&mut state, &0), Outcome::Invalid(Rejection::IllegalMove));
        assert_eq!(engine.apply_move(&mut state, &7), Outcome::Invalid(Rejection::IllegalMove));
        assert_eq!(state, MokshaState::default());
    }

    #[test]
    fn test_roll_uses_rng_and_logs() {
        let engine = MokshaPatam::default();
        let mut state = MokshaState::default();
        let mut rng = GameRng::new(11);

        let mut applied = 0;
        for _ in 0..10 {
            if engine.roll(&mut state, &mut rng).is_applied() {
                applied += 1;
            }
        }
        assert_eq!(state.log.len(), applied);
        assert!(applied > 0);
        assert!(state.log.iter().all(|m| (1..=6).contains(&m.roll)));
    }

    #[test]
    fn test_computer_cannot_pick_its_roll() {
        use crate::policy::{GreedyCapture, MovePolicy};

        let engine = MokshaPatam::default();
        let state = MokshaState::default();
        // The 4 -> 14 ladder is one roll away and still ranks no higher
        let moves = engine.legal_moves(&state);
        assert!(moves.iter().all(|roll| engine.score_move(&state, roll) == 0));

        let mut faces = std::collections::BTreeSet::new();
        for seed in 0..50 {
            let mut rng = GameRng::new(seed);
            if let Some(roll) = GreedyCapture.choose_move(&engine, &state, &mut rng) {
                faces.insert(roll);
            }
        }
        assert!(faces.len() > 1);
        assert!(faces.iter().all(|roll| (1..=6).contains(roll)));
    }
}
