use super::door::{DoorRule, PuzzleKind, PuzzleStatus};
use super::keypad::Keypad;
use super::levers::LeverBank;
use super::tables::TableBoard;

/// Everything the door depends on, gathered in one place.
///
/// Predicates are recomputed from the puzzle pieces on every query, so the answer
/// after any mutation is the same as evaluating a freshly built state.
#[derive(Debug, Clone)]
pub struct RoomState {
    pub levers: LeverBank,
    pub board: TableBoard,
    pub keypad: Keypad,
    rule: DoorRule,
    /// Puzzles wired to the door (deduplicated, in declaration order)
    enabled: Vec<PuzzleKind>,
}

impl RoomState {
    pub fn new(
        levers: LeverBank,
        board: TableBoard,
        keypad: Keypad,
        rule: DoorRule,
        enabled: &[PuzzleKind],
    ) -> Self {
        let mut unique = Vec::with_capacity(enabled.len());
        for &kind in enabled {
            if !unique.contains(&kind) {
                unique.push(kind);
            }
        }

        RoomState {
            levers,
            board,
            keypad,
            rule,
            enabled: unique,
        }
    }

    pub fn enabled(&self) -> &[PuzzleKind] {
        &self.enabled
    }

    pub fn is_enabled(&self, kind: PuzzleKind) -> bool {
        self.enabled.contains(&kind)
    }

    pub fn status(&self) -> PuzzleStatus {
        PuzzleStatus {
            levers: self.levers.is_solved(),
            tables: self.board.is_solved(),
            keypad: self.keypad.is_solved(),
        }
    }

    pub fn door_unlocked(&self) -> bool {
        self.rule.unlocks(&self.status(), &self.enabled)
    }

    /// Back to the state the room was built in
    pub fn reset(&mut self) {
        self.levers.reset();
        self.board.reset();
        self.keypad.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::tables::{BoxId, TableId};

    fn room(rule: DoorRule, enabled: &[PuzzleKind]) -> RoomState {
        RoomState::new(
            LeverBank::new([true, true, false]),
            TableBoard::new([[0, 1], [0, 2], [1, 2]]),
            Keypad::new([1, 9, 8, 4]),
            rule,
            enabled,
        )
    }

    fn solve_levers(state: &mut RoomState) {
        state.levers.toggle(0);
        state.levers.toggle(1);
    }

    fn solve_tables(state: &mut RoomState) {
        for (id, table) in [(0, 0), (2, 0), (1, 1), (4, 1), (3, 2), (5, 2)] {
            state.board.pick_up(BoxId(id));
            state.board.place(BoxId(id), TableId(table));
        }
    }

    fn solve_keypad(state: &mut RoomState) {
        for d in [1, 9, 8, 4] {
            state.keypad.press(d);
        }
    }

    #[test]
    fn test_all_rule_needs_everything_at_once() {
        let mut state = room(DoorRule::All, &PuzzleKind::ALL);
        solve_levers(&mut state);
        solve_tables(&mut state);
        assert!(!state.door_unlocked());

        solve_keypad(&mut state);
        assert!(state.door_unlocked());

        // Knock one lever out and the door closes again
        state.levers.toggle(2);
        assert!(!state.door_unlocked());
    }

    #[test]
    fn test_any_rule_relocks_when_nothing_solved() {
        let mut state = room(DoorRule::Any, &[PuzzleKind::Levers, PuzzleKind::Tables]);
        solve_levers(&mut state);
        assert!(state.door_unlocked());

        state.levers.toggle(0);
        assert!(!state.door_unlocked());
    }

    #[test]
    fn test_status_matches_fresh_evaluation() {
        let mut state = room(DoorRule::All, &PuzzleKind::ALL);
        solve_tables(&mut state);
        let first = state.status();
        let second = state.status();
        assert_eq!(first, second);
        assert_eq!(
            first,
            PuzzleStatus {
                levers: false,
                tables: true,
                keypad: false
            }
        );
    }

    #[test]
    fn test_enabled_is_deduplicated() {
        let state = room(
            DoorRule::All,
            &[PuzzleKind::Keypad, PuzzleKind::Keypad, PuzzleKind::Levers],
        );
        assert_eq!(state.enabled(), &[PuzzleKind::Keypad, PuzzleKind::Levers]);
        assert!(!state.is_enabled(PuzzleKind::Tables));
    }

    #[test]
    fn test_reset() {
        let mut state = room(DoorRule::All, &PuzzleKind::ALL);
        solve_levers(&mut state);
        solve_tables(&mut state);
        solve_keypad(&mut state);
        state.reset();

        assert_eq!(state.status(), PuzzleStatus::default());
        assert!(!state.door_unlocked());
    }
}
