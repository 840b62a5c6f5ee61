// game/session.rs

use crate::puzzle::*;
use bevy::prelude::Resource;

/// A single thing the player did to the room
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomAction {
    ToggleLever(usize),
    /// Lift a box (from the floor or a table)
    PickUp(BoxId),
    /// Put the held box on a table
    Place(TableId),
    /// Let go of the held box away from any table
    Drop,
    PressKey(u8),
}

/// What an action did to the puzzles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionResult {
    LeverToggled {
        index: usize,
        up: bool,
    },
    PickedUp {
        id: BoxId,
        from_table: Option<TableId>,
        /// Box that was already in hand and went back to its origin
        returned: Option<BoxId>,
    },
    Placed {
        id: BoxId,
        table: TableId,
        slot: usize,
    },
    /// Table was full; the box went back to its origin
    Rejected {
        id: BoxId,
        table: TableId,
    },
    Dropped(BoxId),
    Key(KeyPress),
    /// Out-of-range index or nothing in hand
    Ignored,
}

/// Door transition caused by an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorChange {
    Unlocked,
    Locked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionOutcome {
    pub result: ActionResult,
    pub door: Option<DoorChange>,
}

/// One play-through of the room
#[derive(Debug, Clone, Resource)]
pub struct RoomSession {
    /// The puzzle pieces
    state: RoomState,
    /// Door state as last shown to the player
    door_locked: bool,
    /// Box currently in hand
    held: Option<BoxId>,
}

impl RoomSession {
    pub fn new(state: RoomState) -> Self {
        let door_locked = !state.door_unlocked();
        RoomSession {
            state,
            door_locked,
            held: None,
        }
    }

    // === Query Methods (for Bevy systems to read state) ===

    pub fn state(&self) -> &RoomState {
        &self.state
    }

    pub fn status(&self) -> PuzzleStatus {
        self.state.status()
    }

    pub fn is_door_locked(&self) -> bool {
        self.door_locked
    }

    pub fn held_box(&self) -> Option<BoxId> {
        self.held
    }

    pub fn lever_up(&self, index: usize) -> bool {
        self.state.levers.state(index).unwrap_or(false)
    }

    pub fn box_placement(&self, id: BoxId) -> Option<BoxPlacement> {
        self.state.board.placement(id)
    }

    pub fn keypad_entered(&self) -> &[u8] {
        self.state.keypad.entered()
    }

    pub fn keypad_solved(&self) -> bool {
        self.state.keypad.is_solved()
    }

    /// Solved puzzles among the ones wired to the door
    pub fn progress(&self) -> ProgressInfo {
        let status = self.state.status();
        let enabled = self.state.enabled();
        ProgressInfo {
            solved: enabled.iter().filter(|&&kind| status.get(kind)).count(),
            total: enabled.len(),
        }
    }

    // === Mutation Methods (for handling user input) ===

    /// Apply an action, then re-evaluate the door from scratch
    pub fn apply(&mut self, action: RoomAction) -> ActionOutcome {
        let result = match action {
            RoomAction::ToggleLever(index) => match self.state.levers.toggle(index) {
                Some(up) => {
                    log::info!("Lever {} is now {}", index, if up { "up" } else { "down" });
                    ActionResult::LeverToggled { index, up }
                }
                None => ActionResult::Ignored,
            },
            RoomAction::PickUp(id) => self.pick_up(id),
            RoomAction::Place(table) => self.place_held(table),
            RoomAction::Drop => match self.held.take() {
                Some(id) => {
                    self.state.board.return_to_origin(id);
                    ActionResult::Dropped(id)
                }
                None => ActionResult::Ignored,
            },
            RoomAction::PressKey(digit) => {
                let press = self.state.keypad.press(digit);
                match press {
                    KeyPress::Accepted => log::info!("Keypad accepted the code"),
                    KeyPress::Rejected => log::info!("Keypad rejected the code"),
                    _ => {}
                }
                ActionResult::Key(press)
            }
        };

        ActionOutcome {
            result,
            door: self.update_door_lock_state(),
        }
    }

    /// Start the room over
    pub fn reset(&mut self) {
        self.state.reset();
        self.held = None;
        self.door_locked = !self.state.door_unlocked();
    }

    fn pick_up(&mut self, id: BoxId) -> ActionResult {
        if self.state.board.placement(id).is_none() || self.held == Some(id) {
            return ActionResult::Ignored;
        }

        // Only one box in hand at a time
        let returned = self.held.take();
        if let Some(previous) = returned {
            self.state.board.return_to_origin(previous);
        }

        match self.state.board.pick_up(id) {
            Some(PickUp { from_table }) => {
                self.held = Some(id);
                ActionResult::PickedUp {
                    id,
                    from_table,
                    returned,
                }
            }
            None => ActionResult::Ignored,
        }
    }

    fn place_held(&mut self, table: TableId) -> ActionResult {
        let Some(id) = self.held else {
            return ActionResult::Ignored;
        };

        match self.state.board.place(id, table) {
            Some(Placement::Placed { slot }) => {
                self.held = None;
                ActionResult::Placed { id, table, slot }
            }
            Some(Placement::Rejected) => {
                self.held = None;
                log::info!("Table {} is full, box {} goes back", table, id);
                ActionResult::Rejected { id, table }
            }
            // Unknown table: treat as a miss and send the box home
            None => {
                self.held = None;
                self.state.board.return_to_origin(id);
                ActionResult::Dropped(id)
            }
        }
    }

    fn update_door_lock_state(&mut self) -> Option<DoorChange> {
        let unlocked = self.state.door_unlocked();
        if unlocked == !self.door_locked {
            return None;
        }

        self.door_locked = !unlocked;
        if unlocked {
            log::info!("Door unlocked");
            Some(DoorChange::Unlocked)
        } else {
            log::info!("Door locked");
            Some(DoorChange::Locked)
        }
    }
}

/// Progress information for UI display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressInfo {
    pub solved: usize,
    pub total: usize,
}

impl ProgressInfo {
    /// Format as a string like "1/3 puzzles"
    pub fn display_string(&self) -> String {
        format!("{}/{} puzzles", self.solved, self.total)
    }

    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.solved >= self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(rule: DoorRule, enabled: &[PuzzleKind]) -> RoomSession {
        let state = RoomState::new(
            LeverBank::new([true, true, false]),
            TableBoard::new([[0, 1], [0, 2], [1, 2]]),
            Keypad::new([1, 9, 8, 4]),
            rule,
            enabled,
        );
        RoomSession::new(state)
    }

    fn drag(session: &mut RoomSession, id: usize, table: usize) -> ActionOutcome {
        session.apply(RoomAction::PickUp(BoxId(id)));
        session.apply(RoomAction::Place(TableId(table)))
    }

    #[test]
    fn test_lever_solution_unlocks_single_puzzle_room() {
        let mut session = session(DoorRule::All, &[PuzzleKind::Levers]);
        assert!(session.is_door_locked());

        let first = session.apply(RoomAction::ToggleLever(0));
        assert_eq!(first.door, None);

        let second = session.apply(RoomAction::ToggleLever(1));
        assert_eq!(
            second.result,
            ActionResult::LeverToggled { index: 1, up: true }
        );
        assert_eq!(second.door, Some(DoorChange::Unlocked));
        assert!(!session.is_door_locked());

        let third = session.apply(RoomAction::ToggleLever(2));
        assert_eq!(third.door, Some(DoorChange::Locked));
    }

    #[test]
    fn test_any_rule_with_tables() {
        let mut session = session(DoorRule::Any, &[PuzzleKind::Levers, PuzzleKind::Tables]);
        drag(&mut session, 0, 0);
        drag(&mut session, 2, 0);
        drag(&mut session, 1, 1);
        drag(&mut session, 4, 1);
        drag(&mut session, 3, 2);
        let last = drag(&mut session, 5, 2);
        assert_eq!(last.door, Some(DoorChange::Unlocked));

        // Lifting a box breaks its table before the door is checked
        let lift = session.apply(RoomAction::PickUp(BoxId(5)));
        assert_eq!(
            lift.result,
            ActionResult::PickedUp {
                id: BoxId(5),
                from_table: Some(TableId(2)),
                returned: None
            }
        );
        assert_eq!(lift.door, Some(DoorChange::Locked));
    }

    #[test]
    fn test_all_three_puzzles() {
        let mut session = session(DoorRule::All, &PuzzleKind::ALL);
        session.apply(RoomAction::ToggleLever(0));
        session.apply(RoomAction::ToggleLever(1));
        for (id, table) in [(0, 0), (2, 0), (1, 1), (4, 1), (3, 2), (5, 2)] {
            drag(&mut session, id, table);
        }
        assert!(session.is_door_locked());
        assert_eq!(session.progress().display_string(), "2/3 puzzles");

        let mut last = None;
        for d in [1, 9, 8, 4] {
            last = Some(session.apply(RoomAction::PressKey(d)));
        }
        let last = last.unwrap();
        assert_eq!(last.result, ActionResult::Key(KeyPress::Accepted));
        assert_eq!(last.door, Some(DoorChange::Unlocked));
        assert!(session.progress().is_complete());
    }

    #[test]
    fn test_full_table_rejects_held_box() {
        let mut session = session(DoorRule::All, &PuzzleKind::ALL);
        drag(&mut session, 0, 0);
        drag(&mut session, 2, 0);

        let outcome = drag(&mut session, 4, 0);
        assert_eq!(
            outcome.result,
            ActionResult::Rejected {
                id: BoxId(4),
                table: TableId(0)
            }
        );
        assert_eq!(session.held_box(), None);
        assert_eq!(session.box_placement(BoxId(4)), Some(BoxPlacement::Origin));
    }

    #[test]
    fn test_drop_returns_box_home() {
        let mut session = session(DoorRule::All, &PuzzleKind::ALL);
        drag(&mut session, 0, 0);

        session.apply(RoomAction::PickUp(BoxId(0)));
        let outcome = session.apply(RoomAction::Drop);
        assert_eq!(outcome.result, ActionResult::Dropped(BoxId(0)));
        assert_eq!(session.box_placement(BoxId(0)), Some(BoxPlacement::Origin));
        assert!(session.state().board.boxes_on(TableId(0)).is_empty());

        // Nothing in hand
        assert_eq!(session.apply(RoomAction::Drop).result, ActionResult::Ignored);
        assert_eq!(
            session.apply(RoomAction::Place(TableId(1))).result,
            ActionResult::Ignored
        );
    }

    #[test]
    fn test_picking_second_box_returns_first() {
        let mut session = session(DoorRule::All, &PuzzleKind::ALL);
        session.apply(RoomAction::PickUp(BoxId(0)));
        let outcome = session.apply(RoomAction::PickUp(BoxId(3)));

        assert_eq!(
            outcome.result,
            ActionResult::PickedUp {
                id: BoxId(3),
                from_table: None,
                returned: Some(BoxId(0))
            }
        );
        assert_eq!(session.held_box(), Some(BoxId(3)));
        assert_eq!(session.box_placement(BoxId(0)), Some(BoxPlacement::Origin));
    }

    #[test]
    fn test_out_of_range_actions_are_ignored() {
        let mut session = session(DoorRule::All, &PuzzleKind::ALL);
        assert_eq!(
            session.apply(RoomAction::ToggleLever(5)).result,
            ActionResult::Ignored
        );
        assert_eq!(
            session.apply(RoomAction::PickUp(BoxId(12))).result,
            ActionResult::Ignored
        );
        assert_eq!(
            session.apply(RoomAction::PressKey(42)).result,
            ActionResult::Key(KeyPress::NotADigit)
        );
    }

    #[test]
    fn test_reset() {
        let mut session = session(DoorRule::Any, &[PuzzleKind::Levers]);
        session.apply(RoomAction::ToggleLever(0));
        session.apply(RoomAction::ToggleLever(1));
        session.apply(RoomAction::PickUp(BoxId(1)));
        assert!(!session.is_door_locked());

        session.reset();
        assert!(session.is_door_locked());
        assert_eq!(session.held_box(), None);
        assert_eq!(session.progress().solved, 0);
    }
}
