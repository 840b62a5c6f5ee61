use std::fmt;

/// Number of levers mounted on the right wall
pub const LEVER_COUNT: usize = 3;

/// The lever bank puzzle: three up/down switches compared against a target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeverBank {
    /// Current positions (true = up)
    states: [bool; LEVER_COUNT],
    /// Positions that solve the puzzle (never changes during play)
    solution: [bool; LEVER_COUNT],
}

impl LeverBank {
    /// All levers start down
    pub fn new(solution: [bool; LEVER_COUNT]) -> Self {
        LeverBank {
            states: [false; LEVER_COUNT],
            solution,
        }
    }

    /// Flip a lever, returning its new position.
    /// Out-of-range indices are ignored.
    pub fn toggle(&mut self, index: usize) -> Option<bool> {
        let state = self.states.get_mut(index)?;
        *state = !*state;
        Some(*state)
    }

    /// Position of a single lever
    pub fn state(&self, index: usize) -> Option<bool> {
        self.states.get(index).copied()
    }

    pub fn states(&self) -> &[bool; LEVER_COUNT] {
        &self.states
    }

    /// Solved when every lever matches the target
    pub fn is_solved(&self) -> bool {
        self.states == self.solution
    }

    /// Put every lever back down
    pub fn reset(&mut self) {
        self.states = [false; LEVER_COUNT];
    }
}

impl fmt::Display for LeverBank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &up) in self.states.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", if up { "up" } else { "down" })?;
        }
        Ok(())
    }
}
