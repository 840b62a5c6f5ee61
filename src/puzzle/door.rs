use serde::Deserialize;
use std::fmt;

/// The three puzzles that can gate the door
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PuzzleKind {
    Levers,
    Tables,
    Keypad,
}

impl PuzzleKind {
    pub const ALL: [PuzzleKind; 3] = [PuzzleKind::Levers, PuzzleKind::Tables, PuzzleKind::Keypad];
}

impl fmt::Display for PuzzleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PuzzleKind::Levers => write!(f, "Levers"),
            PuzzleKind::Tables => write!(f, "Tables"),
            PuzzleKind::Keypad => write!(f, "Keypad"),
        }
    }
}

/// Snapshot of every puzzle predicate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PuzzleStatus {
    pub levers: bool,
    pub tables: bool,
    pub keypad: bool,
}

impl PuzzleStatus {
    pub fn get(&self, kind: PuzzleKind) -> bool {
        match kind {
            PuzzleKind::Levers => self.levers,
            PuzzleKind::Tables => self.tables,
            PuzzleKind::Keypad => self.keypad,
        }
    }
}

/// How the enabled puzzles combine into the door state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoorRule {
    /// Every enabled puzzle must be solved at once
    #[default]
    All,
    /// Any one enabled puzzle opens the door; it relocks when none is solved
    Any,
}

impl DoorRule {
    /// Combine the enabled puzzles' predicates. Nothing enabled means the door stays shut.
    pub fn unlocks(self, status: &PuzzleStatus, enabled: &[PuzzleKind]) -> bool {
        if enabled.is_empty() {
            return false;
        }
        let mut solved = enabled.iter().map(|&kind| status.get(kind));
        match self {
            DoorRule::All => solved.all(|s| s),
            DoorRule::Any => solved.any(|s| s),
        }
    }
}
