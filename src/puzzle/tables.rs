use std::fmt;

pub const TABLE_COUNT: usize = 3;
pub const BOX_COUNT: usize = 6;
/// Boxes a single table can hold
pub const TABLE_CAPACITY: usize = 2;
/// Distinct box colours (each shared by two boxes)
pub const COLOR_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoxId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TableId(pub usize);

/// Colour index of a box (0..COLOR_COUNT)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColorTag(pub usize);

impl BoxId {
    pub fn index(self) -> usize {
        self.0
    }

    /// Boxes 2k and 2k+1 share colour k
    pub fn color(self) -> ColorTag {
        ColorTag(self.0 / 2)
    }

    pub fn all() -> impl Iterator<Item = BoxId> {
        (0..BOX_COUNT).map(BoxId)
    }
}

impl TableId {
    pub fn index(self) -> usize {
        self.0
    }

    pub fn all() -> impl Iterator<Item = TableId> {
        (0..TABLE_COUNT).map(TableId)
    }
}

impl fmt::Display for BoxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a box currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxPlacement {
    /// Resting at its starting spot on the floor
    Origin,
    /// In the player's hand
    Held,
    /// On a table, in one of its slots
    OnTable { table: TableId, slot: usize },
}

/// Result of putting a box on a table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Placed { slot: usize },
    /// Table already full; the box went back to its origin
    Rejected,
}

/// Result of lifting a box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickUp {
    /// Table the box was removed from, if any
    pub from_table: Option<TableId>,
}

/// The box-matching puzzle: six coloured boxes, three tables with a required colour pair each
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableBoard {
    placements: [BoxPlacement; BOX_COUNT],
    slots: [[Option<BoxId>; TABLE_CAPACITY]; TABLE_COUNT],
    /// Colour pair each table needs (never changes during play)
    required: [[ColorTag; TABLE_CAPACITY]; TABLE_COUNT],
}

impl TableBoard {
    pub fn new(required: [[usize; TABLE_CAPACITY]; TABLE_COUNT]) -> Self {
        TableBoard {
            placements: [BoxPlacement::Origin; BOX_COUNT],
            slots: [[None; TABLE_CAPACITY]; TABLE_COUNT],
            required: required.map(|pair| pair.map(ColorTag)),
        }
    }

    pub fn placement(&self, id: BoxId) -> Option<BoxPlacement> {
        self.placements.get(id.index()).copied()
    }

    pub fn required(&self, table: TableId) -> Option<[ColorTag; TABLE_CAPACITY]> {
        self.required.get(table.index()).copied()
    }

    /// Boxes currently resting on a table, in slot order
    pub fn boxes_on(&self, table: TableId) -> Vec<BoxId> {
        self.slots
            .get(table.index())
            .map(|slots| slots.iter().flatten().copied().collect())
            .unwrap_or_default()
    }

    /// Lift a box. It leaves its table before anything else looks at the board.
    pub fn pick_up(&mut self, id: BoxId) -> Option<PickUp> {
        self.placements.get(id.index())?;
        let from_table = self.detach(id);
        self.placements[id.index()] = BoxPlacement::Held;
        Some(PickUp { from_table })
    }

    /// Put a box on a table. A full table rejects it and sends it home.
    pub fn place(&mut self, id: BoxId, table: TableId) -> Option<Placement> {
        self.placements.get(id.index())?;
        self.slots.get(table.index())?;

        self.detach(id);

        let free = self.slots[table.index()]
            .iter()
            .position(|slot| slot.is_none());

        match free {
            Some(slot) => {
                self.slots[table.index()][slot] = Some(id);
                self.placements[id.index()] = BoxPlacement::OnTable { table, slot };
                Some(Placement::Placed { slot })
            }
            None => {
                self.placements[id.index()] = BoxPlacement::Origin;
                Some(Placement::Rejected)
            }
        }
    }

    /// Send a box back to its starting spot
    pub fn return_to_origin(&mut self, id: BoxId) -> Option<()> {
        self.placements.get(id.index())?;
        self.detach(id);
        self.placements[id.index()] = BoxPlacement::Origin;
        Some(())
    }

    /// A table is solved when it holds exactly its required colour pair, in any order
    pub fn table_solved(&self, table: TableId) -> bool {
        let Some(required) = self.required(table) else {
            return false;
        };

        let on_table = self.boxes_on(table);
        if on_table.len() != TABLE_CAPACITY {
            return false;
        }

        let mut colors: Vec<ColorTag> = on_table.iter().map(|b| b.color()).collect();
        colors.sort_unstable();
        let mut need = required.to_vec();
        need.sort_unstable();

        colors == need
    }

    /// Every table solved
    pub fn is_solved(&self) -> bool {
        TableId::all().all(|table| self.table_solved(table))
    }

    pub fn reset(&mut self) {
        self.placements = [BoxPlacement::Origin; BOX_COUNT];
        self.slots = [[None; TABLE_CAPACITY]; TABLE_COUNT];
    }

    /// Clear whatever table slot the box occupies
    fn detach(&mut self, id: BoxId) -> Option<TableId> {
        match self.placements[id.index()] {
            BoxPlacement::OnTable { table, slot } => {
                self.slots[table.index()][slot] = None;
                Some(table)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAIRS: [[usize; 2]; 3] = [[0, 1], [0, 2], [1, 2]];

    fn board() -> TableBoard {
        TableBoard::new(PAIRS)
    }

    /// Place a box straight from the floor, the way a drag-and-drop does
    fn drag(board: &mut TableBoard, id: usize, table: usize) -> Placement {
        board.pick_up(BoxId(id)).unwrap();
        board.place(BoxId(id), TableId(table)).unwrap()
    }

    #[test]
    fn test_box_colors_are_shared_in_pairs() {
        let colors: Vec<usize> = BoxId::all().map(|b| b.color().0).collect();
        assert_eq!(colors, vec![0, 0, 1, 1, 2, 2]);
    }

    #[test]
    fn test_each_table_accepts_its_pair_in_either_order() {
        // table 0 needs {0,1}: boxes 0 (colour 0) and 2 (colour 1)
        let mut b = board();
        drag(&mut b, 0, 0);
        drag(&mut b, 2, 0);
        assert!(b.table_solved(TableId(0)));

        let mut b = board();
        drag(&mut b, 2, 0);
        drag(&mut b, 0, 0);
        assert!(b.table_solved(TableId(0)));

        // table 1 needs {0,2}
        let mut b = board();
        drag(&mut b, 5, 1);
        drag(&mut b, 1, 1);
        assert!(b.table_solved(TableId(1)));

        // table 2 needs {1,2}
        let mut b = board();
        drag(&mut b, 3, 2);
        drag(&mut b, 4, 2);
        assert!(b.table_solved(TableId(2)));
    }

    #[test]
    fn test_wrong_pair_is_unsolved() {
        let mut b = board();
        // two colour-0 boxes on table 0
        drag(&mut b, 0, 0);
        drag(&mut b, 1, 0);
        assert!(!b.table_solved(TableId(0)));

        // {1,2} on table 0
        let mut b = board();
        drag(&mut b, 2, 0);
        drag(&mut b, 4, 0);
        assert!(!b.table_solved(TableId(0)));

        // table 1 needs {0,2}: {1,2} and {0,1} both fail
        let mut b = board();
        drag(&mut b, 2, 1);
        drag(&mut b, 4, 1);
        assert!(!b.table_solved(TableId(1)));

        let mut b = board();
        drag(&mut b, 0, 1);
        drag(&mut b, 3, 1);
        assert!(!b.table_solved(TableId(1)));

        // table 2 needs {1,2}: {0,0} and {2,2} both fail
        let mut b = board();
        drag(&mut b, 0, 2);
        drag(&mut b, 1, 2);
        assert!(!b.table_solved(TableId(2)));

        let mut b = board();
        drag(&mut b, 4, 2);
        drag(&mut b, 5, 2);
        assert!(!b.table_solved(TableId(2)));
    }

    #[test]
    fn test_fewer_than_two_boxes_is_unsolved() {
        let mut b = board();
        assert!(!b.table_solved(TableId(0)));
        drag(&mut b, 0, 0);
        assert!(!b.table_solved(TableId(0)));
    }

    #[test]
    fn test_full_table_rejects_and_returns_to_origin() {
        let mut b = board();
        drag(&mut b, 0, 0);
        drag(&mut b, 2, 0);

        assert_eq!(drag(&mut b, 4, 0), Placement::Rejected);
        assert_eq!(b.placement(BoxId(4)), Some(BoxPlacement::Origin));
        assert_eq!(b.boxes_on(TableId(0)), vec![BoxId(0), BoxId(2)]);
        assert!(b.table_solved(TableId(0)));
    }

    #[test]
    fn test_pick_up_removes_from_table_first() {
        let mut b = board();
        drag(&mut b, 0, 0);
        drag(&mut b, 2, 0);
        assert!(b.table_solved(TableId(0)));

        let lifted = b.pick_up(BoxId(0)).unwrap();
        assert_eq!(lifted.from_table, Some(TableId(0)));
        assert_eq!(b.placement(BoxId(0)), Some(BoxPlacement::Held));
        assert_eq!(b.boxes_on(TableId(0)), vec![BoxId(2)]);
        assert!(!b.table_solved(TableId(0)));
    }

    #[test]
    fn test_freed_slot_is_reused() {
        let mut b = board();
        drag(&mut b, 0, 0);
        drag(&mut b, 2, 0);
        b.pick_up(BoxId(0));

        assert_eq!(drag(&mut b, 1, 0), Placement::Placed { slot: 0 });
        assert_eq!(
            b.placement(BoxId(1)),
            Some(BoxPlacement::OnTable {
                table: TableId(0),
                slot: 0
            })
        );
    }

    #[test]
    fn test_full_solution() {
        let mut b = board();
        drag(&mut b, 0, 0);
        drag(&mut b, 2, 0);
        drag(&mut b, 1, 1);
        drag(&mut b, 4, 1);
        drag(&mut b, 3, 2);
        assert!(!b.is_solved());

        drag(&mut b, 5, 2);
        assert!(b.is_solved());
    }

    #[test]
    fn test_out_of_range_is_ignored() {
        let mut b = board();
        assert_eq!(b.pick_up(BoxId(6)), None);
        assert_eq!(b.place(BoxId(0), TableId(3)), None);
        assert_eq!(b.return_to_origin(BoxId(9)), None);
        assert!(!b.table_solved(TableId(5)));
        assert!(b.boxes_on(TableId(5)).is_empty());
        assert_eq!(b.placement(BoxId(0)), Some(BoxPlacement::Origin));
    }

    #[test]
    fn test_reset() {
        let mut b = board();
        drag(&mut b, 0, 0);
        b.pick_up(BoxId(3));
        b.reset();

        assert_eq!(b, board());
    }
}
