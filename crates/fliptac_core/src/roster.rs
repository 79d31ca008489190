//! Seating order, elimination flags and the turn cursor.

use super::Mark;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// One seat at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct PlayerSlot {
    mark: Mark,
    active: bool,
}

/// Ordered seats plus the cursor naming whose turn it is.
///
/// The cursor always rests on an active seat while two or more seats are
/// active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    slots: Vec<PlayerSlot>,
    cursor: usize,
    eliminated: Vec<Mark>,
}

impl Roster {
    /// Seats the first `count` marks, all active, cursor on the first.
    pub fn new(count: usize) -> Self {
        let slots = Mark::ALL
            .iter()
            .take(count)
            .map(|&mark| PlayerSlot { mark, active: true })
            .collect();
        Self {
            slots,
            cursor: 0,
            eliminated: Vec::new(),
        }
    }

    /// Number of seats, active or not.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if nobody is seated.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// All seats in turn order.
    pub fn slots(&self) -> &[PlayerSlot] {
        &self.slots
    }

    /// The mark under the cursor.
    pub fn current(&self) -> Mark {
        self.slots[self.cursor].mark
    }

    /// Index of the cursor.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Marks in the order they were eliminated.
    pub fn eliminated(&self) -> &[Mark] {
        &self.eliminated
    }

    /// Returns true if `mark` is seated and not eliminated.
    pub fn is_active(&self, mark: Mark) -> bool {
        self.slots.iter().any(|slot| slot.mark == mark && slot.active)
    }

    /// Returns true if `mark` has a seat.
    pub fn contains(&self, mark: Mark) -> bool {
        self.slots.iter().any(|slot| slot.mark == mark)
    }

    /// Active marks in turn order.
    pub fn active_marks(&self) -> Vec<Mark> {
        self.slots
            .iter()
            .filter(|slot| slot.active)
            .map(|slot| slot.mark)
            .collect()
    }

    /// Number of active seats.
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.active).count()
    }

    /// The sole active mark, once only one is left.
    pub fn sole_survivor(&self) -> Option<Mark> {
        match self.active_marks().as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    /// The next active mark after `mark` in turn order, wrapping.
    ///
    /// Returns `None` when no other seat is active.
    pub fn next_active_after(&self, mark: Mark) -> Option<Mark> {
        let start = self.slots.iter().position(|slot| slot.mark == mark)?;
        (1..self.slots.len())
            .map(|offset| self.slots[(start + offset) % self.slots.len()])
            .find(|slot| slot.active)
            .map(|slot| slot.mark)
    }

    /// Moves the cursor to the next active seat, wrapping.
    ///
    /// No-op when one or fewer seats are active.
    #[instrument(skip(self), fields(from = ?self.current()))]
    pub fn switch_player(&mut self) {
        if self.active_count() <= 1 {
            return;
        }
        let len = self.slots.len();
        let mut next = (self.cursor + 1) % len;
        while !self.slots[next].active {
            next = (next + 1) % len;
        }
        self.cursor = next;
        debug!(to = ?self.current(), "Cursor advanced");
    }

    /// Flags `mark` as eliminated. Returns false if it was already out.
    #[instrument(skip(self))]
    pub fn eliminate(&mut self, mark: Mark) -> bool {
        match self.slots.iter_mut().find(|slot| slot.mark == mark) {
            Some(slot) if slot.active => {
                slot.active = false;
                self.eliminated.push(mark);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_roster_seats_in_order() {
        let roster = Roster::new(3);
        assert_eq!(roster.active_marks(), vec![Mark::X, Mark::O, Mark::Delta]);
        assert_eq!(roster.current(), Mark::X);
    }

    #[test]
    fn test_switch_player_wraps_and_skips_eliminated() {
        let mut roster = Roster::new(4);
        roster.eliminate(Mark::O);
        roster.switch_player();
        assert_eq!(roster.current(), Mark::Delta);
        roster.switch_player();
        assert_eq!(roster.current(), Mark::Hash);
        roster.switch_player();
        assert_eq!(roster.current(), Mark::X);
    }

    #[test]
    fn test_switch_player_noop_with_one_active() {
        let mut roster = Roster::new(2);
        roster.eliminate(Mark::O);
        roster.switch_player();
        assert_eq!(roster.current(), Mark::X);
        assert_eq!(roster.sole_survivor(), Some(Mark::X));
    }

    #[test]
    fn test_next_active_after() {
        let mut roster = Roster::new(3);
        assert_eq!(roster.next_active_after(Mark::Delta), Some(Mark::X));
        roster.eliminate(Mark::O);
        assert_eq!(roster.next_active_after(Mark::X), Some(Mark::Delta));
        roster.eliminate(Mark::Delta);
        assert_eq!(roster.next_active_after(Mark::X), None);
    }

    #[test]
    fn test_eliminate_twice() {
        let mut roster = Roster::new(2);
        assert!(roster.eliminate(Mark::O));
        assert!(!roster.eliminate(Mark::O));
        assert_eq!(roster.eliminated(), &[Mark::O]);
    }
}
