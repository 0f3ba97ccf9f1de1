//! Arena of live units with a stable, reproducible iteration order.
//!
//! The registry is an append-only slot arena: inserting a unit claims a
//! fresh slot, removing one clears its slot, and slots are never reused
//! within a match. Iteration visits live units **newest first** (reverse
//! insertion order). That order is load-bearing: the decision engine's
//! stopping condition and the nearest-hostile tie-break both depend on
//! newly inserted units being visited before pre-existing ones.
//!
//! The registry does not enforce position uniqueness; callers check
//! [`UnitRegistry::find`] before inserting.

use serde::{Deserialize, Serialize};

use crate::units::{Position, Unit};

/// Stable identifier of a registry slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotId(usize);

impl SlotId {
    /// Raw slot index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// The collection of live units.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitRegistry {
    slots: Vec<Option<Unit>>,
}

impl UnitRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a unit, returning its slot.
    ///
    /// The caller is responsible for having checked that the unit's cell
    /// is free.
    pub fn insert(&mut self, unit: Unit) -> SlotId {
        let id = SlotId(self.slots.len());
        self.slots.push(Some(unit));
        id
    }

    /// Remove the unit in `slot`, if any.
    pub fn remove(&mut self, slot: SlotId) -> Option<Unit> {
        self.slots.get_mut(slot.0).and_then(Option::take)
    }

    /// The unit in `slot`, if it is still alive.
    #[must_use]
    pub fn get(&self, slot: SlotId) -> Option<&Unit> {
        self.slots.get(slot.0).and_then(Option::as_ref)
    }

    /// Mutable access to the unit in `slot`.
    pub fn get_mut(&mut self, slot: SlotId) -> Option<&mut Unit> {
        self.slots.get_mut(slot.0).and_then(Option::as_mut)
    }

    /// The slot of the unit standing at `position`, if any.
    #[must_use]
    pub fn find(&self, position: Position) -> Option<SlotId> {
        self.iter()
            .find(|(_, unit)| unit.position == position)
            .map(|(slot, _)| slot)
    }

    /// Iterate live units newest-first.
    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &Unit)> {
        self.slots
            .iter()
            .enumerate()
            .rev()
            .filter_map(|(i, slot)| slot.as_ref().map(|unit| (SlotId(i), unit)))
    }

    /// Slot ids in newest-first visiting order, including cleared slots.
    ///
    /// Used by the decision engine, which mutates the registry while
    /// walking it and therefore cannot hold a borrowing iterator.
    #[must_use]
    pub fn scan_order(&self) -> Vec<SlotId> {
        (0..self.slots.len()).rev().map(SlotId).collect()
    }

    /// Number of live units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Whether no units are alive.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
