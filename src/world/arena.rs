use std::fmt;

use crate::error::{PhysicsError, Result};
use crate::objects::Polygon;

/// Identifies a polygon inside a [`World`](super::World).
///
/// Handles start at 1, increase by one per created polygon and are never
/// reissued, even after the polygon they name is destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct PolygonHandle(u32);

impl PolygonHandle {
    /// Wraps a raw id, e.g. one received over the C interface. The handle is
    /// not checked against any world.
    pub const fn from_raw(id: u32) -> Self {
        Self(id)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for PolygonHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A storage slot. The generation is bumped each time the slot is vacated.
#[derive(Debug, Clone, Default)]
struct Slot {
    generation: u32,
    polygon: Option<Polygon>,
}

/// Where the polygon behind a handle lives.
#[derive(Debug, Clone, Copy)]
struct Entry {
    handle: PolygonHandle,
    slot: usize,
    generation: u32,
}

/// Polygon storage with slot reuse behind never-reused handles.
///
/// Vacated slots go on a free list and are filled by later insertions. Live
/// handles are kept in `entries`, sorted by handle; each entry remembers the
/// slot generation it was issued for, so a stale handle can never reach the
/// polygon that took its slot over.
#[derive(Debug, Clone)]
pub(crate) struct PolygonArena {
    slots: Vec<Slot>,
    free: Vec<usize>,
    entries: Vec<Entry>,
    next_id: u32,
}

impl Default for PolygonArena {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            entries: Vec::new(),
            next_id: 1,
        }
    }
}

impl PolygonArena {
    pub fn insert(&mut self, polygon: Polygon) -> Result<PolygonHandle> {
        let id = self.next_id;
        let next_id = id
            .checked_add(1)
            .ok_or(PhysicsError::InvalidArgument("polygon handles exhausted"))?;

        let slot = match self.free.pop() {
            Some(slot) => slot,
            None => {
                self.slots.push(Slot::default());
                self.slots.len() - 1
            }
        };
        let generation = self.slots[slot].generation;
        self.slots[slot].polygon = Some(polygon);

        let handle = PolygonHandle(id);
        // Ids only grow, so pushing keeps `entries` sorted.
        self.entries.push(Entry {
            handle,
            slot,
            generation,
        });
        self.next_id = next_id;
        Ok(handle)
    }

    pub fn remove(&mut self, handle: PolygonHandle) -> Result<Polygon> {
        let index = self
            .entry_index(handle)
            .ok_or(PhysicsError::InvalidHandle(handle))?;
        let entry = self.entries.remove(index);

        let slot = &mut self.slots[entry.slot];
        let polygon = slot
            .polygon
            .take()
            .ok_or(PhysicsError::InvalidHandle(handle))?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(entry.slot);
        Ok(polygon)
    }

    pub fn get(&self, handle: PolygonHandle) -> Option<&Polygon> {
        let slot = self.slot_of(handle)?;
        self.slots[slot].polygon.as_ref()
    }

    pub fn get_mut(&mut self, handle: PolygonHandle) -> Option<&mut Polygon> {
        let slot = self.slot_of(handle)?;
        self.slots[slot].polygon.as_mut()
    }

    /// Mutable access to two distinct live polygons at once.
    pub fn get_pair_mut(
        &mut self,
        a: PolygonHandle,
        b: PolygonHandle,
    ) -> Option<(&mut Polygon, &mut Polygon)> {
        let (slot_a, slot_b) = (self.slot_of(a)?, self.slot_of(b)?);
        if slot_a == slot_b {
            return None;
        }

        // Split so that each half holds one of the two slots.
        let (first, second) = if slot_a < slot_b {
            let (low, high) = self.slots.split_at_mut(slot_b);
            (&mut low[slot_a], &mut high[0])
        } else {
            let (low, high) = self.slots.split_at_mut(slot_a);
            (&mut high[0], &mut low[slot_b])
        };
        Some((first.polygon.as_mut()?, second.polygon.as_mut()?))
    }

    /// Live polygons in ascending handle order.
    pub fn iter(&self) -> impl Iterator<Item = (PolygonHandle, &Polygon)> + '_ {
        self.entries.iter().filter_map(|entry| {
            self.slots[entry.slot]
                .polygon
                .as_ref()
                .map(|polygon| (entry.handle, polygon))
        })
    }

    /// Live polygons in slot order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Polygon> + '_ {
        self.slots.iter_mut().filter_map(|slot| slot.polygon.as_mut())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Slots allocated so far, live or free.
    #[cfg(test)]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    fn entry_index(&self, handle: PolygonHandle) -> Option<usize> {
        self.entries
            .binary_search_by_key(&handle, |entry| entry.handle)
            .ok()
    }

    fn slot_of(&self, handle: PolygonHandle) -> Option<usize> {
        let entry = self.entries[self.entry_index(handle)?];
        (self.slots[entry.slot].generation == entry.generation).then_some(entry.slot)
    }
}
