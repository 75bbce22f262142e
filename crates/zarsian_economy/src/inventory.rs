//! # Inventory System
//!
//! Slotted, stack-limited storage. Each slot holds one item type with a
//! count in `(0, stack_size]`; the slot list never exceeds `max_slots` and
//! empty slots are pruned as soon as a removal drains them.
//!
//! Failure semantics are deliberate and low-level: `add` and `remove`
//! report success as a `bool` and never roll back on their own. `add` in
//! particular leaves the inventory *partially filled* when it runs out of
//! slots mid-way - best-effort semantics inherited from the game design.
//! Transactional callers ([`crate::crafting`], [`crate::upgrade`]) wrap
//! these calls in [`Inventory::snapshot`]/[`Inventory::restore`] so the
//! partial state is never observable through them.

/// A single storage slot: one item type plus a count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slot {
    /// The stored item's ID.
    pub item: String,
    /// Units in this slot; always in `(0, stack_size]`.
    pub count: u32,
}

/// Slotted inventory with a fixed slot budget and per-slot stack capacity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Inventory {
    slots: Vec<Slot>,
    max_slots: usize,
    stack_size: u32,
}

/// Snapshot of the slot state, used for transactional rollback.
#[derive(Clone, Debug)]
pub struct InventorySnapshot {
    slots: Vec<Slot>,
}

impl Inventory {
    /// Slot count of the colony-issue backpack.
    pub const STANDARD_SLOTS: usize = 16;
    /// Per-slot stack capacity of the colony-issue backpack.
    pub const STANDARD_STACK: u32 = 32;

    /// Creates an empty inventory with the given dimensions.
    #[must_use]
    pub fn new(max_slots: usize, stack_size: u32) -> Self {
        Self {
            slots: Vec::with_capacity(max_slots),
            max_slots,
            stack_size,
        }
    }

    /// Creates the standard 16-slot, 32-per-stack inventory.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(Self::STANDARD_SLOTS, Self::STANDARD_STACK)
    }

    /// The slot budget.
    #[inline]
    #[must_use]
    pub const fn max_slots(&self) -> usize {
        self.max_slots
    }

    /// Per-slot stack capacity.
    #[inline]
    #[must_use]
    pub const fn stack_size(&self) -> u32 {
        self.stack_size
    }

    /// Read-only view of the occupied slots, in slot order.
    #[must_use]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Number of occupied slots.
    #[inline]
    #[must_use]
    pub fn used_slots(&self) -> usize {
        self.slots.len()
    }

    /// Whether nothing is stored.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Adds `quantity` units of `item`.
    ///
    /// Existing stacks of the same item are topped up first, in slot
    /// order; any remainder opens new slots while the slot budget allows.
    /// Returns `false` when slots run out before everything is placed -
    /// in that case the units that did fit *stay placed*. Callers that
    /// need atomicity must snapshot first.
    pub fn add(&mut self, item: &str, quantity: u32) -> bool {
        let mut remaining = quantity;

        for slot in &mut self.slots {
            if remaining == 0 {
                break;
            }
            if slot.item == item && slot.count < self.stack_size {
                let take = (self.stack_size - slot.count).min(remaining);
                slot.count += take;
                remaining -= take;
            }
        }

        while remaining > 0 {
            if self.slots.len() >= self.max_slots {
                tracing::debug!(item, remaining, "inventory add ran out of slots");
                return false;
            }
            let take = remaining.min(self.stack_size);
            self.slots.push(Slot {
                item: item.to_string(),
                count: take,
            });
            remaining -= take;
        }

        true
    }

    /// Removes up to `quantity` units of `item`, in slot order.
    ///
    /// Removal is best-effort: when less than `quantity` is stored,
    /// everything available is removed and `false` is returned. Drained
    /// slots are pruned before returning.
    pub fn remove(&mut self, item: &str, quantity: u32) -> bool {
        let mut removed = 0;

        for slot in &mut self.slots {
            if slot.item == item {
                let take = slot.count.min(quantity - removed);
                slot.count -= take;
                removed += take;
            }
            if removed == quantity {
                break;
            }
        }
        self.slots.retain(|slot| slot.count > 0);

        if removed < quantity {
            tracing::debug!(item, quantity, removed, "inventory remove fell short");
            return false;
        }
        true
    }

    /// Total units of `item` across all slots.
    #[must_use]
    pub fn total_of(&self, item: &str) -> u32 {
        self.slots
            .iter()
            .filter(|slot| slot.item == item)
            .map(|slot| slot.count)
            .sum()
    }

    /// Total units stored, across every item.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.slots.iter().map(|slot| slot.count).sum()
    }

    /// Whether at least `quantity` units of `item` are stored.
    #[must_use]
    pub fn has_at_least(&self, item: &str, quantity: u32) -> bool {
        self.total_of(item) >= quantity
    }

    /// Upper bound on how many more units fit, ignoring the fresh-slot
    /// requirement of items not yet stored.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn free_capacity(&self) -> u32 {
        let capacity = self.max_slots as u64 * u64::from(self.stack_size);
        (capacity - u64::from(self.total_items())) as u32
    }

    /// `(item id, count)` totals aggregated per item, ordered by item ID.
    #[must_use]
    pub fn sorted_contents(&self) -> Vec<(String, u32)> {
        let mut totals: Vec<(String, u32)> = Vec::new();
        for slot in &self.slots {
            match totals.iter_mut().find(|(item, _)| *item == slot.item) {
                Some((_, count)) => *count += slot.count,
                None => totals.push((slot.item.clone(), slot.count)),
            }
        }
        totals.sort_by(|a, b| a.0.cmp(&b.0));
        totals
    }

    /// Captures the slot state for later rollback.
    #[must_use]
    pub fn snapshot(&self) -> InventorySnapshot {
        InventorySnapshot {
            slots: self.slots.clone(),
        }
    }

    /// Restores a previously captured slot state.
    pub fn restore(&mut self, snapshot: &InventorySnapshot) {
        self.slots.clone_from(&snapshot.slots);
    }
}
