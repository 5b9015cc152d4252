//! Player pack

use serde::{Deserialize, Serialize};

use crate::consts::PACK_SLOTS;
use crate::object::Item;

/// Bounded list of item stacks carried by the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inventory {
    items: Vec<Item>,
    slots: usize,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::with_slots(PACK_SLOTS)
    }
}

impl Inventory {
    pub fn with_slots(slots: usize) -> Self {
        Self {
            items: Vec::new(),
            slots,
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether `item` would fit, either by stacking or in a free slot
    pub fn carry_okay(&self, item: &Item) -> bool {
        self.items.len() < self.slots || self.items.iter().any(|held| held.stacks_with(item))
    }

    /// Add `item` to the pack, returning the slot it ended up in
    pub fn carry(&mut self, item: Item) -> Option<usize> {
        if let Some(idx) = self.items.iter().position(|held| held.stacks_with(&item)) {
            self.items[idx].absorb_general(&item);
            return Some(idx);
        }
        if self.items.len() >= self.slots {
            return None;
        }
        let slot = self
            .items
            .iter()
            .position(|held| pack_order(&item, held))
            .unwrap_or(self.items.len());
        self.items.insert(slot, item);
        Some(slot)
    }

    /// Split `amount` units off slot `index`, removing the slot if emptied
    pub fn take(&mut self, index: usize, amount: u8) -> Option<Item> {
        let stack = self.items.get_mut(index)?;
        let part = stack.split_off(amount);
        self.optimize(index);
        Some(part)
    }

    /// Change the quantity of slot `index` without touching charges
    ///
    /// Returns the change actually applied.
    pub fn item_increase(&mut self, index: usize, delta: i32) -> i32 {
        self.items
            .get_mut(index)
            .map_or(0, |stack| stack.adjust_quantity(delta))
    }

    /// Drop slot `index` if it holds nothing
    pub fn optimize(&mut self, index: usize) {
        if self.items.get(index).is_some_and(|stack| stack.quantity == 0) {
            self.items.remove(index);
        }
    }
}

/// True when `new` sorts before `held` in the pack
fn pack_order(new: &Item, held: &Item) -> bool {
    (new.item_kind(), new.sval(), std::cmp::Reverse(new.value()))
        < (held.item_kind(), held.sval(), std::cmp::Reverse(held.value()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::catalogue::lookup;
    use crate::object::ItemKind;

    fn item(kind: ItemKind, sval: u8) -> Item {
        Item::new(lookup(kind, sval).unwrap())
    }

    #[test]
    fn test_carry_stacks_and_sorts() {
        let mut pack = Inventory::default();
        pack.carry(item(ItemKind::Food, 1).with_quantity(2));
        pack.carry(item(ItemKind::Sword, 1));
        let slot = pack.carry(item(ItemKind::Food, 1).with_quantity(3)).unwrap();
        assert_eq!(pack.len(), 2);
        assert_eq!(pack.items()[0].item_kind(), ItemKind::Sword);
        assert_eq!(pack.items()[slot].quantity, 5);
    }

    #[test]
    fn test_full_pack_refuses_new_slot_but_allows_stacking() {
        let mut pack = Inventory::with_slots(1);
        pack.carry(item(ItemKind::Food, 1));
        let arrow = item(ItemKind::Arrow, 1);
        assert!(!pack.carry_okay(&arrow));
        assert!(pack.carry(arrow).is_none());
        assert!(pack.carry_okay(&item(ItemKind::Food, 1)));
    }

    #[test]
    fn test_take_whole_stack_frees_slot() {
        let mut pack = Inventory::default();
        pack.carry(item(ItemKind::Potion, 2).with_quantity(2));
        let taken = pack.take(0, 2).unwrap();
        assert_eq!(taken.quantity, 2);
        assert!(pack.is_empty());
    }

    #[test]
    fn test_item_increase_keeps_charges_until_optimized() {
        let mut pack = Inventory::default();
        let mut wands = item(ItemKind::Wand, 1).with_quantity(2);
        wands.pval = 12;
        pack.carry(wands);
        assert_eq!(pack.item_increase(0, 1), 1);
        assert_eq!(pack.items()[0].quantity, 3);
        assert_eq!(pack.items()[0].pval, 12);
        assert_eq!(pack.item_increase(0, -10), -3);
        assert_eq!(pack.len(), 1);
        pack.optimize(0);
        assert!(pack.is_empty());
        assert_eq!(pack.item_increase(4, 1), 0);
    }
}
