//! Stock ledger
//!
//! The bounded, sorted list of stacks a venue holds. Ordinary shops merge
//! with the strict shop relation; the home and the museum use the pack's
//! general relation and a capacity that depends on the options.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::{HOME_INVEN_BASIC, HOME_INVEN_MAX, MUSEUM_INVEN_MAX, STORE_INVEN_MAX};
use crate::object::{Item, ItemKind};

use super::ShopCategory;

/// Which similarity relation a ledger merges with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StackRule {
    Shop,
    General,
}

/// Stacks held by one venue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockLedger {
    stacks: Vec<Item>,
    capacity: usize,
    rule: StackRule,
}

/// Ledger slots for a category
pub fn ledger_capacity(category: ShopCategory, home_expansion: bool) -> usize {
    match category {
        ShopCategory::Home if home_expansion => HOME_INVEN_MAX,
        ShopCategory::Home => HOME_INVEN_BASIC,
        ShopCategory::Museum => MUSEUM_INVEN_MAX,
        _ => STORE_INVEN_MAX,
    }
}

/// Sort key: kind, sub-kind, charge field, value (all ascending)
fn sort_key(item: &Item) -> (ItemKind, u8, i32, i64) {
    (item.item_kind(), item.sval(), item.pval, item.value())
}

impl StockLedger {
    pub fn new(category: ShopCategory, home_expansion: bool) -> Self {
        let rule = if category.is_storage() {
            StackRule::General
        } else {
            StackRule::Shop
        };
        Self::with_capacity(rule, ledger_capacity(category, home_expansion))
    }

    pub fn with_capacity(rule: StackRule, capacity: usize) -> Self {
        Self {
            stacks: Vec::new(),
            capacity,
            rule,
        }
    }

    pub fn rule(&self) -> StackRule {
        self.rule
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Change the slot count; existing stacks are kept even above it
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
    }

    pub fn stacks(&self) -> &[Item] {
        &self.stacks
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.stacks.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Item> {
        self.stacks.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.stacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.stacks.len() >= self.capacity
    }

    /// Whether two stacks would merge in this ledger
    pub fn similar(&self, a: &Item, b: &Item) -> bool {
        match self.rule {
            StackRule::Shop => a.store_similar(b),
            StackRule::General => a.stacks_with(b),
        }
    }

    fn absorb(&self, into: &mut Item, from: &Item) {
        match self.rule {
            StackRule::Shop => into.absorb_store(from),
            StackRule::General => into.absorb_general(from),
        }
    }

    /// Whether `item` would be accepted, by merging or in a free slot
    pub fn check_num(&self, item: &Item) -> bool {
        self.stacks.iter().any(|stack| self.similar(stack, item)) || !self.is_full()
    }

    /// Add `item`, merging into a similar stack when possible
    ///
    /// Returns the slot the goods ended up in, or hands the item back when
    /// the ledger has no room (or, in a shop, the item is worthless).
    pub fn carry(&mut self, item: Item) -> Result<usize, Item> {
        if self.rule == StackRule::Shop && item.value() <= 0 {
            return Err(item);
        }
        if let Some(idx) = self.stacks.iter().position(|stack| self.similar(stack, &item)) {
            let mut merged = self.stacks[idx].clone();
            self.absorb(&mut merged, &item);
            self.stacks[idx] = merged;
            return Ok(idx);
        }
        if self.is_full() {
            debug!(item = %item.describe(), "ledger full");
            return Err(item);
        }
        let key = sort_key(&item);
        let slot = self
            .stacks
            .iter()
            .position(|stack| key < sort_key(stack))
            .unwrap_or(self.stacks.len());
        self.stacks.insert(slot, item);
        Ok(slot)
    }

    /// Change the quantity at `index` (clamped to 0..=255), charges untouched
    pub fn increase(&mut self, index: usize, delta: i32) -> i32 {
        self.stacks
            .get_mut(index)
            .map_or(0, |stack| stack.adjust_quantity(delta))
    }

    /// Splice out the stack at `index` if it is empty
    pub fn optimize(&mut self, index: usize) {
        if self.stacks.get(index).is_some_and(|stack| stack.quantity == 0) {
            self.stacks.remove(index);
        }
    }

    /// Remove `amount` units from the stack at `index`
    ///
    /// Pooled charges leave in proportion. An emptied stack is spliced out
    /// and later stacks shift down.
    pub fn take(&mut self, index: usize, amount: u8) -> Option<Item> {
        let stack = self.stacks.get_mut(index)?;
        let part = stack.split_off(amount);
        self.optimize(index);
        Some(part)
    }

    /// Remove the whole stack at `index`
    pub fn remove(&mut self, index: usize) -> Option<Item> {
        (index < self.stacks.len()).then(|| self.stacks.remove(index))
    }

    /// Drop every stack failing `keep`
    pub fn retain(&mut self, keep: impl FnMut(&Item) -> bool) {
        self.stacks.retain(keep);
    }

    /// Re-shelve every stack, merging any that have become similar
    pub fn consolidate(&mut self) {
        for item in std::mem::take(&mut self.stacks) {
            if let Err(item) = self.carry(item) {
                debug!(item = %item.describe(), "dropped while re-shelving");
            }
        }
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Item> {
        self.stacks.iter_mut()
    }
}
