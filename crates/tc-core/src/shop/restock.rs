//! Restocking scheduler
//!
//! A maintenance round ages the stock (partial or full removal of random
//! stacks) and then manufactures fresh piles, keeping the stack count within
//! [`STORE_MIN_KEEP`], [`STORE_MAX_KEEP`]. Rounds are run in catch-up batches
//! whenever a shop is entered.

use std::collections::HashSet;

use tracing::debug;

use crate::consts::{
    BLACK_MARKET_DEPTH, BLACK_MARKET_MIN_VALUE, MAX_CATCHUP_ROUNDS, STORE_CREATE_TRIES,
    STORE_MAX_KEEP, STORE_MIN_KEEP, STORE_OBJ_LEVEL, STORE_TURNOVER, TURNS_PER_MAINTENANCE,
};
use crate::object::catalogue::lookup;
use crate::object::{Item, ItemKind, ItemSource, KindId};
use crate::rng::GameRng;

use super::ShopCategory;
use super::pile::mass_produce;
use super::store::Shop;

/// Creation attempts allowed per missing stack in one round
const FILL_ATTEMPTS_PER_SLOT: usize = 8;

/// Kinds on sale in the other ordinary shops of a town
#[derive(Debug, Clone, Default)]
pub struct Neighbours {
    kinds: HashSet<KindId>,
}

impl Neighbours {
    pub fn new(kinds: impl IntoIterator<Item = KindId>) -> Self {
        Self {
            kinds: kinds.into_iter().collect(),
        }
    }

    pub fn stock(&self, kind: KindId) -> bool {
        self.kinds.contains(&kind)
    }
}

/// Whether the black market should pass on `item`
///
/// Anything carrying a magical signature or a positive bonus is worth
/// keeping; otherwise the item is crap when an ordinary shop already sells
/// the same kind.
pub fn black_market_crap(item: &Item, neighbours: &Neighbours) -> bool {
    if item.ego.is_some() {
        return false;
    }
    if item.to_a > 0 || item.to_h > 0 || item.to_d > 0 {
        return false;
    }
    neighbours.stock(item.kind)
}

/// Maintenance rounds owed for the time since `last_visit`
pub fn catch_up_rounds(turn: i64, last_visit: i64) -> i64 {
    ((turn - last_visit) / TURNS_PER_MAINTENANCE).clamp(0, MAX_CATCHUP_ROUNDS)
}

/// Random stock aging and manufacturing for one shop
pub struct Restocker<'a> {
    pub rng: &'a mut GameRng,
    pub source: &'a mut dyn ItemSource,
    pub neighbours: &'a Neighbours,
}

impl Restocker<'_> {
    /// Remove some or all units of a random stack
    pub fn store_delete(&mut self, shop: &mut Shop) {
        if shop.stock.is_empty() {
            return;
        }
        let what = self.rng.rn2(shop.stock.len() as u32) as usize;
        let Some(stack) = shop.stock.get(what) else {
            return;
        };
        let mut num = stack.quantity;
        if self.rng.one_in(2) {
            num = num.div_ceil(2);
        }
        if self.rng.one_in(2) {
            num = 1;
        }
        if let Some(gone) = shop.stock.take(what, num) {
            debug!(shop = %shop.category, item = %gone.describe(), "stock aged out");
        }
    }

    fn candidate(&mut self, category: ShopCategory) -> Option<Item> {
        if category == ShopCategory::BlackMarket {
            let level = BLACK_MARKET_DEPTH + self.rng.rn2(BLACK_MARKET_DEPTH as u32) as i32;
            let kind = self.source.pick_kind(self.rng, level)?;
            return Some(self.source.make(self.rng, kind, level));
        }
        let &(kind, sval) = self.rng.choose(category.stock_table())?;
        let id = lookup(kind, sval)?;
        let level = self.rng.range(1, STORE_OBJ_LEVEL as i64) as i32;
        Some(self.source.make(self.rng, id, level))
    }

    /// Try a few times to manufacture one pile and shelve it
    pub fn store_create(&mut self, shop: &mut Shop) {
        if shop.stock.is_full() {
            return;
        }
        for _ in 0..STORE_CREATE_TRIES {
            let Some(mut item) = self.candidate(shop.category) else {
                continue;
            };
            if item.item_kind() == ItemKind::Chest {
                continue;
            }
            if shop.category == ShopCategory::BlackMarket {
                if black_market_crap(&item, self.neighbours) {
                    continue;
                }
                if item.value() < BLACK_MARKET_MIN_VALUE {
                    continue;
                }
            } else if shop.category.will_buy(&item).is_err() {
                continue;
            }
            mass_produce(self.rng, &mut item, shop.category);
            let label = item.describe();
            if shop.stock.carry(item).is_ok() {
                debug!(shop = %shop.category, item = %label, "stock created");
            }
            return;
        }
    }

    /// One maintenance round; storage venues are left alone
    pub fn maintain(&mut self, shop: &mut Shop) {
        if shop.category.is_storage() {
            return;
        }

        if shop.category == ShopCategory::BlackMarket {
            let neighbours = self.neighbours;
            shop.stock.retain(|item| !black_market_crap(item, neighbours));
        }

        let mut keep = shop.stock.len() as i64 - self.rng.rnd(STORE_TURNOVER) as i64;
        keep = keep.clamp(STORE_MIN_KEEP as i64, STORE_MAX_KEEP as i64);
        while shop.stock.len() as i64 > keep {
            self.store_delete(shop);
        }

        let mut fill = shop.stock.len() + self.rng.rnd(STORE_TURNOVER) as usize;
        fill = fill.clamp(STORE_MIN_KEEP, STORE_MAX_KEEP);
        fill = fill.min(shop.stock.capacity().saturating_sub(1));
        let mut attempts = fill.saturating_sub(shop.stock.len()) * FILL_ATTEMPTS_PER_SLOT;
        while shop.stock.len() < fill && attempts > 0 {
            self.store_create(shop);
            attempts -= 1;
        }
        debug!(shop = %shop.category, town = shop.town, stacks = shop.stock.len(), "maintained");
    }

    pub fn maintain_rounds(&mut self, shop: &mut Shop, rounds: usize) {
        for _ in 0..rounds {
            self.maintain(shop);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::Forge;

    fn item(kind: ItemKind, sval: u8) -> Item {
        Item::new(lookup(kind, sval).unwrap())
    }

    #[test]
    fn test_catch_up_is_capped() {
        assert_eq!(catch_up_rounds(0, -100_000), 10);
        assert_eq!(catch_up_rounds(25_000, 0), 2);
        assert_eq!(catch_up_rounds(9_999, 0), 0);
        assert_eq!(catch_up_rounds(10_000_000, 0), 10);
        assert_eq!(catch_up_rounds(0, 50), 0);
    }

    #[test]
    fn test_black_market_crap() {
        let arrow = item(ItemKind::Arrow, 1);
        let neighbours = Neighbours::new([arrow.kind]);
        assert!(black_market_crap(&arrow, &neighbours));
        let mut sharp = arrow.clone();
        sharp.to_h = 1;
        assert!(!black_market_crap(&sharp, &neighbours));
        assert!(!black_market_crap(&item(ItemKind::Bolt, 1), &neighbours));
    }

    #[test]
    fn test_maintenance_leaves_mood_alone() {
        let mut rng = GameRng::new(17);
        let mut forge = Forge;
        let neighbours = Neighbours::default();
        let mut shop = Shop::new(ShopCategory::Alchemist, 0, 0, false);
        shop.insult_cur = 2;
        shop.good_buy = 3;
        Restocker {
            rng: &mut rng,
            source: &mut forge,
            neighbours: &neighbours,
        }
        .maintain_rounds(&mut shop, 5);
        assert_eq!(shop.insult_cur, 2);
        assert_eq!(shop.good_buy, 3);
    }

    #[test]
    fn test_maintenance_keeps_bounds() {
        let mut rng = GameRng::new(17);
        let mut forge = Forge;
        let neighbours = Neighbours::default();
        let mut shop = Shop::new(ShopCategory::Weaponsmith, 0, 0, false);
        let mut restocker = Restocker {
            rng: &mut rng,
            source: &mut forge,
            neighbours: &neighbours,
        };
        for _ in 0..50 {
            restocker.maintain(&mut shop);
            assert!(shop.stock.len() <= STORE_MAX_KEEP);
        }
        assert!(shop.stock.len() >= STORE_MIN_KEEP);
    }

    #[test]
    fn test_store_delete_eventually_empties() {
        let mut rng = GameRng::new(2);
        let mut forge = Forge;
        let neighbours = Neighbours::default();
        let mut shop = Shop::new(ShopCategory::General, 0, 0, false);
        shop.stock.carry(item(ItemKind::Food, 1).with_quantity(20)).unwrap();
        let mut restocker = Restocker {
            rng: &mut rng,
            source: &mut forge,
            neighbours: &neighbours,
        };
        let mut calls = 0;
        while !shop.stock.is_empty() {
            restocker.store_delete(&mut shop);
            calls += 1;
            assert!(calls <= 20);
        }
    }

    #[test]
    fn test_storage_is_never_maintained() {
        let mut rng = GameRng::new(2);
        let mut forge = Forge;
        let neighbours = Neighbours::default();
        let mut home = Shop::new(ShopCategory::Home, 0, 0, false);
        Restocker {
            rng: &mut rng,
            source: &mut forge,
            neighbours: &neighbours,
        }
        .maintain_rounds(&mut home, 5);
        assert!(home.stock.is_empty());
    }

    #[test]
    fn test_black_market_stock_is_valuable_and_unique() {
        let mut rng = GameRng::new(23);
        let mut forge = Forge;
        let neighbours = Neighbours::new([item(ItemKind::Food, 1).kind]);
        let mut shop = Shop::new(ShopCategory::BlackMarket, 0, 0, false);
        Restocker {
            rng: &mut rng,
            source: &mut forge,
            neighbours: &neighbours,
        }
        .maintain_rounds(&mut shop, 5);
        for stack in shop.stock.stacks() {
            assert!(stack.real_value() >= BLACK_MARKET_MIN_VALUE);
            assert_ne!(stack.item_kind(), ItemKind::Chest);
            assert!(!black_market_crap(stack, &neighbours));
        }
    }
}
