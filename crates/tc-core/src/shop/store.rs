//! Per-town shop record and shopkeeper mood

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::consts::{BARGAIN_SATURATION, LOCKOUT_TURNS, NEVER_VISITED, TRIVIAL_PRICE};
use crate::rng::GameRng;

use super::ShopCategory;
use super::ledger::StockLedger;
use super::owner::{Owner, owner_def};

/// One venue of one town
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shop {
    pub category: ShopCategory,
    pub town: usize,
    /// Roster index of the current owner
    pub owner: usize,
    pub stock: StockLedger,
    /// Insults endured since the last lockout or maintenance
    pub insult_cur: i32,
    /// Haggles settled at the floor price
    pub good_buy: u16,
    /// Haggles settled anywhere else
    pub bad_buy: u16,
    /// The door stays locked while the game turn is before this
    pub store_open: i64,
    /// Game turn of the last catch-up maintenance
    pub last_visit: i64,
}

impl Shop {
    pub fn new(category: ShopCategory, town: usize, owner: usize, home_expansion: bool) -> Self {
        Self {
            category,
            town,
            owner,
            stock: StockLedger::new(category, home_expansion),
            insult_cur: 0,
            good_buy: 0,
            bad_buy: 0,
            store_open: 0,
            last_visit: NEVER_VISITED,
        }
    }

    pub fn owner(&self) -> &'static Owner {
        owner_def(self.category, self.owner)
    }

    pub fn is_locked(&self, turn: i64) -> bool {
        self.store_open > turn
    }

    /// Forget the haggling history and open the door
    pub fn reset_mood(&mut self) {
        self.insult_cur = 0;
        self.good_buy = 0;
        self.bad_buy = 0;
        self.store_open = 0;
    }

    /// Whether the shopkeeper will skip haggling over a floor price
    pub fn no_need_to_bargain(&self, min_price: i64) -> bool {
        if min_price < TRIVIAL_PRICE {
            return true;
        }
        if self.good_buy == BARGAIN_SATURATION {
            return true;
        }
        let good = self.good_buy as i64;
        let bad = self.bad_buy as i64;
        good > 3 * bad + 5 + min_price / 50
    }

    /// Record how a haggle over `units` items ended
    pub fn update_bargain(&mut self, price: i64, min_price: i64, units: i64) {
        if units > 0 && min_price / units < TRIVIAL_PRICE {
            return;
        }
        if price == min_price {
            if self.good_buy < BARGAIN_SATURATION {
                self.good_buy += 1;
            }
        } else if self.bad_buy < BARGAIN_SATURATION {
            self.bad_buy += 1;
        }
    }

    /// Add an insult; returns true when the owner throws the player out
    pub fn increase_insults(&mut self, rng: &mut GameRng, turn: i64) -> bool {
        self.insult_cur += 1;
        if self.insult_cur <= self.owner().insult_max {
            return false;
        }
        self.eject(rng, turn);
        true
    }

    /// Throw the player out
    ///
    /// Wipes the haggling history and locks the door until a randomized
    /// future turn.
    pub fn eject(&mut self, rng: &mut GameRng, turn: i64) {
        self.insult_cur = 0;
        self.good_buy = 0;
        self.bad_buy = 0;
        self.store_open = turn + LOCKOUT_TURNS + rng.rnd(LOCKOUT_TURNS as u32) as i64;
        info!(
            owner = self.owner().name,
            reopens_at = self.store_open,
            "player thrown out"
        );
    }

    pub fn decrease_insults(&mut self) {
        if self.insult_cur > 0 {
            self.insult_cur -= 1;
        }
    }
}
