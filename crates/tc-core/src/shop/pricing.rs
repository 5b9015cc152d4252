//! Price computation
//!
//! A price is the item's discounted value scaled by the owner's greed and
//! two percentage modifiers (racial relations and the player's charisma).
//! Buying never pays less than value, selling never earns more.

use crate::object::Item;
use crate::player::{MAX_CHARISMA_INDEX, Player, Race};

use super::owner::Owner;

/// Who is paying
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trade {
    /// The player buys from the shop
    Buy,
    /// The player sells to the shop
    Sell,
}

/// Relations between owner race (row) and player race (column), in percent
static RACE_ADJUST: [[i32; Race::COUNT]; Race::COUNT] = [
    // Human
    [100, 105, 105, 110, 113, 115, 120, 125, 100, 105],
    // Half-Elf
    [110, 100, 100, 105, 110, 120, 125, 130, 110, 100],
    // Elf
    [110, 105, 100, 105, 110, 120, 125, 130, 110, 100],
    // Hobbit
    [115, 110, 105, 95, 105, 110, 115, 130, 115, 105],
    // Gnome
    [115, 115, 110, 105, 95, 110, 115, 130, 115, 110],
    // Dwarf
    [115, 120, 120, 110, 110, 95, 125, 135, 115, 120],
    // Half-Orc
    [115, 120, 125, 115, 115, 130, 110, 115, 115, 125],
    // Half-Troll
    [110, 115, 115, 110, 110, 130, 110, 110, 110, 115],
    // Dunadan
    [100, 105, 105, 110, 113, 115, 120, 125, 100, 105],
    // High-Elf
    [110, 105, 100, 105, 110, 120, 125, 130, 110, 100],
];

/// Charisma modifier indexed by stat index, in percent
static CHARISMA_ADJUST: [i32; MAX_CHARISMA_INDEX as usize + 1] = [
    130, 125, 122, 120, 118, 116, 114, 112, 110, 108, 106, 104, 103, 102, 101, 100, 99, 98, 97,
    96, 95, 94, 93, 92, 91, 90, 89, 88, 87, 86, 85, 84, 83, 82, 81, 80, 79, 78,
];

pub fn race_adjust(owner: Race, player: Race) -> i32 {
    RACE_ADJUST[owner.index()][player.index()]
}

pub fn charisma_adjust(index: u8) -> i32 {
    CHARISMA_ADJUST[index.min(MAX_CHARISMA_INDEX) as usize]
}

/// Everything besides the item that moves a price
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceFactors {
    /// Owner greed in percent
    pub greed: i32,
    /// Racial relation in percent, 100 is neutral
    pub race: i32,
    /// Charisma modifier in percent, 100 is neutral
    pub charisma: i32,
    pub black_market: bool,
}

impl PriceFactors {
    /// Factors for `player` dealing with `owner` at the given greed
    pub fn new(owner: &Owner, player: &Player, greed: i32, black_market: bool) -> Self {
        Self {
            greed,
            race: race_adjust(owner.race, player.race),
            charisma: charisma_adjust(player.charisma),
            black_market,
        }
    }

    /// Combined percentage applied to the base value
    pub fn adjust(&self, trade: Trade) -> i64 {
        let factor = (self.greed + self.race + self.charisma) as i64;
        match trade {
            Trade::Buy => (100 + factor - 300).max(100),
            Trade::Sell => (100 + 300 - factor).min(100),
        }
    }
}

/// Price of one unit worth `base`
///
/// The percentage is applied with rounding to the nearest gold piece.
/// Anything with a positive base costs at least 1 gold; a non-positive base
/// is worth nothing.
pub fn price_for(base: i64, trade: Trade, factors: &PriceFactors) -> i64 {
    if base <= 0 {
        return 0;
    }
    let mut base = base;
    if factors.black_market {
        match trade {
            Trade::Buy => base *= 2,
            Trade::Sell => base /= 2,
        }
    }
    let price = (base * factors.adjust(trade) + 50) / 100;
    price.max(1)
}

/// Price of one unit of `item`
pub fn price_item(item: &Item, trade: Trade, factors: &PriceFactors) -> i64 {
    price_for(item.value(), trade, factors)
}
