//! The acting player as seen by the commerce engine
//!
//! Purse, pack, pricing inputs (race and charisma) and the location context
//! a shop visit temporarily rewrites.

mod inventory;
mod race;

pub use inventory::Inventory;
pub use race::Race;

use serde::{Deserialize, Serialize};

use crate::error::CommerceError;
use crate::shop::ShopCategory;

/// What the player is standing on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Terrain {
    #[default]
    Floor,
    ShopEntrance(ShopCategory),
}

/// Where the player is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Location {
    /// Town index, `None` in the dungeon
    pub town: Option<usize>,
    pub terrain: Terrain,
    pub depth: i32,
}

impl Location {
    pub fn at_shop(town: usize, category: ShopCategory) -> Self {
        Self {
            town: Some(town),
            terrain: Terrain::ShopEntrance(category),
            depth: 0,
        }
    }
}

/// Highest charisma stat index (18/220 and above)
pub const MAX_CHARISMA_INDEX: u8 = 37;

/// Charisma index of an unremarkable 18/00
pub const NEUTRAL_CHARISMA_INDEX: u8 = 15;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub race: Race,
    /// Charisma as a stat index: 0 is 3, 15 is 18/00, 37 is 18/220+
    pub charisma: u8,
    pub gold: i64,
    pub inventory: Inventory,
    pub location: Location,
}

impl Player {
    pub fn new(name: impl Into<String>, race: Race) -> Self {
        Self {
            name: name.into(),
            race,
            charisma: NEUTRAL_CHARISMA_INDEX,
            gold: 0,
            inventory: Inventory::default(),
            location: Location::default(),
        }
    }

    /// Deduct `price`, refusing when the purse is short
    pub fn spend(&mut self, price: i64) -> Result<(), CommerceError> {
        if self.gold < price {
            return Err(CommerceError::InsufficientFunds {
                price,
                gold: self.gold,
            });
        }
        self.gold -= price;
        Ok(())
    }

    pub fn earn(&mut self, amount: i64) {
        self.gold = self.gold.saturating_add(amount);
    }
}
