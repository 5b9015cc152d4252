//! Towns and the commerce world
//!
//! Every town has one record per shop category. The home and the museum
//! are shared: all towns resolve them to the first town's record.

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::info;

use crate::config::CommerceConfig;
use crate::consts::{EMPTY_RESTOCK_ROUNDS, SHUFFLE_DISCOUNT};
use crate::object::ItemSource;
use crate::rng::GameRng;

use super::ShopCategory;
use super::owner::select_owner;
use super::restock::{Neighbours, Restocker};
use super::store::Shop;

/// Inscription put on stock when a new owner takes over
pub const ON_SALE: &str = "on sale";

/// Shops of one town, indexed by category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Town {
    pub shops: Vec<Shop>,
}

impl Town {
    pub fn shop(&self, category: ShopCategory) -> &Shop {
        &self.shops[category.index()]
    }
}

/// All commerce state of a game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Commerce {
    pub towns: Vec<Town>,
    /// Game turn
    pub turn: i64,
    pub rng: GameRng,
    pub config: CommerceConfig,
}

impl Commerce {
    /// Build `towns` towns (at least one) and stock every shop
    pub fn new(
        towns: usize,
        config: CommerceConfig,
        rng: GameRng,
        source: &mut dyn ItemSource,
    ) -> Self {
        let mut world = Self {
            towns: Vec::with_capacity(towns.max(1)),
            turn: 1,
            rng,
            config,
        };
        for town in 0..towns.max(1) {
            let shops = ShopCategory::iter()
                .map(|category| world.store_init(town, category))
                .collect();
            world.towns.push(Town { shops });
        }
        for town in 0..world.towns.len() {
            for category in ShopCategory::iter().filter(|c| c.is_ordinary()) {
                world.maintain(town, category, source, EMPTY_RESTOCK_ROUNDS);
            }
        }
        let turn = world.turn;
        for shop in world.towns.iter_mut().flat_map(|town| town.shops.iter_mut()) {
            shop.last_visit = turn;
        }
        info!(towns = world.towns.len(), seed = world.rng.seed(), "commerce world created");
        world
    }

    /// A fresh record with an owner unique among the towns built so far
    fn store_init(&mut self, town: usize, category: ShopCategory) -> Shop {
        let owner = if category.is_ordinary() {
            let taken: Vec<usize> = self
                .towns
                .iter()
                .map(|other| other.shop(category).owner)
                .collect();
            select_owner(&mut self.rng, None, &taken)
        } else {
            0
        };
        Shop::new(category, town, owner, self.config.home_expansion)
    }

    /// Town whose record serves `category` when entered from `town`
    pub fn record_town(&self, town: usize, category: ShopCategory) -> usize {
        if category.is_storage() { 0 } else { town }
    }

    pub fn shop(&self, town: usize, category: ShopCategory) -> &Shop {
        let town = self.record_town(town, category);
        self.towns[town].shop(category)
    }

    pub fn shop_mut(&mut self, town: usize, category: ShopCategory) -> &mut Shop {
        let town = self.record_town(town, category);
        &mut self.towns[town].shops[category.index()]
    }

    /// The record together with the generator, for negotiation
    pub fn shop_and_rng(
        &mut self,
        town: usize,
        category: ShopCategory,
    ) -> (&mut Shop, &mut GameRng) {
        let town = self.record_town(town, category);
        (&mut self.towns[town].shops[category.index()], &mut self.rng)
    }

    /// Kinds held by the ordinary shops of `town` other than `category`
    pub fn neighbours(&self, town: usize, category: ShopCategory) -> Neighbours {
        Neighbours::new(
            self.towns[town]
                .shops
                .iter()
                .filter(|shop| shop.category != category && shop.category.is_ordinary())
                .flat_map(|shop| shop.stock.stacks().iter().map(|item| item.kind)),
        )
    }

    /// Run `rounds` maintenance rounds on one shop
    pub fn maintain(
        &mut self,
        town: usize,
        category: ShopCategory,
        source: &mut dyn ItemSource,
        rounds: usize,
    ) {
        let town = self.record_town(town, category);
        let neighbours = self.neighbours(town, category);
        let Commerce { towns, rng, .. } = self;
        let shop = &mut towns[town].shops[category.index()];
        Restocker {
            rng,
            source,
            neighbours: &neighbours,
        }
        .maintain_rounds(shop, rounds);
    }

    /// Owners serving `category` in the other towns
    fn owners_elsewhere(&self, town: usize, category: ShopCategory) -> Vec<usize> {
        self.towns
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != town)
            .map(|(_, other)| other.shop(category).owner)
            .collect()
    }

    /// Replace the owner of a shop and put its stock on sale
    pub fn shuffle(&mut self, town: usize, category: ShopCategory) {
        if category.is_storage() {
            return;
        }
        let taken = self.owners_elsewhere(town, category);
        let (shop, rng) = self.shop_and_rng(town, category);
        let previous = shop.owner;
        shop.owner = select_owner(rng, Some(previous), &taken);
        shop.reset_mood();
        for item in shop.stock.iter_mut().filter(|item| !item.is_artifact()) {
            item.discount = SHUFFLE_DISCOUNT;
            item.price_fixed = false;
            item.inscription = Some(ON_SALE.to_string());
        }
        shop.stock.consolidate();
        info!(shop = %category, town, owner = shop.owner().name, "owner retired");
    }

    /// Move the game clock forward
    pub fn advance(&mut self, turns: i64) {
        self.turn += turns;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{STORE_MAX_KEEP, STORE_MIN_KEEP};
    use crate::object::Forge;
    use crate::shop::catch_up_rounds;

    fn world(towns: usize) -> Commerce {
        Commerce::new(towns, CommerceConfig::default(), GameRng::new(12), &mut Forge)
    }

    #[test]
    fn test_new_world_is_stocked() {
        let world = world(1);
        for category in ShopCategory::iter() {
            let stacks = world.shop(0, category).stock.len();
            if category.is_ordinary() {
                assert!((1..=STORE_MAX_KEEP).contains(&stacks), "{category}: {stacks}");
            } else {
                assert_eq!(stacks, 0);
            }
        }
        assert!(world.shop(0, ShopCategory::Weaponsmith).stock.len() >= STORE_MIN_KEEP);
    }

    #[test]
    fn test_initial_stocking_counts_as_a_visit() {
        let world = world(2);
        for town in &world.towns {
            for shop in &town.shops {
                assert_eq!(shop.last_visit, world.turn);
                assert_eq!(catch_up_rounds(world.turn, shop.last_visit), 0);
            }
        }
    }

    #[test]
    fn test_owners_unique_across_towns() {
        let world = world(4);
        for category in ShopCategory::iter().filter(|c| c.is_ordinary()) {
            let mut owners: Vec<usize> = world.towns.iter().map(|t| t.shop(category).owner).collect();
            owners.sort();
            owners.dedup();
            assert_eq!(owners.len(), 4, "{category}");
        }
    }

    #[test]
    fn test_home_and_museum_are_shared() {
        let world = world(3);
        assert_eq!(world.record_town(2, ShopCategory::Home), 0);
        assert_eq!(world.record_town(2, ShopCategory::Museum), 0);
        assert_eq!(world.record_town(2, ShopCategory::Temple), 2);
        assert_eq!(world.shop(2, ShopCategory::Home).town, 0);
    }

    #[test]
    fn test_shuffle_changes_owner_and_discounts() {
        let mut world = world(2);
        let before = world.shop(1, ShopCategory::Alchemist).owner;
        let elsewhere = world.shop(0, ShopCategory::Alchemist).owner;
        {
            let shop = world.shop_mut(1, ShopCategory::Alchemist);
            shop.insult_cur = 3;
            shop.store_open = 99_999;
        }
        world.shuffle(1, ShopCategory::Alchemist);
        let shop = world.shop(1, ShopCategory::Alchemist);
        assert_ne!(shop.owner, before);
        assert_ne!(shop.owner, elsewhere);
        assert_eq!(shop.insult_cur, 0);
        assert!(!shop.is_locked(world.turn));
        for item in shop.stock.stacks() {
            assert_eq!(item.discount, SHUFFLE_DISCOUNT);
            assert_eq!(item.inscription.as_deref(), Some(ON_SALE));
            assert!(!item.price_fixed);
        }
        let stacks = shop.stock.stacks();
        for (i, a) in stacks.iter().enumerate() {
            for b in &stacks[i + 1..] {
                assert!(!a.store_similar(b));
            }
        }
    }

    #[test]
    fn test_neighbours_exclude_self() {
        let world = world(1);
        let neighbours = world.neighbours(0, ShopCategory::General);
        for item in world.shop(0, ShopCategory::Armoury).stock.stacks() {
            assert!(neighbours.stock(item.kind));
        }
    }
}
