//! Shop categories
//!
//! Each category carries the wares it trades in, the stock table it restocks
//! from and the size of its ledger. Deciding whether a shop will take an item
//! is a table lookup plus an optional per-category condition.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::consts::{HOME_INVEN_MAX, MUSEUM_INVEN_MAX, STORE_INVEN_MAX};
use crate::error::CommerceError;
use crate::object::catalogue::{SV_POTION_WATER, SV_WIZSTAFF};
use crate::object::{Item, ItemKind, Wares};

/// Commerce venue found in every town
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
#[repr(u8)]
pub enum ShopCategory {
    #[strum(to_string = "General Store", serialize = "general")]
    General = 0,
    #[strum(serialize = "Armoury")]
    Armoury = 1,
    #[strum(to_string = "Weapon Smiths", serialize = "weaponsmith")]
    Weaponsmith = 2,
    #[strum(serialize = "Temple")]
    Temple = 3,
    #[strum(to_string = "Alchemy shop", serialize = "alchemist")]
    Alchemist = 4,
    #[strum(to_string = "Magic shop", serialize = "magic")]
    Magic = 5,
    #[strum(to_string = "Black market", serialize = "blackmarket")]
    BlackMarket = 6,
    #[strum(to_string = "Home", serialize = "home")]
    Home = 7,
    #[strum(to_string = "Bookstore", serialize = "bookstore")]
    Bookstore = 8,
    #[strum(to_string = "Museum", serialize = "museum")]
    Museum = 9,
}

/// What a category accepts from the player
#[derive(Debug, Clone, Copy)]
pub struct BuyRule {
    pub wares: Wares,
    /// Extra test applied to items whose kind is among the wares
    pub condition: Option<fn(&Item) -> bool>,
}

impl BuyRule {
    const fn wares(wares: Wares) -> Self {
        Self {
            wares,
            condition: None,
        }
    }

    pub fn accepts(&self, item: &Item) -> bool {
        self.wares.deals_in(item.item_kind()) && self.condition.is_none_or(|check| check(item))
    }
}

fn general_condition(item: &Item) -> bool {
    item.item_kind() != ItemKind::Potion || item.sval() == SV_POTION_WATER
}

fn weaponsmith_condition(item: &Item) -> bool {
    item.item_kind() != ItemKind::Hafted || item.sval() != SV_WIZSTAFF
}

fn magic_condition(item: &Item) -> bool {
    item.item_kind() != ItemKind::Hafted || item.sval() == SV_WIZSTAFF
}

fn temple_condition(item: &Item) -> bool {
    !matches!(item.item_kind(), ItemKind::Sword | ItemKind::Polearm) || item.blessed
}

const ALL_BOOKS: Wares = Wares::MAGE_BOOKS
    .union(Wares::LIFE_BOOK)
    .union(Wares::CRUSADE_BOOK)
    .union(Wares::HISSATSU_BOOK);

static BUY_RULES: [BuyRule; ShopCategory::COUNT] = [
    BuyRule {
        wares: Wares::FOOD
            .union(Wares::LIGHT)
            .union(Wares::FLASK)
            .union(Wares::SPIKE)
            .union(Wares::AMMO)
            .union(Wares::DIGGING)
            .union(Wares::CLOAK)
            .union(Wares::BOTTLE)
            .union(Wares::WHISTLE)
            .union(Wares::FIGURINE)
            .union(Wares::STATUE)
            .union(Wares::CAPTURE)
            .union(Wares::CARD)
            .union(Wares::POTION),
        condition: Some(general_condition),
    },
    BuyRule::wares(
        Wares::BOOTS
            .union(Wares::GLOVES)
            .union(Wares::CROWN)
            .union(Wares::HELM)
            .union(Wares::SHIELD)
            .union(Wares::CLOAK)
            .union(Wares::BODY_ARMOUR),
    ),
    BuyRule {
        wares: Wares::AMMO
            .union(Wares::BOW)
            .union(Wares::DIGGING)
            .union(Wares::POLEARM)
            .union(Wares::SWORD)
            .union(Wares::HAFTED)
            .union(Wares::HISSATSU_BOOK),
        condition: Some(weaponsmith_condition),
    },
    BuyRule {
        wares: Wares::LIFE_BOOK
            .union(Wares::CRUSADE_BOOK)
            .union(Wares::SCROLL)
            .union(Wares::POTION)
            .union(Wares::HAFTED)
            .union(Wares::SWORD)
            .union(Wares::POLEARM),
        condition: Some(temple_condition),
    },
    BuyRule::wares(Wares::SCROLL.union(Wares::POTION)),
    BuyRule {
        wares: Wares::MAGE_BOOKS
            .union(Wares::AMULET)
            .union(Wares::RING)
            .union(Wares::DEVICES)
            .union(Wares::SCROLL)
            .union(Wares::POTION)
            .union(Wares::FIGURINE)
            .union(Wares::HAFTED),
        condition: Some(magic_condition),
    },
    BuyRule::wares(Wares::all()),
    BuyRule::wares(Wares::all()),
    BuyRule::wares(ALL_BOOKS),
    BuyRule::wares(Wares::all()),
];

use ItemKind as K;

static GENERAL_TABLE: &[(ItemKind, u8)] = &[
    (K::Food, 1),
    (K::Food, 1),
    (K::Food, 2),
    (K::Food, 3),
    (K::Food, 4),
    (K::Light, 1),
    (K::Light, 1),
    (K::Flask, 1),
    (K::Flask, 1),
    (K::Spike, 1),
    (K::Shot, 1),
    (K::Arrow, 1),
    (K::Arrow, 1),
    (K::Bolt, 1),
    (K::Digging, 1),
    (K::Digging, 2),
    (K::Cloak, 1),
    (K::Potion, SV_POTION_WATER),
];

static ARMOURY_TABLE: &[(ItemKind, u8)] = &[
    (K::Boots, 1),
    (K::Boots, 2),
    (K::Gloves, 1),
    (K::Gloves, 2),
    (K::Helm, 1),
    (K::Helm, 2),
    (K::Shield, 1),
    (K::Shield, 2),
    (K::Cloak, 2),
    (K::SoftArmor, 1),
    (K::SoftArmor, 2),
    (K::SoftArmor, 3),
    (K::HardArmor, 1),
    (K::HardArmor, 2),
];

static WEAPONSMITH_TABLE: &[(ItemKind, u8)] = &[
    (K::Sword, 1),
    (K::Sword, 2),
    (K::Sword, 3),
    (K::Sword, 4),
    (K::Sword, 5),
    (K::Sword, 6),
    (K::Polearm, 1),
    (K::Polearm, 2),
    (K::Polearm, 3),
    (K::Hafted, 1),
    (K::Hafted, 2),
    (K::Hafted, 3),
    (K::Bow, 1),
    (K::Bow, 2),
    (K::Bow, 3),
    (K::Bow, 4),
    (K::Shot, 1),
    (K::Arrow, 1),
    (K::Bolt, 1),
    (K::HissatsuBook, 1),
];

static TEMPLE_TABLE: &[(ItemKind, u8)] = &[
    (K::Hafted, 1),
    (K::Hafted, 2),
    (K::Hafted, 3),
    (K::Hafted, 4),
    (K::LifeBook, 1),
    (K::LifeBook, 2),
    (K::CrusadeBook, 1),
    (K::Scroll, 1),
    (K::Scroll, 3),
    (K::Scroll, 5),
    (K::Potion, 2),
    (K::Potion, 2),
    (K::Potion, 3),
    (K::Potion, 4),
];

static ALCHEMIST_TABLE: &[(ItemKind, u8)] = &[
    (K::Potion, 2),
    (K::Potion, 3),
    (K::Potion, 4),
    (K::Potion, 5),
    (K::Potion, 6),
    (K::Scroll, 1),
    (K::Scroll, 2),
    (K::Scroll, 2),
    (K::Scroll, 3),
    (K::Scroll, 4),
    (K::Scroll, 4),
    (K::Scroll, 8),
    (K::Scroll, 9),
];

static MAGIC_TABLE: &[(ItemKind, u8)] = &[
    (K::Ring, 1),
    (K::Ring, 2),
    (K::Amulet, 1),
    (K::Amulet, 2),
    (K::Wand, 1),
    (K::Wand, 2),
    (K::Wand, 3),
    (K::Staff, 1),
    (K::Staff, 2),
    (K::Staff, 3),
    (K::Rod, 1),
    (K::Rod, 2),
    (K::Hafted, SV_WIZSTAFF),
    (K::SorceryBook, 1),
    (K::ArcaneBook, 1),
    (K::ArcaneBook, 2),
];

static BOOKSTORE_TABLE: &[(ItemKind, u8)] = &[
    (K::LifeBook, 1),
    (K::LifeBook, 2),
    (K::SorceryBook, 1),
    (K::SorceryBook, 2),
    (K::NatureBook, 1),
    (K::NatureBook, 2),
    (K::ChaosBook, 1),
    (K::ChaosBook, 2),
    (K::DeathBook, 1),
    (K::DeathBook, 2),
    (K::TrumpBook, 1),
    (K::TrumpBook, 2),
    (K::ArcaneBook, 1),
    (K::ArcaneBook, 2),
    (K::CrusadeBook, 1),
    (K::CrusadeBook, 2),
];

impl ShopCategory {
    pub const COUNT: usize = 10;

    pub fn index(self) -> usize {
        self as usize
    }

    /// Venues that trade for gold (everything but home and museum)
    pub fn is_ordinary(self) -> bool {
        !matches!(self, ShopCategory::Home | ShopCategory::Museum)
    }

    /// Venues that use the player's stacking rules
    pub fn is_storage(self) -> bool {
        !self.is_ordinary()
    }

    /// Nominal ledger size
    pub fn ledger_size(self) -> usize {
        match self {
            ShopCategory::Home => HOME_INVEN_MAX,
            ShopCategory::Museum => MUSEUM_INVEN_MAX,
            _ => STORE_INVEN_MAX,
        }
    }

    pub fn buy_rule(self) -> &'static BuyRule {
        &BUY_RULES[self.index()]
    }

    /// Check whether the shop would take `item` from the player
    pub fn will_buy(self, item: &Item) -> Result<(), CommerceError> {
        if self.is_storage() {
            return Ok(());
        }
        if !self.buy_rule().accepts(item) {
            return Err(CommerceError::WillNotBuy);
        }
        if item.value() <= 0 {
            return Err(CommerceError::Worthless);
        }
        Ok(())
    }

    /// Kinds this category restocks from; empty for the black market and
    /// for storage venues
    pub fn stock_table(self) -> &'static [(ItemKind, u8)] {
        match self {
            ShopCategory::General => GENERAL_TABLE,
            ShopCategory::Armoury => ARMOURY_TABLE,
            ShopCategory::Weaponsmith => WEAPONSMITH_TABLE,
            ShopCategory::Temple => TEMPLE_TABLE,
            ShopCategory::Alchemist => ALCHEMIST_TABLE,
            ShopCategory::Magic => MAGIC_TABLE,
            ShopCategory::Bookstore => BOOKSTORE_TABLE,
            ShopCategory::BlackMarket | ShopCategory::Home | ShopCategory::Museum => &[],
        }
    }
}
