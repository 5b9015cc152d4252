//! Item kinds and ware sets

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Broad item category
///
/// The declaration order is the display order of a shop ledger.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
)]
#[repr(u8)]
pub enum ItemKind {
    Chest = 0,
    Figurine = 1,
    Statue = 2,
    Capture = 3,
    Card = 4,
    Spike = 5,
    Whistle = 6,
    Bottle = 7,
    Shot = 8,
    Arrow = 9,
    Bolt = 10,
    Bow = 11,
    Digging = 12,
    Hafted = 13,
    Polearm = 14,
    Sword = 15,
    Boots = 16,
    Gloves = 17,
    Helm = 18,
    Crown = 19,
    Shield = 20,
    Cloak = 21,
    SoftArmor = 22,
    HardArmor = 23,
    DragonArmor = 24,
    Light = 25,
    Amulet = 26,
    Ring = 27,
    Staff = 28,
    Wand = 29,
    Rod = 30,
    Scroll = 31,
    Potion = 32,
    Flask = 33,
    Food = 34,
    LifeBook = 35,
    SorceryBook = 36,
    NatureBook = 37,
    ChaosBook = 38,
    DeathBook = 39,
    TrumpBook = 40,
    ArcaneBook = 41,
    CrusadeBook = 42,
    HissatsuBook = 43,
}

impl ItemKind {
    pub const fn is_ammo(self) -> bool {
        matches!(self, ItemKind::Shot | ItemKind::Arrow | ItemKind::Bolt)
    }

    /// Launchers, diggers and melee weapons
    pub const fn is_weapon(self) -> bool {
        matches!(
            self,
            ItemKind::Bow
                | ItemKind::Digging
                | ItemKind::Hafted
                | ItemKind::Polearm
                | ItemKind::Sword
        )
    }

    pub const fn is_armour(self) -> bool {
        matches!(
            self,
            ItemKind::Boots
                | ItemKind::Gloves
                | ItemKind::Helm
                | ItemKind::Crown
                | ItemKind::Shield
                | ItemKind::Cloak
                | ItemKind::SoftArmor
                | ItemKind::HardArmor
                | ItemKind::DragonArmor
        )
    }

    pub const fn is_book(self) -> bool {
        matches!(
            self,
            ItemKind::LifeBook
                | ItemKind::SorceryBook
                | ItemKind::NatureBook
                | ItemKind::ChaosBook
                | ItemKind::DeathBook
                | ItemKind::TrumpBook
                | ItemKind::ArcaneBook
                | ItemKind::CrusadeBook
                | ItemKind::HissatsuBook
        )
    }

    /// Stacks of these share one pooled charge/timeout field
    pub const fn pools_charges(self) -> bool {
        matches!(self, ItemKind::Wand | ItemKind::Rod)
    }

    /// One-of-a-kind goods that never pile and never merge
    pub const fn is_singular(self) -> bool {
        matches!(
            self,
            ItemKind::Chest | ItemKind::Statue | ItemKind::Capture | ItemKind::Card
        )
    }

    /// The ware bit for this kind
    pub const fn ware(self) -> Wares {
        Wares::from_bits_retain(1u64 << self as u8)
    }
}

bitflags! {
    /// Set of item kinds a venue deals in
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Wares: u64 {
        const CHEST = 1 << ItemKind::Chest as u8;
        const FIGURINE = 1 << ItemKind::Figurine as u8;
        const STATUE = 1 << ItemKind::Statue as u8;
        const CAPTURE = 1 << ItemKind::Capture as u8;
        const CARD = 1 << ItemKind::Card as u8;
        const SPIKE = 1 << ItemKind::Spike as u8;
        const WHISTLE = 1 << ItemKind::Whistle as u8;
        const BOTTLE = 1 << ItemKind::Bottle as u8;
        const SHOT = 1 << ItemKind::Shot as u8;
        const ARROW = 1 << ItemKind::Arrow as u8;
        const BOLT = 1 << ItemKind::Bolt as u8;
        const BOW = 1 << ItemKind::Bow as u8;
        const DIGGING = 1 << ItemKind::Digging as u8;
        const HAFTED = 1 << ItemKind::Hafted as u8;
        const POLEARM = 1 << ItemKind::Polearm as u8;
        const SWORD = 1 << ItemKind::Sword as u8;
        const BOOTS = 1 << ItemKind::Boots as u8;
        const GLOVES = 1 << ItemKind::Gloves as u8;
        const HELM = 1 << ItemKind::Helm as u8;
        const CROWN = 1 << ItemKind::Crown as u8;
        const SHIELD = 1 << ItemKind::Shield as u8;
        const CLOAK = 1 << ItemKind::Cloak as u8;
        const SOFT_ARMOR = 1 << ItemKind::SoftArmor as u8;
        const HARD_ARMOR = 1 << ItemKind::HardArmor as u8;
        const DRAGON_ARMOR = 1 << ItemKind::DragonArmor as u8;
        const LIGHT = 1 << ItemKind::Light as u8;
        const AMULET = 1 << ItemKind::Amulet as u8;
        const RING = 1 << ItemKind::Ring as u8;
        const STAFF = 1 << ItemKind::Staff as u8;
        const WAND = 1 << ItemKind::Wand as u8;
        const ROD = 1 << ItemKind::Rod as u8;
        const SCROLL = 1 << ItemKind::Scroll as u8;
        const POTION = 1 << ItemKind::Potion as u8;
        const FLASK = 1 << ItemKind::Flask as u8;
        const FOOD = 1 << ItemKind::Food as u8;
        const LIFE_BOOK = 1 << ItemKind::LifeBook as u8;
        const SORCERY_BOOK = 1 << ItemKind::SorceryBook as u8;
        const NATURE_BOOK = 1 << ItemKind::NatureBook as u8;
        const CHAOS_BOOK = 1 << ItemKind::ChaosBook as u8;
        const DEATH_BOOK = 1 << ItemKind::DeathBook as u8;
        const TRUMP_BOOK = 1 << ItemKind::TrumpBook as u8;
        const ARCANE_BOOK = 1 << ItemKind::ArcaneBook as u8;
        const CRUSADE_BOOK = 1 << ItemKind::CrusadeBook as u8;
        const HISSATSU_BOOK = 1 << ItemKind::HissatsuBook as u8;

        const AMMO = Self::SHOT.bits() | Self::ARROW.bits() | Self::BOLT.bits();
        const BODY_ARMOUR = Self::SOFT_ARMOR.bits() | Self::HARD_ARMOR.bits() | Self::DRAGON_ARMOR.bits();
        const MAGE_BOOKS = Self::SORCERY_BOOK.bits()
            | Self::NATURE_BOOK.bits()
            | Self::CHAOS_BOOK.bits()
            | Self::DEATH_BOOK.bits()
            | Self::TRUMP_BOOK.bits()
            | Self::ARCANE_BOOK.bits();
        const DEVICES = Self::STAFF.bits() | Self::WAND.bits() | Self::ROD.bits();
    }
}

impl Wares {
    pub fn deals_in(self, kind: ItemKind) -> bool {
        self.contains(kind.ware())
    }
}
