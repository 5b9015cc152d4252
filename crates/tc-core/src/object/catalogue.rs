//! Static item tables
//!
//! Kind, ego and artifact definitions consumed read-only by the stock
//! generator and the valuation code.

use serde::{Deserialize, Serialize};

use super::{ItemKind, Wares};

/// Index into [`KINDS`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct KindId(u16);

impl KindId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index into [`EGOS`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EgoId(pub u8);

/// Index into [`ARTIFACTS`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtifactId(pub u8);

/// Template for every item of one kind
#[derive(Debug, Clone, Copy)]
pub struct KindDef {
    pub kind: ItemKind,
    pub sval: u8,
    pub name: &'static str,
    /// Base value of one unit
    pub cost: i64,
    /// Charges, rod timeout or light fuel per unit
    pub pval: i32,
    /// Shallowest generation depth
    pub level: i32,
    pub dd: u8,
    pub ds: u8,
    pub ac: i16,
}

const fn kind(kind: ItemKind, sval: u8, name: &'static str, cost: i64, level: i32) -> KindDef {
    KindDef {
        kind,
        sval,
        name,
        cost,
        pval: 0,
        level,
        dd: 0,
        ds: 0,
        ac: 0,
    }
}

const fn weapon(kind: ItemKind, sval: u8, name: &'static str, cost: i64, level: i32, dd: u8, ds: u8) -> KindDef {
    KindDef {
        kind,
        sval,
        name,
        cost,
        pval: 0,
        level,
        dd,
        ds,
        ac: 0,
    }
}

const fn armour(kind: ItemKind, sval: u8, name: &'static str, cost: i64, level: i32, ac: i16) -> KindDef {
    KindDef {
        kind,
        sval,
        name,
        cost,
        pval: 0,
        level,
        dd: 0,
        ds: 0,
        ac,
    }
}

const fn charged(kind: ItemKind, sval: u8, name: &'static str, cost: i64, level: i32, pval: i32) -> KindDef {
    KindDef {
        kind,
        sval,
        name,
        cost,
        pval,
        level,
        dd: 0,
        ds: 0,
        ac: 0,
    }
}

pub const SV_POTION_WATER: u8 = 1;
pub const SV_WIZSTAFF: u8 = 5;
pub const SV_SCROLL_STAR_IDENTIFY: u8 = 6;
pub const SV_SCROLL_STAR_REMOVE_CURSE: u8 = 7;

pub static KINDS: &[KindDef] = &[
    kind(ItemKind::Chest, 1, "Small wooden chest", 20, 5),
    kind(ItemKind::Figurine, 1, "Figurine", 45, 10),
    kind(ItemKind::Statue, 1, "Statue", 100, 1),
    kind(ItemKind::Capture, 1, "Monster Ball", 1000, 15),
    kind(ItemKind::Card, 1, "Express Card", 2000, 30),
    kind(ItemKind::Spike, 1, "Iron Spike", 1, 1),
    kind(ItemKind::Whistle, 1, "Whistle", 35, 10),
    kind(ItemKind::Bottle, 1, "Empty Bottle", 0, 1),
    weapon(ItemKind::Shot, 1, "Iron Shot", 1, 3, 1, 4),
    weapon(ItemKind::Arrow, 1, "Arrow", 1, 3, 1, 4),
    weapon(ItemKind::Arrow, 2, "Seeker Arrow", 20, 55, 4, 4),
    weapon(ItemKind::Bolt, 1, "Bolt", 2, 3, 1, 5),
    weapon(ItemKind::Bow, 1, "Sling", 5, 1, 0, 0),
    weapon(ItemKind::Bow, 2, "Short Bow", 50, 3, 0, 0),
    weapon(ItemKind::Bow, 3, "Long Bow", 80, 10, 0, 0),
    weapon(ItemKind::Bow, 4, "Light Crossbow", 140, 15, 0, 0),
    weapon(ItemKind::Digging, 1, "Shovel", 10, 1, 1, 2),
    weapon(ItemKind::Digging, 2, "Pick", 50, 5, 1, 3),
    weapon(ItemKind::Hafted, 1, "Whip", 30, 3, 1, 3),
    weapon(ItemKind::Hafted, 2, "Mace", 130, 5, 2, 4),
    weapon(ItemKind::Hafted, 3, "War Hammer", 225, 5, 3, 3),
    weapon(ItemKind::Hafted, 4, "Quarterstaff", 200, 10, 1, 9),
    weapon(ItemKind::Hafted, SV_WIZSTAFF, "Wizardstaff", 2000, 20, 2, 6),
    weapon(ItemKind::Polearm, 1, "Spear", 36, 5, 1, 6),
    weapon(ItemKind::Polearm, 2, "Awl-Pike", 200, 8, 1, 8),
    weapon(ItemKind::Polearm, 3, "Lance", 230, 10, 2, 8),
    weapon(ItemKind::Sword, 1, "Dagger", 10, 1, 1, 4),
    weapon(ItemKind::Sword, 2, "Main Gauche", 25, 3, 1, 5),
    weapon(ItemKind::Sword, 3, "Rapier", 42, 5, 1, 6),
    weapon(ItemKind::Sword, 4, "Short Sword", 80, 5, 1, 7),
    weapon(ItemKind::Sword, 5, "Cutlass", 85, 5, 1, 8),
    weapon(ItemKind::Sword, 6, "Long Sword", 300, 10, 2, 5),
    armour(ItemKind::Boots, 1, "Pair of Soft Leather Boots", 4, 1, 2),
    armour(ItemKind::Boots, 2, "Pair of Hard Leather Boots", 12, 5, 3),
    armour(ItemKind::Gloves, 1, "Set of Leather Gloves", 3, 1, 1),
    armour(ItemKind::Gloves, 2, "Set of Gauntlets", 35, 10, 3),
    armour(ItemKind::Helm, 1, "Hard Leather Cap", 12, 2, 2),
    armour(ItemKind::Helm, 2, "Metal Cap", 30, 10, 3),
    armour(ItemKind::Crown, 1, "Iron Crown", 500, 45, 0),
    armour(ItemKind::Shield, 1, "Small Leather Shield", 5, 3, 2),
    armour(ItemKind::Shield, 2, "Large Leather Shield", 120, 15, 8),
    armour(ItemKind::Cloak, 1, "Cloak", 1, 1, 1),
    armour(ItemKind::Cloak, 2, "Fur Cloak", 50, 10, 3),
    armour(ItemKind::SoftArmor, 1, "Robe", 2, 1, 2),
    armour(ItemKind::SoftArmor, 2, "Soft Leather Armour", 18, 1, 8),
    armour(ItemKind::SoftArmor, 3, "Hard Leather Armour", 150, 5, 16),
    armour(ItemKind::HardArmor, 1, "Metal Scale Mail", 550, 25, 38),
    armour(ItemKind::HardArmor, 2, "Chain Mail", 750, 25, 32),
    armour(ItemKind::DragonArmor, 1, "Blue Dragon Scale Mail", 35000, 40, 30),
    charged(ItemKind::Light, 1, "Wooden Torch", 1, 1, 5000),
    charged(ItemKind::Light, 2, "Brass Lantern", 100, 5, 7500),
    kind(ItemKind::Amulet, 1, "Amulet of Slow Digestion", 200, 15),
    kind(ItemKind::Amulet, 2, "Amulet of Resist Lightning", 300, 15),
    kind(ItemKind::Ring, 1, "Ring of Protection", 500, 10),
    kind(ItemKind::Ring, 2, "Ring of Levitation", 200, 5),
    charged(ItemKind::Staff, 1, "Staff of Detect Evil", 350, 20, 12),
    charged(ItemKind::Staff, 2, "Staff of Light", 250, 5, 15),
    charged(ItemKind::Staff, 3, "Staff of Mapping", 700, 20, 10),
    charged(ItemKind::Wand, 1, "Wand of Magic Missile", 100, 3, 14),
    charged(ItemKind::Wand, 2, "Wand of Stinking Cloud", 400, 5, 12),
    charged(ItemKind::Wand, 3, "Wand of Stone to Mud", 300, 10, 8),
    charged(ItemKind::Rod, 1, "Rod of Treasure Location", 1000, 5, 50),
    charged(ItemKind::Rod, 2, "Rod of Light", 500, 10, 10),
    charged(ItemKind::Rod, 3, "Rod of Detection", 5000, 30, 99),
    kind(ItemKind::Scroll, 1, "Scroll of Word of Recall", 150, 15),
    kind(ItemKind::Scroll, 2, "Scroll of Identify", 50, 1),
    kind(ItemKind::Scroll, 3, "Scroll of Light", 15, 0),
    kind(ItemKind::Scroll, 4, "Scroll of Phase Door", 15, 1),
    kind(ItemKind::Scroll, 5, "Scroll of Remove Curse", 100, 10),
    kind(ItemKind::Scroll, SV_SCROLL_STAR_IDENTIFY, "Scroll of *Identify*", 1000, 30),
    kind(ItemKind::Scroll, SV_SCROLL_STAR_REMOVE_CURSE, "Scroll of *Remove Curse*", 8000, 50),
    kind(ItemKind::Scroll, 8, "Scroll of Enchant Weapon To-Hit", 125, 15),
    kind(ItemKind::Scroll, 9, "Scroll of Enchant Armour", 125, 15),
    kind(ItemKind::Potion, SV_POTION_WATER, "Potion of Water", 1, 1),
    kind(ItemKind::Potion, 2, "Potion of Cure Light Wounds", 20, 1),
    kind(ItemKind::Potion, 3, "Potion of Cure Serious Wounds", 40, 3),
    kind(ItemKind::Potion, 4, "Potion of Heroism", 35, 1),
    kind(ItemKind::Potion, 5, "Potion of Speed", 75, 1),
    kind(ItemKind::Potion, 6, "Potion of Restore Mana", 350, 25),
    kind(ItemKind::Flask, 1, "Flask of Oil", 3, 1),
    kind(ItemKind::Food, 1, "Ration of Food", 3, 0),
    kind(ItemKind::Food, 2, "Hard Biscuit", 1, 0),
    kind(ItemKind::Food, 3, "Strip of Venison", 2, 0),
    kind(ItemKind::Food, 4, "Pint of Fine Wine", 1, 0),
    kind(ItemKind::LifeBook, 1, "[Novice's Handbook]", 25, 5),
    kind(ItemKind::LifeBook, 2, "[Words of Wisdom]", 100, 10),
    kind(ItemKind::SorceryBook, 1, "[Beginner's Handbook]", 25, 5),
    kind(ItemKind::SorceryBook, 2, "[Master Sorcerer's Handbook]", 100, 10),
    kind(ItemKind::NatureBook, 1, "[Call of the Wild]", 25, 5),
    kind(ItemKind::NatureBook, 2, "[Nature Mastery]", 100, 10),
    kind(ItemKind::ChaosBook, 1, "[Sign of Chaos]", 25, 5),
    kind(ItemKind::ChaosBook, 2, "[Chaos Mastery]", 100, 10),
    kind(ItemKind::DeathBook, 1, "[Black Prayers]", 25, 5),
    kind(ItemKind::DeathBook, 2, "[Black Mass]", 100, 10),
    kind(ItemKind::TrumpBook, 1, "[Conjurings and Tricks]", 25, 5),
    kind(ItemKind::TrumpBook, 2, "[Deck of Many Things]", 100, 10),
    kind(ItemKind::ArcaneBook, 1, "[Cantrips for Beginners]", 25, 5),
    kind(ItemKind::ArcaneBook, 2, "[Minor Arcana]", 100, 10),
    kind(ItemKind::CrusadeBook, 1, "[Call of Crusade]", 25, 5),
    kind(ItemKind::CrusadeBook, 2, "[Oath of Steel]", 100, 10),
    kind(ItemKind::HissatsuBook, 1, "[Art of Swordsmanship]", 25, 5),
];

/// Named enchantment applied on top of a base kind
#[derive(Debug, Clone, Copy)]
pub struct EgoDef {
    pub name: &'static str,
    pub cost: i64,
    pub applies_to: Wares,
}

pub static EGOS: &[EgoDef] = &[
    EgoDef {
        name: "(Holy Avenger)",
        cost: 20000,
        applies_to: Wares::SWORD.union(Wares::POLEARM).union(Wares::HAFTED),
    },
    EgoDef {
        name: "(Defender)",
        cost: 15000,
        applies_to: Wares::SWORD.union(Wares::POLEARM).union(Wares::HAFTED),
    },
    EgoDef {
        name: "of Slay Evil",
        cost: 500,
        applies_to: Wares::SWORD
            .union(Wares::POLEARM)
            .union(Wares::HAFTED)
            .union(Wares::AMMO),
    },
    EgoDef {
        name: "of Power",
        cost: 1200,
        applies_to: Wares::BOW,
    },
    EgoDef {
        name: "of Resistance",
        cost: 12500,
        applies_to: Wares::BODY_ARMOUR.union(Wares::SHIELD),
    },
    EgoDef {
        name: "of Elvenkind",
        cost: 15000,
        applies_to: Wares::BODY_ARMOUR.union(Wares::CLOAK).union(Wares::BOOTS),
    },
    EgoDef {
        name: "of Free Action",
        cost: 1000,
        applies_to: Wares::GLOVES,
    },
];

/// Unique named item
#[derive(Debug, Clone, Copy)]
pub struct ArtifactDef {
    pub name: &'static str,
    pub kind: ItemKind,
    pub sval: u8,
    pub cost: i64,
}

pub static ARTIFACTS: &[ArtifactDef] = &[
    ArtifactDef {
        name: "of Galadriel",
        kind: ItemKind::Light,
        sval: 2,
        cost: 10000,
    },
    ArtifactDef {
        name: "'Sting'",
        kind: ItemKind::Sword,
        sval: 1,
        cost: 100000,
    },
    ArtifactDef {
        name: "'Grond'",
        kind: ItemKind::Hafted,
        sval: 3,
        cost: 500000,
    },
];

/// Definition for a kind id
pub fn kind_def(id: KindId) -> &'static KindDef {
    &KINDS[id.index()]
}

/// Find the kind id for a (kind, sub-kind) pair
pub fn lookup(kind: ItemKind, sval: u8) -> Option<KindId> {
    KINDS
        .iter()
        .position(|def| def.kind == kind && def.sval == sval)
        .map(|idx| KindId(idx as u16))
}

/// Every kind id, in catalogue order
pub fn all_kinds() -> impl Iterator<Item = KindId> {
    (0..KINDS.len()).map(|idx| KindId(idx as u16))
}

pub fn ego_def(id: EgoId) -> Option<&'static EgoDef> {
    EGOS.get(id.0 as usize)
}

pub fn artifact_def(id: ArtifactId) -> Option<&'static ArtifactDef> {
    ARTIFACTS.get(id.0 as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_kind_sval_pairs_are_unique() {
        let mut seen = HashSet::new();
        for def in KINDS {
            assert!(seen.insert((def.kind, def.sval)), "duplicate {}", def.name);
        }
    }

    #[test]
    fn test_lookup_round_trips() {
        for id in all_kinds() {
            let def = kind_def(id);
            assert_eq!(lookup(def.kind, def.sval), Some(id));
        }
        assert_eq!(lookup(ItemKind::Crown, 9), None);
    }

    #[test]
    fn test_rods_have_timeouts() {
        for def in KINDS.iter().filter(|d| d.kind == ItemKind::Rod) {
            assert!(def.pval > 0, "{} needs a timeout", def.name);
        }
    }

    #[test]
    fn test_artifacts_reference_real_kinds() {
        for art in ARTIFACTS {
            assert!(lookup(art.kind, art.sval).is_some(), "{}", art.name);
        }
    }
}
