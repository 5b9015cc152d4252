//! Item generation service
//!
//! Shops never craft items themselves; they ask an [`ItemSource`] for a kind
//! at a depth and for a finished item of that kind.

use super::catalogue::{self, EgoId, KindId, EGOS};
use super::{Item, ItemKind};
use crate::rng::GameRng;

/// Supplier of freshly generated items
pub trait ItemSource {
    /// Pick a random kind appropriate for `depth`
    fn pick_kind(&mut self, rng: &mut GameRng, depth: i32) -> Option<KindId>;

    /// Build one item of `kind` with magic appropriate for `depth`
    fn make(&mut self, rng: &mut GameRng, kind: KindId, depth: i32) -> Item;
}

/// Catalogue-backed generator used by the game
///
/// Never produces fixed artifacts.
#[derive(Debug, Clone, Default)]
pub struct Forge;

const RANDOM_ARTIFACT_NAMES: &[&str] = &[
    "'Bitterwind'",
    "of Hollow Stars",
    "'Emberfang'",
    "of the Grey Road",
    "'Nightglass'",
    "of Quiet Wrath",
];

/// Depth from which the forge occasionally produces a random artifact
const RANDOM_ARTIFACT_DEPTH: i32 = 40;

impl Forge {
    fn enchant(rng: &mut GameRng, depth: i32) -> i16 {
        (rng.rnd(5) as i32 + depth / 10) as i16
    }

    fn apply_magic(rng: &mut GameRng, item: &mut Item, depth: i32) {
        let kind = item.item_kind();
        let good_chance = (10 + depth).min(75) as u32;

        if kind.is_weapon() || kind.is_ammo() {
            if rng.percent(good_chance) {
                item.to_h = Self::enchant(rng, depth);
                item.to_d = Self::enchant(rng, depth);
                if depth >= 10 && rng.one_in(10) {
                    item.ego = Self::pick_ego(rng, kind);
                }
            } else if rng.percent(10) {
                item.to_h = -Self::enchant(rng, depth);
                item.to_d = -Self::enchant(rng, depth);
            }
            if matches!(kind, ItemKind::Sword | ItemKind::Polearm) && rng.one_in(20) {
                item.blessed = true;
            }
        } else if kind.is_armour() {
            if rng.percent(good_chance) {
                item.to_a = Self::enchant(rng, depth);
                if depth >= 10 && rng.one_in(10) {
                    item.ego = Self::pick_ego(rng, kind);
                }
            } else if rng.percent(10) {
                item.to_a = -Self::enchant(rng, depth);
            }
        } else {
            match kind {
                ItemKind::Wand | ItemKind::Staff => {
                    let base = item.def().pval.max(2);
                    item.pval = base / 2 + rng.rnd((base / 2) as u32) as i32;
                }
                ItemKind::Ring if item.sval() == 1 => {
                    item.to_a = Self::enchant(rng, depth);
                }
                _ => {}
            }
        }

        if depth >= RANDOM_ARTIFACT_DEPTH
            && (kind.is_weapon() || kind.is_armour())
            && item.ego.is_none()
            && rng.one_in(50)
        {
            item.random_artifact = rng.choose(RANDOM_ARTIFACT_NAMES).map(|n| n.to_string());
            item.to_h = item.to_h.abs();
            item.to_d = item.to_d.abs();
            item.to_a = item.to_a.abs();
        }
    }

    fn pick_ego(rng: &mut GameRng, kind: ItemKind) -> Option<EgoId> {
        let candidates: Vec<usize> = EGOS
            .iter()
            .enumerate()
            .filter(|(_, ego)| ego.applies_to.deals_in(kind))
            .map(|(idx, _)| idx)
            .collect();
        rng.choose(&candidates).map(|&idx| EgoId(idx as u8))
    }
}

impl ItemSource for Forge {
    fn pick_kind(&mut self, rng: &mut GameRng, depth: i32) -> Option<KindId> {
        let candidates: Vec<KindId> = catalogue::all_kinds()
            .filter(|&id| {
                let def = catalogue::kind_def(id);
                def.level <= depth && def.cost > 0
            })
            .collect();
        rng.choose(&candidates).copied()
    }

    fn make(&mut self, rng: &mut GameRng, kind: KindId, depth: i32) -> Item {
        let mut item = Item::new(kind);
        Self::apply_magic(rng, &mut item, depth);
        item
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_kind_respects_depth() {
        let mut rng = GameRng::new(3);
        let mut forge = Forge;
        for _ in 0..200 {
            let id = forge.pick_kind(&mut rng, 1).unwrap();
            assert!(catalogue::kind_def(id).level <= 1);
        }
    }

    #[test]
    fn test_forge_never_makes_fixed_artifacts() {
        let mut rng = GameRng::new(11);
        let mut forge = Forge;
        for _ in 0..500 {
            let id = forge.pick_kind(&mut rng, 50).unwrap();
            let item = forge.make(&mut rng, id, 50);
            assert!(item.artifact.is_none());
            assert_eq!(item.quantity, 1);
        }
    }

    #[test]
    fn test_wands_get_charges() {
        let mut rng = GameRng::new(5);
        let mut forge = Forge;
        let id = catalogue::lookup(ItemKind::Wand, 1).unwrap();
        for _ in 0..50 {
            assert!(forge.make(&mut rng, id, 5).pval > 0);
        }
    }
}
