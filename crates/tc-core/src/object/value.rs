//! Item valuation
//!
//! Value of a single unit as a shopkeeper sees it (every shop item is fully
//! identified).

use super::catalogue;
use super::{Item, ItemKind};

/// Flat premium of a randomly generated artifact over its base kind
const RANDOM_ARTIFACT_PREMIUM: i64 = 5000;

impl Item {
    /// Value of one unit before any discount
    pub fn real_value(&self) -> i64 {
        let def = self.def();
        if def.cost <= 0 {
            return 0;
        }

        let mut value = def.cost;
        if let Some(art) = self.artifact {
            match catalogue::artifact_def(art) {
                Some(art) if art.cost > 0 => value = art.cost,
                _ => return 0,
            }
        } else if self.random_artifact.is_some() {
            value += RANDOM_ARTIFACT_PREMIUM;
        } else if let Some(ego) = self.ego {
            match catalogue::ego_def(ego) {
                Some(ego) if ego.cost > 0 => value += ego.cost,
                _ => return 0,
            }
        }

        let to_h = self.to_h as i64;
        let to_d = self.to_d as i64;
        let to_a = self.to_a as i64;
        let kind = def.kind;
        match kind {
            ItemKind::Wand => {
                let per_unit = self.pval as i64 / self.quantity.max(1) as i64;
                value += (value / 20) * per_unit;
            }
            ItemKind::Staff => {
                value += (value / 20) * self.pval as i64;
            }
            ItemKind::Ring | ItemKind::Amulet => {
                if to_h + to_d + to_a < 0 {
                    return 0;
                }
                value += (to_h + to_d + to_a) * 200;
            }
            _ if kind.is_ammo() => {
                if to_h + to_d < 0 {
                    return 0;
                }
                value += (to_h + to_d) * 5;
            }
            _ if kind.is_weapon() => {
                if to_h + to_d < 0 {
                    return 0;
                }
                value += (to_h + to_d + to_a) * 100;
                if self.dd > def.dd && self.ds == def.ds {
                    value += (self.dd - def.dd) as i64 * self.ds as i64 * 250;
                }
            }
            _ if kind.is_armour() => {
                if to_a < 0 {
                    return 0;
                }
                value += (to_h + to_d + to_a) * 100;
            }
            _ => {}
        }
        value.max(0)
    }

    /// Value of one unit after the stack's discount
    pub fn value(&self) -> i64 {
        let value = self.real_value();
        value - value * self.discount as i64 / 100
    }
}
