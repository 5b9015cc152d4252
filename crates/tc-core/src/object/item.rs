//! Item instances and stack similarity

use serde::{Deserialize, Serialize};

use super::catalogue::{self, ArtifactId, EgoId, KindDef, KindId};
use super::ItemKind;
use crate::consts::{MAX_QUANTITY, MAX_ROD_TIMEOUT, MAX_STACK};

/// A stack of identical items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub kind: KindId,
    /// Units in the stack (1..=255 while held anywhere)
    pub quantity: u8,
    /// Charges, rod timeout, light fuel or magical bonus; pooled across the
    /// stack for wands and rods
    pub pval: i32,
    pub to_h: i16,
    pub to_d: i16,
    pub to_a: i16,
    pub dd: u8,
    pub ds: u8,
    pub ac: i16,
    /// Remaining recharge time
    pub timeout: i32,
    pub ego: Option<EgoId>,
    pub artifact: Option<ArtifactId>,
    /// Name of a randomly generated artifact
    pub random_artifact: Option<String>,
    pub blessed: bool,
    /// Percentage knocked off the value (0, 25, 50, 75 or 90)
    pub discount: u8,
    /// A shop agreed a floor price for this stack during the visit
    pub price_fixed: bool,
    pub inscription: Option<String>,
}

impl Item {
    /// A single plain unit of `kind`
    pub fn new(kind: KindId) -> Self {
        let def = catalogue::kind_def(kind);
        Self {
            kind,
            quantity: 1,
            pval: def.pval,
            to_h: 0,
            to_d: 0,
            to_a: 0,
            dd: def.dd,
            ds: def.ds,
            ac: def.ac,
            timeout: 0,
            ego: None,
            artifact: None,
            random_artifact: None,
            blessed: false,
            discount: 0,
            price_fixed: false,
            inscription: None,
        }
    }

    pub fn with_quantity(mut self, quantity: u8) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn def(&self) -> &'static KindDef {
        catalogue::kind_def(self.kind)
    }

    pub fn item_kind(&self) -> ItemKind {
        self.def().kind
    }

    pub fn sval(&self) -> u8 {
        self.def().sval
    }

    /// Fixed or random artifact
    pub fn is_artifact(&self) -> bool {
        self.artifact.is_some() || self.random_artifact.is_some()
    }

    /// Carries a named enchantment of any sort
    pub fn is_named(&self) -> bool {
        self.is_artifact() || self.ego.is_some()
    }

    /// Largest stack the strict shop relation allows for this item
    pub fn shop_stack_limit(&self) -> u8 {
        if self.item_kind() == ItemKind::Rod {
            let per_unit = self.def().pval.max(1);
            (MAX_ROD_TIMEOUT / per_unit).clamp(1, MAX_STACK as i32) as u8
        } else {
            MAX_STACK
        }
    }

    /// Shop stacking rule: identical goods at an identical discount
    pub fn store_similar(&self, other: &Item) -> bool {
        if self.kind != other.kind {
            return false;
        }
        if self.pval != other.pval && !self.item_kind().pools_charges() {
            return false;
        }
        if self.to_h != other.to_h || self.to_d != other.to_d || self.to_a != other.to_a {
            return false;
        }
        if self.ego != other.ego || self.is_artifact() || other.is_artifact() {
            return false;
        }
        if self.timeout != 0 || other.timeout != 0 {
            return false;
        }
        if self.ac != other.ac || self.dd != other.dd || self.ds != other.ds {
            return false;
        }
        if self.blessed != other.blessed {
            return false;
        }
        if self.item_kind().is_singular() {
            return false;
        }
        self.discount == other.discount
    }

    /// Pack, home and museum stacking rule
    ///
    /// Looser than [`Item::store_similar`]: recharging rods may stack and
    /// inscriptions only have to agree when both sides carry one.
    pub fn stacks_with(&self, other: &Item) -> bool {
        if self.kind != other.kind || self.item_kind().is_singular() {
            return false;
        }
        if self.is_artifact() || other.is_artifact() {
            return false;
        }
        let pooled = self.item_kind().pools_charges();
        if self.pval != other.pval && !pooled {
            return false;
        }
        if (self.timeout != 0 || other.timeout != 0) && self.item_kind() != ItemKind::Rod {
            return false;
        }
        if self.to_h != other.to_h || self.to_d != other.to_d || self.to_a != other.to_a {
            return false;
        }
        if self.ego != other.ego || self.blessed != other.blessed {
            return false;
        }
        if self.ac != other.ac || self.dd != other.dd || self.ds != other.ds {
            return false;
        }
        if let (Some(a), Some(b)) = (&self.inscription, &other.inscription) {
            if a != b {
                return false;
            }
        }
        if self.quantity as u32 + other.quantity as u32 > MAX_STACK as u32 {
            return false;
        }
        self.discount == other.discount
    }

    /// Merge `other` into `self` under the general stacking rule
    pub fn absorb_general(&mut self, other: &Item) {
        let total = (self.quantity as u32 + other.quantity as u32).min(MAX_STACK as u32);
        self.quantity = total as u8;
        if self.item_kind().pools_charges() {
            self.pval += other.pval;
        }
        if self.item_kind() == ItemKind::Rod {
            self.timeout += other.timeout;
        }
        if self.inscription.is_none() {
            self.inscription = other.inscription.clone();
        }
    }

    /// Merge `other` into `self` under the shop stacking rule
    ///
    /// The result is capped at [`Item::shop_stack_limit`]; units that do not
    /// fit are dropped along with their share of pooled charges.
    pub fn absorb_store(&mut self, other: &Item) {
        let limit = self.shop_stack_limit() as i32;
        let total = self.quantity as i32 + other.quantity as i32;
        let overflow = (total - limit).max(0);
        self.quantity = total.min(limit) as u8;
        if self.item_kind().pools_charges() && other.quantity > 0 {
            let kept = other.quantity as i32 - overflow;
            self.pval += other.pval * kept / other.quantity as i32;
        }
    }

    /// Split `amount` units off the stack, moving their share of pooled charges
    ///
    /// The returned item carries the split units; `self` keeps the rest and may
    /// end up with quantity 0.
    pub fn split_off(&mut self, amount: u8) -> Item {
        let amount = amount.min(self.quantity);
        let mut part = self.clone();
        part.quantity = amount;
        if self.item_kind().pools_charges() && self.quantity > 0 {
            part.pval = self.pval * amount as i32 / self.quantity as i32;
            self.pval -= part.pval;
            if self.item_kind() == ItemKind::Rod && self.timeout > 0 {
                part.timeout = self.timeout * amount as i32 / self.quantity as i32;
                self.timeout -= part.timeout;
            }
        }
        self.quantity -= amount;
        part
    }

    /// Change the quantity by `delta`, clamped to what a stack can hold
    pub fn adjust_quantity(&mut self, delta: i32) -> i32 {
        let target = (self.quantity as i32 + delta).clamp(0, MAX_QUANTITY);
        let applied = target - self.quantity as i32;
        self.quantity = target as u8;
        applied
    }

    /// Display name without quantity
    pub fn name(&self) -> String {
        let def = self.def();
        let mut name = def.name.to_string();
        if let Some(art) = self.artifact.and_then(catalogue::artifact_def) {
            name.push(' ');
            name.push_str(art.name);
        } else if let Some(randart) = &self.random_artifact {
            name.push(' ');
            name.push_str(randart);
        } else if let Some(ego) = self.ego.and_then(catalogue::ego_def) {
            name.push(' ');
            name.push_str(ego.name);
        }

        let kind = def.kind;
        if kind.is_weapon() || kind.is_ammo() {
            if self.dd > 0 {
                name.push_str(&format!(" ({}d{})", self.dd, self.ds));
            }
            name.push_str(&format!(" ({:+},{:+})", self.to_h, self.to_d));
        }
        if kind.is_armour() || (kind == ItemKind::Ring && self.to_a != 0) {
            name.push_str(&format!(" [{},{:+}]", self.ac, self.to_a));
        }
        match kind {
            ItemKind::Wand | ItemKind::Staff => {
                name.push_str(&format!(" ({} charges)", self.pval));
            }
            ItemKind::Rod if self.timeout > 0 => name.push_str(" (charging)"),
            ItemKind::Light if self.artifact.is_none() => {
                name.push_str(&format!(" ({} turns of light)", self.pval));
            }
            _ => {}
        }
        if let Some(note) = &self.inscription {
            name.push_str(&format!(" {{{note}}}"));
        }
        name
    }

    /// Display name with quantity
    pub fn describe(&self) -> String {
        if self.quantity == 1 {
            self.name()
        } else {
            format!("{} x {}", self.quantity, self.name())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::catalogue::lookup;

    fn item(kind: ItemKind, sval: u8) -> Item {
        Item::new(lookup(kind, sval).unwrap())
    }

    #[test]
    fn test_store_similar_requires_equal_discount() {
        let a = item(ItemKind::Food, 1);
        let mut b = a.clone();
        assert!(a.store_similar(&b));
        b.discount = 25;
        assert!(!a.store_similar(&b));
    }

    #[test]
    fn test_store_similar_rejects_artifacts_and_singulars() {
        let mut sword = item(ItemKind::Sword, 1);
        let plain = sword.clone();
        sword.artifact = Some(ArtifactId(1));
        assert!(!sword.store_similar(&plain));
        assert!(!plain.store_similar(&sword));

        let statue = item(ItemKind::Statue, 1);
        assert!(!statue.store_similar(&statue.clone()));
    }

    #[test]
    fn test_wands_with_different_charges_stack() {
        let mut a = item(ItemKind::Wand, 1);
        let mut b = a.clone();
        a.pval = 5;
        b.pval = 9;
        assert!(a.store_similar(&b));
        assert!(a.stacks_with(&b));

        let mut s = item(ItemKind::Staff, 1);
        let t = s.clone();
        s.pval = 3;
        assert!(!s.store_similar(&t));
    }

    #[test]
    fn test_recharging_rods_stack_only_in_general_rule() {
        let mut a = item(ItemKind::Rod, 1);
        let b = a.clone();
        a.timeout = 20;
        assert!(!a.store_similar(&b));
        assert!(a.stacks_with(&b));
    }

    #[test]
    fn test_conflicting_inscriptions_block_general_stacking() {
        let mut a = item(ItemKind::Scroll, 2);
        let mut b = a.clone();
        a.inscription = Some("@r1".into());
        assert!(a.stacks_with(&b));
        b.inscription = Some("@r2".into());
        assert!(!a.stacks_with(&b));
    }

    #[test]
    fn test_split_off_moves_proportional_charges() {
        let mut wand = item(ItemKind::Wand, 1).with_quantity(4);
        wand.pval = 40;
        let part = wand.split_off(1);
        assert_eq!(part.quantity, 1);
        assert_eq!(part.pval, 10);
        assert_eq!(wand.quantity, 3);
        assert_eq!(wand.pval, 30);
    }

    #[test]
    fn test_absorb_store_caps_and_splits_charges() {
        let mut a = item(ItemKind::Wand, 1).with_quantity(98);
        a.pval = 98;
        let mut b = a.clone().with_quantity(4);
        b.pval = 8;
        a.absorb_store(&b);
        assert_eq!(a.quantity, 99);
        assert_eq!(a.pval, 98 + 2);
    }

    #[test]
    fn test_adjust_quantity_clamps() {
        let mut food = item(ItemKind::Food, 1).with_quantity(250);
        assert_eq!(food.adjust_quantity(10), 5);
        assert_eq!(food.quantity, 255);
        assert_eq!(food.adjust_quantity(-300), -255);
        assert_eq!(food.quantity, 0);
    }

    #[test]
    fn test_rod_stack_limit_follows_timeout() {
        let rod = item(ItemKind::Rod, 3);
        assert_eq!(rod.shop_stack_limit(), 99);
        let arrow = item(ItemKind::Arrow, 1);
        assert_eq!(arrow.shop_stack_limit(), MAX_STACK);
    }

    #[test]
    fn test_names_show_modifiers() {
        let mut sword = item(ItemKind::Sword, 1);
        sword.to_h = 3;
        sword.to_d = -1;
        assert_eq!(sword.name(), "Dagger (1d4) (+3,-1)");
        let rations = item(ItemKind::Food, 1).with_quantity(5);
        assert_eq!(rations.describe(), "5 x Ration of Food");
    }
}
