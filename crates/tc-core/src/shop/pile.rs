//! Pile sizing and discounts for fresh stock

use crate::consts::MIN_DISCOUNT_VALUE;
use crate::object::catalogue::{SV_SCROLL_STAR_IDENTIFY, SV_SCROLL_STAR_REMOVE_CURSE};
use crate::object::{Item, ItemKind};
use crate::rng::GameRng;

use super::ShopCategory;

/// Sum of `rolls` draws from `0..max`
pub fn mass_roll(rng: &mut GameRng, rolls: u32, max: u32) -> u32 {
    (0..rolls).map(|_| rng.rn2(max)).sum()
}

/// Extra units stocked on top of the first one
fn extra_units(rng: &mut GameRng, item: &Item, category: ShopCategory) -> u32 {
    let cost = item.value();
    let kind = item.item_kind();
    match kind {
        ItemKind::Food | ItemKind::Flask | ItemKind::Light => {
            let mut extra = 0;
            if cost <= 5 {
                extra += mass_roll(rng, 3, 5);
            }
            if cost <= 20 {
                extra += mass_roll(rng, 3, 5);
            }
            extra
        }
        ItemKind::Potion | ItemKind::Scroll => {
            let mut extra = 0;
            if cost <= 60 {
                extra += mass_roll(rng, 3, 5);
            }
            if cost <= 240 {
                extra += mass_roll(rng, 1, 5);
            }
            if kind == ItemKind::Scroll {
                match item.sval() {
                    SV_SCROLL_STAR_IDENTIFY => extra += mass_roll(rng, 3, 5),
                    SV_SCROLL_STAR_REMOVE_CURSE => extra += mass_roll(rng, 1, 5),
                    _ => {}
                }
            }
            extra
        }
        _ if kind.is_book() => {
            let mut extra = 0;
            if cost <= 50 {
                extra += mass_roll(rng, 2, 3);
            }
            if cost <= 500 {
                extra += mass_roll(rng, 1, 3);
            }
            extra
        }
        _ if kind.is_weapon() || kind.is_armour() => {
            let mut extra = 0;
            if cost <= 10 {
                extra += mass_roll(rng, 3, 5);
            }
            if cost <= 100 {
                extra += mass_roll(rng, 3, 5);
            }
            extra
        }
        _ if kind.is_ammo() || kind == ItemKind::Spike => {
            let mut extra = 0;
            for ceiling in [5, 50, 500] {
                if cost <= ceiling {
                    extra += mass_roll(rng, 5, 5);
                }
            }
            extra
        }
        ItemKind::Figurine => {
            let mut extra = 0;
            if cost <= 100 {
                extra += mass_roll(rng, 2, 2);
            }
            if cost <= 1000 {
                extra += mass_roll(rng, 2, 2);
            }
            extra
        }
        ItemKind::Rod | ItemKind::Wand | ItemKind::Staff => {
            if category == ShopCategory::BlackMarket && rng.one_in(3) {
                if cost < 1601 {
                    mass_roll(rng, 1, 5)
                } else if cost < 3201 {
                    mass_roll(rng, 1, 3)
                } else {
                    0
                }
            } else {
                0
            }
        }
        _ => 0,
    }
}

/// Roll a sale discount for an item of the given value
pub fn roll_discount(rng: &mut GameRng, value: i64) -> u8 {
    if value < MIN_DISCOUNT_VALUE {
        0
    } else if rng.one_in(25) {
        25
    } else if rng.one_in(150) {
        50
    } else if rng.one_in(300) {
        75
    } else if rng.one_in(500) {
        90
    } else {
        0
    }
}

/// Turn a freshly generated single item into a shop pile
///
/// Picks the pile size from the item's kind and value, rolls a discount and
/// shrinks the pile by it. Pooled charges are multiplied up to the pile size.
pub fn mass_produce(rng: &mut GameRng, item: &mut Item, category: ShopCategory) {
    let size = if item.item_kind().is_singular() || item.is_named() {
        1
    } else {
        1 + extra_units(rng, item, category)
    };

    let discount = if item.is_artifact() {
        0
    } else {
        roll_discount(rng, item.value())
    };

    let kept = size - size * discount as u32 / 100;
    let kept = kept.clamp(1, item.shop_stack_limit() as u32);
    item.discount = discount;
    item.quantity = kept as u8;

    if item.item_kind().pools_charges() {
        item.pval *= kept as i32;
    }
}
