mod common;

use common::item;
use proptest::prelude::*;
use tc_core::GameRng;
use tc_core::consts::{STORE_MAX_KEEP, STORE_MIN_KEEP};
use tc_core::object::{Forge, ItemKind};
use tc_core::shop::{Neighbours, Restocker, Shop, ShopCategory, StockLedger, mass_produce};

const ORDINARY: [ShopCategory; 8] = [
    ShopCategory::General,
    ShopCategory::Armoury,
    ShopCategory::Weaponsmith,
    ShopCategory::Temple,
    ShopCategory::Alchemist,
    ShopCategory::Magic,
    ShopCategory::BlackMarket,
    ShopCategory::Bookstore,
];

#[test]
fn test_full_shop_sheds_stock() {
    let mut rng = GameRng::new(5);
    let mut forge = Forge;
    let neighbours = Neighbours::default();
    let mut shop = Shop::new(ShopCategory::General, 0, 0, false);
    for sval in 1..=4 {
        shop.stock.carry(item(ItemKind::Food, sval)).unwrap();
    }
    let fillers = [
        (ItemKind::Flask, 1),
        (ItemKind::Arrow, 1),
        (ItemKind::Bolt, 1),
        (ItemKind::Shot, 1),
        (ItemKind::Spike, 1),
        (ItemKind::Cloak, 1),
    ];
    for (kind, sval) in fillers {
        shop.stock.carry(item(kind, sval)).unwrap();
    }
    let mut extra = 0u8;
    while !shop.stock.is_full() {
        extra += 1;
        let mut arrows = item(ItemKind::Arrow, 1);
        arrows.to_h = extra as i16;
        shop.stock.carry(arrows).unwrap();
    }
    Restocker {
        rng: &mut rng,
        source: &mut forge,
        neighbours: &neighbours,
    }
    .maintain(&mut shop);
    assert!(shop.stock.len() <= STORE_MAX_KEEP);
    assert!(shop.stock.len() >= STORE_MIN_KEEP);
}

proptest! {
    #[test]
    fn prop_quantity_adjust_stays_in_range(start in 1u8..=99, delta in -400i32..400) {
        let mut ledger = StockLedger::new(ShopCategory::Magic, false);
        let mut wands = item(ItemKind::Wand, 1).with_quantity(start);
        wands.pval = 30;
        ledger.carry(wands).unwrap();

        let applied = ledger.increase(0, delta);
        let expected = (start as i32 + delta).clamp(0, 255);
        prop_assert_eq!(applied, expected - start as i32);
        prop_assert_eq!(ledger.stacks()[0].quantity as i32, expected);
        prop_assert_eq!(ledger.stacks()[0].pval, 30);

        ledger.optimize(0);
        prop_assert_eq!(ledger.is_empty(), expected == 0);
    }

    #[test]
    fn prop_merge_then_take_restores_stack(
        a in 1u8..50,
        b in 1u8..50,
        charges in 0i32..20,
    ) {
        let mut ledger = StockLedger::new(ShopCategory::Magic, false);
        let mut first = item(ItemKind::Wand, 1).with_quantity(a);
        first.pval = charges * a as i32;
        let mut second = item(ItemKind::Wand, 1).with_quantity(b);
        second.pval = charges * b as i32;

        ledger.carry(first).unwrap();
        let idx = ledger.carry(second).unwrap();
        prop_assert_eq!(ledger.len(), 1);
        let taken = ledger.take(idx, b).unwrap();

        prop_assert_eq!(taken.quantity, b);
        prop_assert_eq!(taken.pval, charges * b as i32);
        prop_assert_eq!(ledger.stacks()[0].quantity, a);
        prop_assert_eq!(ledger.stacks()[0].pval, charges * a as i32);
    }

    #[test]
    fn prop_maintenance_stays_in_bounds(seed in 0u64..1000, which in 0usize..ORDINARY.len()) {
        let category = ORDINARY[which];
        let mut rng = GameRng::new(seed);
        let mut forge = Forge;
        let neighbours = Neighbours::default();
        let mut shop = Shop::new(category, 0, 0, false);
        let mut restocker = Restocker {
            rng: &mut rng,
            source: &mut forge,
            neighbours: &neighbours,
        };
        for _ in 0..4 {
            restocker.maintain(&mut shop);
            prop_assert!(shop.stock.len() <= STORE_MAX_KEEP);
            prop_assert!(shop.stock.len() < shop.stock.capacity());
        }
        if category != ShopCategory::BlackMarket {
            prop_assert!(shop.stock.len() >= STORE_MIN_KEEP);
        }
    }

    #[test]
    fn prop_piles_are_bounded(seed in 0u64..1000, which in 0usize..6, artifact in any::<bool>()) {
        let kinds = [
            (ItemKind::Food, 1),
            (ItemKind::Arrow, 1),
            (ItemKind::Potion, 2),
            (ItemKind::Sword, 6),
            (ItemKind::Wand, 1),
            (ItemKind::Statue, 1),
        ];
        let (kind, sval) = kinds[which];
        let mut rng = GameRng::new(seed);
        let mut pile = item(kind, sval);
        if artifact {
            pile.random_artifact = Some("'Testblade'".into());
        }
        mass_produce(&mut rng, &mut pile, ShopCategory::BlackMarket);

        prop_assert!((1..=99).contains(&pile.quantity));
        prop_assert!([0, 25, 50, 75, 90].contains(&pile.discount));
        if artifact {
            prop_assert_eq!(pile.quantity, 1);
            prop_assert_eq!(pile.discount, 0);
        }
    }
}
