mod common;

use common::{ScriptedPrompt, item, long_sword, prepare, shopper, world};
use tc_core::consts::TRANSACTION_TURNS;
use tc_core::object::{Forge, ItemKind};
use tc_core::player::Location;
use tc_core::shop::{ShopCategory, visit};
use tc_core::{CommerceConfig, CommerceError, DiaryKind, MemoryDiary};

#[test]
fn test_floor_offer_buys_and_fixes_price() {
    let mut world = world(1, CommerceConfig::default());
    prepare(&mut world, 0, ShopCategory::Weaponsmith, 1, vec![long_sword().with_quantity(2)]);
    let start = world.turn;
    let mut player = shopper(1000, 0, ShopCategory::Weaponsmith);
    let mut prompt = ScriptedPrompt::new("pa", &["1", "360"]);
    let mut diary = MemoryDiary::default();

    let summary = visit(&mut world, &mut player, &mut prompt, &mut diary, &mut Forge).unwrap();

    assert_eq!(summary.purchases, 1);
    assert_eq!(summary.gold_spent, 360);
    assert_eq!(summary.turns, TRANSACTION_TURNS);
    assert_eq!(player.gold, 640);
    assert_eq!(player.inventory.items()[0].item_kind(), ItemKind::Sword);
    assert_eq!(world.turn, start + TRANSACTION_TURNS);

    let shop = world.shop(0, ShopCategory::Weaponsmith);
    assert_eq!(shop.good_buy, 1);
    assert_eq!(shop.stock.stacks()[0].quantity, 1);
    assert!(shop.stock.stacks()[0].price_fixed);

    assert_eq!(diary.entries.len(), 1);
    assert_eq!(diary.entries[0].kind, DiaryKind::Bought);
    assert_eq!(diary.entries[0].price, 360);
    assert!(prompt.said("You bought Long Sword"));
}

#[test]
fn test_fixed_price_skips_haggling_and_restocks_empty_shop() {
    let mut world = world(1, CommerceConfig::default());
    let mut sword = long_sword();
    sword.price_fixed = true;
    prepare(&mut world, 0, ShopCategory::Weaponsmith, 1, vec![sword]);
    let mut player = shopper(1000, 0, ShopCategory::Weaponsmith);
    let mut prompt = ScriptedPrompt::new("pa", &[]);
    let mut diary = MemoryDiary::default();

    let summary = visit(&mut world, &mut player, &mut prompt, &mut diary, &mut Forge).unwrap();

    assert_eq!(summary.purchases, 1);
    assert_eq!(player.gold, 640);
    assert!(prompt.said("That will be 360 gold per item."));
    assert!(prompt.said("The shopkeeper"));
    assert!(!world.shop(0, ShopCategory::Weaponsmith).stock.is_empty());
    assert!(!player.inventory.items()[0].price_fixed);
}

#[test]
fn test_short_purse_refuses_without_mutation() {
    let mut world = world(1, CommerceConfig::default());
    prepare(&mut world, 0, ShopCategory::Weaponsmith, 1, vec![long_sword()]);
    let mut player = shopper(100, 0, ShopCategory::Weaponsmith);
    let mut prompt = ScriptedPrompt::new("pa", &["360"]);
    let mut diary = MemoryDiary::default();

    let summary = visit(&mut world, &mut player, &mut prompt, &mut diary, &mut Forge).unwrap();

    assert_eq!(summary.purchases, 0);
    assert_eq!(player.gold, 100);
    assert!(player.inventory.is_empty());
    assert_eq!(world.shop(0, ShopCategory::Weaponsmith).stock.len(), 1);
    assert!(prompt.said("You do not have enough gold."));
    assert!(diary.entries.is_empty());
    assert_eq!(summary.turns, 0);
}

#[test]
fn test_no_haggle_sale() {
    let config = CommerceConfig {
        manual_haggle: false,
        ..CommerceConfig::default()
    };
    let mut world = world(1, config);
    prepare(&mut world, 0, ShopCategory::General, 0, vec![]);
    let mut player = shopper(0, 0, ShopCategory::General);
    player.inventory.carry(item(ItemKind::Statue, 1));
    let mut prompt = ScriptedPrompt::new("sa", &[""]);
    let mut diary = MemoryDiary::default();

    let summary = visit(&mut world, &mut player, &mut prompt, &mut diary, &mut Forge).unwrap();

    // 100 gold at 77% less the 10% reduction
    assert_eq!(summary.sales, 1);
    assert_eq!(summary.gold_earned, 70);
    assert_eq!(player.gold, 70);
    assert!(player.inventory.is_empty());
    assert!(prompt.said("You quickly agree upon the price."));
    let stock = &world.shop(0, ShopCategory::General).stock;
    assert_eq!(stock.len(), 1);
    assert_eq!(stock.stacks()[0].item_kind(), ItemKind::Statue);
    assert_eq!(diary.entries[0].kind, DiaryKind::Sold);
}

#[test]
fn test_shop_refuses_foreign_wares() {
    let mut world = world(1, CommerceConfig::default());
    prepare(&mut world, 0, ShopCategory::General, 0, vec![]);
    let mut player = shopper(0, 0, ShopCategory::General);
    player.inventory.carry(long_sword());
    player.inventory.carry(item(ItemKind::Flask, 1));
    let mut prompt = ScriptedPrompt::new("sa", &[]);
    let mut diary = MemoryDiary::default();

    visit(&mut world, &mut player, &mut prompt, &mut diary, &mut Forge).unwrap();

    assert!(prompt.said("I do not buy that kind of thing."));
    assert_eq!(player.inventory.len(), 2);
}

#[test]
fn test_nothing_to_sell() {
    let mut world = world(1, CommerceConfig::default());
    prepare(&mut world, 0, ShopCategory::Alchemist, 0, vec![]);
    let mut player = shopper(0, 0, ShopCategory::Alchemist);
    player.inventory.carry(long_sword());
    let mut prompt = ScriptedPrompt::new("s", &[]);

    visit(&mut world, &mut player, &mut prompt, &mut MemoryDiary::default(), &mut Forge).unwrap();

    assert!(prompt.said("You have nothing that I want."));
}

#[test]
fn test_insults_get_player_thrown_out() {
    let mut world = world(1, CommerceConfig::default());
    prepare(&mut world, 0, ShopCategory::BlackMarket, 0, vec![long_sword()]);
    world.shop_mut(0, ShopCategory::BlackMarket).insult_cur = 3;
    let mut player = shopper(5000, 0, ShopCategory::BlackMarket);
    let mut prompt = ScriptedPrompt::new("pa", &["2", "3", "4"]);
    let mut diary = MemoryDiary::default();

    let summary = visit(&mut world, &mut player, &mut prompt, &mut diary, &mut Forge).unwrap();

    assert!(summary.ejected);
    assert_eq!(player.gold, 5000);
    assert_eq!(player.location, Location::at_shop(0, ShopCategory::BlackMarket));
    let shop = world.shop(0, ShopCategory::BlackMarket);
    assert!(shop.store_open > world.turn);
    assert_eq!(shop.insult_cur, 0);

    let err = visit(&mut world, &mut player, &mut prompt, &mut diary, &mut Forge).unwrap_err();
    assert!(matches!(err, CommerceError::Locked { .. }));
}

#[test]
fn test_entry_needs_an_open_entrance() {
    let mut world = world(1, CommerceConfig::default());
    let mut prompt = ScriptedPrompt::default();
    let mut diary = MemoryDiary::default();

    let mut wanderer = shopper(0, 0, ShopCategory::Temple);
    wanderer.location = Location::default();
    let err = visit(&mut world, &mut wanderer, &mut prompt, &mut diary, &mut Forge).unwrap_err();
    assert_eq!(err, CommerceError::NoShopHere);

    let mut player = shopper(0, 0, ShopCategory::Temple);
    world.shop_mut(0, ShopCategory::Temple).store_open = world.turn + 50;
    let err = visit(&mut world, &mut player, &mut prompt, &mut diary, &mut Forge).unwrap_err();
    assert_eq!(
        err,
        CommerceError::Locked {
            reopens_at: world.turn + 50
        }
    );
    assert!(prompt.pages.is_empty());
}

#[test]
fn test_ironman_keeps_doors_locked() {
    let config = CommerceConfig {
        ironman_shops: true,
        ..CommerceConfig::default()
    };
    let mut world = world(1, config);
    let mut player = shopper(0, 0, ShopCategory::General);
    let err = visit(
        &mut world,
        &mut player,
        &mut ScriptedPrompt::default(),
        &mut MemoryDiary::default(),
        &mut Forge,
    )
    .unwrap_err();
    assert!(err.ends_visit());
}

#[test]
fn test_catch_up_restocks_after_long_absence() {
    let mut world = world(1, CommerceConfig::default());
    prepare(&mut world, 0, ShopCategory::Armoury, 0, vec![]);
    world.advance(50_000);
    let mut player = shopper(0, 0, ShopCategory::Armoury);
    let mut prompt = ScriptedPrompt::default();

    visit(&mut world, &mut player, &mut prompt, &mut MemoryDiary::default(), &mut Forge).unwrap();

    let shop = world.shop(0, ShopCategory::Armoury);
    assert!(!shop.stock.is_empty());
    assert_eq!(shop.last_visit, world.turn);
    assert_eq!(prompt.pages[0].rows.len(), shop.stock.len().min(12));
}

#[test]
fn test_first_visit_finds_the_opening_stock() {
    let mut world = world(1, CommerceConfig::default());
    let opening: Vec<String> = world
        .shop(0, ShopCategory::Magic)
        .stock
        .stacks()
        .iter()
        .map(|stack| stack.describe())
        .collect();
    let mut player = shopper(0, 0, ShopCategory::Magic);

    visit(
        &mut world,
        &mut player,
        &mut ScriptedPrompt::default(),
        &mut MemoryDiary::default(),
        &mut Forge,
    )
    .unwrap();

    let after: Vec<String> = world
        .shop(0, ShopCategory::Magic)
        .stock
        .stacks()
        .iter()
        .map(|stack| stack.describe())
        .collect();
    assert_eq!(after, opening);
}

#[test]
fn test_home_is_shared_and_free() {
    let mut world = world(3, CommerceConfig::default());
    prepare(&mut world, 0, ShopCategory::Home, 0, vec![]);
    let mut player = shopper(10, 2, ShopCategory::Home);
    player.inventory.carry(item(ItemKind::Food, 1).with_quantity(5));
    let mut prompt = ScriptedPrompt::new("daga", &["5", "2"]);
    let start = world.turn;

    visit(&mut world, &mut player, &mut prompt, &mut MemoryDiary::default(), &mut Forge).unwrap();

    let home = world.shop(0, ShopCategory::Home);
    assert_eq!(home.stock.stacks()[0].quantity, 3);
    assert_eq!(player.inventory.items()[0].quantity, 2);
    assert_eq!(player.gold, 10);
    assert_eq!(world.turn, start);
    assert_eq!(player.location, Location::at_shop(2, ShopCategory::Home));
    assert_eq!(prompt.pages[1].rows[0].price, None);
}

#[test]
fn test_museum_takes_one_of_each_for_good() {
    let mut world = world(1, CommerceConfig::default());
    prepare(&mut world, 0, ShopCategory::Museum, 0, vec![]);
    let mut player = shopper(0, 0, ShopCategory::Museum);
    player.inventory.carry(item(ItemKind::Flask, 1).with_quantity(2));
    let mut prompt = ScriptedPrompt::new("dadap", &["1", "1"]).with_confirms(&[true]);
    let mut diary = MemoryDiary::default();

    visit(&mut world, &mut player, &mut prompt, &mut diary, &mut Forge).unwrap();

    assert_eq!(world.shop(0, ShopCategory::Museum).stock.len(), 1);
    assert_eq!(player.inventory.items()[0].quantity, 1);
    assert!(prompt.said("The Museum already has one of those items."));
    assert!(prompt.said("Museum displays cannot be taken."));
    assert_eq!(diary.entries[0].kind, DiaryKind::Donated);
}

#[test]
fn test_museum_display_removal_needs_confirmation() {
    let mut world = world(1, CommerceConfig::default());
    prepare(&mut world, 0, ShopCategory::Museum, 0, vec![item(ItemKind::Statue, 1)]);
    let mut player = shopper(0, 0, ShopCategory::Museum);
    let mut prompt = ScriptedPrompt::new("rara", &[]).with_confirms(&[false, true]);

    visit(&mut world, &mut player, &mut prompt, &mut MemoryDiary::default(), &mut Forge).unwrap();

    assert!(world.shop(0, ShopCategory::Museum).stock.is_empty());
    assert!(prompt.said("You removed Statue."));
}

#[test]
fn test_paging_single_page() {
    let mut world = world(1, CommerceConfig::default());
    prepare(&mut world, 0, ShopCategory::Temple, 0, vec![item(ItemKind::Potion, 2)]);
    let mut player = shopper(0, 0, ShopCategory::Temple);
    let mut prompt = ScriptedPrompt::new(" z", &[]);

    visit(&mut world, &mut player, &mut prompt, &mut MemoryDiary::default(), &mut Forge).unwrap();

    assert!(prompt.said("Entire inventory is shown."));
    assert!(prompt.said("That command does not work in stores."));
}
