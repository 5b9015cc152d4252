//! Shared fixtures for the integration tests

#![allow(dead_code)]

use std::collections::VecDeque;

use tc_core::object::catalogue::lookup;
use tc_core::object::{Forge, Item, ItemKind};
use tc_core::player::{Location, Player, Race};
use tc_core::shop::{Commerce, Prompt, Shop, ShopCategory, StockLedger, StockPage};
use tc_core::{CommerceConfig, GameRng};

/// Prompt double fed from queues; an exhausted queue answers escape
#[derive(Default)]
pub struct ScriptedPrompt {
    pub keys: VecDeque<char>,
    pub texts: VecDeque<String>,
    pub confirms: VecDeque<bool>,
    pub messages: Vec<String>,
    pub pages: Vec<StockPage>,
}

impl ScriptedPrompt {
    pub fn new(keys: &str, texts: &[&str]) -> Self {
        Self {
            keys: keys.chars().collect(),
            texts: texts.iter().map(|t| t.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn with_confirms(mut self, answers: &[bool]) -> Self {
        self.confirms = answers.iter().copied().collect();
        self
    }

    pub fn said(&self, text: &str) -> bool {
        self.messages.iter().any(|m| m.contains(text))
    }
}

impl Prompt for ScriptedPrompt {
    fn message(&mut self, text: &str) {
        self.messages.push(text.to_string());
    }

    fn menu_key(&mut self, _prompt: &str) -> Option<char> {
        self.keys.pop_front()
    }

    fn text_entry(&mut self, _prompt: &str, _default: &str) -> Option<String> {
        self.texts.pop_front()
    }

    fn confirm(&mut self, _prompt: &str) -> bool {
        self.confirms.pop_front().unwrap_or(false)
    }

    fn show_stock(&mut self, page: &StockPage) {
        self.pages.push(page.clone());
    }
}

pub fn item(kind: ItemKind, sval: u8) -> Item {
    Item::new(lookup(kind, sval).unwrap())
}

pub fn long_sword() -> Item {
    item(ItemKind::Sword, 6)
}

pub fn world(towns: usize, config: CommerceConfig) -> Commerce {
    Commerce::new(towns, config, GameRng::new(31), &mut Forge)
}

/// Replace a shop's owner and stock, and mark it visited now
pub fn prepare(
    world: &mut Commerce,
    town: usize,
    category: ShopCategory,
    owner: usize,
    stock: Vec<Item>,
) {
    let turn = world.turn;
    let shop: &mut Shop = world.shop_mut(town, category);
    shop.owner = owner;
    shop.stock = StockLedger::new(category, false);
    for item in stock {
        shop.stock.carry(item).unwrap();
    }
    shop.last_visit = turn;
}

pub fn shopper(gold: i64, town: usize, category: ShopCategory) -> Player {
    let mut player = Player::new("Tester", Race::Human);
    player.gold = gold;
    player.location = Location::at_shop(town, category);
    player
}
