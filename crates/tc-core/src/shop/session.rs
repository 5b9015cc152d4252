//! Shop visits
//!
//! A [`Session`] is one visit to one venue. It checks the door, runs the
//! maintenance owed since the last visit, then loops over the player's
//! commands until they leave or are thrown out. All state it touches is
//! borrowed for the duration of the visit.

use tracing::{debug, info, warn};

use crate::consts::{EMPTY_RESTOCK_ROUNDS, STOCK_PAGE, TRANSACTION_TURNS};
use crate::diary::{Diary, DiaryEntry, DiaryKind};
use crate::error::CommerceError;
use crate::messages::{self, ACCEPTED, BARGAIN, BOUGHT_WORTHLESS, GREAT_BARGAIN, PAID_TOO_MUCH};
use crate::object::{Item, ItemKind, ItemSource};
use crate::player::{Location, Player, Terrain};

use super::ShopCategory;
use super::haggle::{Negotiation, haggle};
use super::ledger::ledger_capacity;
use super::pricing::{PriceFactors, Trade, price_item};
use super::prompt::{Prompt, Redraw, StockPage, StockRow, ask_quantity, letter_index};
use super::restock::catch_up_rounds;
use super::store::Shop;
use super::town::{Commerce, ON_SALE};

/// What happened during a visit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitSummary {
    pub purchases: u32,
    pub sales: u32,
    pub gold_spent: i64,
    pub gold_earned: i64,
    pub ejected: bool,
    /// Game turns that passed inside the shop
    pub turns: i64,
}

/// Whether the visit goes on after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Stay,
    Leave,
}

/// Letter shown next to pack slot `index`
fn slot_letter(index: usize) -> char {
    (b'a' + (index % 26) as u8) as char
}

/// Shopkeeper's reaction to buying goods worth `value` for `price`
pub fn purchase_analysis(value: i64, price: i64) -> Option<&'static [&'static str]> {
    if value <= 0 && price > value {
        Some(BOUGHT_WORTHLESS)
    } else if price > value {
        Some(PAID_TOO_MUCH)
    } else if price < value && value < 4 * price {
        Some(BARGAIN)
    } else if price < value {
        Some(GREAT_BARGAIN)
    } else {
        None
    }
}

/// What the player learns from looking an item over
pub fn examine_lines(item: &Item) -> Vec<String> {
    let mut lines = vec![format!("Examining {}...", item.describe())];
    let kind = item.item_kind();
    if (kind.is_weapon() || kind.is_ammo()) && item.dd > 0 {
        lines.push(format!("It does {}d{} damage per blow.", item.dd, item.ds));
    }
    if kind.is_armour() {
        lines.push(format!("It has a base armour class of {}.", item.ac));
    }
    match kind {
        ItemKind::Wand | ItemKind::Staff => {
            lines.push(format!("It has {} charges remaining.", item.pval));
        }
        ItemKind::Rod if item.timeout > 0 => lines.push("It is still charging.".into()),
        _ => {}
    }
    if item.is_artifact() {
        lines.push("It is one of a kind.".into());
    }
    if lines.len() == 1 {
        lines.push("You have no special knowledge about that item.".into());
    }
    lines
}

/// Per-unit price a stock row shows
///
/// Settled stacks show their floor price. Without haggling the floor price
/// plus the sales tax is shown, otherwise the opening ask.
pub fn row_price(shop: &Shop, player: &Player, manual_haggle: bool, item: &Item) -> Option<i64> {
    if shop.category.is_storage() {
        return None;
    }
    let owner = shop.owner();
    let black_market = shop.category == ShopCategory::BlackMarket;
    let low = PriceFactors::new(owner, player, owner.min_inflate, black_market);
    if item.price_fixed {
        return Some(price_item(item, Trade::Buy, &low));
    }
    if !manual_haggle {
        let mut price = price_item(item, Trade::Buy, &low);
        if !shop.no_need_to_bargain(price) {
            price += price / 10;
        }
        return Some(price);
    }
    let high = PriceFactors::new(owner, player, owner.max_inflate, black_market);
    Some(price_item(item, Trade::Buy, &high))
}

/// One visit to one venue
pub struct Session<'a> {
    world: &'a mut Commerce,
    player: &'a mut Player,
    prompt: &'a mut dyn Prompt,
    diary: &'a mut dyn Diary,
    source: &'a mut dyn ItemSource,
    town: usize,
    category: ShopCategory,
    page: usize,
    saved: Location,
    entered_at: i64,
    summary: VisitSummary,
}

/// Enter the venue under the player and run the visit to its end
pub fn visit(
    world: &mut Commerce,
    player: &mut Player,
    prompt: &mut dyn Prompt,
    diary: &mut dyn Diary,
    source: &mut dyn ItemSource,
) -> Result<VisitSummary, CommerceError> {
    Ok(Session::enter(world, player, prompt, diary, source)?.run())
}

impl<'a> Session<'a> {
    /// Open the door of the venue the player stands on
    ///
    /// Fails with [`CommerceError::NoShopHere`] off an entrance and with
    /// [`CommerceError::Locked`] while the owner keeps the player out.
    pub fn enter(
        world: &'a mut Commerce,
        player: &'a mut Player,
        prompt: &'a mut dyn Prompt,
        diary: &'a mut dyn Diary,
        source: &'a mut dyn ItemSource,
    ) -> Result<Self, CommerceError> {
        let Terrain::ShopEntrance(category) = player.location.terrain else {
            return Err(CommerceError::NoShopHere);
        };
        let town = match player.location.town {
            Some(town) if town < world.towns.len() => town,
            _ => return Err(CommerceError::NoShopHere),
        };
        let turn = world.turn;
        if world.config.ironman_shops {
            return Err(CommerceError::Locked {
                reopens_at: i64::MAX,
            });
        }
        let shop = world.shop(town, category);
        if shop.is_locked(turn) {
            return Err(CommerceError::Locked {
                reopens_at: shop.store_open,
            });
        }

        let saved = player.location;
        if category.is_storage() {
            player.location.town = Some(world.record_town(town, category));
            let capacity = ledger_capacity(category, world.config.home_expansion);
            world.shop_mut(town, category).stock.set_capacity(capacity);
        }

        let rounds = catch_up_rounds(turn, world.shop(town, category).last_visit);
        if rounds > 0 {
            world.maintain(town, category, source, rounds as usize);
        }
        world.shop_mut(town, category).last_visit = turn;
        info!(shop = %category, town, rounds, "entered");

        Ok(Self {
            world,
            player,
            prompt,
            diary,
            source,
            town,
            category,
            page: 0,
            saved,
            entered_at: turn,
            summary: VisitSummary::default(),
        })
    }

    pub fn category(&self) -> ShopCategory {
        self.category
    }

    pub fn shop(&self) -> &Shop {
        self.world.shop(self.town, self.category)
    }

    fn shop_mut(&mut self) -> &mut Shop {
        self.world.shop_mut(self.town, self.category)
    }

    pub fn summary(&self) -> &VisitSummary {
        &self.summary
    }

    fn pages(&self) -> usize {
        self.shop().stock.len().div_ceil(STOCK_PAGE).max(1)
    }

    /// The ledger page currently on screen
    pub fn stock_page(&self) -> StockPage {
        let shop = self.shop();
        let owner = shop.owner();
        let manual = self.world.config.manual_haggle;
        let page = self.page.min(self.pages() - 1);
        let rows = shop
            .stock
            .stacks()
            .iter()
            .skip(page * STOCK_PAGE)
            .take(STOCK_PAGE)
            .enumerate()
            .map(|(i, item)| StockRow {
                label: slot_letter(i),
                description: item.describe(),
                price: row_price(shop, &*self.player, manual, item),
                fixed: item.price_fixed && shop.category.is_ordinary(),
            })
            .collect();
        let (title, purse) = if shop.category.is_ordinary() {
            (
                format!("{} ({})", shop.category, owner.max_cost),
                Some(owner.max_cost),
            )
        } else {
            (shop.category.to_string(), None)
        };
        StockPage {
            title,
            owner: format!("{} ({})", owner.name, owner.race),
            purse,
            rows,
            page,
            pages: self.pages(),
            gold: self.player.gold,
        }
    }

    fn render(&mut self) {
        self.page = self.page.min(self.pages() - 1);
        let page = self.stock_page();
        self.prompt.show_stock(&page);
    }

    /// Loop over commands until the player leaves or is thrown out
    pub fn run(mut self) -> VisitSummary {
        loop {
            self.render();
            let Some(key) = self.prompt.menu_key("Command: ") else {
                break;
            };
            match self.command(key) {
                Ok(Flow::Stay) | Err(CommerceError::Cancelled) => {}
                Ok(Flow::Leave) => break,
                Err(err) if err.ends_visit() => {
                    self.summary.ejected = err == CommerceError::Ejected;
                    break;
                }
                Err(err) => self.prompt.message(&err.to_string()),
            }
        }
        self.leave()
    }

    /// Carry out one command key
    pub fn command(&mut self, key: char) -> Result<Flow, CommerceError> {
        match key {
            'q' | '\x1b' => Ok(Flow::Leave),
            ' ' => self.turn_page(1),
            '-' => self.turn_page(-1),
            'p' | 'g' => self.purchase(),
            's' | 'd' => self.sell(),
            'x' | 'l' => self.examine(),
            'r' if self.category == ShopCategory::Museum => self.remove_display(),
            _ => {
                self.prompt.message("That command does not work in stores.");
                Ok(Flow::Stay)
            }
        }
    }

    /// Restore the player's location and close the visit
    pub fn leave(self) -> VisitSummary {
        self.player.location = self.saved;
        let mut summary = self.summary;
        summary.turns = self.world.turn - self.entered_at;
        info!(
            shop = %self.category,
            purchases = summary.purchases,
            sales = summary.sales,
            ejected = summary.ejected,
            "left"
        );
        summary
    }

    fn turn_page(&mut self, step: isize) -> Result<Flow, CommerceError> {
        let pages = self.pages();
        if pages <= 1 {
            self.prompt.message("Entire inventory is shown.");
        } else {
            self.page = (self.page as isize + step).rem_euclid(pages as isize) as usize;
        }
        Ok(Flow::Stay)
    }

    fn empty_error(&self) -> CommerceError {
        match self.category {
            ShopCategory::Home => CommerceError::HomeEmpty,
            ShopCategory::Museum => CommerceError::MuseumEmpty,
            _ => CommerceError::Empty,
        }
    }

    /// Choose a row of the current page; returns its letter and ledger index
    fn pick_row(&mut self, question: &str) -> Result<(char, usize), CommerceError> {
        let page = self.page.min(self.pages() - 1);
        let first = page * STOCK_PAGE;
        let on_page = self.shop().stock.len().saturating_sub(first).min(STOCK_PAGE);
        let key = self.prompt.menu_key(question).ok_or(CommerceError::Cancelled)?;
        let row = letter_index(key, on_page).ok_or(CommerceError::Cancelled)?;
        Ok((key, first + row))
    }

    /// Choose a pack slot
    fn pick_pack(&mut self, question: &str) -> Result<usize, CommerceError> {
        if self.player.inventory.is_empty() {
            return Err(CommerceError::PackEmpty);
        }
        let choices: Vec<String> = self
            .player
            .inventory
            .items()
            .iter()
            .enumerate()
            .map(|(i, item)| format!("{}) {}", slot_letter(i), item.describe()))
            .collect();
        self.prompt.show_choices(question, &choices);
        let key = self.prompt.menu_key(question).ok_or(CommerceError::Cancelled)?;
        letter_index(key, choices.len()).ok_or(CommerceError::Cancelled)
    }

    fn note(&mut self, kind: DiaryKind, item: String, price: i64) {
        let entry = DiaryEntry {
            turn: self.world.turn,
            kind,
            item,
            price,
        };
        if let Err(err) = self.diary.record(entry) {
            warn!(%err, "diary entry lost");
        }
    }

    fn purchase(&mut self) -> Result<Flow, CommerceError> {
        if self.category == ShopCategory::Museum {
            self.prompt.message("Museum displays cannot be taken.");
            return Ok(Flow::Stay);
        }
        if self.shop().stock.is_empty() {
            return Err(self.empty_error());
        }
        let question = if self.category == ShopCategory::Home {
            "Which item do you want to take? "
        } else {
            "Which item are you interested in? "
        };
        let (row, index) = self.pick_row(question)?;
        let mut quote = self
            .shop()
            .stock
            .get(index)
            .cloned()
            .ok_or(CommerceError::Cancelled)?;
        let amount =
            ask_quantity(self.prompt, "Quantity", quote.quantity).ok_or(CommerceError::Cancelled)?;
        let lot = quote.split_off(amount);
        if !self.player.inventory.carry_okay(&lot) {
            return Err(CommerceError::PackFull);
        }
        if self.category == ShopCategory::Home {
            return self.take_home(index, amount);
        }

        let price = self.settle_purchase(row, index, &lot)?;
        self.player.spend(price)?;
        let comment = messages::pick(&mut self.world.rng, ACCEPTED);
        self.prompt.message(comment);

        let shop = self.shop_mut();
        shop.decrease_insults();
        let Some(mut bought) = shop.stock.take(index, amount) else {
            self.player.earn(price);
            return Err(CommerceError::Cancelled);
        };
        bought.price_fixed = false;
        if bought.inscription.as_deref() == Some(ON_SALE) {
            bought.inscription = None;
        }
        let label = bought.describe();
        self.prompt.message(&format!("You bought {label} for {price} gold."));
        if let Some(slot) = self.player.inventory.carry(bought) {
            let held = self.player.inventory.items()[slot].describe();
            self.prompt.message(&format!("You have {held} ({}).", slot_letter(slot)));
        }
        info!(shop = %self.category, item = %label, price, "bought");

        self.summary.purchases += 1;
        self.summary.gold_spent += price;
        self.world.advance(TRANSACTION_TURNS);
        if self.world.config.record_buy {
            self.note(DiaryKind::Bought, label, price);
        }
        self.prompt.redraw(Redraw::GOLD | Redraw::INVENTORY | Redraw::STOCK);

        if self.shop().stock.is_empty() {
            self.restock_empty();
        }
        Ok(Flow::Stay)
    }

    /// Agree a total price for `lot`, taken from ledger slot `index`
    fn settle_purchase(
        &mut self,
        row: char,
        index: usize,
        lot: &Item,
    ) -> Result<i64, CommerceError> {
        let manual = self.world.config.manual_haggle;
        let turn = self.world.turn;
        let units = lot.quantity;
        let (shop, rng) = self.world.shop_and_rng(self.town, self.category);
        let owner = shop.owner();
        let black_market = shop.category == ShopCategory::BlackMarket;
        let low = PriceFactors::new(owner, &*self.player, owner.min_inflate, black_market);
        let best = price_item(lot, Trade::Buy, &low);

        if shop.stock.get(index).is_some_and(|stack| stack.price_fixed) {
            self.prompt.message(&format!("That will be {best} gold per item."));
            return Ok(best * units as i64);
        }

        self.prompt.message(&format!("Buying {} ({row}).", lot.describe()));
        let mut negotiation =
            Negotiation::open(Trade::Buy, shop, &*self.player, lot, units, manual);
        let price = haggle(&mut negotiation, shop, self.prompt, rng, turn)?;
        if price == best * units as i64 {
            if let Some(stack) = shop.stock.get_mut(index) {
                stack.price_fixed = true;
            }
        }
        Ok(price)
    }

    /// Owner retires or brings out new stock once the shelves are bare
    fn restock_empty(&mut self) {
        let chance = self.world.config.shuffle_chance.max(1);
        if self.world.rng.one_in(chance) {
            self.prompt.message("The shopkeeper retires.");
            self.world.shuffle(self.town, self.category);
        } else {
            self.prompt.message("The shopkeeper brings out some new stock.");
        }
        self.world.maintain(self.town, self.category, self.source, EMPTY_RESTOCK_ROUNDS);
        self.page = 0;
        self.prompt.redraw(Redraw::STOCK);
    }

    fn take_home(&mut self, index: usize, amount: u8) -> Result<Flow, CommerceError> {
        let item = self
            .shop_mut()
            .stock
            .take(index, amount)
            .ok_or(CommerceError::Cancelled)?;
        match self.player.inventory.carry(item) {
            Some(slot) => {
                let held = self.player.inventory.items()[slot].describe();
                self.prompt.message(&format!("You have {held} ({}).", slot_letter(slot)));
            }
            None => {
                debug!("pack refused item taken from home");
            }
        }
        self.prompt.redraw(Redraw::INVENTORY | Redraw::STOCK);
        Ok(Flow::Stay)
    }

    fn sell(&mut self) -> Result<Flow, CommerceError> {
        match self.category {
            ShopCategory::Home => return self.drop_home(),
            ShopCategory::Museum => return self.donate(),
            _ => {}
        }
        let category = self.category;
        if !self
            .player
            .inventory
            .items()
            .iter()
            .any(|item| category.will_buy(item).is_ok())
        {
            return Err(CommerceError::NothingToSell);
        }
        let slot = self.pick_pack("Sell which item? ")?;
        let mut held = self
            .player
            .inventory
            .get(slot)
            .cloned()
            .ok_or(CommerceError::Cancelled)?;
        category.will_buy(&held)?;
        let amount =
            ask_quantity(self.prompt, "Quantity", held.quantity).ok_or(CommerceError::Cancelled)?;
        let lot = held.split_off(amount);
        if !self.shop().stock.check_num(&lot) {
            return Err(CommerceError::StockFull);
        }

        self.prompt.message(&format!("Selling {} ({}).", lot.describe(), slot_letter(slot)));
        let manual = self.world.config.manual_haggle;
        let turn = self.world.turn;
        let (shop, rng) = self.world.shop_and_rng(self.town, self.category);
        let mut negotiation =
            Negotiation::open(Trade::Sell, shop, &*self.player, &lot, amount, manual);
        let price = haggle(&mut negotiation, shop, self.prompt, rng, turn)?;
        self.prompt.message(messages::pick(rng, ACCEPTED));

        let value = lot.real_value() * amount as i64;
        let mut sold = self
            .player
            .inventory
            .take(slot, amount)
            .ok_or(CommerceError::Cancelled)?;
        self.player.earn(price);
        sold.inscription = None;
        sold.price_fixed = false;
        let label = sold.describe();
        self.prompt.message(&format!("You sold {label} for {price} gold."));
        if let Some(table) = purchase_analysis(value, price) {
            self.prompt.message(messages::pick(rng, table));
        }
        if let Err(item) = shop.stock.carry(sold) {
            warn!(item = %item.describe(), "sold item did not fit the ledger");
        }
        info!(shop = %self.category, item = %label, price, "sold");

        self.summary.sales += 1;
        self.summary.gold_earned += price;
        self.world.advance(TRANSACTION_TURNS);
        if self.world.config.record_sell {
            self.note(DiaryKind::Sold, label, price);
        }
        self.prompt.redraw(Redraw::GOLD | Redraw::INVENTORY | Redraw::STOCK);
        Ok(Flow::Stay)
    }

    /// Split `amount` units off pack slot `slot` without removing them
    fn quote_pack(&mut self, slot: usize) -> Result<(Item, u8), CommerceError> {
        let mut held = self
            .player
            .inventory
            .get(slot)
            .cloned()
            .ok_or(CommerceError::Cancelled)?;
        let amount =
            ask_quantity(self.prompt, "Quantity", held.quantity).ok_or(CommerceError::Cancelled)?;
        Ok((held.split_off(amount), amount))
    }

    fn drop_home(&mut self) -> Result<Flow, CommerceError> {
        let slot = self.pick_pack("Drop which item? ")?;
        let (lot, amount) = self.quote_pack(slot)?;
        if !self.shop().stock.check_num(&lot) {
            return Err(CommerceError::HomeFull);
        }
        let item = self
            .player
            .inventory
            .take(slot, amount)
            .ok_or(CommerceError::Cancelled)?;
        let label = item.describe();
        if let Err(item) = self.shop_mut().stock.carry(item) {
            self.player.inventory.carry(item);
            return Err(CommerceError::HomeFull);
        }
        self.prompt.message(&format!("You drop {label}."));
        self.prompt.redraw(Redraw::INVENTORY | Redraw::STOCK);
        Ok(Flow::Stay)
    }

    fn donate(&mut self) -> Result<Flow, CommerceError> {
        let slot = self.pick_pack("Donate which item? ")?;
        let (lot, amount) = self.quote_pack(slot)?;
        let stock = &self.shop().stock;
        if stock.stacks().iter().any(|display| stock.similar(display, &lot)) {
            return Err(CommerceError::AlreadyDisplayed);
        }
        if !stock.check_num(&lot) {
            return Err(CommerceError::StockFull);
        }
        let question = format!(
            "Once you donate {}, you cannot take it back. Donate? ",
            lot.describe()
        );
        if !self.prompt.confirm(&question) {
            return Err(CommerceError::Cancelled);
        }
        let item = self
            .player
            .inventory
            .take(slot, amount)
            .ok_or(CommerceError::Cancelled)?;
        let label = item.describe();
        if let Err(item) = self.shop_mut().stock.carry(item) {
            self.player.inventory.carry(item);
            return Err(CommerceError::StockFull);
        }
        self.prompt.message(&format!("You donated {label}."));
        if self.world.config.record_sell {
            self.note(DiaryKind::Donated, label, 0);
        }
        self.prompt.redraw(Redraw::INVENTORY | Redraw::STOCK);
        Ok(Flow::Stay)
    }

    fn remove_display(&mut self) -> Result<Flow, CommerceError> {
        if self.shop().stock.is_empty() {
            return Err(self.empty_error());
        }
        let (_, index) = self.pick_row("Which display do you want to remove? ")?;
        let name = self
            .shop()
            .stock
            .get(index)
            .map(Item::describe)
            .ok_or(CommerceError::Cancelled)?;
        if !self
            .prompt
            .confirm(&format!("Really remove {name} from the Museum? "))
        {
            return Err(CommerceError::Cancelled);
        }
        self.shop_mut().stock.remove(index);
        self.prompt.message(&format!("You removed {name}."));
        self.prompt.redraw(Redraw::STOCK);
        Ok(Flow::Stay)
    }

    fn examine(&mut self) -> Result<Flow, CommerceError> {
        if self.shop().stock.is_empty() {
            return Err(self.empty_error());
        }
        let (_, index) = self.pick_row("Which item do you want to examine? ")?;
        let item = self
            .shop()
            .stock
            .get(index)
            .cloned()
            .ok_or(CommerceError::Cancelled)?;
        for line in examine_lines(&item) {
            self.prompt.message(&line);
        }
        Ok(Flow::Stay)
    }
}
