//! Haggling
//!
//! A [`Negotiation`] is opened for one purchase or sale and then fed the
//! player's offers one at a time. Each offer is answered with a [`Step`]:
//! the shopkeeper concedes part of the gap, takes offence, or closes the
//! deal. The ask only ever moves toward the player and never past the
//! owner's final price.
//!
//! ```text
//! Opening -> Offering (buy) / Countering (sell) -> Accepted | Cancelled | Ejected
//! ```

use thiserror::Error;
use tracing::debug;

use crate::consts::MAX_ANNOYED;
use crate::error::CommerceError;
use crate::messages::{self, EJECT_ORDER, EJECT_RANT, INSULTED, NONSENSE};
use crate::object::Item;
use crate::player::Player;
use crate::rng::GameRng;

use super::pricing::{PriceFactors, Trade, price_item};
use super::prompt::Prompt;
use super::store::Shop;
use super::ShopCategory;

/// Where a negotiation stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Prices computed, opening remark not yet shown
    Opening,
    /// Player is bidding for shop goods
    Offering,
    /// Player is asking a price for their goods
    Countering,
    /// Deal closed at this total price
    Accepted(i64),
    Cancelled,
    Ejected,
}

/// How the shopkeeper settled a no-haggle price
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Agreement {
    /// Sale price capped by the owner's purse
    Instantly,
    /// Trusted customer or trivial goods
    Eventually,
    /// Haggling switched off
    Quickly,
}

impl Agreement {
    pub fn remark(self) -> &'static str {
        match self {
            Agreement::Instantly => "You instantly agree upon the price.",
            Agreement::Eventually => "You eventually agree upon the price.",
            Agreement::Quickly => "You quickly agree upon the price.",
        }
    }
}

/// A line typed at the haggle prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferEntry {
    /// A plain number
    Amount(i64),
    /// `+n` / `-n`, relative to the previous offer
    Delta(i64),
    /// Nothing typed
    Blank,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Invalid response.")]
pub struct InvalidOffer;

impl OfferEntry {
    pub fn parse(text: &str) -> Result<Self, InvalidOffer> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(OfferEntry::Blank);
        }
        let value: i64 = text.parse().map_err(|_| InvalidOffer)?;
        if text.starts_with(['+', '-']) {
            Ok(OfferEntry::Delta(value))
        } else {
            Ok(OfferEntry::Amount(value))
        }
    }
}

/// Shopkeeper's reaction to one offer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Deal closed at this total price
    Accepted(i64),
    /// Offer on the wrong side of the ask; the previous offer stands
    Nonsense,
    /// Offer went back on an earlier one; the previous offer stands
    Retreated,
    /// The ask moved; `insulted` when the concession was too small
    Countered { insulted: bool },
    Ejected,
}

/// One haggle over a purchase or a sale
#[derive(Debug, Clone)]
pub struct Negotiation {
    trade: Trade,
    phase: Phase,
    agreement: Option<Agreement>,
    /// Shopkeeper's current figure for the whole lot
    ask: i64,
    /// The owner will not go past this
    final_ask: i64,
    /// Player's last accepted offer
    last_offer: i64,
    /// Offer being built from the current entry
    offer: i64,
    last_inc: i64,
    allow_inc: bool,
    final_round: bool,
    annoyed: u32,
    min_per: i64,
    max_per: i64,
    units: i64,
    manual: bool,
}

impl Negotiation {
    /// Open a haggle over `units` of `item`
    ///
    /// `item` must describe exactly the units on the table (pooled charges
    /// already split).
    pub fn open(
        trade: Trade,
        shop: &Shop,
        player: &Player,
        item: &Item,
        units: u8,
        manual: bool,
    ) -> Self {
        let owner = shop.owner();
        let black_market = shop.category == ShopCategory::BlackMarket;
        let high = PriceFactors::new(owner, player, owner.max_inflate, black_market);
        let low = PriceFactors::new(owner, player, owner.min_inflate, black_market);

        let mut ask = price_item(item, trade, &high);
        let mut final_ask = price_item(item, trade, &low);
        let noneed = shop.no_need_to_bargain(final_ask);
        let mut agreement = None;

        match trade {
            Trade::Buy => {
                if noneed || !manual {
                    if noneed {
                        agreement = Some(Agreement::Eventually);
                    } else {
                        agreement = Some(Agreement::Quickly);
                        final_ask += final_ask / 10;
                    }
                    ask = final_ask;
                }
            }
            Trade::Sell => {
                let purse = owner.max_cost;
                if noneed || !manual || final_ask >= purse {
                    if !manual && !noneed {
                        final_ask -= final_ask / 10;
                    }
                    agreement = Some(if final_ask >= purse {
                        final_ask = purse;
                        Agreement::Instantly
                    } else if noneed {
                        Agreement::Eventually
                    } else {
                        Agreement::Quickly
                    });
                    ask = final_ask;
                }
            }
        }

        let units = units as i64;
        let value = item.value() * units;
        let last_offer = match trade {
            Trade::Buy => (value * (200 - owner.max_inflate as i64) / 100).max(1),
            Trade::Sell => value * owner.max_inflate as i64 / 100,
        };
        let min_per = owner.haggle_per as i64;

        debug!(?trade, ask = ask * units, final_ask = final_ask * units, "haggle opened");
        Self {
            trade,
            phase: Phase::Opening,
            agreement,
            ask: ask * units,
            final_ask: final_ask * units,
            last_offer,
            offer: last_offer,
            last_inc: 0,
            allow_inc: false,
            final_round: agreement.is_some(),
            annoyed: 0,
            min_per,
            max_per: min_per * 3,
            units,
            manual,
        }
    }

    pub fn trade(&self) -> Trade {
        self.trade
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn ask(&self) -> i64 {
        self.ask
    }

    pub fn final_ask(&self) -> i64 {
        self.final_ask
    }

    pub fn last_offer(&self) -> i64 {
        self.last_offer
    }

    pub fn is_final_round(&self) -> bool {
        self.final_round
    }

    pub fn annoyed(&self) -> u32 {
        self.annoyed
    }

    fn is_over(&self) -> bool {
        matches!(
            self.phase,
            Phase::Accepted(_) | Phase::Cancelled | Phase::Ejected
        )
    }

    /// Leave the opening phase, returning the remark for a settled price
    pub fn begin(&mut self) -> Option<&'static str> {
        if self.phase == Phase::Opening {
            self.phase = match self.trade {
                Trade::Buy => Phase::Offering,
                Trade::Sell => Phase::Countering,
            };
        }
        self.agreement.map(Agreement::remark)
    }

    /// Label shown next to the shopkeeper's figure
    pub fn ask_label(&self) -> &'static str {
        if self.final_round {
            "Final Offer"
        } else {
            match self.trade {
                Trade::Buy => "Asking",
                Trade::Sell => "Offer",
            }
        }
    }

    pub fn question(&self) -> &'static str {
        match self.trade {
            Trade::Buy => "What do you offer? ",
            Trade::Sell => "What price do you ask? ",
        }
    }

    /// Turn a typed entry into an offer
    ///
    /// A blank line takes the ask in the final round, otherwise repeats the
    /// last increment. Increments are only allowed after the first round.
    pub fn resolve(&mut self, entry: OfferEntry) -> Result<i64, InvalidOffer> {
        match entry {
            OfferEntry::Blank if self.final_round => {
                self.offer = self.ask;
                self.last_inc = 0;
            }
            OfferEntry::Blank if self.allow_inc && self.last_inc != 0 => {
                self.offer = self.offer.checked_add(self.last_inc).ok_or(InvalidOffer)?;
            }
            OfferEntry::Blank => return Err(InvalidOffer),
            OfferEntry::Delta(delta) if self.allow_inc => {
                self.offer = self.offer.checked_add(delta).ok_or(InvalidOffer)?;
                self.last_inc = delta;
            }
            OfferEntry::Delta(_) => return Err(InvalidOffer),
            OfferEntry::Amount(amount) => {
                self.offer = amount;
                self.last_inc = 0;
            }
        }
        Ok(self.offer)
    }

    /// +1 while buying, -1 while selling; offers grow toward the ask by
    /// moving in this direction
    fn dir(&self) -> i64 {
        match self.trade {
            Trade::Buy => 1,
            Trade::Sell => -1,
        }
    }

    fn accept(&mut self, price: i64, shop: &mut Shop) -> Step {
        if self.manual {
            shop.update_bargain(price, self.final_ask, self.units);
        }
        self.phase = Phase::Accepted(price);
        debug!(price, "haggle accepted");
        Step::Accepted(price)
    }

    fn eject(&mut self) -> Step {
        self.phase = Phase::Ejected;
        Step::Ejected
    }

    /// Abandon the haggle; nothing committed so far is undone
    pub fn cancel(&mut self) {
        if !self.is_over() {
            self.phase = Phase::Cancelled;
        }
    }

    /// Answer one offer (a total for the whole lot)
    pub fn respond(&mut self, offer: i64, shop: &mut Shop, rng: &mut GameRng, turn: i64) -> Step {
        let dir = self.dir();
        self.offer = offer;

        if offer * dir < self.last_offer * dir {
            self.offer = self.last_offer;
            if shop.increase_insults(rng, turn) {
                return self.eject();
            }
            return Step::Retreated;
        }
        if offer * dir > self.ask * dir {
            self.offer = self.last_offer;
            return Step::Nonsense;
        }
        if offer == self.ask || offer * dir >= self.final_ask * dir {
            return self.accept(offer, shop);
        }

        let mut insulted = false;
        let mut x1 = 100 * (offer - self.last_offer) / (self.ask - self.last_offer);
        if x1 < self.min_per {
            if shop.increase_insults(rng, turn) {
                return self.eject();
            }
            insulted = true;
        } else if x1 > self.max_per {
            x1 = (x1 * 3 / 4).max(self.max_per);
        }
        let x2 = rng.range(x1 - 2, x1 + 2);
        let x3 = ((self.ask - offer) * dir * x2 / 100 + 1).max(0);
        self.ask -= dir * x3;

        if self.ask * dir < self.final_ask * dir {
            self.ask = self.final_ask;
            self.final_round = true;
            self.annoyed += 1;
            if self.annoyed > MAX_ANNOYED {
                shop.eject(rng, turn);
                return self.eject();
            }
        } else if offer * dir >= self.ask * dir {
            return self.accept(offer, shop);
        }

        self.last_offer = offer;
        self.allow_inc = true;
        debug!(offer, ask = self.ask, x2, insulted, "haggle countered");
        Step::Countered { insulted }
    }
}

/// Run a negotiation to its end through `prompt`
///
/// Returns the agreed total price. Escape cancels; ejection ends the
/// negotiation with [`CommerceError::Ejected`] after the lockout is set.
pub fn haggle(
    negotiation: &mut Negotiation,
    shop: &mut Shop,
    prompt: &mut dyn Prompt,
    rng: &mut GameRng,
    turn: i64,
) -> Result<i64, CommerceError> {
    if let Some(remark) = negotiation.begin() {
        prompt.message(remark);
    }
    loop {
        let question = format!(
            "{} :  {}  {}",
            negotiation.ask_label(),
            negotiation.ask(),
            negotiation.question()
        );
        let Some(text) = prompt.text_entry(&question, "") else {
            negotiation.cancel();
            return Err(CommerceError::Cancelled);
        };
        let offer = match OfferEntry::parse(&text).and_then(|entry| negotiation.resolve(entry)) {
            Ok(offer) => offer,
            Err(err) => {
                prompt.message(&err.to_string());
                continue;
            }
        };

        match negotiation.respond(offer, shop, rng, turn) {
            Step::Accepted(price) => return Ok(price),
            Step::Nonsense => prompt.message(messages::pick(rng, NONSENSE)),
            Step::Retreated => prompt.message(messages::pick(rng, INSULTED)),
            Step::Countered { insulted } => {
                if insulted {
                    prompt.message(messages::pick(rng, INSULTED));
                }
                let annoyed = negotiation.annoyed() > 0;
                let line = match negotiation.trade() {
                    Trade::Buy => messages::buying_counter(rng, negotiation.ask(), annoyed),
                    Trade::Sell => messages::selling_counter(rng, negotiation.ask(), annoyed),
                };
                prompt.message(&line);
            }
            Step::Ejected => {
                prompt.message(messages::pick(rng, EJECT_RANT));
                prompt.message(messages::pick(rng, EJECT_ORDER));
                return Err(CommerceError::Ejected);
            }
        }
    }
}
