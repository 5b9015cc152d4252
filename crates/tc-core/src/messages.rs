//! Shopkeeper remarks
//!
//! Fixed comment tables picked at random during haggling and after a sale.
//! Counter-offer lines carry a `{}` placeholder for the price.

use crate::rng::GameRng;

/// Deal accepted
pub const ACCEPTED: &[&str] = &["Okay.", "Fine.", "Accepted!", "Agreed!", "Done!", "Taken!"];

/// Counter-ask while the player is buying
const BUYING_COUNTER: &[&str] = &[
    "I can take no less than {} gold pieces.",
    "I will accept no less than {} gold pieces.",
    "Ha!  No less than {} gold pieces.",
    "You knave!  No less than {} gold pieces.",
    "That's a pittance!  I want {} gold pieces.",
    "That's an insult!  I want {} gold pieces.",
    "As if!  How about {} gold pieces?",
    "My arse!  How about {} gold pieces?",
    "May the fleas of 1000 orcs molest you!  Try {} gold pieces.",
    "May your most favourite parts go moldy!  Try {} gold pieces.",
    "May Morgoth find you tasty!  Perhaps {} gold pieces?",
    "Your mother was an Ogre!  Perhaps {} gold pieces?",
];

/// Counter-ask once the shopkeeper is annoyed
const BUYING_FINAL: &[&str] = &[
    "You try my patience.  {} is final.",
    "My patience grows thin.  {} is final.",
    "That's final!  {} gold pieces, and not a copper less.",
    "I'll not go lower than {} gold pieces.",
];

/// Counter-offer while the player is selling
const SELLING_COUNTER: &[&str] = &[
    "Perhaps {} gold pieces?",
    "How about {} gold pieces?",
    "I will pay no more than {} gold pieces.",
    "I can afford no more than {} gold pieces.",
    "Be reasonable.  How about {} gold pieces?",
    "I'll buy it as scrap for {} gold pieces.",
    "That is too much!  How about {} gold pieces?",
    "That looks war surplus!  Say {} gold pieces?",
    "Never!  {} is more like it.",
    "That's an insult!  {} is more like it.",
    "{} gold pieces and be thankful for it!",
    "{} gold pieces and not a copper more!",
];

/// Counter-offer once the shopkeeper is annoyed
const SELLING_FINAL: &[&str] = &[
    "{} gold pieces and that's final.",
    "I'll go no higher than {} gold pieces.",
    "{} is my last word.",
    "Take {} gold pieces or leave it.",
];

/// First half of an ejection
pub const EJECT_RANT: &[&str] = &[
    "Enough!  You have abused me once too often!",
    "Arghhh!  I have had enough abuse for one day!",
    "That does it!  You shall waste my time no more!",
    "This is getting nowhere!  I'm going to Londis!",
];

/// Second half of an ejection
pub const EJECT_ORDER: &[&str] = &[
    "Leave my store!",
    "Get out of my sight!",
    "Begone, you scoundrel!",
    "Out, out, out!",
];

/// Offer conceded too little
pub const INSULTED: &[&str] = &[
    "Try again.",
    "Ridiculous!",
    "You will have to do better than that!",
    "Do you wish to do business or not?",
    "You've got to be kidding!",
    "You'd better be kidding!",
    "You try my patience.",
    "Hmmm, nice weather we're having.",
];

/// Offer on the wrong side of the ask
pub const NONSENSE: &[&str] = &[
    "I must have heard you wrong.",
    "I'm sorry, I missed that.",
    "I'm sorry, what was that?",
    "Sorry, what was that again?",
];

/// Shop paid for something worthless
pub const BOUGHT_WORTHLESS: &[&str] = &[
    "Arrgghh!",
    "You bastard!",
    "You hear someone sobbing...",
    "The shopkeeper howls in agony!",
];

/// Shop paid more than the goods are worth
pub const PAID_TOO_MUCH: &[&str] = &[
    "Damn!",
    "You fiend!",
    "The shopkeeper curses at you.",
    "The shopkeeper glares at you.",
];

/// Shop got a bargain
pub const BARGAIN: &[&str] = &[
    "Cool!",
    "You've made my day!",
    "The shopkeeper giggles.",
    "The shopkeeper laughs loudly.",
];

/// Shop got a steal
pub const GREAT_BARGAIN: &[&str] = &[
    "Yipee!",
    "I think I'll retire!",
    "The shopkeeper jumps for joy.",
    "The shopkeeper smiles gleefully.",
];

/// Pick a line from `table`
pub fn pick(rng: &mut GameRng, table: &'static [&'static str]) -> &'static str {
    rng.choose(table).copied().unwrap_or_default()
}

/// Shopkeeper's counter while the player is buying
pub fn buying_counter(rng: &mut GameRng, price: i64, annoyed: bool) -> String {
    let table = if annoyed { BUYING_FINAL } else { BUYING_COUNTER };
    pick(rng, table).replace("{}", &price.to_string())
}

/// Shopkeeper's counter while the player is selling
pub fn selling_counter(rng: &mut GameRng, price: i64, annoyed: bool) -> String {
    let table = if annoyed { SELLING_FINAL } else { SELLING_COUNTER };
    pick(rng, table).replace("{}", &price.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_embed_price() {
        let mut rng = GameRng::new(1);
        for _ in 0..30 {
            assert!(buying_counter(&mut rng, 4321, false).contains("4321"));
            assert!(buying_counter(&mut rng, 4321, true).contains("4321"));
            assert!(selling_counter(&mut rng, 77, false).contains("77"));
            assert!(selling_counter(&mut rng, 77, true).contains("77"));
        }
    }

    #[test]
    fn test_pick_stays_in_table() {
        let mut rng = GameRng::new(1);
        for _ in 0..30 {
            assert!(NONSENSE.contains(&pick(&mut rng, NONSENSE)));
        }
    }
}
