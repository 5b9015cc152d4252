//! Commerce errors
//!
//! Every refusal a shop can hand out is a recoverable [`CommerceError`]; the
//! session reports it as a message and leaves ledger and purse untouched.

use thiserror::Error;

/// Recoverable refusals raised by shop commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommerceError {
    #[error("You see no store here.")]
    NoShopHere,

    #[error("The doors are locked.")]
    Locked { reopens_at: i64 },

    #[error("I do not buy that kind of thing.")]
    WillNotBuy,

    #[error("That is worthless to me.")]
    Worthless,

    #[error("I have not the room in my store to keep it.")]
    StockFull,

    #[error("You cannot carry that many different items.")]
    PackFull,

    #[error("You do not have enough gold.")]
    InsufficientFunds { price: i64, gold: i64 },

    #[error("You have been thrown out of the shop.")]
    Ejected,

    #[error("Never mind.")]
    Cancelled,

    #[error("I am currently out of stock.")]
    Empty,

    #[error("You have nothing that I want.")]
    NothingToSell,

    #[error("You have nothing to put down.")]
    PackEmpty,

    #[error("Your home is empty.")]
    HomeEmpty,

    #[error("Your home is full.")]
    HomeFull,

    #[error("The Museum is empty.")]
    MuseumEmpty,

    #[error("The Museum already has one of those items.")]
    AlreadyDisplayed,
}

impl CommerceError {
    /// True when the error ends the whole visit rather than one command
    pub fn ends_visit(&self) -> bool {
        matches!(self, CommerceError::Ejected | CommerceError::Locked { .. })
    }
}

/// Failures while loading [`crate::CommerceConfig`]
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failure reported by a diary collaborator; never fatal
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("diary unavailable: {reason}")]
pub struct DiaryError {
    pub reason: String,
}
