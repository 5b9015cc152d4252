//! Input and display collaborator
//!
//! The commerce engine never touches a terminal. It talks to the player
//! through [`Prompt`], whose calls block until the player answers; `None`
//! from an input call is the escape key.

use bitflags::bitflags;

bitflags! {
    /// Panels the front end should refresh
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Redraw: u8 {
        const GOLD = 1 << 0;
        const INVENTORY = 1 << 1;
        const STOCK = 1 << 2;
    }
}

/// One displayed ledger row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockRow {
    /// Selection letter, `a` for the first row of the page
    pub label: char,
    pub description: String,
    /// Per-unit price; `None` in the home and the museum
    pub price: Option<i64>,
    /// Price is settled and will not be haggled
    pub fixed: bool,
}

/// The ledger page currently on screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockPage {
    pub title: String,
    pub owner: String,
    /// Owner purse for ordinary shops
    pub purse: Option<i64>,
    pub rows: Vec<StockRow>,
    /// Zero-based page number
    pub page: usize,
    pub pages: usize,
    pub gold: i64,
}

/// Blocking prompt and message layer
pub trait Prompt {
    /// Show a message line
    fn message(&mut self, text: &str);

    /// Single keypress menu choice
    fn menu_key(&mut self, prompt: &str) -> Option<char>;

    /// Free text or numeric entry, pre-filled with `default`
    fn text_entry(&mut self, prompt: &str, default: &str) -> Option<String>;

    /// Yes/no question
    fn confirm(&mut self, prompt: &str) -> bool;

    /// Render a ledger page
    fn show_stock(&mut self, page: &StockPage);

    /// List pack items the next menu key chooses from
    fn show_choices(&mut self, _title: &str, _choices: &[String]) {}

    /// Refresh status panels
    fn redraw(&mut self, _what: Redraw) {}
}

/// Ask for a quantity between 1 and `max`; a blank answer means one
///
/// Returns `None` on escape or an unusable answer.
pub fn ask_quantity(prompt: &mut dyn Prompt, question: &str, max: u8) -> Option<u8> {
    if max <= 1 {
        return (max == 1).then_some(1);
    }
    let text = prompt.text_entry(&format!("{question} (1-{max}): "), "1")?;
    let text = text.trim();
    if text.is_empty() {
        return Some(1);
    }
    let amount: i64 = text.parse().ok()?;
    (amount > 0).then(|| amount.min(max as i64) as u8)
}

/// Map a menu key to an index among `count` choices
pub fn letter_index(key: char, count: usize) -> Option<usize> {
    let idx = (key as u32).checked_sub('a' as u32)? as usize;
    (idx < count).then_some(idx)
}
