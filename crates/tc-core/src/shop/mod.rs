//! Town shops
//!
//! Categories and their wares, pricing, stock piles and ledgers, restocking,
//! haggling, owner rosters, the world of towns and the visit controller.

mod category;
mod haggle;
mod ledger;
mod owner;
mod pile;
mod pricing;
mod prompt;
mod restock;
mod session;
mod store;
mod town;

pub use category::{BuyRule, ShopCategory};
pub use haggle::{Agreement, InvalidOffer, Negotiation, OfferEntry, Phase, Step, haggle};
pub use ledger::{StackRule, StockLedger, ledger_capacity};
pub use owner::{Owner, ROSTER_SIZE, owner_def, roster, select_owner};
pub use pile::{mass_produce, roll_discount};
pub use pricing::{PriceFactors, Trade, price_for, price_item};
pub use prompt::{Prompt, Redraw, StockPage, StockRow, ask_quantity, letter_index};
pub use restock::{Neighbours, Restocker, black_market_crap, catch_up_rounds};
pub use session::{Flow, Session, VisitSummary, examine_lines, purchase_analysis, row_price, visit};
pub use store::Shop;
pub use town::{Commerce, ON_SALE, Town};
