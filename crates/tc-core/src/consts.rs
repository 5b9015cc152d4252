//! Commerce constants
//!
//! Stock bounds, clock rates and haggling thresholds shared by every shop.

/// Slots in an ordinary shop ledger
pub const STORE_INVEN_MAX: usize = 24;

/// Nominal slots in the player's home
pub const HOME_INVEN_MAX: usize = STORE_INVEN_MAX * 10;

/// Home slots usable without the expansion option (a tenth of nominal)
pub const HOME_INVEN_BASIC: usize = HOME_INVEN_MAX / 10;

/// Slots in the museum display
pub const MUSEUM_INVEN_MAX: usize = STORE_INVEN_MAX * 50;

/// Stock bounds maintained by the restocking scheduler
pub const STORE_MIN_KEEP: usize = 6;
pub const STORE_MAX_KEEP: usize = 18;

/// Maximum number of stacks turned over per maintenance round
pub const STORE_TURNOVER: u32 = 9;

/// Upper generation depth for ordinary shop stock
pub const STORE_OBJ_LEVEL: i32 = 5;

/// Attempts per stock creation before giving up on a slot
pub const STORE_CREATE_TRIES: u32 = 4;

/// Black market stock is drawn from this depth plus up to the same again
pub const BLACK_MARKET_DEPTH: i32 = 25;

/// Black market refuses candidates worth less than this
pub const BLACK_MARKET_MIN_VALUE: i64 = 10;

/// Game turns per game tick
pub const TURNS_PER_TICK: i64 = 10;

/// Ticks between two maintenance rounds
pub const STORE_TICKS: i64 = 1000;

/// Game turns between two maintenance rounds
pub const TURNS_PER_MAINTENANCE: i64 = TURNS_PER_TICK * STORE_TICKS;

/// Catch-up maintenance rounds run on entry are capped at this
pub const MAX_CATCHUP_ROUNDS: i64 = 10;

/// Maintenance rounds run when a purchase empties the shop
pub const EMPTY_RESTOCK_ROUNDS: usize = 10;

/// Length of a day in ticks
pub const TOWN_DAWN: i64 = 10000;

/// Fixed part of a lockout, also the bound of its random part
pub const LOCKOUT_TURNS: i64 = TURNS_PER_TICK * TOWN_DAWN / 8;

/// Game turns consumed by a completed purchase or sale
pub const TRANSACTION_TURNS: i64 = TURNS_PER_TICK;

/// Largest stack a shop will hold of one item
pub const MAX_STACK: u8 = 99;

/// Largest quantity representable in a stack
pub const MAX_QUANTITY: i32 = 255;

/// Largest aggregate timeout a rod stack may carry
pub const MAX_ROD_TIMEOUT: i32 = i16::MAX as i32;

/// Player pack slots
pub const PACK_SLOTS: usize = 22;

/// Ledger rows shown per page
pub const STOCK_PAGE: usize = 12;

/// Good/bad bargain counters saturate here
pub const BARGAIN_SATURATION: u16 = i16::MAX as u16;

/// Floor prices below this never need haggling and never move the counters
pub const TRIVIAL_PRICE: i64 = 10;

/// Rounds a shopkeeper tolerates being pinned at the final price
pub const MAX_ANNOYED: u32 = 3;

/// Items cheaper than this are never discounted
pub const MIN_DISCOUNT_VALUE: i64 = 5;

/// Discount applied to every stack when an owner retires
pub const SHUFFLE_DISCOUNT: u8 = 50;

/// Last visit stamp of a fresh shop, so the first entry runs full catch-up
pub const NEVER_VISITED: i64 = -MAX_CATCHUP_ROUNDS * TURNS_PER_MAINTENANCE;
