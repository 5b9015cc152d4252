//! tc-core: town commerce engine
//!
//! Shops that stock themselves over time, price goods by owner greed and
//! customer standing, and haggle with the player one offer at a time.
//!
//! The crate does no terminal I/O. A front end implements [`shop::Prompt`]
//! and drives a visit with [`shop::visit`].

pub mod config;
pub mod consts;
pub mod diary;
pub mod error;
pub mod messages;
pub mod object;
pub mod player;
pub mod rng;
pub mod shop;

pub use config::CommerceConfig;
pub use diary::{Diary, DiaryEntry, DiaryKind, MemoryDiary};
pub use error::{CommerceError, ConfigError, DiaryError};
pub use rng::GameRng;
