//! Player and shopkeeper races

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Races that appear among customers and shopkeepers
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
#[repr(u8)]
pub enum Race {
    #[default]
    Human = 0,
    #[strum(to_string = "Half-Elf", serialize = "halfelf")]
    HalfElf = 1,
    Elf = 2,
    Hobbit = 3,
    Gnome = 4,
    Dwarf = 5,
    #[strum(to_string = "Half-Orc", serialize = "halforc")]
    HalfOrc = 6,
    #[strum(to_string = "Half-Troll", serialize = "halftroll")]
    HalfTroll = 7,
    Dunadan = 8,
    #[strum(to_string = "High-Elf", serialize = "highelf")]
    HighElf = 9,
}

impl Race {
    pub const COUNT: usize = 10;

    pub fn index(self) -> usize {
        self as usize
    }
}
