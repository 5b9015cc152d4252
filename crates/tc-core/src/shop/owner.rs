//! Shopkeepers
//!
//! Every category has a fixed roster of owners. A town's shop is run by one
//! of them; no two towns share an owner for the same category while an
//! alternative is available.

use crate::player::Race;
use crate::rng::GameRng;

use super::ShopCategory;

/// A shopkeeper personality
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Owner {
    pub name: &'static str,
    /// Purse: the most the owner will ever pay for one sale
    pub max_cost: i64,
    /// Greed of the opening ask, in percent
    pub max_inflate: i32,
    /// Greed of the final ask, in percent
    pub min_inflate: i32,
    /// Smallest acceptable concession, in percent of the remaining gap
    pub haggle_per: i32,
    /// Insults tolerated before the door is shut
    pub insult_max: i32,
    pub race: Race,
}

const fn owner(
    name: &'static str,
    max_cost: i64,
    max_inflate: i32,
    min_inflate: i32,
    haggle_per: i32,
    insult_max: i32,
    race: Race,
) -> Owner {
    Owner {
        name,
        max_cost,
        max_inflate,
        min_inflate,
        haggle_per,
        insult_max,
        race,
    }
}

/// Owners per roster
pub const ROSTER_SIZE: usize = 4;

static ROSTERS: [[Owner; ROSTER_SIZE]; ShopCategory::COUNT] = [
    [
        owner("Bilbo the Friendly", 200, 170, 108, 5, 15, Race::Hobbit),
        owner("Raistlin the Chicken", 200, 175, 108, 4, 12, Race::Human),
        owner("Sultan the Fat", 300, 170, 107, 5, 15, Race::Gnome),
        owner("Lyar-el the Comely", 300, 165, 107, 6, 18, Race::Elf),
    ],
    [
        owner("Kon-Dar the Ugly", 5000, 210, 115, 5, 7, Race::HalfOrc),
        owner("Darg-Low the Grim", 10000, 190, 111, 4, 9, Race::Human),
        owner("Decado the Handsome", 25000, 200, 112, 4, 10, Race::Dunadan),
        owner("Mauglin the Grumpy", 30000, 200, 112, 4, 5, Race::Dwarf),
    ],
    [
        owner("Arnold the Beastly", 5000, 210, 115, 6, 6, Race::HalfTroll),
        owner("Arndal Beast-Slayer", 10000, 185, 110, 5, 9, Race::HalfElf),
        owner("Eddie Beast-Master", 25000, 190, 115, 5, 7, Race::HalfOrc),
        owner("Oglign Dragon-Slayer", 30000, 195, 112, 4, 8, Race::Dwarf),
    ],
    [
        owner("Ludwig the Humble", 5000, 175, 109, 6, 15, Race::Human),
        owner("Gunnar the Paladin", 10000, 185, 110, 5, 23, Race::Human),
        owner("Torin the Chosen", 25000, 180, 107, 6, 20, Race::Elf),
        owner("Sarastro the Wise", 30000, 185, 109, 5, 15, Race::Dunadan),
    ],
    [
        owner("Mauser the Chemist", 10000, 190, 111, 5, 8, Race::HalfElf),
        owner("Wizzle the Chaste", 10000, 190, 110, 6, 8, Race::Hobbit),
        owner("Ga-nat the Greedy", 15000, 200, 116, 6, 9, Race::Gnome),
        owner("Vella the Slender", 15000, 220, 111, 4, 9, Race::Human),
    ],
    [
        owner("Ariel the Sorceress", 15000, 200, 110, 7, 8, Race::HalfElf),
        owner("Buggerby the Great", 20000, 215, 113, 6, 10, Race::Gnome),
        owner("Inglorian the Mage", 25000, 200, 110, 7, 10, Race::Human),
        owner("Luthien Starshine", 30000, 175, 110, 5, 11, Race::HighElf),
    ],
    [
        owner("Lo-Hak the Awful", 15000, 250, 150, 10, 5, Race::HalfTroll),
        owner("Histor the Goblin", 15000, 250, 150, 10, 5, Race::HalfOrc),
        owner("Durwin the Shifty", 25000, 250, 150, 10, 5, Race::HalfOrc),
        owner("Drago the Fair", 30000, 250, 150, 10, 5, Race::Elf),
    ],
    [
        owner("Your home", 0, 100, 100, 0, 99, Race::Human),
        owner("Your home", 0, 100, 100, 0, 99, Race::Human),
        owner("Your home", 0, 100, 100, 0, 99, Race::Human),
        owner("Your home", 0, 100, 100, 0, 99, Race::Human),
    ],
    [
        owner("Dolaf the Greedy", 10000, 175, 108, 4, 12, Race::Human),
        owner("Odnar the Sage", 15000, 120, 105, 6, 16, Race::HighElf),
        owner("Gandar the Neutral", 25000, 120, 110, 7, 19, Race::Elf),
        owner("Ro-sha the Patient", 30000, 140, 105, 6, 12, Race::Dwarf),
    ],
    [
        owner("Curator Hallen", 0, 100, 100, 0, 99, Race::Dunadan),
        owner("Curator Hallen", 0, 100, 100, 0, 99, Race::Dunadan),
        owner("Curator Hallen", 0, 100, 100, 0, 99, Race::Dunadan),
        owner("Curator Hallen", 0, 100, 100, 0, 99, Race::Dunadan),
    ],
];

pub fn roster(category: ShopCategory) -> &'static [Owner; ROSTER_SIZE] {
    &ROSTERS[category.index()]
}

pub fn owner_def(category: ShopCategory, index: usize) -> &'static Owner {
    &roster(category)[index % ROSTER_SIZE]
}

/// Pick a roster index
///
/// Avoids `previous` and every index in `taken` (owners already serving the
/// same category in other towns). When the constraints leave nobody, only
/// `previous` is avoided.
pub fn select_owner(rng: &mut GameRng, previous: Option<usize>, taken: &[usize]) -> usize {
    let free: Vec<usize> = (0..ROSTER_SIZE)
        .filter(|idx| Some(*idx) != previous && !taken.contains(idx))
        .collect();
    if let Some(&pick) = rng.choose(&free) {
        return pick;
    }
    let fallback: Vec<usize> = (0..ROSTER_SIZE).filter(|idx| Some(*idx) != previous).collect();
    rng.choose(&fallback).copied().unwrap_or(0)
}
