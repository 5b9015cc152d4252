//! Town commerce in a terminal
//!
//! Builds a world of towns, puts a player at a shop entrance and runs one
//! visit over plain stdin/stdout.

use std::error::Error;
use std::io::{self, BufRead, Lines, StdinLock, Write};
use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;
use strum::IntoEnumIterator;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tc_core::object::catalogue::lookup;
use tc_core::object::{Forge, Item, ItemKind};
use tc_core::player::{Location, MAX_CHARISMA_INDEX, Player, Race};
use tc_core::shop::{Commerce, Prompt, ShopCategory, StockPage, visit};
use tc_core::{CommerceConfig, GameRng, MemoryDiary};

/// Visit a town shop
#[derive(Parser, Debug)]
#[command(name = "tc-shop")]
#[command(author, version, about = "Haggle with a town shopkeeper", long_about = None)]
struct Args {
    /// Shop to enter (general, armoury, weaponsmith, temple, alchemist,
    /// magic, blackmarket, home, bookstore, museum)
    #[arg(short = 's', long = "shop", default_value = "general")]
    shop: String,

    /// Number of towns in the world
    #[arg(long = "towns", default_value_t = 1)]
    towns: usize,

    /// Town the shop is in
    #[arg(short = 't', long = "town", default_value_t = 0)]
    town: usize,

    /// Player name
    #[arg(short = 'u', long = "name", default_value = "Adventurer")]
    name: String,

    /// Player race (e.g., Human, Dwarf, Half-Orc)
    #[arg(short = 'r', long = "race", default_value = "human")]
    race: String,

    /// Charisma stat index (0 is 3, 15 is 18/00, 37 is 18/220)
    #[arg(short = 'c', long = "charisma", default_value_t = 15)]
    charisma: u8,

    /// Starting gold
    #[arg(short = 'g', long = "gold", default_value_t = 600)]
    gold: i64,

    /// Seed for the random number generator
    #[arg(long = "seed")]
    seed: Option<u64>,

    /// Commerce options as JSON
    #[arg(long = "config")]
    config: Option<PathBuf>,

    /// Settle prices at once instead of haggling
    #[arg(long = "auto-haggle")]
    auto_haggle: bool,
}

/// Prompt layer over stdin/stdout; end of input is the escape key
struct LinePrompt {
    lines: Lines<StdinLock<'static>>,
}

impl LinePrompt {
    fn new() -> Self {
        Self {
            lines: io::stdin().lock().lines(),
        }
    }

    fn ask(&mut self, prompt: &str) -> Option<String> {
        print!("{prompt}");
        io::stdout().flush().ok()?;
        self.lines.next()?.ok()
    }
}

impl Prompt for LinePrompt {
    fn message(&mut self, text: &str) {
        println!("{text}");
    }

    fn menu_key(&mut self, prompt: &str) -> Option<char> {
        self.ask(prompt)?.chars().next()
    }

    fn text_entry(&mut self, prompt: &str, default: &str) -> Option<String> {
        let prompt = if default.is_empty() {
            prompt.to_string()
        } else {
            format!("{prompt}[{default}] ")
        };
        self.ask(&prompt)
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        self.ask(&format!("{prompt}[y/n] "))
            .is_some_and(|answer| answer.trim_start().starts_with(['y', 'Y']))
    }

    fn show_stock(&mut self, page: &StockPage) {
        println!();
        println!("{}  -  {}", page.owner, page.title);
        for row in &page.rows {
            match row.price {
                Some(price) => println!(
                    "{}) {:<50} {:>7}{}",
                    row.label,
                    row.description,
                    price,
                    if row.fixed { " F" } else { "" }
                ),
                None => println!("{}) {}", row.label, row.description),
            }
        }
        if page.pages > 1 {
            println!("(Page {} of {})", page.page + 1, page.pages);
        }
        println!("Gold Remaining: {}", page.gold);
        println!("p) Purchase  s) Sell  x) Examine  SPACE/-) Page  q) Leave");
    }

    fn show_choices(&mut self, title: &str, choices: &[String]) {
        println!("{}", title.trim_end());
        for choice in choices {
            println!("  {choice}");
        }
    }
}

/// A few things worth selling
fn starting_pack(player: &mut Player) {
    let pack = [
        (ItemKind::Sword, 6, 1),
        (ItemKind::Flask, 1, 5),
        (ItemKind::Potion, 2, 2),
        (ItemKind::Statue, 1, 1),
    ];
    for (kind, sval, quantity) in pack {
        if let Some(id) = lookup(kind, sval) {
            player.inventory.carry(Item::new(id).with_quantity(quantity));
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tc_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();

    let category = ShopCategory::from_str(&args.shop).map_err(|_| {
        let names: Vec<String> = ShopCategory::iter().map(|c| c.to_string()).collect();
        format!("unknown shop '{}'; try one of: {}", args.shop, names.join(", "))
    })?;
    let race = Race::from_str(&args.race)?;

    let mut config = match &args.config {
        Some(path) => CommerceConfig::load(path)?,
        None => CommerceConfig::default(),
    };
    if args.auto_haggle {
        config.manual_haggle = false;
    }

    let rng = match args.seed {
        Some(seed) => GameRng::new(seed),
        None => GameRng::from_entropy(),
    };
    let mut forge = Forge;
    let mut world = Commerce::new(args.towns, config, rng, &mut forge);

    let mut player = Player::new(args.name, race);
    player.charisma = args.charisma.min(MAX_CHARISMA_INDEX);
    player.gold = args.gold;
    player.location = Location::at_shop(args.town.min(world.towns.len() - 1), category);
    starting_pack(&mut player);

    let mut prompt = LinePrompt::new();
    let mut diary = MemoryDiary::default();
    match visit(&mut world, &mut player, &mut prompt, &mut diary, &mut forge) {
        Ok(summary) => {
            println!();
            if summary.ejected {
                println!("You were thrown out.");
            }
            println!(
                "Bought {} ({} gold), sold {} ({} gold); {} turns passed.",
                summary.purchases,
                summary.gold_spent,
                summary.sales,
                summary.gold_earned,
                summary.turns
            );
            for entry in &diary.entries {
                println!("turn {:>6}: {}", entry.turn, entry.text());
            }
        }
        Err(err) => println!("{err}"),
    }
    Ok(())
}
