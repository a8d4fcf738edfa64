//! Deckbattle - battle binary
//!
//! Auto-plays battles with a scripted controller: one logged fight, or a
//! silent batch summarized at the end.

use clap::{Args, Parser, Subcommand};
use deckbattle::{
    game::{
        compute_state_hash, short_hash, Battle, BattleConfig, BattleLoop, BattleOutcomeHandler,
        BattleReport, SeededRandom, VerbosityLevel,
    },
    loader::{catalog, CardDatabase, DeckLoader, EnemyDatabase},
    simulation::{self, ControllerType, SimulationSetup},
    BattleError, Result,
};
use std::path::PathBuf;

/// Verbosity level for battle output (custom parser supporting both names and numbers)
#[derive(Debug, Clone, Copy)]
struct VerbosityArg(VerbosityLevel);

impl std::str::FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityArg(VerbosityLevel::Silent)),
            "minimal" | "1" => Ok(VerbosityArg(VerbosityLevel::Minimal)),
            "normal" | "2" => Ok(VerbosityArg(VerbosityLevel::Normal)),
            "verbose" | "3" => Ok(VerbosityArg(VerbosityLevel::Verbose)),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

impl From<VerbosityArg> for VerbosityLevel {
    fn from(arg: VerbosityArg) -> Self {
        arg.0
    }
}

#[derive(Parser)]
#[command(name = "battle")]
#[command(about = "Deckbattle - deck-building battle engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Where the character, enemy, and rules come from
#[derive(Args, Debug, Clone)]
struct DataArgs {
    /// Deck file (.dck); defaults to the starter deck
    #[arg(long, value_name = "DECK_FILE")]
    deck: Option<PathBuf>,

    /// Enemy template id
    #[arg(long, default_value = "jaw_worm")]
    enemy: String,

    /// Card-definition table (JSON); defaults to the built-in catalog
    #[arg(long, value_name = "CARDS_FILE")]
    cards: Option<PathBuf>,

    /// Enemy-template table (JSON); defaults to the built-in catalog
    #[arg(long, value_name = "ENEMIES_FILE")]
    enemies: Option<PathBuf>,

    /// Battle configuration (JSON)
    #[arg(long, value_name = "CONFIG_FILE")]
    config: Option<PathBuf>,

    /// Set random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Controller playing the character
    #[arg(long, value_enum, default_value = "greedy")]
    controller: ControllerType,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a single battle with per-action logging
    Fight {
        #[command(flatten)]
        data: DataArgs,

        /// Verbosity level for battle output (0=silent, 1=minimal, 2=normal, 3=verbose)
        #[arg(long, default_value = "normal", short = 'v')]
        verbosity: VerbosityArg,
    },

    /// Run many silent battles in parallel and print aggregate statistics
    Simulate {
        #[command(flatten)]
        data: DataArgs,

        /// Number of battles to run
        #[arg(long, short = 'n', default_value_t = 1000)]
        battles: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Fight { data, verbosity } => run_fight(data, verbosity.into()).await?,
        Commands::Simulate { data, battles } => run_simulate(data, battles).await?,
    }

    Ok(())
}

/// Load tables, deck, and config, falling back to the built-in catalog
async fn load_setup(data: &DataArgs) -> Result<SimulationSetup> {
    let cards = match &data.cards {
        Some(path) => CardDatabase::load(path).await?,
        None => catalog::starter_cards()?,
    };
    let enemies = match &data.enemies {
        Some(path) => EnemyDatabase::load(path).await?,
        None => catalog::starter_enemies()?,
    };
    let deck_list = match &data.deck {
        Some(path) => DeckLoader::load_from_file(path).await?,
        None => catalog::starter_deck()?,
    };
    let config = match &data.config {
        Some(path) => BattleConfig::load(path).await?,
        None => BattleConfig::default(),
    };

    let deck = deck_list.instantiate(&cards)?;
    if deck.len() < config.min_deck_size {
        return Err(BattleError::DeckBelowMinimum {
            size: deck.len(),
            minimum: config.min_deck_size,
        });
    }
    println!("  Deck: {} cards", deck.len());

    let enemy = enemies.spawn(&data.enemy)?;
    println!("  Enemy: {} ({} HP)", enemy.name, enemy.max_health);

    Ok(SimulationSetup {
        character: catalog::starter_character(deck),
        enemy,
        config,
    })
}

/// Prints the report the loop hands back when a battle ends
struct PrintingHandler;

impl BattleOutcomeHandler for PrintingHandler {
    fn on_battle_end(&mut self, report: &BattleReport) {
        println!("\n=== Battle Over ===");
        println!("  Result: {:?}", report.end_reason);
        println!("  Turns: {}", report.turns_played);
        println!("  Cards played: {}", report.cards_played);
        println!("  Damage dealt: {}", report.damage_dealt);
        println!("  Damage taken: {}", report.damage_taken);
        println!("  Player HP: {}", report.player_health);
        println!("  Enemy HP: {}", report.enemy_health);
    }
}

async fn run_fight(data: DataArgs, verbosity: VerbosityLevel) -> Result<()> {
    println!("=== Deckbattle - Fight ===\n");
    println!("Loading battle data...");
    let setup = load_setup(&data).await?;

    let rng = match data.seed {
        Some(seed) => {
            println!("Using random seed: {seed}");
            SeededRandom::new(seed)
        }
        None => SeededRandom::from_entropy(),
    };
    let mut controller = data
        .controller
        .build(data.seed.map_or_else(rand::random, |s| s.wrapping_add(1)));
    println!("Controller: {:?}\n", data.controller);

    let mut battle = Battle::start(setup.character, setup.enemy, setup.config, rng);
    BattleLoop::new(&mut battle)
        .with_verbosity(verbosity)
        .run(&mut *controller, &mut PrintingHandler)?;
    println!("  State hash: {}", short_hash(compute_state_hash(&battle)));

    Ok(())
}

async fn run_simulate(data: DataArgs, battles: usize) -> Result<()> {
    println!("=== Deckbattle - Simulation ===\n");
    println!("Loading battle data...");
    let setup = load_setup(&data).await?;

    let seed = data.seed.unwrap_or_else(rand::random);
    println!("Running {battles} battles with seed {seed}");
    println!("Controller: {:?}\n", data.controller);

    let summary = simulation::simulate(&setup, battles, data.controller, seed)?;

    println!("=== Simulation Complete ===");
    println!("{summary}");
    println!("Elapsed time: {:.2}s", summary.elapsed.as_secs_f64());
    if summary.elapsed.as_secs_f64() > 0.0 {
        println!(
            "Battles per second: {:.2}",
            summary.battles as f64 / summary.elapsed.as_secs_f64()
        );
    }

    Ok(())
}
