use armada::{
    init_logging, place_ships_randomly, ui, Board, GameBoard, GameConfig, HuntTarget, Match,
    MatchStatus, Player, Preset, Turn,
};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Grid and fleet to play with; defaults to ARMADA_PRESET or `large`.
    #[arg(long, value_enum, global = true)]
    preset: Option<Preset>,
    /// Fix RNG seed for reproducible runs (e.g., --seed 12345).
    #[arg(long, global = true)]
    seed: Option<u64>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Two bots play each other on the local machine.
    Local {
        /// Number of rounds to play.
        #[arg(long, default_value_t = 1)]
        rounds: u32,
        /// Keep each bot's fleet between rounds.
        #[arg(long)]
        keep_fleet: bool,
        /// Print every shot.
        #[arg(long)]
        verbose: bool,
    },
    /// Place a fleet at random and print it.
    Place,
    /// Let a bot hunt down a random fleet and report how many shots it took.
    Hunt,
}

fn rng_from(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => SmallRng::from_rng(&mut rand::rng()),
    }
}

fn print_turn(m: &Match, turn: &Turn) {
    println!(
        "{} fires at {}: {:?}",
        m.player(turn.shooter).name(),
        turn.coords,
        turn.result
    );
}

fn run_local(
    config: GameConfig,
    mut rng: SmallRng,
    rounds: u32,
    keep_fleet: bool,
    verbose: bool,
) -> anyhow::Result<()> {
    let first = Player::bot("bot-1", config.clone(), &mut rng)?;
    let second = Player::bot("bot-2", config.clone(), &mut rng)?;
    let mut game = Match::new([first, second], 0, rng)?;
    let max_shots = 2 * config.dimensions.cell_count();

    for round in 1..=rounds {
        if round > 1 {
            game.rematch(keep_fleet)?;
        }
        println!("Round {round}");
        let mut fired = 0;
        while game.status() == MatchStatus::InProgress {
            if fired == max_shots {
                bail!("round {round} did not finish within {max_shots} shots");
            }
            let turn = game.play_bot_turn()?;
            fired += 1;
            if verbose {
                print_turn(&game, &turn);
            }
        }
        let winner = game.winner().context("round ended without a winner")?;
        println!("{} wins round {round}", winner.name());
        for (idx, p) in game.players().iter().enumerate() {
            let opponent = game.player(1 - idx);
            ui::print_player_view(p.name(), p.board().board(), opponent.board().board());
        }
    }

    let [a, b] = game.players();
    println!(
        "Final score: {} {} - {} {}",
        a.name(),
        a.score(),
        b.score(),
        b.name()
    );
    Ok(())
}

fn run_place(config: GameConfig, mut rng: SmallRng) -> anyhow::Result<()> {
    let mut board = Board::new(config.dimensions);
    if !place_ships_randomly(&config.lengths, &mut board, &mut rng) {
        bail!("no placement of {:?} fits a {} grid", config.lengths, config.dimensions);
    }
    for rect in board.ships_coords() {
        println!("{} (length {})", rect, rect.len());
    }
    print!("{}", ui::render_board(&board, true));
    Ok(())
}

fn run_hunt(config: GameConfig, mut rng: SmallRng) -> anyhow::Result<()> {
    let mut board = Board::new(config.dimensions);
    if !place_ships_randomly(&config.lengths, &mut board, &mut rng) {
        bail!("no placement of {:?} fits a {} grid", config.lengths, config.dimensions);
    }
    let mut bot = HuntTarget::new(&board, SmallRng::from_rng(&mut rng));
    let mut shots = 0;
    while !board.is_fleet_sunk() {
        bot.attack(&mut board)?;
        shots += 1;
    }
    print!("{}", ui::render_board(&board, true));
    println!(
        "fleet of {} ships sunk in {} shots ({} cells)",
        board.ship_count(),
        shots,
        config.dimensions.cell_count()
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_logging(LevelFilter::Warn);
    let cli = Cli::parse();

    let config = match cli.preset {
        Some(p) => GameConfig::preset(p),
        None => GameConfig::from_env(),
    };
    if let Some(s) = cli.seed {
        println!("Using fixed seed: {} (run will be reproducible)", s);
    }
    let rng = rng_from(cli.seed);

    match cli.command {
        Commands::Local {
            rounds,
            keep_fleet,
            verbose,
        } => run_local(config, rng, rounds, keep_fleet, verbose),
        Commands::Place => run_place(config, rng),
        Commands::Hunt => run_hunt(config, rng),
    }
}
