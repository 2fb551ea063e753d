use armada::{init_logging, GameConfig, Match, MatchStatus, Player, Preset};
use log::LevelFilter;
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;

fn main() -> anyhow::Result<()> {
    init_logging(LevelFilter::Off);
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: {} <seed> [large|medium|small]", args[0]);
        std::process::exit(1);
    }
    let seed: u64 = args[1].parse()?;
    let preset: Preset = match args.get(2) {
        Some(name) => name.parse()?,
        None => Preset::default(),
    };

    let config = GameConfig::preset(preset);
    let mut rng = SmallRng::seed_from_u64(seed);
    let p1 = Player::bot("player1", config.clone(), &mut rng)?;
    let p2 = Player::bot("player2", config.clone(), &mut rng)?;
    let mut game = Match::new([p1, p2], 0, rng)?;

    let status = game.play_bots(2 * config.dimensions.cell_count())?;
    let winner = match status {
        MatchStatus::Won(idx) => Some(game.player(idx).name().to_string()),
        MatchStatus::InProgress => None,
    };
    let [s1, s2] = game.shots();
    let summary = |idx: usize, shots: usize| {
        let board = game.player(idx).board().board();
        json!({
            "shots": shots,
            "ships_lost": board.sunk_count(),
            "ships": board.ships_status(),
        })
    };

    let result = json!({
        "seed": seed,
        "preset": preset.to_string(),
        "player1": summary(0, s1),
        "player2": summary(1, s2),
        "winner": winner,
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
