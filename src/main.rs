use anyhow::Context;
use chrono::Timelike;
use creature_battle::prelude::*;
use creature_battle::simulate::{simulate_wild_battles, WildSetup};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::env;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
struct CliOptions {
    party_path: Option<PathBuf>,
    wild: String,
    foe_moves: Vec<String>,
    level: u8,
    trainer: Option<String>,
    seed: u64,
    battles: usize,
    ball: Option<BallKind>,
    config_path: Option<PathBuf>,
    log_json: Option<PathBuf>,
    save_party: Option<PathBuf>,
}

fn usage() -> ! {
    eprintln!(
        "Usage: creature-battle [--party party.json] [--wild SPECIES] [--moves m1,m2] [--level N] \
[--trainer NAME] [--seed SEED] [--battles N] [--ball BALL] [--config config.json] [--log-json log.json] \
[--save-party party.json]"
    );
    std::process::exit(1);
}

fn parse_args() -> anyhow::Result<CliOptions> {
    let mut opts = CliOptions {
        party_path: None,
        wild: "rattata".to_string(),
        foe_moves: vec!["tackle".to_string()],
        level: 5,
        trainer: None,
        seed: 0,
        battles: 1,
        ball: None,
        config_path: None,
        log_json: None,
        save_party: None,
    };

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        let mut value = |what: &str| {
            args.next()
                .ok_or_else(|| anyhow::anyhow!("{arg} requires {what}"))
        };
        match arg.as_str() {
            "--party" => opts.party_path = Some(PathBuf::from(value("a path")?)),
            "--wild" => opts.wild = value("a species id")?,
            "--moves" => {
                opts.foe_moves = value("a comma separated move list")?
                    .split(',')
                    .map(|m| m.trim().to_string())
                    .filter(|m| !m.is_empty())
                    .collect();
            }
            "--level" => opts.level = value("a number")?.parse()?,
            "--trainer" => opts.trainer = Some(value("a name")?),
            "--seed" => opts.seed = value("a number")?.parse()?,
            "--battles" => opts.battles = value("a number")?.parse()?,
            "--ball" => {
                let raw = value("a ball name")?;
                let ball = raw
                    .parse()
                    .map_err(|_| anyhow::anyhow!("Unknown ball {raw}"))?;
                opts.ball = Some(ball);
            }
            "--config" => opts.config_path = Some(PathBuf::from(value("a path")?)),
            "--log-json" => opts.log_json = Some(PathBuf::from(value("a path")?)),
            "--save-party" => opts.save_party = Some(PathBuf::from(value("a path")?)),
            "--help" | "-h" => usage(),
            other => anyhow::bail!("Unknown argument {other}"),
        }
    }
    Ok(opts)
}

fn load_config(opts: &CliOptions) -> anyhow::Result<BattleConfig> {
    let mut config = match &opts.config_path {
        Some(path) => BattleConfig::load(path)?,
        None => BattleConfig::default(),
    };
    if config.local_hour.is_none() {
        config.local_hour = u8::try_from(chrono::Local::now().hour()).ok();
    }
    Ok(config)
}

fn load_party(opts: &CliOptions) -> anyhow::Result<Vec<Creature>> {
    match &opts.party_path {
        Some(path) => JsonPartyStore::new(path).load(),
        None => {
            let starter = Creature::new("charmander", 10, Nature::Hardy, &["scratch", "growl", "ember"])?;
            Ok(vec![starter])
        }
    }
}

fn build_foe(opts: &CliOptions) -> anyhow::Result<Creature> {
    let moves: Vec<&str> = opts.foe_moves.iter().map(String::as_str).collect();
    Creature::new(&opts.wild, opts.level, Nature::Hardy, &moves)
        .with_context(|| format!("cannot build {} at level {}", opts.wild, opts.level))
}

/// Prints battle text to stdout as it is presented.
struct ConsolePresenter;

impl BattlePresenter for ConsolePresenter {
    fn show_message(&mut self, text: &str) {
        println!("{text}");
    }

    fn update_hp(&mut self, side: SideId, hp: u16, max_hp: u16) {
        let who = match side {
            SideId::Player => "you",
            SideId::Opponent => "foe",
        };
        println!("  [{who} {hp}/{max_hp}]");
    }

    fn battle_ended(&mut self, result: &BattleResult) {
        println!("== {result:?} ==");
    }
}

fn narrate(report: &TurnReport, log: &mut BattleLog) {
    report.present(&mut ConsolePresenter);
    log.record(report);
}

fn run_single(opts: &CliOptions, config: BattleConfig, party: Vec<Creature>) -> anyhow::Result<()> {
    let foe = build_foe(opts)?;
    let rng = SmallRng::seed_from_u64(opts.seed);
    let player = Party::from_creatures(party)?;
    let mut battle = match &opts.trainer {
        Some(name) => Battle::trainer(name.clone(), player, Party::from_creatures([foe])?, rng)?,
        None => Battle::wild(player, foe, rng)?,
    }
    .with_config(config);

    let mut log = BattleLog::with_format(if opts.trainer.is_some() { "trainerbattle" } else { "wildbattle" });
    let mut player_rng = SmallRng::seed_from_u64(opts.seed.wrapping_add(1));
    let mut policy = RandomAI;
    narrate(&battle.start(), &mut log);

    const MAX_TURNS: u32 = 500;
    while !battle.is_over() && battle.turn() < MAX_TURNS {
        if let BattlePhase::ForcedSwitch(SideId::Player) = battle.phase() {
            narrate(&battle.choose_replacement(0)?, &mut log);
            continue;
        }
        let legal = battle.legal_actions(SideId::Player);
        let player_action = match battle.side(SideId::Player).active_creature() {
            Some(own) => {
                let foe = battle.side(SideId::Opponent).active_creature();
                policy.choose_action(own, foe, &legal, &mut player_rng)
            }
            None => Action::Struggle,
        };
        let opponent_action = battle.opponent_action();
        let report = battle.resolve_turn(player_action, opponent_action)?;
        narrate(&report, &mut log);
    }

    let outcome = battle.finish();
    info!(result = ?outcome.result, turns = outcome.turns, caught = outcome.pokedex.len(), "battle finished");

    if let Some(path) = &opts.log_json {
        let json = serde_json::to_string_pretty(&log.to_json())?;
        std::fs::write(path, json).with_context(|| format!("failed to write log {}", path.display()))?;
    }
    if let Some(path) = &opts.save_party {
        let store = JsonPartyStore::new(path);
        store.save_with_storage(&outcome.party, &outcome.storage)?;
        println!("Saved {} creatures to {}", outcome.party.len(), path.display());
        if !outcome.storage.is_empty() {
            println!("Sent {} to {}", outcome.storage.len(), store.storage_path().display());
        }
    }
    Ok(())
}

fn run_batch(opts: &CliOptions, config: BattleConfig, party: Vec<Creature>) -> anyhow::Result<()> {
    if opts.trainer.is_some() {
        anyhow::bail!("--battles only supports wild battles");
    }
    let mut setup = WildSetup::new(party, build_foe(opts)?);
    setup.config = config;
    setup.ball = opts.ball;
    let summary = simulate_wild_battles(&setup, opts.battles, opts.seed)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    println!("average turns: {:.2}", summary.average_turns());
    Ok(())
}

fn run(opts: CliOptions) -> anyhow::Result<()> {
    let config = load_config(&opts)?;
    let party = load_party(&opts)?;
    if opts.battles > 1 {
        run_batch(&opts, config, party)
    } else {
        run_single(&opts, config, party)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with_writer(std::io::stderr)
        .init();
    let opts = parse_args()?;
    run(opts)
}
