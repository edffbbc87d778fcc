//! Tournament CLI
//!
//! Run refereed matches between UHP engines and track Elo ratings.

use std::env;
use std::path::Path;

use tournament::{
    launch, EloTracker, EngineSpec, MatchConfig, MatchOutcome, MatchRunner, TournamentResults,
    TournamentSpec,
};
use tracing::error;
use tracing_subscriber::EnvFilter;
use uhp_core::UhpError;

const DEFAULT_ELO_PATH: &str = "tournament_elo.json";

fn print_usage() {
    println!("UHP Tournament Runner");
    println!();
    println!("Usage:");
    println!("  tournament run <tournament.toml> [--results FILE] [--elo FILE]");
    println!("  tournament leaderboard [--elo FILE]");
    println!();
    println!("The tournament file lists the referee, the engine roster, the");
    println!("pairings to play, and per-match settings; see");
    println!("demos/tournament.toml for the format.");
    println!();
    println!("Environment:");
    println!("  RUST_LOG    log verbosity (e.g. RUST_LOG=tournament=info)");
}

fn run_tournament(args: &[String]) {
    if args.is_empty() {
        eprintln!("Error: run requires a tournament file");
        print_usage();
        return;
    }

    let spec_path = &args[0];
    let mut results_path: Option<String> = None;
    let mut elo_path = DEFAULT_ELO_PATH.to_string();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--results" | "-r" => {
                if i + 1 < args.len() {
                    results_path = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--elo" | "-e" => {
                if i + 1 < args.len() {
                    elo_path = args[i + 1].clone();
                    i += 1;
                }
            }
            _ => {}
        }
        i += 1;
    }

    let spec = match TournamentSpec::load(Path::new(spec_path)) {
        Ok(spec) => spec,
        Err(e) => {
            eprintln!("Error: {}", e);
            return;
        }
    };

    let matchups = spec.matchups();
    println!("=== Tournament: {} ===", spec.name);
    println!("Matches to play: {}", matchups.len());
    println!();

    let mut tracker = EloTracker::load(&elo_path).unwrap_or_default();
    let mut results = TournamentResults::new(
        &spec.name,
        spec.engines.iter().map(|e| e.name.clone()).collect(),
    );
    let config = spec.settings.match_config();

    for (game_num, (first, second)) in matchups.iter().enumerate() {
        println!(
            "--- Game {}/{}: {} vs {} ---",
            game_num + 1,
            matchups.len(),
            first.name,
            second.name
        );

        match play_matchup(&spec.referee, first, second, config.clone()) {
            Ok(outcome) => {
                println!(
                    "Result: {} ({}) in {:.1?}",
                    outcome.result.marker(),
                    outcome.reason,
                    outcome.elapsed
                );
                tracker.update_game(&first.name, &second.name, outcome.result, &outcome.reason);
                results.add_game(&first.name, &second.name, outcome);
            }
            Err(e) => {
                // A failed handshake forfeits no one; report it and move on
                error!(first = %first.name, second = %second.name, %e, "match attempt failed");
                println!("Match failed: {}", e);
            }
        }
    }

    println!();
    tracker.print_leaderboard();
    results.print_report();

    if let Some(path) = results_path {
        if let Err(e) = results.save(Path::new(&path)) {
            eprintln!("Warning: Failed to save results: {}", e);
        }
    }
    if let Err(e) = tracker.save(&elo_path) {
        eprintln!("Warning: Failed to save Elo tracker: {}", e);
    }
}

/// Launch the three processes, play one match, and terminate them.
fn play_matchup(
    referee: &EngineSpec,
    first: &EngineSpec,
    second: &EngineSpec,
    config: MatchConfig,
) -> Result<MatchOutcome, UhpError> {
    let (referee_session, referee_proc) = launch(referee)?;
    let (white_session, white_proc) = launch(first)?;
    let (black_session, black_proc) = launch(second)?;

    let outcome = MatchRunner::new(config, referee_session, white_session, black_session).play();

    referee_proc.terminate();
    white_proc.terminate();
    black_proc.terminate();
    outcome
}

fn show_leaderboard(args: &[String]) {
    let mut elo_path = DEFAULT_ELO_PATH.to_string();
    let mut i = 0;
    while i < args.len() {
        if args[i] == "--elo" || args[i] == "-e" {
            if i + 1 < args.len() {
                elo_path = args[i + 1].clone();
                i += 1;
            }
        }
        i += 1;
    }

    match EloTracker::load(&elo_path) {
        Ok(tracker) => tracker.print_leaderboard(),
        Err(_) => {
            println!("No tournament data found. Run some matches first!");
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    match args[1].as_str() {
        "run" => run_tournament(&args[2..]),
        "leaderboard" | "elo" => show_leaderboard(&args[2..]),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", args[1]);
            print_usage();
        }
    }
}
