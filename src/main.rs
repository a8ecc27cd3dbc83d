//! Terminal front-end for the arena engine.

use anyhow::Result;
use clap::Parser;
use tictac_arena::{
    AppConfig, Cli, Command, Difficulty, GameSession, JsonFileStore, Mark, Outcome, Phase,
    ProgressService, SessionStats, Tournament, Verdict, replay,
};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing_subscriber::EnvFilter;

/// Line-based stdin reader shared by the interactive loops.
type Input = Lines<BufReader<Stdin>>;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load(&cli.config)?;

    match cli.command {
        Command::Play {
            difficulty,
            data_path,
        } => run_play(&config, difficulty, data_path).await,
        Command::Tournament {
            rounds,
            difficulty,
            data_path,
        } => run_tournament(&config, rounds, difficulty, data_path).await,
        Command::Stats { data_path } => run_stats(&config, data_path),
        Command::History {
            limit,
            replay,
            data_path,
        } => run_history(&config, limit, replay, data_path).await,
    }
}

/// Opens the progress service over the configured store file.
fn open_progress(
    config: &AppConfig,
    override_path: Option<String>,
) -> Result<ProgressService<JsonFileStore>> {
    let path = override_path.unwrap_or_else(|| config.data_path().clone());
    let store = JsonFileStore::open(path)?;
    Ok(ProgressService::from_store(store))
}

/// Parses a 1-9 cell number into a board index.
fn parse_cell(input: &str) -> Option<usize> {
    let n: usize = input.parse().ok()?;
    (1..=9).contains(&n).then(|| n - 1)
}

fn announce(outcome: Outcome) {
    match outcome {
        Outcome::Won(Mark::X) => println!("You win! \u{1F389}"),
        Outcome::Won(Mark::O) => println!("Computer wins \u{1F916}"),
        Outcome::Draw => println!("Game ended in a draw."),
        Outcome::InProgress => {}
    }
}

fn print_score_line(stats: &SessionStats) {
    println!(
        "You: {}  Draws: {}  Computer: {}  (streak {}, best {})",
        stats.wins(),
        stats.draws(),
        stats.losses(),
        stats.current_streak(),
        stats.max_streak()
    );
}

/// Drives one game to its terminal phase.
///
/// Returns `false` if the player quit instead of finishing the game.
async fn play_game(session: &mut GameSession, input: &mut Input) -> Result<bool> {
    loop {
        match session.phase() {
            Phase::AwaitingPlayerMove => {
                println!("\n{}\n", session.board().display());
                println!("Your move [1-9], or q to quit:");
                let Some(line) = input.next_line().await? else {
                    return Ok(false);
                };
                let line = line.trim();
                if line.eq_ignore_ascii_case("q") {
                    return Ok(false);
                }
                let Some(cell) = parse_cell(line) else {
                    println!("Enter a cell number from 1 to 9.");
                    continue;
                };
                if let Err(e) = session.submit_move(cell) {
                    println!("Move rejected: {e}. Try another cell.");
                }
            }
            Phase::AwaitingOpponentMove => {
                println!("Computer is thinking...");
                session.opponent_turn().await?;
            }
            Phase::Terminal => {
                println!("\n{}\n", session.board().display());
                announce(session.outcome());
                return Ok(true);
            }
        }
    }
}

/// Run interactive games until the player stops
async fn run_play(
    config: &AppConfig,
    difficulty: Option<Difficulty>,
    data_path: Option<String>,
) -> Result<()> {
    let difficulty = difficulty.unwrap_or(*config.difficulty());
    let mut progress = open_progress(config, data_path)?;
    let profile = progress.ensure_profile(config.profile_name(), config.profile_avatar())?;

    println!(
        "{} {}  W: {} L: {}",
        profile.avatar(),
        profile.name(),
        profile.wins(),
        profile.losses()
    );
    println!("Difficulty: {difficulty}");

    let mut session = GameSession::new(difficulty).with_thinking_delay(config.move_delay());
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    loop {
        if !play_game(&mut session, &mut input).await? {
            return Ok(());
        }

        let record = session.record()?;
        let stats = progress.record_game(record)?;
        print_score_line(&stats);

        println!("Play again? [y/N]");
        let Some(line) = input.next_line().await? else {
            return Ok(());
        };
        if !line.trim().eq_ignore_ascii_case("y") {
            return Ok(());
        }
        session.reset();
    }
}

/// Run a best-of-N tournament
async fn run_tournament(
    config: &AppConfig,
    rounds: Option<u32>,
    difficulty: Option<Difficulty>,
    data_path: Option<String>,
) -> Result<()> {
    let difficulty = difficulty.unwrap_or(*config.difficulty());
    let rounds = rounds.unwrap_or(*config.tournament_rounds());
    let mut progress = open_progress(config, data_path)?;

    let mut tournament =
        Tournament::new(rounds, difficulty).with_round_delay(config.round_delay());
    let mut session = GameSession::new(difficulty).with_thinking_delay(config.move_delay());
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    while !tournament.is_complete() {
        println!(
            "\n=== Round {} of {} ===",
            tournament.current_round(),
            tournament.rounds()
        );

        if !play_game(&mut session, &mut input).await? {
            println!("Tournament abandoned.");
            return Ok(());
        }

        let record = session.record()?;
        let result = *record.result();
        progress.record_game(record)?;
        tournament.record_round(result)?;

        let scores = tournament.scores();
        println!(
            "Tournament score - You: {}  Computer: {}  Draws: {}",
            scores.player_wins(),
            scores.computer_wins(),
            scores.draws()
        );

        if !tournament.is_complete() {
            println!("Next round coming up...");
            tournament.intermission().await;
            session.reset();
        }
    }

    tokio::time::sleep(config.result_delay()).await;
    let verdict = tournament.verdict().expect("completed tournament has a verdict");
    match verdict {
        Verdict::PlayerWon => println!("You won the tournament! \u{1F389}"),
        Verdict::ComputerWon => println!("Computer won the tournament \u{1F916}"),
        Verdict::Drawn => println!("Tournament ended in a draw!"),
    }

    Ok(())
}

/// Show the player profile and aggregate stats
fn run_stats(config: &AppConfig, data_path: Option<String>) -> Result<()> {
    let progress = open_progress(config, data_path)?;
    let profile = progress.profile();
    let stats = progress.stats();

    println!("{} {}", profile.avatar(), profile.name());
    println!("Games played:   {}", stats.total_games());
    print_score_line(&stats);
    println!("Win rate:       {:.1}%", stats.win_rate());
    if let Some(last) = stats.last_played() {
        println!("Last played:    {}", last.format("%Y-%m-%d %H:%M UTC"));
    }

    Ok(())
}

/// List recorded games, optionally replaying one
async fn run_history(
    config: &AppConfig,
    limit: usize,
    replay_index: Option<usize>,
    data_path: Option<String>,
) -> Result<()> {
    let progress = open_progress(config, data_path)?;
    let history = progress.history();

    if history.is_empty() {
        println!("No games played yet");
        return Ok(());
    }

    // Most recent first, like the stats screen.
    for (i, record) in history.iter().rev().take(limit).enumerate() {
        println!(
            "{:>3}. {}  {:<4}  difficulty: {}",
            i + 1,
            record.played_at().format("%Y-%m-%d %H:%M"),
            record.result().label(),
            record.difficulty()
        );
    }

    if let Some(index) = replay_index {
        let record = index
            .checked_sub(1)
            .and_then(|i| history.iter().rev().nth(i))
            .ok_or_else(|| anyhow::anyhow!("No such game: {index}"))?;

        println!("\nReplaying game {index}:");
        replay::run(record, config.move_delay(), |board| {
            println!("\n{}\n", board.display());
        })
        .await;
    }

    Ok(())
}
