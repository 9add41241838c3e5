use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;

use log::{info, warn};
use tileswap::events::Channel;
use tileswap::game::{GameEngine, LocalFileStore, Settings, SystemClock, TurnResult};
use tileswap::helpers::{format_elapsed, format_leaderboard_row, format_timer};
use tileswap::model::{DifficultyTier, GameEngineCommand, GameEngineEvent, RankStatus, RecordDraft};

fn init_logging() {
    env_logger::init();
}

fn flush_stdout() {
    if let Err(err) = io::stdout().flush() {
        warn!("Could not flush stdout: {}", err);
    }
}

fn print_event(event: &GameEngineEvent) {
    match event {
        GameEngineEvent::ElapsedChanged(secs) => {
            print!("\r{}  ", format_timer(*secs));
            flush_stdout();
        }
        GameEngineEvent::ScrambleFinished => println!("Scrambled! The clock is running."),
        GameEngineEvent::PuzzleCompleted(summary) => {
            println!(
                "Solved in {} with {} swaps for {} points.",
                format_elapsed(summary.elapsed_secs),
                summary.moves,
                summary.score
            );
        }
        GameEngineEvent::RankResolved(RankStatus::Ranked(position)) => match RankStatus::Ranked(*position).medal() {
            Some(medal) => println!("Rank #{position}! ({medal:?} crown)"),
            None => println!("Rank #{position}"),
        },
        GameEngineEvent::RankResolved(_) => println!("Leaderboard unavailable; no rank this time."),
        GameEngineEvent::LeaderboardUpdated(records) => {
            println!("--- Leaderboard ---");
            if records.is_empty() {
                println!("No records yet.");
            }
            for (i, record) in records.iter().enumerate() {
                println!("{}", format_leaderboard_row(i + 1, record));
            }
        }
        GameEngineEvent::PersistenceFailed(message) => eprintln!("Leaderboard error: {message}"),
        _ => (),
    }
}

/// Forward stdin lines to the game loop so the clock keeps ticking while the
/// player thinks.
fn spawn_input() -> Receiver<String> {
    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if sender.send(line).is_err() {
                break;
            }
        }
    });
    receiver
}

fn prompt(input: &Receiver<String>, label: &str) -> Option<String> {
    print!("{label}");
    flush_stdout();
    let line = input.recv().ok()?;
    let trimmed = line.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn start_game(engine: &mut GameEngine, tier: DifficultyTier, is_daily: bool) {
    engine.new_game(tier, is_daily);
    let interval = engine.settings().scramble_interval();
    while engine.tick_scramble() {
        thread::sleep(interval);
    }
    show_board(engine);
}

fn show_board(engine: &GameEngine) {
    if let Some(session) = engine.session() {
        print!("{}", session.grid());
        println!("{}", format_timer(engine.current_elapsed()));
    }
}

fn main() {
    init_logging();

    let settings = Settings::load();
    let mut tier = settings.difficulty;
    let mut is_daily = false;
    for arg in std::env::args().skip(1) {
        if arg == "--daily" {
            is_daily = true;
        } else {
            match arg.parse::<DifficultyTier>() {
                Ok(parsed) => tier = parsed,
                Err(err) => warn!("{}", err),
            }
        }
    }

    let (emitter, observer) = Channel::new();
    observer.subscribe(print_event);

    let store = LocalFileStore::with_capacity(Settings::leaderboard_path(), settings.leaderboard_capacity)
        .with_policy(settings.ranking_policy);
    info!("Leaderboard at {:?}", store.path());
    let mut engine = GameEngine::new(emitter, Box::new(store), Box::new(SystemClock), settings);

    engine.refresh_leaderboard();
    start_game(&mut engine, tier, is_daily);
    println!("Enter a tile number to pick it, the same number again to drop it, another to swap. 'n' for a new game, 'q' to quit.");

    let refresh = engine.settings().timer_refresh();
    let input = spawn_input();
    loop {
        let line = match input.recv_timeout(refresh) {
            Ok(line) => line,
            Err(RecvTimeoutError::Timeout) => {
                engine.handle_command(GameEngineCommand::TimerTick);
                continue;
            }
            Err(RecvTimeoutError::Disconnected) => break,
        };
        let input_line = line.trim();
        match input_line {
            "q" => break,
            "n" => {
                start_game(&mut engine, tier, is_daily);
                continue;
            }
            _ => (),
        }
        let Ok(index) = input_line.parse::<usize>() else {
            println!("Not a tile number: {input_line}");
            continue;
        };
        match engine.select_tile(index) {
            TurnResult::Selected(index) => println!("Picked {index}"),
            TurnResult::Deselected(index) => println!("Dropped {index}"),
            TurnResult::Swapped(_, _) => show_board(&engine),
            TurnResult::Solved(_, _) => {
                show_board(&engine);
                let nickname = prompt(&input, "Nickname: ");
                let country = prompt(&input, "Country: ");
                let comment = prompt(&input, "Comment: ").unwrap_or_default();
                let draft = RecordDraft {
                    comment,
                    nickname,
                    country,
                };
                if let Err(err) = engine.save_record(draft) {
                    eprintln!("Could not save: {err}");
                }
                println!("'n' for a new game, 'q' to quit.");
            }
            TurnResult::Ignored => println!("Ignored"),
        }
    }
}
