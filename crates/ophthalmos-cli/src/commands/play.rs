use super::{AppContext, Prompt, swatch};
use anyhow::Result;
use colored::Colorize;
use ophthalmos_application::GameController;
use ophthalmos_core::game::{GameEvent, GameMode, GameSession, RoundState, Transition};
use ophthalmos_core::performance::PerformanceResult;

/// What a line typed during a game means.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Events(Vec<GameEvent>),
    Quit,
    Invalid,
}

/// Turns a line into events: one-based indices pick or toggle, `s` submits.
fn parse_command(mode: GameMode, line: &str) -> Command {
    if matches!(line, "q" | "quit") {
        return Command::Quit;
    }

    let mut events = Vec::new();
    for token in line.split_whitespace() {
        let event = match (mode, token) {
            (GameMode::Pattern, "s" | "submit") => GameEvent::SubmitPattern,
            (_, token) => match token.parse::<usize>() {
                Ok(n) if n >= 1 => match mode {
                    GameMode::ColorMatch => GameEvent::PickCandidate(n - 1),
                    GameMode::Pattern => GameEvent::ToggleTile(n - 1),
                },
                _ => return Command::Invalid,
            },
        };
        events.push(event);
    }

    if events.is_empty() {
        Command::Invalid
    } else {
        Command::Events(events)
    }
}

fn show_board(session: &GameSession) {
    println!();
    println!(
        "{}",
        format!(
            "Round {}/{}  Score {}  Time {}s",
            session.current_round(),
            session.total_rounds(),
            session.score(),
            session.remaining_seconds()
        )
        .bright_cyan()
    );
    match session.round() {
        RoundState::ColorMatch(round) => {
            println!("Target {}", swatch(round.target()));
            for (index, color) in round.candidates().iter().enumerate() {
                println!("  {}) {}", index + 1, swatch(*color));
            }
        }
        RoundState::Pattern(round) => {
            println!("Reference {}", swatch(round.reference()));
            for (row, chunk) in round.tiles().chunks(3).enumerate() {
                let cells: Vec<String> = chunk
                    .iter()
                    .enumerate()
                    .map(|(col, color)| {
                        let index = row * 3 + col;
                        let mark = if round.is_selected(index) { "*" } else { " " };
                        format!("{}{} {}", mark, index + 1, swatch(*color))
                    })
                    .collect();
                println!("  {}", cells.join("  "));
            }
        }
    }
}

fn help(mode: GameMode) -> &'static str {
    match mode {
        GameMode::ColorMatch => "Type the number of the color matching the target. 'q' quits.",
        GameMode::Pattern => {
            "Toggle tiles matching the reference by number (e.g. '1 5 9'), 's' submits. 'q' quits."
        }
    }
}

/// Where the game stands after a typed command.
#[derive(Debug)]
enum Step {
    Continue,
    Finished(PerformanceResult),
    Abandoned,
}

/// Applies a typed command to the running game.
///
/// Quitting discards the session, so a game left early is never recorded.
fn dispatch(controller: &mut GameController, mode: GameMode, command: Command) -> Step {
    let events = match command {
        Command::Quit => {
            controller.reset();
            return Step::Abandoned;
        }
        Command::Invalid => {
            println!("{}", help(mode).yellow());
            return Step::Continue;
        }
        Command::Events(events) => events,
    };

    for event in events {
        match controller.handle(event) {
            Transition::Finished(result) => return Step::Finished(result),
            Transition::Missed { penalty } => {
                println!("{}", format!("Not quite (-{})", penalty).red());
            }
            Transition::TileSelected { awarded } if awarded > 0 => {
                println!("{}", format!("+{}", awarded).green());
            }
            Transition::RoundAdvanced { awarded, .. } => {
                if awarded > 0 {
                    println!("{}", format!("+{}", awarded).green());
                }
                if let Some(session) = controller.session() {
                    show_board(session);
                }
            }
            Transition::Ignored => {
                println!("{}", "That does not apply here.".bright_black());
            }
            _ => {}
        }
    }
    Step::Continue
}

pub async fn run(ctx: &AppContext, mode: GameMode, seed: Option<u64>) -> Result<()> {
    let has_account = ctx.require_account().await;

    println!("{}", format!("=== {} ===", mode.title()).bright_magenta().bold());
    println!("{}", help(mode).bright_black());

    let mut controller = seed.map(GameController::seeded).unwrap_or_default();
    let mut ticks = controller.start(mode);
    let mut prompt = Prompt::stdin();

    if let Some(session) = controller.session() {
        show_board(session);
    }

    let result = loop {
        tokio::select! {
            Some(event) = ticks.recv() => {
                match controller.handle(event) {
                    Transition::Finished(result) => {
                        println!("{}", "Time is up!".yellow().bold());
                        break Some(result);
                    }
                    Transition::Ticked { remaining } if remaining <= 5 || remaining % 10 == 0 => {
                        println!("{}", format!("{}s left", remaining).bright_black());
                    }
                    _ => {}
                }
            }
            line = prompt.next_line() => {
                let command = match line? {
                    Some(line) => parse_command(mode, &line),
                    None => Command::Quit,
                };
                match dispatch(&mut controller, mode, command) {
                    Step::Continue => {}
                    Step::Finished(result) => break Some(result),
                    Step::Abandoned => break None,
                }
            }
        }
    };

    let Some(result) = result else {
        println!("{}", "Game abandoned.".yellow());
        return Ok(());
    };

    let total_rounds = controller
        .session()
        .map(|s| s.total_rounds())
        .unwrap_or_default();
    println!();
    println!("{}", "=== Game Over ===".bright_magenta().bold());
    println!("Score   {}", result.score);
    println!("Time    {}s", result.elapsed_seconds);
    println!("Rating  {}", result.rating(total_rounds).to_string().yellow());

    if has_account {
        if ctx.usecase.record_game_result(&result).await {
            println!("{}", "Result saved.".bright_black());
        } else {
            println!("{}", "Result could not be saved.".yellow());
        }
    }
    Ok(())
}
