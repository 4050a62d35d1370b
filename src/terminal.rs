//! Interactive terminal loop.
//!
//! Reads commands from stdin while lookups run in the background. Lookup
//! results arrive over an mpsc channel and are applied here, so the
//! controller is only ever touched from this loop.

use std::io::Write;
use std::time::Instant;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use weatherdeck_dashboard::{
    apply_message, spawn_search, AddFavoriteOutcome, DashboardController, DashboardMessage,
};

use crate::render::{render_dashboard, render_favorites, HELP};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    ToggleUnit,
    AddFavorite,
    RemoveFavorite(String),
    ClearFavorites,
    ListFavorites,
    Status,
    Dismiss,
    Help,
    Quit,
}

impl Command {
    /// Parse one input line. Blank lines yield `None`; anything that is not a
    /// known command is treated as a city name.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match (word.to_ascii_lowercase().as_str(), rest) {
            ("search" | "s", query) => Self::Search(query.to_string()),
            ("remove" | "rm", name) if !name.is_empty() => Self::RemoveFavorite(name.to_string()),
            ("unit" | "u", "") => Self::ToggleUnit,
            ("add" | "a", "") => Self::AddFavorite,
            ("clear", "") => Self::ClearFavorites,
            ("favorites" | "favs" | "f", "") => Self::ListFavorites,
            ("status", "") => Self::Status,
            ("dismiss" | "d", "") => Self::Dismiss,
            ("help" | "?", "") => Self::Help,
            ("quit" | "exit" | "q", "") => Self::Quit,
            _ => Self::Search(line.to_string()),
        };
        Some(command)
    }
}

pub async fn run(mut controller: DashboardController) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<DashboardMessage>();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("WeatherDeck\n\n{}\n", HELP);
    print!("{}", render_dashboard(&controller, Instant::now()));
    prompt()?;

    let mut input_closed = false;

    loop {
        tokio::select! {
            line = lines.next_line(), if !input_closed => {
                let Some(line) = line.context("Failed to read from stdin")? else {
                    input_closed = true;
                    if input_finished(input_closed, &controller) {
                        break;
                    }
                    tracing::debug!("stdin closed; waiting for the pending lookup");
                    continue;
                };
                let Some(command) = Command::parse(&line) else {
                    prompt()?;
                    continue;
                };
                if command == Command::Quit {
                    break;
                }
                handle_command(&mut controller, command, &tx);
                prompt()?;
            }
            Some(message) = rx.recv() => {
                if apply_message(&mut controller, message) {
                    println!();
                    print!("{}", render_dashboard(&controller, Instant::now()));
                    if input_finished(input_closed, &controller) {
                        break;
                    }
                    prompt()?;
                }
            }
        }
    }

    tracing::info!("Exiting");
    Ok(())
}

/// Once stdin is closed the loop only stays up for the latest lookup.
fn input_finished(input_closed: bool, controller: &DashboardController) -> bool {
    input_closed && !controller.search().is_in_flight()
}

fn handle_command(
    controller: &mut DashboardController,
    command: Command,
    tx: &mpsc::UnboundedSender<DashboardMessage>,
) {
    match command {
        Command::Search(query) => {
            spawn_search(controller, &query, tx);
            print!("{}", render_dashboard(controller, Instant::now()));
        }
        Command::ToggleUnit => {
            let unit = controller.toggle_unit();
            println!("Units: {} (applies to the next search)", unit.scale_name());
        }
        Command::AddFavorite => match controller.add_current_to_favorites() {
            AddFavoriteOutcome::Added => print!("{}", render_favorites(controller)),
            AddFavoriteOutcome::AlreadyPresent => println!("Already in favorites."),
            AddFavoriteOutcome::NothingToAdd => println!("Search for a city first."),
            AddFavoriteOutcome::NotSaved => print!("{}", render_dashboard(controller, Instant::now())),
        },
        Command::RemoveFavorite(name) => {
            if !controller.remove_favorite(&name) && controller.notification().is_none() {
                println!("{} is not a favorite.", name);
            }
            print!("{}", render_favorites(controller));
        }
        Command::ClearFavorites => {
            controller.clear_favorites();
            print!("{}", render_favorites(controller));
        }
        Command::ListFavorites => print!("{}", render_favorites(controller)),
        Command::Status => print!("{}", render_dashboard(controller, Instant::now())),
        Command::Dismiss => controller.dismiss_notification(),
        Command::Help => println!("{}", HELP),
        Command::Quit => {}
    }
}

fn prompt() -> Result<()> {
    print!("> ");
    std::io::stdout().flush().context("Failed to flush stdout")
}
