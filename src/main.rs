#![deny(
    unused_import_braces,
    unused_lifetimes,
    unreachable_pub,
    trivial_numeric_casts,
    missing_debug_implementations,
    missing_copy_implementations,
    deprecated_in_future,
    meta_variable_misuse,
    non_ascii_idents,
    rust_2018_compatibility,
    rust_2018_idioms,
    future_incompatible,
    nonstandard_style,
    clippy::all
)]
#![warn(variant_size_differences, let_underscore_drop)]

//! # Tic-Tac-Toe Player

pub mod cli_options;
pub mod config;
pub mod game;
pub mod logger;
pub mod render;
pub mod setup;

use crate::{
    cli_options::CliOptions,
    config::Config,
    game::Game,
};
use anyhow::Context as _;
use std::io::Write;
use tic_tac_toe::{
    Board,
    Team,
};
use tracing::info;

/// Data from the setup function
#[derive(Debug)]
struct SetupData {
    config: Config,
    board: Board,
    human: Option<Team>,
    analyze: bool,
}

/// Pre-main setup
fn setup(cli_options: CliOptions) -> anyhow::Result<SetupData> {
    let config =
        setup::load_config(cli_options.config.as_deref()).context("failed to load config")?;

    logger::setup(config.log_level()).context("failed to initialize logger")?;

    let human = if cli_options.computer_only {
        None
    } else {
        Some(
            cli_options
                .human
                .or_else(|| config.human())
                .unwrap_or(Team::X),
        )
    };

    Ok(SetupData {
        config,
        board: cli_options.board.unwrap_or_default(),
        human,
        analyze: cli_options.analyze,
    })
}

/// The main entry.
///
/// Sets up the program and calls `real_main`.
/// Config problems are printed to the stderr, as the logger is not initialized yet.
fn main() -> anyhow::Result<()> {
    // This line MUST run first.
    // It is needed to exit early if the options are invalid,
    // and this will NOT run destructors if it does so.
    let cli_options = argh::from_env();

    let setup_data = setup(cli_options)?;
    real_main(setup_data)?;
    Ok(())
}

/// The actual entry point
fn real_main(setup_data: SetupData) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut stdout = stdout.lock();

    if setup_data.analyze {
        game::analyze(setup_data.board, &mut stdout).context("failed to analyze board")?;
        return Ok(());
    }

    let mut game = Game::new(
        setup_data.board,
        setup_data.human,
        setup_data.config.show_hints(),
    );
    let stdin = std::io::stdin();
    let board = game
        .run(stdin.lock(), &mut stdout)
        .context("failed to play game")?;
    stdout.flush().context("failed to flush stdout")?;

    info!(encoded = board.encode_u16(), "game over\n{board}");

    Ok(())
}
