use camino::Utf8PathBuf;
use tic_tac_toe::{
    Board,
    Team,
};

/// CLI Options
#[derive(Debug, argh::FromArgs)]
#[argh(description = "Play Tic-Tac-Toe against a perfect opponent")]
pub struct CliOptions {
    #[argh(option, description = "the path to the config")]
    pub config: Option<Utf8PathBuf>,

    #[argh(option, description = "the team you play, X or O")]
    pub human: Option<Team>,

    #[argh(
        switch,
        description = "let the computer play both teams",
        long = "computer-only"
    )]
    pub computer_only: bool,

    #[argh(
        option,
        description = "the starting board, 9 tiles of X, O or . in row order"
    )]
    pub board: Option<Board>,

    #[argh(
        switch,
        description = "print the value of every move for the board and exit"
    )]
    pub analyze: bool,
}
