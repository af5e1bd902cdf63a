use std::num::ParseIntError;

use sodium::{Cell, CellLoop, SodiumCtx, Stream};
use thiserror::Error;
use tracing::debug;

mod board;
mod coords;
mod game;
mod input;
pub mod options;
pub mod render;

pub use board::{Board, Mark, Outcome, WIN_SEQUENCES};
pub use coords::Coordinates;
pub use game::{Applied, Command, Game, HistoryOrder, MoveEntry, Status, View};
pub use input::CommandParser;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid move: square {} is already taken!", .0 + 1)]
    InvalidMove(usize),

    #[error("invalid move: {0} has already won the game!")]
    GameOver(Mark),

    #[error("invalid index: {0}! pick a square from 1 to 9")]
    InvalidIndex(usize),

    #[error("invalid square: {0} is not on the board!")]
    OutOfBounds(usize),

    #[error("invalid step: {step}! the history has {len} entries")]
    InvalidStep { step: usize, len: usize },

    #[error("invalid input: {0}!")]
    InvalidInteger(ParseIntError),

    #[error("unknown command: {0:?}!")]
    UnknownCommand(String),

    #[error("missing argument: {0}!")]
    MissingArgument(&'static str),
}

/// A game wired up to a stream of commands.
///
/// `game` and `view` only change when a command is accepted; rejected
/// commands come out of `error` instead. `message` holds the feedback for
/// the latest command: the error, the winner announcement, or nothing.
pub struct TicTacToe {
    pub game: Cell<Game>,
    pub view: Cell<View>,
    pub message: Cell<String>,
    pub moves: Stream<(usize, Mark)>,
    pub winner: Stream<Mark>,
    pub error: Stream<Error>,
}

impl TicTacToe {
    pub fn new(ctx: &SodiumCtx, commands: &Stream<Command>, initial: Game) -> TicTacToe {
        ctx.transaction(|| {
            let game_cell_loop: CellLoop<Game> = ctx.new_cell_loop();
            let game_cell_fwd = game_cell_loop.cell();

            let transition_stream =
                commands.snapshot(&game_cell_fwd, |command: &Command, game: &Game| {
                    let mut next = game.clone();
                    next.apply(*command).map(|applied| (next, applied))
                });

            let accepted_stream = transition_stream
                .map(|res: &Result<(Game, Applied), Error>| res.clone().ok())
                .filter_option();
            let error_stream = transition_stream
                .map(|res: &Result<(Game, Applied), Error>| res.clone().err())
                .filter_option();

            let game_stream = accepted_stream.map(|(game, _): &(Game, Applied)| game.clone());
            let game_cell = game_stream.hold(initial.clone());
            game_cell_loop.loop_(&game_cell);

            let view_cell = game_cell.map(|game: &Game| game.view());

            let move_stream = accepted_stream
                .map(|(_, applied): &(Game, Applied)| match applied {
                    Applied::Played { index, mark } => Some((*index, *mark)),
                    _ => None,
                })
                .filter_option();

            let winner_stream = accepted_stream
                .map(|(game, applied): &(Game, Applied)| match applied {
                    Applied::Played { .. } => game.outcome().winner(),
                    _ => None,
                })
                .filter_option();

            let error_stream = error_stream.map(|err: &Error| {
                debug!(%err, "command rejected");
                err.clone()
            });

            let message_cell = error_stream
                .map(|err: &Error| err.to_string())
                .or_else(
                    &winner_stream.map(|mark: &Mark| format!("{} has won the game!", mark)),
                )
                .or_else(&commands.map(|_: &Command| String::new()))
                .hold(String::new());

            TicTacToe {
                game: game_cell,
                view: view_cell,
                message: message_cell,
                moves: move_stream,
                winner: winner_stream,
                error: error_stream,
            }
        })
    }
}
