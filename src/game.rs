use std::fmt;

use clap::ValueEnum;
use tracing::{debug, instrument, trace};

use crate::board::{Board, Mark, Outcome};
use crate::coords::Coordinates;
use crate::Error;

/// Order in which the move list is presented.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum HistoryOrder {
    #[default]
    Ascending,
    Descending,
}

impl HistoryOrder {
    pub fn toggle(&self) -> HistoryOrder {
        match self {
            HistoryOrder::Ascending => HistoryOrder::Descending,
            HistoryOrder::Descending => HistoryOrder::Ascending,
        }
    }
}

impl fmt::Display for HistoryOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryOrder::Ascending => f.write_str("ascending"),
            HistoryOrder::Descending => f.write_str("descending"),
        }
    }
}

/// Everything a player can ask of a game.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Mark the square at this index (0-8) for the player on turn.
    Play(usize),
    /// Make this history step the current one.
    JumpTo(usize),
    ToggleOrder,
}

/// What an accepted [`Command`] did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Applied {
    Played { index: usize, mark: Mark },
    Jumped { step: usize },
    Reordered(HistoryOrder),
}

/// Status line for the current step.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Winner(Mark),
    Draw,
    NextPlayer(Mark),
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Winner(mark) => write!(f, "Winner: {}", mark),
            Status::Draw => f.write_str("No Winner."),
            Status::NextPlayer(mark) => write!(f, "Next player: {}", mark),
        }
    }
}

/// One line of the move list.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MoveEntry {
    pub step: usize,
    /// Where the move that produced this step was played, `None` for the start.
    pub location: Option<Coordinates>,
    pub is_current: bool,
}

impl fmt::Display for MoveEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.step, self.location) {
            (0, _) => f.write_str("Go to game start"),
            (step, Some(location)) => write!(f, "Go to move #{} {}", step, location),
            (step, None) => write!(f, "Go to move #{}", step),
        }
    }
}

/// Read-only snapshot of everything a shell needs to draw the game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct View {
    pub board: Board,
    pub outcome: Outcome,
    pub moves: Vec<MoveEntry>,
    pub status: Status,
    pub order: HistoryOrder,
    pub step: usize,
}

/// A game of tic-tac-toe together with its full move history.
///
/// `history[0]` is always the empty board and every later snapshot adds
/// exactly one mark to its predecessor. `step` selects the snapshot that is
/// shown and played on; the player on turn follows from its parity, so
/// jumping around the history never desynchronises the turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Game {
    history: Vec<Board>,
    step: usize,
    order: HistoryOrder,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self::with_order(HistoryOrder::Ascending)
    }

    pub fn with_order(order: HistoryOrder) -> Self {
        Self {
            history: vec![Board::new()],
            step: 0,
            order,
        }
    }

    pub fn history(&self) -> &[Board] {
        &self.history
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn order(&self) -> HistoryOrder {
        self.order
    }

    pub fn current(&self) -> &Board {
        &self.history[self.step]
    }

    pub fn next_mark(&self) -> Mark {
        if self.step % 2 == 0 {
            Mark::X
        } else {
            Mark::O
        }
    }

    pub fn outcome(&self) -> Outcome {
        self.current().outcome()
    }

    pub fn apply(&mut self, command: Command) -> Result<Applied, Error> {
        match command {
            Command::Play(index) => self
                .apply_move(index)
                .map(|mark| Applied::Played { index, mark }),
            Command::JumpTo(step) => self.jump_to(step).map(|()| Applied::Jumped { step }),
            Command::ToggleOrder => Ok(Applied::Reordered(self.toggle_order())),
        }
    }

    /// Marks `index` for the player on turn and returns that player's mark.
    ///
    /// Any snapshots after the current step are discarded first. The game is
    /// left untouched when the square is taken or the game is already won.
    #[instrument(level = "debug", skip(self), fields(step = self.step))]
    pub fn apply_move(&mut self, index: usize) -> Result<Mark, Error> {
        let active = *self.current();
        if index >= active.squares().len() {
            return Err(Error::OutOfBounds(index));
        }
        if let Some(winner) = active.get_winner() {
            return Err(Error::GameOver(winner));
        }
        if !active.is_valid_move(index) {
            return Err(Error::InvalidMove(index));
        }

        let mark = self.next_mark();
        let discarded = self.history.len() - self.step - 1;
        self.history.truncate(self.step + 1);
        self.history.push(active.mark(index, mark));
        self.step = self.history.len() - 1;

        debug!(%mark, discarded, new_step = self.step, "move applied");
        Ok(mark)
    }

    #[instrument(level = "debug", skip(self), fields(len = self.history.len()))]
    pub fn jump_to(&mut self, step: usize) -> Result<(), Error> {
        if step >= self.history.len() {
            return Err(Error::InvalidStep {
                step,
                len: self.history.len(),
            });
        }
        self.step = step;
        trace!(next = %self.next_mark(), "jumped");
        Ok(())
    }

    pub fn toggle_order(&mut self) -> HistoryOrder {
        self.order = self.order.toggle();
        debug!(order = %self.order, "history order toggled");
        self.order
    }

    pub fn status(&self) -> Status {
        if let Some(winner) = self.outcome().winner() {
            Status::Winner(winner)
        } else if self.step == 9 {
            Status::Draw
        } else {
            Status::NextPlayer(self.next_mark())
        }
    }

    pub fn move_list(&self) -> Vec<MoveEntry> {
        let entries = self
            .history
            .iter()
            .enumerate()
            .map(|(step, board)| MoveEntry {
                step,
                location: board.last_played().map(Coordinates::from_index),
                is_current: step == self.step,
            });
        match self.order {
            HistoryOrder::Ascending => entries.collect(),
            HistoryOrder::Descending => entries.rev().collect(),
        }
    }

    pub fn view(&self) -> View {
        View {
            board: *self.current(),
            outcome: self.outcome(),
            moves: self.move_list(),
            status: self.status(),
            order: self.order,
            step: self.step,
        }
    }
}
