//! Command-line options shared by the terminal front ends.

use std::{fs::File, io, path::PathBuf, sync::Mutex};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::{Game, HistoryOrder};

const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Clone, Debug, Parser)]
#[command(version, about = "Tic-tac-toe with a browsable move history")]
pub struct Options {
    /// Order of the move list when the game starts.
    #[arg(long, value_enum, default_value_t = HistoryOrder::Ascending)]
    pub order: HistoryOrder,

    /// Tracing filter directive, e.g. `ttt_history=debug`. Falls back to
    /// `RUST_LOG`, then to `warn`.
    #[arg(long)]
    pub log_filter: Option<String>,

    /// Append logs to this file instead of stderr.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Options {
    pub fn new_game(&self) -> Game {
        Game::with_order(self.order)
    }

    fn env_filter(&self) -> EnvFilter {
        match &self.log_filter {
            Some(directive) => EnvFilter::new(directive),
            None => EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        }
    }

    /// Installs the global tracing subscriber, writing to `--log-file` when
    /// given and to stderr otherwise.
    pub fn init_tracing(&self) -> io::Result<()> {
        let builder = tracing_subscriber::fmt().with_env_filter(self.env_filter());
        let result = match &self.log_file {
            Some(path) => {
                let file = File::options().create(true).append(true).open(path)?;
                builder
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .try_init()
            }
            None => builder.with_writer(io::stderr).try_init(),
        };
        result.map_err(io::Error::other)
    }

    /// Like [`Options::init_tracing`], but only when a log file was asked for.
    pub fn init_file_tracing(&self) -> io::Result<()> {
        if self.log_file.is_some() {
            self.init_tracing()
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = Options::try_parse_from(["ttt"]).unwrap();
        assert_eq!(options.order, HistoryOrder::Ascending);
        assert_eq!(options.log_filter, None);
        assert_eq!(options.log_file, None);
        assert_eq!(options.new_game(), Game::new());
    }

    #[test]
    fn descending_order() {
        let options = Options::try_parse_from(["ttt", "--order", "descending"]).unwrap();
        assert_eq!(options.new_game().order(), HistoryOrder::Descending);
    }

    #[test]
    fn unknown_order_is_rejected() {
        assert!(Options::try_parse_from(["ttt", "--order", "sideways"]).is_err());
    }
}
