use std::str::FromStr;

use sodium::Stream;

use crate::{Command, Error};

impl FromStr for Command {
    type Err = Error;

    /// Squares are numbered 1-9 row by row from the top left; step numbers
    /// are the ones shown in the move list.
    fn from_str(line: &str) -> Result<Command, Error> {
        let mut words = line.split_whitespace();
        let Some(first) = words.next() else {
            return Err(Error::UnknownCommand(String::new()));
        };

        match first.to_ascii_lowercase().as_str() {
            "o" | "order" | "toggle" => Ok(Command::ToggleOrder),
            "g" | "goto" | "jump" => {
                let step = words.next().ok_or(Error::MissingArgument("step number"))?;
                step.parse::<usize>()
                    .map(Command::JumpTo)
                    .map_err(Error::InvalidInteger)
            }
            word if word.starts_with(|c: char| c.is_ascii_digit() || c == '-' || c == '+') => {
                let index = word.parse::<usize>().map_err(Error::InvalidInteger)?;
                if (1..=9).contains(&index) {
                    Ok(Command::Play(index - 1))
                } else {
                    Err(Error::InvalidIndex(index))
                }
            }
            _ => Err(Error::UnknownCommand(line.trim().to_string())),
        }
    }
}

/// Splits raw input lines into commands and parse errors.
pub struct CommandParser {
    pub command_stream: Stream<Command>,
    pub error_stream: Stream<Error>,
}

impl CommandParser {
    pub fn new(input_stream: &Stream<String>) -> CommandParser {
        let parsed_stream = input_stream.map(|line: &String| line.parse::<Command>());

        let command_stream = parsed_stream
            .map(|res: &Result<Command, Error>| res.clone().ok())
            .filter_option();
        let error_stream = parsed_stream
            .map(|res: &Result<Command, Error>| res.clone().err())
            .filter_option();

        CommandParser {
            command_stream,
            error_stream,
        }
    }
}
