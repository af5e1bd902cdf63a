use std::io::{self, BufRead};

use clap::Parser;
use sodium::{SodiumCtx, StreamSink};
use tracing::info;

use ttt_history::{options::Options, render, CommandParser, Error, Mark, TicTacToe, View};

const HELP: &str = "\
Commands:
  1-9          mark a square (numbered row by row from the top left)
  g N          go to step N of the move list
  o            toggle ascending/descending move list
  q            quit";

fn main() -> io::Result<()> {
    let options = Options::parse();
    options.init_tracing()?;

    let ctx = SodiumCtx::new();

    let (kb_input, game, _listeners) = ctx.transaction(|| {
        let mut listeners = Vec::new();
        let kb_input: StreamSink<String> = ctx.new_stream_sink();

        let parser = CommandParser::new(&kb_input.stream());
        let game = TicTacToe::new(&ctx, &parser.command_stream, options.new_game());

        listeners.push(
            parser
                .error_stream
                .or_else(&game.error)
                .listen(|err: &Error| println!("{}", err)),
        );

        listeners.push(game.moves.listen(|(index, mark): &(usize, Mark)| {
            println!("\n{}s took square {}:", mark, index + 1)
        }));

        listeners.push(
            game.winner
                .listen(|mark: &Mark| println!("{} has won the game!", mark)),
        );

        listeners.push(
            game.view
                .updates()
                .listen(|view: &View| println!("{}", render::view(view))),
        );

        (kb_input, game, listeners)
    });

    info!(order = %options.order, "starting line shell");
    println!("Welcome to Tic Tac Toe!\n\n{}\n", HELP);
    println!("{}", render::view(&game.view.sample()));

    let stdin = io::stdin().lock();
    for line in stdin.lines() {
        let line = line?;
        match line.trim() {
            "q" | "quit" => break,
            "h" | "help" | "?" => println!("{}", HELP),
            _ => kb_input.send(line),
        }
    }

    info!(step = game.game.sample().step(), "leaving line shell");
    Ok(())
}
