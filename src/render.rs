//! Plain-text rendering of a [`View`] for line-oriented terminals.

use crate::{Mark, View};

/// Draws the board top row first. Squares on the winning line are
/// bracketed, empty squares show the number used to play them.
pub fn board(view: &View) -> String {
    let mut out = String::new();
    for row in 0..3 {
        if row > 0 {
            out.push_str("---+---+---\n");
        }
        let cells: Vec<String> = (0..3)
            .map(|column| {
                let index = row * 3 + column;
                let symbol = match view.board.get(index) {
                    Some(Mark::X) => "X".to_string(),
                    Some(Mark::O) => "O".to_string(),
                    None => (index + 1).to_string(),
                };
                if view.outcome.contains(index) {
                    format!("[{}]", symbol)
                } else {
                    format!(" {} ", symbol)
                }
            })
            .collect();
        out.push_str(&cells.join("|"));
        out.push('\n');
    }
    out
}

/// The move list, one entry per line, with the current step marked by `>`.
pub fn move_list(view: &View) -> String {
    let mut out = String::new();
    for entry in &view.moves {
        let marker = if entry.is_current { '>' } else { ' ' };
        out.push_str(&format!("{} {:>2}. {}\n", marker, entry.step, entry));
    }
    out
}

/// Board, status line and move list together.
pub fn view(view: &View) -> String {
    format!(
        "{}\n{}  [order: {}]\n{}",
        board(view),
        view.status,
        view.order,
        move_list(view)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Game;

    #[test]
    fn empty_board_shows_square_numbers() {
        let text = board(&Game::new().view());
        assert_eq!(
            text,
            " 1 | 2 | 3 \n---+---+---\n 4 | 5 | 6 \n---+---+---\n 7 | 8 | 9 \n"
        );
    }

    #[test]
    fn winning_line_is_bracketed() {
        let mut game = Game::new();
        for index in [0, 4, 1, 5, 2] {
            game.apply_move(index).unwrap();
        }
        let text = board(&game.view());
        let first_row = text.lines().next().unwrap();
        assert_eq!(first_row, "[X]|[X]|[X]");
        assert!(text.contains(" 4 | O | O "));
    }

    #[test]
    fn current_step_is_marked() {
        let mut game = Game::new();
        game.apply_move(4).unwrap();
        game.apply_move(0).unwrap();
        game.jump_to(1).unwrap();
        let text = move_list(&game.view());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            [
                "   0. Go to game start",
                ">  1. Go to move #1 (1, 1)",
                "   2. Go to move #2 (0, 0)",
            ]
        );
    }

    #[test]
    fn full_view_includes_status_and_order() {
        let mut game = Game::new();
        game.toggle_order();
        let text = view(&game.view());
        assert!(text.contains("Next player: X  [order: descending]"));
    }
}
