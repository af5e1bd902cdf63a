use std::io;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use sodium as na;
use tracing::{debug, info};
use ttt_history::{options::Options, Command, Mark, TicTacToe, View};
use tui::{
    backend::{Backend, CrosstermBackend},
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Widget},
    Frame, Terminal,
};

fn main() -> io::Result<()> {
    let options = Options::parse();
    options.init_file_tracing()?;

    let ctx = na::SodiumCtx::new();

    let (commands, game) = ctx.transaction(|| {
        let commands: na::StreamSink<Command> = ctx.new_stream_sink();
        let game = TicTacToe::new(&ctx, &commands.stream(), options.new_game());
        (commands, game)
    });

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    info!(order = %options.order, "starting tui");
    let TicTacToe { view, message, .. } = game;
    let mut ui = Ui {
        view,
        message,
        selected: None,
    };
    let result = run(&mut terminal, &commands, &mut ui);

    // restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run<B: Backend>(
    terminal: &mut Terminal<B>,
    commands: &na::StreamSink<Command>,
    ui: &mut Ui,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui.draw(f))?;

        let key = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => key,
            _ => continue,
        };

        let command = match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
            KeyCode::Char(c @ '1'..='9') => Some(Command::Play(c as usize - '1' as usize)),
            KeyCode::Char('o') => Some(Command::ToggleOrder),
            KeyCode::Enter => Some(Command::JumpTo(ui.selected_step())),
            KeyCode::Up => {
                ui.move_selection(-1);
                None
            }
            KeyCode::Down => {
                ui.move_selection(1);
                None
            }
            _ => None,
        };

        if let Some(command) = command {
            debug!(?command, "key command");
            ui.selected = None;
            commands.send(command);
        }
    }
}

struct Ui {
    view: na::Cell<View>,
    message: na::Cell<String>,
    /// Step highlighted in the move list; follows the current step when `None`.
    selected: Option<usize>,
}

impl Ui {
    fn selected_step(&self) -> usize {
        self.selected.unwrap_or_else(|| self.view.sample().step)
    }

    /// Moves the selection up or down the list as it is displayed.
    fn move_selection(&mut self, delta: isize) {
        let view = self.view.sample();
        let selected = self.selected.unwrap_or(view.step);
        let position = view
            .moves
            .iter()
            .position(|entry| entry.step == selected)
            .unwrap_or(0);
        let last = view.moves.len().saturating_sub(1);
        let position = position.saturating_add_signed(delta).min(last);
        self.selected = view.moves.get(position).map(|entry| entry.step);
    }

    fn draw<B: Backend>(&self, f: &mut Frame<B>) {
        let view = self.view.sample();
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .margin(2)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)].as_ref())
            .split(f.size());
        let block = Block::default().title("Board").borders(Borders::ALL);
        self.draw_board(f, &view, block.inner(chunks[0]));
        f.render_widget(block, chunks[0]);

        let block = Block::default().title("Game Info").borders(Borders::ALL);
        self.draw_info(f, &view, block.inner(chunks[1]));
        f.render_widget(block, chunks[1]);
    }

    fn draw_board<B: Backend>(&self, f: &mut Frame<B>, view: &View, area: Rect) {
        let thirds = [
            Constraint::Percentage(5),
            Constraint::Percentage(29),
            Constraint::Percentage(34),
            Constraint::Percentage(30),
            Constraint::Percentage(5),
        ];
        let vchunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(0)
            .constraints(thirds.as_ref())
            .split(area);

        for row in 0..3 {
            let hchunks = Layout::default()
                .direction(Direction::Horizontal)
                .margin(0)
                .horizontal_margin(3)
                .constraints(thirds.as_ref())
                .split(vchunks[row + 1]);

            for column in 0..3 {
                let index = row * 3 + column;
                let chunk = hchunks[column + 1];
                let style = if view.outcome.contains(index) {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                let label = Span::styled(
                    (index + 1).to_string(),
                    Style::default().fg(Color::DarkGray),
                );
                let block = Block::default()
                    .borders(square_borders(index))
                    .title(label);
                f.render_widget(
                    RenderMark {
                        mark: view.board.get(index),
                        style,
                    },
                    block.inner(chunk),
                );
                f.render_widget(block, chunk);
            }
        }
    }

    fn draw_info<B: Backend>(&self, f: &mut Frame<B>, view: &View, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0)].as_ref())
            .split(area);

        let message = self.message.sample();
        let text = vec![
            Spans::from(Span::styled(
                view.status.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Spans::from(format!("Order: {} (o to toggle)", view.order)),
            Spans::from(Span::styled(message, Style::default().fg(Color::Red))),
        ];
        f.render_widget(Paragraph::new(text), chunks[0]);

        let items: Vec<ListItem> = view
            .moves
            .iter()
            .map(|entry| {
                let style = if entry.is_current {
                    Style::default().add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(Spans::from(Span::styled(entry.to_string(), style)))
            })
            .collect();

        let selected = self.selected.unwrap_or(view.step);
        let mut state = ListState::default();
        state.select(view.moves.iter().position(|entry| entry.step == selected));

        let list = List::new(items)
            .block(Block::default().title("History").borders(Borders::TOP))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        f.render_stateful_widget(list, chunks[1], &mut state);
    }
}

fn square_borders(index: usize) -> Borders {
    match index {
        0 => Borders::RIGHT | Borders::BOTTOM,
        1 => Borders::ALL ^ Borders::TOP,
        2 => Borders::LEFT | Borders::BOTTOM,
        3 => Borders::ALL ^ Borders::LEFT,
        4 => Borders::ALL,
        5 => Borders::ALL ^ Borders::RIGHT,
        6 => Borders::RIGHT | Borders::TOP,
        7 => Borders::ALL ^ Borders::BOTTOM,
        _ => Borders::LEFT | Borders::TOP,
    }
}

struct RenderMark {
    mark: Option<Mark>,
    style: Style,
}

impl Widget for RenderMark {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.mark {
            Some(Mark::X) => render_x(area, buf, self.style),
            Some(Mark::O) => render_o(area, buf, self.style),
            None => {}
        }
    }
}

fn render_x(area: Rect, buf: &mut Buffer, style: Style) {
    const LEFT: &str = "\\@\\";
    const RIGHT: &str = "/@/";

    if area.height == 0 || area.width < 3 {
        return;
    }
    // Columns to shift per line; the strokes are 3 characters wide.
    let span = area.width - 3;
    let inv_slope = span / area.height;
    for y in 0..area.height {
        let x_right = (y * inv_slope).min(span);
        buf.set_string(area.x + span - x_right, area.y + y, RIGHT, style);
        buf.set_string(area.x + x_right, area.y + y, LEFT, style);
    }
}

fn render_o(area: Rect, buf: &mut Buffer, style: Style) {
    if area.width < 3 || area.height < 3 {
        return;
    }

    let radius_x = f32::from(area.width - 1) / 2.0;
    let radius_y = f32::from(area.height - 1) / 2.0;
    let center_x = f32::from(area.x) + radius_x;
    let center_y = f32::from(area.y) + radius_y;

    let steps = (radius_x.max(radius_y) * 8.0).ceil() as u32;
    for i in 0..steps {
        let angle = i as f32 * std::f32::consts::TAU / steps as f32;
        let (sin, cos) = angle.sin_cos();
        let x = (center_x + radius_x * cos).round() as u16;
        let y = (center_y + radius_y * sin).round() as u16;
        let x = x.clamp(area.left(), area.right() - 1);
        let y = y.clamp(area.top(), area.bottom() - 1);
        buf.get_mut(x, y).set_char('@').set_style(style);
    }
}
