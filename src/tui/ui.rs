use super::App;
use crate::game::{Round, Screen, MAX_MISSED_LETTERS};
use ratatui::{
    prelude::*,
    widgets::{block::*, *},
};

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border = self.create_border();
        let inner = border.inner(area);
        border.render(area, buf);

        if self.screen == Screen::FirstGame {
            // The initial screen shows a finished-looking demo board
            // behind the start dialog.
            let mut demo = Round::new("HANGMAN");
            for key in "habdezpuklqw".chars() {
                demo.guess(key);
            }
            render_board(&demo, MAX_MISSED_LETTERS, inner, buf);
        } else {
            render_board(&self.round, self.round.missed_letters().len(), inner, buf);
        }

        self.render_overlay(inner, buf);
    }
}

impl App {
    fn create_border(&self) -> Block<'_> {
        let title = Title::from(" Hangman ".bold());
        let mut hints: Vec<Span> = match self.screen {
            Screen::FirstGame => vec![" Start ".into(), "<Enter> ".blue().bold()],
            Screen::Playing => vec![" Guess ".into(), "<a-z> ".blue().bold()],
            Screen::GameWon | Screen::GameOver | Screen::Error => {
                vec![" New game ".into(), "<Enter> ".blue().bold()]
            }
            Screen::Loading => vec![],
        };
        hints.push(" Quit ".into());
        hints.push("<Esc> ".blue().bold());
        let instructions = Title::from(Line::from(hints));
        Block::default()
            .title(title.alignment(Alignment::Center))
            .title(
                instructions
                    .alignment(Alignment::Center)
                    .position(Position::Bottom),
            )
            .borders(Borders::ALL)
            .border_set(symbols::border::PLAIN)
    }

    /// Render the dialog for the current screen, if it has one.
    fn render_overlay(&self, area: Rect, buf: &mut Buffer) {
        let (title, description, button) = match self.screen {
            Screen::Playing => return,
            Screen::FirstGame => ("STARTING THE GAME", None, Some("Start game")),
            Screen::Loading => ("Loading...", None, None),
            Screen::Error => (
                "Something went wrong",
                self.error.clone(),
                Some("New word"),
            ),
            Screen::GameOver => (
                "Game over",
                Some(format!("The word was {}.", self.round.word())),
                Some("New word"),
            ),
            Screen::GameWon => (
                "You won!",
                Some(format!(
                    "Congratulations, you missed {} letters.",
                    self.round.missed_letters().len()
                )),
                Some("Again"),
            ),
        };

        let mut lines: Vec<Line> = vec![];
        if let Some(description) = description {
            lines.push(Line::from(description));
        }
        if let Some(button) = button {
            if !lines.is_empty() {
                lines.push(Line::default());
            }
            lines.push(Line::from(vec![
                format!(" {} ", button).black().on_blue(),
                " <Enter>".blue().bold(),
            ]));
        }

        let area = centered_rect(44, lines.len() as u16 + 4, area);
        Clear.render(area, buf);
        let block = Block::default()
            .title(Title::from(title.bold()).alignment(Alignment::Center))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .padding(Padding::new(1, 1, 1, 0));
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block)
            .render(area, buf);
    }
}

fn render_board(round: &Round, figure_parts: usize, area: Rect, buf: &mut Buffer) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .vertical_margin(1)
        .horizontal_margin(2)
        .constraints(vec![Constraint::Length(16), Constraint::Fill(1)])
        .split(area);

    render_figure(figure_parts, columns[0], buf);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Fill(1),
        ])
        .split(columns[1]);

    render_missed(&round.missed_letters(), rows[0], buf);
    render_word(round, rows[1], buf);
}

/// The gallows figure, drawn one part per missed letter.
fn render_figure(parts: usize, area: Rect, buf: &mut Buffer) {
    let lines: Vec<Line> = figure_lines(parts)
        .into_iter()
        .map(|line| Line::from(line.red()))
        .collect();
    Paragraph::new(lines).render(area, buf);
}

fn render_missed(missed: &[char], area: Rect, buf: &mut Buffer) {
    let letters = missed
        .iter()
        .map(|l| l.to_string())
        .collect::<Vec<String>>()
        .join(" ");
    Paragraph::new(vec![
        Line::from(format!("You missed ({}/{}):", missed.len(), MAX_MISSED_LETTERS).bold()),
        Line::from(letters.red().bold()),
    ])
    .render(area, buf);
}

/// One slot per letter of the word. Guessed letters and characters that
/// cannot be guessed (a hyphen) are shown, the rest stay blank.
fn render_word(round: &Round, area: Rect, buf: &mut Buffer) {
    let slots: Vec<Span> = round
        .word()
        .chars()
        .map(|c| {
            if round.is_revealed(c) {
                format!("{} ", c).bold()
            } else {
                "_ ".dark_gray()
            }
        })
        .collect();
    Paragraph::new(vec![
        Line::from("Find the word:".bold()),
        Line::from(slots),
    ])
    .render(area, buf);
}

fn figure_lines(parts: usize) -> Vec<String> {
    let mut grid = vec![vec![' '; 11]; 8];
    if parts >= 1 {
        for col in 0..11 {
            grid[7][col] = '=';
        }
    }
    if parts >= 2 {
        for row in 1..7 {
            grid[row][2] = '|';
        }
    }
    if parts >= 3 {
        grid[0][2] = '+';
        for col in 3..9 {
            grid[0][col] = '-';
        }
        grid[0][9] = '+';
    }
    if parts >= 4 {
        grid[1][3] = '\\';
    }
    if parts >= 5 {
        grid[1][9] = '|';
    }
    if parts >= 6 {
        grid[2][9] = 'O';
    }
    if parts >= 7 {
        grid[3][9] = '|';
        grid[4][9] = '|';
    }
    if parts >= 8 {
        grid[3][8] = '/';
    }
    if parts >= 9 {
        grid[3][10] = '\\';
    }
    if parts >= 10 {
        grid[5][8] = '/';
    }
    if parts >= 11 {
        grid[5][10] = '\\';
    }
    grid.into_iter().map(|row| row.into_iter().collect()).collect()
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Length(width)])
        .flex(layout::Flex::Center)
        .split(area);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(height)])
        .flex(layout::Flex::Center)
        .split(columns[0]);
    rows[0]
}
