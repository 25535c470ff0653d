use std::io::{self, Stdout, Write, stdout};

use crossterm::terminal::{self, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, style};

use snake_engine::{Direction, GameFrame};

const BODY_CHAR: char = '█';
const FOOD_CHAR: char = 'O';
const HELP_LINE: &str = "arrows/wasd move | space start/pause | +/- speed | r restart | q quit";

/// Owns the raw-mode alternate screen and redraws it from full frames.
pub struct TermScreen {
    stdout: Stdout,
    status_row: u16,
}

impl TermScreen {
    pub fn new() -> Self {
        Self {
            stdout: stdout(),
            status_row: 0,
        }
    }

    pub fn setup(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(self.stdout, EnterAlternateScreen, cursor::Hide)
    }

    pub fn restore(&mut self) -> io::Result<()> {
        execute!(self.stdout, cursor::Show, LeaveAlternateScreen)?;
        terminal::disable_raw_mode()
    }

    pub fn draw_frame(&mut self, frame: &GameFrame) -> io::Result<()> {
        // playfield is offset by one cell for the border box
        let width = frame.grid_width as u16 + 2;
        let height = frame.grid_height as u16 + 2;
        self.status_row = height + 1;

        queue!(self.stdout, terminal::Clear(ClearType::All))?;

        for x in 0..width {
            let ch = if x == 0 || x == width - 1 { '+' } else { '-' };
            self.put(x, 0, ch)?;
            self.put(x, height - 1, ch)?;
        }
        for y in 1..height - 1 {
            self.put(0, y, '|')?;
            self.put(width - 1, y, '|')?;
        }

        if let Some(food) = frame.food {
            self.put(food.x as u16 + 1, food.y as u16 + 1, FOOD_CHAR)?;
        }

        for (i, cell) in frame.snake.iter().enumerate() {
            let ch = if i == 0 {
                head_char(frame.direction)
            } else {
                BODY_CHAR
            };
            self.put(cell.x as u16 + 1, cell.y as u16 + 1, ch)?;
        }

        queue!(
            self.stdout,
            cursor::MoveTo(0, height),
            style::Print(format!(
                "Score: {}   Speed: {} ms",
                frame.score, frame.tick_interval_ms
            )),
            cursor::MoveTo(0, height + 2),
            style::Print(HELP_LINE),
        )?;
        self.stdout.flush()
    }

    pub fn draw_status(&mut self, message: &str) -> io::Result<()> {
        queue!(
            self.stdout,
            cursor::MoveTo(0, self.status_row),
            terminal::Clear(ClearType::CurrentLine),
            style::Print(message),
        )?;
        self.stdout.flush()
    }

    fn put(&mut self, x: u16, y: u16, ch: char) -> io::Result<()> {
        queue!(self.stdout, cursor::MoveTo(x, y), style::Print(ch))
    }
}

fn head_char(direction: Direction) -> char {
    match direction {
        Direction::Up => '^',
        Direction::Down => 'v',
        Direction::Left => '<',
        Direction::Right => '>',
    }
}
