use std::io::{self, Stdout, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{ExecutableCommand, QueueableCommand};

use crate::session::{Display, InputSource};
use crate::types::{Command, Direction};

/// Raw mode plus alternate screen for as long as the guard lives.
pub struct TerminalGuard {
    active: bool,
}

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(error) = stdout
            .execute(EnterAlternateScreen)
            .and_then(|out| out.execute(Hide))
        {
            let _ = terminal::disable_raw_mode();
            return Err(error);
        }
        Ok(Self { active: true })
    }

    pub fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        let mut show = || io::stdout().execute(Show).map(|_| ());
        let mut leave = || io::stdout().execute(LeaveAlternateScreen).map(|_| ());
        let mut cooked = terminal::disable_raw_mode;
        let mut steps: [&mut dyn FnMut() -> io::Result<()>; 3] =
            [&mut show, &mut leave, &mut cooked];
        run_all(&mut steps)
    }
}

/// Runs every step even after a failure and reports the first error.
fn run_all(steps: &mut [&mut dyn FnMut() -> io::Result<()>]) -> io::Result<()> {
    let mut first_error = None;
    for step in steps.iter_mut() {
        if let Err(error) = step() {
            first_error.get_or_insert(error);
        }
    }
    first_error.map_or(Ok(()), Err)
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

pub struct KeyboardInput;

impl InputSource for KeyboardInput {
    fn next_command(&mut self) -> io::Result<Command> {
        loop {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => return Ok(decode_key(key)),
                Event::Resize(_, _) => return Ok(Command::Redraw),
                _ => {}
            }
        }
    }

    fn wait_for_key(&mut self) -> io::Result<()> {
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(());
                }
            }
        }
    }
}

/// Arrows move, Escape (or Ctrl+C, which raw mode swallows) quits, anything else idles.
pub fn decode_key(key: KeyEvent) -> Command {
    match key.code {
        KeyCode::Up => Command::Move(Direction::Up),
        KeyCode::Down => Command::Move(Direction::Down),
        KeyCode::Left => Command::Move(Direction::Left),
        KeyCode::Right => Command::Move(Direction::Right),
        KeyCode::Esc => Command::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Command::Quit,
        _ => Command::Idle,
    }
}

pub struct TerminalDisplay<W: Write> {
    out: W,
}

impl TerminalDisplay<Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> TerminalDisplay<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint<S: AsRef<str>>(&mut self, lines: &[S]) -> io::Result<()> {
        self.out.queue(Clear(ClearType::All))?;
        // Raw mode does not return the carriage on newline, so place each row.
        for (row, line) in lines.iter().enumerate() {
            self.out.queue(MoveTo(0, row as u16))?;
            self.out.queue(Print(line.as_ref()))?;
        }
        self.out.flush()
    }
}

impl<W: Write> Display for TerminalDisplay<W> {
    fn show_banner(&mut self, lines: &[&str]) -> io::Result<()> {
        self.paint(lines)
    }

    fn draw(&mut self, lines: &[String]) -> io::Result<()> {
        self.paint(lines)
    }
}
