use std::io::{self, BufRead, Stdout, Write, stdin, stdout};
use std::thread::sleep;
use std::time::Duration;

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyEvent, KeyEventKind, read, poll};

use crate::input::KeySource;
use crate::render::{Renderer, View};
use crate::session::Console;

/// Real terminal: cooked mode for the menus, raw mode on the alternate
/// screen while a round runs.
pub struct TermManager {
    stdout: Stdout,
    in_round: bool,
    pending_key: Option<KeyEvent>,
}

impl TermManager {
    pub fn new() -> Self {
        TermManager { stdout: stdout(), in_round: false, pending_key: None }
    }

    fn setup(&mut self) -> io::Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        // From here on a failure still has to be undone on drop.
        self.in_round = true;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)
    }

    fn restore(&mut self) -> io::Result<()> {
        self.in_round = false;
        self.pending_key = None;
        terminal::disable_raw_mode()?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
    }
}

impl Drop for TermManager {
    fn drop(&mut self) {
        if self.in_round {
            let _ = self.restore();
        }
    }
}

impl KeySource for TermManager {
    fn key_available(&mut self) -> io::Result<bool> {
        if self.pending_key.is_some() {
            return Ok(true);
        }

        // Skip resizes, mouse events and key releases.
        while poll(Duration::from_millis(0))? {
            if let Event::Key(ev) = read()? {
                if ev.kind == KeyEventKind::Press {
                    self.pending_key = Some(ev);
                    return Ok(true);
                }
            }
        }

        Ok(false)
    }

    fn read_key(&mut self) -> io::Result<KeyEvent> {
        if let Some(ev) = self.pending_key.take() {
            return Ok(ev);
        }

        loop {
            if let Event::Key(ev) = read()? {
                if ev.kind == KeyEventKind::Press {
                    return Ok(ev);
                }
            }
        }
    }
}

impl Renderer for TermManager {
    fn draw(&mut self, view: &View) -> io::Result<()> {
        for (y, line) in view.compose().iter().enumerate() {
            queue!(
                self.stdout,
                cursor::MoveTo(0, y as u16),
                style::Print(line),
                terminal::Clear(ClearType::UntilNewLine)
            )?;
        }
        queue!(self.stdout, terminal::Clear(ClearType::FromCursorDown))?;
        self.stdout.flush()
    }
}

impl Console for TermManager {
    fn clear_screen(&mut self) -> io::Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))
    }

    /// The last line is left open so the cursor waits after a prompt.
    fn print_lines(&mut self, lines: &[String]) -> io::Result<()> {
        if let Some((last, rest)) = lines.split_last() {
            for line in rest {
                writeln!(self.stdout, "{}", line)?;
            }
            write!(self.stdout, "{}", last)?;
        }
        self.stdout.flush()
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        match stdin().lock().read_line(&mut line)? {
            0 => Ok(None),
            _ => Ok(Some(line)),
        }
    }

    fn begin_round(&mut self) -> io::Result<()> {
        self.setup()?;
        execute!(self.stdout, terminal::Clear(ClearType::All))
    }

    fn end_round(&mut self) -> io::Result<()> {
        self.restore()
    }

    fn sleep(&mut self, duration: Duration) {
        sleep(duration);
    }
}
