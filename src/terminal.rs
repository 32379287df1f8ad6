use crate::error::Result;
use crate::graphics::Framebuffer;
use crate::math::to_rgb8;
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{
    self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use std::io::{self, Stdout, Write};
use std::time::Duration;

const UPPER_HALF_BLOCK: char = '\u{2580}';
const FALLBACK_SIZE: (u16, u16) = (80, 24);
const HUD_FOREGROUND: Color = Color::White;
const HUD_BACKGROUND: Color = Color::Black;

/// Input relevant to the frame loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Key(char),
    Quit,
    /// New size in columns and rows
    Resize(u16, u16),
    Other,
}

/// Terminal size in columns and rows
pub fn size() -> (u16, u16) {
    if let Some(size) = termsize::get() {
        return (size.cols, size.rows);
    }
    match terminal::size() {
        Ok(size) => size,
        Err(err) => {
            log::warn!("Could not query terminal size ({err}), assuming 80x24");
            FALLBACK_SIZE
        }
    }
}

/// Framebuffer dimensions for a terminal of `cols` x `rows` cells
pub fn framebuffer_size(cols: u16, rows: u16) -> (usize, usize) {
    (cols.max(1) as usize, rows.max(1) as usize * 2)
}

/// Colors of the cell at `col`, `row`: foreground is the top pixel.
pub fn cell_colors(frame: &Framebuffer, col: usize, row: usize) -> (Color, Color) {
    let rgb = |y: usize| {
        if y < frame.height() {
            let [r, g, b] = to_rgb8(frame.pixel(col, y));
            Color::Rgb { r, g, b }
        } else {
            Color::Rgb { r: 0, g: 0, b: 0 }
        }
    };
    (rgb(row * 2), rgb(row * 2 + 1))
}

/// Top-left cell that centers `text_len` characters on the screen
pub fn centered(cols: u16, rows: u16, text_len: usize) -> (u16, u16) {
    let len = text_len.min(cols as usize) as u16;
    ((cols - len) / 2, rows / 2)
}

/// Maps a terminal event to frame loop input.
pub fn map_event(event: Event) -> Input {
    match event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) => match code {
            KeyCode::Esc => Input::Quit,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Input::Quit,
            KeyCode::Char(c) => Input::Key(c),
            _ => Input::Other,
        },
        Event::Resize(cols, rows) => Input::Resize(cols, rows),
        _ => Input::Other,
    }
}

/// Raw-mode alternate screen, restored when dropped
pub struct TerminalSession {
    stdout: Stdout,
}

impl TerminalSession {
    pub fn enter() -> Result<Self> {
        let mut stdout = io::stdout();
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        log::debug!("Entered alternate screen");
        Ok(TerminalSession { stdout })
    }

    /// Waits up to `timeout` for an event.
    pub fn poll_input(&self, timeout: Duration) -> Result<Option<Input>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        Ok(Some(map_event(event::read()?)))
    }

    /// Draws `frame` followed by the overlay lines and an optional centered banner.
    pub fn present(
        &mut self,
        frame: &Framebuffer,
        overlay: &[String],
        banner: Option<&str>,
    ) -> Result<()> {
        let cols = frame.width();
        let rows = frame.height().div_ceil(2);
        let mut current: Option<(Color, Color)> = None;

        for row in 0..rows {
            queue!(self.stdout, MoveTo(0, row as u16))?;
            for col in 0..cols {
                let colors = cell_colors(frame, col, row);
                if current != Some(colors) {
                    queue!(
                        self.stdout,
                        SetForegroundColor(colors.0),
                        SetBackgroundColor(colors.1)
                    )?;
                    current = Some(colors);
                }
                queue!(self.stdout, Print(UPPER_HALF_BLOCK))?;
            }
        }

        queue!(
            self.stdout,
            SetForegroundColor(HUD_FOREGROUND),
            SetBackgroundColor(HUD_BACKGROUND)
        )?;
        for (line, text) in overlay.iter().enumerate().take(rows) {
            let text: String = text.chars().take(cols.saturating_sub(1)).collect();
            queue!(self.stdout, MoveTo(1, line as u16), Print(text))?;
        }
        if let Some(text) = banner {
            let (x, y) = centered(cols as u16, rows as u16, text.chars().count());
            queue!(self.stdout, MoveTo(x, y), Print(text))?;
        }

        queue!(self.stdout, ResetColor)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(err) = execute!(self.stdout, ResetColor, Show, LeaveAlternateScreen) {
            log::error!("Failed to restore terminal screen: {err}");
        }
        if let Err(err) = disable_raw_mode() {
            log::error!("Failed to disable raw mode: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::draw_line;
    use glam::{Vec2, Vec3};
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn framebuffer_has_two_pixels_per_row() {
        assert_eq!(framebuffer_size(80, 24), (80, 48));
        assert_eq!(framebuffer_size(0, 0), (1, 2));
    }

    #[test]
    fn cell_takes_top_pixel_as_foreground() {
        let mut frame = Framebuffer::new(2, 3);
        let top = Vec2::new(1.0, 0.0);
        draw_line(top, top, &mut frame, Vec3::X);
        let bottom = Vec2::new(1.0, 2.0);
        draw_line(bottom, bottom, &mut frame, Vec3::Z);

        let black = Color::Rgb { r: 0, g: 0, b: 0 };
        assert_eq!(
            cell_colors(&frame, 1, 0),
            (Color::Rgb { r: 255, g: 0, b: 0 }, black)
        );
        // Odd heights leave the lower half of the last row empty
        assert_eq!(
            cell_colors(&frame, 1, 1),
            (Color::Rgb { r: 0, g: 0, b: 255 }, black)
        );
        assert_eq!(cell_colors(&frame, 0, 0), (black, black));
    }

    #[test]
    fn banner_is_centered() {
        assert_eq!(centered(80, 24, 6), (37, 12));
        assert_eq!(centered(4, 2, 10), (0, 1));
    }

    #[test]
    fn quit_keys() {
        assert_eq!(map_event(key(KeyCode::Esc, KeyModifiers::NONE)), Input::Quit);
        assert_eq!(
            map_event(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Input::Quit
        );
        assert_eq!(
            map_event(key(KeyCode::Char('c'), KeyModifiers::NONE)),
            Input::Key('c')
        );
    }

    #[test]
    fn resize_and_release_events() {
        assert_eq!(map_event(Event::Resize(100, 30)), Input::Resize(100, 30));
        let release = Event::Key(KeyEvent::new_with_kind(
            KeyCode::Char('h'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
        ));
        assert_eq!(map_event(release), Input::Other);
        assert_eq!(map_event(Event::FocusGained), Input::Other);
    }
}
