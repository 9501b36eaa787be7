use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::game::{GameState, GameStatus};
use crate::window::{SnakeWindow, WindowRect};

const KEY_HINT: &str = "h help  p pause  r restart  q quit";

const HELP_LINES: [(i32, i32, &str); 6] = [
    (3, 2, "h - toggle help information"),
    (3, 3, "p - toggle play/pause mode"),
    (3, 4, "r - restart game"),
    (3, 5, "q - quit"),
    (3, 6, "arrows - move snake (in play mode) or"),
    (12, 7, "move window (in pause mode)"),
];

/// Character surface addressed by absolute terminal coordinates.
///
/// Writes outside the surface are dropped.
pub trait Canvas {
    fn put_char(&mut self, x: i32, y: i32, glyph: char);

    fn print(&mut self, x: i32, y: i32, text: &str) {
        for (offset, glyph) in (0..).zip(text.chars()) {
            self.put_char(x + offset, y, glyph);
        }
    }
}

impl Canvas for Buffer {
    fn put_char(&mut self, x: i32, y: i32, glyph: char) {
        let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y)) else {
            return;
        };
        if let Some(cell) = self.cell_mut((x, y)) {
            cell.set_char(glyph);
        }
    }
}

/// Renders the window plus a key hint on the bottom terminal row.
pub fn render(frame: &mut Frame<'_>, window: &SnakeWindow) {
    let [_, hint_row] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

    window.paint(frame.buffer_mut());

    frame.render_widget(
        Paragraph::new(Line::from(KEY_HINT)).style(Style::default().fg(Color::DarkGray)),
        hint_row,
    );
}

/// Paints the score line, the board and at most one overlay inside `geom`.
///
/// Help wins over the state banners.
pub fn paint_game<C: Canvas + ?Sized>(canvas: &mut C, geom: WindowRect, state: &GameState) {
    let (left, top) = (i32::from(geom.x), i32::from(geom.y));

    canvas.print(left, top - 1, &format!("| SCORE: {} |", state.score));

    for y in 1..i32::from(geom.height) - 1 {
        for x in 1..i32::from(geom.width) - 1 {
            canvas.put_char(left + x, top + y, ' ');
        }
    }

    // Tail first so the head glyph is drawn last.
    for segment in state.snake.segments().rev() {
        let at = segment.position;
        canvas.put_char(left + at.x, top + at.y, segment.glyph);
    }

    // Food left under a filled board is stale.
    let food = state.food.position;
    if !state.snake.occupies(food) {
        canvas.put_char(left + food.x, top + food.y, state.food.glyph);
    }

    if state.help {
        for (dx, dy, text) in HELP_LINES {
            canvas.print(left + dx, top + dy, text);
        }
        return;
    }

    let banner = match state.status {
        GameStatus::Paused => Some(("PAUSED", 3)),
        GameStatus::Lost => Some(("YOU LOSE", 4)),
        GameStatus::Won => Some(("YOU WIN", 3)),
        GameStatus::Running => None,
    };

    if let Some((text, half_width)) = banner {
        let x = left + i32::from(geom.width) / 2 - half_width;
        let y = top + i32::from(geom.height) / 2;
        canvas.print(x, y, text);
    }
}
