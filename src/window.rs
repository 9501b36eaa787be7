use crate::config::{GameConfig, GridSize};
use crate::game::GameState;
use crate::input::Key;
use crate::renderer::{Canvas, paint_game};

/// Absolute window geometry in terminal cells, frame included.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct WindowRect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl WindowRect {
    #[must_use]
    pub fn size(self) -> GridSize {
        GridSize {
            width: self.width,
            height: self.height,
        }
    }
}

/// Bordered window that can be dragged around with the arrow keys.
#[derive(Debug, Clone)]
pub struct FramedWindow {
    pub geom: WindowRect,
}

impl FramedWindow {
    #[must_use]
    pub fn new(geom: WindowRect) -> Self {
        Self { geom }
    }

    /// Generic window handling: arrows move the window by one cell.
    ///
    /// The top edge stops at row 1 so the line above the window stays visible.
    #[must_use]
    pub fn handle_key(&mut self, key: Key) -> bool {
        let geom = &mut self.geom;
        match key {
            Key::Up => geom.y = geom.y.saturating_sub(1).max(1),
            Key::Down => geom.y = geom.y.saturating_add(1),
            Key::Left => geom.x = geom.x.saturating_sub(1),
            Key::Right => geom.x = geom.x.saturating_add(1),
            Key::Char(_) | Key::Other => return false,
        }
        true
    }

    /// Draws the border ring.
    pub fn paint<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        let WindowRect {
            x,
            y,
            width,
            height,
        } = self.geom;
        let (left, top) = (i32::from(x), i32::from(y));
        let right = left + i32::from(width) - 1;
        let bottom = top + i32::from(height) - 1;

        for column in left + 1..right {
            canvas.put_char(column, top, '-');
            canvas.put_char(column, bottom, '-');
        }
        for row in top + 1..bottom {
            canvas.put_char(left, row, '|');
            canvas.put_char(right, row, '|');
        }
        for (column, row) in [(left, top), (right, top), (left, bottom), (right, bottom)] {
            canvas.put_char(column, row, '+');
        }
    }
}

/// The snake game hosted in a framed window.
///
/// Keys go to the game first; whatever it does not consume falls through to
/// the frame.
#[derive(Debug, Clone)]
pub struct SnakeWindow {
    pub frame: FramedWindow,
    pub game: GameState,
}

impl SnakeWindow {
    #[must_use]
    pub fn new(geom: WindowRect, game: GameState) -> Self {
        Self {
            frame: FramedWindow::new(geom),
            game,
        }
    }

    /// Builds the window and a paused game from session settings.
    #[must_use]
    pub fn from_config(config: &GameConfig) -> Self {
        let geom = WindowRect {
            x: config.x,
            y: config.y.max(1),
            width: config.width,
            height: config.height,
        };
        let game = match config.seed {
            Some(seed) => GameState::new_with_seed(geom.size(), seed),
            None => GameState::new(geom.size()),
        };
        Self::new(geom, game)
    }

    #[must_use]
    pub fn geom(&self) -> WindowRect {
        self.frame.geom
    }

    /// Changes the window size; the game picks up the new interior.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.frame.geom.width = width;
        self.frame.geom.height = height;
        self.game.set_bounds(self.frame.geom.size());
    }

    /// Returns whether the key was consumed by the game or the frame.
    #[must_use]
    pub fn handle_key(&mut self, key: Key) -> bool {
        self.game.handle_key(key) || self.frame.handle_key(key)
    }

    /// Delivers one timer pulse.
    pub fn tick(&mut self) {
        self.game.tick();
    }

    /// Draws frame, status line, board and overlays.
    pub fn paint<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        self.frame.paint(canvas);
        paint_game(canvas, self.frame.geom, &self.game);
    }
}
