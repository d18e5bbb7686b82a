use crate::window::Window;
use serde::{Deserialize, Serialize};

/// Number of character cells on the display
pub const CELLS: usize = 16;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Attribute {
    #[default]
    Normal,
    Flash,
    Blank,
}

/// One character position: logical segment pattern plus attribute.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub pattern: u16,
    pub attribute: Attribute,
}

impl Cell {
    pub const EMPTY: Cell = Cell {
        pattern: 0,
        attribute: Attribute::Normal,
    };
}

/// Cursor advance mode, set by the `0xA_` command.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayMode {
    #[default]
    RotateLeft,
    RotateRight,
    ScrollLeft,
    ScrollRight,
}

impl DisplayMode {
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => DisplayMode::RotateLeft,
            1 => DisplayMode::RotateRight,
            2 => DisplayMode::ScrollLeft,
            _ => DisplayMode::ScrollRight,
        }
    }

    /// Scroll modes need a valid window, otherwise they act like the
    /// rotate mode going the same way.
    pub fn effective(self, window: &Window) -> Self {
        if window.is_valid() {
            return self;
        }
        match self {
            DisplayMode::ScrollLeft => DisplayMode::RotateLeft,
            DisplayMode::ScrollRight => DisplayMode::RotateRight,
            mode => mode,
        }
    }
}

/// Cursor engine state.
///
/// `pos` is where the next character goes. `last` is the cell most recently
/// moved over, which the flash and decimal point codes decorate.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Cursor {
    pub(crate) pos: u8,
    pub(crate) last: u8,
    pub(crate) mode: DisplayMode,
    pub(crate) scroll_active: bool,
}

impl Cursor {
    pub fn pos(&self) -> u8 {
        self.pos
    }

    pub fn last(&self) -> u8 {
        self.last
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn scroll_active(&self) -> bool {
        self.scroll_active
    }

    /// Absolute cursor addressing (`0x9_`).
    pub fn set_pos(&mut self, pos: u8, window: &Window) {
        self.pos = pos & 0x0F;
        self.scroll_active = self.mode == DisplayMode::ScrollLeft && self.pos >= window.end;
    }

    /// Window end changed (`0xF_`): a scroll-left cursor past the new end is
    /// pulled back onto it.
    pub fn window_end_moved(&mut self, window: &Window) {
        self.scroll_active = false;
        if self.mode == DisplayMode::ScrollLeft && self.pos >= window.end {
            self.scroll_active = true;
            self.pos = window.end;
        }
    }

    /// Moves one step in the current mode, writing `segdata` on the way when
    /// `change` is set.
    pub fn advance(
        &mut self,
        cells: &mut [Cell; CELLS],
        window: &Window,
        segdata: u16,
        change: bool,
    ) {
        self.last = self.pos;

        match self.mode.effective(window) {
            DisplayMode::RotateLeft => {
                self.pos &= 0x0F;
                if change {
                    cells[self.pos as usize].pattern = segdata;
                }
                self.pos = (self.pos + 1) & 0x0F;
            }
            DisplayMode::RotateRight => {
                self.pos &= 0x0F;
                if change {
                    cells[self.pos as usize].pattern = segdata;
                }
                self.pos = self.pos.wrapping_sub(1) & 0x0F;
            }
            DisplayMode::ScrollLeft => {
                if self.pos < window.end {
                    self.scroll_active = false;
                    if change {
                        cells[self.pos as usize].pattern = segdata;
                    }
                    self.pos += 1;
                } else {
                    let (start, end) = (window.start as usize, window.end as usize);
                    if self.scroll_active {
                        for i in start..end {
                            cells[i].pattern = cells[i + 1].pattern;
                        }
                    } else {
                        self.scroll_active = true;
                    }
                    cells[end].pattern = if change { segdata } else { 0 };
                }
            }
            DisplayMode::ScrollRight => {
                if self.pos > window.start {
                    if change {
                        cells[self.pos as usize].pattern = segdata;
                    }
                    self.pos = self.pos.wrapping_sub(1);
                    if self.pos > 15 {
                        self.pos = 0;
                    }
                } else {
                    let (start, end) = (window.start as usize, window.end as usize);
                    if self.scroll_active {
                        for i in (start + 1..=end).rev() {
                            cells[i].pattern = cells[i - 1].pattern;
                        }
                    } else {
                        self.scroll_active = true;
                    }
                    cells[start].pattern = if change { segdata } else { 0 };
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(start: u8, end: u8) -> Window {
        let mut window = Window::default();
        window.set_start(start);
        window.set_end(end);
        window
    }

    fn patterns(cells: &[Cell; CELLS]) -> Vec<u16> {
        cells.iter().map(|c| c.pattern).collect()
    }

    #[test]
    fn rotate_left_wraps() {
        let mut cells = [Cell::EMPTY; CELLS];
        let mut cursor = Cursor {
            pos: 15,
            ..Cursor::default()
        };

        cursor.advance(&mut cells, &Window::default(), 0x1111, true);
        assert_eq!(cells[15].pattern, 0x1111);
        assert_eq!(cursor.pos(), 0);
        assert_eq!(cursor.last(), 15);
    }

    #[test]
    fn rotate_right_wraps() {
        let mut cells = [Cell::EMPTY; CELLS];
        let mut cursor = Cursor {
            mode: DisplayMode::RotateRight,
            ..Cursor::default()
        };

        cursor.advance(&mut cells, &Window::default(), 0x2222, true);
        assert_eq!(cells[0].pattern, 0x2222);
        assert_eq!(cursor.pos(), 15);
    }

    #[test]
    fn dummy_step_keeps_content() {
        let mut cells = [Cell::EMPTY; CELLS];
        cells[4].pattern = 0xBEEF;
        let mut cursor = Cursor {
            pos: 4,
            ..Cursor::default()
        };

        cursor.advance(&mut cells, &Window::default(), 0, false);
        assert_eq!(cells[4].pattern, 0xBEEF);
        assert_eq!(cursor.pos(), 5);
    }

    #[test]
    fn scroll_left_fills_then_shifts() {
        let mut cells = [Cell::EMPTY; CELLS];
        let win = window(2, 5);
        let mut cursor = Cursor {
            pos: 2,
            mode: DisplayMode::ScrollLeft,
            ..Cursor::default()
        };

        for value in 1..=4 {
            cursor.advance(&mut cells, &win, value, true);
        }
        assert_eq!(&patterns(&cells)[2..6], &[1, 2, 3, 4]);
        assert!(cursor.scroll_active());

        cursor.advance(&mut cells, &win, 5, true);
        assert_eq!(&patterns(&cells)[2..6], &[2, 3, 4, 5]);
        assert_eq!(cursor.pos(), 5);
        assert_eq!(cells[1].pattern, 0);
        assert_eq!(cells[6].pattern, 0);
    }

    #[test]
    fn scroll_left_dummy_blanks_end() {
        let mut cells = [Cell::EMPTY; CELLS];
        let win = window(0, 3);
        let mut cursor = Cursor {
            pos: 3,
            mode: DisplayMode::ScrollLeft,
            scroll_active: true,
            ..Cursor::default()
        };
        for (i, cell) in cells.iter_mut().enumerate().take(4) {
            cell.pattern = i as u16 + 1;
        }

        cursor.advance(&mut cells, &win, 0xFFFF, false);
        assert_eq!(&patterns(&cells)[0..4], &[2, 3, 4, 0]);
    }

    #[test]
    fn scroll_right_fills_then_shifts() {
        let mut cells = [Cell::EMPTY; CELLS];
        let win = window(2, 5);
        let mut cursor = Cursor {
            pos: 5,
            mode: DisplayMode::ScrollRight,
            ..Cursor::default()
        };

        for value in 1..=4 {
            cursor.advance(&mut cells, &win, value, true);
        }
        assert_eq!(&patterns(&cells)[2..6], &[4, 3, 2, 1]);
        assert_eq!(cursor.pos(), 2);

        cursor.advance(&mut cells, &win, 5, true);
        assert_eq!(&patterns(&cells)[2..6], &[5, 4, 3, 2]);
        assert_eq!(cursor.pos(), 2);
    }

    #[test]
    fn invalid_window_falls_back_to_rotate() {
        let win = window(6, 2);
        assert_eq!(DisplayMode::ScrollLeft.effective(&win), DisplayMode::RotateLeft);
        assert_eq!(DisplayMode::ScrollRight.effective(&win), DisplayMode::RotateRight);

        let mut cells = [Cell::EMPTY; CELLS];
        let mut cursor = Cursor {
            pos: 9,
            mode: DisplayMode::ScrollLeft,
            ..Cursor::default()
        };
        cursor.advance(&mut cells, &win, 7, true);
        assert_eq!(cells[9].pattern, 7);
        assert_eq!(cursor.pos(), 10);
    }

    #[test]
    fn set_pos_arms_scroll_at_end() {
        let win = window(0, 4);
        let mut cursor = Cursor {
            mode: DisplayMode::ScrollLeft,
            ..Cursor::default()
        };

        cursor.set_pos(0x94, &win);
        assert_eq!(cursor.pos(), 4);
        assert!(cursor.scroll_active());

        cursor.set_pos(1, &win);
        assert!(!cursor.scroll_active());
    }

    #[test]
    fn window_end_clamps_scroll_left_cursor() {
        let mut cursor = Cursor {
            pos: 12,
            mode: DisplayMode::ScrollLeft,
            ..Cursor::default()
        };
        cursor.window_end_moved(&window(0, 7));
        assert_eq!(cursor.pos(), 7);
        assert!(cursor.scroll_active());

        let mut rotating = Cursor {
            pos: 12,
            ..Cursor::default()
        };
        rotating.window_end_moved(&window(0, 7));
        assert_eq!(rotating.pos(), 12);
        assert!(!rotating.scroll_active());
    }
}
