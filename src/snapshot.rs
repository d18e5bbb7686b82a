use crate::cursor::{Cell, Cursor, DisplayMode, CELLS};
use crate::error::Error;
use crate::flash::{Flash, FlashControl, FLASH_PERIOD};
use crate::shift::ShiftRegister;
use crate::vfd::{GlyphLoad, Vfd};
use crate::window::Window;
use serde::{Deserialize, Serialize};

/// Every piece of controller state, one plain field each, so a host can
/// save and restore it in whatever format it likes.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub cells: [Cell; CELLS],
    pub cursor_pos: u8,
    pub pcursor_pos: u8,
    pub display_mode: DisplayMode,
    pub scroll_active: bool,
    pub window_start: u8,
    pub window_end: u8,
    pub window_size: i8,
    pub flash_rate: u8,
    pub flash_control: FlashControl,
    pub flash_timer: u8,
    pub flashing: bool,
    pub shift_count: u8,
    pub shift_data: u8,
    pub clock_level: bool,
    pub data_level: bool,
    pub user_remaining: u8,
    pub user_data: u16,
}

impl Snapshot {
    fn validate(&self) -> Result<(), Error> {
        let check = |name: &str, value: u8, max: u8| {
            if value > max {
                Err(Error::Snapshot(format!("{} is {}, max {}", name, value, max)))
            } else {
                Ok(())
            }
        };

        check("cursor_pos", self.cursor_pos, 15)?;
        check("pcursor_pos", self.pcursor_pos, 15)?;
        check("window_start", self.window_start, 15)?;
        check("window_end", self.window_end, 15)?;
        check("flash_rate", self.flash_rate, 15)?;
        check("flash_timer", self.flash_timer, FLASH_PERIOD)?;
        check("shift_count", self.shift_count, 7)?;
        check("user_remaining", self.user_remaining, 2)?;

        // Size zero is the power-on window, before any bound was set
        let derived = self.window_end as i8 - self.window_start as i8 + 1;
        if self.window_size != derived && self.window_size != 0 {
            return Err(Error::Snapshot(format!(
                "window_size is {}, bounds {}..={} give {}",
                self.window_size, self.window_start, self.window_end, derived
            )));
        }
        Ok(())
    }
}

impl Vfd {
    pub fn save(&self) -> Snapshot {
        Snapshot {
            cells: self.cells,
            cursor_pos: self.cursor.pos,
            pcursor_pos: self.cursor.last,
            display_mode: self.cursor.mode,
            scroll_active: self.cursor.scroll_active,
            window_start: self.window.start,
            window_end: self.window.end,
            window_size: self.window.size,
            flash_rate: self.flash.rate,
            flash_control: self.flash.control,
            flash_timer: self.flash.timer,
            flashing: self.flash.flashing,
            shift_count: self.shift.count,
            shift_data: self.shift.data,
            clock_level: self.shift.clock_level,
            data_level: self.shift.data_level,
            user_remaining: self.glyph.remaining,
            user_data: self.glyph.data,
        }
    }

    /// Installs saved state and refreshes the outputs once. Out of range
    /// fields are rejected and leave the controller untouched.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<(), Error> {
        snapshot.validate()?;

        self.cells = snapshot.cells;
        self.cursor = Cursor {
            pos: snapshot.cursor_pos,
            last: snapshot.pcursor_pos,
            mode: snapshot.display_mode,
            scroll_active: snapshot.scroll_active,
        };
        self.window = Window {
            start: snapshot.window_start,
            end: snapshot.window_end,
            size: snapshot.window_size,
        };
        self.flash = Flash {
            rate: snapshot.flash_rate,
            control: snapshot.flash_control,
            timer: snapshot.flash_timer,
            flashing: snapshot.flashing,
        };
        self.shift = ShiftRegister {
            count: snapshot.shift_count,
            data: snapshot.shift_data,
            clock_level: snapshot.clock_level,
            data_level: snapshot.data_level,
        };
        self.glyph = GlyphLoad {
            remaining: snapshot.user_remaining,
            data: snapshot.user_data,
        };

        log::debug!("vfd{}: state restored", self.port());
        self.refresh();
        Ok(())
    }
}
