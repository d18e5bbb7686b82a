use crate::cursor::{Attribute, Cell, CELLS};
use crate::window::Window;
use serde::{Deserialize, Serialize};

/// Refresh ticks between flash timer expiries
pub const FLASH_PERIOD: u8 = 20;

/// Which cells the flash timer marks, set by the `0xD_` command.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlashControl {
    #[default]
    None,
    InsideWindow,
    OutsideWindow,
    All,
}

impl FlashControl {
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => FlashControl::None,
            1 => FlashControl::InsideWindow,
            2 => FlashControl::OutsideWindow,
            _ => FlashControl::All,
        }
    }
}

/// Two-phase flash timer.
///
/// Each expiry alternates between marking cells and counting down the flash
/// rate; the attributes are only returned to normal once the rate runs out.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Flash {
    pub(crate) rate: u8,
    pub(crate) control: FlashControl,
    pub(crate) timer: u8,
    pub(crate) flashing: bool,
}

impl Flash {
    pub fn rate(&self) -> u8 {
        self.rate
    }

    pub fn control(&self) -> FlashControl {
        self.control
    }

    pub fn timer(&self) -> u8 {
        self.timer
    }

    pub fn is_flashing(&self) -> bool {
        self.flashing
    }

    /// `0xC_`: new rate, restarts the timer.
    pub fn set_rate(&mut self, rate: u8) {
        self.rate = rate & 0x0F;
        if self.rate == 0 && self.flashing {
            self.flashing = false;
        }
        self.timer = FLASH_PERIOD;
    }

    /// `0xD_`
    pub fn set_control(&mut self, control: FlashControl) {
        self.control = control;
        if control == FlashControl::None && self.flashing {
            self.flashing = false;
        }
    }

    /// Runs one refresh tick of the timer against the display cells.
    pub fn tick(&mut self, cells: &mut [Cell; CELLS], window: &Window) {
        if self.timer == 0 {
            return;
        }
        self.timer -= 1;
        if self.timer != 0 {
            return;
        }

        self.timer = FLASH_PERIOD;
        if !self.flashing {
            self.mark(cells, window);
        } else {
            self.rate = self.rate.wrapping_sub(1) & 0x0F;
            if self.rate == 0 {
                self.timer = 0;
                for cell in cells.iter_mut() {
                    cell.attribute = Attribute::Normal;
                }
                log::debug!("flash finished");
            }
            if self.control != FlashControl::None {
                self.flashing = false;
            }
        }
    }

    fn mark(&mut self, cells: &mut [Cell; CELLS], window: &Window) {
        let flash_if = |on: bool| if on { Attribute::Flash } else { Attribute::Normal };

        match self.control {
            FlashControl::None => return,
            FlashControl::InsideWindow => {
                for (i, cell) in cells.iter_mut().enumerate() {
                    cell.attribute = flash_if(window.contains(i));
                }
            }
            FlashControl::OutsideWindow => {
                for (i, cell) in cells.iter_mut().enumerate() {
                    cell.attribute = flash_if(!window.contains(i));
                }
            }
            FlashControl::All => {
                for cell in cells.iter_mut() {
                    cell.attribute = Attribute::Flash;
                }
            }
        }
        self.flashing = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(flash: &mut Flash, cells: &mut [Cell; CELLS], window: &Window, ticks: usize) {
        for _ in 0..ticks {
            flash.tick(cells, window);
        }
    }

    fn attributes(cells: &[Cell; CELLS]) -> Vec<Attribute> {
        cells.iter().map(|c| c.attribute).collect()
    }

    #[test]
    fn idle_timer_does_nothing() {
        let mut flash = Flash::default();
        let mut cells = [Cell::EMPTY; CELLS];
        cells[3].attribute = Attribute::Blank;

        run(&mut flash, &mut cells, &Window::default(), 100);
        assert_eq!(cells[3].attribute, Attribute::Blank);
        assert_eq!(flash.timer(), 0);
    }

    #[test]
    fn flash_all_counts_down_rate() {
        let mut flash = Flash::default();
        let mut cells = [Cell::EMPTY; CELLS];
        let window = Window::default();
        flash.set_control(FlashControl::All);
        flash.set_rate(2);

        run(&mut flash, &mut cells, &window, 19);
        assert_eq!(cells[0].attribute, Attribute::Normal);

        run(&mut flash, &mut cells, &window, 1);
        assert!(flash.is_flashing());
        assert!(cells.iter().all(|c| c.attribute == Attribute::Flash));

        // Rate 2 -> 1, the marks stay put
        run(&mut flash, &mut cells, &window, 20);
        assert!(!flash.is_flashing());
        assert_eq!(flash.rate(), 1);
        assert!(cells.iter().all(|c| c.attribute == Attribute::Flash));

        run(&mut flash, &mut cells, &window, 20);
        assert!(flash.is_flashing());

        run(&mut flash, &mut cells, &window, 20);
        assert_eq!(flash.rate(), 0);
        assert_eq!(flash.timer(), 0);
        assert!(!flash.is_flashing());
        assert!(cells.iter().all(|c| c.attribute == Attribute::Normal));
    }

    #[test]
    fn inside_and_outside_window() {
        let mut window = Window::default();
        window.set_start(4);
        window.set_end(6);
        let mut cells = [Cell::EMPTY; CELLS];

        let mut flash = Flash::default();
        flash.set_control(FlashControl::InsideWindow);
        flash.set_rate(1);
        run(&mut flash, &mut cells, &window, 20);
        let attrs = attributes(&cells);
        assert_eq!(attrs[3], Attribute::Normal);
        assert_eq!(&attrs[4..7], &[Attribute::Flash; 3]);
        assert_eq!(attrs[7], Attribute::Normal);

        let mut flash = Flash::default();
        flash.set_control(FlashControl::OutsideWindow);
        flash.set_rate(1);
        run(&mut flash, &mut cells, &window, 20);
        let attrs = attributes(&cells);
        assert_eq!(attrs[3], Attribute::Flash);
        assert_eq!(&attrs[4..7], &[Attribute::Normal; 3]);
        assert_eq!(attrs[15], Attribute::Flash);
    }

    #[test]
    fn no_control_only_reloads() {
        let mut flash = Flash::default();
        let mut cells = [Cell::EMPTY; CELLS];
        flash.set_rate(3);

        run(&mut flash, &mut cells, &Window::default(), 20);
        assert!(!flash.is_flashing());
        assert_eq!(flash.timer(), FLASH_PERIOD);
        assert_eq!(flash.rate(), 3);
    }

    #[test]
    fn zero_rate_stops_flashing() {
        let mut flash = Flash {
            rate: 4,
            control: FlashControl::All,
            timer: 5,
            flashing: true,
        };
        flash.set_rate(0);
        assert!(!flash.is_flashing());
        assert_eq!(flash.timer(), FLASH_PERIOD);

        flash.flashing = true;
        flash.set_control(FlashControl::None);
        assert!(!flash.is_flashing());
    }
}
