use crate::charset::{
    self, CODE_DUMMY, CODE_FLASH, CODE_POINT, CODE_SEMICOLON, CODE_UNDEFINED, CODE_USER_GLYPH,
    FLASH_BIT, POINT_BIT,
};
use crate::cursor::{Attribute, Cell, Cursor, DisplayMode, CELLS};
use crate::flash::{Flash, FlashControl};
use crate::shift::{Edge, ShiftRegister};
use crate::window::Window;

/// Receives rendered physical segment patterns, one call per cell.
pub trait OutputSink {
    fn set(&mut self, index: usize, pattern: u16);
}

impl<F: FnMut(usize, u16)> OutputSink for F {
    fn set(&mut self, index: usize, pattern: u16) {
        self(index, pattern)
    }
}

/// Pending user defined glyph: the next `remaining` bytes are segment data.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GlyphLoad {
    pub(crate) remaining: u8,
    pub(crate) data: u16,
}

impl GlyphLoad {
    pub fn remaining(&self) -> u8 {
        self.remaining
    }

    pub fn data(&self) -> u16 {
        self.data
    }
}

/// BD1 16 character VFD controller.
#[derive(Debug, Clone)]
pub struct Vfd {
    port: u8,
    pub(crate) cells: [Cell; CELLS],
    pub(crate) cursor: Cursor,
    pub(crate) window: Window,
    pub(crate) flash: Flash,
    pub(crate) shift: ShiftRegister,
    pub(crate) glyph: GlyphLoad,
    outputs: [u16; CELLS],
}

impl Default for Vfd {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Vfd {
    /// Creates a powered-on controller. `port` picks the output names, see
    /// [`Vfd::output_name`].
    pub fn new(port: u8) -> Self {
        Self {
            port,
            cells: [Cell::EMPTY; CELLS],
            cursor: Cursor::default(),
            window: Window::default(),
            flash: Flash::default(),
            shift: ShiftRegister::default(),
            glyph: GlyphLoad::default(),
            outputs: [0; CELLS],
        }
    }

    /// Serial clock line. A low to high transition samples the data line.
    pub fn clock(&mut self, level: bool) {
        match self.shift.clock(level) {
            Edge::Idle => return,
            Edge::Sampled => {}
            Edge::Byte(byte) => self.submit(byte),
        }
        self.refresh();
    }

    /// Serial data line, inverted: low clocks in a 1.
    pub fn data(&mut self, level: bool) {
        self.shift.data(level);
    }

    /// Power-on reset line, active low.
    pub fn reset(&mut self, level: bool) {
        if !level {
            self.power_on_reset();
        }
    }

    pub fn power_on_reset(&mut self) {
        log::debug!("vfd{}: reset", self.port);
        *self = Self::new(self.port);
    }

    /// Display refresh tick, driven by the host at its own cadence.
    pub fn tick(&mut self) {
        self.refresh();
    }

    /// Clocks a whole command byte through the serial lines, MSB first.
    pub fn write_byte(&mut self, byte: u8) {
        for bit in (0..8).rev() {
            self.data(byte & (1 << bit) == 0);
            self.clock(false);
            self.clock(true);
        }
    }

    /// Sends display text, skipping characters the charset has no code for.
    /// Returns the number of bytes sent.
    pub fn write_str(&mut self, text: &str) -> usize {
        let mut sent = 0;
        for c in text.chars() {
            match charset::code_for(c) {
                Some(code) => {
                    self.write_byte(code);
                    sent += 1;
                }
                None => log::debug!("vfd{}: no code for {:?}", self.port, c),
            }
        }
        sent
    }

    /// Interprets one assembled command byte.
    pub fn submit(&mut self, byte: u8) {
        log::trace!("vfd{}: byte {:02X}", self.port, byte);

        if self.glyph.remaining > 0 {
            self.glyph.remaining -= 1;
            self.glyph.data = (self.glyph.data << 8) | byte as u16;
            if self.glyph.remaining == 0 {
                self.set_data(self.glyph.data, byte);
            }
        } else if byte < 0x80 {
            if charset::is_undefined(byte) {
                log::warn!("vfd{}: undefined character {:02X}", self.port, byte);
            }
            self.set_data(charset::pattern(byte), byte);
        } else {
            self.command(byte);
        }

        self.refresh();
    }

    fn command(&mut self, byte: u8) {
        match byte & 0xF0 {
            0x80 => {
                self.blank(byte & 0x03);
                if byte == 0x84 {
                    log::warn!("vfd{}: duty control is not supported", self.port);
                }
            }
            0x90 => self.cursor.set_pos(byte, &self.window),
            0xA0 => {
                self.cursor.mode = DisplayMode::from_bits(byte);
                log::debug!("vfd{}: mode {:?}", self.port, self.cursor.mode);
            }
            0xB0 => self.clear(byte & 0x03),
            0xC0 => self.flash.set_rate(byte),
            0xD0 => self.flash.set_control(FlashControl::from_bits(byte)),
            0xE0 => self.window.set_start(byte),
            0xF0 => {
                self.window.set_end(byte);
                self.cursor.window_end_moved(&self.window);
            }
            _ => log::warn!("vfd{}: unknown command {:02X}", self.port, byte),
        }
    }

    // Decides between decorating the last cell and stepping the cursor.
    fn set_data(&mut self, segdata: u16, opcode: u8) {
        let last = &mut self.cells[self.cursor.last as usize];

        let (step, change) = match opcode {
            CODE_FLASH => {
                if last.pattern & FLASH_BIT != 0 {
                    (true, false)
                } else {
                    last.attribute = Attribute::Flash;
                    last.pattern |= FLASH_BIT;
                    (false, false)
                }
            }
            CODE_UNDEFINED => (false, false),
            CODE_SEMICOLON | CODE_POINT => {
                if last.pattern & POINT_BIT != 0 {
                    (true, false)
                } else {
                    last.pattern |= POINT_BIT;
                    (false, false)
                }
            }
            CODE_USER_GLYPH => {
                self.glyph.remaining = 2;
                (false, false)
            }
            CODE_DUMMY => (true, false),
            _ => (true, true),
        };

        if step {
            self.cursor.advance(&mut self.cells, &self.window, segdata, change);
        }
    }

    /// `0x8_` blanking. Cell 15 is outside the "all" range, as on the device.
    fn blank(&mut self, code: u8) {
        let (start, end) = (self.window.start as usize, self.window.end as usize);

        match code & 0x03 {
            0 => {
                for cell in &mut self.cells[..15] {
                    cell.attribute = Attribute::Blank;
                }
            }
            1 => {
                if self.window.is_valid() && start <= end {
                    for cell in &mut self.cells[start..end] {
                        cell.attribute = Attribute::Blank;
                    }
                }
            }
            2 => {
                if self.window.is_valid() {
                    for i in self.window.outside_cells() {
                        self.cells[i].attribute = Attribute::Blank;
                    }
                }
            }
            _ => {
                for cell in &mut self.cells[..15] {
                    cell.attribute = Attribute::Normal;
                }
            }
        }
    }

    /// `0xB_` clearing.
    fn clear(&mut self, code: u8) {
        match code & 0x03 {
            0 => {}
            1 => {
                if self.window.is_valid() {
                    let start = self.window.start as usize;
                    let end = (start + self.window.size as usize).min(CELLS);
                    self.cells[start..end].fill(Cell::EMPTY);
                }
            }
            2 => {
                if self.window.is_valid() {
                    for i in self.window.outside_cells() {
                        self.cells[i] = Cell::EMPTY;
                    }
                }
            }
            _ => self.cells.fill(Cell::EMPTY),
        }
    }

    /// Flash timer step followed by a render of all cells.
    pub(crate) fn refresh(&mut self) {
        self.flash.tick(&mut self.cells, &self.window);
        self.render();
    }

    fn render(&mut self) {
        for (out, cell) in self.outputs.iter_mut().zip(self.cells.iter()) {
            *out = match cell.attribute {
                Attribute::Normal => charset::remap(cell.pattern),
                Attribute::Flash | Attribute::Blank => 0,
            };
        }
    }

    /// Pushes the latched outputs to a sink.
    pub fn drive(&self, sink: &mut impl OutputSink) {
        for (i, &pattern) in self.outputs.iter().enumerate() {
            sink.set(i, pattern);
        }
    }

    pub fn outputs(&self) -> &[u16; CELLS] {
        &self.outputs
    }

    pub fn output(&self, index: usize) -> Option<u16> {
        self.outputs.get(index).copied()
    }

    /// Name of the sink an output is wired to, numbered on from the port.
    pub fn output_name(&self, index: usize) -> String {
        format!("vfd{}", ((self.port as usize) << 4) + index)
    }

    pub fn port(&self) -> u8 {
        self.port
    }

    pub fn cells(&self) -> &[Cell; CELLS] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn flash(&self) -> &Flash {
        &self.flash
    }

    pub fn shift_register(&self) -> &ShiftRegister {
        &self.shift
    }

    pub fn glyph_load(&self) -> &GlyphLoad {
        &self.glyph
    }
}
