/// Serial input stage: collects data bits on rising clock edges into bytes.
///
/// The data line is inverted, a low level shifts in a 1.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ShiftRegister {
    pub(crate) count: u8,
    pub(crate) data: u8,
    pub(crate) clock_level: bool,
    pub(crate) data_level: bool,
}

/// What a clock line change did to the register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Level unchanged or falling, nothing sampled
    Idle,
    /// One bit shifted in
    Sampled,
    /// Eighth bit shifted in, the byte is complete
    Byte(u8),
}

impl ShiftRegister {
    pub fn data(&mut self, level: bool) {
        self.data_level = level;
    }

    pub fn clock(&mut self, level: bool) -> Edge {
        let rising = level != self.clock_level && !self.clock_level;
        self.clock_level = level;

        if !rising {
            return Edge::Idle;
        }

        self.data <<= 1;
        if !self.data_level {
            self.data |= 1;
        }

        self.count += 1;
        if self.count >= 8 {
            let byte = self.data;
            self.count = 0;
            self.data = 0;
            Edge::Byte(byte)
        } else {
            Edge::Sampled
        }
    }

    /// Bits collected towards the next byte (0-7).
    pub fn bit_count(&self) -> u8 {
        self.count
    }

    pub fn accumulator(&self) -> u8 {
        self.data
    }

    pub fn clock_level(&self) -> bool {
        self.clock_level
    }

    pub fn data_level(&self) -> bool {
        self.data_level
    }
}
