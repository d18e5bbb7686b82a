use crate::cursor::CELLS;

/// Display window used to scope scrolling, blanking and flashing.
///
/// `size` is kept signed: an end before the start gives a size of zero or
/// less, which marks the window invalid.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub(crate) start: u8,
    pub(crate) end: u8,
    pub(crate) size: i8,
}

impl Window {
    pub fn start(&self) -> u8 {
        self.start
    }

    pub fn end(&self) -> u8 {
        self.end
    }

    pub fn size(&self) -> i8 {
        self.size
    }

    pub fn set_start(&mut self, start: u8) {
        self.start = start & 0x0F;
        self.resize();
    }

    pub fn set_end(&mut self, end: u8) {
        self.end = end & 0x0F;
        self.resize();
    }

    fn resize(&mut self) {
        self.size = self.end as i8 - self.start as i8 + 1;
    }

    pub fn is_valid(&self) -> bool {
        self.size > 0 && self.size as usize <= CELLS
    }

    /// True for cells between start and end, both inclusive.
    pub fn contains(&self, index: usize) -> bool {
        index >= self.start as usize && index <= self.end as usize
    }

    /// Cells the "outside window" blank and clear commands touch.
    ///
    /// The tail range is `end..15 - end` as the controller firmware computes
    /// it, which only matches the real outside cells for some windows.
    pub fn outside_cells(&self) -> impl Iterator<Item = usize> {
        let (start, end) = (self.start as usize, self.end as usize);
        let tail = if end < 15 { end..15 - end } else { 0..0 };
        (0..start).chain(tail)
    }
}
