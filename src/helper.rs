use bd1_vfd::charset;
use bd1_vfd::cursor::CELLS;
use minifb::Key;

// Glyph box in segment units, including the gap to the next cell
pub const CELL_UNITS_W: usize = 10;
pub const CELL_UNITS_H: usize = 17;

const LIT: u32 = 0xFF40FFC0;
const GHOST: u32 = 0xFF0C2018;
const BACKGROUND: u32 = 0xFF000000;
const STROKE: f32 = 0.6;

// (x0, y0, x1, y1) per logical bit, see the layout in charset.rs.
// Bit 8 is the flash mark and has no stroke of its own.
const SEGMENTS: [Option<(f32, f32, f32, f32)>; 16] = [
    Some((1.0, 1.0, 1.0, 8.0)),   // 0
    Some((7.0, 1.0, 7.0, 8.0)),   // 1
    Some((1.0, 1.0, 7.0, 1.0)),   // 2
    Some((4.0, 1.0, 4.0, 8.0)),   // 3
    Some((4.0, 8.0, 1.0, 15.0)),  // 4
    Some((7.0, 8.0, 7.0, 15.0)),  // 5
    Some((1.0, 1.0, 4.0, 8.0)),   // 6
    Some((7.0, 1.0, 4.0, 8.0)),   // 7
    None,                         // 8
    Some((1.0, 15.0, 7.0, 15.0)), // 9
    Some((4.0, 8.0, 4.0, 15.0)),  // A
    Some((4.0, 8.0, 7.0, 15.0)),  // B
    Some((8.5, 15.0, 8.5, 15.0)), // C
    Some((1.0, 8.0, 1.0, 15.0)),  // D
    Some((4.0, 8.0, 7.0, 8.0)),   // E
    Some((1.0, 8.0, 4.0, 8.0)),   // F
];

pub fn frame_size(scale: usize) -> (usize, usize) {
    (CELLS * CELL_UNITS_W * scale, CELL_UNITS_H * scale)
}

fn distance_to_segment(px: f32, py: f32, (x0, y0, x1, y1): (f32, f32, f32, f32)) -> f32 {
    let (dx, dy) = (x1 - x0, y1 - y0);
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq == 0.0 {
        0.0
    } else {
        (((px - x0) * dx + (py - y0) * dy) / len_sq).clamp(0.0, 1.0)
    };
    let (cx, cy) = (x0 + t * dx, y0 + t * dy);
    ((px - cx).powi(2) + (py - cy).powi(2)).sqrt()
}

/// Draws the 16 physical output patterns as 14 segment glyphs.
pub fn outputs_to_rgb(outputs: &[u16; CELLS], scale: usize) -> Vec<u32> {
    let (width, height) = frame_size(scale);
    let cell_width = CELL_UNITS_W * scale;
    let mut pixels = Vec::with_capacity(width * height);

    for y in 0..height {
        for x in 0..width {
            let logical = charset::unmap(outputs[x / cell_width]);
            // Sample at the pixel centre, in segment units
            let ux = ((x % cell_width) as f32 + 0.5) / scale as f32;
            let uy = (y as f32 + 0.5) / scale as f32;

            let mut color = BACKGROUND;
            for (bit, segment) in SEGMENTS.iter().enumerate() {
                let Some(segment) = *segment else { continue };
                if distance_to_segment(ux, uy, segment) > STROKE {
                    continue;
                }
                if logical & (1 << bit) != 0 {
                    color = LIT;
                    break;
                }
                color = GHOST;
            }
            pixels.push(color);
        }
    }
    pixels
}

/// Characters typed on the host keyboard.
pub fn key_to_char(key: Key) -> Option<char> {
    let c = match key {
        Key::A => 'A',
        Key::B => 'B',
        Key::C => 'C',
        Key::D => 'D',
        Key::E => 'E',
        Key::F => 'F',
        Key::G => 'G',
        Key::H => 'H',
        Key::I => 'I',
        Key::J => 'J',
        Key::K => 'K',
        Key::L => 'L',
        Key::M => 'M',
        Key::N => 'N',
        Key::O => 'O',
        Key::P => 'P',
        Key::Q => 'Q',
        Key::R => 'R',
        Key::S => 'S',
        Key::T => 'T',
        Key::U => 'U',
        Key::V => 'V',
        Key::W => 'W',
        Key::X => 'X',
        Key::Y => 'Y',
        Key::Z => 'Z',
        Key::Key0 => '0',
        Key::Key1 => '1',
        Key::Key2 => '2',
        Key::Key3 => '3',
        Key::Key4 => '4',
        Key::Key5 => '5',
        Key::Key6 => '6',
        Key::Key7 => '7',
        Key::Key8 => '8',
        Key::Key9 => '9',
        Key::Space => ' ',
        Key::Period => '.',
        Key::Minus => '-',
        Key::Equal => '=',
        Key::Slash => '/',
        _ => return None,
    };
    Some(c)
}
