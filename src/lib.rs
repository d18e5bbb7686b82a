//! Emulation of the BD1, a serially driven 16 character, 14 segment VFD
//! controller found on fruit machine hardware.
//!
//! Command bytes arrive over a clock and data line pair. Each byte is either
//! a character for the display buffer or a control command (cursor, window,
//! scroll mode, blanking, flashing). The host drives the lines, calls
//! [`vfd::Vfd::tick`] at its refresh rate, and reads 16 physical segment
//! patterns back.

pub mod charset;
pub mod cursor;
pub mod error;
pub mod flash;
pub mod script;
pub mod shift;
pub mod snapshot;
pub mod vfd;
pub mod window;

pub use error::Error;
pub use snapshot::Snapshot;
pub use vfd::{OutputSink, Vfd};
