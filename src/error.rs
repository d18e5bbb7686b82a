use std::error::Error as StdError;
use std::fmt;
use std::io;

use minifb::Error as MinifbError;

/// Errors raised at the edges of the emulator. The VFD core itself never
/// fails, it logs and carries on.
#[derive(Debug)]
pub enum Error {
    /// I/O errors (e.g. reading a command script)
    Io(io::Error),
    /// Malformed command script, such as a bad hex token
    Script(String),
    /// Restored state with fields outside their hardware ranges
    Snapshot(String),
    /// Errors from the minifb graphics library
    Minifb(MinifbError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "IO Error: {}", e),
            Error::Script(msg) => write!(f, "Script Error: {}", msg),
            Error::Snapshot(msg) => write!(f, "Snapshot Error: {}", msg),
            Error::Minifb(e) => write!(f, "Minifb Error: {}", e),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<MinifbError> for Error {
    fn from(err: MinifbError) -> Self {
        Error::Minifb(err)
    }
}
