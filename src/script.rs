use crate::charset;
use crate::error::Error;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// A stream of command bytes to feed the controller.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Script {
    pub bytes: Vec<u8>,
}

impl Script {
    /// Loads a script file. Files that read as whitespace separated hex
    /// (`A2 E0 F7`, `#` starts a comment) are parsed, anything else is taken
    /// as raw bytes.
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let mut raw = Vec::new();
        BufReader::new(File::open(path)?).read_to_end(&mut raw)?;

        match std::str::from_utf8(&raw) {
            Ok(text) if looks_like_hex(text) => Self::from_hex(text),
            _ => Ok(Self { bytes: raw }),
        }
    }

    pub fn from_hex(text: &str) -> Result<Self, Error> {
        let mut bytes = Vec::new();
        for line in text.lines() {
            let line = line.split('#').next().unwrap_or_default();
            for token in line.split_whitespace() {
                let digits = token.trim_start_matches("0x").trim_start_matches("0X");
                let byte = u8::from_str_radix(digits, 16)
                    .map_err(|_| Error::Script(format!("bad hex byte {:?}", token)))?;
                bytes.push(byte);
            }
        }
        Ok(Self { bytes })
    }

    /// Character codes for display text. Characters without a code are
    /// dropped.
    pub fn from_text(text: &str) -> Self {
        Self {
            bytes: text.chars().filter_map(charset::code_for).collect(),
        }
    }

    pub fn extend(&mut self, other: Script) {
        self.bytes.extend(other.bytes);
    }
}

fn looks_like_hex(text: &str) -> bool {
    text.lines()
        .map(|line| line.split('#').next().unwrap_or_default())
        .flat_map(str::split_whitespace)
        .all(|token| {
            let digits = token.trim_start_matches("0x").trim_start_matches("0X");
            !digits.is_empty()
                && digits.len() <= 2
                && digits.chars().all(|c| c.is_ascii_hexdigit())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_hex_with_comments() -> Result<(), Error> {
        let script = Script::from_hex("A2 e0 0xF7 # scroll left, window 0-7\n01 02\n")?;
        assert_eq!(script.bytes, vec![0xA2, 0xE0, 0xF7, 0x01, 0x02]);
        Ok(())
    }

    #[test]
    fn rejects_bad_token() {
        let result = Script::from_hex("A2 ZZ");
        assert!(matches!(result, Err(Error::Script(_))));
    }

    #[test]
    fn text_to_codes() {
        let script = Script::from_text("Hi 5!");
        assert_eq!(script.bytes, vec![0x08, 0x09, 0x20, 0x35, 0x21]);
    }

    #[test]
    fn loads_hex_and_raw_files() -> Result<(), Error> {
        let dir = std::env::temp_dir();

        let hex_path = dir.join(format!("bd1-vfd-hex-{}.txt", std::process::id()));
        File::create(&hex_path)?.write_all(b"93 01\n")?;
        let hex = Script::from_path(&hex_path)?;
        std::fs::remove_file(&hex_path)?;
        assert_eq!(hex.bytes, vec![0x93, 0x01]);

        let raw_path = dir.join(format!("bd1-vfd-raw-{}.bin", std::process::id()));
        File::create(&raw_path)?.write_all(&[0x93, 0xFF, 0x00])?;
        let raw = Script::from_path(&raw_path)?;
        std::fs::remove_file(&raw_path)?;
        assert_eq!(raw.bytes, vec![0x93, 0xFF, 0x00]);
        Ok(())
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = Script::from_path(Path::new("./does/not/exist.vfd"));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
