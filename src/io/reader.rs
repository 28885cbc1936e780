use crate::errors::ParseError;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, prelude::*};

/// Reads the header of a density file line by line, then hands over the
/// remainder in one piece.
pub struct HeaderReader {
    reader: io::BufReader<File>,
    buffer: String,
    format: &'static str,
    line: usize,
}

impl HeaderReader {
    /// Opens the file from the path into a reader for the named format.
    pub fn open(path: &str, format: &'static str) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("Unable to open {}", path))?;
        Ok(Self { reader: io::BufReader::new(file),
                  buffer: String::new(),
                  format,
                  line: 0 })
    }

    /// The next header line, `what` names the expected content for the error
    /// raised if the file ends early.
    pub fn next_line(&mut self, what: &str) -> Result<&str> {
        self.buffer.clear();
        let read = self.reader.read_line(&mut self.buffer)?;
        if read == 0 {
            return Err(ParseError::new(self.format,
                                       format!("file ended before the {} (line {}).",
                                               what,
                                               self.line + 1)).into());
        }
        self.line += 1;
        Ok(self.buffer.trim_end())
    }

    /// Everything left in the file.
    pub fn read_rest(mut self) -> io::Result<String> {
        let mut rest = String::new();
        self.reader.read_to_string(&mut rest)?;
        Ok(rest)
    }
}
