//! Serial console command reader.
//!
//! The ESP-IDF console is non-blocking: a read with no pending input fails
//! with `WouldBlock`, possibly halfway through a line.  [`ConsoleReader`]
//! keeps the partial line across those reads and only hands out complete,
//! newline-terminated commands.

use std::io::{BufRead, ErrorKind};

use log::warn;

/// Result of one [`ConsoleReader::poll`].
#[derive(Debug, PartialEq, Eq)]
pub enum ConsolePoll {
    /// A complete command line, trimmed. Never empty.
    Command(String),
    /// No complete line yet; poll again later.
    Pending,
    /// End of input.
    Closed,
}

pub struct ConsoleReader<R> {
    reader: R,
    line: String,
}

impl<R: BufRead> ConsoleReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
        }
    }

    /// Read whatever input is available and return the next complete command.
    pub fn poll(&mut self) -> ConsolePoll {
        loop {
            match self.reader.read_line(&mut self.line) {
                Ok(0) if self.line.is_empty() => return ConsolePoll::Closed,
                Ok(0) => return ConsolePoll::Pending,
                Ok(_) if self.line.ends_with('\n') => {
                    let command = self.line.trim().to_owned();
                    self.line.clear();
                    if !command.is_empty() {
                        return ConsolePoll::Command(command);
                    }
                }
                Ok(_) => return ConsolePoll::Pending,
                Err(e) if e.kind() == ErrorKind::WouldBlock => return ConsolePoll::Pending,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => {
                    warn!("console: read failed: {}", e);
                    return ConsolePoll::Pending;
                }
            }
        }
    }
}
