use crate::domain::event::Event;
use crate::error::{Result, ShopError};
use std::io::BufRead;

/// Reads inbound events from a JSON-lines source.
///
/// Each non-blank line is one serde-tagged [`Event`]. The iterator yields
/// `Result<Event>` so a malformed line surfaces as an error without
/// stopping the stream, mirroring how the dispatcher treats bad input.
pub struct EventReader<R: BufRead> {
    reader: R,
}

impl<R: BufRead> EventReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    pub fn events(self) -> impl Iterator<Item = Result<Event>> {
        self.reader
            .lines()
            .filter(|line| match line {
                Ok(line) => !line.trim().is_empty(),
                Err(_) => true,
            })
            .map(|line| {
                let line = line?;
                serde_json::from_str(&line).map_err(ShopError::from)
            })
    }
}
