//! Reading address entries from JSON lines (`{"name": .., "lat": .., "lon": ..}` per line).

use std::io::BufRead;

use osmtext_common::{Result, error::Error, try_or_ret_some_err};

use crate::entry::AddressEntry;

/// Iterator over the address entries of a JSON lines input.
///
/// Blank lines are skipped. A malformed line yields an error naming its
/// (1-based) line number.
pub struct JsonLines<R> {
    reader: R,
    line: String,
    line_number: usize,
}

impl<R: BufRead> JsonLines<R> {
    pub fn new(reader: R) -> JsonLines<R> {
        JsonLines {
            reader,
            line: String::new(),
            line_number: 0,
        }
    }
}

impl<R: BufRead> Iterator for JsonLines<R> {
    type Item = Result<AddressEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.line.clear();
            let read = try_or_ret_some_err!(
                self.reader
                    .read_line(&mut self.line)
                    .map_err(|e| Error::io("json lines input", e))
            );
            if read == 0 {
                return None;
            }
            self.line_number += 1;

            let line = self.line.trim();
            if line.is_empty() {
                continue;
            }
            let entry = try_or_ret_some_err!(
                serde_json::from_str::<AddressEntry>(line)
                    .map_err(|e| Error::json(format!("line {}", self.line_number), e))
            );
            return Some(Ok(entry));
        }
    }
}
