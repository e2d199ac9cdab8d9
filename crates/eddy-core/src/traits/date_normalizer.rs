//! DateNormalizer: raw timestamp text to epoch milliseconds.

use crate::errors::TimestampParseError;

pub trait DateNormalizer {
    /// Parse `text` into milliseconds since the Unix epoch. Fails loudly on
    /// anything unrecognized rather than guessing.
    fn parse_millis(&self, text: &str) -> Result<i64, TimestampParseError>;
}
