//! Plain text output formatter

use super::{OutputFormatter, TokenizedLine};
use anyhow::Result;
use std::io::Write;

/// Plain text formatter - outputs one tokenized line per input line
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_line(&mut self, line: &TokenizedLine) -> Result<()> {
        writeln!(self.writer, "{}", line.output)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
