//! JSON output formatter

use super::{OutputFormatter, TokenizedLine};
use anyhow::Result;
use serde_json::Value;
use std::io::Write;

/// JSON formatter - outputs tokenized lines as a JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    lines: Vec<Value>,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            lines: Vec::new(),
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn format_line(&mut self, line: &TokenizedLine) -> Result<()> {
        self.lines.push(serde_json::to_value(line)?);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, &self.lines)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
