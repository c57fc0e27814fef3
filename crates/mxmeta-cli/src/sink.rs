//! JSON output sink.

use std::io::Write;

use anyhow::Context;
use mxmeta_core::{MetadataSink, MetadataTree};

/// Writes each published tree as one JSON document.
pub struct JsonSink<W: Write> {
    writer: W,
    pretty: bool,
}

impl<W: Write> JsonSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pretty: true,
        }
    }

    /// One line per tree instead of indented output.
    #[must_use]
    pub fn compact(mut self) -> Self {
        self.pretty = false;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> MetadataSink for JsonSink<W> {
    fn publish(&mut self, tree: &MetadataTree) -> anyhow::Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, tree)
        } else {
            serde_json::to_writer(&mut self.writer, tree)
        }
        .context("serialize metadata tree")?;
        writeln!(self.writer).context("write metadata tree")?;
        self.writer.flush().context("flush metadata output")?;
        Ok(())
    }
}
