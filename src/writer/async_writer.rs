use serde::Serialize;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::error::RowError;
use crate::writer::format::RowFormat;
use crate::writer::session::SessionCore;

/// Writes delimited rows to an asynchronous sink.
///
/// Shares its rendering and field-resolution behavior with
/// [`RowWriter`](crate::writer::RowWriter); only the sink I/O is
/// asynchronous. Rows are rendered in memory and handed to the sink as a
/// single `write_all`, so a failed call never leaves a partial row behind.
///
/// Built through
/// [`RowWriterBuilder::from_async_writer`](crate::writer::RowWriterBuilder::from_async_writer).
pub struct AsyncRowWriter<W: AsyncWrite + Unpin> {
    sink: W,
    core: SessionCore,
}

impl<W: AsyncWrite + Unpin> AsyncRowWriter<W> {
    pub(crate) fn new(sink: W, format: RowFormat) -> Self {
        Self {
            sink,
            core: SessionCore::new(format),
        }
    }

    /// Writes the given names as a header row and establishes them as the
    /// session's fields.
    pub async fn write_header<I, S>(&mut self, names: I) -> Result<(), RowError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let line = self.core.render_header(names);
        self.sink.write_all(line.as_bytes()).await?;
        Ok(())
    }

    /// Derives header names from a representative struct or map and writes
    /// them as a header row.
    pub async fn write_header_from<T: Serialize>(&mut self, sample: &T) -> Result<(), RowError> {
        let line = self.core.render_header_from(sample)?;
        self.sink.write_all(line.as_bytes()).await?;
        Ok(())
    }

    /// Overrides the output fields without writing a row.
    pub fn set_fields<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.core.set_fields(names);
    }

    /// Writes one value as a body row.
    pub async fn write_record<T: Serialize>(&mut self, record: &T) -> Result<(), RowError> {
        let line = self.core.render_record(record)?;
        self.sink.write_all(line.as_bytes()).await?;
        Ok(())
    }

    /// The established field names, if any.
    pub fn fields(&self) -> Option<&[String]> {
        self.core.fields()
    }

    /// Flushes the underlying sink.
    pub async fn flush(&mut self) -> Result<(), RowError> {
        self.sink.flush().await?;
        Ok(())
    }

    /// Flushes and returns the underlying sink.
    pub async fn into_inner(mut self) -> Result<W, RowError> {
        self.sink.flush().await?;
        Ok(self.sink)
    }
}
