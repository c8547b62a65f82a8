use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::debug;
use serde::Serialize;
use tokio::io::AsyncWrite;

use crate::error::RowError;
use crate::writer::async_writer::AsyncRowWriter;
use crate::writer::format::RowFormat;
use crate::writer::session::SessionCore;

/// Writes heterogeneous values as delimited rows to a sink.
///
/// Struct rows, string-keyed map rows and flat sequences can be mixed
/// freely. The first header or body row establishes the output fields;
/// struct and map rows are then resolved against those fields on every
/// write, while sequence rows are written positionally. Each operation
/// appends exactly one line: the row is rendered in memory and handed to
/// the sink as a single write, so a failed call never leaves a partial row
/// behind.
///
/// The writer owns its sink. Pass `&mut sink` to keep ownership with the
/// caller, or recover an owned sink with [`RowWriter::into_inner`].
///
/// # Examples
///
/// ```
/// use rowfmt::writer::RowWriterBuilder;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Reading<'a> {
///     sensor: &'a str,
///     value: f64,
/// }
///
/// # fn main() -> Result<(), rowfmt::RowError> {
/// let mut writer = RowWriterBuilder::new().from_writer(Vec::new());
/// writer.write_header_from(&Reading { sensor: "", value: 0.0 })?;
/// writer.write_record(&Reading { sensor: "s-1", value: 10.5 })?;
/// writer.write_record(&Reading { sensor: "s-2", value: 20.75 })?;
///
/// let data = String::from_utf8(writer.into_inner()?).unwrap();
/// # #[cfg(not(windows))]
/// assert_eq!(data, "sensor,value\ns-1,10.5\ns-2,20.75\n");
/// # Ok(())
/// # }
/// ```
pub struct RowWriter<W: Write> {
    sink: W,
    core: SessionCore,
}

impl<W: Write> RowWriter<W> {
    /// Writes the given names as a header row and establishes them as the
    /// session's fields.
    pub fn write_header<I, S>(&mut self, names: I) -> Result<(), RowError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let line = self.core.render_header(names);
        self.sink.write_all(line.as_bytes())?;
        Ok(())
    }

    /// Derives header names from a representative struct or map and writes
    /// them as a header row.
    ///
    /// Fails with [`RowError::InvalidArgument`] if the sample serializes to
    /// nothing, and with [`RowError::TypeMismatch`] if it is a sequence,
    /// which carries no field names.
    pub fn write_header_from<T: Serialize>(&mut self, sample: &T) -> Result<(), RowError> {
        let line = self.core.render_header_from(sample)?;
        self.sink.write_all(line.as_bytes())?;
        Ok(())
    }

    /// Overrides the output fields without writing a row.
    ///
    /// Subsequent struct and map rows are resolved against the new names,
    /// which do not have to match any previously written header.
    pub fn set_fields<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.core.set_fields(names);
    }

    /// Writes one value as a body row.
    ///
    /// If no fields are established yet, a struct or map value establishes
    /// them first. Fails with [`RowError::InvalidArgument`] if the value
    /// serializes to nothing (for example `&None`), in which case the sink
    /// receives no bytes, and with [`RowError::FieldNotFound`] if the
    /// established fields name one the value's type does not declare.
    pub fn write_record<T: Serialize>(&mut self, record: &T) -> Result<(), RowError> {
        let line = self.core.render_record(record)?;
        self.sink.write_all(line.as_bytes())?;
        Ok(())
    }

    /// The established field names, if any.
    pub fn fields(&self) -> Option<&[String]> {
        self.core.fields()
    }

    /// Flushes the underlying sink.
    pub fn flush(&mut self) -> Result<(), RowError> {
        self.sink.flush()?;
        Ok(())
    }

    /// Flushes and returns the underlying sink.
    pub fn into_inner(mut self) -> Result<W, RowError> {
        self.sink.flush()?;
        Ok(self.sink)
    }
}

/// A builder for configuring delimited-row writers.
///
/// # Examples
///
/// ```
/// use rowfmt::writer::RowWriterBuilder;
///
/// let mut writer = RowWriterBuilder::new()
///     .separator('\t')
///     .quote('\'')
///     .quote_all(true)
///     .from_writer(Vec::new());
/// ```
#[derive(Default)]
pub struct RowWriterBuilder {
    format: RowFormat,
}

impl RowWriterBuilder {
    /// Creates a builder with the default format: comma-separated,
    /// double-quoted, backslash-escaped, quoting only when needed.
    pub fn new() -> Self {
        Self {
            format: RowFormat::default(),
        }
    }

    /// Sets the field separator.
    pub fn separator(mut self, separator: char) -> Self {
        self.format.separator = separator;
        self
    }

    /// Sets the quote character.
    pub fn quote(mut self, quote: char) -> Self {
        self.format.quote = quote;
        self
    }

    /// Sets the escape character. When equal to the quote character,
    /// embedded quotes are doubled instead of escaped.
    pub fn escape(mut self, escape: char) -> Self {
        self.format.escape = escape;
        self
    }

    /// Allows raw newlines inside quoted fields instead of escaping them.
    pub fn allow_quoted_newline(mut self, yes: bool) -> Self {
        self.format.allow_quoted_newline = yes;
        self
    }

    /// Quotes every field regardless of content.
    pub fn quote_all(mut self, yes: bool) -> Self {
        self.format.quote_all = yes;
        self
    }

    /// Replaces the whole format at once.
    pub fn format(mut self, format: RowFormat) -> Self {
        self.format = format;
        self
    }

    /// Creates a `RowWriter` that writes to the given sink.
    pub fn from_writer<W: Write>(self, wtr: W) -> RowWriter<W> {
        RowWriter {
            sink: wtr,
            core: SessionCore::new(self.format),
        }
    }

    /// Creates a `RowWriter` that writes to a new file at the given path.
    ///
    /// The file is owned by the writer; dropping the writer closes it.
    pub fn from_path<P: AsRef<Path>>(self, path: P) -> Result<RowWriter<BufWriter<File>>, RowError> {
        let file = File::create(path.as_ref())?;
        debug!("row writer created for {:?}", path.as_ref());
        Ok(RowWriter {
            sink: BufWriter::new(file),
            core: SessionCore::new(self.format),
        })
    }

    /// Creates an [`AsyncRowWriter`] that writes to the given asynchronous
    /// sink.
    pub fn from_async_writer<W: AsyncWrite + Unpin>(self, wtr: W) -> AsyncRowWriter<W> {
        AsyncRowWriter::new(wtr, self.format)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[cfg(windows)]
    const EOL: &str = "\r\n";
    #[cfg(not(windows))]
    const EOL: &str = "\n";

    #[derive(serde::Serialize)]
    struct Row<'a> {
        city: &'a str,
        country: &'a str,
        #[serde(rename = "popcount")]
        population: u64,
    }

    #[test]
    fn rows_serialize_with_a_derived_header() -> Result<(), Box<dyn Error>> {
        let mut wtr = RowWriterBuilder::new().from_writer(vec![]);

        wtr.write_header_from(&Row {
            city: "",
            country: "",
            population: 0,
        })?;
        wtr.write_record(&Row {
            city: "Boston",
            country: "United States",
            population: 4628910,
        })?;
        wtr.write_record(&Row {
            city: "Concord",
            country: "United States",
            population: 42695,
        })?;

        let data = String::from_utf8(wtr.into_inner()?)?;
        assert_eq!(
            data,
            format!(
                "city,country,popcount{EOL}Boston,United States,4628910{EOL}Concord,United States,42695{EOL}"
            )
        );

        Ok(())
    }

    #[test]
    fn builder_knobs_reach_the_output() -> Result<(), Box<dyn Error>> {
        let mut wtr = RowWriterBuilder::new()
            .separator(';')
            .quote('\'')
            .escape('\'')
            .from_writer(vec![]);

        wtr.write_record(&("it's", "fine"))?;

        let data = String::from_utf8(wtr.into_inner()?)?;
        assert_eq!(data, format!("'it''s';fine{EOL}"));

        Ok(())
    }

    #[test]
    fn format_replaces_all_knobs_at_once() -> Result<(), Box<dyn Error>> {
        let format = RowFormat::new().with_separator('\t').with_quote_all(true);
        let mut wtr = RowWriterBuilder::new().format(format).from_writer(vec![]);

        wtr.write_header(["a", "b"])?;

        let data = String::from_utf8(wtr.into_inner()?)?;
        assert_eq!(data, format!("\"a\"\t\"b\"{EOL}"));

        Ok(())
    }

    #[test]
    fn fields_reflect_the_established_names() -> Result<(), Box<dyn Error>> {
        let mut wtr = RowWriterBuilder::new().from_writer(vec![]);
        assert!(wtr.fields().is_none());

        wtr.write_header(["a", "b"])?;
        assert_eq!(wtr.fields(), Some(&["a".to_string(), "b".to_string()][..]));

        wtr.set_fields(["b"]);
        assert_eq!(wtr.fields(), Some(&["b".to_string()][..]));

        Ok(())
    }

    #[test]
    fn writer_can_borrow_its_sink() -> Result<(), Box<dyn Error>> {
        let mut buffer: Vec<u8> = Vec::new();
        {
            let mut wtr = RowWriterBuilder::new().from_writer(&mut buffer);
            wtr.write_record(&(1, 2))?;
            wtr.flush()?;
        }
        assert_eq!(String::from_utf8(buffer)?, format!("1,2{EOL}"));

        Ok(())
    }

    #[test]
    fn from_path_fails_on_an_unwritable_location() {
        let result = RowWriterBuilder::new().from_path("/nonexistent/directory/rows.csv");
        assert!(matches!(result, Err(RowError::Io(_))));
    }
}
