use log::debug;
use serde::Serialize;

use crate::error::RowError;
use crate::text::quote::wrap;
use crate::writer::fields::{AccessorCache, FieldSet};
use crate::writer::format::{RowFormat, SpecialMatcher};
use crate::writer::record::{Record, extract};

#[cfg(windows)]
const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
const LINE_ENDING: &str = "\n";

/// Sink-agnostic writer state shared by the synchronous and asynchronous
/// writers: the frozen format, the established field set and the per-type
/// accessor cache. Every operation renders a complete line in memory; the
/// owning writer then issues a single write to its sink.
pub(crate) struct SessionCore {
    format: RowFormat,
    matcher: SpecialMatcher,
    fields: Option<FieldSet>,
    accessors: AccessorCache,
}

impl SessionCore {
    pub(crate) fn new(format: RowFormat) -> Self {
        Self {
            matcher: SpecialMatcher::new(&format),
            format,
            fields: None,
            accessors: AccessorCache::default(),
        }
    }

    pub(crate) fn fields(&self) -> Option<&[String]> {
        self.fields.as_ref().map(FieldSet::names)
    }

    /// Overrides the established fields without writing a row. The accessor
    /// cache is invalidated so no cached permutation outlives the old order.
    pub(crate) fn set_fields<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let fields = FieldSet::new(names);
        debug!("fields set explicitly: {:?}", fields.names());
        self.accessors.clear();
        self.fields = Some(fields);
    }

    /// Establishes the fields from explicit names and renders the header
    /// line.
    pub(crate) fn render_header<I, S>(&mut self, names: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let fields = FieldSet::new(names);
        debug!("fields established from header: {:?}", fields.names());
        let line = self.render_line(fields.names().iter().map(|name| Some(name.as_str())));
        self.accessors.clear();
        self.fields = Some(fields);
        line
    }

    /// Derives header names from a representative value, then behaves like
    /// [`SessionCore::render_header`].
    pub(crate) fn render_header_from<T: Serialize>(
        &mut self,
        sample: &T,
    ) -> Result<String, RowError> {
        let record = extract(sample)?.ok_or_else(|| absent("sample"))?;
        let Some(names) = record.field_names() else {
            return Err(RowError::TypeMismatch(
                "cannot derive a header from a sequence".to_string(),
            ));
        };
        let owned: Vec<String> = names.iter().map(|name| name.to_string()).collect();
        Ok(self.render_header(owned))
    }

    /// Renders one body row. The first struct or mapping row establishes
    /// the fields if none are set yet; sequence rows bypass field
    /// resolution entirely and are written positionally.
    pub(crate) fn render_record<T: Serialize>(&mut self, value: &T) -> Result<String, RowError> {
        let record = extract(value)?.ok_or_else(|| absent("record"))?;
        match record {
            Record::Sequence(values) => Ok(self.render_line(values.iter().map(Option::as_deref))),
            Record::Mapping(entries) => {
                let fields = self.fields.get_or_insert_with(|| {
                    let fields = FieldSet::new(entries.iter().map(|(key, _)| key.as_str()));
                    debug!("fields established from first record: {:?}", fields.names());
                    fields
                });
                // lookup by key; missing keys become empty fields, extra
                // keys are ignored
                let row: Vec<Option<String>> = fields
                    .names()
                    .iter()
                    .map(|name| {
                        entries
                            .iter()
                            .find(|(key, _)| key == name)
                            .and_then(|(_, value)| value.clone())
                    })
                    .collect();
                Ok(self.render_line(row.iter().map(Option::as_deref)))
            }
            Record::Structured {
                name,
                fields: declared,
                mut values,
            } => {
                let fields = self.fields.get_or_insert_with(|| {
                    let fields = FieldSet::new(declared.iter().copied());
                    debug!("fields established from first record: {:?}", fields.names());
                    fields
                });
                let indices = self.accessors.resolve(
                    std::any::type_name::<T>(),
                    name,
                    &declared,
                    fields,
                )?;
                let row: Vec<Option<String>> =
                    indices.iter().map(|&index| values[index].take()).collect();
                Ok(self.render_line(row.iter().map(Option::as_deref)))
            }
        }
    }

    fn render_line<'a, I>(&self, values: I) -> String
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let mut line = String::new();
        let mut first = true;
        for value in values {
            if !first {
                line.push(self.format.separator);
            }
            first = false;
            let text = value.unwrap_or("");
            if self.format.quote_all || self.matcher.is_match(text) {
                line.push_str(&self.quote_field(text));
            } else {
                line.push_str(text);
            }
        }
        line.push_str(LINE_ENDING);
        line
    }

    fn quote_field(&self, text: &str) -> String {
        if self.format.allow_quoted_newline {
            wrap(text, self.format.quote, self.format.escape, &[], &[])
        } else {
            wrap(
                text,
                self.format.quote,
                self.format.escape,
                &['\n', '\r'],
                &["n", "r"],
            )
        }
    }
}

fn absent(name: &'static str) -> RowError {
    RowError::InvalidArgument {
        name,
        reason: "value serialized to nothing (a bare `None` or unit)".to_string(),
    }
}
