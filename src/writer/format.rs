/// Formatting options for a row writer.
///
/// A writer copies the options it is built with, so changing a caller-held
/// value after construction never affects rows already being written.
///
/// # Examples
///
/// ```
/// use rowfmt::writer::RowFormat;
///
/// let format = RowFormat::new()
///     .with_separator('\t')
///     .with_quote_all(true);
/// assert_eq!(format.separator, '\t');
/// assert!(format.quote_all);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowFormat {
    /// Character placed between fields (default `,`).
    pub separator: char,
    /// Character wrapped around fields that need quoting (default `"`).
    pub quote: char,
    /// Character that introduces escape sequences inside quoted fields
    /// (default `\`). When equal to `quote`, embedded quotes are doubled
    /// instead.
    pub escape: char,
    /// When `true`, carriage returns and line feeds inside a field no longer
    /// force quoting and pass through verbatim (default `false`).
    pub allow_quoted_newline: bool,
    /// When `true`, every field is quoted regardless of content
    /// (default `false`).
    pub quote_all: bool,
}

impl Default for RowFormat {
    fn default() -> Self {
        Self {
            separator: ',',
            quote: '"',
            escape: '\\',
            allow_quoted_newline: false,
            quote_all: false,
        }
    }
}

impl RowFormat {
    /// Creates the default format: comma-separated, double-quoted,
    /// backslash-escaped.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the field separator.
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Sets the quote character.
    pub fn with_quote(mut self, quote: char) -> Self {
        self.quote = quote;
        self
    }

    /// Sets the escape character.
    pub fn with_escape(mut self, escape: char) -> Self {
        self.escape = escape;
        self
    }

    /// Allows raw newlines inside quoted fields.
    pub fn with_allow_quoted_newline(mut self, yes: bool) -> Self {
        self.allow_quoted_newline = yes;
        self
    }

    /// Quotes every field regardless of content.
    pub fn with_quote_all(mut self, yes: bool) -> Self {
        self.quote_all = yes;
        self
    }
}

/// The characters that force a field to be quoted under a given format,
/// fixed once when a writer binds its options. Rendering then decides
/// quote-or-bare with a single scan per field.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SpecialMatcher {
    chars: [char; 4],
    len: usize,
}

impl SpecialMatcher {
    pub(crate) fn new(format: &RowFormat) -> Self {
        Self {
            chars: [format.separator, format.quote, '\r', '\n'],
            // CR/LF only force quoting when they may not appear raw
            len: if format.allow_quoted_newline { 2 } else { 4 },
        }
    }

    pub(crate) fn is_match(&self, text: &str) -> bool {
        text.contains(&self.chars[..self.len])
    }
}
