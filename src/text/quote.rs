use crate::error::RowError;
use crate::text::escape::escape_validated;

/// Quote character used by [`quote`] and [`unquote`].
pub const DEFAULT_QUOTE: char = '"';

/// Escape character used by [`quote`] and [`unquote`].
pub const DEFAULT_ESCAPE: char = '\\';

/// Wraps the input in double quotes, backslash-escaping embedded quotes.
///
/// Equivalent to [`quote_with`] with the default `"`/`\` pair and no extra
/// special characters.
///
/// # Examples
///
/// ```
/// use rowfmt::text::quote;
///
/// assert_eq!(quote("plain"), "\"plain\"");
/// assert_eq!(quote("say \"hi\""), "\"say \\\"hi\\\"\"");
/// ```
pub fn quote(input: &str) -> String {
    wrap(input, DEFAULT_QUOTE, DEFAULT_ESCAPE, &[], &[])
}

/// Wraps the input in `quote_char`, escaping embedded special characters.
///
/// When `quote_char` and `escape_char` are the same character, embedded
/// quote characters are doubled and no other escaping occurs — the
/// conventional doubled-quote style. Otherwise the body is escaped with
/// `escape_char`: the quote character always escapes to itself prefixed by
/// `escape_char`, and the caller's `specials`/`sequences` pairs are applied
/// ahead of that implicit pair, so a caller-supplied mapping for the quote
/// character wins.
///
/// # Errors
/// Returns [`RowError::InvalidArgument`] if `specials` and `sequences`
/// differ in length.
///
/// # Examples
///
/// ```
/// use rowfmt::text::quote_with;
///
/// // doubled-quote style
/// let quoted = quote_with("say \"hi\"", '"', '"', &[], &[]).unwrap();
/// assert_eq!(quoted, "\"say \"\"hi\"\"\"");
///
/// // escape style with a newline pair
/// let quoted = quote_with("a\nb", '"', '\\', &['\n'], &["n"]).unwrap();
/// assert_eq!(quoted, "\"a\\nb\"");
/// ```
pub fn quote_with(
    input: &str,
    quote_char: char,
    escape_char: char,
    specials: &[char],
    sequences: &[&str],
) -> Result<String, RowError> {
    if specials.len() != sequences.len() {
        return Err(RowError::InvalidArgument {
            name: "sequences",
            reason: format!(
                "expected one sequence per special character, got {} specials and {} sequences",
                specials.len(),
                sequences.len()
            ),
        });
    }
    Ok(wrap(input, quote_char, escape_char, specials, sequences))
}

/// Quote with tables already known to be the same length.
pub(crate) fn wrap(
    input: &str,
    quote_char: char,
    escape_char: char,
    specials: &[char],
    sequences: &[&str],
) -> String {
    let mut quote_buf = [0u8; 4];
    let quote_str: &str = quote_char.encode_utf8(&mut quote_buf);

    let body = if quote_char == escape_char {
        let mut doubled = String::with_capacity(quote_str.len() * 2);
        doubled.push(quote_char);
        doubled.push(quote_char);
        input.replace(quote_char, &doubled)
    } else {
        let mut all_specials = Vec::with_capacity(specials.len() + 1);
        all_specials.extend_from_slice(specials);
        all_specials.push(quote_char);
        let mut all_sequences = Vec::with_capacity(sequences.len() + 1);
        all_sequences.extend_from_slice(sequences);
        all_sequences.push(quote_str);
        escape_validated(input, escape_char, &all_specials, &all_sequences)
    };

    let mut out = String::with_capacity(body.len() + quote_str.len() * 2);
    out.push(quote_char);
    out.push_str(&body);
    out.push(quote_char);
    out
}

/// Strict inverse of [`quote`].
///
/// # Errors
/// Returns [`RowError::InvalidArgument`] if the input is not wrapped in
/// double quotes or its body contains a malformed escape.
pub fn unquote(input: &str) -> Result<String, RowError> {
    unquote_with(input, DEFAULT_QUOTE, DEFAULT_ESCAPE, &[], &[])
}

/// Strict inverse of [`quote_with`] under the same character tables.
///
/// The input must begin and end with `quote_char`. Inside the body, every
/// escape introduced by `escape_char` is resolved back to the character it
/// stands for: a doubled escape character to the escape character itself, a
/// caller-supplied sequence to its special character, the quote character's
/// sequence to the quote character. In the doubled-quote style
/// (`quote_char == escape_char`) only doubled quotes are recognized.
///
/// # Errors
/// Returns [`RowError::InvalidArgument`] for input not wrapped in the quote
/// character, an unescaped quote character inside the body, an unrecognized
/// escape sequence, or a dangling escape character at the end.
///
/// # Examples
///
/// ```
/// use rowfmt::text::{quote_with, unquote_with};
///
/// let original = "line one\nline \"two\"";
/// let quoted = quote_with(original, '"', '\\', &['\n'], &["n"]).unwrap();
/// let restored = unquote_with(&quoted, '"', '\\', &['\n'], &["n"]).unwrap();
/// assert_eq!(restored, original);
/// ```
pub fn unquote_with(
    input: &str,
    quote_char: char,
    escape_char: char,
    specials: &[char],
    sequences: &[&str],
) -> Result<String, RowError> {
    if specials.len() != sequences.len() {
        return Err(RowError::InvalidArgument {
            name: "sequences",
            reason: format!(
                "expected one sequence per special character, got {} specials and {} sequences",
                specials.len(),
                sequences.len()
            ),
        });
    }

    let body = input
        .strip_prefix(quote_char)
        .and_then(|rest| rest.strip_suffix(quote_char))
        .ok_or_else(|| RowError::InvalidArgument {
            name: "input",
            reason: format!("not wrapped in the quote character {quote_char:?}"),
        })?;

    if quote_char == escape_char {
        return undouble(body, quote_char);
    }

    let mut quote_buf = [0u8; 4];
    let quote_str: &str = quote_char.encode_utf8(&mut quote_buf);

    let mut out = String::with_capacity(body.len());
    let mut rest = body;
    while let Some(c) = rest.chars().next() {
        let tail = &rest[c.len_utf8()..];
        if c == quote_char {
            return Err(RowError::InvalidArgument {
                name: "input",
                reason: "unescaped quote character inside the quoted body".to_string(),
            });
        }
        if c != escape_char {
            out.push(c);
            rest = tail;
            continue;
        }
        if let Some(after) = tail.strip_prefix(escape_char) {
            out.push(escape_char);
            rest = after;
            continue;
        }
        if let Some(slot) = sequences.iter().position(|seq| tail.starts_with(seq)) {
            out.push(specials[slot]);
            rest = &tail[sequences[slot].len()..];
            continue;
        }
        if let Some(after) = tail.strip_prefix(quote_str) {
            out.push(quote_char);
            rest = after;
            continue;
        }
        return Err(RowError::InvalidArgument {
            name: "input",
            reason: match tail.chars().next() {
                Some(next) => format!("unrecognized escape sequence `{escape_char}{next}`"),
                None => "dangling escape character at end of input".to_string(),
            },
        });
    }
    Ok(out)
}

/// Collapses doubled quote characters back to single ones.
fn undouble(body: &str, quote_char: char) -> Result<String, RowError> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != quote_char {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(next) if next == quote_char => out.push(quote_char),
            _ => {
                return Err(RowError::InvalidArgument {
                    name: "input",
                    reason: "lone quote character inside a doubled-quote body".to_string(),
                });
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_quote_wraps_and_escapes() {
        assert_eq!(quote(""), "\"\"");
        assert_eq!(quote("plain"), "\"plain\"");
        assert_eq!(quote("a \"b\" c"), "\"a \\\"b\\\" c\"");
        assert_eq!(quote("back\\slash"), "\"back\\\\slash\"");
    }

    #[test]
    fn doubled_quote_style_ignores_extra_tables() {
        let quoted = quote_with("a\"b\nc", '"', '"', &['\n'], &["n"]).unwrap();
        // only the quote doubles; the newline rides through untouched
        assert_eq!(quoted, "\"a\"\"b\nc\"");
    }

    #[test]
    fn caller_pair_for_the_quote_character_wins() {
        let quoted = quote_with("a\"b", '"', '\\', &['"'], &["q"]).unwrap();
        assert_eq!(quoted, "\"a\\qb\"");
    }

    #[test]
    fn single_quote_with_backslash_escape() {
        let quoted = quote_with("it's", '\'', '\\', &[], &[]).unwrap();
        assert_eq!(quoted, "'it\\'s'");
    }

    #[test]
    fn mismatched_tables_are_rejected() {
        let quoted = quote_with("x", '"', '\\', &['\n'], &[]);
        assert!(matches!(
            quoted,
            Err(RowError::InvalidArgument { name: "sequences", .. })
        ));
        let unquoted = unquote_with("\"x\"", '"', '\\', &['\n'], &[]);
        assert!(matches!(
            unquoted,
            Err(RowError::InvalidArgument { name: "sequences", .. })
        ));
    }

    #[test]
    fn unquote_inverts_quote() {
        for original in [
            "",
            "plain",
            "with \"quotes\"",
            "trailing backslash \\",
            "\\\"both\\\"",
        ] {
            assert_eq!(unquote(&quote(original)).unwrap(), original);
        }
    }

    #[test]
    fn unquote_inverts_quote_with_across_pairs() {
        let cases = [
            ('"', '\\'),
            ('\'', '\\'),
            ('"', '"'),
            ('\'', '\''),
            ('|', '^'),
        ];
        for (qc, ec) in cases {
            for original in [
                "",
                "plain text",
                "has \"double\" and 'single'",
                "sep,and|pipe^caret",
                "line\none\r\nline two",
            ] {
                let quoted = quote_with(original, qc, ec, &['\n', '\r'], &["n", "r"]).unwrap();
                let restored = unquote_with(&quoted, qc, ec, &['\n', '\r'], &["n", "r"]).unwrap();
                assert_eq!(restored, original, "pair {qc:?}/{ec:?}");
            }
        }
    }

    #[test]
    fn unquote_rejects_unwrapped_input() {
        assert!(unquote("plain").is_err());
        assert!(unquote("\"open only").is_err());
        assert!(unquote("close only\"").is_err());
        // a single quote character is not a wrapped empty string
        assert!(unquote("\"").is_err());
    }

    #[test]
    fn unquote_rejects_malformed_bodies() {
        // bare quote inside the body
        assert!(unquote("\"a\"b\"").is_err());
        // dangling escape at the end
        assert!(unquote("\"abc\\\"").is_err());
        // unknown escape sequence
        assert!(unquote_with("\"a\\zb\"", '"', '\\', &['\n'], &["n"]).is_err());
        // lone quote in doubled-quote style
        assert!(unquote_with("\"a\"b\"", '"', '"', &[], &[]).is_err());
    }

    #[test]
    fn unquote_resolves_caller_sequences() {
        let restored = unquote_with("\"a\\nb\\rc\"", '"', '\\', &['\n', '\r'], &["n", "r"]).unwrap();
        assert_eq!(restored, "a\nb\rc");
    }
}
