use crate::error::RowError;

/// Replaces special characters with escape sequences.
///
/// Each character in `specials` is replaced by `escape_char` followed by the
/// escape sequence at the same position in `sequences`. Any literal
/// occurrence of `escape_char` itself is doubled, so the result is
/// unambiguous and reversible. The input is scanned once, left to right,
/// and runs without special characters are copied verbatim.
///
/// Empty tables are legal: only the escape character itself is escaped.
///
/// # Parameters
/// - `input`: the text to escape
/// - `escape_char`: the character that introduces every escape sequence
/// - `specials`: the characters to replace
/// - `sequences`: one replacement sequence per special character
///
/// # Errors
/// Returns [`RowError::InvalidArgument`] if `specials` and `sequences`
/// differ in length.
///
/// # Examples
///
/// ```
/// use rowfmt::text::escape;
///
/// let escaped = escape("a\nb", '\\', &['\n'], &["n"]).unwrap();
/// assert_eq!(escaped, "a\\nb");
///
/// // the escape character always doubles
/// let escaped = escape("a\\b", '\\', &[], &[]).unwrap();
/// assert_eq!(escaped, "a\\\\b");
/// ```
pub fn escape(
    input: &str,
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
    Ok(escape_validated(input, escape_char, specials, sequences))
}

/// Escape with tables already known to be the same length.
pub(crate) fn escape_validated(
    input: &str,
    escape_char: char,
    specials: &[char],
    sequences: &[&str],
) -> String {
    if !input.contains(|c: char| c == escape_char || specials.contains(&c)) {
        return input.to_string();
    }

    let mut out = String::with_capacity(input.len() + input.len() / 4);
    let mut copied = 0;
    for (pos, c) in input.char_indices() {
        if c == escape_char {
            out.push_str(&input[copied..pos]);
            out.push(escape_char);
            out.push(escape_char);
        } else if let Some(slot) = specials.iter().position(|&s| s == c) {
            out.push_str(&input[copied..pos]);
            out.push(escape_char);
            out.push_str(sequences[slot]);
        } else {
            continue;
        }
        copied = pos + c.len_utf8();
    }
    out.push_str(&input[copied..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_passes_through_unchanged() {
        let result = escape("nothing special here", '\\', &['\n', '\r'], &["n", "r"]).unwrap();
        assert_eq!(result, "nothing special here");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(escape("", '\\', &['\n'], &["n"]).unwrap(), "");
    }

    #[test]
    fn specials_map_to_their_sequences() {
        let result = escape("one\ntwo\rthree", '\\', &['\n', '\r'], &["n", "r"]).unwrap();
        assert_eq!(result, "one\\ntwo\\rthree");
    }

    #[test]
    fn escape_character_doubles() {
        let result = escape("a\\b\\c", '\\', &['\n'], &["n"]).unwrap();
        assert_eq!(result, "a\\\\b\\\\c");
    }

    #[test]
    fn empty_tables_still_double_the_escape_character() {
        let result = escape("half \\ measure", '\\', &[], &[]).unwrap();
        assert_eq!(result, "half \\\\ measure");
    }

    #[test]
    fn escape_character_wins_over_its_own_table_entry() {
        // '\\' listed as a special still doubles instead of using "x"
        let result = escape("a\\b", '\\', &['\\'], &["x"]).unwrap();
        assert_eq!(result, "a\\\\b");
    }

    #[test]
    fn multi_char_sequences_are_emitted_whole() {
        let result = escape("a\u{1}b", '^', &['\u{1}'], &["u0001"]).unwrap();
        assert_eq!(result, "a^u0001b");
    }

    #[test]
    fn non_ascii_specials_are_replaced() {
        let result = escape("prix: 10€", '\\', &['€'], &["eur"]).unwrap();
        assert_eq!(result, "prix: 10\\eur");
    }

    #[test]
    fn mismatched_tables_are_rejected() {
        let result = escape("x", '\\', &['\n', '\r'], &["n"]);
        assert!(matches!(
            result,
            Err(RowError::InvalidArgument { name: "sequences", .. })
        ));
    }

    #[test]
    fn adjacent_specials_each_get_a_sequence() {
        let result = escape("\n\n", '\\', &['\n'], &["n"]).unwrap();
        assert_eq!(result, "\\n\\n");
    }
}
