#![cfg_attr(docsrs, feature(doc_cfg))]
//#![warn(missing_docs)]

/*!
 # Rowfmt

 **Rowfmt** writes heterogeneous Rust values as delimited rows. Typed structs,
 string-keyed maps and flat sequences all funnel through one field-resolution
 engine into a single consistent columnar format, with configurable
 separator, quoting and escaping rules. Around that core it carries a few
 general-purpose companions: string quoting/escaping primitives, slice
 destructuring and shuffling helpers, and a bridge for running asynchronous
 work from synchronous code.

 ## Core Concepts

 - **Format:** the frozen set of formatting knobs for one writer session —
   separator, quote character, escape character, newline policy and the
   quote-everything switch. See [`writer::RowFormat`].
 - **FieldSet:** the ordered, de-duplicated field names governing row layout.
   Established once per session by an explicit call, a header row or the
   first serialized value, then reused for every subsequent row.
 - **Row:** one value rendered as separator-joined fields plus a line
   terminator. Rows are rendered fully in memory and handed to the sink as a
   single write.
 - **Writer:** the session tying a format, a field set and a sink together.
   Built through [`writer::RowWriterBuilder`] for synchronous
   ([`writer::RowWriter`]) and asynchronous ([`writer::AsyncRowWriter`])
   sinks.

 ## Getting Started

```rust
# use rowfmt::writer::RowWriterBuilder;
# use serde::Serialize;
#
#[derive(Serialize)]
struct City<'a> {
    name: &'a str,
    country: &'a str,
}

fn main() -> Result<(), rowfmt::RowError> {
    let mut writer = RowWriterBuilder::new().from_writer(Vec::new());

    writer.write_header(["name", "country"])?;
    writer.write_record(&City { name: "Nantes", country: "France" })?;
    writer.write_record(&City { name: "Boston", country: "United States" })?;

    let data = String::from_utf8(writer.into_inner()?).unwrap();
    # #[cfg(not(windows))]
    assert_eq!(data, "name,country\nNantes,France\nBoston,United States\n");
    Ok(())
}
```

 ## License
 Licensed under either of

 -   Apache License, Version 2.0
     ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
 -   MIT license
     ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)

 at your option.

 */

/// Error types for row writing operations
pub mod error;

#[doc(inline)]
pub use error::*;

/// Slice destructuring and shuffling helpers
pub mod slice;

/// Bridge for running asynchronous work from synchronous code
pub mod task;

/// String quoting and escaping primitives
pub mod text;

/// Delimited-row writers and their formatting engine
pub mod writer;
