/// Asynchronous delimited-row writer.
pub mod async_writer;
/// Output format knobs shared by every writer.
pub mod format;
/// Synchronous delimited-row writer and its builder.
pub mod row_writer;

mod fields;
mod record;
mod session;

pub use async_writer::AsyncRowWriter;
pub use format::RowFormat;
pub use row_writer::{RowWriter, RowWriterBuilder};
