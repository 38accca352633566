//! I/O module: sample tables in, prediction reports out
//!
//! Input tables are CSV (or TSV) with a header row, optionally gzip
//! compressed. Rows are deserialized one at a time into
//! [`SampleRow`](crate::dataset::SampleRow).

mod table;

pub use table::{write_predictions, SampleTableReader};
