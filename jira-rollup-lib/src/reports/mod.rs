//! Emitters for computed reports
//!
//! Three generators are provided, each accessed through a `generate` function:
//! - **Console**: Aligned plain-text tables with optional ANSI colors
//! - **CSV**: One block of records per non-empty section
//! - **JSON**: The whole [`Report`](crate::sections::Report), pretty-printed
//!
//! The console and CSV generators share the tabular layout of the `common` module, so a
//! section has the same columns in both. Undefined values are shown as `-`.

mod common;
mod console;
mod csv;
mod json;

pub use console::generate as generate_console;
pub use csv::generate as generate_csv;
pub use json::generate as generate_json;
