//! Case file formats bridging discovery and upload.
//!
//! - `delimited` - six-column text rows (the artifact written by `scan`)
//! - `structured` - JSON lines, one `add_case` body per line

mod delimited;
mod error;
mod structured;

pub use delimited::{escape_description, unescape_description, DelimitedCodec, COLUMN_COUNT};
pub use error::InterchangeError;
pub use structured::{
    convert_file, convert_files, read_case_file, read_json_lines, rows_to_json, write_json_lines,
    JSON_LINES_EXTENSION,
};
