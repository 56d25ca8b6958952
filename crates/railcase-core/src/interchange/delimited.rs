//! Six-column delimited case file.
//!
//! Columns, no header row:
//!
//! ```text
//! title, type_id, priority_id, estimate, platform code, description
//! ```
//!
//! Descriptions are escaped so each case stays on one line (`\n`, `\t`,
//! `\r` and `\` become two-character sequences) and the CSV writer doubles
//! embedded quotes. Decoding undoes both.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use csv::{QuoteStyle, ReaderBuilder, StringRecord, WriterBuilder};

use super::error::InterchangeError;
use crate::cases::CaseRecord;
use crate::classify::Platform;
use crate::config::DEFAULT_DELIMITER;

/// Number of columns in a case row.
pub const COLUMN_COUNT: usize = 6;

/// Escape control characters so a description fits on one line.
pub fn escape_description(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}

/// Reverse of [`escape_description`]. Unknown escapes are kept verbatim.
pub fn unescape_description(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Reads and writes the delimited case file.
#[derive(Debug, Clone, Copy)]
pub struct DelimitedCodec {
    delimiter: u8,
}

impl DelimitedCodec {
    pub fn new(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Columns of one case row.
    pub fn encode_row(record: &CaseRecord) -> [String; COLUMN_COUNT] {
        [
            record.title.clone(),
            record.type_id.to_string(),
            record.priority_id.to_string(),
            record.estimate.clone(),
            record.platform.code().to_string(),
            escape_description(&record.description),
        ]
    }

    /// Write records to any writer.
    pub fn write_records<W: Write>(&self, writer: W, records: &[CaseRecord]) -> csv::Result<()> {
        let mut csv_writer = WriterBuilder::new()
            .has_headers(false)
            .delimiter(self.delimiter)
            .quote_style(QuoteStyle::Necessary)
            .from_writer(writer);

        for record in records {
            csv_writer.write_record(Self::encode_row(record))?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Encode records into a string.
    pub fn encode_to_string(&self, records: &[CaseRecord]) -> Result<String, InterchangeError> {
        let mut buf = Vec::new();
        self.write_records(&mut buf, records)
            .map_err(|e| InterchangeError::csv("<memory>", e))?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Write records to a file, replacing it. Returns the number of rows.
    pub fn write_file(&self, path: &Path, records: &[CaseRecord]) -> Result<usize, InterchangeError> {
        let file = File::create(path).map_err(|e| InterchangeError::io(path, e))?;
        self.write_records(BufWriter::new(file), records)
            .map_err(|e| InterchangeError::csv(path, e))?;
        Ok(records.len())
    }

    /// Read every row of a file.
    pub fn read_file(&self, path: &Path) -> Result<Vec<CaseRecord>, InterchangeError> {
        let file = File::open(path).map_err(|e| InterchangeError::io(path, e))?;
        self.read_records(path, file)
    }

    /// Decode records from a string.
    pub fn decode_str(&self, content: &str) -> Result<Vec<CaseRecord>, InterchangeError> {
        self.read_records(Path::new("<memory>"), content.as_bytes())
    }

    /// Read every row from a reader. `path` is only used in errors.
    pub fn read_records<R: Read>(
        &self,
        path: &Path,
        reader: R,
    ) -> Result<Vec<CaseRecord>, InterchangeError> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.delimiter)
            .from_reader(reader);

        let mut records = Vec::new();
        for (idx, row) in csv_reader.records().enumerate() {
            let row = row.map_err(|e| InterchangeError::csv(path, e))?;
            records.push(decode_row(path, idx + 1, &row)?);
        }
        Ok(records)
    }
}

impl Default for DelimitedCodec {
    fn default() -> Self {
        Self::new(DEFAULT_DELIMITER as u8)
    }
}

fn decode_row(path: &Path, row: usize, fields: &StringRecord) -> Result<CaseRecord, InterchangeError> {
    let malformed = |message: String| InterchangeError::MalformedRow {
        path: path.to_path_buf(),
        row,
        message,
    };

    if fields.len() != COLUMN_COUNT {
        return Err(malformed(format!(
            "expected {} columns, found {}",
            COLUMN_COUNT,
            fields.len()
        )));
    }

    let number = |idx: usize, column: &str| -> Result<u32, InterchangeError> {
        fields[idx]
            .trim()
            .parse()
            .map_err(|_| malformed(format!("{} is not a number: {:?}", column, &fields[idx])))
    };

    let type_id = number(1, "type_id")?;
    let priority_id = number(2, "priority_id")?;
    let platform = u8::try_from(number(4, "platform")?)
        .ok()
        .and_then(Platform::from_code)
        .ok_or_else(|| malformed(format!("unknown platform code {:?}", &fields[4])))?;

    Ok(CaseRecord {
        title: fields[0].to_string(),
        type_id,
        priority_id,
        estimate: fields[3].to_string(),
        platform,
        description: unescape_description(&fields[5]),
    })
}
