//! Line-delimited JSON case files.
//!
//! Each line is one case object with the remote service's field names, ready
//! to be posted as an `add_case` body.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use super::delimited::DelimitedCodec;
use super::error::InterchangeError;
use crate::cases::CaseRecord;

/// Extension of converted files.
pub const JSON_LINES_EXTENSION: &str = "jsonl";

/// Convert every row of a delimited file into a JSON object string.
///
/// Fails on the first malformed row.
pub fn rows_to_json(codec: &DelimitedCodec, path: &Path) -> Result<Vec<String>, InterchangeError> {
    codec
        .read_file(path)?
        .iter()
        .map(|record| serde_json::to_string(record).map_err(InterchangeError::from))
        .collect()
}

/// Write records as JSON lines, replacing the file. Returns the line count.
pub fn write_json_lines(path: &Path, records: &[CaseRecord]) -> Result<usize, InterchangeError> {
    let file = File::create(path).map_err(|e| InterchangeError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer
            .write_all(b"\n")
            .map_err(|e| InterchangeError::io(path, e))?;
    }
    writer.flush().map_err(|e| InterchangeError::io(path, e))?;
    Ok(records.len())
}

/// Read a JSON lines case file. Blank lines are skipped.
pub fn read_json_lines(path: &Path) -> Result<Vec<CaseRecord>, InterchangeError> {
    let file = File::open(path).map_err(|e| InterchangeError::io(path, e))?;
    let mut records = Vec::new();

    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| InterchangeError::io(path, e))?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line).map_err(|e| InterchangeError::MalformedRow {
            path: path.to_path_buf(),
            row: idx + 1,
            message: e.to_string(),
        })?;
        records.push(record);
    }

    Ok(records)
}

/// Convert one delimited file into a JSON lines file.
///
/// The output is only created once every row has been decoded.
pub fn convert_file(
    codec: &DelimitedCodec,
    input: &Path,
    output: &Path,
) -> Result<usize, InterchangeError> {
    let records = codec.read_file(input)?;
    let count = write_json_lines(output, &records)?;
    info!(input = %input.display(), output = %output.display(), rows = count, "converted case file");
    Ok(count)
}

/// Convert delimited files into `<out_dir>/<stem>.jsonl`, in order.
///
/// Inputs sharing a file stem get numbered outputs so none is overwritten.
/// Stops at the first file that fails. Files converted before it are left
/// in place.
pub fn convert_files(
    codec: &DelimitedCodec,
    inputs: &[PathBuf],
    out_dir: &Path,
) -> Result<Vec<PathBuf>, InterchangeError> {
    fs::create_dir_all(out_dir).map_err(|e| InterchangeError::io(out_dir, e))?;

    let mut written: Vec<PathBuf> = Vec::with_capacity(inputs.len());
    for input in inputs {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "cases".to_string());
        let output = unique_output(out_dir, &stem, &written);
        convert_file(codec, input, &output)?;
        written.push(output);
    }

    Ok(written)
}

/// `<stem>.jsonl`, or `<stem>-2.jsonl`, `<stem>-3.jsonl`, ... when an earlier
/// input of the same batch already claimed the name.
fn unique_output(out_dir: &Path, stem: &str, taken: &[PathBuf]) -> PathBuf {
    let mut output = out_dir.join(format!("{}.{}", stem, JSON_LINES_EXTENSION));
    let mut n = 2;
    while taken.contains(&output) {
        output = out_dir.join(format!("{}-{}.{}", stem, n, JSON_LINES_EXTENSION));
        n += 1;
    }
    output
}

/// Read a case file, picking the format from its extension.
pub fn read_case_file(codec: &DelimitedCodec, path: &Path) -> Result<Vec<CaseRecord>, InterchangeError> {
    let is_json_lines = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case(JSON_LINES_EXTENSION))
        .unwrap_or(false);

    if is_json_lines {
        read_json_lines(path)
    } else {
        codec.read_file(path)
    }
}
