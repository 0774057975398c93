//! Column-oriented record files: one row per sample, one column per
//! instrument, separated by whitespace or commas. Blank lines and lines
//! starting with `#` are skipped.

use std::path::Path;

use anyhow::{Context, Result, bail};

use nereus_array::TimeSeriesBlock;

/// Reads a column file into a [`TimeSeriesBlock`].
pub fn read_columns(path: &Path) -> Result<TimeSeriesBlock> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read data file: {}", path.display()))?;
    let rows = parse_rows(&text).with_context(|| format!("in {}", path.display()))?;
    TimeSeriesBlock::from_rows(&rows)
        .with_context(|| format!("invalid records in {}", path.display()))
}

fn parse_rows(text: &str) -> Result<Vec<Vec<f64>>> {
    let mut rows = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let row = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
            .map(|t| {
                t.parse::<f64>()
                    .with_context(|| format!("line {}: '{t}' is not a number", i + 1))
            })
            .collect::<Result<Vec<f64>>>()?;
        rows.push(row);
    }
    if rows.is_empty() {
        bail!("no samples found");
    }
    Ok(rows)
}
