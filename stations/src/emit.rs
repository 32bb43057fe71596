//! Final sort and format pass.
//!
//! Every line is `key=min/mean/max` with one fractional digit. Values are
//! rounded by `{:.1}` formatting: the exact binary value goes to the nearest
//! tenth, ties to even. A negative value that rounds to zero prints as `-0.0`.

use std::io::{self, Write};

use crate::stats::RunningStats;
use crate::table::AggregationTable;

/// All entries of `table`, ascending by key bytes.
pub fn sorted_entries(table: &AggregationTable) -> Vec<(&[u8], &RunningStats)> {
    let mut entries: Vec<_> = table.iter().collect();
    entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
    entries
}

/// Writes one formatted line for `key`. The key goes out as raw bytes.
#[inline]
pub fn write_line<W: Write>(out: &mut W, key: &[u8], stats: &RunningStats) -> io::Result<()> {
    out.write_all(key)?;
    writeln!(out, "={:.1}/{:.1}/{:.1}", stats.min, stats.mean(), stats.max)
}

pub fn write_report<W: Write>(table: &AggregationTable, out: &mut W) -> io::Result<()> {
    for (key, stats) in sorted_entries(table) {
        write_line(out, key, stats)?;
    }
    Ok(())
}

/// The report as a string. Keys that are not UTF-8 are replaced lossily.
pub fn render(table: &AggregationTable) -> String {
    let mut out = Vec::with_capacity(table.len().saturating_mul(32));
    // writing into a Vec cannot fail
    let _ = write_report(table, &mut out);
    match String::from_utf8(out) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}
