use memmap2::MmapOptions;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub mod driver;
pub mod emit;
pub mod error;
pub mod record;
pub mod source;
pub mod stats;
pub mod table;

pub use driver::{AggregateOptions, Aggregator, OverflowPolicy, Summary};
pub use error::{AggregateError, CapacityExceeded, RecordError};
pub use record::parse_record;
pub use source::{LineSource, ReaderLines, SliceLines};
pub use stats::RunningStats;
pub use table::{AggregationTable, fnv1a};

/// Aggregates an in-memory buffer and returns the sorted report.
pub fn aggregate_bytes(data: &[u8], options: AggregateOptions) -> Result<String, AggregateError> {
    let mut agg = Aggregator::new(options);
    agg.consume(&mut SliceLines::new(data))?;
    Ok(emit::render(agg.table()))
}

/// Memory-maps `path` and aggregates it.
pub fn solve<P: AsRef<Path>>(
    path: P,
    options: AggregateOptions,
) -> Result<String, Box<dyn std::error::Error>> {
    let file = File::open(path)?;
    // an empty file cannot be mapped on every platform
    if file.metadata()?.len() == 0 {
        return Ok(String::new());
    }
    let mapped_file = unsafe { MmapOptions::new().map(&file)? };
    Ok(aggregate_bytes(&mapped_file, options)?)
}

/// Streams `path` through a buffered reader instead of mapping it.
pub fn solve_buffered<P: AsRef<Path>>(
    path: P,
    options: AggregateOptions,
) -> Result<String, Box<dyn std::error::Error>> {
    let file = File::open(path)?;
    let mut agg = Aggregator::new(options);
    agg.consume(&mut ReaderLines::new(BufReader::with_capacity(1 << 20, file)))?;
    Ok(emit::render(agg.table()))
}
