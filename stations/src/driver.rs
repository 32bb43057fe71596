use crate::error::{AggregateError, RecordError};
use crate::record::parse_record;
use crate::source::LineSource;
use crate::table::{AggregationTable, DEFAULT_KEY_BYTES};

/// Roughly the number of distinct stations in the benchmark data set,
/// rounded up with room to keep probe chains short.
pub const DEFAULT_CAPACITY: usize = 1 << 14;

/// What to do when the table runs out of slots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Panic, terminating the run.
    #[default]
    Abort,
    /// Stop and return [`AggregateError::Capacity`].
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateOptions {
    pub capacity: usize,
    pub arena_bytes: usize,
    pub overflow: OverflowPolicy,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            arena_bytes: DEFAULT_CAPACITY * DEFAULT_KEY_BYTES,
            overflow: OverflowPolicy::default(),
        }
    }
}

impl AggregateOptions {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            arena_bytes: capacity.saturating_mul(DEFAULT_KEY_BYTES),
            ..Self::default()
        }
    }
}

/// Line counts for one or more `consume` passes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub lines: u64,
    pub aggregated: u64,
    pub malformed: u64,
    pub bad_numbers: u64,
}

impl Summary {
    pub fn skipped(&self) -> u64 {
        self.malformed + self.bad_numbers
    }
}

/// Feeds lines through the tokenizer into an [`AggregationTable`].
#[derive(Debug)]
pub struct Aggregator {
    table: AggregationTable,
    overflow: OverflowPolicy,
    summary: Summary,
}

impl Aggregator {
    pub fn new(options: AggregateOptions) -> Self {
        Self {
            table: AggregationTable::with_arena(options.capacity, options.arena_bytes),
            overflow: options.overflow,
            summary: Summary::default(),
        }
    }

    /// Pulls every line out of `source`. Lines that are not a well-formed
    /// record are counted and skipped.
    pub fn consume<S: LineSource>(&mut self, source: &mut S) -> Result<Summary, AggregateError> {
        while let Some(line) = source.next_line()? {
            self.summary.lines += 1;
            match parse_record(line) {
                Ok((key, value)) => {
                    let stats = match self.overflow {
                        OverflowPolicy::Abort => self.table.get_or_create(key),
                        OverflowPolicy::Error => self.table.try_get_or_create(key)?,
                    };
                    stats.record(value);
                    self.summary.aggregated += 1;
                }
                Err(e) => {
                    match e {
                        RecordError::MalformedRecord => self.summary.malformed += 1,
                        RecordError::NumberFormat => self.summary.bad_numbers += 1,
                    }
                    log::trace!(
                        "skipping line {}: {e}: {:?}",
                        self.summary.lines,
                        String::from_utf8_lossy(line)
                    );
                }
            }
        }

        log::debug!(
            "aggregated {} of {} lines into {} stations ({} malformed, {} bad numbers)",
            self.summary.aggregated,
            self.summary.lines,
            self.table.len(),
            self.summary.malformed,
            self.summary.bad_numbers
        );
        Ok(self.summary)
    }

    pub fn summary(&self) -> Summary {
        self.summary
    }

    pub fn table(&self) -> &AggregationTable {
        &self.table
    }

    pub fn into_table(self) -> AggregationTable {
        self.table
    }
}
