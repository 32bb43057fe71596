//! Reference implementation on top of a general purpose hash map.
//!
//! Same input rules, skipping and output format as the `stations` table, so
//! the two can be diffed against each other. Every new key costs an
//! allocation here.

use ahash::AHashMap;
use memmap2::MmapOptions;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use stations::emit::write_line;
use stations::{LineSource, ReaderLines, RunningStats, SliceLines, parse_record};

pub const NUM_STATIONS: usize = 413;

#[derive(Debug, Default)]
pub struct NaiveAggregator {
    stations: AHashMap<Vec<u8>, RunningStats>,
    skipped: u64,
}

impl NaiveAggregator {
    pub fn new() -> Self {
        Self {
            stations: AHashMap::with_capacity(NUM_STATIONS),
            skipped: 0,
        }
    }

    pub fn consume<S: LineSource>(&mut self, source: &mut S) -> std::io::Result<()> {
        while let Some(line) = source.next_line()? {
            let Ok((key, value)) = parse_record(line) else {
                self.skipped += 1;
                continue;
            };
            match self.stations.get_mut(key) {
                Some(stats) => stats.record(value),
                None => {
                    self.stations.insert(key.to_vec(), RunningStats::new(value));
                }
            }
        }
        log::debug!(
            "naive pass: {} stations, {} lines skipped",
            self.stations.len(),
            self.skipped
        );
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    pub fn render(&self) -> String {
        let mut sorted: Vec<_> = self.stations.iter().collect();
        sorted.sort_unstable_by(|a, b| a.0.cmp(b.0));

        let mut out = Vec::with_capacity(sorted.len().saturating_mul(32));
        for (key, stats) in sorted {
            // writing into a Vec cannot fail
            let _ = write_line(&mut out, key, stats);
        }
        String::from_utf8_lossy(&out).into_owned()
    }
}

pub fn aggregate_bytes(data: &[u8]) -> std::io::Result<String> {
    let mut agg = NaiveAggregator::new();
    agg.consume(&mut SliceLines::new(data))?;
    Ok(agg.render())
}

pub fn solve<P: AsRef<Path>>(path: P) -> Result<String, Box<dyn std::error::Error>> {
    let file = File::open(path)?;
    if file.metadata()?.len() == 0 {
        return Ok(String::new());
    }
    let mapped_file = unsafe { MmapOptions::new().map(&file)? };
    Ok(aggregate_bytes(&mapped_file)?)
}

/// Streams `path` through a buffered reader instead of mapping it.
pub fn solve_buffered<P: AsRef<Path>>(path: P) -> Result<String, Box<dyn std::error::Error>> {
    let file = File::open(path)?;
    let mut agg = NaiveAggregator::new();
    agg.consume(&mut ReaderLines::new(BufReader::with_capacity(1 << 20, file)))?;
    Ok(agg.render())
}
