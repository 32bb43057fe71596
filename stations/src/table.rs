//! Fixed-capacity open-addressing table from station name bytes to
//! [`RunningStats`].
//!
//! The table never resizes. Capacity is rounded up to a power of two once, in
//! the constructor, and running out of slots is treated as a sizing bug in the
//! caller. Key bytes are copied into one append-only arena so the caller's
//! line buffer can be reused as soon as `get_or_create` returns.

use std::ops::Range;

use crate::error::CapacityExceeded;
use crate::stats::RunningStats;

const OFFSET64: u64 = 14695981039346656037;
const PRIME64: u64 = 1099511628211;

/// Arena bytes reserved per slot by [`AggregationTable::new`]. Station names
/// in the benchmark data are at most 100 bytes.
pub const DEFAULT_KEY_BYTES: usize = 100;

/// 64-bit FNV-1a over the raw bytes.
#[inline]
pub fn fnv1a(bytes: &[u8]) -> u64 {
    let mut h = OFFSET64;
    for &b in bytes {
        h ^= b as u64;
        h = h.wrapping_mul(PRIME64);
    }
    h
}

#[derive(Debug, Clone, Copy)]
struct KeySpan {
    start: usize,
    len: usize,
}

impl KeySpan {
    #[inline]
    fn range(self) -> Range<usize> {
        self.start..self.start + self.len
    }
}

#[derive(Debug)]
pub struct AggregationTable {
    keys: Vec<Option<KeySpan>>,
    stats: Vec<RunningStats>,
    arena: Vec<u8>,
    len: usize,
}

impl AggregationTable {
    /// Table with at least `capacity_hint` slots and a key arena sized for
    /// [`DEFAULT_KEY_BYTES`] per slot.
    pub fn new(capacity_hint: usize) -> Self {
        let capacity = capacity_hint.max(1).next_power_of_two();
        Self::with_arena(capacity, capacity.saturating_mul(DEFAULT_KEY_BYTES))
    }

    /// Table with at least `capacity_hint` slots and `arena_bytes` of key
    /// storage reserved up front.
    pub fn with_arena(capacity_hint: usize, arena_bytes: usize) -> Self {
        let capacity = capacity_hint.max(1).next_power_of_two();
        Self {
            keys: vec![None; capacity],
            stats: vec![RunningStats::default(); capacity],
            arena: Vec::with_capacity(arena_bytes),
            len: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bytes of key data stored so far.
    pub fn arena_len(&self) -> usize {
        self.arena.len()
    }

    /// Stats for `key`, inserting a fresh entry if the key is new.
    ///
    /// A new key's bytes are copied into the table, so `key` only has to live
    /// for the duration of the call. The returned reference stays valid until
    /// the next call that mutates the table.
    ///
    /// # Panics
    ///
    /// When the key is new and every slot is already taken. Use
    /// [`try_get_or_create`](Self::try_get_or_create) to get the error back
    /// instead.
    #[inline]
    pub fn get_or_create(&mut self, key: &[u8]) -> &mut RunningStats {
        match self.try_get_or_create(key) {
            Ok(stats) => stats,
            Err(e) => panic!("{e}"),
        }
    }

    /// Like [`get_or_create`](Self::get_or_create) but reports a full table
    /// as [`CapacityExceeded`]. The table is left untouched in that case.
    #[inline]
    pub fn try_get_or_create(&mut self, key: &[u8]) -> Result<&mut RunningStats, CapacityExceeded> {
        let idx = self.slot_for(key)?;
        Ok(&mut self.stats[idx])
    }

    /// Occupied entries in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &RunningStats)> {
        self.keys
            .iter()
            .zip(self.stats.iter())
            .filter_map(|(span, stats)| span.map(|span| (&self.arena[span.range()], stats)))
    }

    fn slot_for(&mut self, key: &[u8]) -> Result<usize, CapacityExceeded> {
        let capacity = self.capacity();
        let mask = capacity - 1;
        let start = (fnv1a(key) & mask as u64) as usize;

        let mut idx = start;
        loop {
            match self.keys[idx] {
                None => {
                    if self.len >= capacity {
                        return Err(CapacityExceeded { capacity });
                    }
                    let span = KeySpan {
                        start: self.arena.len(),
                        len: key.len(),
                    };
                    self.arena.extend_from_slice(key);
                    self.keys[idx] = Some(span);
                    self.len += 1;
                    return Ok(idx);
                }
                Some(span) if &self.arena[span.range()] == key => return Ok(idx),
                Some(_) => {}
            }

            idx = (idx + 1) & mask;
            if idx == start {
                return Err(CapacityExceeded { capacity });
            }
        }
    }
}
