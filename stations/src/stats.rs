/// Per-station accumulator.
///
/// A fresh value is the identity for [`RunningStats::record`]: the first
/// recorded measurement becomes min, max and sum with a count of one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunningStats {
    pub sum: f64,
    pub min: f64,
    pub max: f64,
    pub count: u64,
}

impl Default for RunningStats {
    fn default() -> Self {
        Self {
            sum: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            count: 0,
        }
    }
}

impl RunningStats {
    /// Stats seeded with a single measurement.
    pub fn new(value: f64) -> Self {
        Self {
            sum: value,
            min: value,
            max: value,
            count: 1,
        }
    }

    #[inline]
    pub fn record(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        self.max = self.max.max(value);
        self.min = self.min.min(value);
    }

    /// Arithmetic mean. NaN while nothing has been recorded.
    #[inline]
    pub fn mean(&self) -> f64 {
        self.sum / self.count as f64
    }
}
