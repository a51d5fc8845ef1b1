use serde::Serialize;

/// Running operation-count statistics for one suite. Only passed cases
/// are ever folded in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SuiteStats {
    pub count: u64,
    pub total: u64,
    pub low: Option<u64>,
    pub high: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatsSummary {
    pub low: Option<u64>,
    pub high: Option<u64>,
    pub mean: f64,
}

impl SuiteStats {
    pub fn accumulate(self, op_count: u64) -> Self {
        Self {
            count: self.count + 1,
            total: self.total + op_count,
            low: Some(self.low.map_or(op_count, |l| l.min(op_count))),
            high: Some(self.high.map_or(op_count, |h| h.max(op_count))),
        }
    }

    pub fn finalize(&self) -> StatsSummary {
        let mean = if self.count == 0 {
            0.0
        } else {
            self.total as f64 / self.count as f64
        };
        StatsSummary {
            low: self.low,
            high: self.high,
            mean,
        }
    }
}
