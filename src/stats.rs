use std::fmt;

/// Point-in-time snapshot of an engine's counters.
///
/// The `Display` output mirrors the simulator report:
///
/// ```text
/// total memory frames: 4
/// events in trace: 10
/// total disk reads: 6
/// total disk writes: 2
/// page fault rate: 0.6000
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MmuStats {
    /// Number of physical frames.
    pub capacity: usize,

    /// Number of reads and writes issued.
    pub accesses: u64,

    /// Accesses whose page was not resident.
    pub page_faults: u64,

    /// Pages loaded from disk.
    pub disk_reads: u64,

    /// Dirty pages written back on eviction.
    pub disk_writes: u64,
}

impl MmuStats {
    /// Accesses served from a resident frame.
    pub fn hits(&self) -> u64 {
        self.accesses - self.page_faults
    }

    /// Ratio of faults to accesses (0.0 to 1.0).
    pub fn fault_rate(&self) -> f64 {
        if self.accesses == 0 {
            0.0
        } else {
            self.page_faults as f64 / self.accesses as f64
        }
    }
}

impl fmt::Display for MmuStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "total memory frames: {}", self.capacity)?;
        writeln!(f, "events in trace: {}", self.accesses)?;
        writeln!(f, "total disk reads: {}", self.disk_reads)?;
        writeln!(f, "total disk writes: {}", self.disk_writes)?;
        write!(f, "page fault rate: {:.4}", self.fault_rate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_stats() {
        let stats = MmuStats::default();
        assert_eq!(stats.hits(), 0);
        assert_eq!(stats.fault_rate(), 0.0);
    }

    #[test]
    fn fault_rate() {
        let stats = MmuStats {
            capacity: 4,
            accesses: 10,
            page_faults: 6,
            disk_reads: 6,
            disk_writes: 2,
        };
        assert_eq!(stats.hits(), 4);
        assert_eq!(stats.fault_rate(), 0.6);
    }

    #[test]
    fn display() {
        let stats = MmuStats {
            capacity: 4,
            accesses: 10,
            page_faults: 6,
            disk_reads: 6,
            disk_writes: 2,
        };
        let report = stats.to_string();
        assert!(report.contains("total memory frames: 4"));
        assert!(report.contains("events in trace: 10"));
        assert!(report.contains("total disk writes: 2"));
        assert!(report.ends_with("page fault rate: 0.6000"));
    }
}
