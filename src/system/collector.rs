use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, System};

use super::platform;
use super::process::ProcessRecord;

/// Wraps the host process table and memory counters.
pub struct Collector {
    sys: System,
}

impl Default for Collector {
    fn default() -> Self {
        Self::new()
    }
}

impl Collector {
    pub fn new() -> Self {
        let mut sys = System::new();
        sys.refresh_memory();
        sys.refresh_cpu_all();
        sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing().with_memory(),
        );
        Collector { sys }
    }

    /// Enumerate the current process set. Takes a fresh snapshot of the
    /// process table on every call so starts and exits since the previous
    /// refresh are reflected. Sorted by PID for deterministic output.
    pub fn enumerate(&mut self) -> Vec<ProcessRecord> {
        self.sys.refresh_memory();
        self.sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing().with_memory(),
        );

        let mut records: Vec<ProcessRecord> = self
            .sys
            .processes()
            .iter()
            .map(|(pid, process)| ProcessRecord {
                pid: pid.as_u32(),
                name: process.name().to_string_lossy().to_string(),
            })
            .collect();
        records.sort_unstable_by_key(|r| r.pid);
        records
    }

    pub fn core_count(&self) -> usize {
        self.sys.cpus().len()
    }

    /// Private committed bytes for a process, falling back to the resident
    /// figure from the last enumeration when the platform read is denied.
    pub fn process_memory(&self, pid: u32) -> Option<u64> {
        platform::process_private_bytes(pid).or_else(|| {
            self.sys
                .process(sysinfo::Pid::from_u32(pid))
                .map(|p| p.memory())
        })
    }

    pub fn memory_total(&self) -> u64 {
        self.sys.total_memory()
    }

    pub fn memory_used(&self) -> u64 {
        self.sys.used_memory()
    }

    pub fn memory_available(&self) -> u64 {
        self.sys.available_memory()
    }

    pub fn swap_total(&self) -> u64 {
        self.sys.total_swap()
    }

    pub fn swap_free(&self) -> u64 {
        self.sys.free_swap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enumeration_is_sorted_and_nonempty_on_a_live_host() {
        let mut collector = Collector::new();
        let records = collector.enumerate();
        assert!(!records.is_empty());
        assert!(records.windows(2).all(|w| w[0].pid < w[1].pid));
    }

    #[test]
    fn core_count_is_positive() {
        let collector = Collector::new();
        assert!(collector.core_count() > 0);
    }

    #[test]
    fn own_process_memory_is_readable() {
        let mut collector = Collector::new();
        let _ = collector.enumerate();
        let mem = collector.process_memory(std::process::id());
        assert!(mem.is_some());
    }
}
