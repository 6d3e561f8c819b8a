use super::sampler::{CpuSampler, CpuTimeSample};

/// One enumerated process. The name may be empty for kernel-owned
/// processes.
#[derive(Clone, Debug)]
pub struct ProcessRecord {
    pub pid: u32,
    pub name: String,
}

/// One rendered table row. `cpu_percent: None` is an unknown reading
/// (first observation, clock anomaly, PID reuse) and renders as a
/// placeholder, never as a number.
#[derive(Clone, Debug, PartialEq)]
pub struct ProcessRow {
    pub pid: u32,
    pub name: String,
    pub cpu_percent: Option<f32>,
    pub memory_bytes: u64,
}

/// Build table rows for one refresh cycle.
///
/// `read` performs the per-PID resource query and returns the CPU sample
/// plus a memory figure; a `None` means the process exited between
/// enumeration and query (or cannot be queried) and its row is skipped for
/// this cycle. The sampler is injected so the cycle is testable against a
/// fabricated reader.
pub fn build_rows(
    records: Vec<ProcessRecord>,
    read: impl Fn(u32) -> Option<(CpuTimeSample, u64)>,
    sampler: &mut CpuSampler,
    core_count: usize,
) -> Vec<ProcessRow> {
    sampler.begin_cycle();
    let mut rows = Vec::with_capacity(records.len());
    for record in records {
        let Some((sample, memory_bytes)) = read(record.pid) else {
            tracing::debug!(pid = record.pid, "process unavailable, skipping row");
            continue;
        };
        let cpu_percent = sampler.observe(record.pid, sample, core_count);
        rows.push(ProcessRow {
            pid: record.pid,
            name: record.name,
            cpu_percent,
            memory_bytes,
        });
    }
    sampler.end_cycle();
    rows
}
