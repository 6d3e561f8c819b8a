use std::time::Duration;

use super::{CpuTimes, PlatformExtensions, VirtualMemory};

pub struct Platform;

/// Seconds per clock tick, from sysconf. Jiffy counters in /proc/{pid}/stat
/// are expressed in these units.
fn clock_tick_secs() -> f64 {
    let hz = unsafe { libc::sysconf(libc::_SC_CLK_TCK) };
    if hz > 0 { 1.0 / hz as f64 } else { 0.01 }
}

fn ticks_to_duration(ticks: u64) -> Duration {
    Duration::from_secs_f64(ticks as f64 * clock_tick_secs())
}

/// Parse a "Key:   <n> kB" line from a procfs table, returning bytes.
fn parse_kb_line(line: &str, key: &str) -> Option<u64> {
    let rest = line.strip_prefix(key)?;
    let value: u64 = rest.split_whitespace().next()?.parse().ok()?;
    Some(value * 1024)
}

impl PlatformExtensions for Platform {
    fn process_cpu_times(pid: u32) -> Option<CpuTimes> {
        let path = format!("/proc/{pid}/stat");
        let contents = std::fs::read_to_string(path).ok()?;
        // comm may contain spaces and parens, so find the closing )
        let after_comm = contents.rfind(')')? + 1;
        let fields: Vec<&str> = contents[after_comm..].split_whitespace().collect();
        // Fields after comm: state(0) ppid(1) pgrp(2) session(3) tty_nr(4)
        // tpgid(5) flags(6) minflt(7) cminflt(8) majflt(9) cmajflt(10)
        // utime(11) stime(12) cutime(13) cstime(14) priority(15) nice(16)
        // num_threads(17) itrealvalue(18) starttime(19)
        let utime: u64 = fields.get(11)?.parse().ok()?;
        let stime: u64 = fields.get(12)?.parse().ok()?;
        let starttime: u64 = fields.get(19)?.parse().ok()?;
        Some(CpuTimes {
            kernel: ticks_to_duration(stime),
            user: ticks_to_duration(utime),
            created: Some(ticks_to_duration(starttime)),
        })
    }

    fn process_private_bytes(pid: u32) -> Option<u64> {
        // smaps_rollup sums Private_Clean + Private_Dirty across all
        // mappings; unreadable for other users' processes.
        let path = format!("/proc/{pid}/smaps_rollup");
        let contents = std::fs::read_to_string(path).ok()?;
        let mut private = None;
        for line in contents.lines() {
            if let Some(v) = parse_kb_line(line, "Private_Clean:") {
                private = Some(private.unwrap_or(0) + v);
            } else if let Some(v) = parse_kb_line(line, "Private_Dirty:") {
                private = Some(private.unwrap_or(0) + v);
            }
        }
        private
    }

    fn page_size() -> Option<u64> {
        let size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
        if size > 0 { Some(size as u64) } else { None }
    }

    fn address_space_bounds() -> Option<(u64, u64)> {
        let min = std::fs::read_to_string("/proc/sys/vm/mmap_min_addr")
            .ok()
            .and_then(|s| s.trim().parse::<u64>().ok())
            .or_else(Self::page_size)?;
        // Kernel TASK_SIZE for the common layouts: 47-bit user space on
        // 64-bit, 3 GB split on 32-bit.
        #[cfg(target_pointer_width = "64")]
        let max: u64 = 0x0000_7fff_ffff_f000;
        #[cfg(target_pointer_width = "32")]
        let max: u64 = 0xbfff_f000;
        Some((min, max))
    }

    fn virtual_memory() -> Option<VirtualMemory> {
        let contents = std::fs::read_to_string("/proc/meminfo").ok()?;
        let mut commit_limit = None;
        let mut committed = None;
        for line in contents.lines() {
            if let Some(v) = parse_kb_line(line, "CommitLimit:") {
                commit_limit = Some(v);
            } else if let Some(v) = parse_kb_line(line, "Committed_AS:") {
                committed = Some(v);
            }
        }
        let total = commit_limit?;
        let available = total.saturating_sub(committed?);
        Some(VirtualMemory { total, available })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kb_lines_parse_to_bytes() {
        assert_eq!(
            parse_kb_line("Private_Dirty:      1024 kB", "Private_Dirty:"),
            Some(1024 * 1024)
        );
        assert_eq!(parse_kb_line("Shared_Clean:  4 kB", "Private_Dirty:"), None);
    }

    #[test]
    fn own_stat_yields_times_and_identity() {
        let times = Platform::process_cpu_times(std::process::id()).unwrap();
        assert!(times.created.is_some());
    }

    #[test]
    fn meminfo_commit_figures_are_consistent() {
        if let Some(vm) = Platform::virtual_memory() {
            assert!(vm.available <= vm.total);
        }
    }
}
