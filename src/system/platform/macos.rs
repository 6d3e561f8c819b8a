use std::time::Duration;

use libproc::libproc::pid_rusage::{RUsageInfoV2, pidrusage};

use super::{CpuTimes, PlatformExtensions, VirtualMemory};

pub struct Platform;

impl PlatformExtensions for Platform {
    fn process_cpu_times(pid: u32) -> Option<CpuTimes> {
        // rusage info reports times in nanoseconds; the start abstime is an
        // opaque monotonic stamp, which is all the reuse check needs.
        let usage = pidrusage::<RUsageInfoV2>(pid as i32).ok()?;
        Some(CpuTimes {
            kernel: Duration::from_nanos(usage.ri_system_time),
            user: Duration::from_nanos(usage.ri_user_time),
            created: Some(Duration::from_nanos(usage.ri_proc_start_abstime)),
        })
    }

    fn process_private_bytes(pid: u32) -> Option<u64> {
        // phys_footprint is the closest per-process private-commit figure
        // the kernel exposes.
        let usage = pidrusage::<RUsageInfoV2>(pid as i32).ok()?;
        Some(usage.ri_phys_footprint)
    }

    fn page_size() -> Option<u64> {
        let size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
        if size > 0 { Some(size as u64) } else { None }
    }

    fn address_space_bounds() -> Option<(u64, u64)> {
        // User space starts above the 4 GB __PAGEZERO segment and runs to
        // the 47-bit ceiling.
        Some((0x1_0000_0000, 0x0000_7fff_ffff_ffff))
    }

    fn virtual_memory() -> Option<VirtualMemory> {
        // No commit-limit equivalent; the reporter falls back to
        // physical + swap totals.
        None
    }
}
