use std::time::Duration;

/// Cumulative CPU times for one process, read at a single point in time.
///
/// `created` is a platform-specific creation identity: it only needs to be
/// stable for the lifetime of the process and to differ between two
/// processes that reused the same PID.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CpuTimes {
    pub kernel: Duration,
    pub user: Duration,
    pub created: Option<Duration>,
}

impl CpuTimes {
    pub fn total(&self) -> Duration {
        self.kernel + self.user
    }
}

/// Host-wide virtual (commit/address-space) memory totals in bytes.
#[derive(Clone, Copy, Debug)]
pub struct VirtualMemory {
    pub total: u64,
    pub available: u64,
}

pub trait PlatformExtensions {
    /// Kernel/user CPU times for a process. `None` means the process is
    /// gone or cannot be queried by this user.
    fn process_cpu_times(pid: u32) -> Option<CpuTimes>;
    /// Private (non-shared) committed bytes for a process.
    fn process_private_bytes(pid: u32) -> Option<u64>;
    fn page_size() -> Option<u64>;
    /// Minimum and maximum usable application addresses.
    fn address_space_bounds() -> Option<(u64, u64)>;
    fn virtual_memory() -> Option<VirtualMemory>;
}

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "macos")]
mod macos;
#[cfg(target_os = "windows")]
mod windows;

#[cfg(target_os = "linux")]
use linux as platform_impl;
#[cfg(target_os = "macos")]
use macos as platform_impl;
#[cfg(target_os = "windows")]
use windows as platform_impl;

pub fn process_cpu_times(pid: u32) -> Option<CpuTimes> {
    platform_impl::Platform::process_cpu_times(pid)
}

pub fn process_private_bytes(pid: u32) -> Option<u64> {
    platform_impl::Platform::process_private_bytes(pid)
}

pub fn page_size() -> Option<u64> {
    platform_impl::Platform::page_size()
}

pub fn address_space_bounds() -> Option<(u64, u64)> {
    platform_impl::Platform::address_space_bounds()
}

pub fn virtual_memory() -> Option<VirtualMemory> {
    platform_impl::Platform::virtual_memory()
}
