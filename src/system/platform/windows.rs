use std::time::Duration;

use windows_sys::Win32::Foundation::{CloseHandle, FILETIME, HANDLE};
use windows_sys::Win32::System::ProcessStatus::{
    GetProcessMemoryInfo, PROCESS_MEMORY_COUNTERS, PROCESS_MEMORY_COUNTERS_EX,
};
use windows_sys::Win32::System::SystemInformation::{
    GetSystemInfo, GlobalMemoryStatusEx, MEMORYSTATUSEX, SYSTEM_INFO,
};
use windows_sys::Win32::System::Threading::{
    GetProcessTimes, OpenProcess, PROCESS_QUERY_LIMITED_INFORMATION,
};

use super::{CpuTimes, PlatformExtensions, VirtualMemory};

pub struct Platform;

fn filetime_to_duration(ft: &FILETIME) -> Duration {
    // FILETIME counts 100 ns intervals.
    let ticks = ((ft.dwHighDateTime as u64) << 32) | ft.dwLowDateTime as u64;
    Duration::from_nanos(ticks.saturating_mul(100))
}

/// Run `f` against a query-limited process handle, closing it afterwards.
fn with_process_handle<T>(pid: u32, f: impl FnOnce(HANDLE) -> Option<T>) -> Option<T> {
    unsafe {
        let handle = OpenProcess(PROCESS_QUERY_LIMITED_INFORMATION, 0, pid);
        if handle.is_null() {
            return None;
        }
        let result = f(handle);
        CloseHandle(handle);
        result
    }
}

impl PlatformExtensions for Platform {
    fn process_cpu_times(pid: u32) -> Option<CpuTimes> {
        with_process_handle(pid, |handle| unsafe {
            let mut create = std::mem::zeroed::<FILETIME>();
            let mut exit = std::mem::zeroed::<FILETIME>();
            let mut kernel = std::mem::zeroed::<FILETIME>();
            let mut user = std::mem::zeroed::<FILETIME>();
            if GetProcessTimes(handle, &mut create, &mut exit, &mut kernel, &mut user) == 0 {
                return None;
            }
            Some(CpuTimes {
                kernel: filetime_to_duration(&kernel),
                user: filetime_to_duration(&user),
                created: Some(filetime_to_duration(&create)),
            })
        })
    }

    fn process_private_bytes(pid: u32) -> Option<u64> {
        with_process_handle(pid, |handle| unsafe {
            let mut counters = std::mem::zeroed::<PROCESS_MEMORY_COUNTERS_EX>();
            let ok = GetProcessMemoryInfo(
                handle,
                &mut counters as *mut PROCESS_MEMORY_COUNTERS_EX as *mut PROCESS_MEMORY_COUNTERS,
                std::mem::size_of::<PROCESS_MEMORY_COUNTERS_EX>() as u32,
            );
            if ok == 0 {
                return None;
            }
            Some(counters.PrivateUsage as u64)
        })
    }

    fn page_size() -> Option<u64> {
        unsafe {
            let mut info = std::mem::zeroed::<SYSTEM_INFO>();
            GetSystemInfo(&mut info);
            Some(info.dwPageSize as u64)
        }
    }

    fn address_space_bounds() -> Option<(u64, u64)> {
        unsafe {
            let mut info = std::mem::zeroed::<SYSTEM_INFO>();
            GetSystemInfo(&mut info);
            Some((
                info.lpMinimumApplicationAddress as u64,
                info.lpMaximumApplicationAddress as u64,
            ))
        }
    }

    fn virtual_memory() -> Option<VirtualMemory> {
        unsafe {
            let mut status = std::mem::zeroed::<MEMORYSTATUSEX>();
            status.dwLength = std::mem::size_of::<MEMORYSTATUSEX>() as u32;
            if GlobalMemoryStatusEx(&mut status) == 0 {
                return None;
            }
            Some(VirtualMemory {
                total: status.ullTotalVirtual,
                available: status.ullAvailVirtual,
            })
        }
    }
}
