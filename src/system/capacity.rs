use sysinfo::System;

use super::collector::Collector;
use super::platform;
pub use super::platform::VirtualMemory;

/// Closed set of reported processor architectures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Architecture {
    X86,
    X64,
    Arm,
    Unknown,
}

impl Architecture {
    pub fn from_label(label: &str) -> Self {
        match label.to_lowercase().as_str() {
            "x86_64" | "amd64" | "x64" => Architecture::X64,
            "x86" | "i386" | "i586" | "i686" => Architecture::X86,
            "arm" | "armv7" | "aarch64" | "arm64" => Architecture::Arm,
            _ => Architecture::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Architecture::X86 => "x86 (32-bit)",
            Architecture::X64 => "x64 (64-bit)",
            Architecture::Arm => "ARM",
            Architecture::Unknown => "Unknown",
        }
    }
}

/// Host capacity snapshot, assembled fresh on every render. Fields the
/// platform cannot provide are `None` and render as an explicit
/// placeholder rather than failing the whole report.
#[derive(Clone, Debug)]
pub struct CapacityReport {
    pub architecture: Architecture,
    pub logical_cpus: usize,
    pub page_size: Option<u64>,
    pub address_bounds: Option<(u64, u64)>,
    pub physical_total: u64,
    pub physical_available: u64,
    pub virtual_memory: Option<VirtualMemory>,
}

pub fn report(collector: &Collector) -> CapacityReport {
    let virtual_memory = platform::virtual_memory().or_else(|| {
        // No commit accounting on this platform: approximate the
        // addressable total as physical plus swap.
        Some(VirtualMemory {
            total: collector.memory_total() + collector.swap_total(),
            available: collector.memory_available() + collector.swap_free(),
        })
    });

    CapacityReport {
        architecture: Architecture::from_label(&System::cpu_arch()),
        logical_cpus: collector.core_count(),
        page_size: platform::page_size(),
        address_bounds: platform::address_space_bounds(),
        physical_total: collector.memory_total(),
        physical_available: collector.memory_available(),
        virtual_memory,
    }
}
