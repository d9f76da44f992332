//! CPU summary via sysinfo.
//!
//! Cosmetic context for the report header. The fingerprint used for
//! matching never comes from here; it is extracted from the OS hardware
//! description so the values line up with vendor documents.

use serde::Serialize;
use sysinfo::System;

/// Human-facing description of the host CPU.
#[derive(Debug, Clone, Serialize)]
pub struct CpuSummary {
    /// Brand string (e.g., "Intel(R) Core(TM) i7-8550U CPU @ 1.80GHz")
    pub brand: String,
    /// Vendor id (e.g., "GenuineIntel")
    pub vendor: String,
    /// Physical cores
    pub cores: usize,
    /// Logical threads
    pub threads: usize,
}

impl CpuSummary {
    /// Best-effort detection; a host that reports no CPUs yields `None`
    /// rather than aborting the check.
    pub fn detect() -> Option<Self> {
        let mut sys = System::new();
        sys.refresh_cpu_all();

        let cpus = sys.cpus();
        let first_cpu = cpus.first()?;

        let threads = cpus.len();
        let cores = sys.physical_core_count().unwrap_or(threads);

        Some(CpuSummary {
            brand: first_cpu.brand().trim().to_string(),
            vendor: first_cpu.vendor_id().to_string(),
            cores,
            threads,
        })
    }
}
