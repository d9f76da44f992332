//! Hardware identification.
//!
//! Extracts the processor fingerprint and microcode revision from the
//! host OS hardware description, plus a cosmetic CPU summary via sysinfo.

pub mod cpu;
pub mod fingerprint;
pub mod source;

pub use cpu::CpuSummary;
pub use fingerprint::{Fingerprint, KeySet, MicrocodeInfo};
pub use source::{detect_source, HwInfoSource, ProbeError, SelectedSource};
