//! Raw hardware identifier sources.
//!
//! Each supported host OS exposes processor identifiers through a different
//! facility: macOS through `sysctl`, Linux through `/proc/cpuinfo`. Both are
//! wrapped behind [`HwInfoSource`], which answers a named property with the
//! raw `key: value` line the OS printed, or an empty string when the
//! property does not exist.

use std::env;
use std::process::{Command, ExitStatus};
use std::sync::OnceLock;

use thiserror::Error;
use tracing::debug;

use super::fingerprint::KeySet;

/// Filter handed to grep; matches the cpuinfo lines the extractor reads.
const CPUINFO_FILTER: &str = r"(stepping|model|microcode|cpu family)\W*:";
const CPUINFO_PATH: &str = "/proc/cpuinfo";

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("{0} is not a supported architecture, want x86_64")]
    UnsupportedArch(&'static str),

    #[error("{0} is not a supported operating system")]
    UnsupportedOs(&'static str),

    #[error("failed to launch `{command}`: {source}")]
    CommandLaunch {
        command: String,
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("malformed numeric value {value:?} for property {key:?}")]
    MalformedField { key: String, value: String },
}

/// Query-by-key access to the host's hardware description.
pub trait HwInfoSource {
    /// Raw textual line(s) for a named property, empty if unavailable.
    fn raw_line(&self, key: &str) -> Result<String, ProbeError>;
}

/// The source picked for this host plus the property names it understands.
pub struct SelectedSource {
    pub source: Box<dyn HwInfoSource>,
    pub keys: KeySet,
}

/// Pick the identifier source for the running host.
///
/// Rejects non-x86-64 hosts before any hardware query is attempted; an OS
/// without an implementation is rejected the same way.
pub fn detect_source() -> Result<SelectedSource, ProbeError> {
    if env::consts::ARCH != "x86_64" {
        return Err(ProbeError::UnsupportedArch(env::consts::ARCH));
    }
    match env::consts::OS {
        "macos" => Ok(SelectedSource {
            source: Box::new(SysctlSource),
            keys: KeySet::MACOS,
        }),
        "linux" => Ok(SelectedSource {
            source: Box::new(CpuinfoSource),
            keys: KeySet::LINUX,
        }),
        other => Err(ProbeError::UnsupportedOs(other)),
    }
}

/// macOS: one `sysctl <key>` invocation per property.
pub struct SysctlSource;

impl HwInfoSource for SysctlSource {
    fn raw_line(&self, key: &str) -> Result<String, ProbeError> {
        run_capture("sysctl", &[key])
    }
}

/// Linux: a single grep over `/proc/cpuinfo`, cached for the process
/// lifetime, answered by first-prefix-match scan.
pub struct CpuinfoSource;

static CPUINFO_LINES: OnceLock<Vec<String>> = OnceLock::new();

impl CpuinfoSource {
    fn cached_lines(&self) -> Result<&'static [String], ProbeError> {
        if let Some(lines) = CPUINFO_LINES.get() {
            return Ok(lines);
        }
        let raw = run_capture("grep", &["-E", CPUINFO_FILTER, CPUINFO_PATH])?;
        let lines: Vec<String> = raw.lines().map(str::to_owned).collect();
        debug!(count = lines.len(), "cached cpuinfo identifier lines");
        Ok(CPUINFO_LINES.get_or_init(|| lines))
    }
}

impl HwInfoSource for CpuinfoSource {
    fn raw_line(&self, key: &str) -> Result<String, ProbeError> {
        let lines = self.cached_lines()?;
        Ok(first_prefix_match(lines, key).unwrap_or_default().to_string())
    }
}

/// First cached line whose prefix is `key`.
///
/// `/proc/cpuinfo` repeats its stanza per logical CPU; the first occurrence
/// is as good as any for package-level identifiers.
fn first_prefix_match<'a>(lines: &'a [String], key: &str) -> Option<&'a str> {
    lines
        .iter()
        .map(String::as_str)
        .find(|line| line.starts_with(key))
}

fn run_capture(command: &str, args: &[&str]) -> Result<String, ProbeError> {
    debug!(command, ?args, "querying hardware description");
    let output = Command::new(command)
        .args(args)
        .output()
        .map_err(|source| ProbeError::CommandLaunch {
            command: command.to_string(),
            source,
        })?;

    if !output.status.success() {
        return Err(ProbeError::CommandFailed {
            command: command.to_string(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
