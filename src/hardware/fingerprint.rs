//! Processor fingerprint extraction.
//!
//! Turns the raw `key: value` lines of a [`HwInfoSource`] into the
//! normalized lowercase-hex identifiers the update list is keyed on.

use serde::Serialize;
use tracing::debug;

use super::source::{HwInfoSource, ProbeError};

/// OS-specific property names for the identifiers the extractor reads.
#[derive(Debug, Clone, Copy)]
pub struct KeySet {
    pub stepping: &'static str,
    pub model: &'static str,
    pub family: &'static str,
    pub microcode: &'static str,
}

impl KeySet {
    pub const MACOS: KeySet = KeySet {
        stepping: "machdep.cpu.stepping",
        model: "machdep.cpu.model",
        family: "machdep.cpu.family",
        microcode: "machdep.cpu.microcode_version",
    };

    pub const LINUX: KeySet = KeySet {
        stepping: "stepping",
        model: "model",
        family: "cpu family",
        microcode: "microcode",
    };
}

/// The host processor's microarchitecture identity.
///
/// Fields are lowercase hex without prefix or leading zeros; a field is the
/// empty string when the host did not report the property, and an empty
/// field can never equal any table entry.
#[derive(Debug, Clone, Serialize)]
pub struct Fingerprint {
    pub family: String,
    pub model: String,
    pub stepping_id: String,
}

impl Fingerprint {
    /// Read stepping/model/family from the host, once per run.
    pub fn detect(source: &dyn HwInfoSource, keys: &KeySet) -> Result<Self, ProbeError> {
        let fingerprint = Fingerprint {
            stepping_id: read_hex(source, keys.stepping)?,
            model: read_hex(source, keys.model)?,
            family: read_hex(source, keys.family)?,
        };
        debug!(?fingerprint, "extracted host fingerprint");
        Ok(fingerprint)
    }
}

/// Firmware microcode revision as reported at boot.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MicrocodeInfo {
    pub revision: u32,
}

impl MicrocodeInfo {
    pub fn detect(source: &dyn HwInfoSource, keys: &KeySet) -> Result<Self, ProbeError> {
        let revision = read_int(source, keys.microcode)?;
        Ok(MicrocodeInfo { revision })
    }
}

/// Value portion of a property line.
///
/// Strips the key's literal text, trims, drops exactly one leading
/// character (the separating colon), and trims again. An empty raw fetch
/// stays empty without any of that.
pub fn read_string(source: &dyn HwInfoSource, key: &str) -> Result<String, ProbeError> {
    let raw = source.raw_line(key)?;
    if raw.is_empty() {
        return Ok(String::new());
    }
    let stripped = raw.replace(key, "");
    let trimmed = stripped.trim();
    let mut chars = trimmed.chars();
    chars.next();
    Ok(chars.as_str().trim().to_string())
}

/// Property value as an integer: `0x`-prefixed values parse as hex,
/// everything else as base 10, absence as zero.
pub fn read_int(source: &dyn HwInfoSource, key: &str) -> Result<u32, ProbeError> {
    let value = read_string(source, key)?;
    if value.is_empty() {
        return Ok(0);
    }
    parse_field(key, &value)
}

/// Property value re-rendered as bare lowercase hex (no prefix, no leading
/// zeros; zero renders "0"). An absent property stays the empty string so
/// it can never collide with a real table entry.
pub fn read_hex(source: &dyn HwInfoSource, key: &str) -> Result<String, ProbeError> {
    let value = read_string(source, key)?;
    if value.is_empty() {
        return Ok(String::new());
    }
    Ok(format!("{:x}", parse_field(key, &value)?))
}

fn parse_field(key: &str, value: &str) -> Result<u32, ProbeError> {
    let parsed = match value.strip_prefix("0x") {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => value.parse::<u32>(),
    };
    parsed.map_err(|_| ProbeError::MalformedField {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::{read_hex, read_int, read_string, Fingerprint, KeySet, MicrocodeInfo};
    use crate::hardware::source::{HwInfoSource, ProbeError};

    /// Canned property lines standing in for a live host.
    struct StubSource {
        lines: HashMap<String, String>,
    }

    impl StubSource {
        fn new(entries: &[(&str, &str)]) -> Self {
            StubSource {
                lines: entries
                    .iter()
                    .map(|(key, line)| (key.to_string(), line.to_string()))
                    .collect(),
            }
        }
    }

    impl HwInfoSource for StubSource {
        fn raw_line(&self, key: &str) -> Result<String, ProbeError> {
            Ok(self.lines.get(key).cloned().unwrap_or_default())
        }
    }

    #[test]
    fn read_string_strips_key_and_separator() {
        let source = StubSource::new(&[("stepping", "stepping\t: 10")]);
        assert_eq!(read_string(&source, "stepping").expect("stub read"), "10");

        let source = StubSource::new(&[(
            "machdep.cpu.family",
            "machdep.cpu.family: 6",
        )]);
        assert_eq!(
            read_string(&source, "machdep.cpu.family").expect("stub read"),
            "6"
        );
    }

    #[test]
    fn read_string_on_empty_fetch_stays_empty() {
        let source = StubSource::new(&[]);
        assert_eq!(read_string(&source, "stepping").expect("stub read"), "");
    }

    #[test]
    fn read_string_survives_value_free_lines() {
        // A line that is nothing but the key must not slice past the end.
        let source = StubSource::new(&[("stepping", "stepping")]);
        assert_eq!(read_string(&source, "stepping").expect("stub read"), "");
    }

    #[test]
    fn read_int_parses_decimal_and_hex_prefixed() {
        let source = StubSource::new(&[
            ("model", "model\t\t: 142"),
            ("microcode", "microcode\t: 0xd4"),
        ]);
        assert_eq!(read_int(&source, "model").expect("stub read"), 142);
        assert_eq!(read_int(&source, "microcode").expect("stub read"), 0xd4);
    }

    #[test]
    fn read_int_of_absent_property_is_zero() {
        let source = StubSource::new(&[]);
        assert_eq!(read_int(&source, "microcode").expect("stub read"), 0);
    }

    #[test]
    fn read_int_rejects_malformed_values() {
        let source = StubSource::new(&[("microcode", "microcode\t: zebra")]);
        let err = read_int(&source, "microcode").expect_err("parse must fail");
        assert!(matches!(err, ProbeError::MalformedField { .. }));

        let source = StubSource::new(&[("microcode", "microcode\t: 0xzz")]);
        assert!(read_int(&source, "microcode").is_err());
    }

    #[test]
    fn read_hex_renders_bare_lowercase() {
        let source = StubSource::new(&[
            ("model", "model\t\t: 142"),
            ("microcode", "microcode\t: 0xd4"),
            ("stepping", "stepping\t: 0"),
        ]);
        assert_eq!(read_hex(&source, "model").expect("stub read"), "8e");
        assert_eq!(read_hex(&source, "microcode").expect("stub read"), "d4");
        assert_eq!(read_hex(&source, "stepping").expect("stub read"), "0");
    }

    #[test]
    fn read_hex_of_absent_property_stays_empty() {
        let source = StubSource::new(&[]);
        assert_eq!(read_hex(&source, "stepping").expect("stub read"), "");
    }

    #[test]
    fn read_hex_round_trips_through_the_hex_branch() {
        for value in [0u32, 1, 0xa, 0x8e, 0xc0, 0xff, 0xd6] {
            let rendered = format!("{value:x}");
            let line = format!("model\t\t: 0x{rendered}");
            let source = StubSource::new(&[("model", line.as_str())]);
            assert_eq!(read_int(&source, "model").expect("stub read"), value);
            assert_eq!(read_hex(&source, "model").expect("stub read"), rendered);
        }
    }

    #[test]
    fn detect_normalizes_decimal_linux_properties() {
        let source = StubSource::new(&[
            ("stepping", "stepping\t: 10"),
            ("model", "model\t\t: 142"),
            ("cpu family", "cpu family\t: 6"),
            ("microcode", "microcode\t: 0xd4"),
        ]);
        let fingerprint =
            Fingerprint::detect(&source, &KeySet::LINUX).expect("detect from stub");
        assert_eq!(fingerprint.family, "6");
        assert_eq!(fingerprint.model, "8e");
        assert_eq!(fingerprint.stepping_id, "a");

        let microcode =
            MicrocodeInfo::detect(&source, &KeySet::LINUX).expect("detect from stub");
        assert_eq!(microcode.revision, 0xd4);
    }

    #[test]
    fn detect_reads_macos_property_names() {
        let source = StubSource::new(&[
            ("machdep.cpu.stepping", "machdep.cpu.stepping: 10"),
            ("machdep.cpu.model", "machdep.cpu.model: 158"),
            ("machdep.cpu.family", "machdep.cpu.family: 6"),
            ("machdep.cpu.microcode_version", "machdep.cpu.microcode_version: 202"),
        ]);
        let fingerprint =
            Fingerprint::detect(&source, &KeySet::MACOS).expect("detect from stub");
        assert_eq!(fingerprint.family, "6");
        assert_eq!(fingerprint.model, "9e");
        assert_eq!(fingerprint.stepping_id, "a");

        let microcode =
            MicrocodeInfo::detect(&source, &KeySet::MACOS).expect("detect from stub");
        assert_eq!(microcode.revision, 0xca);
    }
}
