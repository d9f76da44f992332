//! Report assembly and formatting.
//!
//! One terminal pass: the extracted fingerprint, the observed microcode
//! revision, and every update-list row the host matched.

use colored::*;
use serde::Serialize;

use crate::hardware::{CpuSummary, Fingerprint, MicrocodeInfo};
use crate::microcode::{ProcessorRecord, RevisionStanding};

/// Printed verbatim when the scan finds nothing.
pub const NO_MATCH_NOTICE: &str = "No processors on the microcode update list matched";

/// One update-list row the host matched, with the observed revision
/// classified against the row's boundary.
#[derive(Debug, Clone, Serialize)]
pub struct MatchedRecord {
    pub record: &'static ProcessorRecord,
    pub standing: RevisionStanding,
}

/// Everything the check produces for one run.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu: Option<CpuSummary>,
    pub fingerprint: Fingerprint,
    pub microcode: MicrocodeInfo,
    pub matches: Vec<MatchedRecord>,
}

impl Report {
    /// Match the fingerprint against the full table and classify the
    /// observed revision per matched row.
    pub fn generate(
        cpu: Option<CpuSummary>,
        fingerprint: Fingerprint,
        microcode: MicrocodeInfo,
    ) -> Self {
        let matches = ProcessorRecord::find_matches(&fingerprint)
            .into_iter()
            .map(|record| MatchedRecord {
                standing: RevisionStanding::classify(microcode.revision, record),
                record,
            })
            .collect();

        Report {
            cpu,
            fingerprint,
            microcode,
            matches,
        }
    }

    /// Render the report for the terminal.
    pub fn display(&self) -> String {
        const WIDTH: usize = 62;
        let mut output = String::new();

        output.push_str(&format!("╔{}╗\n", "═".repeat(WIDTH)));
        output.push_str(&format!("║{:^WIDTH$}║\n", "PROCESSOR FINGERPRINT"));
        output.push_str(&format!("╠{}╣\n", "═".repeat(WIDTH)));

        let format_line = |label: &str, content: &str| -> String {
            let content_width = WIDTH.saturating_sub(2);
            let label_len = label.len();
            if label_len < content_width {
                format!(
                    "║ {}{:<content_width$}║\n",
                    label,
                    content,
                    content_width = content_width - label_len
                )
            } else {
                format!(
                    "║ {}{}║\n",
                    label,
                    &content[..content_width.saturating_sub(label_len)]
                )
            }
        };

        if let Some(ref cpu) = self.cpu {
            output.push_str(&format_line("CPU: ", &cpu.brand));
            output.push_str(&format_line(
                "      ",
                &format!(
                    "{}, {} cores / {} threads",
                    cpu.vendor, cpu.cores, cpu.threads
                ),
            ));
            output.push_str(&format!("╠{}╣\n", "═".repeat(WIDTH)));
        }

        output.push_str(&format_line("Family:       ", &self.fingerprint.family));
        output.push_str(&format_line("Model:        ", &self.fingerprint.model));
        output.push_str(&format_line("Stepping id:  ", &self.fingerprint.stepping_id));
        output.push_str(&format_line(
            "Microcode:    ",
            &format!(
                "{:#x} ({})",
                self.microcode.revision, self.microcode.revision
            ),
        ));
        output.push_str(&format!("╚{}╝\n", "═".repeat(WIDTH)));

        if self.matches.is_empty() {
            output.push('\n');
            output.push_str(&format!("{}\n", NO_MATCH_NOTICE.bright_yellow()));
            return output;
        }

        for matched in &self.matches {
            let record = matched.record;
            output.push('\n');
            output.push_str(&format!(
                "{} {} (stepping {}, platform id {})\n",
                "Matched".bright_green(),
                record.codename.bright_green().bold(),
                record.stepping,
                record.platform_id
            ));
            output.push_str(&format!("  Products: {}\n", record.products));
            output.push_str(&format!(
                "  Update boundary: {:#x} -> {:#x}; observed {:#x} is {}\n",
                record.old_version, record.new_version, self.microcode.revision, matched.standing
            ));
        }

        output
    }
}
