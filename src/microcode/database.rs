//! Known Intel processor identifications
//!
//! This table is hand-curated from Intel microcode update guidance and maps
//! silicon fingerprints (family/model/stepping) to processor codenames and
//! the microcode revisions published for them.

use serde::Serialize;

use crate::hardware::Fingerprint;

/// One row of the microcode update list.
///
/// `family`, `model`, `stepping_id` and `platform_id` are lowercase
/// hexadecimal digit strings without a `0x` prefix. Several rows may share
/// the same family/model/stepping triple: distinct codenames can ship on the
/// same silicon stepping, and a lookup must surface all of them.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessorRecord {
    /// Processor codename (e.g., "CFL-S")
    pub codename: &'static str,
    /// Stepping label as printed in vendor documents (e.g., "P0")
    pub stepping: &'static str,
    /// Family code
    pub family: &'static str,
    /// Model number
    pub model: &'static str,
    /// Stepping id
    pub stepping_id: &'static str,
    /// Platform (packaging) id; stored for reference, never compared
    pub platform_id: &'static str,
    /// Microcode revision before the update boundary
    pub old_version: u32,
    /// Microcode revision after the update boundary
    pub new_version: u32,
    /// Marketing names of the affected products
    pub products: &'static str,
}

/// Microcode update list, in vendor document order.
pub static KNOWN_PROCESSORS: &[ProcessorRecord] = &[
    ProcessorRecord {
        codename: "SKL-U/Y",
        stepping: "D0",
        family: "6",
        model: "4e",
        stepping_id: "3",
        platform_id: "c0",
        old_version: 0xd4,
        new_version: 0xd6,
        products: "Core Gen6 Mobile",
    },
    ProcessorRecord {
        codename: "SKL-U23e",
        stepping: "K1",
        family: "6",
        model: "4e",
        stepping_id: "3",
        platform_id: "c0",
        old_version: 0xd4,
        new_version: 0xd6,
        products: "Core Gen6 Mobile",
    },
    ProcessorRecord {
        codename: "SKL-H/S/E3",
        stepping: "N0/R0/S0",
        family: "6",
        model: "5e",
        stepping_id: "3",
        platform_id: "36",
        old_version: 0xd4,
        new_version: 0xd6,
        products: "Core Gen6",
    },
    ProcessorRecord {
        codename: "AML-Y22",
        stepping: "H0",
        family: "6",
        model: "8e",
        stepping_id: "9",
        platform_id: "10",
        old_version: 0xc6,
        new_version: 0xca,
        products: "Core Gen8 Mobile",
    },
    ProcessorRecord {
        codename: "KBL-U/Y",
        stepping: "H0",
        family: "6",
        model: "8e",
        stepping_id: "9",
        platform_id: "c0",
        old_version: 0xc6,
        new_version: 0xca,
        products: "Core Gen7 Mobile",
    },
    ProcessorRecord {
        codename: "KBL-U23e",
        stepping: "J1",
        family: "6",
        model: "8e",
        stepping_id: "9",
        platform_id: "c0",
        old_version: 0xc6,
        new_version: 0xca,
        products: "Core Gen7 Mobile",
    },
    ProcessorRecord {
        codename: "CFL-U43e",
        stepping: "D0",
        family: "6",
        model: "8e",
        stepping_id: "a",
        platform_id: "c0",
        old_version: 0xc6,
        new_version: 0xca,
        products: "Core Gen8 Mobile",
    },
    ProcessorRecord {
        codename: "KBL-R U",
        stepping: "Y0",
        family: "6",
        model: "8e",
        stepping_id: "a",
        platform_id: "c0",
        old_version: 0xc6,
        new_version: 0xca,
        products: "Core Gen8 Mobile",
    },
    ProcessorRecord {
        codename: "WHL-U",
        stepping: "W0",
        family: "6",
        model: "8e",
        stepping_id: "b",
        platform_id: "d0",
        old_version: 0xc6,
        new_version: 0xca,
        products: "Core Gen8 Mobile",
    },
    ProcessorRecord {
        codename: "AML-Y42",
        stepping: "V0",
        family: "6",
        model: "8e",
        stepping_id: "c",
        platform_id: "94",
        old_version: 0xc6,
        new_version: 0xca,
        products: "Core Gen10 Mobile",
    },
    ProcessorRecord {
        codename: "WHL-U",
        stepping: "V0",
        family: "6",
        model: "8e",
        stepping_id: "c",
        platform_id: "94",
        old_version: 0xc6,
        new_version: 0xca,
        products: "Core Gen8 Mobile",
    },
    ProcessorRecord {
        codename: "CML-U42",
        stepping: "V0",
        family: "6",
        model: "8e",
        stepping_id: "c",
        platform_id: "94",
        old_version: 0xc6,
        new_version: 0xca,
        products: "Core Gen10 Mobile",
    },
    ProcessorRecord {
        codename: "KBL-G/H/S/X/E3",
        stepping: "B0",
        family: "6",
        model: "9e",
        stepping_id: "9",
        platform_id: "2a",
        old_version: 0xc6,
        new_version: 0xca,
        products: "Core Gen7 Desktop, Mobile, Xeon E3 v6",
    },
    ProcessorRecord {
        codename: "CFL-H/S/E3",
        stepping: "U0",
        family: "6",
        model: "9e",
        stepping_id: "a",
        platform_id: "22",
        old_version: 0xc6,
        new_version: 0xca,
        products: "Core Gen8 Desktop, Mobile, Xeon E",
    },
    ProcessorRecord {
        codename: "CFL-S",
        stepping: "B0",
        family: "6",
        model: "9e",
        stepping_id: "b",
        platform_id: "02",
        old_version: 0xc6,
        new_version: 0xca,
        products: "Core Gen8",
    },
    ProcessorRecord {
        codename: "CFL-S",
        stepping: "P0",
        family: "6",
        model: "9e",
        stepping_id: "c",
        platform_id: "22",
        old_version: 0xc6,
        new_version: 0xca,
        products: "Core Gen9 Desktop",
    },
    ProcessorRecord {
        codename: "CFL-H/S/E3",
        stepping: "R0",
        family: "6",
        model: "9e",
        stepping_id: "d",
        platform_id: "22",
        old_version: 0xc6,
        new_version: 0xca,
        products: "Core Gen9 Desktop, Mobile, Xeon E",
    },
    ProcessorRecord {
        codename: "CML-U62",
        stepping: "A0",
        family: "6",
        model: "a6",
        stepping_id: "0",
        platform_id: "80",
        old_version: 0xc6,
        new_version: 0xca,
        products: "Core Gen10 Mobile",
    },
];

impl ProcessorRecord {
    /// Whether this row identifies the given host fingerprint.
    ///
    /// Equality is over family, model and stepping id only, compared as the
    /// normalized lowercase hex strings the extractor produces. Platform id
    /// and microcode versions never participate.
    pub fn matches(&self, have: &Fingerprint) -> bool {
        self.stepping_id == have.stepping_id
            && self.model == have.model
            && self.family == have.family
    }

    /// All rows identifying the given fingerprint, in table order.
    ///
    /// Scans the entire table; duplicate triples are intentional and every
    /// one of them is returned.
    pub fn find_matches(have: &Fingerprint) -> Vec<&'static ProcessorRecord> {
        KNOWN_PROCESSORS
            .iter()
            .filter(|record| record.matches(have))
            .collect()
    }
}
