//! Microcode update list and revision classification.

pub mod database;

pub use database::{ProcessorRecord, KNOWN_PROCESSORS};

use serde::Serialize;

/// Where an observed microcode revision sits relative to a record's
/// published old/new update boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RevisionStanding {
    /// Below the pre-update revision
    PredatesList,
    /// Exactly the pre-update revision
    Old,
    /// Strictly between the published revisions
    BetweenRevisions,
    /// Exactly the post-update revision
    New,
    /// Above the post-update revision
    AheadOfList,
}

impl RevisionStanding {
    /// Classify an observed revision against one record's boundary.
    ///
    /// Display-only: the match predicate never consults microcode fields.
    pub fn classify(revision: u32, record: &ProcessorRecord) -> Self {
        if revision == record.old_version {
            RevisionStanding::Old
        } else if revision == record.new_version {
            RevisionStanding::New
        } else if revision < record.old_version {
            RevisionStanding::PredatesList
        } else if revision > record.new_version {
            RevisionStanding::AheadOfList
        } else {
            RevisionStanding::BetweenRevisions
        }
    }
}

impl std::fmt::Display for RevisionStanding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RevisionStanding::PredatesList => write!(f, "older than the update list"),
            RevisionStanding::Old => write!(f, "the old (pre-update) revision"),
            RevisionStanding::BetweenRevisions => write!(f, "between the listed revisions"),
            RevisionStanding::New => write!(f, "the new (updated) revision"),
            RevisionStanding::AheadOfList => write!(f, "newer than the update list"),
        }
    }
}
