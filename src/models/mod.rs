use serde::{Deserialize, Serialize};
use std::fmt;

pub mod chat;
pub mod pictogram;

pub use chat::{ChatMessage, MessageKind};
pub use pictogram::{ImageOptions, KeywordList, PictogramRecord, RawPictogram};

/// Catalogue identifier of a pictogram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PictogramId(pub u64);

impl PictogramId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PictogramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PictogramId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Where a selection session currently is in its search/select/send cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Idle,
    Searching,
    ResultsShown,
    Selecting,
    Sending,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionPhase::Idle => "idle",
            SessionPhase::Searching => "searching",
            SessionPhase::ResultsShown => "results_shown",
            SessionPhase::Selecting => "selecting",
            SessionPhase::Sending => "sending",
        };
        f.write_str(name)
    }
}
